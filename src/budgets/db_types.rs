use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::schema::budgets as BudgetsTable;

#[derive(Serialize, Deserialize, Queryable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(table_name = BudgetsTable)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BudgetRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub amount: BigDecimal,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Serialize, Deserialize, Insertable, Debug, Clone)]
#[diesel(table_name = BudgetsTable)]
pub struct CreateBudget {
    pub user_id: Uuid,
    pub amount: BigDecimal,
}
