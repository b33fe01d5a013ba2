use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::schema::transactions as TransactionsTable;

#[derive(DbEnum, Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[ExistingTypePath = "crate::schema::sql_types::TransactionType"]
#[DbValueStyle = "SCREAMING_SNAKE_CASE"]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Expense,
    Income,
}

/// Ledger entry. Only ever aggregated by this service.
#[derive(Serialize, Deserialize, Queryable, Identifiable, Debug, Clone)]
#[diesel(table_name = TransactionsTable)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TransactionRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub account_id: Uuid,
    pub transaction_type: TransactionType,
    pub amount: BigDecimal,
    pub date: NaiveDateTime,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Serialize, Deserialize, Insertable, Debug, Clone)]
#[diesel(table_name = TransactionsTable)]
pub struct CreateTransaction {
    pub user_id: Uuid,
    pub account_id: Uuid,
    pub transaction_type: TransactionType,
    pub amount: BigDecimal,
    pub date: NaiveDateTime,
    pub description: Option<String>,
}
