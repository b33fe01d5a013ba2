use anyhow::Result;
use bigdecimal::BigDecimal;
use chrono::Local;
use diesel::prelude::*;
use uuid::Uuid;

use crate::budgets::db_types::{BudgetRecord, CreateBudget};
use crate::schema::budgets as budgets_table;
use crate::utils::commons::DbConn;

pub fn get_budget_for_user<'a>(conn: DbConn<'a>, user: Uuid) -> Result<Option<BudgetRecord>> {
    let budget = budgets_table::dsl::budgets
        .filter(budgets_table::user_id.eq(user))
        .first::<BudgetRecord>(conn)
        .optional()?;

    Ok(budget)
}

/// Insert the user's budget or overwrite its amount, in one statement.
pub fn upsert_budget<'a>(conn: DbConn<'a>, user: Uuid, value: BigDecimal) -> Result<BudgetRecord> {
    let new_budget = CreateBudget {
        user_id: user,
        amount: value,
    };

    // local clock, same as the month range
    let now = Local::now().naive_local();

    let record = diesel::insert_into(budgets_table::table)
        .values((
            &new_budget,
            budgets_table::created_at.eq(now),
            budgets_table::updated_at.eq(now),
        ))
        .on_conflict(budgets_table::user_id)
        .do_update()
        .set((
            budgets_table::amount.eq(&new_budget.amount),
            budgets_table::updated_at.eq(now),
        ))
        .get_result::<BudgetRecord>(conn)?;

    Ok(record)
}
