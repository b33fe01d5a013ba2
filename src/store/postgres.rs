use anyhow::Result;
use bigdecimal::BigDecimal;
use uuid::Uuid;

use crate::budgets::db_types::BudgetRecord;
use crate::budgets::operations::{get_budget_for_user, upsert_budget};
use crate::transactions::sql_queries::get_monthly_expenses;
use crate::users::db_types::UserRecord;
use crate::users::operations::get_user_by_external_id;
use crate::utils::commons::DbPool;
use crate::utils::db::get_conn;
use crate::utils::period::MonthRange;
use crate::utils::traits::{BudgetStore, IdentityResolver};

#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Identity for one request, `session` being the bearer credential if any.
    pub fn identity(&self, session: Option<String>) -> PgIdentity {
        PgIdentity {
            pool: self.pool.clone(),
            session,
        }
    }
}

impl BudgetStore for PgStore {
    async fn find_budget_by_user(&self, user_id: Uuid) -> Result<Option<BudgetRecord>> {
        let mut conn = get_conn(&self.pool)?;
        get_budget_for_user(&mut conn, user_id)
    }

    async fn upsert_budget_by_user(&self, user_id: Uuid, amount: BigDecimal) -> Result<BudgetRecord> {
        let mut conn = get_conn(&self.pool)?;
        upsert_budget(&mut conn, user_id, amount)
    }

    async fn aggregate_expense_sum(
        &self,
        user_id: Uuid,
        account_id: Uuid,
        range: MonthRange,
    ) -> Result<Option<BigDecimal>> {
        let mut conn = get_conn(&self.pool)?;
        let res = get_monthly_expenses(&mut conn, user_id, account_id, range)?;

        Ok(res.total)
    }
}

/// Resolves sessions against `users.external_id`.
pub struct PgIdentity {
    pool: DbPool,
    session: Option<String>,
}

impl IdentityResolver for PgIdentity {
    fn resolve_current_session(&self) -> Option<String> {
        self.session.clone()
    }

    async fn find_user_by_session_id(&self, session_id: &str) -> Result<Option<UserRecord>> {
        let mut conn = get_conn(&self.pool)?;
        get_user_by_external_id(&mut conn, session_id)
    }
}
