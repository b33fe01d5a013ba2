use std::future::Future;

use anyhow::Result;
use bigdecimal::BigDecimal;
use uuid::Uuid;

use crate::budgets::db_types::BudgetRecord;
use crate::users::db_types::UserRecord;
use crate::utils::period::MonthRange;

/// Maps the credential of the current request to an internal user.
pub trait IdentityResolver {
    fn resolve_current_session(&self) -> Option<String>;

    fn find_user_by_session_id(
        &self,
        session_id: &str,
    ) -> impl Future<Output = Result<Option<UserRecord>>> + Send;
}

/// Persistence used by the budget processor.
pub trait BudgetStore {
    fn find_budget_by_user(
        &self,
        user_id: Uuid,
    ) -> impl Future<Output = Result<Option<BudgetRecord>>> + Send;

    /// Create-or-replace keyed on the user; must be a single atomic write.
    fn upsert_budget_by_user(
        &self,
        user_id: Uuid,
        amount: BigDecimal,
    ) -> impl Future<Output = Result<BudgetRecord>> + Send;

    /// `None` when no entry matched, like SQL `sum` over zero rows.
    fn aggregate_expense_sum(
        &self,
        user_id: Uuid,
        account_id: Uuid,
        range: MonthRange,
    ) -> impl Future<Output = Result<Option<BigDecimal>>> + Send;
}

/// Tells the presentation layer a rendered view is out of date.
pub trait ViewInvalidator {
    fn mark_stale(&self, path: &str);
}
