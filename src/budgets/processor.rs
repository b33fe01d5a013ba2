use bigdecimal::ToPrimitive;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::budgets::error::BudgetError;
use crate::budgets::processor_enums::{
    BudgetInput, BudgetView, CurrentBudget, UpdateBudgetResult, coerce_amount,
};
use crate::users::db_types::UserRecord;
use crate::utils::commons::DASHBOARD_PATH;
use crate::utils::period::MonthRange;
use crate::utils::traits::{BudgetStore, IdentityResolver, ViewInvalidator};

pub(crate) async fn resolve_user<I: IdentityResolver>(identity: &I) -> Result<UserRecord, BudgetError> {
    let session = identity
        .resolve_current_session()
        .ok_or(BudgetError::Unauthorized)?;

    identity
        .find_user_by_session_id(&session)
        .await?
        .ok_or(BudgetError::UserNotFound)
}

/// Caller's budget plus this month's expenses on `account_id`.
///
/// Errors are logged and handed back unchanged.
pub async fn get_current_budget<I, S>(
    identity: &I,
    store: &S,
    account_id: Uuid,
) -> Result<CurrentBudget, BudgetError>
where
    I: IdentityResolver,
    S: BudgetStore,
{
    let month = MonthRange::current();
    get_current_budget_on(identity, store, account_id, month.first_day).await
}

/// Same as [`get_current_budget`] with the calendar day supplied by the caller.
pub async fn get_current_budget_on<I, S>(
    identity: &I,
    store: &S,
    account_id: Uuid,
    today: NaiveDate,
) -> Result<CurrentBudget, BudgetError>
where
    I: IdentityResolver,
    S: BudgetStore,
{
    read_current_budget(identity, store, account_id, MonthRange::containing(today))
        .await
        .inspect_err(|e| tracing::error!(%account_id, "Error fetching budget: {}", e))
}

async fn read_current_budget<I, S>(
    identity: &I,
    store: &S,
    account_id: Uuid,
    range: MonthRange,
) -> Result<CurrentBudget, BudgetError>
where
    I: IdentityResolver,
    S: BudgetStore,
{
    let user = resolve_user(identity).await?;

    // budgets are per user, not per account
    let budget = store.find_budget_by_user(user.id).await?;

    let expenses = store
        .aggregate_expense_sum(user.id, account_id, range)
        .await?
        .unwrap_or_default();

    Ok(CurrentBudget {
        budget: budget.map(BudgetView::from),
        current_expenses: expenses.to_f64().unwrap_or(0.0),
    })
}

/// Create or replace the caller's budget.
///
/// Never fails: every error becomes [`UpdateBudgetResult::Failure`].
pub async fn update_budget<I, S, V>(
    identity: &I,
    store: &S,
    invalidator: &V,
    data: Option<BudgetInput>,
) -> UpdateBudgetResult
where
    I: IdentityResolver,
    S: BudgetStore,
    V: ViewInvalidator,
{
    match write_budget(identity, store, invalidator, data).await {
        Ok(budget) => UpdateBudgetResult::Success(budget),
        Err(e) => {
            tracing::error!("Error updating budget: {}", e);
            UpdateBudgetResult::Failure(e.to_string())
        }
    }
}

async fn write_budget<I, S, V>(
    identity: &I,
    store: &S,
    invalidator: &V,
    data: Option<BudgetInput>,
) -> Result<BudgetView, BudgetError>
where
    I: IdentityResolver,
    S: BudgetStore,
    V: ViewInvalidator,
{
    let data = data.ok_or(BudgetError::MissingInput("No budget data provided"))?;
    let amount = data
        .into_amount()
        .ok_or(BudgetError::MissingInput("Budget amount is required"))?;

    let user = resolve_user(identity).await?;

    let amount = coerce_amount(&amount)?;

    let budget = store.upsert_budget_by_user(user.id, amount).await?;
    tracing::info!(user_id = %user.id, budget_id = %budget.id, "budget saved");

    invalidator.mark_stale(DASHBOARD_PATH);

    Ok(BudgetView::from(budget))
}
