use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::{Result, anyhow};
use bigdecimal::BigDecimal;
use chrono::Local;
use uuid::Uuid;

use crate::budgets::db_types::BudgetRecord;
use crate::transactions::db_types::{CreateTransaction, TransactionRecord, TransactionType};
use crate::users::db_types::UserRecord;
use crate::utils::period::MonthRange;
use crate::utils::traits::{BudgetStore, IdentityResolver, ViewInvalidator};

#[derive(Debug, Default)]
struct MemoryTables {
    /// keyed by external id
    users: HashMap<String, UserRecord>,
    /// keyed by user id, one budget per user
    budgets: HashMap<Uuid, BudgetRecord>,
    transactions: Vec<TransactionRecord>,
}

/// In-memory storage for users, budgets and ledger entries.
/// Every operation runs under one lock, so upserts are atomic.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<MemoryTables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> Result<MutexGuard<'_, MemoryTables>> {
        self.tables
            .lock()
            .map_err(|_| anyhow!("memory store lock poisoned"))
    }

    pub fn add_user(&self, external_id: &str, email: &str) -> Result<UserRecord> {
        let user = UserRecord {
            id: Uuid::new_v4(),
            external_id: external_id.to_string(),
            email: email.to_string(),
            name: None,
            created_at: Local::now().naive_local(),
        };

        self.tables()?
            .users
            .insert(external_id.to_string(), user.clone());

        Ok(user)
    }

    pub fn add_transaction(&self, args: CreateTransaction) -> Result<TransactionRecord> {
        let record = TransactionRecord {
            id: Uuid::new_v4(),
            user_id: args.user_id,
            account_id: args.account_id,
            transaction_type: args.transaction_type,
            amount: args.amount,
            date: args.date,
            description: args.description,
            created_at: Local::now().naive_local(),
        };

        self.tables()?.transactions.push(record.clone());

        Ok(record)
    }

    pub fn budget_count(&self) -> Result<usize> {
        Ok(self.tables()?.budgets.len())
    }

    pub fn identity(&self, session: Option<&str>) -> MemoryIdentity {
        MemoryIdentity {
            store: self.clone(),
            session: session.map(str::to_string),
        }
    }
}

impl BudgetStore for MemoryStore {
    async fn find_budget_by_user(&self, user_id: Uuid) -> Result<Option<BudgetRecord>> {
        Ok(self.tables()?.budgets.get(&user_id).cloned())
    }

    async fn upsert_budget_by_user(&self, user_id: Uuid, amount: BigDecimal) -> Result<BudgetRecord> {
        let now = Local::now().naive_local();
        let mut tables = self.tables()?;

        let record = tables
            .budgets
            .entry(user_id)
            .and_modify(|budget| {
                budget.amount = amount.clone();
                budget.updated_at = now;
            })
            .or_insert_with(|| BudgetRecord {
                id: Uuid::new_v4(),
                user_id,
                amount: amount.clone(),
                created_at: now,
                updated_at: now,
            });

        Ok(record.clone())
    }

    async fn aggregate_expense_sum(
        &self,
        user_id: Uuid,
        account_id: Uuid,
        range: MonthRange,
    ) -> Result<Option<BigDecimal>> {
        let tables = self.tables()?;

        let total = tables
            .transactions
            .iter()
            .filter(|tx| {
                tx.user_id == user_id
                    && tx.account_id == account_id
                    && tx.transaction_type == TransactionType::Expense
                    && range.contains(tx.date)
            })
            .fold(None, |acc: Option<BigDecimal>, tx| {
                Some(acc.unwrap_or_default() + &tx.amount)
            });

        Ok(total)
    }
}

pub struct MemoryIdentity {
    store: MemoryStore,
    session: Option<String>,
}

impl IdentityResolver for MemoryIdentity {
    fn resolve_current_session(&self) -> Option<String> {
        self.session.clone()
    }

    async fn find_user_by_session_id(&self, session_id: &str) -> Result<Option<UserRecord>> {
        Ok(self.store.tables()?.users.get(session_id).cloned())
    }
}

/// Keeps every path it was asked to invalidate.
#[derive(Debug, Clone, Default)]
pub struct RecordingInvalidator {
    paths: Arc<Mutex<Vec<String>>>,
}

impl RecordingInvalidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn paths(&self) -> Vec<String> {
        self.paths
            .lock()
            .map(|paths| paths.clone())
            .unwrap_or_default()
    }
}

impl ViewInvalidator for RecordingInvalidator {
    fn mark_stale(&self, path: &str) {
        if let Ok(mut paths) = self.paths.lock() {
            paths.push(path.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn expense(user_id: Uuid, account_id: Uuid, amount: i32, day: NaiveDate) -> CreateTransaction {
        CreateTransaction {
            user_id,
            account_id,
            transaction_type: TransactionType::Expense,
            amount: BigDecimal::from(amount),
            date: day.and_hms_opt(12, 0, 0).unwrap(),
            description: None,
        }
    }

    #[tokio::test]
    async fn test_upsert_keeps_one_budget_per_user() -> Result<()> {
        let store = MemoryStore::new();
        let user = store.add_user("user_1", "one@example.com")?;

        let first = store.upsert_budget_by_user(user.id, BigDecimal::from(100)).await?;
        let second = store.upsert_budget_by_user(user.id, BigDecimal::from(250)).await?;

        assert_eq!(first.id, second.id);
        assert_eq!(second.amount, BigDecimal::from(250));
        assert_eq!(store.budget_count()?, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_upsert_stamps_local_time() -> Result<()> {
        let store = MemoryStore::new();
        let user = store.add_user("user_1", "one@example.com")?;

        let before = Local::now().naive_local();
        let budget = store.upsert_budget_by_user(user.id, BigDecimal::from(100)).await?;
        let after = Local::now().naive_local();

        assert!(budget.created_at >= before && budget.created_at <= after);
        assert!(budget.updated_at >= before && budget.updated_at <= after);
        Ok(())
    }

    #[tokio::test]
    async fn test_aggregate_is_none_without_matches() -> Result<()> {
        let store = MemoryStore::new();
        let range = MonthRange::containing(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());

        let total = store
            .aggregate_expense_sum(Uuid::new_v4(), Uuid::new_v4(), range)
            .await?;

        assert_eq!(total, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_aggregate_filters_type_account_and_month() -> Result<()> {
        let store = MemoryStore::new();
        let user = store.add_user("user_1", "one@example.com")?;
        let account = Uuid::new_v4();
        let june = |d| NaiveDate::from_ymd_opt(2024, 6, d).unwrap();

        store.add_transaction(expense(user.id, account, 40, june(3)))?;
        store.add_transaction(expense(user.id, account, 60, june(30)))?;
        store.add_transaction(expense(user.id, Uuid::new_v4(), 1000, june(3)))?;
        store.add_transaction(expense(
            user.id,
            account,
            7,
            NaiveDate::from_ymd_opt(2024, 5, 31).unwrap(),
        ))?;
        store.add_transaction(CreateTransaction {
            transaction_type: TransactionType::Income,
            ..expense(user.id, account, 500, june(10))
        })?;

        let total = store
            .aggregate_expense_sum(user.id, account, MonthRange::containing(june(15)))
            .await?;

        assert_eq!(total, Some(BigDecimal::from(100)));
        Ok(())
    }

    #[tokio::test]
    async fn test_identity_lookup() -> Result<()> {
        let store = MemoryStore::new();
        let user = store.add_user("user_1", "one@example.com")?;

        let identity = store.identity(Some("user_1"));
        assert_eq!(identity.resolve_current_session().as_deref(), Some("user_1"));
        assert_eq!(identity.find_user_by_session_id("user_1").await?, Some(user));
        assert_eq!(identity.find_user_by_session_id("someone_else").await?, None);

        assert_eq!(store.identity(None).resolve_current_session(), None);
        Ok(())
    }

    #[test]
    fn test_recording_invalidator() {
        let invalidator = RecordingInvalidator::new();
        invalidator.mark_stale("/dashboard");

        assert_eq!(invalidator.paths(), vec!["/dashboard".to_string()]);
    }
}
