use std::str::FromStr;

use bigdecimal::{BigDecimal, ToPrimitive};
use chrono::NaiveDateTime;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use uuid::Uuid;

use crate::budgets::db_types::BudgetRecord;
use crate::budgets::error::BudgetError;

/// Budget write input: a bare amount, or a record carrying one under `amount`.
#[derive(Debug, Clone, PartialEq)]
pub enum BudgetInput {
    Amount(Value),
    Record { amount: Option<Value> },
}

impl BudgetInput {
    /// `None` for JSON `null` and for falsy bare values (`0`, `false`, `""`).
    /// Arrays count as records without an amount.
    pub fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::Null | Value::Bool(false) => None,
            Value::Number(ref number) if number.as_f64() == Some(0.0) => None,
            Value::String(ref text) if text.is_empty() => None,
            Value::Object(mut fields) => Some(BudgetInput::Record {
                amount: fields.remove("amount"),
            }),
            Value::Array(_) => Some(BudgetInput::Record { amount: None }),
            other => Some(BudgetInput::Amount(other)),
        }
    }

    pub fn into_amount(self) -> Option<Value> {
        let amount = match self {
            BudgetInput::Amount(value) => Some(value),
            BudgetInput::Record { amount } => amount,
        };

        amount.filter(|value| !value.is_null())
    }
}

/// Numeric coercion for an extracted amount. Blank strings count as zero.
pub fn coerce_amount(value: &Value) -> Result<BigDecimal, BudgetError> {
    match value {
        Value::Number(number) => {
            BigDecimal::from_str(&number.to_string()).map_err(|_| BudgetError::InvalidAmount)
        }
        Value::String(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Ok(BigDecimal::from(0));
            }
            BigDecimal::from_str(trimmed).map_err(|_| BudgetError::InvalidAmount)
        }
        Value::Bool(flag) => Ok(BigDecimal::from(u8::from(*flag))),
        _ => Err(BudgetError::InvalidAmount),
    }
}

/// Budget as returned to callers, amount flattened to a plain number.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BudgetView {
    pub id: Uuid,
    pub user_id: Uuid,
    pub amount: f64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<BudgetRecord> for BudgetView {
    fn from(record: BudgetRecord) -> Self {
        Self {
            id: record.id,
            user_id: record.user_id,
            amount: record.amount.to_f64().unwrap_or(0.0),
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CurrentBudget {
    pub budget: Option<BudgetView>,
    pub current_expenses: f64,
}

/// Serializes as `{"success": true, "data": ..}` or `{"success": false, "error": ..}`.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateBudgetResult {
    Success(BudgetView),
    Failure(String),
}

impl UpdateBudgetResult {
    pub fn is_success(&self) -> bool {
        matches!(self, UpdateBudgetResult::Success(_))
    }
}

impl Serialize for UpdateBudgetResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("UpdateBudgetResult", 2)?;
        match self {
            UpdateBudgetResult::Success(budget) => {
                state.serialize_field("success", &true)?;
                state.serialize_field("data", budget)?;
            }
            UpdateBudgetResult::Failure(error) => {
                state.serialize_field("success", &false)?;
                state.serialize_field("error", error)?;
            }
        }
        state.end()
    }
}
