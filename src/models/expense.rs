use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    /// Creation timestamp in milliseconds, bumped when two share a millisecond.
    pub id: i64,
    pub title: String,
    pub amount: Decimal,
    /// Format: "YYYY-MM-DD"
    pub date: String,
    #[serde(default)]
    pub is_emergency: bool,
}

impl Expense {
    pub fn new(id: i64, title: String, amount: Decimal, date: String, is_emergency: bool) -> Self {
        Self {
            id,
            title,
            amount,
            date,
            is_emergency,
        }
    }

    /// Amount counted towards the actual daily spend rate.
    pub fn routine_amount(&self) -> Decimal {
        if self.is_emergency {
            Decimal::ZERO
        } else {
            self.amount
        }
    }
}
