use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Banked leftover of one closed cycle. Only the month rollover creates these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsRecord {
    pub id: i64,
    pub amount: Decimal,
    /// Goal in force when the cycle closed, `None` if no positive goal was set.
    pub goal: Option<Decimal>,
    #[serde(default)]
    pub goal_achieved: bool,
    /// Format: "YYYY-MM-DD"
    pub date: String,
    /// Full month name, e.g. "October"
    pub month: String,
}

impl SavingsRecord {
    /// Percentage of the recorded goal this cycle reached.
    pub fn goal_progress(&self) -> Option<Decimal> {
        match self.goal {
            Some(goal) if goal > Decimal::ZERO => {
                Some(self.amount / goal * Decimal::ONE_HUNDRED)
            }
            _ => None,
        }
    }
}
