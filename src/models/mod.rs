mod expense;
mod savings;

pub use expense::Expense;
pub use savings::SavingsRecord;
