//! Expense ledger and monthly accrual

mod data;
pub mod accrual;
pub mod loader;

pub use data::{Expense, Frequency};
pub use accrual::{is_active, monthly_amount, total_for_month};
pub use loader::{load_expenses, load_expenses_from_csv, load_expenses_from_json};
