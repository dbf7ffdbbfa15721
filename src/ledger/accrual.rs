//! Expense accrual by calendar month
//!
//! Activity is judged at month granularity: an expense starting mid-month is
//! active for that whole month, and one ending mid-month still accrues in its
//! final month. Quarterly and yearly charges fall on fixed calendar months
//! (Jan/Apr/Jul/Oct and January) regardless of the start month.

use super::{Expense, Frequency};
use crate::projection::Month;

/// True when `month` lies within the expense's start and optional end
pub fn is_active(expense: &Expense, month: Month) -> bool {
    if month < Month::of(expense.start_date) {
        return false;
    }
    match expense.end_date {
        Some(end) => month <= Month::of(end),
        None => true,
    }
}

/// Amount the expense charges in `month`
pub fn monthly_amount(expense: &Expense, month: Month) -> i64 {
    if !is_active(expense, month) {
        return 0;
    }

    let charged = match expense.frequency {
        Frequency::Monthly => true,
        Frequency::Quarterly => month.is_quarter_start(),
        Frequency::Yearly => month.is_january(),
        Frequency::OneTime => month == Month::of(expense.start_date),
    };

    if charged {
        expense.amount
    } else {
        0
    }
}

/// Sum of every expense charged in `month`
pub fn total_for_month(expenses: &[Expense], month: Month) -> i64 {
    expenses
        .iter()
        .map(|e| monthly_amount(e, month))
        .fold(0, i64::saturating_add)
}
