//! Amount formatting for reports
//!
//! Amounts are whole currency units, grouped the Icelandic way
//! (`1.250.000`), or abbreviated to thousands/millions for compact tables.

/// Round to a whole unit and group thousands with `.`
pub fn format_amount(amount: f64) -> String {
    let rounded = amount.round() as i64;
    let digits = rounded.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    grouped
}

/// `1.5M` at a million and above, whole thousands such as `500K` from a
/// thousand, and the plain amount below that
pub fn format_compact(amount: f64) -> String {
    let magnitude = amount.abs();
    if magnitude >= 1_000_000.0 {
        format!("{:.1}M", amount / 1_000_000.0)
    } else if magnitude >= 1_000.0 {
        format!("{:.0}K", amount / 1_000.0)
    } else {
        format_amount(amount)
    }
}
