use crate::models::PaymentRecord;

/// Total spend across the payment history.
pub fn total_spent(payments: &[PaymentRecord]) -> f64 {
    payments.iter().map(|p| p.total_cost_usd).sum()
}

/// The displayed wallet balance: starting amount minus everything spent.
///
/// This is a display value only. It is not clamped and goes negative once
/// spend exceeds the starting amount.
pub fn derive_balance(starting_usd: f64, payments: &[PaymentRecord]) -> f64 {
    starting_usd - total_spent(payments)
}
