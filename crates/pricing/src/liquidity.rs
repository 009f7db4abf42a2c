//! Add-liquidity preview math

/// Proportional counterpart for a deposit: `amount * reserve_out / reserve_in`.
///
/// None when the input-side reserve is zero (empty pool — the deposit ratio
/// is the depositor's choice, not a derivable preview).
pub fn counterpart_amount(amount: f64, reserve_in: f64, reserve_out: f64) -> Option<f64> {
    if reserve_in <= 0.0 {
        return None;
    }
    Some(amount * reserve_out / reserve_in)
}
