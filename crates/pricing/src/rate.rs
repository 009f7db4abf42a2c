//! Exchange rate derivation
//!
//! Pure and synchronous: both directions are computable from amounts the
//! form already holds, so toggling the priced side never triggers a fetch.

use lagoon_core::{AssetMetadata, Side, SwapState};

/// Parse a human-unit amount string. Empty or malformed reads as None.
fn parse_amount(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Render the swap rate with the active side as the unit:
/// `"1 {active} ≈ {rate} {other}"`, formatted to the other asset's
/// declared decimals.
///
/// Returns None ("no rate") when either amount is missing or the
/// active-side amount parses to zero — never Infinity or NaN. The UI
/// hides the rate line in that case.
pub fn exchange_rate(
    state: &SwapState,
    mode: Side,
    sell_meta: &AssetMetadata,
    buy_meta: &AssetMetadata,
) -> Option<String> {
    let active = parse_amount(&state.side(mode).amount)?;
    let other = parse_amount(&state.side(mode.other()).amount)?;
    if active == 0.0 {
        return None;
    }

    let rate = other / active;
    let (active_meta, other_meta) = match mode {
        Side::Sell => (sell_meta, buy_meta),
        Side::Buy => (buy_meta, sell_meta),
    };

    Some(format!(
        "1 {} ≈ {rate:.prec$} {}",
        active_meta.symbol,
        other_meta.symbol,
        prec = other_meta.decimals as usize,
    ))
}

/// Price implied by the amounts currently in the form (buy per sell).
/// None when either side is missing or the sell amount is zero.
pub fn preview_price(state: &SwapState) -> Option<f64> {
    let sell = parse_amount(&state.sell.amount)?;
    let buy = parse_amount(&state.buy.amount)?;
    if sell == 0.0 {
        return None;
    }
    Some(buy / sell)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lagoon_core::SwapSide;

    fn swap_state(sell_amount: &str, buy_amount: &str) -> SwapState {
        SwapState {
            sell: SwapSide {
                asset_id: None,
                amount: sell_amount.to_string(),
            },
            buy: SwapSide {
                asset_id: None,
                amount: buy_amount.to_string(),
            },
        }
    }

    fn meta(symbol: &str, decimals: u8) -> AssetMetadata {
        AssetMetadata {
            symbol: symbol.to_string(),
            decimals,
        }
    }

    #[test]
    fn test_no_rate_when_amount_empty() {
        let eth = meta("ETH", 9);
        let usdc = meta("USDC", 6);
        assert_eq!(exchange_rate(&swap_state("", "100"), Side::Sell, &eth, &usdc), None);
        assert_eq!(exchange_rate(&swap_state("1", ""), Side::Sell, &eth, &usdc), None);
        assert_eq!(exchange_rate(&swap_state("", ""), Side::Buy, &eth, &usdc), None);
    }

    #[test]
    fn test_no_rate_when_active_amount_zero() {
        let eth = meta("ETH", 9);
        let usdc = meta("USDC", 6);
        // Never Infinity/NaN
        assert_eq!(exchange_rate(&swap_state("0", "100"), Side::Sell, &eth, &usdc), None);
        assert_eq!(exchange_rate(&swap_state("0.0", "100"), Side::Sell, &eth, &usdc), None);
    }

    #[test]
    fn test_no_rate_on_malformed_amount() {
        let eth = meta("ETH", 9);
        let usdc = meta("USDC", 6);
        assert_eq!(exchange_rate(&swap_state("abc", "100"), Side::Sell, &eth, &usdc), None);
    }

    #[test]
    fn test_sell_mode_formats_with_buy_decimals() {
        let eth = meta("ETH", 9);
        let usdc = meta("USDC", 2);
        let rate = exchange_rate(&swap_state("2", "7000"), Side::Sell, &eth, &usdc);
        assert_eq!(rate.as_deref(), Some("1 ETH ≈ 3500.00 USDC"));
    }

    #[test]
    fn test_buy_mode_inverts_rate() {
        let eth = meta("ETH", 4);
        let usdc = meta("USDC", 2);
        let rate = exchange_rate(&swap_state("2", "7000"), Side::Buy, &eth, &usdc);
        // 1 USDC ≈ 2/7000 ETH, rendered with ETH's decimals
        assert_eq!(rate.as_deref(), Some("1 USDC ≈ 0.0003 ETH"));
    }

    #[test]
    fn test_mode_toggle_is_pure() {
        let eth = meta("ETH", 9);
        let usdc = meta("USDC", 6);
        let state = swap_state("1.5", "5250");
        let first = exchange_rate(&state, Side::Sell, &eth, &usdc);
        let toggled = exchange_rate(&state, Side::Buy, &eth, &usdc);
        let back = exchange_rate(&state, Side::Sell, &eth, &usdc);
        assert_eq!(first, back);
        assert_ne!(first, toggled);
    }

    #[test]
    fn test_preview_price() {
        assert_eq!(preview_price(&swap_state("2", "7000")), Some(3500.0));
        assert_eq!(preview_price(&swap_state("0", "7000")), None);
        assert_eq!(preview_price(&swap_state("", "7000")), None);
        assert_eq!(preview_price(&swap_state("2", "")), None);
    }
}
