//! Display formatting for dashboard figures.
//!
//! Rounding is half away from zero, matching what users expect from a
//! price board rather than the banker's rounding used for stored values.

use rust_decimal::{Decimal, RoundingStrategy};

const THOUSAND: Decimal = Decimal::ONE_THOUSAND;

fn round(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// `$14k` for values of at least 1000, `$500` below.
pub fn currency_compact(value: Decimal) -> String {
    if value >= THOUSAND {
        format!("${:.0}k", round(value / THOUSAND, 0))
    } else {
        format!("${:.0}", round(value, 0))
    }
}

/// `1.2k MWh` for values of at least 1000, `400 MWh` below.
pub fn mwh_compact(value: Decimal) -> String {
    if value >= THOUSAND {
        format!("{:.1}k MWh", round(value / THOUSAND, 1))
    } else {
        format!("{:.0} MWh", round(value, 0))
    }
}

/// Whole-dollar amount with thousands separators: `$14,000`, `-$1,250`.
pub fn currency(value: Decimal) -> String {
    let rounded = round(value, 0);
    let digits = rounded.abs().trunc().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

/// Unit price with cents: `$35.00/MWh`.
pub fn price_per_mwh(value: Decimal) -> String {
    format!("${:.2}/MWh", round(value, 2))
}

/// One-decimal percentage: `12.5%`.
pub fn percent(value: Decimal) -> String {
    format!("{:.1}%", round(value, 1))
}
