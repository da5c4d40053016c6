//! Display formatting for amounts, prices, percentages and dates
//!
//! Currency output is US dollars with exactly two fraction digits and comma
//! grouping, matching the "en-US"/"USD" locale formatting of the dashboard.

use chrono::{DateTime, NaiveDate, Utc};
use finboard_utils::format_number;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::time::DateRange;

/// Placeholder for values that are not available
pub const MISSING: &str = "—";

/// Placeholder for percentages that cannot be computed
pub const NOT_APPLICABLE: &str = "n/a";

/// Round half away from zero and pin the scale to `places`
fn fixed(value: Decimal, places: u32) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(places);
    rounded
}

/// `$1,234.56` for a non-negative value
fn dollars(abs: Decimal) -> String {
    let text = fixed(abs, 2).to_string();
    match text.split_once('.') {
        Some((whole, cents)) => format!("${}.{}", format_number(whole), cents),
        None => format!("${}.00", format_number(&text)),
    }
}

/// Credits get `+`, debits get `-`, the absolute value follows
///
/// Zero counts as a credit: `+$0.00`.
pub fn format_signed_amount(amount: Decimal) -> String {
    if amount < Decimal::ZERO {
        format!("-{}", dollars(amount.abs()))
    } else {
        format!("+{}", dollars(amount))
    }
}

/// Like [`format_signed_amount`] but without a leading `+`
pub fn format_plain_amount(amount: Decimal) -> String {
    if amount < Decimal::ZERO {
        format!("-{}", dollars(amount.abs()))
    } else {
        dollars(amount)
    }
}

/// Unit price with two decimals and no grouping: `$140.00`
pub fn format_price(price: Decimal) -> String {
    let sign = if price < Decimal::ZERO { "-" } else { "" };
    format!("{}${}", sign, fixed(price.abs(), 2))
}

/// Limit/stop price column; market orders show a dash
pub fn format_optional_price(price: Option<Decimal>) -> String {
    price.map_or_else(|| MISSING.to_string(), format_price)
}

/// `12.34%`
pub fn format_percent(value: Decimal) -> String {
    format!("{}%", fixed(value, 2))
}

/// Percentage with a `+` in front when `gain` is set
pub fn format_signed_percent(value: Option<Decimal>, gain: bool) -> String {
    match value {
        Some(value) if gain => format!("+{}", format_percent(value)),
        Some(value) => format_percent(value),
        None => NOT_APPLICABLE.to_string(),
    }
}

/// Annual yield stored as a fraction: `0.005` -> `0.50%`
pub fn format_apy(apy: Decimal) -> String {
    format_percent(apy * Decimal::ONE_HUNDRED)
}

/// Volume given in millions, shown as whole shares
pub fn format_volume(volume_millions: Option<Decimal>) -> String {
    match volume_millions {
        Some(volume) => {
            let shares = fixed(volume * Decimal::from(1_000_000), 0);
            format_number(shares)
        }
        None => MISSING.to_string(),
    }
}

/// Short interest percentage, or a dash when unknown
pub fn format_short_float(short_float: Option<Decimal>) -> String {
    short_float.map_or_else(|| MISSING.to_string(), format_percent)
}

/// Table date: `Jul 28`
pub fn format_short_date(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

/// Date picker button label
pub fn format_range_label(range: Option<&DateRange>) -> String {
    match range.map(|r| (r.from, r.to)) {
        Some((Some(from), Some(to))) => format!(
            "{} - {}",
            from.format("%b %d, %Y"),
            to.format("%b %d, %Y")
        ),
        Some((Some(from), None)) => from.format("%b %d, %Y").to_string(),
        _ => "All Dates".to_string(),
    }
}

/// Fill time column: `14:02:44`
pub fn format_fill_time(time: &DateTime<Utc>) -> String {
    time.format("%H:%M:%S").to_string()
}
