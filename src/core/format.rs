//! Display formatting for report values.
//!
//! Every function here is total: missing or malformed input renders as a safe default instead
//! of an error, so templates never have to handle formatting failures.

use chrono::{DateTime, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub const CURRENCY_PREFIX: &str = "LKR ";

/// Render an amount as `LKR 1,234.56`. A missing amount renders as zero.
pub fn format_currency(amount: Option<Decimal>) -> String {
    let amount = amount
        .unwrap_or_default()
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if amount.is_sign_negative() && !amount.is_zero() {
        "-"
    } else {
        ""
    };
    let formatted = format!("{:.2}", amount.abs());
    let (whole, fraction) = formatted
        .split_once('.')
        .unwrap_or((formatted.as_str(), "00"));
    format!("{CURRENCY_PREFIX}{sign}{}.{fraction}", group_thousands(whole))
}

/// Render a count with thousands separators, rounding any fractional part away.
pub fn format_count(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let digits = rounded.abs().trunc().to_string();
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}{}", group_thousands(&digits))
}

/// Render a percentage with at most one decimal place, e.g. `87.5%` or `100%`.
pub fn format_percentage(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    format!("{}%", rounded.normalize())
}

/// `round(value / total * 100)`, or zero when `total` is zero.
pub fn percentage_of(value: Decimal, total: Decimal) -> Decimal {
    if total.is_zero() {
        return Decimal::ZERO;
    }
    (value / total * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Render a date as `January 5, 2024`.
///
/// Accepts `YYYY-MM-DD` and RFC 3339 timestamps. Empty input gives `N/A`; anything that does not
/// parse is returned unchanged.
pub fn format_date(input: Option<&str>) -> String {
    let Some(raw) = input.filter(|s| !s.trim().is_empty()) else {
        return "N/A".to_string();
    };
    match parse_date(raw.trim()) {
        Some(date) => format_long_date(date),
        None => raw.to_string(),
    }
}

pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
}

/// Coerce a JSON value into an amount.
///
/// Numbers are taken as-is. Strings may carry the currency prefix and thousands separators.
/// Everything else, including non-numeric strings, is `None`.
pub fn parse_amount(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => n
            .to_string()
            .parse::<Decimal>()
            .ok()
            .or_else(|| n.as_f64().and_then(|f| Decimal::try_from(f).ok())),
        Value::String(s) => {
            let cleaned: String = s
                .trim()
                .trim_start_matches(CURRENCY_PREFIX.trim())
                .chars()
                .filter(|c| *c != ',' && !c.is_whitespace())
                .collect();
            if cleaned.is_empty() {
                None
            } else {
                cleaned.parse::<Decimal>().ok()
            }
        }
        _ => None,
    }
}

/// Serde adapter for [`parse_amount`].
pub fn lenient_amount<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(parse_amount(&value))
}

/// Serde adapter for non-negative counts; anything unusable reads as zero.
pub fn lenient_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(parse_amount(&value)
        .and_then(|d| d.round().to_u64())
        .unwrap_or_default())
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
