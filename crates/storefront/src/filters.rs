//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

use rust_decimal::Decimal;

use geek_store_core::format_money;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Formats an amount as `$1234.50`.
///
/// Usage in templates: `{{ cart.total()|money }}`
#[askama::filter_fn]
pub fn money(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(format_amount(&value.to_string()))
}

fn format_amount(raw: &str) -> String {
    raw.parse::<Decimal>()
        .map_or_else(|_| format!("${raw}"), format_money)
}
