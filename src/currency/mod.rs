//! Locale-aware presentation of amounts, dates, and relative times.
//!
//! Pure formatting only; no invariant beyond round-trip readability, and
//! nothing here participates in balance arithmetic.

use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Locale formatting preferences. Defaults to Brazilian Portuguese, the
/// product's home locale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocaleConfig {
    pub language_tag: String,
    pub currency_symbol: String,
    pub decimal_separator: char,
    pub grouping_separator: char,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            language_tag: "pt-BR".into(),
            currency_symbol: "R$".into(),
            decimal_separator: ',',
            grouping_separator: '.',
        }
    }
}

static DEFAULT_LOCALE: Lazy<LocaleConfig> = Lazy::new(LocaleConfig::default);

pub fn default_locale() -> &'static LocaleConfig {
    &DEFAULT_LOCALE
}

/// Formats an amount in the locale's currency style, e.g. `R$ 1.234,56`.
/// Negative values carry a leading sign: `-R$ 30,00`.
pub fn format_amount(value: f64, locale: &LocaleConfig) -> String {
    let negative = value < 0.0;
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let fraction = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(locale.grouping_separator);
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    format!(
        "{sign}{} {grouped}{}{fraction:02}",
        locale.currency_symbol, locale.decimal_separator
    )
}

/// `dd/mm/yyyy`.
pub fn format_date(date: NaiveDate) -> String {
    format!("{:02}/{:02}/{:04}", date.day(), date.month(), date.year())
}

/// `dd/mm/yyyy HH:MM`.
pub fn format_date_time(instant: DateTime<Utc>) -> String {
    format!(
        "{} {:02}:{:02}",
        format_date(instant.date_naive()),
        instant.hour(),
        instant.minute()
    )
}

/// Compact relative time in the pt-BR style of the feed: `agora`,
/// `há 5min`, `há 3h`, `há 2d`, falling back to the absolute date after a
/// week. Instants in the future render as `agora`.
pub fn format_relative(instant: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(instant);
    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();

    if minutes < 1 {
        "agora".into()
    } else if minutes < 60 {
        format!("há {minutes}min")
    } else if hours < 24 {
        format!("há {hours}h")
    } else if days < 7 {
        format!("há {days}d")
    } else {
        format_date(instant.date_naive())
    }
}
