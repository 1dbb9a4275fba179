use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::Error;

pub const CURRENCY: &str = "BDT";

/// Grouped numbers never show more than this many fraction digits.
const MAX_FRACTION_DIGITS: u32 = 3;

/// Display conventions for numbers and dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "en-US")]
    EnUs,
    /// Lakh/crore digit grouping, day-first dates.
    #[serde(rename = "en-IN")]
    EnIn,
}

impl FromStr for Locale {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "en-us" => Ok(Locale::EnUs),
            "en-in" => Ok(Locale::EnIn),
            _ => Err(Error::Settings(format!("unsupported locale '{s}'"))),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::EnUs => f.write_str("en-US"),
            Locale::EnIn => f.write_str("en-IN"),
        }
    }
}

/// Format a number with thousands separators and no fixed decimal places:
/// 1234.5 -> "1,234.5", 1500 -> "1,500".
pub fn number(val: Decimal, locale: Locale) -> String {
    let rounded = val
        .round_dp_with_strategy(MAX_FRACTION_DIGITS, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = rounded.abs().to_string();
    let (int_part, dec_part) = match text.split_once('.') {
        Some((i, d)) => (i, Some(d)),
        None => (text.as_str(), None),
    };

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&group_digits(int_part, locale));
    if let Some(d) = dec_part {
        out.push('.');
        out.push_str(d);
    }
    out
}

fn group_digits(digits: &str, locale: Locale) -> String {
    let mut reversed = String::new();
    for (i, c) in digits.chars().rev().enumerate() {
        let boundary = match locale {
            Locale::EnUs => i > 0 && i % 3 == 0,
            Locale::EnIn => i == 3 || (i > 3 && (i - 3) % 2 == 0),
        };
        if boundary {
            reversed.push(',');
        }
        reversed.push(c);
    }
    reversed.chars().rev().collect()
}

/// Format an amount in taka: "1,500 BDT".
pub fn money(val: Decimal, locale: Locale) -> String {
    format!("{} {CURRENCY}", number(val, locale))
}

/// Short locale date used in tables.
pub fn date(d: NaiveDate, locale: Locale) -> String {
    match locale {
        Locale::EnUs => format!("{}/{}/{}", d.month(), d.day(), d.year()),
        Locale::EnIn => format!("{}/{}/{}", d.day(), d.month(), d.year()),
    }
}

/// ISO date as used by date inputs.
pub fn iso_date(d: NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_number_grouping() {
        assert_eq!(number(dec("1500"), Locale::EnUs), "1,500");
        assert_eq!(number(dec("1234.5"), Locale::EnUs), "1,234.5");
        assert_eq!(number(dec("1000000.99"), Locale::EnUs), "1,000,000.99");
        assert_eq!(number(dec("999"), Locale::EnUs), "999");
        assert_eq!(number(dec("0"), Locale::EnUs), "0");
        assert_eq!(number(dec("-2500.10"), Locale::EnUs), "-2,500.1");
    }

    #[test]
    fn test_number_rounds_to_three_places() {
        assert_eq!(number(dec("1234.5678"), Locale::EnUs), "1,234.568");
        assert_eq!(number(dec("0.0005"), Locale::EnUs), "0.001");
        assert_eq!(number(dec("12.0004"), Locale::EnUs), "12");
    }

    #[test]
    fn test_indian_grouping() {
        assert_eq!(number(dec("1234567"), Locale::EnIn), "12,34,567");
        assert_eq!(number(dec("123456789.5"), Locale::EnIn), "12,34,56,789.5");
        assert_eq!(number(dec("1500"), Locale::EnIn), "1,500");
        assert_eq!(number(dec("150"), Locale::EnIn), "150");
    }

    #[test]
    fn test_money_suffix() {
        assert_eq!(money(dec("1500"), Locale::EnUs), "1,500 BDT");
        assert_eq!(money(dec("42.25"), Locale::EnUs), "42.25 BDT");
    }

    #[test]
    fn test_dates() {
        let d = NaiveDate::from_ymd_opt(2025, 1, 3).unwrap();
        assert_eq!(date(d, Locale::EnUs), "1/3/2025");
        assert_eq!(date(d, Locale::EnIn), "3/1/2025");
        assert_eq!(iso_date(d), "2025-01-03");
    }

    #[test]
    fn test_locale_parse() {
        assert_eq!("en-US".parse::<Locale>().unwrap(), Locale::EnUs);
        assert_eq!("en_in".parse::<Locale>().unwrap(), Locale::EnIn);
        assert!("fr-FR".parse::<Locale>().is_err());
    }
}
