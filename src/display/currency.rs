//! Currency and timestamp rendering
//!
//! Both formats are built from [`Settings`] so the regional convention is a
//! configuration value rather than a constant baked into the exporters.

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};

use crate::config::{CurrencySettings, DateTimeSettings, Settings};
use crate::models::{CreatedAt, Money};

/// Symbol, digit grouping and decimal separator for rendered amounts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyFormat {
    symbol: String,
    thousands_separator: String,
    decimal_separator: String,
}

impl CurrencyFormat {
    pub fn new(
        symbol: impl Into<String>,
        thousands_separator: impl Into<String>,
        decimal_separator: impl Into<String>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            thousands_separator: thousands_separator.into(),
            decimal_separator: decimal_separator.into(),
        }
    }

    pub fn from_settings(settings: &CurrencySettings) -> Self {
        Self::new(
            settings.symbol.clone(),
            settings.thousands_separator.clone(),
            settings.decimal_separator.clone(),
        )
    }

    /// Format with symbol, grouping and exactly two decimals
    ///
    /// The minus sign precedes the symbol: `-₦234.50`.
    pub fn format(&self, amount: Money) -> String {
        let sign = if amount.is_negative() { "-" } else { "" };
        format!(
            "{}{}{}{}{:02}",
            sign,
            self.symbol,
            self.group_digits(amount.units().unsigned_abs()),
            self.decimal_separator,
            amount.cents_part()
        )
    }

    fn group_digits(&self, units: u64) -> String {
        let digits = units.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

        for (i, digit) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push_str(&self.thousands_separator);
            }
            grouped.push(digit);
        }

        grouped
    }
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self::from_settings(&CurrencySettings::default())
    }
}

/// Renders timestamps in a fixed offset with a strftime pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTimeFormat {
    pattern: String,
    offset: FixedOffset,
}

impl DateTimeFormat {
    /// Offsets outside ±24h fall back to UTC
    pub fn new(pattern: impl Into<String>, utc_offset_minutes: i32) -> Self {
        let offset = FixedOffset::east_opt(utc_offset_minutes * 60).unwrap_or_else(|| Utc.fix());
        Self {
            pattern: pattern.into(),
            offset,
        }
    }

    pub fn from_settings(settings: &DateTimeSettings) -> Self {
        Self::new(settings.format.clone(), settings.utc_offset_minutes)
    }

    /// Current instant in the configured offset
    pub fn now(&self) -> DateTime<FixedOffset> {
        Utc::now().with_timezone(&self.offset)
    }

    /// Human-readable rendering; `None` when the timestamp is absent
    pub fn format(&self, created_at: Option<CreatedAt>) -> Option<String> {
        created_at
            .and_then(|c| c.to_utc())
            .map(|utc| self.format_instant(&utc.with_timezone(&self.offset)))
    }

    pub fn format_instant(&self, instant: &DateTime<FixedOffset>) -> String {
        instant.format(&self.pattern).to_string()
    }

    /// Calendar date of a timestamp in the configured offset
    pub fn date(&self, created_at: Option<CreatedAt>) -> Option<NaiveDate> {
        created_at
            .and_then(|c| c.to_utc())
            .map(|utc| utc.with_timezone(&self.offset).date_naive())
    }
}

impl Default for DateTimeFormat {
    fn default() -> Self {
        Self::from_settings(&DateTimeSettings::default())
    }
}

/// Both formats for a settings snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Formats {
    pub currency: CurrencyFormat,
    pub datetime: DateTimeFormat,
}

impl Formats {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            currency: CurrencyFormat::from_settings(&settings.currency),
            datetime: DateTimeFormat::from_settings(&settings.datetime),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_zero_fractional_and_large() {
        let fmt = CurrencyFormat::default();

        assert_eq!(fmt.format(Money::zero()), "₦0.00");
        assert_eq!(fmt.format(Money::from_cents(5)), "₦0.05");
        assert_eq!(fmt.format(Money::from_cents(99950)), "₦999.50");
        assert_eq!(fmt.format(Money::from_cents(123450)), "₦1,234.50");
        assert_eq!(fmt.format(Money::from_cents(123456789)), "₦1,234,567.89");
    }

    #[test]
    fn test_format_negative() {
        let fmt = CurrencyFormat::default();
        assert_eq!(fmt.format(Money::from_cents(-23450)), "-₦234.50");
        assert_eq!(fmt.format(Money::from_cents(-100000000)), "-₦1,000,000.00");
    }

    #[test]
    fn test_format_custom_convention() {
        let fmt = CurrencyFormat::new("€", ".", ",");
        assert_eq!(fmt.format(Money::from_cents(123450)), "€1.234,50");
    }

    #[test]
    fn test_datetime_format_applies_offset() {
        let fmt = DateTimeFormat::new("%Y-%m-%d %H:%M", 60);
        // 2025-01-15 23:30:00 UTC
        let created = CreatedAt::from_seconds(1736983800);

        assert_eq!(fmt.format(Some(created)).as_deref(), Some("2025-01-16 00:30"));
        assert_eq!(
            fmt.date(Some(created)),
            NaiveDate::from_ymd_opt(2025, 1, 16)
        );
    }

    #[test]
    fn test_datetime_absent() {
        let fmt = DateTimeFormat::default();
        assert_eq!(fmt.format(None), None);
        assert_eq!(fmt.date(None), None);
    }
}
