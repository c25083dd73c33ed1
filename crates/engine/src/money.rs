use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
};

use serde::{Deserialize, Serialize};

use crate::{Currency, EngineError, ResultEngine};

/// Signed money amount represented as **integer minor units** (cents).
///
/// Use this type for **all** monetary values (transaction amounts, prices,
/// asset values, goal targets) so sums stay exact.
///
/// # Examples
///
/// ```rust
/// use engine::{Currency, Money};
///
/// let amount = Money::new(123_456);
/// assert_eq!(amount.minor(), 123_456);
/// assert_eq!(amount.format(Currency::Brl), "R$ 1.234,56");
/// assert_eq!(amount.format(Currency::Usd), "$1,234.56");
/// ```
///
/// Parsing from user input (accepts `.` or `,` as decimal separator; rejects
/// more than 2 decimals):
///
/// ```rust
/// use engine::{Currency, Money};
///
/// assert_eq!(Money::parse_major("10", Currency::Brl).unwrap().minor(), 1000);
/// assert_eq!(Money::parse_major("10,5", Currency::Brl).unwrap().minor(), 1050);
/// assert!(Money::parse_major("12.345", Currency::Brl).is_err());
/// ```
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Creates a new amount from integer minor units.
    #[must_use]
    pub const fn new(minor: i64) -> Self {
        Self(minor)
    }

    /// Returns the raw value in minor units.
    #[must_use]
    pub const fn minor(self) -> i64 {
        self.0
    }

    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    #[must_use]
    pub const fn abs(self) -> Self {
        Self(self.0.abs())
    }

    /// Checked addition (returns `None` on overflow).
    #[must_use]
    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }

    /// Minor units as a float, for ratios only.
    #[must_use]
    pub fn as_f64(self) -> f64 {
        self.0 as f64
    }

    /// Applies a percentage (`1.5` means 1.5%), rounding half away from zero
    /// to the nearest minor unit.
    #[must_use]
    pub fn percent(self, rate: f64) -> Money {
        Money((self.0 as f64 * rate / 100.0).round() as i64)
    }

    /// Parses a decimal string expressed in major units.
    ///
    /// Accepts `.` or `,` as decimal separator and an optional leading `+`/`-`.
    /// Rejects empty strings, grouping separators, more fractional digits than
    /// the currency allows, and values that overflow `i64`.
    pub fn parse_major(input: &str, currency: Currency) -> ResultEngine<Money> {
        let invalid = || EngineError::InvalidAmount(format!("invalid amount: {input}"));
        let overflow = || EngineError::InvalidAmount("amount too large".to_string());

        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(EngineError::InvalidAmount("empty amount".to_string()));
        }

        let (negative, rest) = if let Some(stripped) = trimmed.strip_prefix('-') {
            (true, stripped.trim_start())
        } else if let Some(stripped) = trimmed.strip_prefix('+') {
            (false, stripped.trim_start())
        } else {
            (false, trimmed)
        };

        let rest = rest.replace(',', ".");
        let mut parts = rest.split('.');
        let major_str = parts.next().ok_or_else(invalid)?;
        let fraction_str = parts.next();
        if parts.next().is_some() {
            return Err(invalid());
        }

        if major_str.is_empty() || !major_str.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        let major: i64 = major_str.parse().map_err(|_| overflow())?;

        let units = u32::from(currency.minor_units());
        let scale = 10i64.pow(units);
        let fraction: i64 = match fraction_str {
            None | Some("") => 0,
            Some(frac) => {
                if !frac.chars().all(|c| c.is_ascii_digit()) {
                    return Err(invalid());
                }
                if frac.len() > units as usize {
                    return Err(EngineError::InvalidAmount("too many decimals".to_string()));
                }
                let padding = 10i64.pow(units - frac.len() as u32);
                frac.parse::<i64>().map_err(|_| invalid())? * padding
            }
        };

        let total = major
            .checked_mul(scale)
            .and_then(|v| v.checked_add(fraction))
            .ok_or_else(overflow)?;

        Ok(Money(if negative { -total } else { total }))
    }

    /// Major units with a `.` decimal separator and no grouping (`1234.56`).
    #[must_use]
    pub fn to_major_string(self) -> String {
        let (major, fraction) = self.split(2);
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{sign}{major}.{fraction:02}")
    }

    /// Localized currency string, e.g. `R$ 1.234,56`, `$1,234.56`, `-£0.50`.
    #[must_use]
    pub fn format(self, currency: Currency) -> String {
        let locale = currency.locale();
        let units = currency.minor_units();
        let (major, fraction) = self.split(units);

        let digits = major.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (idx, ch) in digits.chars().enumerate() {
            if idx > 0 && (digits.len() - idx) % 3 == 0 {
                grouped.push(locale.grouping);
            }
            grouped.push(ch);
        }

        let sign = if self.0 < 0 { "-" } else { "" };
        format!(
            "{sign}{symbol}{sep}{grouped}{decimal}{fraction:0width$}",
            symbol = locale.symbol,
            sep = locale.symbol_separator,
            decimal = locale.decimal,
            width = usize::from(units),
        )
    }

    fn split(self, units: u8) -> (u64, u64) {
        let scale = 10u64.pow(u32::from(units));
        let abs = self.0.unsigned_abs();
        (abs / scale, abs % scale)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_major_string())
    }
}

impl From<i64> for Money {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<Money> for i64 {
    fn from(value: Money) -> Self {
        value.0
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Self::Output {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Self::Output {
        Money(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Self::Output {
        Money(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_brl_uses_pt_br_separators() {
        assert_eq!(Money::new(0).format(Currency::Brl), "R$ 0,00");
        assert_eq!(Money::new(2590).format(Currency::Brl), "R$ 25,90");
        assert_eq!(Money::new(1_650_000).format(Currency::Brl), "R$ 16.500,00");
        assert_eq!(Money::new(-150_000).format(Currency::Brl), "-R$ 1.500,00");
    }

    #[test]
    fn format_usd_and_gbp_use_en_us_separators() {
        assert_eq!(Money::new(305_000).format(Currency::Usd), "$3,050.00");
        assert_eq!(Money::new(123_456_789).format(Currency::Usd), "$1,234,567.89");
        assert_eq!(Money::new(-50).format(Currency::Gbp), "-£0.50");
        assert_eq!(Money::new(99_999).format(Currency::Gbp), "£999.99");
    }

    #[test]
    fn major_string_has_two_decimals() {
        assert_eq!(Money::new(500_000).to_major_string(), "5000.00");
        assert_eq!(Money::new(5).to_major_string(), "0.05");
        assert_eq!(Money::new(-1050).to_string(), "-10.50");
    }

    #[test]
    fn parse_accepts_dot_or_comma() {
        let parse = |s: &str| Money::parse_major(s, Currency::Brl).unwrap().minor();
        assert_eq!(parse("10"), 1000);
        assert_eq!(parse("10.5"), 1050);
        assert_eq!(parse("10,50"), 1050);
        assert_eq!(parse("-0.01"), -1);
        assert_eq!(parse("+1.00"), 100);
        assert_eq!(parse("  25.90 "), 2590);
        assert_eq!(parse("7."), 700);
    }

    #[test]
    fn parse_rejects_malformed_input() {
        for input in ["", "  ", "-", "12.345", "1.2.3", "abc", "1,000.00", ".5", "1e3"] {
            assert!(
                Money::parse_major(input, Currency::Usd).is_err(),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn parse_rejects_overflow() {
        assert_eq!(
            Money::parse_major("92233720368547758", Currency::Usd),
            Err(EngineError::InvalidAmount("amount too large".to_string()))
        );
    }

    #[test]
    fn percent_rounds_half_away_from_zero() {
        assert_eq!(Money::new(10_000).percent(2.0), Money::new(200));
        assert_eq!(Money::new(4_999).percent(1.0), Money::new(50));
        assert_eq!(Money::new(4_949).percent(1.0), Money::new(49));
        assert_eq!(Money::new(10_000).percent(0.0), Money::ZERO);
    }

    #[test]
    fn sum_over_iterators() {
        let values = [Money::new(2590), Money::new(5800)];
        assert_eq!(values.iter().sum::<Money>(), Money::new(8390));
        assert_eq!(Vec::<Money>::new().into_iter().sum::<Money>(), Money::ZERO);
    }
}
