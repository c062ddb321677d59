use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};

use serde::{Deserialize, Serialize};

/// Monetary amount in minor units (cents).
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_minor(minor: i64) -> Self {
        Self(minor)
    }

    pub const fn from_major(major: i64) -> Self {
        Self(major * 100)
    }

    pub const fn minor(self) -> i64 {
        self.0
    }

    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    pub fn times(self, quantity: u32) -> Self {
        Self(self.0 * i64::from(quantity))
    }

    /// Applies a rate given in basis points, rounding half away from zero.
    pub fn apply_rate_bps(self, bps: u32) -> Self {
        let raw = i128::from(self.0) * i128::from(bps);
        let rounded = if raw >= 0 {
            (raw + 5_000) / 10_000
        } else {
            (raw - 5_000) / 10_000
        };
        Self(rounded as i64)
    }

    pub fn min(self, other: Money) -> Self {
        Self(self.0.min(other.0))
    }

    /// Parses user input such as `120`, `99.5` or `-3.25`.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        let (negative, digits) = match input.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, input),
        };
        let (major, fraction) = match digits.split_once('.') {
            Some((major, fraction)) => (major, fraction),
            None => (digits, ""),
        };
        if major.is_empty()
            || !major.bytes().all(|b| b.is_ascii_digit())
            || fraction.len() > 2
            || !fraction.bytes().all(|b| b.is_ascii_digit())
        {
            return None;
        }
        let major: i64 = major.parse().ok()?;
        let minor: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().ok()? * 10,
            _ => fraction.parse().ok()?,
        };
        let value = major.checked_mul(100)?.checked_add(minor)?;
        Some(Self(if negative { -value } else { value }))
    }

    pub fn with_symbol(self, symbol: &str) -> String {
        if self.0 < 0 {
            format!("-{symbol}{}", Money(-self.0))
        } else {
            format!("{symbol}{self}")
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
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

    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Money::from_minor(123_456).to_string(), "1234.56");
        assert_eq!(Money::from_minor(5).to_string(), "0.05");
        assert_eq!(Money::from_minor(-250).to_string(), "-2.50");
        assert_eq!(Money::from_major(88).with_symbol("¥"), "¥88.00");
        assert_eq!(Money::from_minor(-250).with_symbol("$"), "-$2.50");
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("120"), Some(Money::from_major(120)));
        assert_eq!(Money::parse(" 99.5 "), Some(Money::from_minor(9_950)));
        assert_eq!(Money::parse("0.07"), Some(Money::from_minor(7)));
        assert_eq!(Money::parse("-3.25"), Some(Money::from_minor(-325)));
        assert_eq!(Money::parse(""), None);
        assert_eq!(Money::parse("1.234"), None);
        assert_eq!(Money::parse("abc"), None);
        assert_eq!(Money::parse(".5"), None);
        assert_eq!(Money::parse("1,000"), None);
    }

    #[test]
    fn test_rate_rounds_half_up() {
        // 6% of 10.25 = 0.615 -> 0.62
        assert_eq!(Money::from_minor(1_025).apply_rate_bps(600), Money::from_minor(62));
        // 6% of 10.24 = 0.6144 -> 0.61
        assert_eq!(Money::from_minor(1_024).apply_rate_bps(600), Money::from_minor(61));
        assert_eq!(Money::from_minor(-1_025).apply_rate_bps(600), Money::from_minor(-62));
        assert_eq!(Money::from_major(50).apply_rate_bps(0), Money::ZERO);
    }

    #[test]
    fn test_arithmetic() {
        let total: Money = [Money::from_major(1), Money::from_minor(50), Money::from_minor(25)]
            .into_iter()
            .sum();
        assert_eq!(total, Money::from_minor(175));
        assert_eq!(Money::from_minor(1_999).times(3), Money::from_minor(5_997));
        assert_eq!(Money::from_major(5) - Money::from_major(7), Money::from_major(-2));
    }
}
