//! Raw cell values and their ordering

use std::cmp::Ordering;
use std::fmt;

use chrono::NaiveDate;
use hotelier_data::Money;

/// A field value as the grid sees it
#[derive(Clone, Debug, Default, PartialEq)]
pub enum CellValue {
    #[default]
    Empty,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Date(NaiveDate),
    Money(Money),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Case-insensitive substring match on the string form.
    ///
    /// `needle` must already be lowercase.
    pub fn contains_lowercase(&self, needle: &str) -> bool {
        match self {
            CellValue::Empty => needle.is_empty(),
            CellValue::Text(text) => text.to_lowercase().contains(needle),
            other => other.to_string().to_lowercase().contains(needle),
        }
    }

    /// Total order used by column sorting.
    pub fn compare(&self, other: &CellValue) -> Ordering {
        use CellValue::*;
        match (self, other) {
            (Empty, Empty) => Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Int(a), Int(b)) => a.cmp(b),
            (Money(a), Money(b)) => a.cmp(b),
            (Text(a), Text(b)) => a.cmp(b),
            (Date(a), Date(b)) => a.cmp(b),
            (a, b) => match (a.numeric(), b.numeric()) {
                (Some(x), Some(y)) => x.compare(y),
                _ => a.rank().cmp(&b.rank()),
            },
        }
    }

    fn numeric(&self) -> Option<Number> {
        match self {
            CellValue::Int(value) => Some(Number::Ratio(i128::from(*value), 1)),
            CellValue::Float(value) => Some(Number::Float(*value)),
            CellValue::Money(value) => Some(Number::Ratio(i128::from(value.minor()), 100)),
            _ => None,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            CellValue::Empty => 0,
            CellValue::Bool(_) => 1,
            CellValue::Int(_) | CellValue::Float(_) | CellValue::Money(_) => 2,
            CellValue::Date(_) => 3,
            CellValue::Text(_) => 4,
        }
    }
}

/// Numeric cell value compared exactly: integers and cents as a ratio with a
/// positive denominator, floats by their binary expansion. NaN sorts after
/// every number and `-0.0` equals `0.0`.
#[derive(Clone, Copy, Debug)]
enum Number {
    Ratio(i128, i128),
    Float(f64),
}

impl Number {
    fn compare(self, other: Number) -> Ordering {
        match (self, other) {
            (Number::Ratio(p1, q1), Number::Ratio(p2, q2)) => (p1 * q2).cmp(&(p2 * q1)),
            (Number::Float(x), Number::Float(y)) => match (x.is_nan(), y.is_nan()) {
                (true, true) => Ordering::Equal,
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                (false, false) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
            },
            (Number::Float(x), Number::Ratio(p, q)) => float_vs_ratio(x, p, q),
            (Number::Ratio(p, q), Number::Float(x)) => float_vs_ratio(x, p, q).reverse(),
        }
    }
}

/// Orders `x` against `p / q` (`q` is 1 or 100, `|p| < 2^70`) without rounding.
fn float_vs_ratio(x: f64, p: i128, q: i128) -> Ordering {
    if x.is_nan() {
        return Ordering::Greater;
    }
    if x.is_infinite() || x == 0.0 {
        return if x > 0.0 {
            Ordering::Greater
        } else if x < 0.0 {
            Ordering::Less
        } else {
            0.cmp(&p)
        };
    }

    // x = mantissa * 2^exponent exactly
    let bits = x.to_bits();
    let biased = ((bits >> 52) & 0x7ff) as i32;
    let fraction = i128::from(bits & ((1u64 << 52) - 1));
    let (magnitude, exponent) = if biased == 0 {
        (fraction, -1074)
    } else {
        (fraction | (1i128 << 52), biased - 1075)
    };
    let mantissa = if x < 0.0 { -magnitude } else { magnitude };
    let sign = if x > 0.0 { Ordering::Greater } else { Ordering::Less };

    if exponent >= 0 {
        // |x| >= 2^(52 + exponent); past 2^72 no ratio can reach it
        if exponent > 20 {
            return sign;
        }
        (mantissa * (1i128 << exponent) * q).cmp(&p)
    } else {
        let shift = -exponent;
        if shift > 60 {
            // |x| < 2^-8, below the smallest non-zero ratio 1/100
            return if p == 0 { sign } else { 0.cmp(&p) };
        }
        (mantissa * q).cmp(&(p * (1i128 << shift)))
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Bool(value) => write!(f, "{value}"),
            CellValue::Int(value) => write!(f, "{value}"),
            CellValue::Float(value) => write!(f, "{value}"),
            CellValue::Text(value) => f.write_str(value),
            CellValue::Date(value) => write!(f, "{}", value.format("%Y-%m-%d")),
            CellValue::Money(value) => write!(f, "{value}"),
        }
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Int(value)
    }
}

impl From<u32> for CellValue {
    fn from(value: u32) -> Self {
        CellValue::Int(i64::from(value))
    }
}

impl From<u8> for CellValue {
    fn from(value: u8) -> Self {
        CellValue::Int(i64::from(value))
    }
}

impl From<usize> for CellValue {
    fn from(value: usize) -> Self {
        CellValue::Int(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Float(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_owned())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<&String> for CellValue {
    fn from(value: &String) -> Self {
        CellValue::Text(value.clone())
    }
}

impl From<NaiveDate> for CellValue {
    fn from(value: NaiveDate) -> Self {
        CellValue::Date(value)
    }
}

impl From<Money> for CellValue {
    fn from(value: Money) -> Self {
        CellValue::Money(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_forms() {
        assert_eq!(CellValue::Empty.to_string(), "");
        assert_eq!(CellValue::from(5u8).to_string(), "5");
        assert_eq!(CellValue::from(true).to_string(), "true");
        assert_eq!(CellValue::from(Money::from_minor(1_999)).to_string(), "19.99");
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(CellValue::from(date).to_string(), "2024-03-07");
        assert_eq!(CellValue::from(None::<String>), CellValue::Empty);
    }

    #[test]
    fn test_empty_sorts_first() {
        let values = [
            CellValue::from("a"),
            CellValue::from(0i64),
            CellValue::from(false),
            CellValue::from(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()),
        ];
        for value in &values {
            assert_eq!(CellValue::Empty.compare(value), Ordering::Less, "{value:?}");
            assert_eq!(value.compare(&CellValue::Empty), Ordering::Greater, "{value:?}");
        }
    }

    #[test]
    fn test_numbers_compare_across_kinds() {
        assert_eq!(CellValue::Int(2).compare(&CellValue::Float(1.5)), Ordering::Greater);
        assert_eq!(CellValue::Int(2).compare(&CellValue::Int(10)), Ordering::Less);
        assert_eq!(
            CellValue::Money(Money::from_minor(250)).compare(&CellValue::Int(3)),
            Ordering::Less
        );
        assert_eq!(CellValue::Float(f64::NAN).compare(&CellValue::Float(1e300)), Ordering::Greater);
        assert_eq!(CellValue::Float(f64::NAN).compare(&CellValue::Float(f64::NAN)), Ordering::Equal);
        assert_eq!(CellValue::Float(f64::NAN).compare(&CellValue::Int(i64::MAX)), Ordering::Greater);
        assert_eq!(CellValue::Float(-0.0).compare(&CellValue::Int(0)), Ordering::Equal);
        assert_eq!(CellValue::Float(0.005).compare(&CellValue::Money(Money::from_minor(1))), Ordering::Less);
        assert_eq!(CellValue::Float(19.99).compare(&CellValue::Money(Money::from_minor(1_999))), Ordering::Less);
        assert_eq!(CellValue::Float(-1e300).compare(&CellValue::Int(i64::MIN)), Ordering::Less);
    }

    #[test]
    fn test_large_ints_against_floats_stay_transitive() {
        let big = 1i64 << 53;
        let float = CellValue::Float(big as f64);
        let exact = CellValue::Int(big);
        let above = CellValue::Int(big + 1);
        assert_eq!(float.compare(&exact), Ordering::Equal);
        assert_eq!(float.compare(&above), Ordering::Less);
        assert_eq!(above.compare(&float), Ordering::Greater);
        assert_eq!(exact.compare(&above), Ordering::Less);

        let mut values = vec![above.clone(), float.clone(), exact.clone(), CellValue::Int(big - 1)];
        values.sort_by(CellValue::compare);
        assert_eq!(values, vec![CellValue::Int(big - 1), float, exact, above]);
    }

    #[test]
    fn test_text_is_case_insensitive_for_search_only() {
        let value = CellValue::from("Harbour View");
        assert!(value.contains_lowercase("harb"));
        assert!(value.contains_lowercase(""));
        assert!(!value.contains_lowercase("lake"));
        assert_eq!(CellValue::from("B").compare(&CellValue::from("a")), Ordering::Less);
    }
}
