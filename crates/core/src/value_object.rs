//! Value objects: equality by value, not identity.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**: two `Money`
/// amounts of `100` are the same thing, while two products with the same title
/// are still different products.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}

/// Largest integer an IEEE-754 double represents exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// A finite, non-negative amount in the catalog's single implied currency.
///
/// Construction never fails: anything that is not a finite non-negative number
/// collapses to zero.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Money(f64);

impl ValueObject for Money {}

impl Money {
    pub const ZERO: Money = Money(0.0);

    pub fn new(amount: f64) -> Self {
        if amount.is_finite() && amount > 0.0 {
            Self(amount)
        } else {
            Self::ZERO
        }
    }

    /// Coerce an arbitrary JSON value into an amount.
    ///
    /// Numbers pass through, numeric strings are parsed, everything else
    /// (`null`, booleans, arrays, objects, garbage text) is zero.
    pub fn coerce(value: &Value) -> Self {
        match value {
            Value::Number(n) => Self::new(n.as_f64().unwrap_or(0.0)),
            Value::String(s) => Self::new(s.trim().parse::<f64>().unwrap_or(0.0)),
            _ => Self::ZERO,
        }
    }

    pub fn amount(self) -> f64 {
        self.0
    }

    /// Round half away from zero to the nearest whole currency unit.
    pub fn round_whole(self) -> Self {
        Self::new(self.0.round())
    }

    /// Apply a percentage discount.
    pub fn discounted(self, discount: Percent) -> Self {
        Self::new(self.0 * (100.0 - discount.value()) / 100.0)
    }

    fn is_whole(self) -> bool {
        self.0.fract() == 0.0 && self.0 <= MAX_SAFE_INTEGER
    }
}

impl core::ops::Add for Money {
    type Output = Money;

    /// Saturates at the largest representable amount instead of overflowing.
    fn add(self, rhs: Money) -> Money {
        let sum = self.0 + rhs.0;
        if sum.is_infinite() {
            Money(f64::MAX)
        } else {
            Money::new(sum)
        }
    }
}

impl core::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, |acc, m| acc + m)
    }
}

impl From<u64> for Money {
    fn from(value: u64) -> Self {
        Money::new(value as f64)
    }
}

/// Dollar display with thousands separators and up to three fraction
/// digits, trailing zeros dropped: `$5,344`, `$1,234.5`, `$0.125`.
impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let text = format!("{:.3}", self.0);
        let (digits, frac) = text.split_once('.').unwrap_or((text.as_str(), ""));
        let frac = frac.trim_end_matches('0');

        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        if frac.is_empty() {
            write!(f, "${grouped}")
        } else {
            write!(f, "${grouped}.{frac}")
        }
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // Whole amounts go out as JSON integers so tokens stay short.
        if self.is_whole() {
            serializer.serialize_u64(self.0 as u64)
        } else {
            serializer.serialize_f64(self.0)
        }
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Money::coerce(&value))
    }
}

/// A percentage clamped to `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize)]
#[serde(transparent)]
pub struct Percent(f64);

impl ValueObject for Percent {}

impl Percent {
    pub fn new(value: f64) -> Self {
        if value.is_finite() {
            Self(value.clamp(0.0, 100.0))
        } else {
            Self(0.0)
        }
    }

    /// Coerce a JSON value; non-numeric input has no percentage at all.
    pub fn coerce(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_f64().map(Self::new),
            Value::String(s) => s.trim().parse::<f64>().ok().map(Self::new),
            _ => None,
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl<'de> Deserialize<'de> for Percent {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Percent::coerce(&value).unwrap_or_default())
    }
}
