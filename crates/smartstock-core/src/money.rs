//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A cart of ten $0.10 items summed as floats is not exactly $1.00,      │
//! │  and a change calculation on top of it can come out as -0.000001.      │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    Every amount is normalized to cents once, at the boundary.          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Wire Is Inconsistent
//! The backend sends some amounts as decimal strings (`"150.00"`) and others
//! as JSON numbers (`150` or `149.5`). The [`wire`] serde helpers accept all of
//! these and produce cents; outgoing amounts are written as JSON numbers in
//! major units, which is what the backend expects.
//!
//! ## Usage
//! ```rust
//! use smartstock_core::money::Money;
//!
//! let price = Money::from_cents(1099); // $10.99
//! let doubled = price * 2;             // $21.98
//! assert_eq!(doubled.cents(), 2198);
//!
//! // Operator input and wire strings
//! assert_eq!(Money::parse_decimal("150.5"), Some(Money::from_cents(15050)));
//! assert_eq!(Money::parse_decimal("abc"), None);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: a closure balance can be negative when cash expenses
///   exceed sales
/// - **Single field tuple struct**: Zero-cost abstraction over i64
///
/// ## Where Money is Used
/// ```text
/// Product.price ──► CartLine.unit_price ──► CartLine.subtotal() ──► Cart.total()
///                                                                       │
///        PaymentIntent.tendered ──► change = tendered - total ◄────────┘
///
/// DailyClosurePreview.total_sales - cash_expenses = final_balance
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use smartstock_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units (dollars and cents).
    ///
    /// For negative amounts, only the major unit should be negative:
    /// `from_major_minor(-5, 50)` = -$5.50
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Largest magnitude, in cents, any parsed amount may carry.
    ///
    /// Keeps sums and differences of two amounts inside `i64`.
    pub const LIMIT_CENTS: i64 = 1_000_000_000_000_000;

    /// Converts a floating point amount in major units, rounding to the
    /// nearest cent. `None` when not finite or beyond [`Money::LIMIT_CENTS`].
    ///
    /// Only used at the wire boundary where the backend already sent a float.
    pub fn from_major_f64(amount: f64) -> Option<Self> {
        let cents = (amount * 100.0).round();
        if !cents.is_finite() || cents.abs() > Self::LIMIT_CENTS as f64 {
            return None;
        }
        Some(Money(cents as i64))
    }

    /// Parses a decimal amount in major units (`"150"`, `"150.5"`, `"-3.25"`).
    ///
    /// ## Rules
    /// - Surrounding whitespace is ignored
    /// - Empty input is "not provided" and returns `None`
    /// - More than two decimals round half away from zero
    /// - Anything that is not a finite number returns `None`
    /// - Magnitudes beyond [`Money::LIMIT_CENTS`] return `None`
    ///
    /// ## Example
    /// ```rust
    /// use smartstock_core::money::Money;
    ///
    /// assert_eq!(Money::parse_decimal(" 200 "), Some(Money::from_cents(20000)));
    /// assert_eq!(Money::parse_decimal("0.125"), Some(Money::from_cents(13)));
    /// assert_eq!(Money::parse_decimal(""), None);
    /// ```
    pub fn parse_decimal(input: &str) -> Option<Money> {
        let s = input.trim();
        if s.is_empty() {
            return None;
        }

        let (negative, unsigned) = match s.as_bytes()[0] {
            b'-' => (true, &s[1..]),
            b'+' => (false, &s[1..]),
            _ => (false, s),
        };
        let (whole, frac) = unsigned.split_once('.').unwrap_or((unsigned, ""));
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());

        if (whole.is_empty() && frac.is_empty()) || !all_digits(whole) || !all_digits(frac) {
            // Exponent notation and similar; let the float parser decide
            return s
                .parse::<f64>()
                .ok()
                .and_then(Money::from_major_f64);
        }

        let whole: i64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
        let mut digits = frac.bytes().map(|b| i64::from(b - b'0'));
        let tenths = digits.next().unwrap_or(0);
        let hundredths = digits.next().unwrap_or(0);
        let round_up = digits.next().is_some_and(|d| d >= 5);

        let cents = whole
            .checked_mul(100)?
            .checked_add(tenths * 10 + hundredths + i64::from(round_up))?;
        if cents > Self::LIMIT_CENTS {
            return None;
        }

        Some(Money(if negative { -cents } else { cents }))
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns the amount in major units as a float, for the wire only.
    #[inline]
    pub fn to_major_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.saturating_abs())
    }

    /// Subtraction that returns `None` instead of overflowing.
    #[inline]
    pub const fn checked_sub(&self, other: Money) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use smartstock_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299); // $2.99
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 897);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows money as `$10.99` / `-$5.50`, the format used on screen and tickets.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(-self.0)
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Wire Format
// =============================================================================

/// Serde helpers for backend amounts.
///
/// ## Accepted Shapes
/// ```text
/// ┌──────────────────────┬─────────────────┐
/// │  JSON                │  Money          │
/// ├──────────────────────┼─────────────────┤
/// │  150                 │  15000 cents    │
/// │  149.5               │  14950 cents    │
/// │  "150.00"            │  15000 cents    │
/// │  "" / null           │  0 cents        │
/// │  "abc"               │  error          │
/// └──────────────────────┴─────────────────┘
/// ```
///
/// Use with `#[serde(with = "crate::money::wire")]`.
pub mod wire {
    use super::Money;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};
    use std::collections::BTreeMap;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum WireAmount {
        Int(i64),
        Float(f64),
        Text(String),
    }

    impl WireAmount {
        fn into_money(self) -> Result<Money, String> {
            match self {
                WireAmount::Int(major) => major
                    .checked_mul(100)
                    .filter(|cents| cents.abs() <= Money::LIMIT_CENTS)
                    .map(Money::from_cents)
                    .ok_or_else(|| format!("amount {} out of range", major)),
                WireAmount::Float(major) => Money::from_major_f64(major)
                    .ok_or_else(|| format!("amount {} out of range", major)),
                WireAmount::Text(text) if text.trim().is_empty() => Ok(Money::zero()),
                WireAmount::Text(text) => Money::parse_decimal(&text)
                    .ok_or_else(|| format!("'{}' is not a decimal amount", text)),
            }
        }
    }

    pub fn serialize<S: Serializer>(amount: &Money, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(amount.to_major_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
        match Option::<WireAmount>::deserialize(deserializer)? {
            Some(raw) => raw.into_money().map_err(D::Error::custom),
            None => Ok(Money::zero()),
        }
    }

    /// Same rules for optional fields of partial updates; `null` stays `None`.
    pub mod option {
        use super::*;

        pub fn serialize<S: Serializer>(
            amount: &Option<Money>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match amount {
                Some(amount) => serializer.serialize_some(&amount.to_major_f64()),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<Money>, D::Error> {
            Option::<WireAmount>::deserialize(deserializer)?
                .map(|raw| raw.into_money().map_err(D::Error::custom))
                .transpose()
        }
    }

    /// Same rules for `label → amount` breakdown maps.
    pub mod breakdown {
        use super::*;
        use serde::ser::SerializeMap;

        pub fn serialize<S: Serializer>(
            map: &BTreeMap<String, Money>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            let mut out = serializer.serialize_map(Some(map.len()))?;
            for (label, amount) in map {
                out.serialize_entry(label, &amount.to_major_f64())?;
            }
            out.end()
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<BTreeMap<String, Money>, D::Error> {
            let raw = Option::<BTreeMap<String, Option<WireAmount>>>::deserialize(deserializer)?;
            raw.unwrap_or_default()
                .into_iter()
                .map(|(label, amount)| {
                    let amount = match amount {
                        Some(raw) => raw.into_money().map_err(D::Error::custom)?,
                        None => Money::zero(),
                    };
                    Ok((label, amount))
                })
                .collect()
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use std::collections::BTreeMap;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_from_major_minor() {
        assert_eq!(Money::from_major_minor(10, 99).cents(), 1099);
        assert_eq!(Money::from_major_minor(-5, 50).cents(), -550);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3).cents(), 3000);
        assert_eq!((-b).cents(), -500);
    }

    #[test]
    fn test_sum_of_ten_dimes_is_exact() {
        let dimes = vec![Money::from_cents(10); 10];
        let total: Money = dimes.iter().sum();
        assert_eq!(total, Money::from_cents(100));
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(Money::parse_decimal("100"), Some(Money::from_cents(10000)));
        assert_eq!(Money::parse_decimal("150.00"), Some(Money::from_cents(15000)));
        assert_eq!(Money::parse_decimal("0.5"), Some(Money::from_cents(50)));
        assert_eq!(Money::parse_decimal(".75"), Some(Money::from_cents(75)));
        assert_eq!(Money::parse_decimal("-3.25"), Some(Money::from_cents(-325)));
        assert_eq!(Money::parse_decimal("2.345"), Some(Money::from_cents(235)));
        assert_eq!(Money::parse_decimal("2.344"), Some(Money::from_cents(234)));
        assert_eq!(Money::parse_decimal("1e2"), Some(Money::from_cents(10000)));
    }

    #[test]
    fn test_parse_decimal_rejects_non_numbers() {
        assert_eq!(Money::parse_decimal(""), None);
        assert_eq!(Money::parse_decimal("   "), None);
        assert_eq!(Money::parse_decimal("abc"), None);
        assert_eq!(Money::parse_decimal("12abc"), None);
        assert_eq!(Money::parse_decimal("."), None);
        assert_eq!(Money::parse_decimal("NaN"), None);
        assert_eq!(Money::parse_decimal("inf"), None);
    }

    #[test]
    fn test_parse_decimal_rejects_out_of_range() {
        assert_eq!(Money::parse_decimal("-1e30"), None);
        assert_eq!(Money::parse_decimal("-92233720368547758.07"), None);
        assert_eq!(Money::parse_decimal("10000000000000.01"), None);
        assert_eq!(
            Money::parse_decimal("-10000000000000"),
            Some(Money::from_cents(-Money::LIMIT_CENTS))
        );
        assert_eq!(Money::from_major_f64(f64::MAX), None);
        assert_eq!(Money::from_major_f64(10.25), Some(Money::from_cents(1025)));
    }

    #[test]
    fn test_abs_and_checked_sub_never_overflow() {
        assert_eq!(Money::from_cents(i64::MIN).abs(), Money::from_cents(i64::MAX));
        assert_eq!(Money::from_cents(i64::MIN).checked_sub(Money::from_cents(1)), None);
        assert_eq!(
            Money::from_cents(500).checked_sub(Money::from_cents(800)),
            Some(Money::from_cents(-300))
        );
    }

    #[derive(Debug, Serialize, Deserialize)]
    struct Amounts {
        #[serde(with = "wire")]
        total: Money,
        #[serde(with = "wire::breakdown")]
        by_method: BTreeMap<String, Money>,
    }

    #[test]
    fn test_wire_accepts_strings_and_numbers() {
        let parsed: Amounts = serde_json::from_str(
            r#"{"total": "150.00", "by_method": {"efectivo": 100, "tarjeta": "49.5", "qr": 0.5}}"#,
        )
        .unwrap();

        assert_eq!(parsed.total, Money::from_cents(15000));
        assert_eq!(parsed.by_method["efectivo"], Money::from_cents(10000));
        assert_eq!(parsed.by_method["tarjeta"], Money::from_cents(4950));
        assert_eq!(parsed.by_method["qr"], Money::from_cents(50));
    }

    #[test]
    fn test_wire_null_is_zero_and_garbage_is_error() {
        let parsed: Amounts =
            serde_json::from_str(r#"{"total": null, "by_method": null}"#).unwrap();
        assert!(parsed.total.is_zero());
        assert!(parsed.by_method.is_empty());

        let bad = serde_json::from_str::<Amounts>(r#"{"total": "ten", "by_method": {}}"#);
        assert!(bad.is_err());

        let huge = serde_json::from_str::<Amounts>(r#"{"total": -1e30, "by_method": {}}"#);
        assert!(huge.is_err());
    }

    #[test]
    fn test_wire_serializes_major_units() {
        let amounts = Amounts {
            total: Money::from_cents(2500),
            by_method: BTreeMap::from([("tarjeta".to_string(), Money::from_cents(1050))]),
        };
        let json = serde_json::to_value(&amounts).unwrap();
        assert_eq!(json["total"], serde_json::json!(25.0));
        assert_eq!(json["by_method"]["tarjeta"], serde_json::json!(10.5));
    }
}
