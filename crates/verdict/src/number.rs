//! Exact decimal numbers.
use core::{cmp::Ordering, fmt};

use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{ToPrimitive, Zero};

/// An exact decimal number: `significand * 10^exponent`.
///
/// Trailing zeros are stripped from the significand, so two decimals are structurally equal
/// exactly when they are numerically equal (`1`, `1.0` and `10e-1` are the same value).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct Decimal {
    significand: BigInt,
    exponent: i64,
    /// Count of decimal digits in the significand.
    digits: i64,
}

impl Decimal {
    fn zero() -> Decimal {
        Decimal {
            significand: BigInt::zero(),
            exponent: 0,
            digits: 1,
        }
    }

    /// Parse the textual form of a JSON number.
    ///
    /// Returns `None` for malformed input or exponents that do not fit an `i64`.
    pub(crate) fn parse(text: &str) -> Option<Decimal> {
        let (mantissa, exponent) = match text.find(|c| c == 'e' || c == 'E') {
            Some(idx) => (&text[..idx], text[idx + 1..].parse::<i64>().ok()?),
            None => (text, 0),
        };
        let (negative, mantissa) = match mantissa.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, mantissa),
        };
        let (integral, fractional) = mantissa.split_once('.').unwrap_or((mantissa, ""));
        if integral.is_empty()
            || !integral
                .bytes()
                .chain(fractional.bytes())
                .all(|byte| byte.is_ascii_digit())
        {
            return None;
        }
        let mut all_digits = String::with_capacity(integral.len() + fractional.len());
        all_digits.push_str(integral);
        all_digits.push_str(fractional);
        let significant = all_digits.trim_start_matches('0');
        let trimmed = significant.trim_end_matches('0');
        if trimmed.is_empty() {
            return Some(Decimal::zero());
        }
        let trailing_zeros = significant.len() - trimmed.len();
        let exponent = exponent
            .checked_sub(i64::try_from(fractional.len()).ok()?)?
            .checked_add(i64::try_from(trailing_zeros).ok()?)?;
        let magnitude = BigUint::parse_bytes(trimmed.as_bytes(), 10)?;
        let sign = if negative { Sign::Minus } else { Sign::Plus };
        Some(Decimal {
            significand: BigInt::from_biguint(sign, magnitude),
            exponent,
            digits: i64::try_from(trimmed.len()).ok()?,
        })
    }

    pub(crate) fn from_number(number: &serde_json::Number) -> Option<Decimal> {
        Decimal::parse(&number.to_string())
    }

    pub(crate) fn is_integer(&self) -> bool {
        self.exponent >= 0
    }

    pub(crate) fn is_positive(&self) -> bool {
        self.significand.sign() == Sign::Plus
    }

    /// Whether `self / divisor` is an integer.
    ///
    /// Works on the significands modulo the divisor, so huge exponents never materialize.
    pub(crate) fn is_multiple_of(&self, divisor: &Decimal) -> bool {
        if self.significand.is_zero() {
            return true;
        }
        if divisor.significand.is_zero() {
            return false;
        }
        let shift = i128::from(self.exponent) - i128::from(divisor.exponent);
        // The significand has no factor of ten left, so a negative shift never divides evenly.
        let Ok(shift) = u128::try_from(shift) else {
            return false;
        };
        let modulus = divisor.significand.magnitude();
        let scale = BigUint::from(10u8).modpow(&BigUint::from(shift), modulus);
        (self.significand.magnitude() % modulus * scale % modulus).is_zero()
    }

    /// Interpret a keyword argument such as `minLength` as a count.
    ///
    /// Non-integral or negative values yield `None`; values beyond `u64` saturate.
    pub(crate) fn as_count(&self) -> Option<u64> {
        if self.significand.is_zero() {
            return Some(0);
        }
        if !self.is_integer() || !self.is_positive() {
            return None;
        }
        if self.exponent.saturating_add(self.digits) > 20 {
            return Some(u64::MAX);
        }
        let exponent = usize::try_from(self.exponent).ok()?;
        let value = self.significand.magnitude() * num_traits::pow(BigUint::from(10u8), exponent);
        Some(value.to_u64().unwrap_or(u64::MAX))
    }

    fn cmp_magnitude(&self, other: &Decimal) -> Ordering {
        let left = i128::from(self.exponent) + i128::from(self.digits);
        let right = i128::from(other.exponent) + i128::from(other.digits);
        if left != right {
            return left.cmp(&right);
        }
        // Same order of magnitude: the exponents differ by at most the digit counts.
        let shift = usize::try_from(self.digits.abs_diff(other.digits)).unwrap_or_default();
        let scale = num_traits::pow(BigUint::from(10u8), shift);
        if self.exponent > other.exponent {
            (self.significand.magnitude() * scale).cmp(other.significand.magnitude())
        } else {
            self.significand
                .magnitude()
                .cmp(&(other.significand.magnitude() * scale))
        }
    }
}

fn sign_rank(sign: Sign) -> i8 {
    match sign {
        Sign::Minus => -1,
        Sign::NoSign => 0,
        Sign::Plus => 1,
    }
}

impl Ord for Decimal {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.significand.sign(), other.significand.sign()) {
            (left, right) if left != right => sign_rank(left).cmp(&sign_rank(right)),
            (Sign::NoSign, _) => Ordering::Equal,
            (Sign::Minus, _) => self.cmp_magnitude(other).reverse(),
            (Sign::Plus, _) => self.cmp_magnitude(other),
        }
    }
}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.exponent == 0 {
            write!(f, "{}", self.significand)
        } else {
            write!(f, "{}e{}", self.significand, self.exponent)
        }
    }
}
