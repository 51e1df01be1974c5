use std::fmt;
use std::str::FromStr;

use crate::error::SizeError;

/// Decimal unit suffix of a size specification
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SizeUnit {
    None,
    /// `k`, 1e3
    Kilo,
    /// `M`, 1e6
    Mega,
    /// `G`, 1e9
    Giga,
}

impl SizeUnit {
    pub fn multiplier(self) -> u64 {
        match self {
            SizeUnit::None => 1,
            SizeUnit::Kilo => 1_000,
            SizeUnit::Mega => 1_000_000,
            SizeUnit::Giga => 1_000_000_000,
        }
    }

    fn suffix(self) -> &'static str {
        match self {
            SizeUnit::None => "",
            SizeUnit::Kilo => "k",
            SizeUnit::Mega => "M",
            SizeUnit::Giga => "G",
        }
    }
}

/// A parsed size such as `500k`: a value tagged with its unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SizeSpec {
    pub value: u64,
    pub unit: SizeUnit,
}

impl SizeSpec {
    pub fn new(value: u64, unit: SizeUnit) -> Self {
        Self { value, unit }
    }

    /// Size in bytes. Overflow is rejected at parse time.
    pub fn bytes(&self) -> u64 {
        self.value.saturating_mul(self.unit.multiplier())
    }
}

impl FromStr for SizeSpec {
    type Err = SizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(SizeError::Empty);
        }

        let digits_end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
        let (digits, suffix) = s.split_at(digits_end);
        if digits.is_empty() {
            return Err(SizeError::MissingValue(s.to_string()));
        }

        let unit = match suffix {
            "" => SizeUnit::None,
            "k" => SizeUnit::Kilo,
            "M" => SizeUnit::Mega,
            "G" => SizeUnit::Giga,
            _ => {
                return Err(SizeError::InvalidSuffix {
                    input: s.to_string(),
                    suffix: suffix.to_string(),
                })
            }
        };

        let value: u64 = digits
            .parse()
            .map_err(|_| SizeError::Overflow(s.to_string()))?;
        if value.checked_mul(unit.multiplier()).is_none() {
            return Err(SizeError::Overflow(s.to_string()));
        }

        Ok(Self { value, unit })
    }
}

impl fmt::Display for SizeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit.suffix())
    }
}

/// How many serialized bytes a chunk may hold
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SizeBudget {
    #[default]
    Unbounded,
    Bytes(u64),
}

impl SizeBudget {
    /// True once `size` bytes use up the budget
    pub fn is_exhausted(&self, size: u64) -> bool {
        match self {
            SizeBudget::Unbounded => false,
            SizeBudget::Bytes(limit) => size >= *limit,
        }
    }

    pub fn is_bounded(&self) -> bool {
        matches!(self, SizeBudget::Bytes(_))
    }
}

impl From<Option<SizeSpec>> for SizeBudget {
    fn from(spec: Option<SizeSpec>) -> Self {
        spec.map_or(SizeBudget::Unbounded, |s| SizeBudget::Bytes(s.bytes()))
    }
}
