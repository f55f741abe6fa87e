//! Edge weight arithmetic.
//!
//! Feedback totals are compared exactly against a recomputation from the input, so weights are
//! restricted to integer types.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Sub};

pub trait Weight:
    Copy + Ord + Add<Output = Self> + Sub<Output = Self> + fmt::Debug + fmt::Display + Send + Sync + 'static
{
    const ZERO: Self;

    fn checked_add(self, rhs: Self) -> Option<Self>;

    fn is_negative(self) -> bool;

    /// Lossy conversion, only used for percentages in diagnostics.
    fn as_f64(self) -> f64;
}

macro_rules! impl_weight_unsigned {
    ($($t:ty),*) => {
        $(
            impl Weight for $t {
                const ZERO: Self = 0;

                fn checked_add(self, rhs: Self) -> Option<Self> {
                    <$t>::checked_add(self, rhs)
                }

                fn is_negative(self) -> bool {
                    false
                }

                fn as_f64(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

macro_rules! impl_weight_signed {
    ($($t:ty),*) => {
        $(
            impl Weight for $t {
                const ZERO: Self = 0;

                fn checked_add(self, rhs: Self) -> Option<Self> {
                    <$t>::checked_add(self, rhs)
                }

                fn is_negative(self) -> bool {
                    self < 0
                }

                fn as_f64(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

impl_weight_unsigned!(u8, u16, u32, u64, u128, usize);
impl_weight_signed!(i8, i16, i32, i64, i128, isize);

/// Sum of a set of edge weights. Callers keep all weights non-negative and bounded by the input total,
/// so this never overflows.
pub fn sum<W: Weight>(weights: impl IntoIterator<Item = W>) -> W {
    weights.into_iter().fold(W::ZERO, |acc, w| acc + w)
}

/// Signed `outgoing - incoming` without requiring a signed weight type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Delta<W> {
    Negative(W),
    NonNegative(W),
}

impl<W: Weight> Delta<W> {
    pub fn between(outgoing: W, incoming: W) -> Self {
        if outgoing >= incoming {
            Self::NonNegative(outgoing - incoming)
        } else {
            Self::Negative(incoming - outgoing)
        }
    }
}

impl<W: Weight> Ord for Delta<W> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::NonNegative(a), Self::NonNegative(b)) => a.cmp(b),
            (Self::Negative(a), Self::Negative(b)) => b.cmp(a),
            (Self::Negative(_), Self::NonNegative(_)) => Ordering::Less,
            (Self::NonNegative(_), Self::Negative(_)) => Ordering::Greater,
        }
    }
}

impl<W: Weight> PartialOrd for Delta<W> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<W: Weight> fmt::Display for Delta<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Negative(w) => write!(f, "-{w}"),
            Self::NonNegative(w) => write!(f, "{w}"),
        }
    }
}

pub(crate) fn percentage<W: Weight>(part: W, whole: W) -> String {
    let whole = whole.as_f64();
    if whole == 0.0 {
        return "0%".to_string();
    }
    format!("{}%", (100.0 * part.as_f64() / whole) as i64)
}
