// Lexical statistics engine: diversity, descriptive stats, frequency
// rankings, pairwise similarity, and group-level corpus comparison.
//
// Everything in here is a pure function over token slices. No I/O, no
// shared state, so any of it can be called from rayon workers.

pub mod corpus;
pub mod descriptive;
pub mod diversity;
pub mod frequency;
pub mod similarity;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Round to a fixed number of decimal places for reporting. Halves go to
/// the even neighbour, so `0.03125` reports as `0.0312`.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}

/// `part / whole * 100`, rounded to 2 decimals. Zero when `whole` is zero.
pub fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        round_to(part as f64 / whole as f64 * 100.0, 2)
    }
}

/// Serialize `None` as an empty object instead of `null`.
///
/// Empty inputs produce "no statistics" rather than an error, and consumers
/// of the report expect `{}` in that slot.
pub(crate) fn empty_map_if_none<T, S>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Serialize,
    S: Serializer,
{
    match value {
        Some(inner) => inner.serialize(serializer),
        None => serializer.serialize_map(Some(0))?.end(),
    }
}
