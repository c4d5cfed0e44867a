//! Value coercion and column kind classification.

mod coerce;
mod kind;

pub use coerce::{coerce_date, coerce_number, parse_date, parse_number};
pub use kind::{DEFAULT_NULL_TOKENS, KindClassifier};
