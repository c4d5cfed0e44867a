//! Data-quality detection.
//!
//! The [`QualityAnalyzer`] runs a fixed sequence of [`Check`]s over a table and
//! groups their output into a [`FindingSet`].

mod analyzer;
mod checks;
mod finding;
mod policy;

pub use analyzer::{AnalyzerConfig, QualityAnalyzer, analyze};
pub use checks::{
    CasingCheck, Check, DateFormatCheck, DuplicateRowsCheck, MissingValuesCheck, OutlierCheck,
    UniquenessCheck, WhitespaceCheck, WrongTypeCheck,
};
pub use finding::{Finding, FindingKind, FindingSet};
pub use policy::{IdentifierPolicy, IdentifierRule, NameContains, NamedColumns};
