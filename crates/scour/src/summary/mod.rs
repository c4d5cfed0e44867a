//! Column statistics.

mod column;
pub mod statistics;

pub use column::{
    ColumnSummarizer, ColumnSummary, NumericSummary, TOP_VALUES, TemporalSummary, TextSummary,
    ValueCount, summarize,
};
