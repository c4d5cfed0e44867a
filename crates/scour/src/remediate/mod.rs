//! Rule-based remediation driven by analyzer findings.

mod engine;
mod operations;

pub use engine::{ImputationScope, RemediationConfig, Remediation, Remediator, remediate};
pub use operations::{ActionLog, ActionRecord, Outcome, RemediationStep};
