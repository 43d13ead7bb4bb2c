//! Match error handling
//!
//! Engine codes, the diagnostic table that names them, the typed error
//! taxonomy, and the one classification function both match operations share.

pub mod classification;
pub mod codes;
pub mod diagnostics;
mod types;

pub use classification::classify;
pub use codes::ErrorCode;
pub use diagnostics::{DiagnosticTable, EngineConstant};
pub use types::{EngineFailure, MatchError, MatchOutcome};
