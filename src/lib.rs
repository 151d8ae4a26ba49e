//! COPSOQ Score - Scoring engine for the COPSOQ III psychosocial questionnaire
//!
//! Turns the 84 raw answers of one respondent into 32 scale scores through a
//! deterministic pipeline: response encoding → scale aggregation → tier
//! classification.
//!
//! ## Modules
//!
//! - **Core**: `encoder`, `scales`, `aggregator`, `classifier`
//! - **Form support**: `questionnaire` catalog and caller-owned `sheet`
//! - **Output**: `pipeline` reports and persistable `record` rows

pub mod aggregator;
pub mod classifier;
pub mod encoder;
pub mod error;
pub mod pipeline;
pub mod questionnaire;
pub mod record;
pub mod scales;
pub mod sheet;
pub mod types;

// FFI bindings for C interop (always available for cdylib/staticlib builds)
pub mod ffi;

pub use aggregator::{aggregate, ScaleAggregator};
pub use classifier::{classify, Classifier};
pub use encoder::{encode, ResponseEncoder};
pub use error::ScoringError;
pub use pipeline::{score_answers, score_json, CopsoqProcessor};
pub use record::SubmissionRecord;
pub use scales::{ScaleDefinition, ScaleTable};
pub use sheet::ResponseSheet;
pub use types::{
    AnswerOption, Classification, EncodedResponses, Locale, Polarity, ScaleResult, ScoreReport,
    Tier, TierColor, QUESTION_COUNT,
};

/// Engine version embedded in all reports
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for reports
pub const PRODUCER_NAME: &str = "copsoq-score";

/// Instrument identifier for reports
pub const INSTRUMENT: &str = "COPSOQ III";
