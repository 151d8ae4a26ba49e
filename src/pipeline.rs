//! Pipeline orchestration
//!
//! This module provides the public API for the scoring engine.
//! It orchestrates the full pipeline from raw answers to a classified report.

use crate::aggregator::ScaleAggregator;
use crate::classifier::Classifier;
use crate::encoder::ResponseEncoder;
use crate::error::ScoringError;
use crate::record::SubmissionRecord;
use crate::scales::ScaleTable;
use crate::types::{Locale, Producer, ScaleReport, ScaleResult, ScoreReport};
use crate::{ENGINE_VERSION, INSTRUMENT, PRODUCER_NAME};
use chrono::Utc;
use log::debug;
use uuid::Uuid;

/// Encode and aggregate raw answers against the canonical table.
///
/// # Example
/// ```
/// let results = copsoq_score::score_answers(&["Sempre", "Nunca", "Às vezes"]);
/// assert_eq!(results[0].score, Some(50.0));
/// ```
pub fn score_answers<S: AsRef<str>>(answers: &[S]) -> Vec<ScaleResult> {
    let encoded = ResponseEncoder::encode(answers);
    ScaleAggregator::aggregate(&encoded)
}

/// Score a JSON array of answers and return the report as JSON.
///
/// `null` entries are unanswered questions.
pub fn score_json(answers_json: &str) -> Result<String, ScoringError> {
    CopsoqProcessor::new().score_json(answers_json)
}

/// Parse a JSON array of answers; `null` becomes an empty label
pub fn parse_answers(answers_json: &str) -> Result<Vec<String>, ScoringError> {
    let answers: Vec<Option<String>> = serde_json::from_str(answers_json)?;
    Ok(answers.into_iter().map(Option::unwrap_or_default).collect())
}

/// Scoring processor carrying the table, label locale and producer identity.
///
/// Holds no per-submission state; one processor can score any number of
/// submissions.
#[derive(Debug, Clone)]
pub struct CopsoqProcessor {
    table: ScaleTable,
    classifier: Classifier,
    instance_id: String,
}

impl Default for CopsoqProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl CopsoqProcessor {
    /// Create a processor over the canonical table with Portuguese labels
    pub fn new() -> Self {
        Self {
            table: ScaleTable::canonical().clone(),
            classifier: Classifier::default(),
            instance_id: Uuid::new_v4().to_string(),
        }
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.classifier = Classifier::new(locale);
        self
    }

    /// Use a custom, already validated table
    pub fn with_table(mut self, table: ScaleTable) -> Self {
        self.table = table;
        self
    }

    pub fn with_instance_id(mut self, instance_id: impl Into<String>) -> Self {
        self.instance_id = instance_id.into();
        self
    }

    pub fn table(&self) -> &ScaleTable {
        &self.table
    }

    pub fn locale(&self) -> Locale {
        self.classifier.locale()
    }

    /// Encode and aggregate without classification
    pub fn results<S: AsRef<str>>(&self, answers: &[S]) -> Vec<ScaleResult> {
        let encoded = ResponseEncoder::encode(answers);
        ScaleAggregator::aggregate_with(&encoded, &self.table)
    }

    /// Run the full pipeline and build a report.
    ///
    /// Pipeline stages:
    /// 1. ResponseEncoder - labels to points, Q58 inverted
    /// 2. ScaleAggregator - rounded mean per scale
    /// 3. Classifier - tier, color and annotation per scale
    pub fn score<S: AsRef<str>>(&self, answers: &[S]) -> ScoreReport {
        let encoded = ResponseEncoder::encode(answers);
        let results = ScaleAggregator::aggregate_with(&encoded, &self.table);

        let reports = self
            .table
            .iter()
            .zip(results)
            .map(|(scale, result)| {
                let classification = self.classifier.classify(scale, result.score);
                ScaleReport {
                    scale: result.scale,
                    polarity: scale.polarity,
                    score: result.score,
                    tier: classification.tier,
                    color: classification.color,
                    annotation: classification.annotation,
                }
            })
            .collect();

        debug!(
            "scored submission with {} answered questions",
            encoded.present_count()
        );

        ScoreReport {
            instrument: INSTRUMENT.to_string(),
            engine: Producer {
                name: PRODUCER_NAME.to_string(),
                version: ENGINE_VERSION.to_string(),
                instance_id: self.instance_id.clone(),
            },
            computed_at: Utc::now(),
            answered: encoded.present_count(),
            results: reports,
        }
    }

    /// Score and wrap into a persistable record
    pub fn record<S: AsRef<str>>(&self, answers: &[S]) -> SubmissionRecord {
        SubmissionRecord::new(answers, self.results(answers))
    }

    /// Header row matching [`SubmissionRecord::to_row`] for this table
    pub fn record_header(&self) -> Vec<String> {
        SubmissionRecord::header(&self.table)
    }

    /// JSON array of answers in, pretty JSON report out
    pub fn score_json(&self, answers_json: &str) -> Result<String, ScoringError> {
        let answers = parse_answers(answers_json)?;
        let report = self.score(&answers);
        serde_json::to_string_pretty(&report).map_err(ScoringError::JsonError)
    }

    /// JSON array of answers in, JSON submission record out
    pub fn record_json(&self, answers_json: &str) -> Result<String, ScoringError> {
        let answers = parse_answers(answers_json)?;
        let record = self.record(&answers);
        serde_json::to_string(&record).map_err(ScoringError::JsonError)
    }
}
