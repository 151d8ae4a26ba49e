//! Submission records
//!
//! The row shape persisted by collaborators: timestamp, the 84 raw answers,
//! then one column per scale in table order. Readers rebuild columns by
//! position, so the order here is part of the storage contract.

use crate::scales::ScaleTable;
use crate::types::{deserialize_per_question, ScaleResult, QUESTION_COUNT};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Timestamp format of the first column
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Header of the timestamp column
pub const TIMESTAMP_HEADER: &str = "Timestamp";

/// One scored submission, ready to persist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    pub submission_id: Uuid,
    pub submitted_at: DateTime<Utc>,
    /// Raw labels in question order, padded to 84
    #[serde(deserialize_with = "deserialize_per_question")]
    pub answers: Vec<String>,
    /// Results in scale table order
    pub results: Vec<ScaleResult>,
}

impl SubmissionRecord {
    /// Build a record stamped now
    pub fn new<S: AsRef<str>>(answers: &[S], results: Vec<ScaleResult>) -> Self {
        Self::with_timestamp(answers, results, Utc::now())
    }

    pub fn with_timestamp<S: AsRef<str>>(
        answers: &[S],
        results: Vec<ScaleResult>,
        submitted_at: DateTime<Utc>,
    ) -> Self {
        let mut padded: Vec<String> = answers
            .iter()
            .take(QUESTION_COUNT)
            .map(|a| a.as_ref().to_string())
            .collect();
        padded.resize(QUESTION_COUNT, String::new());

        Self {
            submission_id: Uuid::new_v4(),
            submitted_at,
            answers: padded,
            results,
        }
    }

    /// Column headers matching [`SubmissionRecord::to_row`]
    pub fn header(table: &ScaleTable) -> Vec<String> {
        std::iter::once(TIMESTAMP_HEADER.to_string())
            .chain((1..=QUESTION_COUNT).map(|q| format!("Resp_Q{q}")))
            .chain(table.iter().map(|s| s.name.clone()))
            .collect()
    }

    /// Flatten into cells. Absent scores are empty cells.
    pub fn to_row(&self) -> Vec<String> {
        std::iter::once(self.submitted_at.format(TIMESTAMP_FORMAT).to_string())
            .chain(self.answers.iter().cloned())
            .chain(
                self.results
                    .iter()
                    .map(|r| r.score.map(|s| s.to_string()).unwrap_or_default()),
            )
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::ScaleAggregator;
    use crate::encoder::ResponseEncoder;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap()
    }

    #[test]
    fn test_header_layout() {
        let header = SubmissionRecord::header(ScaleTable::canonical());
        assert_eq!(header.len(), 1 + 84 + 32);
        assert_eq!(header[0], "Timestamp");
        assert_eq!(header[1], "Resp_Q1");
        assert_eq!(header[84], "Resp_Q84");
        assert_eq!(header[85], "Exigências Quantitativas");
        assert_eq!(header[116], "Sintomas Depressivos");
    }

    #[test]
    fn test_row_lines_up_with_header() {
        let answers = ["Sempre", "Nunca", "Às vezes"];
        let results = ScaleAggregator::aggregate(&ResponseEncoder::encode(&answers));
        let record = SubmissionRecord::with_timestamp(&answers, results, fixed_time());

        let header = SubmissionRecord::header(ScaleTable::canonical());
        let row = record.to_row();
        assert_eq!(row.len(), header.len());

        assert_eq!(row[0], "2024-03-05 14:07:09");
        assert_eq!(row[1], "Sempre");
        assert_eq!(row[3], "Às vezes");
        assert_eq!(row[4], "");
        assert_eq!(row[85], "50");
        assert_eq!(row[86], "");
    }

    #[test]
    fn test_fractional_scores_in_row() {
        let answers = vec!["Sempre", "Sempre", "Nunca"];
        let results = ScaleAggregator::aggregate(&ResponseEncoder::encode(&answers));
        let record = SubmissionRecord::with_timestamp(&answers, results, fixed_time());
        assert_eq!(record.to_row()[85], "66.67");
    }

    #[test]
    fn test_answers_are_padded_and_truncated() {
        let short = SubmissionRecord::new(&["Sempre"], vec![]);
        assert_eq!(short.answers.len(), QUESTION_COUNT);

        let long = SubmissionRecord::new(&["Nunca"; 90], vec![]);
        assert_eq!(long.answers.len(), QUESTION_COUNT);
    }

    #[test]
    fn test_deserialized_record_keeps_column_layout() {
        let record = SubmissionRecord::with_timestamp(&["Sempre"; 3], vec![], fixed_time());
        let mut json = serde_json::to_value(&record).unwrap();
        json["answers"] = serde_json::json!(["Sempre", "Sempre"]);

        let restored: SubmissionRecord = serde_json::from_value(json).unwrap();
        assert_eq!(restored.answers.len(), QUESTION_COUNT);
        assert_eq!(restored.to_row().len(), 1 + QUESTION_COUNT);
        assert_eq!(restored.to_row()[2], "Sempre");
        assert_eq!(restored.to_row()[3], "");
    }

    #[test]
    fn test_records_get_distinct_ids() {
        let a = SubmissionRecord::new(&["Sempre"], vec![]);
        let b = SubmissionRecord::new(&["Sempre"], vec![]);
        assert_ne!(a.submission_id, b.submission_id);
    }
}
