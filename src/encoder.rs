//! Response encoding
//!
//! This module converts raw textual answers into points on the 0-100 scale.
//! - Labels are looked up exactly; anything unrecognized is absent
//! - Question 58 is reverse-keyed and inverted after lookup
//! - Output always holds exactly 84 entries

use crate::types::{AnswerOption, EncodedResponses, QUESTION_COUNT};
use log::{debug, warn};

/// Reverse-keyed question (1-based)
pub const REVERSED_QUESTION: usize = 58;

/// Maximum point value; inversion maps `p` to `MAX_POINTS - p`
pub const MAX_POINTS: u8 = 100;

/// Encoder for converting raw answers to encoded responses
pub struct ResponseEncoder;

impl ResponseEncoder {
    /// Encode answers given in question order, question 1 first.
    ///
    /// Missing tail entries and unrecognized labels are absent. Entries past
    /// question 84 are ignored.
    pub fn encode<S: AsRef<str>>(answers: &[S]) -> EncodedResponses {
        if answers.len() > QUESTION_COUNT {
            warn!(
                "received {} answers, ignoring {} past question {}",
                answers.len(),
                answers.len() - QUESTION_COUNT,
                QUESTION_COUNT
            );
        }

        let encoded = EncodedResponses::from_points(
            answers
                .iter()
                .take(QUESTION_COUNT)
                .enumerate()
                .map(|(index, answer)| encode_answer(index + 1, answer.as_ref())),
        );

        debug!(
            "encoded {} of {} questions",
            encoded.present_count(),
            QUESTION_COUNT
        );
        encoded
    }

    /// Encode answers where `None` marks an unanswered question
    pub fn encode_optional<S: AsRef<str>>(answers: &[Option<S>]) -> EncodedResponses {
        let labels: Vec<&str> = answers
            .iter()
            .map(|a| a.as_ref().map(AsRef::as_ref).unwrap_or(""))
            .collect();
        Self::encode(&labels)
    }
}

/// Look up the raw point value of a label, without inversion
pub fn encode_label(label: &str) -> Option<u8> {
    AnswerOption::from_label(label).map(|option| option.points())
}

/// Encode one answer for a 1-based question number
pub fn encode_answer(question: usize, label: &str) -> Option<u8> {
    let points = encode_label(label)?;
    if question == REVERSED_QUESTION {
        Some(MAX_POINTS - points)
    } else {
        Some(points)
    }
}

/// Shorthand for [`ResponseEncoder::encode`]
pub fn encode<S: AsRef<str>>(answers: &[S]) -> EncodedResponses {
    ResponseEncoder::encode(answers)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answers_with(question: usize, label: &str) -> Vec<String> {
        let mut answers = vec![String::new(); QUESTION_COUNT];
        answers[question - 1] = label.to_string();
        answers
    }

    #[test]
    fn test_every_label_maps_to_its_points() {
        for option in AnswerOption::ALL {
            let encoded = ResponseEncoder::encode(&answers_with(1, option.label()));
            assert_eq!(encoded.question(1), Some(option.points()));
        }
    }

    #[test]
    fn test_question_58_is_inverted() {
        for option in AnswerOption::ALL {
            let encoded = ResponseEncoder::encode(&answers_with(58, option.label()));
            assert_eq!(encoded.question(58), Some(100 - option.points()));
        }
        // Neighbours are untouched
        let encoded = ResponseEncoder::encode(&answers_with(57, "Sempre"));
        assert_eq!(encoded.question(57), Some(100));
        let encoded = ResponseEncoder::encode(&answers_with(59, "Sempre"));
        assert_eq!(encoded.question(59), Some(100));
    }

    #[test]
    fn test_unrecognized_labels_are_absent() {
        let encoded = ResponseEncoder::encode(&["", "Talvez", "SEMPRE", "Selecione...", "Nunca"]);
        assert_eq!(encoded.question(1), None);
        assert_eq!(encoded.question(2), None);
        assert_eq!(encoded.question(3), None);
        assert_eq!(encoded.question(4), None);
        assert_eq!(encoded.question(5), Some(0));
    }

    #[test]
    fn test_short_input_is_padded() {
        let encoded = ResponseEncoder::encode(&["Sempre", "Nunca", "Às vezes"]);
        assert_eq!(encoded.len(), QUESTION_COUNT);
        assert_eq!(encoded.question(1), Some(100));
        assert_eq!(encoded.question(2), Some(0));
        assert_eq!(encoded.question(3), Some(50));
        assert_eq!(encoded.present_count(), 3);
    }

    #[test]
    fn test_empty_input() {
        let empty: [&str; 0] = [];
        let encoded = ResponseEncoder::encode(&empty);
        assert_eq!(encoded.len(), QUESTION_COUNT);
        assert!(encoded.is_empty());
    }

    #[test]
    fn test_long_input_is_truncated() {
        let answers = vec!["Muito"; 100];
        let encoded = ResponseEncoder::encode(&answers);
        assert_eq!(encoded.len(), QUESTION_COUNT);
        assert_eq!(encoded.present_count(), QUESTION_COUNT);
    }

    #[test]
    fn test_encode_optional() {
        let encoded = ResponseEncoder::encode_optional(&[Some("Boa"), None, Some("Excelente")]);
        assert_eq!(encoded.question(1), Some(50));
        assert_eq!(encoded.question(2), None);
        assert_eq!(encoded.question(3), Some(100));
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let answers = vec!["Frequentemente"; QUESTION_COUNT];
        assert_eq!(encode(&answers), encode(&answers));
    }
}
