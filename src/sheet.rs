//! Response sheet
//!
//! Caller-owned answer buffer for one respondent. Holds raw labels by
//! question number and reports progress; scoring reads it through
//! [`ResponseSheet::answers`].

use crate::encoder::encode_label;
use crate::error::ScoringError;
use crate::questionnaire::{section_questions, Section};
use crate::types::{deserialize_per_question, QUESTION_COUNT};
use serde::{Deserialize, Serialize};

/// Answered vs. total items of a section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionProgress {
    pub answered: usize,
    pub total: usize,
}

impl SectionProgress {
    pub fn is_complete(&self) -> bool {
        self.answered == self.total
    }

    pub fn remaining(&self) -> usize {
        self.total - self.answered
    }
}

/// Raw answers for the 84 questions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseSheet {
    #[serde(deserialize_with = "deserialize_per_question")]
    answers: Vec<Option<String>>,
}

impl Default for ResponseSheet {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseSheet {
    pub fn new() -> Self {
        Self {
            answers: vec![None; QUESTION_COUNT],
        }
    }

    fn index(question: usize) -> Result<usize, ScoringError> {
        match question {
            1..=QUESTION_COUNT => Ok(question - 1),
            _ => Err(ScoringError::InvalidQuestion(question)),
        }
    }

    /// Record the label chosen for a 1-based question, replacing any earlier
    /// answer. The label is stored verbatim.
    pub fn set(&mut self, question: usize, label: impl Into<String>) -> Result<(), ScoringError> {
        let index = Self::index(question)?;
        self.answers[index] = Some(label.into());
        Ok(())
    }

    pub fn clear(&mut self, question: usize) -> Result<(), ScoringError> {
        let index = Self::index(question)?;
        self.answers[index] = None;
        Ok(())
    }

    pub fn get(&self, question: usize) -> Option<&str> {
        let index = question.checked_sub(1)?;
        self.answers.get(index)?.as_deref()
    }

    fn is_answered(&self, question: usize) -> bool {
        self.get(question).and_then(encode_label).is_some()
    }

    /// Questions holding a recognized label
    pub fn answered_count(&self) -> usize {
        (1..=QUESTION_COUNT).filter(|&q| self.is_answered(q)).count()
    }

    /// Fraction of questions answered, 0.0 to 1.0
    pub fn progress(&self) -> f64 {
        self.answered_count() as f64 / QUESTION_COUNT as f64
    }

    pub fn is_complete(&self) -> bool {
        self.answered_count() == QUESTION_COUNT
    }

    pub fn section_progress(&self, section: Section) -> SectionProgress {
        let (answered, total) = section_questions(section).fold((0, 0), |(a, t), q| {
            (a + usize::from(self.is_answered(q.number)), t + 1)
        });
        SectionProgress { answered, total }
    }

    /// Unanswered question numbers, ascending
    pub fn missing(&self) -> Vec<usize> {
        (1..=QUESTION_COUNT)
            .filter(|&q| !self.is_answered(q))
            .collect()
    }

    /// Answers in question order; unanswered questions are empty strings
    pub fn answers(&self) -> Vec<String> {
        self.answers
            .iter()
            .map(|a| a.clone().unwrap_or_default())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AnswerOption;

    #[test]
    fn test_deserialized_sheet_has_every_slot() {
        let mut sheet: ResponseSheet = serde_json::from_str(r#"{"answers":["Sempre"]}"#).unwrap();
        assert_eq!(sheet.get(1), Some("Sempre"));
        assert_eq!(sheet.answers().len(), QUESTION_COUNT);

        sheet.set(84, "Nunca").unwrap();
        assert_eq!(sheet.get(84), Some("Nunca"));

        let long = format!(r#"{{"answers":{}}}"#, serde_json::json!(vec!["Nunca"; 90]));
        let sheet: ResponseSheet = serde_json::from_str(&long).unwrap();
        assert_eq!(sheet.answers().len(), QUESTION_COUNT);
        assert!(sheet.is_complete());
    }

    #[test]
    fn test_set_and_get() {
        let mut sheet = ResponseSheet::new();
        sheet.set(1, "Sempre").unwrap();
        sheet.set(84, "Nunca").unwrap();
        assert_eq!(sheet.get(1), Some("Sempre"));
        assert_eq!(sheet.get(84), Some("Nunca"));
        assert_eq!(sheet.get(2), None);

        sheet.set(1, "Raramente").unwrap();
        assert_eq!(sheet.get(1), Some("Raramente"));

        sheet.clear(1).unwrap();
        assert_eq!(sheet.get(1), None);
    }

    #[test]
    fn test_rejects_out_of_range_questions() {
        let mut sheet = ResponseSheet::new();
        assert!(matches!(
            sheet.set(0, "Sempre"),
            Err(ScoringError::InvalidQuestion(0))
        ));
        assert!(matches!(
            sheet.set(85, "Sempre"),
            Err(ScoringError::InvalidQuestion(85))
        ));
    }

    #[test]
    fn test_progress_counts_recognized_labels() {
        let mut sheet = ResponseSheet::new();
        sheet.set(1, "Sempre").unwrap();
        sheet.set(2, "talvez").unwrap();
        assert_eq!(sheet.answered_count(), 1);
        assert!(!sheet.is_complete());
        assert!((sheet.progress() - 1.0 / 84.0).abs() < 1e-12);
        assert_eq!(sheet.missing().len(), 83);
    }

    #[test]
    fn test_section_progress() {
        let mut sheet = ResponseSheet::new();
        for q in 1..=9 {
            sheet.set(q, "Às vezes").unwrap();
        }
        sheet.set(20, "Nunca").unwrap();

        let first = sheet.section_progress(Section::WorkloadAndEnvironment);
        assert!(first.is_complete());
        assert_eq!(first.total, 9);

        let second = sheet.section_progress(Section::EmotionalDemandsAndAutonomy);
        assert_eq!(second, SectionProgress { answered: 1, total: 10 });
        assert_eq!(second.remaining(), 9);
    }

    #[test]
    fn test_complete_sheet() {
        let mut sheet = ResponseSheet::new();
        for q in 1..=QUESTION_COUNT {
            sheet.set(q, AnswerOption::Often.label()).unwrap();
        }
        assert!(sheet.is_complete());
        assert_eq!(sheet.progress(), 1.0);
        assert!(sheet.missing().is_empty());

        let answers = sheet.answers();
        assert_eq!(answers.len(), QUESTION_COUNT);
        assert!(answers.iter().all(|a| a == "Frequentemente"));
    }
}
