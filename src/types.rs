//! Core types for the COPSOQ scoring pipeline
//!
//! This module defines the data structures that flow through each stage of the
//! pipeline: answer options, encoded responses, scale results, classifications
//! and the report emitted to collaborators.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Number of questions in the canonical questionnaire
pub const QUESTION_COUNT: usize = 84;

/// Family of answer labels a question is asked with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerFamily {
    Frequency,
    Intensity,
    Quality,
}

/// Closed set of answer labels. All three families share one 0-100 point
/// scale in steps of 25.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerOption {
    // Frequency
    Never,
    Rarely,
    Sometimes,
    Often,
    Always,

    // Intensity
    NotAtAll,
    ALittle,
    Moderately,
    Much,
    Extremely,

    // Quality
    Poor,
    Fair,
    Good,
    VeryGood,
    Excellent,
}

impl AnswerOption {
    /// Every option, grouped by family in ascending point order
    pub const ALL: [AnswerOption; 15] = [
        AnswerOption::Never,
        AnswerOption::Rarely,
        AnswerOption::Sometimes,
        AnswerOption::Often,
        AnswerOption::Always,
        AnswerOption::NotAtAll,
        AnswerOption::ALittle,
        AnswerOption::Moderately,
        AnswerOption::Much,
        AnswerOption::Extremely,
        AnswerOption::Poor,
        AnswerOption::Fair,
        AnswerOption::Good,
        AnswerOption::VeryGood,
        AnswerOption::Excellent,
    ];

    /// Options offered by the form, in display order
    pub const FREQUENCY: [AnswerOption; 5] = [
        AnswerOption::Never,
        AnswerOption::Rarely,
        AnswerOption::Sometimes,
        AnswerOption::Often,
        AnswerOption::Always,
    ];

    /// Label as shown on the questionnaire
    pub fn label(&self) -> &'static str {
        match self {
            AnswerOption::Never => "Nunca",
            AnswerOption::Rarely => "Raramente",
            AnswerOption::Sometimes => "Às vezes",
            AnswerOption::Often => "Frequentemente",
            AnswerOption::Always => "Sempre",
            AnswerOption::NotAtAll => "Nada",
            AnswerOption::ALittle => "Um pouco",
            AnswerOption::Moderately => "Moderadamente",
            AnswerOption::Much => "Muito",
            AnswerOption::Extremely => "Extremamente",
            AnswerOption::Poor => "Fraca",
            AnswerOption::Fair => "Razoável",
            AnswerOption::Good => "Boa",
            AnswerOption::VeryGood => "Muito boa",
            AnswerOption::Excellent => "Excelente",
        }
    }

    /// Exact, case-sensitive label lookup
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|option| option.label() == label)
    }

    /// Point value on the 0-100 scale
    pub fn points(&self) -> u8 {
        match self {
            AnswerOption::Never | AnswerOption::NotAtAll | AnswerOption::Poor => 0,
            AnswerOption::Rarely | AnswerOption::ALittle | AnswerOption::Fair => 25,
            AnswerOption::Sometimes | AnswerOption::Moderately | AnswerOption::Good => 50,
            AnswerOption::Often | AnswerOption::Much | AnswerOption::VeryGood => 75,
            AnswerOption::Always | AnswerOption::Extremely | AnswerOption::Excellent => 100,
        }
    }

    pub fn family(&self) -> AnswerFamily {
        match self {
            AnswerOption::Never
            | AnswerOption::Rarely
            | AnswerOption::Sometimes
            | AnswerOption::Often
            | AnswerOption::Always => AnswerFamily::Frequency,
            AnswerOption::NotAtAll
            | AnswerOption::ALittle
            | AnswerOption::Moderately
            | AnswerOption::Much
            | AnswerOption::Extremely => AnswerFamily::Intensity,
            AnswerOption::Poor
            | AnswerOption::Fair
            | AnswerOption::Good
            | AnswerOption::VeryGood
            | AnswerOption::Excellent => AnswerFamily::Quality,
        }
    }
}

/// Deserialize a per-question vector, padding with defaults or truncating so
/// it always holds exactly 84 entries
pub(crate) fn deserialize_per_question<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default + Clone,
{
    let mut values = Vec::<T>::deserialize(deserializer)?;
    values.resize(QUESTION_COUNT, T::default());
    Ok(values)
}

/// Encoded points for all 84 questions. Index `i - 1` holds question `i`;
/// `None` means unanswered or unrecognized, never zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Option<u8>>", into = "Vec<Option<u8>>")]
pub struct EncodedResponses {
    points: Vec<Option<u8>>,
}

impl From<Vec<Option<u8>>> for EncodedResponses {
    fn from(points: Vec<Option<u8>>) -> Self {
        Self::from_points(points)
    }
}

impl From<EncodedResponses> for Vec<Option<u8>> {
    fn from(encoded: EncodedResponses) -> Self {
        encoded.points
    }
}

impl Default for EncodedResponses {
    fn default() -> Self {
        Self::empty()
    }
}

impl EncodedResponses {
    /// All questions absent
    pub fn empty() -> Self {
        Self {
            points: vec![None; QUESTION_COUNT],
        }
    }

    /// Build from an iterator of points; missing tail entries are absent and
    /// anything past question 84 is dropped.
    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = Option<u8>>,
    {
        let mut encoded = Self::empty();
        for (slot, point) in encoded.points.iter_mut().zip(points) {
            *slot = point;
        }
        encoded
    }

    /// Point for a 1-based question number
    pub fn question(&self, number: usize) -> Option<u8> {
        number
            .checked_sub(1)
            .and_then(|index| self.points.get(index).copied().flatten())
    }

    /// Point at a zero-based index
    pub fn get(&self, index: usize) -> Option<u8> {
        self.points.get(index).copied().flatten()
    }

    pub fn as_slice(&self) -> &[Option<u8>] {
        &self.points
    }

    pub fn present_count(&self) -> usize {
        self.points.iter().filter(|p| p.is_some()).count()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when no question holds a point
    pub fn is_empty(&self) -> bool {
        self.present_count() == 0
    }
}

/// Whether a high mean on a scale indicates risk or a protective resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    /// Higher mean = worse
    Risk,
    /// Higher mean = better
    Resource,
}

impl Polarity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Polarity::Risk => "risk",
            Polarity::Resource => "resource",
        }
    }
}

/// Mean score of one scale. `score` is `None` when no member was answered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleResult {
    pub scale: String,
    pub score: Option<f64>,
}

/// Band of a 0-100 mean, before polarity is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Band {
    Low,
    Middle,
    High,
}

/// Interpreted tier of a scale result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    LowRisk,
    Attention,
    HighRisk,
    Critical,
    Favorable,
    NotAvailable,
}

/// Display color token attached to a tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TierColor {
    #[serde(rename = "favorable-green")]
    FavorableGreen,
    #[serde(rename = "attention-yellow")]
    AttentionYellow,
    #[serde(rename = "critical-red")]
    CriticalRed,
    #[serde(rename = "neutral-gray")]
    NeutralGray,
}

impl TierColor {
    pub fn token(&self) -> &'static str {
        match self {
            TierColor::FavorableGreen => "favorable-green",
            TierColor::AttentionYellow => "attention-yellow",
            TierColor::CriticalRed => "critical-red",
            TierColor::NeutralGray => "neutral-gray",
        }
    }

    /// Hex color used by the results dashboard
    pub fn hex(&self) -> &'static str {
        match self {
            TierColor::FavorableGreen => "#28a745",
            TierColor::AttentionYellow => "#ffc107",
            TierColor::CriticalRed => "#dc3545",
            TierColor::NeutralGray => "#6c757d",
        }
    }
}

/// Language of tier labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Pt,
    En,
}

/// Output of the classifier for one scale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub tier: Tier,
    pub color: TierColor,
    /// Value with one decimal followed by the tier label, or "N/A"
    pub annotation: String,
}

/// Producer metadata embedded in every report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Producer {
    pub name: String,
    pub version: String,
    pub instance_id: String,
}

/// One scale line of a score report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleReport {
    pub scale: String,
    pub polarity: Polarity,
    pub score: Option<f64>,
    pub tier: Tier,
    pub color: TierColor,
    pub annotation: String,
}

/// Full scoring output for one submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub instrument: String,
    pub engine: Producer,
    pub computed_at: DateTime<Utc>,
    /// Number of questions with a recognized answer
    pub answered: usize,
    pub results: Vec<ScaleReport>,
}
