//! Scale definition table
//!
//! The canonical COPSOQ III table: 32 scales over 84 questions, each scale
//! tagged with its polarity. Declaration order is significant because
//! persisted rows line up result columns positionally.

use crate::error::ScoringError;
use crate::types::{Polarity, QUESTION_COUNT};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::OnceLock;

/// Static form of a scale entry: name, zero-based question indices, polarity
type ScaleRow = (&'static str, &'static [usize], Polarity);

const CANONICAL_SCALES: [ScaleRow; 32] = [
    ("Exigências Quantitativas", &[0, 1, 2], Polarity::Risk),
    ("Ritmo de Trabalho", &[3, 4], Polarity::Risk),
    ("Exigências Cognitivas", &[5, 6, 7, 8], Polarity::Risk),
    ("Exigências Emocionais", &[9, 10, 11], Polarity::Risk),
    ("Influência no Trabalho", &[12, 13, 14, 15], Polarity::Resource),
    ("Possibilidades de Desenvolvimento", &[16, 17, 18], Polarity::Resource),
    ("Controlo sobre o Tempo de Trabalho", &[19, 20, 21], Polarity::Resource),
    ("Significado do Trabalho", &[22, 23], Polarity::Resource),
    ("Envolvimento com o Trabalho", &[24], Polarity::Resource),
    ("Compromisso face ao Local de Trabalho", &[25, 26], Polarity::Resource),
    ("Previsibilidade", &[27, 28], Polarity::Resource),
    ("Recompensas", &[29, 30, 31], Polarity::Resource),
    ("Transparência do Papel Laboral", &[32, 33, 34], Polarity::Resource),
    ("Conflitos de Papéis Laborais", &[35, 36, 37], Polarity::Risk),
    ("Qualidade da Liderança", &[38, 39, 40, 41], Polarity::Resource),
    ("Apoio Social de Colegas", &[42, 43, 44], Polarity::Resource),
    ("Apoio Social de Superiores", &[45, 46, 47], Polarity::Resource),
    ("Comunidade Social no Trabalho", &[48, 49, 50], Polarity::Resource),
    ("Insegurança Laboral", &[51, 52], Polarity::Risk),
    ("Insegurança nas Condições de Trabalho", &[53, 54, 55], Polarity::Risk),
    ("Qualidade do Trabalho", &[56], Polarity::Resource),
    ("Confiança Horizontal", &[57, 58, 59], Polarity::Resource),
    ("Confiança Vertical", &[60, 61, 62], Polarity::Resource),
    ("Justiça e Respeito", &[63, 64, 65, 66], Polarity::Resource),
    ("Conflito Trabalho-Família", &[67, 68, 69], Polarity::Risk),
    ("Satisfação no Trabalho", &[70, 71, 72], Polarity::Resource),
    ("Saúde Geral", &[73], Polarity::Resource),
    ("Autoeficácia", &[74, 75], Polarity::Resource),
    ("Problemas de Sono", &[76, 77], Polarity::Risk),
    ("Burnout", &[78, 79], Polarity::Risk),
    ("Stress", &[80, 81], Polarity::Risk),
    ("Sintomas Depressivos", &[82, 83], Polarity::Risk),
];

/// Every question index is referenced exactly once.
const fn covers_each_question_once(rows: &[ScaleRow]) -> bool {
    let mut seen = [0u8; QUESTION_COUNT];
    let mut r = 0;
    while r < rows.len() {
        let indices = rows[r].1;
        let mut i = 0;
        while i < indices.len() {
            if indices[i] >= QUESTION_COUNT {
                return false;
            }
            seen[indices[i]] += 1;
            i += 1;
        }
        r += 1;
    }
    let mut q = 0;
    while q < QUESTION_COUNT {
        if seen[q] != 1 {
            return false;
        }
        q += 1;
    }
    true
}

const _: () = assert!(
    covers_each_question_once(&CANONICAL_SCALES),
    "canonical scale table must reference each question index exactly once"
);

/// A named group of questions averaged into one score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaleDefinition {
    pub name: String,
    /// Zero-based question indices, in declaration order
    pub questions: Vec<usize>,
    pub polarity: Polarity,
}

impl ScaleDefinition {
    pub fn new(name: impl Into<String>, questions: Vec<usize>, polarity: Polarity) -> Self {
        Self {
            name: name.into(),
            questions,
            polarity,
        }
    }

    /// 1-based question numbers, as printed on the questionnaire
    pub fn question_numbers(&self) -> Vec<usize> {
        self.questions.iter().map(|i| i + 1).collect()
    }
}

/// Ordered, validated set of scale definitions
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScaleTable {
    scales: Vec<ScaleDefinition>,
}

impl ScaleTable {
    /// Validate and build a table.
    ///
    /// Rejects empty or duplicate names, scales without questions, indices
    /// outside `[0, 83]`, and indices shared between scales. Full coverage of
    /// the questionnaire is not required.
    pub fn new(scales: Vec<ScaleDefinition>) -> Result<Self, ScoringError> {
        if scales.is_empty() {
            return Err(ScoringError::InvalidScaleTable(
                "table has no scales".to_string(),
            ));
        }

        let mut names = HashSet::new();
        let mut owner: Vec<Option<&str>> = vec![None; QUESTION_COUNT];

        for scale in &scales {
            if scale.name.trim().is_empty() {
                return Err(ScoringError::InvalidScaleTable(
                    "scale with empty name".to_string(),
                ));
            }
            if !names.insert(scale.name.as_str()) {
                return Err(ScoringError::InvalidScaleTable(format!(
                    "duplicate scale name '{}'",
                    scale.name
                )));
            }
            if scale.questions.is_empty() {
                return Err(ScoringError::InvalidScaleTable(format!(
                    "scale '{}' has no questions",
                    scale.name
                )));
            }
            for &index in &scale.questions {
                let slot = owner.get_mut(index).ok_or_else(|| {
                    ScoringError::InvalidScaleTable(format!(
                        "scale '{}' references index {} outside [0, {}]",
                        scale.name,
                        index,
                        QUESTION_COUNT - 1
                    ))
                })?;
                if let Some(other) = slot {
                    return Err(ScoringError::InvalidScaleTable(format!(
                        "index {} appears in both '{}' and '{}'",
                        index, other, scale.name
                    )));
                }
                *slot = Some(scale.name.as_str());
            }
        }

        Ok(Self { scales })
    }

    /// The canonical 32-scale table
    pub fn canonical() -> &'static ScaleTable {
        static TABLE: OnceLock<ScaleTable> = OnceLock::new();
        TABLE.get_or_init(|| ScaleTable {
            scales: CANONICAL_SCALES
                .iter()
                .map(|(name, questions, polarity)| {
                    ScaleDefinition::new(*name, questions.to_vec(), *polarity)
                })
                .collect(),
        })
    }

    pub fn scales(&self) -> &[ScaleDefinition] {
        &self.scales
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScaleDefinition> {
        self.scales.iter()
    }

    pub fn len(&self) -> usize {
        self.scales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scales.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&ScaleDefinition> {
        self.scales.iter().find(|s| s.name == name)
    }

    /// Scale names in declaration order
    pub fn names(&self) -> Vec<&str> {
        self.scales.iter().map(|s| s.name.as_str()).collect()
    }

    /// Scale containing a 1-based question number
    pub fn scale_of_question(&self, number: usize) -> Option<&ScaleDefinition> {
        let index = number.checked_sub(1)?;
        self.scales.iter().find(|s| s.questions.contains(&index))
    }
}

impl<'de> Deserialize<'de> for ScaleTable {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct RawTable {
            scales: Vec<ScaleDefinition>,
        }

        let raw = RawTable::deserialize(deserializer)?;
        ScaleTable::new(raw.scales).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_table_shape() {
        let table = ScaleTable::canonical();
        assert_eq!(table.len(), 32);

        let risk = table.iter().filter(|s| s.polarity == Polarity::Risk).count();
        assert_eq!(risk, 12);

        let mut covered: Vec<usize> = table.iter().flat_map(|s| s.questions.clone()).collect();
        covered.sort_unstable();
        assert_eq!(covered, (0..QUESTION_COUNT).collect::<Vec<_>>());
    }

    #[test]
    fn test_canonical_table_passes_runtime_validation() {
        let table = ScaleTable::canonical();
        let rebuilt = ScaleTable::new(table.scales().to_vec()).unwrap();
        assert_eq!(&rebuilt, table);
    }

    #[test]
    fn test_declaration_order() {
        let names = ScaleTable::canonical().names();
        assert_eq!(names.first(), Some(&"Exigências Quantitativas"));
        assert_eq!(names.last(), Some(&"Sintomas Depressivos"));
        assert_eq!(names[21], "Confiança Horizontal");
    }

    #[test]
    fn test_question_58_is_horizontal_trust() {
        let scale = ScaleTable::canonical().scale_of_question(58).unwrap();
        assert_eq!(scale.name, "Confiança Horizontal");
        assert_eq!(scale.question_numbers(), vec![58, 59, 60]);
    }

    #[test]
    fn test_rejects_out_of_bounds_index() {
        let err = ScaleTable::new(vec![ScaleDefinition::new(
            "Broken",
            vec![0, 84],
            Polarity::Risk,
        )])
        .unwrap_err();
        assert!(matches!(err, ScoringError::InvalidScaleTable(_)));
        assert!(err.to_string().contains("index 84"));
    }

    #[test]
    fn test_rejects_overlap_and_duplicates() {
        let overlap = ScaleTable::new(vec![
            ScaleDefinition::new("A", vec![0, 1], Polarity::Risk),
            ScaleDefinition::new("B", vec![1, 2], Polarity::Resource),
        ]);
        assert!(overlap.is_err());

        let duplicate = ScaleTable::new(vec![
            ScaleDefinition::new("A", vec![0], Polarity::Risk),
            ScaleDefinition::new("A", vec![1], Polarity::Risk),
        ]);
        assert!(duplicate.is_err());

        let empty = ScaleTable::new(vec![ScaleDefinition::new("A", vec![], Polarity::Risk)]);
        assert!(empty.is_err());
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: ScaleTable = serde_json::from_str(
            r#"{"scales":[{"name":"A","questions":[0,1],"polarity":"risk"}]}"#,
        )
        .unwrap();
        assert_eq!(ok.len(), 1);

        let bad = serde_json::from_str::<ScaleTable>(
            r#"{"scales":[{"name":"A","questions":[99],"polarity":"risk"}]}"#,
        );
        assert!(bad.is_err());
    }
}
