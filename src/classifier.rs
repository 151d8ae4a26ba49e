//! Tier classification
//!
//! Maps a scale mean and its polarity to a display tier, a color token and an
//! annotated value. Thresholds are fixed for every scale.

use crate::scales::{ScaleDefinition, ScaleTable};
use crate::types::{Band, Classification, Locale, Polarity, Tier, TierColor};

/// Upper bound (inclusive) of the low band
pub const LOW_BAND_MAX: f64 = 33.3;

/// Upper bound (inclusive) of the middle band
pub const MIDDLE_BAND_MAX: f64 = 66.6;

/// Annotation used when a scale has no score
pub const NOT_AVAILABLE: &str = "N/A";

/// Round to the one decimal shown in annotations
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Band of a 0-100 mean, judged on the value as displayed (one decimal)
pub fn band(value: f64) -> Band {
    let value = round1(value);
    if value <= LOW_BAND_MAX {
        Band::Low
    } else if value <= MIDDLE_BAND_MAX {
        Band::Middle
    } else {
        Band::High
    }
}

impl Tier {
    /// Interpret a band according to polarity
    pub fn from_band(band: Band, polarity: Polarity) -> Self {
        match (polarity, band) {
            (Polarity::Risk, Band::Low) => Tier::LowRisk,
            (Polarity::Risk, Band::High) => Tier::HighRisk,
            (Polarity::Resource, Band::Low) => Tier::Critical,
            (Polarity::Resource, Band::High) => Tier::Favorable,
            (_, Band::Middle) => Tier::Attention,
        }
    }

    pub fn color(&self) -> TierColor {
        match self {
            Tier::LowRisk | Tier::Favorable => TierColor::FavorableGreen,
            Tier::Attention => TierColor::AttentionYellow,
            Tier::HighRisk | Tier::Critical => TierColor::CriticalRed,
            Tier::NotAvailable => TierColor::NeutralGray,
        }
    }

    pub fn label(&self, locale: Locale) -> &'static str {
        match (locale, self) {
            (Locale::Pt, Tier::LowRisk) => "Baixo Risco",
            (Locale::Pt, Tier::Attention) => "Atenção",
            (Locale::Pt, Tier::HighRisk) => "Alto Risco",
            (Locale::Pt, Tier::Critical) => "Crítico",
            (Locale::Pt, Tier::Favorable) => "Favorável",
            (Locale::En, Tier::LowRisk) => "Low Risk",
            (Locale::En, Tier::Attention) => "Attention",
            (Locale::En, Tier::HighRisk) => "High Risk",
            (Locale::En, Tier::Critical) => "Critical",
            (Locale::En, Tier::Favorable) => "Favorable",
            (_, Tier::NotAvailable) => NOT_AVAILABLE,
        }
    }
}

/// Classifier for scale results
#[derive(Debug, Clone, Copy, Default)]
pub struct Classifier {
    locale: Locale,
}

impl Classifier {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Classify a score with a known polarity
    pub fn classify_polarity(&self, polarity: Polarity, score: Option<f64>) -> Classification {
        let Some(value) = score.filter(|v| v.is_finite()) else {
            return Classification {
                tier: Tier::NotAvailable,
                color: TierColor::NeutralGray,
                annotation: NOT_AVAILABLE.to_string(),
            };
        };

        let shown = round1(value);
        let tier = Tier::from_band(band(shown), polarity);
        Classification {
            tier,
            color: tier.color(),
            annotation: format!("{:.1} ({})", shown, tier.label(self.locale)),
        }
    }

    /// Classify a scale result
    pub fn classify(&self, scale: &ScaleDefinition, score: Option<f64>) -> Classification {
        self.classify_polarity(scale.polarity, score)
    }

    /// Classify by scale name against the canonical table. Names missing from
    /// the table are treated as resource scales.
    pub fn classify_named(&self, name: &str, score: Option<f64>) -> Classification {
        let polarity = ScaleTable::canonical()
            .get(name)
            .map(|s| s.polarity)
            .unwrap_or(Polarity::Resource);
        self.classify_polarity(polarity, score)
    }
}

/// Classify with Portuguese labels
pub fn classify(scale: &ScaleDefinition, score: Option<f64>) -> Classification {
    Classifier::default().classify(scale, score)
}
