//! Urgency classification for appointment reasons.
//!
//! Handles:
//! - Keyword triage (two ordered sets, high-urgency checked first)
//! - Time-window fallback (visits inside 24h bump to Medium)

use chrono::{DateTime, Duration, Utc};

use crate::models::Urgency;

/// Classifier mapping a free-text reason plus scheduling to a triage level.
///
/// Matching is a case-insensitive substring check against two fixed, ordered
/// keyword sets. The high-urgency set is checked first and the first match
/// wins, so a reason containing both a high and a medium keyword resolves
/// High. Pure and total: always returns a value.
pub struct UrgencyClassifier {
    /// High-urgency keywords, checked first
    high_keywords: Vec<String>,
    /// Medium-urgency keywords
    medium_keywords: Vec<String>,
}

impl Default for UrgencyClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl UrgencyClassifier {
    /// Create a classifier with the default keyword sets.
    pub fn new() -> Self {
        Self {
            high_keywords: Self::default_high_keywords(),
            medium_keywords: Self::default_medium_keywords(),
        }
    }

    /// Classify a reason for a visit scheduled at `scheduled_at`, as of `now`.
    pub fn classify(
        &self,
        reason: &str,
        scheduled_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Urgency {
        let reason = reason.to_lowercase();

        if self.high_keywords.iter().any(|k| reason.contains(k.as_str())) {
            return Urgency::High;
        }
        if self
            .medium_keywords
            .iter()
            .any(|k| reason.contains(k.as_str()))
        {
            return Urgency::Medium;
        }

        // No keyword matched: a visit inside the next 24 hours is Medium.
        let until = scheduled_at - now;
        if until > Duration::zero() && until < Duration::hours(24) {
            Urgency::Medium
        } else {
            Urgency::Low
        }
    }

    /// Add a custom high-urgency keyword.
    pub fn add_high_keyword(&mut self, keyword: &str) {
        self.high_keywords.push(keyword.to_lowercase());
    }

    /// Add a custom medium-urgency keyword.
    pub fn add_medium_keyword(&mut self, keyword: &str) {
        self.medium_keywords.push(keyword.to_lowercase());
    }

    /// Default high-urgency keywords. Unaccented variants are listed
    /// alongside the accented forms since booking text mixes both.
    fn default_high_keywords() -> Vec<String> {
        [
            "emergencia",
            "urgencia",
            "urgente",
            "dolor",
            "sangre",
            "sangrado",
            "accidente",
            "atropell",
            "envenena",
            "intoxica",
            "convulsi",
            "fractura",
            "no respira",
            "dificultad para respirar",
            "colapso",
        ]
        .into_iter()
        .map(String::from)
        .collect()
    }

    /// Default medium-urgency keywords.
    fn default_medium_keywords() -> Vec<String> {
        [
            "vómito",
            "vomito",
            "vomitando",
            "diarrea",
            "fiebre",
            "cojera",
            "cojeando",
            "herida",
            "infección",
            "infeccion",
            "no come",
            "decaído",
            "decaido",
            "picazón",
            "picazon",
        ]
        .into_iter()
        .map(String::from)
        .collect()
    }
}
