//! Attribute Extractor — structured signals pulled from a candidate's
//! normalized text by fixed pattern rules.
//!
//! Three independent rule families run over the same text:
//! 1. Skill counts: literal substring occurrences per configured skill
//! 2. Numeric rules: labelled values such as `cgpa: 8.5`, absent when unmatched
//! 3. Experience classification: presence of the word "experience"
//!
//! All functions are pure. Input is expected to be normalized (lowercase).

use std::collections::BTreeMap;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Skills searched for when neither the request nor the environment names any.
pub const DEFAULT_SKILLS: &[&str] = &[
    "python",
    "java",
    "javascript",
    "sql",
    "machine learning",
    "data analysis",
    "excel",
    "aws",
    "docker",
    "communication",
    "leadership",
];

/// Field populated by the built-in CGPA rules.
pub const ACADEMIC_VALUE_FIELD: &str = "academic_value";

const EXPERIENCE_KEYWORD: &str = "experience";

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ExperienceCategory {
    Experienced,
    NotExperienced,
}

/// Everything the extractor derives from one candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeBundle {
    /// Every configured skill appears, with 0 when it never occurs.
    pub skills: BTreeMap<String, u32>,
    /// Keyed by rule name; `None` when the rule did not match.
    pub numeric: BTreeMap<String, Option<f64>>,
    pub academic_value: Option<f64>,
    pub experience_category: ExperienceCategory,
}

// ────────────────────────────────────────────────────────────────────────────
// Numeric rules
// ────────────────────────────────────────────────────────────────────────────

/// A labelled-number pattern. The first capture group must hold the number.
#[derive(Debug, Clone)]
pub struct NumericRule {
    name: String,
    field: String,
    pattern: Regex,
}

impl NumericRule {
    pub fn new(
        name: impl Into<String>,
        field: impl Into<String>,
        pattern: &str,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            name: name.into(),
            field: field.into(),
            pattern: Regex::new(pattern)?,
        })
    }

    /// `cgpa: 8.5`, `cgpa 9`, `cgpa - 7.25`, with an optional trailing `%`.
    pub fn cgpa() -> Self {
        Self::new(
            "cgpa",
            ACADEMIC_VALUE_FIELD,
            r"cgpa\s*[:\-]?\s*(\d+(?:\.\d+)?)\s*%?",
        )
        .expect("cgpa pattern is valid")
    }

    /// `cgpa: 8.5%` only; the percent sign is required.
    pub fn cgpa_percent() -> Self {
        Self::new(
            "cgpa_percent",
            ACADEMIC_VALUE_FIELD,
            r"cgpa\s*[:\-]?\s*(\d+(?:\.\d+)?)\s*%",
        )
        .expect("cgpa_percent pattern is valid")
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    /// Value of the first match, or `None`. A matched zero is `Some(0.0)`.
    pub fn extract(&self, text: &str) -> Option<f64> {
        self.pattern
            .captures(text)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse::<f64>().ok())
    }
}

pub fn default_rules() -> Vec<NumericRule> {
    vec![NumericRule::cgpa(), NumericRule::cgpa_percent()]
}

// ────────────────────────────────────────────────────────────────────────────
// Extractor
// ────────────────────────────────────────────────────────────────────────────

/// Skill list and numeric rules for one screening run.
#[derive(Debug, Clone)]
pub struct AttributeExtractor {
    skills: Vec<String>,
    rules: Vec<NumericRule>,
}

impl AttributeExtractor {
    /// Skills are lowercased and trimmed; blanks and duplicates are dropped.
    pub fn new<S: AsRef<str>>(skills: &[S], rules: Vec<NumericRule>) -> Self {
        let mut cleaned: Vec<String> = Vec::with_capacity(skills.len());
        for skill in skills {
            let skill = skill.as_ref().trim().to_lowercase();
            if !skill.is_empty() && !cleaned.contains(&skill) {
                cleaned.push(skill);
            }
        }
        Self {
            skills: cleaned,
            rules,
        }
    }

    pub fn with_default_rules<S: AsRef<str>>(skills: &[S]) -> Self {
        Self::new(skills, default_rules())
    }

    pub fn skills(&self) -> &[String] {
        &self.skills
    }

    #[allow(dead_code)]
    pub fn rules(&self) -> &[NumericRule] {
        &self.rules
    }

    pub fn extract(&self, text: &str) -> AttributeBundle {
        let numeric: BTreeMap<String, Option<f64>> = self
            .rules
            .iter()
            .map(|rule| (rule.name().to_string(), rule.extract(text)))
            .collect();

        // First registered rule for the field that matched.
        let academic_value = self
            .rules
            .iter()
            .filter(|rule| rule.field() == ACADEMIC_VALUE_FIELD)
            .find_map(|rule| numeric.get(rule.name()).copied().flatten());

        AttributeBundle {
            skills: count_skills(text, &self.skills),
            numeric,
            academic_value,
            experience_category: classify_experience(text),
        }
    }
}

/// Non-overlapping literal occurrences of each skill. Skills are counted
/// independently, so "java" also counts inside "javascript".
pub fn count_skills(text: &str, skills: &[String]) -> BTreeMap<String, u32> {
    skills
        .iter()
        .map(|skill| {
            let count = if skill.is_empty() {
                0
            } else {
                text.matches(skill.as_str()).count() as u32
            };
            (skill.clone(), count)
        })
        .collect()
}

/// Keyword presence only. "no experience" still classifies as Experienced.
pub fn classify_experience(text: &str) -> ExperienceCategory {
    if text.contains(EXPERIENCE_KEYWORD) {
        ExperienceCategory::Experienced
    } else {
        ExperienceCategory::NotExperienced
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
