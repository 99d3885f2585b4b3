//! The analysis result returned by the Analysis Service.
//!
//! Decoding is also validation: a payload that deserializes into `AnalysisResult`
//! has integer scores in `[0, 100]`, exactly the four breakdown categories, and no
//! suggestion entry for an unknown category. Anything else is rejected by serde.

use std::fmt;

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Categories
// ────────────────────────────────────────────────────────────────────────────

/// The closed set of scoring categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Grammar,
    Readability,
    Keywords,
    Structure,
}

impl Category {
    /// Fixed presentation order, used by every view and by the report.
    pub const ALL: [Category; 4] = [
        Category::Grammar,
        Category::Readability,
        Category::Keywords,
        Category::Structure,
    ];

    /// Wire key, as it appears in `breakdown` and `suggestions`.
    pub fn key(self) -> &'static str {
        match self {
            Category::Grammar => "grammar",
            Category::Readability => "readability",
            Category::Keywords => "keywords",
            Category::Structure => "structure",
        }
    }

    /// Capitalized display name.
    pub fn label(self) -> &'static str {
        match self {
            Category::Grammar => "Grammar",
            Category::Readability => "Readability",
            Category::Keywords => "Keywords",
            Category::Structure => "Structure",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Score
// ────────────────────────────────────────────────────────────────────────────

/// An integer score in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Score(u8);

impl Score {
    pub const MAX: u8 = 100;

    pub fn new(value: u8) -> Option<Self> {
        (value <= Self::MAX).then_some(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Score {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .ok()
            .and_then(Score::new)
            .ok_or_else(|| format!("score {value} is outside 0..=100"))
    }
}

impl From<Score> for u8 {
    fn from(score: Score) -> Self {
        score.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Result
// ────────────────────────────────────────────────────────────────────────────

/// Per-category scores. All four keys are required and no others are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Breakdown {
    pub grammar: Score,
    pub readability: Score,
    pub keywords: Score,
    pub structure: Score,
}

impl Breakdown {
    pub fn get(&self, category: Category) -> Score {
        match category {
            Category::Grammar => self.grammar,
            Category::Readability => self.readability,
            Category::Keywords => self.keywords,
            Category::Structure => self.structure,
        }
    }
}

/// Per-category remediation advice. A missing key reads as "no issue" (empty text);
/// a key naming an unknown category is rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Suggestions {
    #[serde(default)]
    pub grammar: String,
    #[serde(default)]
    pub readability: String,
    #[serde(default)]
    pub keywords: String,
    #[serde(default)]
    pub structure: String,
}

impl Suggestions {
    pub fn get(&self, category: Category) -> &str {
        match category {
            Category::Grammar => &self.grammar,
            Category::Readability => &self.readability,
            Category::Keywords => &self.keywords,
            Category::Structure => &self.structure,
        }
    }

    /// Returns the suggestion text only if it carries something after trimming.
    pub fn actionable(&self, category: Category) -> Option<&str> {
        let text = self.get(category);
        (!text.trim().is_empty()).then_some(text)
    }
}

/// The single domain entity: created by the gateway, stored once, read many times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub overall_score: Score,
    pub breakdown: Breakdown,
    #[serde(default)]
    pub suggestions: Suggestions,
}

impl AnalysisResult {
    /// Decodes a service or storage payload, rejecting any shape violation.
    pub fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
