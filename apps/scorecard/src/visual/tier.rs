use serde::Serialize;

/// Qualitative band of a score, driving colour and copy on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreTier {
    Excellent,
    Good,
    NeedsWork,
}

impl ScoreTier {
    pub fn from_score(score: u8) -> Self {
        match score {
            80..=u8::MAX => ScoreTier::Excellent,
            60..=79 => ScoreTier::Good,
            _ => ScoreTier::NeedsWork,
        }
    }

    /// Summary sentence shown under the overall score.
    pub fn headline(self) -> &'static str {
        match self {
            ScoreTier::Excellent => "Excellent! Your resume is well-optimized.",
            ScoreTier::Good => "Good foundation, but there's room for improvement.",
            ScoreTier::NeedsWork => {
                "Several areas need attention to make your resume more effective."
            }
        }
    }
}
