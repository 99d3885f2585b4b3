//! Results dashboard view-model: everything the results view renders, derived from
//! one stored `AnalysisResult`.

use serde::Serialize;

use super::ring::{ArcAnimation, RingGeometry};
use super::tier::ScoreTier;
use crate::models::{AnalysisResult, Category};

/// Shown on a category card whose suggestion is empty.
pub const NO_ISSUE_NOTE: &str = "Good performance in this category.";

#[derive(Debug, Serialize)]
pub struct ResultsDashboard {
    pub result: AnalysisResult,
    pub overall: OverallCard,
    pub categories: Vec<CategoryCard>,
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Serialize)]
pub struct OverallCard {
    pub score: u8,
    pub tier: ScoreTier,
    pub headline: &'static str,
    pub ring: RingGeometry,
    pub animation: ArcAnimation,
}

#[derive(Debug, Serialize)]
pub struct CategoryCard {
    pub category: Category,
    pub label: &'static str,
    pub score: u8,
    pub tier: ScoreTier,
    pub note: String,
}

#[derive(Debug, Serialize)]
pub struct Recommendation {
    pub category: Category,
    pub heading: String,
    pub text: String,
}

impl ResultsDashboard {
    pub fn build(result: AnalysisResult) -> Self {
        let overall_score = result.overall_score.value();
        let overall_tier = ScoreTier::from_score(overall_score);

        let categories = Category::ALL
            .iter()
            .map(|&category| {
                let score = result.breakdown.get(category).value();
                CategoryCard {
                    category,
                    label: category.label(),
                    score,
                    tier: ScoreTier::from_score(score),
                    note: result
                        .suggestions
                        .actionable(category)
                        .unwrap_or(NO_ISSUE_NOTE)
                        .to_string(),
                }
            })
            .collect();

        let recommendations = Category::ALL
            .iter()
            .filter_map(|&category| {
                result
                    .suggestions
                    .actionable(category)
                    .map(|text| Recommendation {
                        category,
                        heading: format!("{} Enhancement", category.label()),
                        text: text.to_string(),
                    })
            })
            .collect();

        Self {
            overall: OverallCard {
                score: overall_score,
                tier: overall_tier,
                headline: overall_tier.headline(),
                ring: RingGeometry::dashboard(overall_score),
                animation: ArcAnimation::default(),
            },
            categories,
            recommendations,
            result,
        }
    }
}
