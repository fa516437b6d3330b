use serde::{Deserialize, Serialize};

/// Highest score the model may assign to a match or an ATS audit.
pub const MAX_SCORE: u8 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketDemand {
    High,
    Medium,
    Low,
}

impl MarketDemand {
    pub const ALL: [&'static str; 3] = ["High", "Medium", "Low"];
}

/// Salary bounds as the model wrote them, e.g. "₹6,00,000" / "₹12 LPA".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryRange {
    pub min: String,
    pub max: String,
    pub currency: String,
}

/// One step of a career roadmap. Position in the roadmap is meaningful.
/// The schema leaves every field optional, so absent ones read as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoadmapStep {
    pub title: String,
    pub description: String,
    pub duration: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerOption {
    pub id: String,
    pub title: String,
    /// 0 – 100
    pub match_score: u8,
    pub description: String,
    pub salary_range: SalaryRange,
    pub market_demand: MarketDemand,
    /// Free text, e.g. "+15% YoY"
    pub growth_trend: String,
    pub required_skills: Vec<String>,
    pub roadmap: Vec<RoadmapStep>,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
}

/// Model output for the career recommendation request.
/// Four careers are requested; the count is not enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub analysis: String,
    pub careers: Vec<CareerOption>,
}

impl RecommendationResponse {
    /// Checks the constraints serde cannot express.
    pub fn validate(&self) -> Result<(), String> {
        for career in &self.careers {
            if career.match_score > MAX_SCORE {
                return Err(format!(
                    "career '{}' has matchScore {} (max {MAX_SCORE})",
                    career.id, career.match_score
                ));
            }
        }
        Ok(())
    }
}
