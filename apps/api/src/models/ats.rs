use serde::{Deserialize, Serialize};

use crate::models::career::MAX_SCORE;

/// ATS audit of a pasted or uploaded resume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtsAnalysis {
    /// 0 – 100
    pub score: u8,
    pub summary: String,
    pub missing_keywords: Vec<String>,
    pub formatting_issues: Vec<String>,
    pub suggestions: Vec<String>,
    pub country_specific_advice: String,
}

impl AtsAnalysis {
    pub fn validate(&self) -> Result<(), String> {
        if self.score > MAX_SCORE {
            return Err(format!("ATS score {} exceeds {MAX_SCORE}", self.score));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ats_analysis_deserializes() {
        let json = r#"{
            "score": 64,
            "summary": "Decent structure",
            "missingKeywords": ["SQL"],
            "formattingIssues": [],
            "suggestions": ["Quantify impact"],
            "countrySpecificAdvice": "Skip the photo for USA"
        }"#;
        let analysis: AtsAnalysis = serde_json::from_str(json).unwrap();
        assert_eq!(analysis.score, 64);
        assert_eq!(analysis.missing_keywords, vec!["SQL"]);
        assert!(analysis.validate().is_ok());
    }

    #[test]
    fn test_score_above_100_fails_validation() {
        let analysis = AtsAnalysis {
            score: 101,
            summary: String::new(),
            missing_keywords: vec![],
            formatting_issues: vec![],
            suggestions: vec![],
            country_specific_advice: String::new(),
        };
        assert!(analysis.validate().is_err());
    }

    #[test]
    fn test_missing_field_fails() {
        let json = r#"{"score": 50, "summary": "x"}"#;
        assert!(serde_json::from_str::<AtsAnalysis>(json).is_err());
    }
}
