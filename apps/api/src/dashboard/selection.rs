//! Career selection and the match-vs-potential comparison chart.

use serde::{Deserialize, Serialize};

use crate::models::career::{CareerOption, RecommendationResponse};

/// Career with `id`, falling back to the first career. `None` only when the
/// list is empty.
pub fn select_default<'a>(
    careers: &'a [CareerOption],
    id: Option<&str>,
) -> Option<&'a CareerOption> {
    id.and_then(|id| careers.iter().find(|c| c.id == id))
        .or_else(|| careers.first())
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
    #[default]
    Careers,
    Resume,
}

/// Selection state of the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dashboard {
    pub tab: Tab,
    pub selected_id: Option<String>,
}

impl Dashboard {
    /// Career tab, first career selected.
    pub fn new(data: &RecommendationResponse) -> Self {
        Self {
            tab: Tab::Careers,
            selected_id: data.careers.first().map(|c| c.id.clone()),
        }
    }

    pub fn select(&mut self, id: &str) {
        self.selected_id = Some(id.to_string());
    }

    pub fn set_tab(&mut self, tab: Tab) {
        self.tab = tab;
    }

    pub fn selected<'a>(&self, data: &'a RecommendationResponse) -> Option<&'a CareerOption> {
        select_default(&data.careers, self.selected_id.as_deref())
    }

    pub fn view(&self, data: &RecommendationResponse) -> DashboardView {
        DashboardView {
            tab: self.tab,
            analysis: data.analysis.clone(),
            selected: self.selected(data).cloned(),
            comparison: comparison_data(data),
        }
    }
}

/// One bar pair of the comparison chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonPoint {
    /// First word of the title, e.g. "Fintech..."
    pub name: String,
    pub full_title: String,
    pub match_score: u8,
    /// Digits of `salaryRange.max` divided by 1000. `None` when the max
    /// carries no digits.
    pub salary_potential: Option<f64>,
}

fn short_name(title: &str) -> String {
    format!("{}...", title.split(' ').next().unwrap_or_default())
}

fn salary_potential(max: &str) -> Option<f64> {
    let digits: String = max.chars().filter(char::is_ascii_digit).collect();
    digits.parse::<f64>().ok().map(|n| n / 1000.0)
}

pub fn comparison_data(data: &RecommendationResponse) -> Vec<ComparisonPoint> {
    data.careers
        .iter()
        .map(|c| ComparisonPoint {
            name: short_name(&c.title),
            full_title: c.title.clone(),
            match_score: c.match_score,
            salary_potential: salary_potential(&c.salary_range.max),
        })
        .collect()
}

/// Serializable snapshot of what the dashboard shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    pub tab: Tab,
    pub analysis: String,
    pub selected: Option<CareerOption>,
    pub comparison: Vec<ComparisonPoint>,
}
