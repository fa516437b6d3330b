// Dashboard: read/select state over a RecommendationResponse plus the
// resume tools tab. No model calls originate here except through
// CareerAdvisor in resume_tools.

pub mod handlers;
pub mod resume_tools;
pub mod selection;
