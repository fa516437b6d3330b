// All prompt templates for the guidance module.
// Reuses cross-cutting fragments from llm_client::prompts.

/// System instruction for career recommendations.
/// Replace: {market}, {currency_instruction}
pub const CAREER_SYSTEM_TEMPLATE: &str = r#"You are an expert career counselor and labor market analyst specializing in the Indian Job Market and Global Trends (2024-2025).
Your goal is to provide highly personalized, data-driven career advice for students and job seekers from ALL backgrounds (Science, Commerce, Arts, Humanities, Vocational).

The user is either:
1. A student who just finished 12th grade (Post 12th). They need advice on Majors, Degrees, and long-term career paths.
2. A Graduate/Job Seeker. They need advice on specific Job Roles, Upskilling, and immediate career pivoting.

Context & Constraints:
- Primary Market: {market}.
- {currency_instruction}
- Salaries: Be realistic for the Indian market context (e.g., Entry level B.Tech vs B.A.).
- Diversity: Suggest paths relevant to their specific academic stream (e.g., if Arts, suggest Journalism, Design, Policy, etc., not just Tech)."#;

/// Career recommendation prompt. Replace: {user_context}
pub const CAREER_PROMPT_TEMPLATE: &str = r#"Based on the profile below, analyze their potential and suggest 4 distinct career paths.

1. "Safe/Traditional": A steady path with good job security in India.
2. "Ambitious/High Growth": High paying, trending, competitive (e.g., AI, Fintech, Specialized Law).
3. "Creative/Alternative": Non-traditional or passion-based.
4. "Global/Remote Friendly": A path that allows working for international clients or migration.

{user_context}"#;

/// Profile block embedded in the career prompt.
/// Replace: {name}, {stage}, {academic_background}, {grades}, {interests}, {skills},
/// {work_environment}
pub const USER_CONTEXT_TEMPLATE: &str = r#"User Profile:
- Name: {name}
- Stage: {stage}
- Academic Background: {academic_background}
- Grades/Performance: {grades}
- Interests: {interests}
- Skills: {skills}
- Work Environment Preference: {work_environment}"#;

/// Resume draft prompt (plain Markdown output, no schema).
/// Replace: {market}, {name}, {stage}, {academic_background}, {grades}, {skills}, {interests}
pub const RESUME_PROMPT_TEMPLATE: &str = r#"Create a professional, ATS-friendly Resume/CV structure in Markdown format for the following user.
Context: They are looking for opportunities in the {market} market.

Profile:
- Name: {name}
- Stage: {stage}
- Academics: {academic_background} ({grades})
- Skills: {skills}
- Interests: {interests}

Instructions:
- Use standard ATS headings (Summary, Education, Skills, Projects/Experience).
- Write a compelling Professional Summary.
- If they are a student (Post 12th), focus on Education, key coursework, and extra-curriculars.
- If they are a graduate, include placeholder sections for "Experience" with tips on what to write.
- Format neatly with Markdown."#;

/// Returned when the model answers the resume prompt with an empty body.
pub const RESUME_FALLBACK: &str = "Could not generate resume.";

/// ATS audit prompt. Replace: {country}, {resume_text}
pub const ATS_PROMPT_TEMPLATE: &str = r#"Act as an advanced Application Tracking System (ATS) and Recruiter for {country}.
Analyze the following resume text.

Criteria:
- Keyword density and relevance (General professional standards).
- Formatting and Readability (Structure).
- Impact verbs and quantification.
- Specific norms for {country} (e.g., Photo usage, personal details, length).

Resume Text:
"{resume_text}""#;
