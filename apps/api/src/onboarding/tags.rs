//! Preset tag vocabularies offered on the interests & skills step.

pub const INTEREST_TAGS: [&str; 16] = [
    "Technology",
    "Art & Design",
    "Medicine",
    "Finance",
    "Social Impact",
    "Writing",
    "Engineering",
    "Management",
    "Teaching",
    "Sports",
    "Gaming",
    "Environment",
    "Law",
    "Entrepreneurship",
    "Data Science",
    "Psychology",
];

pub const SKILL_TAGS: [&str; 14] = [
    "Communication",
    "Coding",
    "Problem Solving",
    "Leadership",
    "Mathematics",
    "Creativity",
    "Analysis",
    "Teamwork",
    "Public Speaking",
    "Research",
    "Project Management",
    "Design",
    "Sales",
    "Critical Thinking",
];
