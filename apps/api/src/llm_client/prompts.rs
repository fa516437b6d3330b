// Shared prompt fragments.
// Each service that needs model calls defines its own prompts.rs alongside it.
// This file contains cross-cutting fragments.

/// Target market every prompt is framed against.
pub const MARKET_CONTEXT: &str = "India and Global";

/// Currency rule for any salary figure the model emits.
pub const CURRENCY_INSTRUCTION: &str = "\
    Currency: ALWAYS use INR (₹) for salary ranges. If a role is international \
    (e.g., remote US job), convert the salary estimate to INR. DO NOT use the '$' symbol.";
