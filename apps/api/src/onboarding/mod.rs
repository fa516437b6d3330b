// Onboarding: the three-step profile wizard.
// Pure in-memory state; no I/O happens here.

pub mod form;
pub mod handlers;
pub mod tags;
