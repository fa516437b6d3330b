pub mod ats;
pub mod career;
pub mod profile;
pub mod user;
