//! CLI command implementations.

mod doctor;
mod research;

pub use doctor::run_doctor;
pub use research::run_research;
