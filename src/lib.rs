// GPA Tracker - Core Library
// Exposes all modules for use in the terminal front end, web server, and tests

pub mod config;
pub mod engine;
pub mod error;
pub mod page;
pub mod routes;
pub mod student;

// Only compile the web server when the server feature is enabled
#[cfg(feature = "server")]
pub mod server;

// Re-export commonly used types
pub use config::AppConfig;
pub use engine::{
    add_course, classify_letter_grade, compute_gpa, grade_points, highest_course, highest_score,
    lowest_course, lowest_score, progress, record_score, remove_course, update_grade,
    weighted_gpa, LetterGrade, Mutation, Progress, ScoreExtreme,
};
pub use error::{GradeError, GradeResult};
pub use page::{Element, Page};
pub use routes::{dispatch, parse_query, parse_request, FormFields, Route};
pub use student::{Course, Student, MAX_GPA, PASSING_GPA};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Install the stderr log subscriber. `RUST_LOG` overrides `default_level`.
pub fn init_tracing(default_level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(env_filter)
        .init();
}
