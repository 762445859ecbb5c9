// 🎓 Student + Course - the single-session aggregate
//
// The Student owns every Course. `score_history` duplicates each course's
// test scores on purpose: entries outlive course removal, so the
// highest/lowest score queries still see scores from dropped courses.

use crate::error::{parse_number, GradeError, GradeResult};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Lowest GPA that still counts as passing
pub const PASSING_GPA: f64 = 2.0;

/// Highest GPA accepted by the setup form
pub const MAX_GPA: f64 = 4.0;

// ============================================================================
// COURSE
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    /// Course name, matched exactly (case-sensitive)
    pub name: String,

    /// Credit-hour weight
    pub credits: u32,

    /// Authoritative percentage grade used for GPA and letter grade
    pub current_grade: f64,

    /// Recorded test scores in recording order
    pub test_scores: Vec<f64>,
}

impl Course {
    pub fn new(name: impl Into<String>, credits: u32, current_grade: f64) -> Self {
        Course {
            name: name.into(),
            credits,
            current_grade,
            test_scores: Vec::new(),
        }
    }
}

// ============================================================================
// STUDENT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub name: String,
    pub current_gpa: f64,
    pub target_gpa: f64,
    pub is_failing: bool,
    pub courses: Vec<Course>,

    /// Every score ever recorded, keyed by course name in first-recorded order
    pub score_history: IndexMap<String, Vec<f64>>,
}

impl Default for Student {
    fn default() -> Self {
        Student {
            name: String::new(),
            current_gpa: 0.0,
            target_gpa: MAX_GPA,
            is_failing: false,
            courses: Vec::new(),
            score_history: IndexMap::new(),
        }
    }
}

impl Student {
    /// True once the setup form has recorded a name
    pub fn is_set_up(&self) -> bool {
        !self.name.is_empty()
    }

    /// Apply the setup form. All three fields are validated before
    /// anything is written.
    pub fn start(&mut self, name: &str, gpa: &str, target_gpa: &str) -> GradeResult<()> {
        if !is_valid_name(name) {
            return Err(GradeError::InvalidName);
        }

        let current = parse_gpa(gpa)?;
        let target = parse_gpa(target_gpa)?;

        self.name = name.to_string();
        self.current_gpa = current;
        self.target_gpa = target;
        self.is_failing = current < PASSING_GPA;

        tracing::debug!(student = %self.name, gpa = current, target = target, "session started");
        Ok(())
    }

    /// Distance to the target GPA, rounded to one decimal place.
    /// Negative once the target has been passed.
    pub fn points_from_target(&self) -> f64 {
        round_to(self.target_gpa - self.current_gpa, 1)
    }

    /// First course with this exact name
    pub fn course(&self, name: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.name == name)
    }

    pub fn course_names(&self) -> Vec<String> {
        self.courses.iter().map(|c| c.name.clone()).collect()
    }
}

/// Letters and spaces only, with at least one letter
fn is_valid_name(name: &str) -> bool {
    let mut letters = name.chars().filter(|c| *c != ' ').peekable();
    letters.peek().is_some() && letters.all(char::is_alphabetic)
}

fn parse_gpa(raw: &str) -> GradeResult<f64> {
    match parse_number(raw) {
        Some(gpa) if (0.0..=MAX_GPA).contains(&gpa) => Ok(gpa),
        _ => Err(GradeError::InvalidGpa),
    }
}

/// Round to `places` decimal places, halves to even (2.125 -> 2.12)
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round_ties_even() / factor
}

// ============================================================================
// TESTS
// ============================================================================
