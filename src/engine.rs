// 🧮 Grade Engine - letter grades, weighted GPA, progress queries
//
// Every mutation validates its input first and only then touches the
// Student, and every mutation that changes a grade recomputes
// `current_gpa` and `is_failing` together.

use crate::error::{parse_integer, parse_number, GradeError, GradeResult};
use crate::student::{round_to, Course, Student, PASSING_GPA};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// LETTER GRADES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LetterGrade {
    A,
    B,
    C,
    D,
    F,
}

impl LetterGrade {
    pub fn as_str(&self) -> &'static str {
        match self {
            LetterGrade::A => "A",
            LetterGrade::B => "B",
            LetterGrade::C => "C",
            LetterGrade::D => "D",
            LetterGrade::F => "F",
        }
    }

    pub fn grade_points(&self) -> f64 {
        match self {
            LetterGrade::A => 4.0,
            LetterGrade::B => 3.0,
            LetterGrade::C => 2.0,
            LetterGrade::D => 1.0,
            LetterGrade::F => 0.0,
        }
    }
}

impl fmt::Display for LetterGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a percentage after truncating it to a whole number.
///
/// | Whole percent | Letter |
/// |---------------|--------|
/// | 90 - 100      | A      |
/// | 80 - 89       | B      |
/// | 70 - 79       | C      |
/// | 60 - 69       | D      |
/// | 0 - 59        | F      |
///
/// Anything outside 0..=100 (after truncation) has no letter.
pub fn classify_letter_grade(percentage: f64) -> Option<LetterGrade> {
    if !percentage.is_finite() {
        return None;
    }

    match percentage.trunc() as i64 {
        90..=100 => Some(LetterGrade::A),
        80..=89 => Some(LetterGrade::B),
        70..=79 => Some(LetterGrade::C),
        60..=69 => Some(LetterGrade::D),
        0..=59 => Some(LetterGrade::F),
        _ => None,
    }
}

/// Grade points for a percentage grade. Same breakpoints as the letters,
/// but open-ended: 89.9 is a B, 105 still earns 4.0 and negatives earn 0.0.
pub fn grade_points(percentage: f64) -> f64 {
    if percentage >= 90.0 {
        4.0
    } else if percentage >= 80.0 {
        3.0
    } else if percentage >= 70.0 {
        2.0
    } else if percentage >= 60.0 {
        1.0
    } else {
        0.0
    }
}

// ============================================================================
// GPA
// ============================================================================

/// Credit-weighted GPA over the current courses, rounded to 2 places.
/// `None` when there is nothing to weight.
pub fn weighted_gpa(courses: &[Course]) -> Option<f64> {
    let total_credits: f64 = courses.iter().map(|c| c.credits as f64).sum();
    if total_credits == 0.0 {
        return None;
    }

    let total_points: f64 = courses
        .iter()
        .map(|c| grade_points(c.current_grade) * c.credits as f64)
        .sum();

    Some(round_to(total_points / total_credits, 2))
}

/// Recompute `current_gpa` and `is_failing` from the course list.
/// With no courses both are left as they are.
pub fn compute_gpa(student: &mut Student) {
    let Some(gpa) = weighted_gpa(&student.courses) else {
        return;
    };

    student.current_gpa = gpa;
    student.is_failing = gpa < PASSING_GPA;
    tracing::debug!(gpa, failing = student.is_failing, "GPA recomputed");
}

// ============================================================================
// MUTATIONS
// ============================================================================

/// Outcome of a mutation addressed by course name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Applied,
    CourseNotFound,
}

impl Mutation {
    pub fn applied(&self) -> bool {
        *self == Mutation::Applied
    }
}

/// Add a course with no test scores. Duplicate names are accepted.
/// Credits must be a positive whole number; zero or negative is `InvalidInput`.
pub fn add_course(
    student: &mut Student,
    name: &str,
    credits: &str,
    current_grade: &str,
) -> GradeResult<()> {
    let credits = parse_integer(credits)
        .filter(|c| *c > 0)
        .and_then(|c| u32::try_from(c).ok());
    let grade = parse_number(current_grade);

    let (Some(credits), Some(grade)) = (credits, grade) else {
        return Err(GradeError::InvalidInput);
    };

    student.courses.push(Course::new(name, credits, grade));
    tracing::debug!(course = name, credits, grade, "course added");

    compute_gpa(student);
    Ok(())
}

/// Remove the first course with this name. Its score history stays.
pub fn remove_course(student: &mut Student, name: &str) -> Mutation {
    let Some(index) = student.courses.iter().position(|c| c.name == name) else {
        return Mutation::CourseNotFound;
    };

    student.courses.remove(index);
    tracing::debug!(course = name, "course removed");

    compute_gpa(student);
    Mutation::Applied
}

/// Override the grade of every course with this name
pub fn update_grade(student: &mut Student, name: &str, new_grade: &str) -> GradeResult<Mutation> {
    let grade = parse_number(new_grade).ok_or(GradeError::InvalidGrade)?;

    let mut matched = false;
    for course in student.courses.iter_mut().filter(|c| c.name == name) {
        course.current_grade = grade;
        matched = true;
    }

    if !matched {
        return Ok(Mutation::CourseNotFound);
    }

    tracing::debug!(course = name, grade, "grade overridden");
    compute_gpa(student);
    Ok(Mutation::Applied)
}

/// Record a test score for every course with this name. The course grade
/// becomes the mean of its scores, rounded to 2 places.
pub fn record_score(student: &mut Student, name: &str, score: &str) -> GradeResult<Mutation> {
    let score = parse_number(score).ok_or(GradeError::InvalidScore)?;

    let Student {
        courses,
        score_history,
        ..
    } = student;

    let mut matched = false;
    for course in courses.iter_mut().filter(|c| c.name == name) {
        course.test_scores.push(score);
        score_history
            .entry(course.name.clone())
            .or_default()
            .push(score);

        let total: f64 = course.test_scores.iter().sum();
        course.current_grade = round_to(total / course.test_scores.len() as f64, 2);
        matched = true;
    }

    if !matched {
        return Ok(Mutation::CourseNotFound);
    }

    tracing::debug!(course = name, score, "test score recorded");
    compute_gpa(student);
    Ok(Mutation::Applied)
}

// ============================================================================
// QUERIES
// ============================================================================

/// A test score paired with the course it was recorded for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreExtreme {
    /// Score as a percentage label, e.g. "92.0%"
    pub label: String,
    pub course: String,
}

/// Highest recorded test score across the whole history.
///
/// The search starts from a floor of 0: if no score beats it, the result
/// is "0%" paired with the first current course (or "N/A"). `None` only
/// when no score was ever recorded.
pub fn highest_score(student: &Student) -> Option<ScoreExtreme> {
    score_extreme(student, 0.0, |score, best| score > best)
}

/// Lowest recorded test score across the whole history. Mirror image of
/// [`highest_score`] with a ceiling of 100.
pub fn lowest_score(student: &Student) -> Option<ScoreExtreme> {
    score_extreme(student, 100.0, |score, best| score < best)
}

fn score_extreme(
    student: &Student,
    bound: f64,
    beats: impl Fn(f64, f64) -> bool,
) -> Option<ScoreExtreme> {
    if student.score_history.is_empty() {
        return None;
    }

    let mut best: Option<(f64, &str)> = None;
    for (course, scores) in &student.score_history {
        for &score in scores {
            let current = best.map_or(bound, |(value, _)| value);
            if beats(score, current) {
                best = Some((score, course.as_str()));
            }
        }
    }

    Some(match best {
        Some((score, course)) => ScoreExtreme {
            label: percent_label(score),
            course: course.to_string(),
        },
        None => ScoreExtreme {
            label: format!("{}%", bound as i64),
            course: student
                .courses
                .first()
                .map_or_else(|| "N/A".to_string(), |c| c.name.clone()),
        },
    })
}

/// Course with the highest current grade; earliest course wins ties
pub fn highest_course(student: &Student) -> Option<&Course> {
    student
        .courses
        .iter()
        .reduce(|best, c| if c.current_grade > best.current_grade { c } else { best })
}

/// Course with the lowest current grade; earliest course wins ties
pub fn lowest_course(student: &Student) -> Option<&Course> {
    student
        .courses
        .iter()
        .reduce(|best, c| if c.current_grade < best.current_grade { c } else { best })
}

/// "92.0%" for whole numbers, shortest form otherwise
pub fn percent_label(value: f64) -> String {
    format!("{}%", display_number(value))
}

/// Whole numbers keep one decimal ("3.0"), others print in shortest form
pub fn display_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

// ============================================================================
// PROGRESS SUMMARY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    pub gpa: f64,
    pub target_gpa: f64,
    pub is_failing: bool,
    pub points_from_target: f64,
    pub highest_course: Option<Course>,
    pub lowest_course: Option<Course>,
    pub highest_score: Option<ScoreExtreme>,
    pub lowest_score: Option<ScoreExtreme>,
}

pub fn progress(student: &Student) -> Progress {
    Progress {
        gpa: student.current_gpa,
        target_gpa: student.target_gpa,
        is_failing: student.is_failing,
        points_from_target: student.points_from_target(),
        highest_course: highest_course(student).cloned(),
        lowest_course: lowest_course(student).cloned(),
        highest_score: highest_score(student),
        lowest_score: lowest_score(student),
    }
}

// ============================================================================
// TESTS
// ============================================================================
