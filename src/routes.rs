// 🧭 Routes - named handlers that turn form fields into engine calls
//
// Every handler takes the Student plus the submitted fields and returns
// the next Page. Fields always arrive as raw strings; the engine does the
// parsing, and a rejected field yields an error page with the Student
// untouched.

use crate::engine::{
    self, classify_letter_grade, display_number, percent_label, Mutation, ScoreExtreme,
};
use crate::error::GradeError;
use crate::page::{Element, Page};
use crate::student::{Course, Student};
use std::collections::HashMap;

/// Submitted form fields by name
pub type FormFields = HashMap<String, String>;

// ============================================================================
// ROUTE TABLE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Index,
    Setup,
    StartApp,
    AddCourse,
    AppendCourse,
    RemoveCourse,
    DeleteCourse,
    ViewCourses,
    UpdateGrade,
    ChangeGrade,
    AddTestScore,
    AppendScore,
    ViewProgress,
}

impl Route {
    pub const ALL: [Route; 13] = [
        Route::Index,
        Route::Setup,
        Route::StartApp,
        Route::AddCourse,
        Route::AppendCourse,
        Route::RemoveCourse,
        Route::DeleteCourse,
        Route::ViewCourses,
        Route::UpdateGrade,
        Route::ChangeGrade,
        Route::AddTestScore,
        Route::AppendScore,
        Route::ViewProgress,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Route::Index => "index",
            Route::Setup => "setup",
            Route::StartApp => "start_app",
            Route::AddCourse => "add_course",
            Route::AppendCourse => "append_course",
            Route::RemoveCourse => "remove_course",
            Route::DeleteCourse => "delete_course",
            Route::ViewCourses => "view_courses",
            Route::UpdateGrade => "update_grade",
            Route::ChangeGrade => "change_grade",
            Route::AddTestScore => "add_test_score",
            Route::AppendScore => "append_score",
            Route::ViewProgress => "view_progress",
        }
    }

    /// Look a route up by its url name ("" and "/" mean index)
    pub fn from_name(name: &str) -> Option<Route> {
        let name = name.trim_matches('/');
        if name.is_empty() {
            return Some(Route::Index);
        }
        Route::ALL.into_iter().find(|r| r.as_str() == name)
    }

    pub fn url(&self) -> String {
        format!("/{}", self.as_str())
    }
}

fn button(label: &str, route: Route) -> Element {
    Element::button(label, route.url())
}

fn field<'a>(form: &'a FormFields, name: &str) -> &'a str {
    form.get(name).map(String::as_str).unwrap_or("")
}

// ============================================================================
// DISPATCH
// ============================================================================

pub fn dispatch(route: Route, student: &mut Student, form: &FormFields) -> Page {
    tracing::info!(route = route.as_str(), fields = form.len(), "dispatching");

    match route {
        Route::Index => index(student),
        Route::Setup => setup(),
        Route::StartApp => start_app(student, form),
        Route::AddCourse => add_course(),
        Route::AppendCourse => append_course(student, form),
        Route::RemoveCourse => remove_course(),
        Route::DeleteCourse => delete_course(student, form),
        Route::ViewCourses => view_courses(student),
        Route::UpdateGrade => update_grade(student),
        Route::ChangeGrade => change_grade(student, form),
        Route::AddTestScore => add_test_score(student),
        Route::AppendScore => append_score(student, form),
        Route::ViewProgress => view_progress(student),
    }
}

/// Page for a rejected submission: the message, a retry button and home
fn error_page(route: Route, err: GradeError, retry: (&str, Route)) -> Page {
    tracing::warn!(route = route.as_str(), error = %err, "input rejected");

    let mut content = vec![Element::text(err.to_string()), button(retry.0, retry.1)];
    if retry.1 != Route::Setup {
        content.push(button("Go to Home", Route::Index));
    }
    Page::new(content)
}

fn log_missing(route: Route, course: &str, outcome: Mutation) {
    if outcome == Mutation::CourseNotFound {
        tracing::debug!(route = route.as_str(), course, "no course with that name");
    }
}

// ============================================================================
// HOME + SETUP
// ============================================================================

fn index(student: &Student) -> Page {
    if !student.is_set_up() {
        return setup();
    }

    Page::new(vec![
        Element::header(format!("Welcome, {}.", student.name)),
        Element::text(format!("Your GPA: {}", display_number(student.current_gpa))),
        button("Add Course", Route::AddCourse),
        button("Remove Course", Route::RemoveCourse),
        button("View Courses", Route::ViewCourses),
        button("Add Test Score", Route::AddTestScore),
        button("View Progress", Route::ViewProgress),
    ])
}

fn setup() -> Page {
    Page::new(vec![
        Element::text("What's your name?"),
        Element::text_box("students_name", ""),
        Element::text("Current GPA:"),
        Element::text_box("students_GPA", "0.0"),
        Element::text("Target GPA:"),
        Element::text_box("students_target_GPA", "4.0"),
        button("Start", Route::StartApp),
    ])
}

fn start_app(student: &mut Student, form: &FormFields) -> Page {
    let result = student.start(
        field(form, "students_name"),
        field(form, "students_GPA"),
        field(form, "students_target_GPA"),
    );

    match result {
        Ok(()) => index(student),
        Err(err) => error_page(Route::StartApp, err, ("Back", Route::Setup)),
    }
}

// ============================================================================
// COURSES
// ============================================================================

fn add_course() -> Page {
    Page::new(vec![
        Element::text("Name of Course:"),
        Element::text_box("course_name", ""),
        Element::text("Number of Credits:"),
        Element::text_box("credits", "3"),
        Element::text("Current Grade:"),
        Element::text_box("current_grade", "100.0"),
        button("Add Course", Route::AppendCourse),
        button("Cancel", Route::Index),
    ])
}

fn append_course(student: &mut Student, form: &FormFields) -> Page {
    let result = engine::add_course(
        student,
        field(form, "course_name"),
        field(form, "credits"),
        field(form, "current_grade"),
    );

    match result {
        Ok(()) => index(student),
        Err(err) => error_page(Route::AppendCourse, err, ("Add Course", Route::AddCourse)),
    }
}

fn remove_course() -> Page {
    Page::new(vec![
        Element::text("Name of Course:"),
        Element::text_box("course_name", ""),
        button("Remove Course", Route::DeleteCourse),
        button("Cancel", Route::Index),
    ])
}

fn delete_course(student: &mut Student, form: &FormFields) -> Page {
    let name = field(form, "course_name");
    let outcome = engine::remove_course(student, name);
    log_missing(Route::DeleteCourse, name, outcome);
    index(student)
}

fn view_courses(student: &Student) -> Page {
    if student.courses.is_empty() {
        return Page::new(vec![
            Element::text("You currently have no courses added. Please add some to view them."),
            button("Add Course", Route::AddCourse),
            button("Go to Home", Route::Index),
        ]);
    }

    let letters: Vec<String> = student
        .courses
        .iter()
        .map(|c| {
            let letter = classify_letter_grade(c.current_grade)
                .map_or("N/A", |l| l.as_str());
            format!("{}: {}", c.name, letter)
        })
        .collect();
    let credits: Vec<String> = student.courses.iter().map(|c| c.credits.to_string()).collect();
    let grades: Vec<String> = student
        .courses
        .iter()
        .map(|c| display_number(c.current_grade))
        .collect();

    let mut content = vec![
        Element::text(format!("Courses: {}", letters.join(", "))),
        Element::text(format!("Credits: {}", credits.join(", "))),
        Element::text(format!("Grades: {}", grades.join(", "))),
        Element::text("Test Scores:"),
    ];
    for course in &student.courses {
        let scores: Vec<String> = course.test_scores.iter().map(|s| display_number(*s)).collect();
        let scores = if scores.is_empty() {
            "none yet".to_string()
        } else {
            scores.join(", ")
        };
        content.push(Element::text(format!("{} scores: {}", course.name, scores)));
    }
    content.push(button("Update a Grade", Route::UpdateGrade));
    content.push(button("Go to Home", Route::Index));

    Page::new(content)
}

fn update_grade(student: &Student) -> Page {
    Page::new(vec![
        Element::text("Which course's grade would you like to update?"),
        Element::select_box("updated_course", student.course_names()),
        Element::text("What is the new grade?"),
        Element::text_box("new_grade", ""),
        button("Update Grade", Route::ChangeGrade),
        button("Cancel", Route::Index),
    ])
}

fn change_grade(student: &mut Student, form: &FormFields) -> Page {
    let name = field(form, "updated_course");

    match engine::update_grade(student, name, field(form, "new_grade")) {
        Ok(outcome) => {
            log_missing(Route::ChangeGrade, name, outcome);
            index(student)
        }
        Err(err) => error_page(Route::ChangeGrade, err, ("Update a Grade", Route::UpdateGrade)),
    }
}

// ============================================================================
// TEST SCORES + PROGRESS
// ============================================================================

fn add_test_score(student: &Student) -> Page {
    if student.courses.is_empty() {
        return Page::new(vec![
            Element::text(
                "You currently have no courses added. Please add some to add test scores.",
            ),
            button("Add Course", Route::AddCourse),
            button("Go to Home", Route::Index),
        ]);
    }

    Page::new(vec![
        Element::text("Which course is this test score for?"),
        Element::select_box("course_for_score", student.course_names()),
        Element::text("What is the test score?"),
        Element::text_box("test_score", ""),
        button("Add Test Score", Route::AppendScore),
        button("Cancel", Route::Index),
    ])
}

fn append_score(student: &mut Student, form: &FormFields) -> Page {
    let name = field(form, "course_for_score");

    match engine::record_score(student, name, field(form, "test_score")) {
        Ok(outcome) => {
            log_missing(Route::AppendScore, name, outcome);
            index(student)
        }
        Err(err) => error_page(Route::AppendScore, err, ("Add Test Score", Route::AddTestScore)),
    }
}

fn view_progress(student: &Student) -> Page {
    let progress = engine::progress(student);

    let status = if progress.is_failing {
        "failing. You need to lock in!"
    } else {
        "passing. Good job!"
    };

    let course_line = |label: &str, course: Option<&Course>| match course {
        Some(c) => format!("{}: {} ({})", label, c.name, percent_label(c.current_grade)),
        None => format!("{}: N/A", label),
    };
    let score_line = |label: &str, score: Option<&ScoreExtreme>| match score {
        Some(s) => format!("{}: {} ({})", label, s.label, s.course),
        None => format!("{}: N/A", label),
    };

    Page::new(vec![
        Element::text(format!("Your GPA is {}.", display_number(progress.gpa))),
        Element::text(format!("You are currently {}", status)),
        Element::text(format!(
            "You are {} points away from your target GPA ({}).",
            display_number(progress.points_from_target),
            display_number(progress.target_gpa)
        )),
        Element::text(course_line(
            "Your course with the highest grade",
            progress.highest_course.as_ref(),
        )),
        Element::text(course_line(
            "Your course with the lowest grade",
            progress.lowest_course.as_ref(),
        )),
        Element::text(score_line("Highest test score", progress.highest_score.as_ref())),
        Element::text(score_line("Lowest test score", progress.lowest_score.as_ref())),
        button("Go to Home", Route::Index),
    ])
}

// ============================================================================
// REQUEST LINES
// ============================================================================

/// Decode `a=1&b=two%20words` into form fields. `+` is a space.
pub fn parse_query(query: &str) -> FormFields {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode_component(key), decode_component(value))
        })
        .collect()
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|s| s.into_owned())
        .unwrap_or(spaced)
}

/// Split `route?query` into the route name and its fields
pub fn parse_request(line: &str) -> (&str, FormFields) {
    match line.trim().split_once('?') {
        Some((route, query)) => (route, parse_query(query)),
        None => (line.trim(), FormFields::new()),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn form(pairs: &[(&str, &str)]) -> FormFields {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn started() -> Student {
        let mut student = Student::default();
        dispatch(
            Route::StartApp,
            &mut student,
            &form(&[
                ("students_name", "ryder"),
                ("students_GPA", "3.5"),
                ("students_target_GPA", "4.0"),
            ]),
        );
        student
    }

    #[test]
    fn test_route_names_round_trip() {
        for route in Route::ALL {
            assert_eq!(Route::from_name(route.as_str()), Some(route));
            assert_eq!(Route::from_name(&route.url()), Some(route));
        }
        assert_eq!(Route::from_name(""), Some(Route::Index));
        assert_eq!(Route::from_name("/"), Some(Route::Index));
        assert_eq!(Route::from_name("drop_tables"), None);
    }

    #[test]
    fn test_index_shows_setup_until_started() {
        let mut student = Student::default();
        let page = dispatch(Route::Index, &mut student, &FormFields::new());
        assert_eq!(page.texts()[0], "What's your name?");

        let mut student = started();
        let page = dispatch(Route::Index, &mut student, &FormFields::new());
        assert_eq!(page.texts(), vec!["Welcome, ryder.", "Your GPA: 3.5"]);
        assert_eq!(page.button_urls().len(), 5);
    }

    #[test]
    fn test_start_app_rejects_bad_name() {
        let mut student = Student::default();
        let page = dispatch(
            Route::StartApp,
            &mut student,
            &form(&[
                ("students_name", "ry3"),
                ("students_GPA", "3.0"),
                ("students_target_GPA", "4.0"),
            ]),
        );

        assert_eq!(page.texts(), vec!["Please enter a valid name (letters and spaces only)."]);
        assert_eq!(page.button_urls(), vec!["/setup"]);
        assert!(!student.is_set_up());
    }

    #[test]
    fn test_append_course_and_error_page() {
        let mut student = started();

        let page = dispatch(
            Route::AppendCourse,
            &mut student,
            &form(&[("course_name", "CISC108"), ("credits", "3"), ("current_grade", "92")]),
        );
        assert_eq!(page.texts()[1], "Your GPA: 4.0");
        assert_eq!(student.courses.len(), 1);

        let page = dispatch(
            Route::AppendCourse,
            &mut student,
            &form(&[("course_name", "MATH241"), ("credits", "x"), ("current_grade", "80")]),
        );
        assert_eq!(page.texts(), vec!["Invalid input(s). Please try again."]);
        assert_eq!(page.button_urls(), vec!["/add_course", "/index"]);
        assert_eq!(student.courses.len(), 1);
    }

    #[test]
    fn test_missing_fields_are_invalid() {
        let mut student = started();
        let page = dispatch(Route::AppendScore, &mut student, &FormFields::new());
        assert_eq!(page.texts(), vec!["Invalid test score input. Please try again."]);
    }

    #[test]
    fn test_view_courses() {
        let mut student = started();
        let page = dispatch(Route::ViewCourses, &mut student, &FormFields::new());
        assert_eq!(
            page.texts(),
            vec!["You currently have no courses added. Please add some to view them."]
        );

        engine::add_course(&mut student, "CISC108", "3", "92").unwrap();
        engine::add_course(&mut student, "MATH241", "4", "75.5").unwrap();
        engine::record_score(&mut student, "MATH241", "75.5").unwrap();

        let page = dispatch(Route::ViewCourses, &mut student, &FormFields::new());
        let texts = page.texts();
        assert_eq!(texts[0], "Courses: CISC108: A, MATH241: C");
        assert_eq!(texts[1], "Credits: 3, 4");
        assert_eq!(texts[2], "Grades: 92.0, 75.5");
        assert_eq!(texts[4], "CISC108 scores: none yet");
        assert_eq!(texts[5], "MATH241 scores: 75.5");
    }

    #[test]
    fn test_change_grade_and_delete_course() {
        let mut student = started();
        engine::add_course(&mut student, "CISC108", "3", "92").unwrap();

        dispatch(
            Route::ChangeGrade,
            &mut student,
            &form(&[("updated_course", "CISC108"), ("new_grade", "65")]),
        );
        assert_eq!(student.current_gpa, 1.0);
        assert!(student.is_failing);

        let page = dispatch(
            Route::ChangeGrade,
            &mut student,
            &form(&[("updated_course", "CISC108"), ("new_grade", "sixty")]),
        );
        assert_eq!(page.texts(), vec!["Invalid grade input. Please try again."]);

        dispatch(Route::DeleteCourse, &mut student, &form(&[("course_name", "nope")]));
        assert_eq!(student.courses.len(), 1);

        dispatch(Route::DeleteCourse, &mut student, &form(&[("course_name", "CISC108")]));
        assert!(student.courses.is_empty());
    }

    #[test]
    fn test_add_test_score_page_lists_courses() {
        let mut student = started();
        let page = dispatch(Route::AddTestScore, &mut student, &FormFields::new());
        assert_eq!(page.button_urls(), vec!["/add_course", "/index"]);

        engine::add_course(&mut student, "CISC108", "3", "92").unwrap();
        let page = dispatch(Route::AddTestScore, &mut student, &FormFields::new());
        assert!(page.content.contains(&Element::select_box(
            "course_for_score",
            vec!["CISC108".to_string()]
        )));
    }

    #[test]
    fn test_view_progress() {
        let mut student = started();
        let page = dispatch(Route::ViewProgress, &mut student, &FormFields::new());
        assert_eq!(
            page.texts(),
            vec![
                "Your GPA is 3.5.",
                "You are currently passing. Good job!",
                "You are 0.5 points away from your target GPA (4.0).",
                "Your course with the highest grade: N/A",
                "Your course with the lowest grade: N/A",
                "Highest test score: N/A",
                "Lowest test score: N/A",
            ]
        );

        engine::add_course(&mut student, "CISC108", "3", "100").unwrap();
        engine::add_course(&mut student, "MATH241", "3", "100").unwrap();
        engine::record_score(&mut student, "CISC108", "88").unwrap();
        engine::record_score(&mut student, "MATH241", "55").unwrap();

        let page = dispatch(Route::ViewProgress, &mut student, &FormFields::new());
        let texts = page.texts();
        assert_eq!(texts[0], "Your GPA is 1.5.");
        assert_eq!(texts[1], "You are currently failing. You need to lock in!");
        assert_eq!(texts[3], "Your course with the highest grade: CISC108 (88.0%)");
        assert_eq!(texts[4], "Your course with the lowest grade: MATH241 (55.0%)");
        assert_eq!(texts[5], "Highest test score: 88.0% (CISC108)");
        assert_eq!(texts[6], "Lowest test score: 55.0% (MATH241)");
    }

    #[test]
    fn test_parse_request() {
        let (route, fields) =
            parse_request("append_course?course_name=Intro+to%20CS&credits=3&current_grade=");
        assert_eq!(route, "append_course");
        assert_eq!(fields["course_name"], "Intro to CS");
        assert_eq!(fields["credits"], "3");
        assert_eq!(fields["current_grade"], "");

        let (route, fields) = parse_request("  view_progress ");
        assert_eq!(route, "view_progress");
        assert!(fields.is_empty());
    }
}
