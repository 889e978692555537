use crate::calc;
use crate::model::{MarkEntry, Student};
use crate::settings::ReportSettings;
use crate::store::Store;
use serde::Serialize;

pub const NO_STUDENTS_MESSAGE: &str = "No students added yet. Add students first!";
const NO_MARKS_CARD: &str = "None";
const NO_MARKS_REPORT: &str = "No marks entered yet";
const NO_COURSES: &str = "None";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentCard {
    pub roll: u32,
    pub name: String,
    pub semester: u32,
    pub present: u32,
    pub total: u32,
    pub attendance_percentage: f64,
    pub average_marks: f64,
    pub remark: &'static str,
    pub low_attendance: bool,
    pub marks_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentOption {
    pub roll: u32,
    pub label: String,
}

fn marks_summary(marks: &[MarkEntry]) -> Option<String> {
    if marks.is_empty() {
        return None;
    }
    Some(
        marks
            .iter()
            .map(|m| format!("{}: {}", m.course, m.marks))
            .collect::<Vec<_>>()
            .join(", "),
    )
}

fn low_attendance_warning(threshold: f64) -> String {
    format!("Warning: Attendance below {}%!", threshold)
}

pub fn student_card(student: &Student, settings: &ReportSettings) -> StudentCard {
    let pct = calc::attendance_percentage(&student.attendance);
    let avg = calc::average_marks(&student.marks);
    let low = calc::is_low_attendance(pct, settings.low_attendance_threshold);
    StudentCard {
        roll: student.roll,
        name: student.name.clone(),
        semester: student.semester,
        present: student.attendance.present,
        total: student.attendance.total,
        attendance_percentage: pct,
        average_marks: avg,
        remark: calc::remark(avg).as_str(),
        low_attendance: low,
        marks_text: marks_summary(&student.marks).unwrap_or_else(|| NO_MARKS_CARD.to_string()),
        warning: low.then(|| low_attendance_warning(settings.low_attendance_threshold)),
    }
}

pub fn student_cards(store: &Store, settings: &ReportSettings) -> Vec<StudentCard> {
    store
        .students
        .iter()
        .map(|s| student_card(s, settings))
        .collect()
}

/// Selection entries labelled "roll - name", in store order.
pub fn student_options(store: &Store) -> Vec<StudentOption> {
    store
        .students
        .iter()
        .map(|s| StudentOption {
            roll: s.roll,
            label: format!("{} - {}", s.roll, s.name),
        })
        .collect()
}

pub fn course_list_text(store: &Store) -> String {
    if store.courses.is_empty() {
        return NO_COURSES.to_string();
    }
    store.courses.join(", ")
}

fn report_block(student: &Student, settings: &ReportSettings) -> String {
    let card = student_card(student, settings);
    let mut attendance_line = format!(
        "Attendance: {}/{} ({:.2}%)",
        card.present, card.total, card.attendance_percentage
    );
    if let Some(w) = &card.warning {
        attendance_line.push(' ');
        attendance_line.push_str(w);
    }
    let marks = marks_summary(&student.marks).unwrap_or_else(|| NO_MARKS_REPORT.to_string());
    format!(
        "Student: {} (Roll: {}, Semester: {})\n{}\nAverage Marks: {:.2} - Remarks: {}\nMarks: {}\n",
        card.name, card.roll, card.semester, attendance_line, card.average_marks, card.remark, marks
    )
}

/// Narrative report for every student, one block each separated by a blank line.
pub fn full_report(store: &Store, settings: &ReportSettings) -> String {
    if store.students.is_empty() {
        return NO_STUDENTS_MESSAGE.to_string();
    }
    store
        .students
        .iter()
        .map(|s| report_block(s, settings))
        .collect::<Vec<_>>()
        .join("\n")
}
