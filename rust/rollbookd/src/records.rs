use crate::kv::KvStore;
use crate::model::{Attendance, AttendanceStatus, MarkEntry, Student, MAX_MARKS};
use crate::sample::{self, SampleSummary};
use crate::settings::{self, ReportSettings};
use crate::store::Store;
use rand::Rng;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("persistence failed: {0}")]
    Persistence(String),
}

impl RecordError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "bad_params",
            Self::NotFound(_) => "not_found",
            Self::Persistence(_) => "persist_failed",
        }
    }
}

impl From<anyhow::Error> for RecordError {
    fn from(e: anyhow::Error) -> Self {
        Self::Persistence(format!("{e:#}"))
    }
}

pub type RecordResult<T> = Result<T, RecordError>;

fn positive_u32(value: i64, what: &str) -> RecordResult<u32> {
    match u32::try_from(value) {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(RecordError::Validation(format!(
            "{} must be a positive integer",
            what
        ))),
    }
}

pub fn add_course(store: &mut Store, name: &str) -> RecordResult<String> {
    let name = name.trim();
    if name.is_empty() || store.has_course(name) {
        return Err(RecordError::Validation(
            "invalid or duplicate course".to_string(),
        ));
    }
    store.courses.push(name.to_string());
    Ok(name.to_string())
}

pub fn add_student(store: &mut Store, roll: i64, name: &str, semester: i64) -> RecordResult<Student> {
    let roll = positive_u32(roll, "roll")?;
    let name = name.trim();
    if name.is_empty() {
        return Err(RecordError::Validation("name must not be empty".to_string()));
    }
    let semester = positive_u32(semester, "semester")?;
    if store.has_student(roll) {
        return Err(RecordError::Validation(format!(
            "roll {} already exists; roll numbers must be unique",
            roll
        )));
    }
    let student = Student::new(roll, name, semester);
    store.students.push(student.clone());
    Ok(student)
}

/// Returns `None` (and changes nothing) when no student has `roll`.
pub fn mark_attendance(
    store: &mut Store,
    roll: i64,
    status: AttendanceStatus,
) -> RecordResult<Option<Student>> {
    let Some(student) = u32::try_from(roll)
        .ok()
        .and_then(|r| store.find_student_mut(r))
    else {
        return Ok(None);
    };
    let overflow =
        || RecordError::Validation(format!("attendance counter for roll {} is full", roll));
    let total = student.attendance.total.checked_add(1).ok_or_else(overflow)?;
    let present = match status {
        AttendanceStatus::Present => student
            .attendance
            .present
            .checked_add(1)
            .ok_or_else(overflow)?,
        AttendanceStatus::Absent => student.attendance.present,
    };
    student.attendance = Attendance { total, present };
    Ok(Some(student.clone()))
}

/// Upserts the mark for `course`; an existing entry keeps its position.
pub fn enter_marks(store: &mut Store, roll: i64, course: &str, marks: i64) -> RecordResult<Student> {
    let course = course.trim();
    if course.is_empty() {
        return Err(RecordError::Validation("course must not be empty".to_string()));
    }
    let marks = match u32::try_from(marks) {
        Ok(v) if v <= MAX_MARKS => v,
        _ => {
            return Err(RecordError::Validation(format!(
                "marks must be between 0 and {}",
                MAX_MARKS
            )))
        }
    };
    let student = u32::try_from(roll)
        .ok()
        .and_then(|r| store.find_student_mut(r))
        .ok_or_else(|| RecordError::NotFound(format!("no student with roll {}", roll)))?;

    match student.marks.iter_mut().find(|m| m.course == course) {
        Some(existing) => existing.marks = marks,
        None => student.marks.push(MarkEntry {
            course: course.to_string(),
            marks,
        }),
    }
    Ok(student.clone())
}

/// Owns the in-memory store together with the medium it persists to.
///
/// Every mutation goes through [`Gradebook::commit`]: the change is applied to
/// a copy, the copy is saved, and only then does it become the live store. A
/// failed validation or a failed save leaves the live store as it was.
pub struct Gradebook<K: KvStore> {
    kv: K,
    store: Store,
}

impl<K: KvStore> Gradebook<K> {
    pub fn open(kv: K) -> Self {
        let store = Store::load(&kv);
        tracing::debug!(
            students = store.students.len(),
            courses = store.courses.len(),
            "gradebook loaded"
        );
        Self { kv, store }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    #[cfg(test)]
    pub fn kv_mut(&mut self) -> &mut K {
        &mut self.kv
    }

    fn commit<T>(&mut self, apply: impl FnOnce(&mut Store) -> RecordResult<T>) -> RecordResult<T> {
        let mut next = self.store.clone();
        let out = apply(&mut next)?;
        next.save(&mut self.kv)?;
        self.store = next;
        Ok(out)
    }

    pub fn add_course(&mut self, name: &str) -> RecordResult<String> {
        let course = self.commit(|s| add_course(s, name))?;
        tracing::info!(course = %course, "course added");
        Ok(course)
    }

    pub fn add_student(&mut self, roll: i64, name: &str, semester: i64) -> RecordResult<Student> {
        let student = self.commit(|s| add_student(s, roll, name, semester))?;
        tracing::info!(roll = student.roll, name = %student.name, "student added");
        Ok(student)
    }

    pub fn mark_attendance(
        &mut self,
        roll: i64,
        status: AttendanceStatus,
    ) -> RecordResult<Option<Student>> {
        let known = u32::try_from(roll)
            .map(|r| self.store.has_student(r))
            .unwrap_or(false);
        if !known {
            tracing::debug!(roll, "attendance ignored for unknown roll");
            return Ok(None);
        }
        let student = self.commit(|s| mark_attendance(s, roll, status))?;
        if let Some(st) = &student {
            tracing::info!(roll = st.roll, name = %st.name, status = status.as_str(), "attendance marked");
        }
        Ok(student)
    }

    pub fn enter_marks(&mut self, roll: i64, course: &str, marks: i64) -> RecordResult<Student> {
        let student = self.commit(|s| enter_marks(s, roll, course, marks))?;
        tracing::info!(roll = student.roll, course = %course.trim(), marks, "marks entered");
        Ok(student)
    }

    pub fn generate_sample_data<R: Rng>(&mut self, rng: &mut R) -> RecordResult<SampleSummary> {
        let summary = self.commit(|s| Ok(sample::generate(s, rng)))?;
        tracing::info!(
            students_added = summary.students_added.len(),
            courses_added = summary.courses_added.len(),
            "sample data generated"
        );
        Ok(summary)
    }

    /// Swaps in both collections at once after checking them as a whole.
    pub fn replace_all(&mut self, incoming: Store) -> RecordResult<()> {
        crate::store::check_students(&incoming.students).map_err(RecordError::Validation)?;
        crate::store::check_courses(&incoming.courses).map_err(RecordError::Validation)?;
        self.commit(|s| {
            *s = incoming;
            Ok(())
        })?;
        tracing::info!(
            students = self.store.students.len(),
            courses = self.store.courses.len(),
            "store replaced"
        );
        Ok(())
    }

    pub fn report_settings(&self) -> ReportSettings {
        settings::load(&self.kv)
    }

    pub fn update_report_settings(
        &mut self,
        patch: &serde_json::Map<String, serde_json::Value>,
    ) -> RecordResult<ReportSettings> {
        let mut current = settings::load(&self.kv);
        current.apply_patch(patch).map_err(RecordError::Validation)?;
        settings::save(&mut self.kv, &current)?;
        tracing::info!(
            low_attendance_threshold = current.low_attendance_threshold,
            "report settings updated"
        );
        Ok(current)
    }
}
