use crate::kv::KvStore;
use crate::model::{Student, MAX_MARKS};
use anyhow::Context;
use serde::de::DeserializeOwned;
use std::collections::HashSet;

pub const STUDENTS_SLOT: &str = "students";
pub const COURSES_SLOT: &str = "courses";

/// The two root collections. Insertion order is display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Store {
    pub students: Vec<Student>,
    pub courses: Vec<String>,
}

impl Store {
    /// Reads both slots. Never fails: an absent, unreadable or malformed slot
    /// loads as an empty collection.
    pub fn load(kv: &dyn KvStore) -> Self {
        let students = load_slot::<Vec<Student>>(kv, STUDENTS_SLOT, |v| check_students(v))
            .unwrap_or_default();
        let courses =
            load_slot::<Vec<String>>(kv, COURSES_SLOT, |v| check_courses(v)).unwrap_or_default();
        Self { students, courses }
    }

    /// Overwrites both slots with the full collections.
    pub fn save(&self, kv: &mut dyn KvStore) -> anyhow::Result<()> {
        let (students, courses) = self.to_json()?;
        kv.set_all(&[(STUDENTS_SLOT, &students), (COURSES_SLOT, &courses)])
    }

    pub fn to_json(&self) -> anyhow::Result<(String, String)> {
        let students =
            serde_json::to_string(&self.students).context("failed to serialize students")?;
        let courses =
            serde_json::to_string(&self.courses).context("failed to serialize courses")?;
        Ok((students, courses))
    }

    pub fn find_student(&self, roll: u32) -> Option<&Student> {
        self.students.iter().find(|s| s.roll == roll)
    }

    pub fn find_student_mut(&mut self, roll: u32) -> Option<&mut Student> {
        self.students.iter_mut().find(|s| s.roll == roll)
    }

    pub fn has_student(&self, roll: u32) -> bool {
        self.find_student(roll).is_some()
    }

    pub fn has_course(&self, name: &str) -> bool {
        self.courses.iter().any(|c| c == name)
    }
}

fn load_slot<T: DeserializeOwned>(
    kv: &dyn KvStore,
    key: &str,
    check: impl Fn(&T) -> Result<(), String>,
) -> Option<T> {
    let raw = match kv.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!(slot = key, error = %e, "slot unreadable; starting empty");
            return None;
        }
    };
    let value: T = match serde_json::from_str(&raw) {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(slot = key, error = %e, "slot is not valid JSON; starting empty");
            return None;
        }
    };
    if let Err(msg) = check(&value) {
        tracing::warn!(slot = key, reason = %msg, "slot violates record invariants; starting empty");
        return None;
    }
    Some(value)
}

pub fn check_students(students: &[Student]) -> Result<(), String> {
    let mut rolls = HashSet::new();
    for s in students {
        if s.roll == 0 {
            return Err("roll must be positive".to_string());
        }
        if !rolls.insert(s.roll) {
            return Err(format!("duplicate roll {}", s.roll));
        }
        if s.name.trim().is_empty() {
            return Err(format!("student {} has an empty name", s.roll));
        }
        if s.semester == 0 {
            return Err(format!("student {} has semester 0", s.roll));
        }
        if s.attendance.present > s.attendance.total {
            return Err(format!(
                "student {} has present {} > total {}",
                s.roll, s.attendance.present, s.attendance.total
            ));
        }
        let mut courses = HashSet::new();
        for m in &s.marks {
            if m.marks > MAX_MARKS {
                return Err(format!(
                    "student {} has marks {} for {}",
                    s.roll, m.marks, m.course
                ));
            }
            if !courses.insert(m.course.as_str()) {
                return Err(format!(
                    "student {} has two entries for {}",
                    s.roll, m.course
                ));
            }
        }
    }
    Ok(())
}

pub fn check_courses(courses: &[String]) -> Result<(), String> {
    let mut seen = HashSet::new();
    for c in courses {
        if c.trim().is_empty() {
            return Err("empty course name".to_string());
        }
        if !seen.insert(c.as_str()) {
            return Err(format!("duplicate course {}", c));
        }
    }
    Ok(())
}
