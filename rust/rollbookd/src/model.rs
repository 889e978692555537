use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendance {
    pub total: u32,
    pub present: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkEntry {
    pub course: String,
    pub marks: u32,
}

/// One stored student record. The serialized shape is the `students` slot
/// format: `{roll, name, semester, attendance: {total, present}, marks: [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub roll: u32,
    pub name: String,
    pub semester: u32,
    pub attendance: Attendance,
    pub marks: Vec<MarkEntry>,
}

impl Student {
    pub fn new(roll: u32, name: impl Into<String>, semester: u32) -> Self {
        Self {
            roll,
            name: name.into(),
            semester,
            attendance: Attendance::default(),
            marks: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttendanceStatus {
    Present,
    Absent,
}

impl AttendanceStatus {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "present" => Some(Self::Present),
            "absent" => Some(Self::Absent),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Present => "present",
            Self::Absent => "absent",
        }
    }

    /// Capitalized form used in confirmation messages ("Present").
    pub fn label(self) -> &'static str {
        match self {
            Self::Present => "Present",
            Self::Absent => "Absent",
        }
    }
}

pub const MAX_MARKS: u32 = 100;
