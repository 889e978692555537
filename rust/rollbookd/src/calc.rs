use crate::model::{Attendance, MarkEntry};

pub const DEFAULT_LOW_ATTENDANCE_THRESHOLD: f64 = 75.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Remark {
    Good,
    Average,
    NeedsImprovement,
}

impl Remark {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Average => "Average",
            Self::NeedsImprovement => "Needs Improvement",
        }
    }
}

/// Half-away-from-zero rounding to 2 decimals.
pub fn round_2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

pub fn attendance_percentage(attendance: &Attendance) -> f64 {
    if attendance.total == 0 {
        return 0.0;
    }
    round_2(f64::from(attendance.present) / f64::from(attendance.total) * 100.0)
}

pub fn average_marks(marks: &[MarkEntry]) -> f64 {
    if marks.is_empty() {
        return 0.0;
    }
    let sum: u64 = marks.iter().map(|m| u64::from(m.marks)).sum();
    round_2(sum as f64 / marks.len() as f64)
}

/// Strictly above 80 is Good; 50 through 80 inclusive is Average.
pub fn remark(average: f64) -> Remark {
    if average > 80.0 {
        Remark::Good
    } else if average >= 50.0 {
        Remark::Average
    } else {
        Remark::NeedsImprovement
    }
}

pub fn is_low_attendance(percentage: f64, threshold: f64) -> bool {
    percentage < threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marks(values: &[u32]) -> Vec<MarkEntry> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| MarkEntry {
                course: format!("C{}", i),
                marks: *v,
            })
            .collect()
    }

    #[test]
    fn attendance_percentage_handles_zero_total() {
        assert_eq!(attendance_percentage(&Attendance::default()), 0.0);
    }

    #[test]
    fn attendance_percentage_rounds_to_two_decimals() {
        let a = Attendance {
            total: 3,
            present: 2,
        };
        assert_eq!(attendance_percentage(&a), 66.67);
        let full = Attendance {
            total: 4,
            present: 4,
        };
        assert_eq!(attendance_percentage(&full), 100.0);
    }

    #[test]
    fn average_marks_cases() {
        assert_eq!(average_marks(&[]), 0.0);
        assert_eq!(average_marks(&marks(&[80])), 80.0);
        assert_eq!(average_marks(&marks(&[70, 90])), 80.0);
        assert_eq!(average_marks(&marks(&[1, 2, 2])), 1.67);
    }

    #[test]
    fn remark_boundaries() {
        assert_eq!(remark(80.0), Remark::Average);
        assert_eq!(remark(80.01), Remark::Good);
        assert_eq!(remark(50.0), Remark::Average);
        assert_eq!(remark(49.99), Remark::NeedsImprovement);
        assert_eq!(remark(0.0).as_str(), "Needs Improvement");
    }

    #[test]
    fn low_attendance_is_strictly_below_threshold() {
        assert!(is_low_attendance(74.99, DEFAULT_LOW_ATTENDANCE_THRESHOLD));
        assert!(!is_low_attendance(75.0, DEFAULT_LOW_ATTENDANCE_THRESHOLD));
    }
}
