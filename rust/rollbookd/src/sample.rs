use crate::model::{Attendance, MarkEntry, Student, MAX_MARKS};
use crate::store::Store;
use rand::Rng;
use serde::Serialize;

pub const SAMPLE_NAMES: [&str; 3] = ["Alice", "Bob", "Charlie"];
pub const SAMPLE_COURSES: [&str; 3] = ["BCA", "MCA", "BBA"];
pub const SAMPLE_FIRST_ROLL: u32 = 100;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleSummary {
    pub students_added: Vec<u32>,
    pub courses_added: Vec<String>,
}

/// Seeds the fixed sample identities (rolls 100..) that are not present yet,
/// then adds any missing sample course. Existing records are never touched.
///
/// Attendance draws `total` and `present` from 1..=10 each, with `present`
/// clamped to `total`.
pub fn generate<R: Rng>(store: &mut Store, rng: &mut R) -> SampleSummary {
    let mut summary = SampleSummary::default();

    for (roll, name) in (SAMPLE_FIRST_ROLL..).zip(SAMPLE_NAMES) {
        if store.has_student(roll) {
            continue;
        }
        let marks = SAMPLE_COURSES
            .iter()
            .map(|c| MarkEntry {
                course: c.to_string(),
                marks: rng.gen_range(0..=MAX_MARKS),
            })
            .collect();
        let semester = rng.gen_range(1..=8);
        let total = rng.gen_range(1..=10);
        let present = rng.gen_range(1..=10u32).min(total);
        store.students.push(Student {
            roll,
            name: name.to_string(),
            semester,
            attendance: Attendance { total, present },
            marks,
        });
        summary.students_added.push(roll);
    }

    for course in SAMPLE_COURSES {
        if !store.has_course(course) {
            store.courses.push(course.to_string());
            summary.courses_added.push(course.to_string());
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::check_students;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn seeds_three_students_and_courses_with_valid_shape() {
        let mut store = Store::default();
        let mut rng = StdRng::seed_from_u64(7);
        let summary = generate(&mut store, &mut rng);

        assert_eq!(summary.students_added, vec![100, 101, 102]);
        assert_eq!(summary.courses_added, vec!["BCA", "MCA", "BBA"]);
        assert_eq!(store.courses, vec!["BCA", "MCA", "BBA"]);
        for (s, name) in store.students.iter().zip(SAMPLE_NAMES) {
            assert_eq!(s.name, name);
            assert!((1..=8).contains(&s.semester));
            assert!((1..=10).contains(&s.attendance.total));
            assert!(s.attendance.present <= s.attendance.total);
            let courses: Vec<&str> = s.marks.iter().map(|m| m.course.as_str()).collect();
            assert_eq!(courses, SAMPLE_COURSES.to_vec());
            assert!(s.marks.iter().all(|m| m.marks <= 100));
        }
        check_students(&store.students).expect("generated data is consistent");
    }

    #[test]
    fn same_seed_same_data() {
        let mut a = Store::default();
        let mut b = Store::default();
        generate(&mut a, &mut StdRng::seed_from_u64(42));
        generate(&mut b, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn existing_rolls_and_courses_are_left_alone() {
        let mut store = Store::default();
        store.students.push(Student::new(101, "Existing", 3));
        store.courses.push("MCA".to_string());

        let summary = generate(&mut store, &mut StdRng::seed_from_u64(1));
        assert_eq!(summary.students_added, vec![100, 102]);
        assert_eq!(summary.courses_added, vec!["BCA", "BBA"]);
        assert_eq!(store.students[0].name, "Existing");
        assert!(store.students[0].marks.is_empty());
        assert_eq!(store.courses, vec!["MCA", "BCA", "BBA"]);

        let again = generate(&mut store, &mut StdRng::seed_from_u64(2));
        assert_eq!(again, SampleSummary::default());
        assert_eq!(store.students.len(), 3);
    }
}
