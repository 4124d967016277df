//! Bundled demonstration records. The first two pass; each of the others
//! misses exactly one requirement.

use super::rules::StudentRecord;

struct Sample {
    name: &'static str,
    nim: &'static str,
    attendance: f64,
    assignment: f64,
    midterm: f64,
    final_exam: f64,
    certified: bool,
    admin_complete: bool,
}

#[rustfmt::skip]
const SAMPLES: [Sample; 8] = [
    Sample { name: "Ahmad Rizki", nim: "2021001", attendance: 85.0, assignment: 75.0, midterm: 70.0, final_exam: 80.0, certified: true, admin_complete: true },
    Sample { name: "Siti Nurhaliza", nim: "2021002", attendance: 90.0, assignment: 88.0, midterm: 85.0, final_exam: 92.0, certified: true, admin_complete: true },
    // attendance
    Sample { name: "Budi Santoso", nim: "2021003", attendance: 70.0, assignment: 80.0, midterm: 75.0, final_exam: 85.0, certified: true, admin_complete: true },
    // assignment
    Sample { name: "Maya Sari", nim: "2021004", attendance: 80.0, assignment: 65.0, midterm: 70.0, final_exam: 75.0, certified: true, admin_complete: true },
    // midterm
    Sample { name: "Andi Pratama", nim: "2021005", attendance: 78.0, assignment: 72.0, midterm: 55.0, final_exam: 68.0, certified: true, admin_complete: true },
    // final exam
    Sample { name: "Rina Wati", nim: "2021006", attendance: 82.0, assignment: 78.0, midterm: 75.0, final_exam: 55.0, certified: true, admin_complete: true },
    // certification
    Sample { name: "Dedi Kurniawan", nim: "2021007", attendance: 88.0, assignment: 85.0, midterm: 80.0, final_exam: 82.0, certified: false, admin_complete: true },
    // administration
    Sample { name: "Lisa Andriani", nim: "2021008", attendance: 92.0, assignment: 90.0, midterm: 88.0, final_exam: 95.0, certified: true, admin_complete: false },
];

/// Number of bundled records expected to pass (they come first)
pub const PASSING_SAMPLES: usize = 2;

pub fn sample_students() -> Vec<StudentRecord> {
    SAMPLES
        .iter()
        .map(|s| StudentRecord {
            name: s.name.to_string(),
            nim: s.nim.to_string(),
            attendance: s.attendance,
            assignment: s.assignment,
            midterm: s.midterm,
            final_exam: s.final_exam,
            certified: s.certified,
            admin_complete: s.admin_complete,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::rules::evaluate_student;

    #[test]
    fn test_first_two_pass_rest_fail() {
        let results: Vec<_> = sample_students().iter().map(evaluate_student).collect();
        assert_eq!(results.len(), 8);
        for (i, result) in results.iter().enumerate() {
            assert_eq!(result.passed, i < PASSING_SAMPLES, "sample {} ({})", i, result.name);
        }
    }

    #[test]
    fn test_each_failing_sample_has_one_reason() {
        for result in sample_students().iter().skip(PASSING_SAMPLES).map(evaluate_student) {
            assert_eq!(result.failed_reasons.len(), 1, "{}", result.name);
        }
    }
}
