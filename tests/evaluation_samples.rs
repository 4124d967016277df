use toko_backend::evaluation::{evaluate_student, sample_students};

#[test]
fn bundled_samples_split_two_pass_six_fail() {
    let results: Vec<_> = sample_students().iter().map(evaluate_student).collect();
    assert_eq!(results.len(), 8);

    let passed: Vec<&str> = results
        .iter()
        .filter(|r| r.passed)
        .map(|r| r.name.as_str())
        .collect();
    assert_eq!(passed, ["Ahmad Rizki", "Siti Nurhaliza"]);

    for result in results.iter().filter(|r| !r.passed) {
        assert_eq!(
            result.failed_reasons.len(),
            1,
            "{} should miss exactly one requirement: {:?}",
            result.name,
            result.failed_reasons
        );
    }
}

#[test]
fn passing_samples_have_no_reasons_and_a_grade() {
    for result in sample_students().iter().map(evaluate_student).filter(|r| r.passed) {
        assert!(result.failed_reasons.is_empty());
        assert!(!result.special_combination);
        assert!(matches!(result.grade, 'A' | 'B' | 'C'));
    }
}
