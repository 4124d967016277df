//! Pass/fail rules for a student's semester record.
//!
//! Wire names follow the evaluation form (`kehadiran`, `nilaiTugas`, ...).

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

pub const MIN_ATTENDANCE: f64 = 75.0;
pub const MIN_ASSIGNMENT: f64 = 70.0;
pub const MIN_MIDTERM: f64 = 60.0;
pub const MIN_FINAL_EXAM: f64 = 60.0;
pub const MIN_FINAL_SCORE: f64 = 60.0;

const ASSIGNMENT_WEIGHT: f64 = 0.3;
const MIDTERM_WEIGHT: f64 = 0.3;
const FINAL_EXAM_WEIGHT: f64 = 0.4;

/// Evaluation input; scores and attendance are percentages in 0..=100
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct StudentRecord {
    #[serde(rename = "nama", default)]
    #[schema(example = "Ahmad Rizki")]
    pub name: String,
    #[serde(default)]
    #[schema(example = "2021001")]
    pub nim: String,
    #[serde(rename = "kehadiran")]
    #[validate(range(min = 0.0, max = 100.0))]
    pub attendance: f64,
    #[serde(rename = "nilaiTugas")]
    #[validate(range(min = 0.0, max = 100.0))]
    pub assignment: f64,
    #[serde(rename = "nilaiUTS")]
    #[validate(range(min = 0.0, max = 100.0))]
    pub midterm: f64,
    #[serde(rename = "nilaiUAS")]
    #[validate(range(min = 0.0, max = 100.0))]
    pub final_exam: f64,
    #[serde(rename = "sertifikasi", default)]
    pub certified: bool,
    #[serde(rename = "kelengkapanAdmin", default)]
    pub admin_complete: bool,
}

/// Which individual requirements are met
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct Criteria {
    #[serde(rename = "kehadiran")]
    pub attendance: bool,
    #[serde(rename = "nilaiTugas")]
    pub assignment: bool,
    #[serde(rename = "nilaiUTS")]
    pub midterm: bool,
    #[serde(rename = "nilaiUAS")]
    pub final_exam: bool,
    #[serde(rename = "sertifikasi")]
    pub certified: bool,
    #[serde(rename = "kelengkapanAdmin")]
    pub admin_complete: bool,
}

impl Criteria {
    pub fn all_met(&self) -> bool {
        self.attendance
            && self.assignment
            && self.midterm
            && self.final_exam
            && self.certified
            && self.admin_complete
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct EvaluationResult {
    #[serde(flatten)]
    pub criteria: Criteria,
    /// Weighted score, two decimals
    #[serde(rename = "nilaiAkhir")]
    pub final_score: f64,
    #[serde(rename = "statusLulus")]
    pub passed: bool,
    #[serde(rename = "kombinasiKhusus")]
    pub special_combination: bool,
    #[serde(rename = "nama")]
    pub name: String,
    pub nim: String,
    pub grade: char,
    #[serde(rename = "failedReasons")]
    pub failed_reasons: Vec<String>,
}

pub fn criteria(record: &StudentRecord) -> Criteria {
    Criteria {
        attendance: record.attendance >= MIN_ATTENDANCE,
        assignment: record.assignment >= MIN_ASSIGNMENT,
        midterm: record.midterm >= MIN_MIDTERM,
        final_exam: record.final_exam >= MIN_FINAL_EXAM,
        certified: record.certified,
        admin_complete: record.admin_complete,
    }
}

/// 30% assignment, 30% midterm, 40% final exam (unrounded)
pub fn weighted_score(record: &StudentRecord) -> f64 {
    record.assignment * ASSIGNMENT_WEIGHT
        + record.midterm * MIDTERM_WEIGHT
        + record.final_exam * FINAL_EXAM_WEIGHT
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Score patterns that fail regardless of the individual criteria.
pub fn is_special_combination(record: &StudentRecord) -> bool {
    let (a, m, f) = (record.assignment, record.midterm, record.final_exam);

    let lopsided = a > 90.0 && m < 60.0 && f < 60.0;
    let implausibly_perfect = record.attendance > 95.0 && a > 95.0 && m > 95.0 && f > 95.0;
    let uniformly_low = a < 60.0 && m < 60.0 && f < 60.0;

    lopsided || implausibly_perfect || uniformly_low
}

pub fn grade_letter(score: f64) -> char {
    match score {
        s if s >= 80.0 => 'A',
        s if s >= 70.0 => 'B',
        s if s >= 60.0 => 'C',
        s if s >= 50.0 => 'D',
        _ => 'E',
    }
}

/// `final_score` is the reported (rounded) score.
pub fn failed_reasons(criteria: &Criteria, final_score: f64, special: bool) -> Vec<String> {
    let checks = [
        (criteria.attendance, "Attendance below 75%"),
        (criteria.assignment, "Assignment score below 70"),
        (criteria.midterm, "Midterm score below 60"),
        (criteria.final_exam, "Final exam score below 60"),
        (criteria.certified, "Certification not obtained"),
        (criteria.admin_complete, "Administration incomplete"),
        (final_score >= MIN_FINAL_SCORE, "Final score below 60"),
        (!special, "Score combination does not qualify"),
    ];
    checks
        .iter()
        .filter(|(met, _)| !met)
        .map(|(_, reason)| reason.to_string())
        .collect()
}

/// Evaluate one record.
pub fn evaluate_student(record: &StudentRecord) -> EvaluationResult {
    let criteria = criteria(record);
    let raw_score = weighted_score(record);
    let final_score = round2(raw_score);
    let special_combination = is_special_combination(record);
    let passed = criteria.all_met() && raw_score >= MIN_FINAL_SCORE && !special_combination;

    EvaluationResult {
        criteria,
        final_score,
        passed,
        special_combination,
        name: record.name.clone(),
        nim: record.nim.clone(),
        grade: grade_letter(final_score),
        failed_reasons: failed_reasons(&criteria, final_score, special_combination),
    }
}
