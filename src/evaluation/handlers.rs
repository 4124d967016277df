use axum::extract::Query;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::rules::{EvaluationResult, StudentRecord, evaluate_student};
use super::samples::sample_students;
use crate::gateway::error::{ApiResult, ok};
use crate::gateway::extract::ValidatedJson;
use crate::gateway::types::ApiResponse;

#[derive(Debug, Serialize, ToSchema)]
pub struct SampleEvaluation {
    pub student: StudentRecord,
    pub result: EvaluationResult,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct SampleQuery {
    /// Keep only passing (`true`) or failing (`false`) samples
    pub passed: Option<bool>,
}

/// Evaluate one student record
///
/// POST /api/v1/evaluation
#[utoipa::path(
    post,
    path = "/api/v1/evaluation",
    request_body = StudentRecord,
    responses(
        (status = 200, description = "Evaluation result", body = ApiResponse<EvaluationResult>),
        (status = 400, description = "Value outside 0..=100 or malformed body")
    ),
    tag = "Evaluation"
)]
pub async fn evaluate(
    ValidatedJson(record): ValidatedJson<StudentRecord>,
) -> ApiResult<EvaluationResult> {
    let result = evaluate_student(&record);
    tracing::debug!(nim = %result.nim, passed = result.passed, score = result.final_score, "Student evaluated");
    ok(result)
}

/// Bundled sample records with their results
///
/// GET /api/v1/evaluation/samples
#[utoipa::path(
    get,
    path = "/api/v1/evaluation/samples",
    params(SampleQuery),
    responses(
        (status = 200, description = "Samples", body = ApiResponse<Vec<SampleEvaluation>>)
    ),
    tag = "Evaluation"
)]
pub async fn list_samples(Query(query): Query<SampleQuery>) -> ApiResult<Vec<SampleEvaluation>> {
    let samples = sample_students()
        .into_iter()
        .map(|student| {
            let result = evaluate_student(&student);
            SampleEvaluation { student, result }
        })
        .filter(|s| query.passed.is_none_or(|want| s.result.passed == want))
        .collect();
    ok(samples)
}
