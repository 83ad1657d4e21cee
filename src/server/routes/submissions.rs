//! Submission endpoints
//!
//! Submit ingests a list of item identifiers and returns the submission id;
//! the query endpoint returns the submission with its per-batch statuses.

use crate::core::scheduler::{Priority, SubmissionView};
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::utils::error::Result;
use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

/// Configure submission routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/v1/submissions")
            .route("", web::post().to(create_submission))
            .route("/{id}", web::get().to(get_submission)),
    );
}

/// Submit request body
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSubmissionRequest {
    /// Ordered item identifiers to fetch
    pub ids: Vec<String>,
    /// Scheduling priority, MEDIUM when omitted
    #[serde(default)]
    pub priority: Priority,
}

/// Submit response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSubmissionResponse {
    /// Id to poll the submission with
    pub submission_id: Uuid,
}

/// Accept a new submission
///
/// Returns the generated submission id; the batches start draining in the
/// background immediately.
async fn create_submission(
    state: web::Data<AppState>,
    body: web::Json<CreateSubmissionRequest>,
) -> Result<HttpResponse> {
    let request = body.into_inner();
    debug!(items = request.ids.len(), "submission received");

    let submission_id = state.scheduler.submit(request.ids, request.priority)?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(CreateSubmissionResponse {
        submission_id,
    })))
}

/// Query a submission by id
async fn get_submission(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let view: SubmissionView = state.scheduler.submission(path.into_inner())?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(view)))
}
