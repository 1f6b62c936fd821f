use crate::Volunteers;
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use tracing::error;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;
use vhub_domain::constants::VOLUNTEERS_TAG;
use vhub_domain::volunteer::{NewVolunteer, Volunteer};
use vhub_kernel::server::{ApiError, ApiState, ErrorBody};

const SAVE_FAILED: &str = "Failed to save";
const FETCH_FAILED: &str = "Failed to fetch";

/// Routes of the volunteer slice.
pub fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new().routes(routes!(list_volunteers, create_volunteer))
}

/// Registers a volunteer.
#[utoipa::path(
    post,
    path = "/api/volunteers",
    request_body = NewVolunteer,
    responses(
        (status = OK, description = "Stored volunteer", body = Volunteer),
        (status = BAD_REQUEST, description = "Body is not a JSON object", body = ErrorBody),
        (status = INTERNAL_SERVER_ERROR, description = "Store failure", body = ErrorBody),
    ),
    tag = VOLUNTEERS_TAG,
)]
async fn create_volunteer(
    State(state): State<ApiState>,
    payload: Result<Json<NewVolunteer>, JsonRejection>,
) -> Result<Json<Volunteer>, ApiError> {
    let Json(request) = payload?;
    let volunteers = state.try_get_slice::<Volunteers>()?;

    volunteers.repository.create(request.name).await.map(Json).map_err(|e| {
        error!(error = %e, "Failed to save volunteer");
        ApiError::internal(SAVE_FAILED)
    })
}

/// Lists every volunteer, newest first.
#[utoipa::path(
    get,
    path = "/api/volunteers",
    responses(
        (status = OK, description = "Volunteers, newest first", body = [Volunteer]),
        (status = INTERNAL_SERVER_ERROR, description = "Store failure", body = ErrorBody),
    ),
    tag = VOLUNTEERS_TAG,
)]
async fn list_volunteers(State(state): State<ApiState>) -> Result<Json<Vec<Volunteer>>, ApiError> {
    let volunteers = state.try_get_slice::<Volunteers>()?;

    volunteers.repository.list().await.map(Json).map_err(|e| {
        error!(error = %e, "Failed to fetch volunteers");
        ApiError::internal(FETCH_FAILED)
    })
}
