use crate::environment;
use axum::Json;
use axum::extract::State;
use vhub_domain::constants::SYSTEM_TAG;
use vhub_domain::environment::{Environment, EnvironmentSnapshot};

/// Reports the environment chosen at startup next to a fresh check of the host.
///
/// The startup value and the fresh `isLocal` may disagree if the host's
/// network changed since the process started.
#[utoipa::path(
    get,
    path = "/api/environment",
    responses((status = OK, description = "Runtime environment snapshot", body = EnvironmentSnapshot)),
    tag = SYSTEM_TAG,
)]
#[allow(clippy::unused_async)]
pub(super) async fn environment_handler(
    State(startup): State<Environment>,
) -> Json<EnvironmentSnapshot> {
    Json(environment::snapshot(startup))
}
