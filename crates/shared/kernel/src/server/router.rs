use super::state::ApiState;
use super::{environment, health};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// Routes every deployment exposes regardless of enabled slices.
pub fn system_router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new()
        .routes(routes!(health::health_handler))
        .routes(routes!(environment::environment_handler))
}
