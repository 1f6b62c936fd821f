use axum::Router;
use axum::http::{Method, header};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable};
use vhub::kernel::server::ApiState;

#[derive(OpenApi)]
#[openapi(info(title = "Volunteer Hub API"))]
struct ApiDoc;

const DOCS_PATH: &str = "/docs";

pub(crate) fn init(state: ApiState) -> Router {
    let static_dir = state.config.server.static_dir.clone();
    let api = ApiDoc::openapi();

    let (openapi_routes, api_doc) = OpenApiRouter::with_openapi(api)
        .merge(vhub::server::router::system_router())
        .merge(vhub::server::router::volunteers_router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
        .split_for_parts();

    let scalar_routes = Scalar::with_url(DOCS_PATH, api_doc);

    let router = Router::new().merge(openapi_routes).merge(scalar_routes).layer(cors());

    match static_dir {
        Some(dir) => {
            let index = dir.join("index.html");
            router.fallback_service(ServeDir::new(dir).fallback(ServeFile::new(index)))
        },
        None => router,
    }
}

/// Permissive CORS: any origin, JSON bodies only.
fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}
