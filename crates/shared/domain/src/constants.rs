/// `OpenAPI` tag for system endpoints (health, environment).
pub const SYSTEM_TAG: &str = "System";
/// `OpenAPI` tag for volunteer registration endpoints.
pub const VOLUNTEERS_TAG: &str = "Volunteers";

pub const VOLUNTEERS_PATH: &str = "/api/volunteers";
pub const ENVIRONMENT_PATH: &str = "/api/environment";
pub const HEALTH_PATH: &str = "/health";
