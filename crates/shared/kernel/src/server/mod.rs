//! Shared HTTP plumbing for feature slices: application state, the API error
//! type, and the system routes (`/health`, `/api/environment`).

mod environment;
mod error;
mod health;
mod router;
mod state;

pub use error::{ApiError, ErrorBody};
pub use router::system_router;
pub use state::{ApiState, ApiStateBuilder, ApiStateError, ApiStateInner};
