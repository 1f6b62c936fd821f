//! Facade crate for `VolunteerHub` features and shared modules.
//! Re-exports domain/kernel primitives and aggregates feature initialization.
//! Keep this crate thin: it should compose other crates, not implement business logic.
//!
//! ## Usage
//! - Add `vhub` with the `server` feature for the HTTP routes.
//! - Pass [`schemas`] to the database builder, then call [`init`] to register feature slices.

use vhub_database::Database;
pub use vhub_domain as domain;
use vhub_domain::registry::InitializedSlice;
pub use vhub_kernel as kernel;

#[cfg(feature = "server")]
pub mod server {
    pub mod router {
        pub use vhub_kernel::server::system_router;
        pub use vhub_volunteers::router as volunteers_router;
    }
}

/// Feature registry for runtime introspection.
pub mod features {
    pub use vhub_volunteers as volunteers;

    /// Build-time enabled features (by Cargo feature).
    pub const ENABLED: &[&str] = &[
        #[cfg(feature = "server")]
        "server",
        volunteers::SLICE_NAME,
    ];

    #[must_use]
    pub fn is_enabled(name: &str) -> bool {
        ENABLED.contains(&name)
    }
}

/// Schema scripts of every feature, in application order.
#[must_use]
pub fn schemas() -> Vec<&'static str> {
    vec![features::volunteers::SCHEMA]
}

/// Initialize all enabled features.
#[must_use]
pub fn init(database: &Database) -> Vec<InitializedSlice> {
    vec![features::volunteers::init(database)]
}
