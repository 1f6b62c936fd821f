//! Volunteer feature slice: stores sign-ups and lists them newest first.
//!
//! With the `server` feature the slice also exposes `POST`/`GET /api/volunteers`.

mod error;
#[cfg(feature = "server")]
mod handlers;
mod repository;

pub use error::{VolunteerError, VolunteerErrorExt};
pub use repository::{SCHEMA, VolunteerRepository};

use std::any::Any;
use std::ops::Deref;
use std::sync::Arc;
use vhub_database::Database;
use vhub_kernel::domain::registry::{FeatureSlice, InitializedSlice};

/// Name the slice is registered under.
pub const SLICE_NAME: &str = "volunteers";

#[derive(Debug)]
pub struct VolunteersInner {
    pub repository: VolunteerRepository,
}

/// Volunteer feature state.
#[derive(Debug, Clone)]
pub struct Volunteers {
    inner: Arc<VolunteersInner>,
}

impl Volunteers {
    #[must_use]
    pub fn new(inner: VolunteersInner) -> Self {
        Self { inner: Arc::new(inner) }
    }
}

impl Deref for Volunteers {
    type Target = VolunteersInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl FeatureSlice for Volunteers {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Initialize the volunteer feature over `database`.
///
/// The handle does not need to be connected yet; queries fail until it is.
#[must_use]
pub fn init(database: &Database) -> InitializedSlice {
    tracing::info!("Volunteers slice initialized");

    let slice = Volunteers::new(VolunteersInner {
        repository: VolunteerRepository::new(database.clone()),
    });
    InitializedSlice::new(SLICE_NAME, slice)
}

#[cfg(feature = "server")]
pub use handlers::router;
