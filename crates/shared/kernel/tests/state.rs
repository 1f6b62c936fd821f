#![cfg(feature = "server")]

use std::any::Any;
use vhub_database::Database;
use vhub_kernel::domain::config::ApiConfig;
use vhub_kernel::domain::environment::Environment;
use vhub_kernel::domain::registry::{FeatureSlice, InitializedSlice};
use vhub_kernel::server::{ApiState, ApiStateError};

#[derive(Debug)]
struct Roster(u8);

impl FeatureSlice for Roster {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug)]
struct Unregistered;

impl FeatureSlice for Unregistered {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

fn database() -> Database {
    Database::builder().url("mem://").session("test", "test").build().unwrap()
}

#[tokio::test]
async fn build_requires_config_and_database() {
    let err = ApiState::builder().db(database()).build().unwrap_err();
    assert!(matches!(err, ApiStateError::Validation { .. }));

    let err = ApiState::builder().config(ApiConfig::default()).build().unwrap_err();
    assert!(matches!(err, ApiStateError::Validation { .. }));
}

#[tokio::test]
async fn registered_slices_can_be_looked_up() {
    let state = ApiState::builder()
        .config(ApiConfig::default())
        .db(database())
        .environment(Environment::Production)
        .register_slice(InitializedSlice::new("roster", Roster(7)))
        .build()
        .unwrap();

    assert_eq!(state.environment, Environment::Production);
    assert_eq!(state.get_slice::<Roster>().map(|p| p.0), Some(7));
    assert_eq!(state.slice_names().collect::<Vec<_>>(), vec!["roster"]);
    assert!(matches!(
        state.try_get_slice::<Unregistered>(),
        Err(ApiStateError::MissingSlice { .. })
    ));
}

#[tokio::test]
async fn environment_defaults_to_development() {
    let state = ApiState::builder().config(ApiConfig::default()).db(database()).build().unwrap();
    assert_eq!(state.environment, Environment::Development);
}
