//! Form state and its transitions, kept free of rendering so it can be tested natively.

use crate::api::ClientError;
use chrono::{DateTime, Local, Utc};
use tracing::error;
use vhub_domain::environment::EnvironmentSnapshot;
use vhub_domain::volunteer::Volunteer;

pub const LOAD_FAILED: &str = "Failed to load volunteers. Please try again later.";
pub const SAVE_FAILED: &str = "Failed to save volunteer. Please try again.";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegistrationState {
    /// Current text of the name field
    pub input: String,
    /// Volunteers from the last successful fetch
    pub volunteers: Vec<Volunteer>,
    /// Last environment report, if any arrived
    pub environment: Option<EnvironmentSnapshot>,
    pub error: Option<&'static str>,
}

impl RegistrationState {
    /// Clears the previous error before a list or create request.
    pub fn begin_request(&mut self) {
        self.error = None;
    }

    /// Applies a list response; a failure keeps the previous list.
    pub fn volunteers_loaded(&mut self, result: Result<Vec<Volunteer>, ClientError>) {
        match result {
            Ok(volunteers) => self.volunteers = volunteers,
            Err(e) => {
                error!(error = %e, "Failed to fetch volunteers");
                self.error = Some(LOAD_FAILED);
            },
        }
    }

    /// Applies a create response; only success clears the input.
    ///
    /// Returns `true` when the list should be fetched again.
    pub fn volunteer_saved(&mut self, result: Result<Volunteer, ClientError>) -> bool {
        match result {
            Ok(_) => {
                self.input.clear();
                true
            },
            Err(e) => {
                error!(error = %e, "Failed to save volunteer");
                self.error = Some(SAVE_FAILED);
                false
            },
        }
    }

    /// Applies an environment response; a failure is only logged.
    pub fn environment_loaded(&mut self, result: Result<EnvironmentSnapshot, ClientError>) {
        match result {
            Ok(snapshot) => self.environment = Some(snapshot),
            Err(e) => error!(error = %e, "Failed to fetch environment info"),
        }
    }

    /// Pretty-printed environment report for the diagnostic panel.
    #[must_use]
    pub fn environment_json(&self) -> Option<String> {
        self.environment.as_ref().and_then(|snapshot| serde_json::to_string_pretty(snapshot).ok())
    }
}

/// One list row: `name - local time`.
#[must_use]
pub fn volunteer_line(volunteer: &Volunteer) -> String {
    format!("{} - {}", volunteer.name, local_time(volunteer.created_at))
}

fn local_time(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}
