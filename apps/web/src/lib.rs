//! # Volunteer Hub Web
//!
//! Single-page registration form: submits names to the API, lists everyone
//! registered so far, and shows the API's environment report.
//!
//! Build for the browser with `dx serve --platform web`; set `VHUB_API_URL` at
//! build time to point production builds at a different API origin.

pub mod api;
mod app;
pub mod environment;
pub mod state;

pub use app::App;
