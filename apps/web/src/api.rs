//! HTTP client for the registration API.

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use vhub_domain::constants::{ENVIRONMENT_PATH, VOLUNTEERS_PATH};
use vhub_domain::environment::EnvironmentSnapshot;
use vhub_domain::volunteer::{NewVolunteer, Volunteer};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request could not be sent or the body could not be decoded.
    #[error("Request failed{}: {source}", format_context(.context))]
    Http {
        #[source]
        source: reqwest::Error,
        context: Option<Cow<'static, str>>,
    },
    /// The API answered with a non-success status.
    #[error("API responded with status {status}{}", format_context(.context))]
    Status { status: u16, context: Option<Cow<'static, str>> },
}

pub trait ClientErrorExt<T> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, ClientError>;
}

impl<T> ClientErrorExt<T> for Result<T, ClientError> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Self {
        self.map_err(|mut e| {
            match &mut e {
                ClientError::Http { context: c, .. } | ClientError::Status { context: c, .. } => {
                    *c = Some(context.into());
                },
            }
            e
        })
    }
}

impl<T> ClientErrorExt<T> for Result<T, reqwest::Error> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, ClientError> {
        self.map_err(|source| ClientError::Http { source, context: Some(context.into()) })
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(source: reqwest::Error) -> Self {
        Self::Http { source, context: None }
    }
}

#[allow(clippy::ref_option)]
fn format_context(context: &Option<Cow<'static, str>>) -> Cow<'static, str> {
    context.as_ref().map_or(Cow::Borrowed(""), |c| Cow::Owned(format!(" ({c})")))
}

/// Thin wrapper over `reqwest` bound to one API origin.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: Client,
}

impl ApiClient {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), http: Client::new() }
    }

    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.trim_end_matches('/'))
    }

    /// # Errors
    /// Returns an error if the request fails or the API answers with a non-2xx status.
    pub async fn list_volunteers(&self) -> Result<Vec<Volunteer>, ClientError> {
        let response = self.http.get(self.url(VOLUNTEERS_PATH)).send().await?;
        decode(response).await.context("Listing volunteers")
    }

    /// # Errors
    /// Returns an error if the request fails or the API answers with a non-2xx status.
    pub async fn create_volunteer(&self, name: &str) -> Result<Volunteer, ClientError> {
        let response = self
            .http
            .post(self.url(VOLUNTEERS_PATH))
            .json(&NewVolunteer::new(name))
            .send()
            .await?;
        decode(response).await.context("Creating volunteer")
    }

    /// # Errors
    /// Returns an error if the request fails or the API answers with a non-2xx status.
    pub async fn environment(&self) -> Result<EnvironmentSnapshot, ClientError> {
        let response = self.http.get(self.url(ENVIRONMENT_PATH)).send().await?;
        decode(response).await.context("Fetching environment")
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    if !status.is_success() {
        return Err(ClientError::Status { status: status.as_u16(), context: None });
    }
    Ok(response.json::<T>().await?)
}
