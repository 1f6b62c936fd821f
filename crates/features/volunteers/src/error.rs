use std::borrow::Cow;
use vhub_database::DatabaseError;

/// Errors raised by the volunteer slice.
#[derive(Debug, thiserror::Error)]
pub enum VolunteerError {
    /// The store rejected or failed the operation.
    #[error("Volunteer store error{}: {source}", format_context(.context))]
    Store {
        #[source]
        source: DatabaseError,
        context: Option<Cow<'static, str>>,
    },
    /// The store answered with something that is not a volunteer.
    #[error("Volunteer decode error{}: {message}", format_context(.context))]
    Decode { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

/// Adds `.context(...)` to store results.
pub trait VolunteerErrorExt<T> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, VolunteerError>;
}

impl<T> VolunteerErrorExt<T> for Result<T, VolunteerError> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Self {
        self.map_err(|mut e| {
            match &mut e {
                VolunteerError::Store { context: c, .. }
                | VolunteerError::Decode { context: c, .. } => *c = Some(context.into()),
            }
            e
        })
    }
}

impl<T> VolunteerErrorExt<T> for Result<T, DatabaseError> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, VolunteerError> {
        self.map_err(|source| VolunteerError::Store { source, context: Some(context.into()) })
    }
}

impl<T> VolunteerErrorExt<T> for Result<T, surrealdb::Error> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, VolunteerError> {
        self.map_err(|source| VolunteerError::Store {
            source: source.into(),
            context: Some(context.into()),
        })
    }
}

impl From<DatabaseError> for VolunteerError {
    fn from(source: DatabaseError) -> Self {
        Self::Store { source, context: None }
    }
}

impl From<surrealdb::Error> for VolunteerError {
    fn from(source: surrealdb::Error) -> Self {
        Self::Store { source: source.into(), context: None }
    }
}

#[allow(clippy::ref_option)]
fn format_context(context: &Option<Cow<'static, str>>) -> Cow<'static, str> {
    context.as_ref().map_or(Cow::Borrowed(""), |c| Cow::Owned(format!(" ({c})")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_error_renders_context() {
        let err: Result<(), VolunteerError> =
            Err(VolunteerError::Decode { message: "empty response".into(), context: None });
        let err = err.context("Creating volunteer").unwrap_err();

        assert_eq!(err.to_string(), "Volunteer decode error (Creating volunteer): empty response");
    }

    #[test]
    fn database_errors_become_store_errors() {
        let err: Result<(), DatabaseError> =
            Err(DatabaseError::Connection { message: "refused".into(), context: None });
        let err = err.context("Listing volunteers").unwrap_err();

        assert!(matches!(err, VolunteerError::Store { .. }));
        assert!(err.to_string().starts_with("Volunteer store error (Listing volunteers)"));
    }
}
