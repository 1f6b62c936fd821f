use std::borrow::Cow;

/// A specialized [`DatabaseError`] enum of this crate.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    /// Missing or invalid builder parameters.
    #[error("Validation error{}: {message}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Occurs when the engine cannot be reached or reports itself unhealthy.
    #[error("Database connection failed{}: {message}", format_context(.context))]
    Connection { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Occurs when the root credentials are rejected.
    #[error("Authentication failed{}: {message}", format_context(.context))]
    Auth { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A wrapper for underlying `SurrealDB` engine errors.
    #[error("SurrealDB error{}: {source}", format_context(.context))]
    Surreal {
        #[source]
        source: surrealdb::Error,
        context: Option<Cow<'static, str>>,
    },

    /// A schema script failed to apply.
    #[error("Schema error{}: {message}", format_context(.context))]
    Schema { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

/// Adds `.context(...)` to database results.
pub trait DatabaseErrorExt<T> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, DatabaseError>;
}

impl<T> DatabaseErrorExt<T> for Result<T, DatabaseError> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Self {
        self.map_err(|mut e| {
            match &mut e {
                DatabaseError::Validation { context: c, .. }
                | DatabaseError::Connection { context: c, .. }
                | DatabaseError::Auth { context: c, .. }
                | DatabaseError::Surreal { context: c, .. }
                | DatabaseError::Schema { context: c, .. } => *c = Some(context.into()),
            }
            e
        })
    }
}

impl<T> DatabaseErrorExt<T> for Result<T, surrealdb::Error> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, DatabaseError> {
        self.map_err(|source| DatabaseError::Surreal { source, context: Some(context.into()) })
    }
}

impl From<surrealdb::Error> for DatabaseError {
    fn from(source: surrealdb::Error) -> Self {
        Self::Surreal { source, context: None }
    }
}

#[allow(clippy::ref_option)]
fn format_context(context: &Option<Cow<'static, str>>) -> Cow<'static, str> {
    context.as_ref().map_or(Cow::Borrowed(""), |c| Cow::Owned(format!(" ({c})")))
}
