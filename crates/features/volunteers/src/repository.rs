use crate::error::{VolunteerError, VolunteerErrorExt};
use chrono::DateTime;
use surrealdb::types::SurrealValue;
use tracing::{debug, instrument};
use vhub_database::Database;
use vhub_domain::volunteer::Volunteer;

/// Idempotent schema for the `volunteer` table.
pub const SCHEMA: &str = "
    DEFINE TABLE IF NOT EXISTS volunteer SCHEMALESS;
    DEFINE INDEX IF NOT EXISTS volunteer_created_at ON volunteer FIELDS created_at;
";

const CREATE_VOLUNTEER: &str = "
    LET $row = CREATE ONLY volunteer SET name = $name, created_at = time::now();
    RETURN {
        id: record::id($row.id),
        name: $row.name,
        created_at: time::nano($row.created_at)
    };
";

const LIST_VOLUNTEERS: &str = "
    SELECT record::id(id) AS id, name, time::nano(created_at) AS created_at
    FROM volunteer
    ORDER BY created_at DESC;
";

/// Flat record shape as projected by the queries above.
#[derive(Debug, SurrealValue)]
struct VolunteerRow {
    id: String,
    name: String,
    created_at: i64,
}

impl From<VolunteerRow> for Volunteer {
    fn from(row: VolunteerRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            created_at: DateTime::from_timestamp_nanos(row.created_at),
        }
    }
}

/// Reads and writes volunteers; holds no state besides the store handle.
#[derive(Debug, Clone)]
pub struct VolunteerRepository {
    db: Database,
}

impl VolunteerRepository {
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }

    /// Stores a new volunteer; the store assigns the id and timestamp.
    ///
    /// The name is stored as given, including an empty string.
    ///
    /// # Errors
    /// * [`VolunteerError::Store`] if the store is unreachable or rejects the write.
    /// * [`VolunteerError::Decode`] if the store returns no record.
    #[instrument(skip(self, name))]
    pub async fn create(&self, name: impl Into<String>) -> Result<Volunteer, VolunteerError> {
        let name: String = name.into();
        let row = self
            .db
            .query(CREATE_VOLUNTEER)
            .bind(("name", name))
            .await
            .context("Creating volunteer")?
            .take::<Option<VolunteerRow>>(1)
            .context("Reading created volunteer")?
            .ok_or_else(|| VolunteerError::Decode {
                message: "store returned no record".into(),
                context: Some("Creating volunteer".into()),
            })?;

        debug!(id = %row.id, "Volunteer stored");
        Ok(row.into())
    }

    /// Every stored volunteer, newest first.
    ///
    /// # Errors
    /// [`VolunteerError::Store`] if the store is unreachable or the query fails.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Volunteer>, VolunteerError> {
        let rows = self
            .db
            .query(LIST_VOLUNTEERS)
            .await
            .context("Listing volunteers")?
            .take::<Vec<VolunteerRow>>(0)
            .context("Reading volunteers")?;

        Ok(rows.into_iter().map(Volunteer::from).collect())
    }
}
