// src/domain/audit/entity.rs
use crate::domain::errors::{DomainError, DomainResult};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// A single audit record as produced upstream and carried through the log.
///
/// The `id` is the idempotency key for every downstream store: the search
/// document id and the archive object key are both derived from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEvent {
    pub id: String,
    pub action: String,
    pub contact_id: Option<String>,
    pub created_at: String,
}

impl AuditEvent {
    /// # Errors
    ///
    /// Returns [`DomainError::Validation`] when an invariant does not hold.
    pub fn new(
        id: impl Into<String>,
        action: impl Into<String>,
        contact_id: Option<String>,
        created_at: impl Into<String>,
    ) -> DomainResult<Self> {
        let event = Self {
            id: id.into(),
            action: action.into(),
            contact_id,
            created_at: created_at.into(),
        };
        event.validate()?;
        Ok(event)
    }

    /// Build an event stamped with `now`, formatted as RFC 3339 UTC with
    /// second precision (`2024-01-01T00:00:00Z`).
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Validation`] when an invariant does not hold.
    pub fn recorded_at(
        id: impl Into<String>,
        action: impl Into<String>,
        contact_id: Option<String>,
        now: DateTime<Utc>,
    ) -> DomainResult<Self> {
        Self::new(
            id,
            action,
            contact_id,
            now.to_rfc3339_opts(SecondsFormat::Secs, true),
        )
    }

    /// # Errors
    ///
    /// Returns [`DomainError::Validation`] naming the first field that is invalid.
    pub fn validate(&self) -> DomainResult<()> {
        if self.id.trim().is_empty() {
            return Err(DomainError::validation("audit event id must not be empty"));
        }

        if let Some(contact_id) = &self.contact_id
            && contact_id.is_empty()
        {
            return Err(DomainError::validation(
                "contactId must be absent or non-empty",
            ));
        }

        let created_at = DateTime::parse_from_rfc3339(&self.created_at).map_err(|err| {
            DomainError::validation(format!(
                "createdAt `{}` is not an RFC 3339 timestamp: {err}",
                self.created_at
            ))
        })?;
        if created_at.offset().local_minus_utc() != 0 {
            return Err(DomainError::validation(format!(
                "createdAt `{}` must be in UTC",
                self.created_at
            )));
        }

        Ok(())
    }

    #[must_use]
    pub fn document_id(&self) -> &str {
        &self.id
    }

    /// Object key under which the event is archived, e.g.
    /// `audit-events/evt-123.avro`.
    #[must_use]
    pub fn archive_key(&self, prefix: &str, extension: &str) -> String {
        let prefix = prefix.trim_end_matches('/');
        if prefix.is_empty() {
            format!("{}.{extension}", self.id)
        } else {
            format!("{prefix}/{}.{extension}", self.id)
        }
    }
}
