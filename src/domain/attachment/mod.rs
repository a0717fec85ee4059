//! Attachment module - files attached to an intervention.
//!
//! The file itself lives in external storage; the domain only keeps a
//! reference to it. Attachments are immutable: they are added or removed.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{
    AttachmentId, DomainError, InterventionId, Timestamp, ValidationError,
};

/// Kind of attached file (`type_fichier`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AttachmentKind {
    #[serde(rename = "photo")]
    Photo,
    #[default]
    #[serde(rename = "document")]
    Document,
    #[serde(rename = "video")]
    Video,
    #[serde(rename = "autre")]
    Other,
}

impl AttachmentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttachmentKind::Photo => "photo",
            AttachmentKind::Document => "document",
            AttachmentKind::Video => "video",
            AttachmentKind::Other => "autre",
        }
    }
}

impl fmt::Display for AttachmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttachmentKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "photo" => Ok(AttachmentKind::Photo),
            "document" => Ok(AttachmentKind::Document),
            "video" => Ok(AttachmentKind::Video),
            "autre" => Ok(AttachmentKind::Other),
            other => Err(ValidationError::invalid_format(
                "attachment_kind",
                format!("unknown attachment type '{}'", other),
            )),
        }
    }
}

/// File attached to an intervention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    id: AttachmentId,
    intervention_id: InterventionId,
    title: String,
    file_ref: String,
    kind: AttachmentKind,
    description: String,
    added_at: Timestamp,
}

impl Attachment {
    /// # Errors
    ///
    /// - `ValidationFailed` if title or file reference is blank
    pub fn new(
        id: AttachmentId,
        intervention_id: InterventionId,
        title: String,
        file_ref: String,
        kind: AttachmentKind,
        description: String,
        now: Timestamp,
    ) -> Result<Self, DomainError> {
        if title.trim().is_empty() {
            return Err(DomainError::validation("title", "Title cannot be empty"));
        }
        if file_ref.trim().is_empty() {
            return Err(DomainError::validation("file_ref", "A file is required"));
        }
        Ok(Self {
            id,
            intervention_id,
            title,
            file_ref,
            kind,
            description,
            added_at: now,
        })
    }

    /// Reconstitute an attachment from persistence.
    pub fn reconstitute(
        id: AttachmentId,
        intervention_id: InterventionId,
        title: String,
        file_ref: String,
        kind: AttachmentKind,
        description: String,
        added_at: Timestamp,
    ) -> Self {
        Self {
            id,
            intervention_id,
            title,
            file_ref,
            kind,
            description,
            added_at,
        }
    }

    pub fn id(&self) -> &AttachmentId {
        &self.id
    }

    pub fn intervention_id(&self) -> &InterventionId {
        &self.intervention_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn file_ref(&self) -> &str {
        &self.file_ref
    }

    pub fn kind(&self) -> AttachmentKind {
        self.kind
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn added_at(&self) -> &Timestamp {
        &self.added_at
    }
}
