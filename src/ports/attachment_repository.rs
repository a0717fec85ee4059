//! Attachment repository port.

use crate::domain::attachment::Attachment;
use crate::domain::foundation::{AttachmentId, DomainError, InterventionId};
use async_trait::async_trait;

/// Repository port for attachment metadata.
#[async_trait]
pub trait AttachmentRepository: Send + Sync {
    async fn save(&self, attachment: &Attachment) -> Result<(), DomainError>;

    /// # Errors
    ///
    /// - `AttachmentNotFound` if the attachment doesn't exist
    async fn delete(&self, id: &AttachmentId) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &AttachmentId) -> Result<Option<Attachment>, DomainError>;

    /// Attachments of an intervention, oldest first.
    async fn find_by_intervention(
        &self,
        intervention_id: &InterventionId,
    ) -> Result<Vec<Attachment>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attachment_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn AttachmentRepository) {}
    }
}
