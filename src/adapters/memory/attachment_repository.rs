use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::insert_new;
use crate::domain::attachment::Attachment;
use crate::domain::foundation::{AttachmentId, DomainError, ErrorCode, InterventionId};
use crate::ports::AttachmentRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemoryAttachmentRepository {
    attachments: Arc<RwLock<HashMap<AttachmentId, Attachment>>>,
}

impl InMemoryAttachmentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AttachmentRepository for InMemoryAttachmentRepository {
    async fn save(&self, attachment: &Attachment) -> Result<(), DomainError> {
        let mut rows = self.attachments.write().await;
        insert_new(&mut rows, *attachment.id(), attachment.clone())
    }

    async fn delete(&self, id: &AttachmentId) -> Result<(), DomainError> {
        match self.attachments.write().await.remove(id) {
            Some(_) => Ok(()),
            None => Err(
                DomainError::new(ErrorCode::AttachmentNotFound, "Attachment not found")
                    .with_detail("id", id.to_string()),
            ),
        }
    }

    async fn find_by_id(&self, id: &AttachmentId) -> Result<Option<Attachment>, DomainError> {
        Ok(self.attachments.read().await.get(id).cloned())
    }

    async fn find_by_intervention(
        &self,
        intervention_id: &InterventionId,
    ) -> Result<Vec<Attachment>, DomainError> {
        let rows = self.attachments.read().await;
        let mut found: Vec<Attachment> = rows
            .values()
            .filter(|a| a.intervention_id() == intervention_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| a.added_at().cmp(b.added_at()));
        Ok(found)
    }
}
