//! Attachment methods for [`MaintClient`].

use crate::client::MaintClient;
use crate::endpoints;
use crate::error::Result;
use crate::models::{Attachment, AttachmentContent, AttachmentUpload};

impl MaintClient {
    /// List attachments, optionally for one task.
    pub async fn list_attachments(&self, task_id: Option<i64>) -> Result<Vec<Attachment>> {
        let query: Vec<(&str, String)> = task_id
            .map(|id| vec![("taskId", id.to_string())])
            .unwrap_or_default();
        self.list(&query).await
    }

    pub async fn get_attachment(&self, id: i64) -> Result<Attachment> {
        self.get(&id.to_string()).await
    }

    /// Upload a file as a new attachment.
    pub async fn upload_attachment(&self, upload: &AttachmentUpload) -> Result<Attachment> {
        endpoints::upload_attachment(&self.session, upload).await
    }

    /// Download the stored file of an attachment.
    pub async fn download_attachment(&self, id: i64) -> Result<AttachmentContent> {
        endpoints::download_attachment(&self.session, &id.to_string()).await
    }

    pub async fn delete_attachment(&self, id: i64) -> Result<()> {
        self.delete::<Attachment>(&id.to_string()).await
    }
}
