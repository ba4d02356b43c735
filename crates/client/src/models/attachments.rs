//! Attachment metadata.

use serde::{Deserialize, Serialize};

use super::Resource;

/// A file attached to a task or a piece of equipment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub id: i64,
    pub task_id: Option<i64>,
    pub equipment_id: Option<i64>,
    #[serde(default)]
    pub file_name: String,
    pub content_type: Option<String>,
    pub size: Option<u64>,
    pub uploaded_at: Option<String>,
}

impl Resource for Attachment {
    const PATH: &'static str = "/Attachments";
    const NAME: &'static str = "attachment";
}

/// An attachment to upload.
#[derive(Debug, Clone)]
pub struct AttachmentUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
    pub task_id: Option<i64>,
    pub equipment_id: Option<i64>,
}

/// A downloaded attachment body.
#[derive(Debug, Clone)]
pub struct AttachmentContent {
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}
