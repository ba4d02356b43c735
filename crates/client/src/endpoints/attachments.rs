//! Attachment upload and download endpoints.

use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use tracing::{debug, warn};

use crate::auth::SessionManager;
use crate::endpoints::{check_response, read_json};
use crate::error::Result;
use crate::models::{Attachment, AttachmentContent, AttachmentUpload, Resource};

fn file_part(upload: &AttachmentUpload) -> Part {
    let part = || Part::bytes(upload.bytes.clone()).file_name(upload.file_name.clone());
    match &upload.content_type {
        Some(content_type) => part().mime_str(content_type).unwrap_or_else(|_| {
            warn!(content_type = %content_type, "Ignoring invalid attachment content type");
            part()
        }),
        None => part(),
    }
}

fn upload_form(upload: &AttachmentUpload) -> Form {
    let mut form = Form::new().part("file", file_part(upload));
    if let Some(task_id) = upload.task_id {
        form = form.text("taskId", task_id.to_string());
    }
    if let Some(equipment_id) = upload.equipment_id {
        form = form.text("equipmentId", equipment_id.to_string());
    }
    form
}

/// Upload a file as multipart field `file`.
///
/// The form is rebuilt for each attempt, so the upload survives a token
/// refresh and replay.
pub async fn upload(session: &SessionManager, upload: &AttachmentUpload) -> Result<Attachment> {
    debug!(
        "Uploading attachment {} ({} bytes)",
        upload.file_name,
        upload.bytes.len()
    );

    let url = session.url(Attachment::PATH);
    let response = session
        .send(|http| http.post(&url).multipart(upload_form(upload)))
        .await?;
    let response = check_response(response).await?;
    read_json(response).await
}

/// Download the stored file of an attachment.
pub async fn download(session: &SessionManager, id: &str) -> Result<AttachmentContent> {
    debug!("Downloading attachment {}", id);

    let url = format!("{}/{}/Download", session.url(Attachment::PATH), id);
    let response = session.send(|http| http.get(&url)).await?;
    let response = check_response(response).await?;

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|h| h.to_str().ok())
        .map(|s| s.to_string());
    let bytes = response.bytes().await?.to_vec();

    Ok(AttachmentContent {
        content_type,
        bytes,
    })
}
