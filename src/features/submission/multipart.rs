use reqwest::multipart::{Form, Part};
use tracing::debug;

use crate::core::error::SubmissionError;
use crate::features::log_form::dtos::LogRecord;
use crate::shared::constants::PHOTO_CONTENT_TYPE;

/// File name for the photo at zero-based `index`
pub fn photo_file_name(index: usize) -> String {
    format!("photo_{}.jpg", index + 1)
}

/// Package a log record as the multipart body the collection endpoint expects
///
/// Text fields come first (`foreman`, `date`, `employees`, `taskDescription`),
/// then one `photos` part per photo in attachment order. Every photo is
/// labelled `image/jpeg` whatever its source encoding.
pub async fn build_log_form(record: &LogRecord) -> Result<Form, SubmissionError> {
    let employees = record
        .employees_json()
        .map_err(|e| SubmissionError::Encoding(format!("Failed to encode crew: {}", e)))?;

    let mut form = Form::new()
        .text("foreman", record.foreman.clone())
        .text("date", record.date.clone())
        .text("employees", employees)
        .text("taskDescription", record.task_description.clone());

    for (index, photo) in record.photos.iter().enumerate() {
        let path = photo.local_path();
        let data = tokio::fs::read(&path)
            .await
            .map_err(|e| SubmissionError::Photo {
                uri: photo.uri.clone(),
                message: e.to_string(),
            })?;

        let file_name = photo_file_name(index);
        debug!(
            "Attaching {} as {} ({} bytes)",
            path.display(),
            file_name,
            data.len()
        );

        let part = Part::bytes(data)
            .file_name(file_name)
            .mime_str(PHOTO_CONTENT_TYPE)
            .map_err(|e| SubmissionError::Encoding(format!("Invalid photo content type: {}", e)))?;
        form = form.part("photos", part);
    }

    Ok(form)
}
