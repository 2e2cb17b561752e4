use tracing::{info, warn};
use validator::{Validate, ValidationErrors};

use crate::core::error::Result;
use crate::features::log_form::LogFormModel;
use crate::features::photos::{PhotoPicker, PhotoSelectionService};
use crate::features::submission::{Acknowledged, PipelineState, SubmissionPipeline};

/// One editing session of the log entry screen
///
/// Owns the form model and routes photo selection and submission through
/// it, so a successful submission always resets the form and a failed one
/// never touches it.
pub struct LogEntrySession<P> {
    model: LogFormModel,
    photos: PhotoSelectionService<P>,
    pipeline: SubmissionPipeline,
}

impl<P: PhotoPicker> LogEntrySession<P> {
    pub fn new(model: LogFormModel, picker: P, pipeline: SubmissionPipeline) -> Self {
        Self {
            model,
            photos: PhotoSelectionService::new(picker),
            pipeline,
        }
    }

    pub fn model(&self) -> &LogFormModel {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut LogFormModel {
        &mut self.model
    }

    pub fn picker_mut(&mut self) -> &mut P {
        self.photos.picker_mut()
    }

    #[allow(dead_code)]
    pub fn pipeline_state(&self) -> PipelineState {
        self.pipeline.state()
    }

    pub async fn select_photos(&mut self) -> Result<usize> {
        self.photos.select_photos(&mut self.model).await
    }

    /// Business checks on the current form; advisory only
    pub fn review(&self) -> std::result::Result<(), ValidationErrors> {
        self.model.snapshot().validate()
    }

    /// Submit a snapshot of the form, resetting it once acknowledged
    pub async fn submit(&mut self) -> Result<Acknowledged> {
        let snapshot = self.model.snapshot();

        match self.pipeline.submit(snapshot).await {
            Ok(ack) => {
                info!(
                    "Log {} acknowledged with status {}",
                    ack.submission_id, ack.status
                );
                self.model.reset();
                Ok(ack)
            }
            Err(e) => {
                warn!("Log submission failed, form kept for retry: {}", e);
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SubmissionConfig;
    use crate::core::error::{AppError, SubmissionError};
    use crate::features::log_form::dtos::PhotoRef;
    use crate::features::log_form::EmployeeDirectory;
    use crate::shared::test_helpers::FakeCollectionEndpoint;
    use async_trait::async_trait;
    use axum::http::StatusCode;
    use std::time::Duration;

    /// Picker that hands back pre-written files
    struct FixedPicker {
        photos: Vec<PhotoRef>,
    }

    #[async_trait]
    impl PhotoPicker for FixedPicker {
        async fn request_permission(&mut self) -> bool {
            true
        }

        async fn pick_images(&mut self, max_count: usize) -> Option<Vec<PhotoRef>> {
            let mut picked = std::mem::take(&mut self.photos);
            picked.truncate(max_count);
            (!picked.is_empty()).then_some(picked)
        }
    }

    fn session(url: String, photos: Vec<PhotoRef>) -> LogEntrySession<FixedPicker> {
        let pipeline = SubmissionPipeline::new(&SubmissionConfig {
            endpoint_url: url,
            request_timeout: Duration::from_secs(5),
        })
        .unwrap();
        LogEntrySession::new(
            LogFormModel::new(EmployeeDirectory::default()),
            FixedPicker { photos },
            pipeline,
        )
    }

    fn fill(session: &mut LogEntrySession<FixedPicker>) {
        let model = session.model_mut();
        model.set_foreman("Dana");
        model.set_date("06/14/2025");
        model.set_task_description("Set trusses");
        model.select_candidate("Employee 1").unwrap();
        model.add_pending_as_crew_entry().unwrap();
        model.set_hours("Employee 1", "8");
        model.select_candidate("Employee 4").unwrap();
    }

    fn temp_photo(tag: &str) -> PhotoRef {
        let path = std::env::temp_dir().join(format!(
            "foreman-log-session-{}-{}.jpg",
            tag,
            uuid::Uuid::new_v4()
        ));
        std::fs::write(&path, b"jpeg-bytes").unwrap();
        PhotoRef::new(path.to_string_lossy().into_owned())
    }

    #[tokio::test]
    async fn test_failed_submission_preserves_form() {
        let endpoint = FakeCollectionEndpoint::start(StatusCode::BAD_GATEWAY, "{}")
            .await
            .unwrap();
        let mut session = session(endpoint.url(), vec![temp_photo("fail")]);
        fill(&mut session);
        session.select_photos().await.unwrap();
        let before = session.model().clone();

        let result = session.submit().await;
        assert!(matches!(
            result,
            Err(AppError::Submission(SubmissionError::Rejected {
                status: 502,
                ..
            }))
        ));
        assert_eq!(session.model(), &before);
        assert_eq!(session.model().foreman(), "Dana");
        assert_eq!(session.model().date(), "06/14/2025");
        assert_eq!(session.model().crew().len(), 1);
        assert_eq!(session.model().photos().len(), 1);
        assert_eq!(session.pipeline_state(), PipelineState::Idle);
    }

    #[tokio::test]
    async fn test_acknowledged_submission_resets_form() {
        let endpoint = FakeCollectionEndpoint::start(StatusCode::OK, r#"{"status":"saved"}"#)
            .await
            .unwrap();
        let mut session = session(endpoint.url(), vec![temp_photo("ok")]);
        fill(&mut session);
        session.select_photos().await.unwrap();

        session.submit().await.unwrap();

        assert_eq!(
            session.model(),
            &LogFormModel::new(EmployeeDirectory::default())
        );
        assert_eq!(session.model().pending_selection(), None);
        assert_eq!(endpoint.requests().await.len(), 1);
    }

    #[tokio::test]
    async fn test_review_reports_but_does_not_block() {
        let endpoint = FakeCollectionEndpoint::start(StatusCode::OK, "{}")
            .await
            .unwrap();
        let mut session = session(endpoint.url(), Vec::new());
        session.model_mut().set_date("6/14");

        let errors = session.review().unwrap_err();
        assert!(errors.field_errors().contains_key("date"));
        assert!(errors.field_errors().contains_key("foreman"));

        session.submit().await.unwrap();
        assert_eq!(endpoint.requests().await.len(), 1);
    }
}
