use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, error, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::core::config::SubmissionConfig;
use crate::core::error::SubmissionError;
use crate::features::log_form::dtos::LogRecord;
use crate::features::submission::multipart::build_log_form;

/// Observable pipeline state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    InFlight,
}

/// Successful submission; the caller should reset the form
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct Acknowledged {
    pub submission_id: Uuid,
    pub status: u16,
    /// Parsed endpoint reply, logged but otherwise unused
    pub response: serde_json::Value,
}

/// Releases the in-flight flag on every exit path, including a dropped future
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self, SubmissionError> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| SubmissionError::AlreadyInFlight)?;
        Ok(Self { flag })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Sends log snapshots to the collection endpoint, one at a time
pub struct SubmissionPipeline {
    client: reqwest::Client,
    endpoint_url: String,
    in_flight: AtomicBool,
}

impl SubmissionPipeline {
    pub fn new(config: &SubmissionConfig) -> Result<Self, SubmissionError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| SubmissionError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint_url: config.endpoint_url.clone(),
            in_flight: AtomicBool::new(false),
        })
    }

    pub fn state(&self) -> PipelineState {
        if self.in_flight.load(Ordering::Acquire) {
            PipelineState::InFlight
        } else {
            PipelineState::Idle
        }
    }

    pub fn endpoint_url(&self) -> &str {
        &self.endpoint_url
    }

    /// Submit a snapshot as a single multipart POST
    ///
    /// Fails fast with `AlreadyInFlight` while another submission is pending.
    /// Transport errors, timeouts and non-2xx replies all come back as errors;
    /// only a 2xx reply with a JSON body counts as acknowledged.
    pub async fn submit(&self, record: LogRecord) -> Result<Acknowledged, SubmissionError> {
        let _guard = InFlightGuard::acquire(&self.in_flight).inspect_err(|_| {
            warn!("Rejected submission: another submission is in flight");
        })?;

        let submission_id = Uuid::now_v7();
        let span = info_span!("submit_log", %submission_id);

        self.send(submission_id, &record).instrument(span).await
    }

    async fn send(
        &self,
        submission_id: Uuid,
        record: &LogRecord,
    ) -> Result<Acknowledged, SubmissionError> {
        debug!(
            "Building log form: crew={}, photos={}",
            record.crew.len(),
            record.photos.len()
        );
        let form = build_log_form(record).await?;

        info!("Submitting log to {}", self.endpoint_url);
        let response = self
            .client
            .post(&self.endpoint_url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                error!("Log submission request failed: {:?}", e);
                if e.is_timeout() {
                    SubmissionError::Timeout(e.to_string())
                } else {
                    SubmissionError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Collection endpoint returned status: {}", status);
            return Err(SubmissionError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let reply: serde_json::Value = response.json().await.map_err(|e| {
            error!("Failed to parse endpoint response: {:?}", e);
            SubmissionError::InvalidResponse(e.to_string())
        })?;

        info!("Log submitted successfully: {}", reply);

        Ok(Acknowledged {
            submission_id,
            status: status.as_u16(),
            response: reply,
        })
    }
}
