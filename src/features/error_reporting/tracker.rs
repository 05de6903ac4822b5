//! # Feature: Error Tracking
//!
//! Forwards captured errors to an external tracker without blocking the
//! caller. Reports are queued on an unbounded channel and delivered by a
//! background task, so a slow or failing tracker never delays a reply.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.0.0: Background delivery to log or webhook sinks

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{debug, error, warn};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use uuid::Uuid;

/// Where and for whom an error happened
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ErrorContext {
    pub request_id: Option<Uuid>,
    pub interaction_id: Option<String>,
    pub command_name: Option<String>,
    pub user_id: Option<String>,
    pub user_tag: Option<String>,
    pub guild_id: Option<String>,
    /// Message of the error that was being reported when this one occurred
    pub original_error: Option<String>,
}

/// One captured error as delivered to a sink
#[derive(Debug, Clone, Serialize)]
pub struct ErrorReport {
    pub message: String,
    /// Outermost first
    pub causes: Vec<String>,
    pub context: ErrorContext,
    pub timestamp: DateTime<Utc>,
}

impl ErrorReport {
    pub fn new(error: &anyhow::Error, context: ErrorContext) -> Self {
        ErrorReport {
            message: error.to_string(),
            causes: error.chain().skip(1).map(|cause| cause.to_string()).collect(),
            context,
            timestamp: Utc::now(),
        }
    }
}

/// Destination for error reports
#[async_trait]
pub trait ErrorSink: Send + Sync {
    async fn send(&self, report: &ErrorReport) -> Result<()>;
}

/// Writes reports to the log only
pub struct LogSink;

#[async_trait]
impl ErrorSink for LogSink {
    async fn send(&self, report: &ErrorReport) -> Result<()> {
        debug!(
            "Error report (no tracker configured): {} | command: {:?} | user: {:?}",
            report.message, report.context.command_name, report.context.user_id
        );
        Ok(())
    }
}

/// POSTs reports as JSON to a tracker webhook
pub struct WebhookSink {
    client: reqwest::Client,
    url: String,
}

impl WebhookSink {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(WebhookSink {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl ErrorSink for WebhookSink {
    async fn send(&self, report: &ErrorReport) -> Result<()> {
        self.client
            .post(&self.url)
            .json(report)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

/// Fire-and-forget handle to the error tracker
#[derive(Clone)]
pub struct ErrorTracker {
    sender: mpsc::UnboundedSender<ErrorReport>,
}

impl ErrorTracker {
    /// Create a tracker with a background delivery task
    ///
    /// Must be called inside a tokio runtime.
    pub fn new(sink: Arc<dyn ErrorSink>) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();

        // Spawn background task for non-blocking delivery
        tokio::spawn(Self::background_sender(sink, receiver));

        ErrorTracker { sender }
    }

    /// Queue an error for delivery (non-blocking, never fails)
    pub fn capture(&self, error: &anyhow::Error, context: ErrorContext) {
        if let Err(e) = self.sender.send(ErrorReport::new(error, context)) {
            warn!("Failed to queue error report: {e}");
        }
    }

    async fn background_sender(
        sink: Arc<dyn ErrorSink>,
        mut receiver: mpsc::UnboundedReceiver<ErrorReport>,
    ) {
        while let Some(report) = receiver.recv().await {
            if let Err(e) = sink.send(&report).await {
                error!("Failed to deliver error report '{}': {e}", report.message);
            }
        }
    }
}
