//! Typed client for the analysis job API the console screens poll.
//!
//! The backend exposes three endpoints: submit an analysis job, poll its
//! status, and fetch the finished result document. Several base URLs may
//! serve the API (primary, dev proxy, asset host); each request walks the
//! candidate list and returns the first success.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lifecycle of an analysis session as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
	/// No job submitted yet.
	Idle,
	/// Upload in flight.
	Uploading,
	/// Accepted, waiting for a worker.
	Queued,
	/// Analysis running.
	Processing,
	/// Results available.
	Complete,
	/// Analysis failed.
	Failed,
}

impl SessionStatus {
	/// Returns `true` once polling can stop.
	pub fn is_terminal(&self) -> bool {
		matches!(self, Self::Complete | Self::Failed)
	}
}

/// Response to a submitted analysis job.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeAccepted {
	/// Identifier to poll with.
	pub job_id: String,
	/// Initial status, normally [`SessionStatus::Queued`].
	pub status: SessionStatus,
}

/// Response to a status poll.
#[derive(Debug, Clone, Deserialize)]
pub struct JobStatusResponse {
	/// Current job status.
	pub status: SessionStatus,
	/// Session identifier, present once analysis produced one.
	#[serde(default)]
	pub session_id: Option<String>,
	/// Error text when the job failed.
	#[serde(default)]
	pub error: Option<String>,
}

/// Error type for session API calls.
#[derive(Debug, Error)]
pub enum SessionError {
	/// The response body could not be decoded.
	#[error("invalid response body: {0}")]
	Decode(#[from] reqwest::Error),
	/// Every candidate base URL failed; carries the last failure.
	#[error("all API bases failed: {0}")]
	AllBasesFailed(String),
}

/// Builds the ordered, deduplicated list of candidate API base URLs.
///
/// Trailing slashes are trimmed. The proxy override is taken as-is; the
/// asset host only qualifies when it is an absolute `http` URL.
pub fn resolve_api_bases(
	primary: &str,
	proxy_override: Option<&str>,
	asset_base: Option<&str>,
) -> Vec<String> {
	let mut bases = Vec::new();
	let mut push = |base: &str| {
		let trimmed = base.trim_end_matches('/');
		if !trimmed.is_empty() && !bases.iter().any(|b| b == trimmed) {
			bases.push(trimmed.to_string());
		}
	};

	push(primary);
	if let Some(proxy) = proxy_override {
		push(proxy);
	}
	if let Some(asset) = asset_base {
		if asset.starts_with("http") {
			push(asset);
		}
	}

	bases
}

/// HTTP client for the session job API.
#[derive(Debug, Clone)]
pub struct SessionClient {
	bases: Vec<String>,
	http: reqwest::Client,
}

impl SessionClient {
	/// Creates a client against a single base URL.
	pub fn new(primary: &str) -> Self {
		Self::with_bases(resolve_api_bases(primary, None, None))
	}

	/// Creates a client that walks the given base URLs in order.
	pub fn with_bases(bases: Vec<String>) -> Self {
		Self {
			bases,
			http: reqwest::Client::new(),
		}
	}

	/// Returns the candidate base URLs in walk order.
	pub fn bases(&self) -> &[String] {
		&self.bases
	}

	/// Submits an analysis job.
	pub async fn submit_analysis(
		&self,
		payload: &serde_json::Value,
	) -> Result<AnalyzeAccepted, SessionError> {
		self.request("/analyze", Some(payload)).await
	}

	/// Polls the status of a submitted job.
	pub async fn poll_status(&self, job_id: &str) -> Result<JobStatusResponse, SessionError> {
		self.request(&format!("/status/{job_id}"), None).await
	}

	/// Fetches the structured result document for a finished job.
	pub async fn fetch_results(&self, job_id: &str) -> Result<serde_json::Value, SessionError> {
		self.request(&format!("/results/{job_id}"), None).await
	}

	async fn request<T: serde::de::DeserializeOwned>(
		&self,
		path: &str,
		body: Option<&serde_json::Value>,
	) -> Result<T, SessionError> {
		let mut last_error = "request failed".to_string();

		for base in &self.bases {
			let url = format!("{base}{path}");
			let request = match body {
				Some(json) => self.http.post(&url).json(json),
				None => self.http.get(&url),
			};

			match request.send().await {
				Ok(response) if response.status().is_success() => {
					return Ok(response.json().await?);
				}
				Ok(response) => {
					last_error = format!(
						"{} {}",
						response.status().as_u16(),
						response.status().canonical_reason().unwrap_or("")
					);
					tracing::debug!(%url, status = %last_error, "API base rejected request");
				}
				Err(err) => {
					last_error = err.to_string();
					tracing::debug!(%url, error = %last_error, "API base unreachable");
				}
			}
		}

		Err(SessionError::AllBasesFailed(last_error))
	}
}
