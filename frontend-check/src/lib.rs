//! Frontend to backend integration check.
//!
//! Posts a simulation request to the frontend's `/api/generate-simulation`
//! proxy route and reports whether the frontend managed to reach the backend.
//!
//! ## Usage
//!
//! ```bash
//! # Start the backend on :8001 and the frontend dev server on :3000
//! cargo run -p frontend-check
//! ```

use serde::Serialize;
use std::sync::Once;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Proxy route exposed by the frontend.
pub const GENERATE_SIMULATION_PATH: &str = "/api/generate-simulation";

/// How long the proxy gets to answer; simulation generation is slow.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Characters of a failed response body kept for the report.
pub const BODY_EXCERPT_CHARS: usize = 500;

static INIT: Once = Once::new();

/// Initialize tracing for the command-line report (only once).
pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("info,frontend_check=debug")
            .try_init()
            .ok();
    });
}

/// Initialize tracing for tests (only once); output is captured per test.
pub fn init_test_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("info,frontend_check=debug")
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// Endpoint configuration from environment variables.
#[derive(Debug, Clone)]
pub struct FrontendEndpoints {
    pub frontend: String,
    /// Where the frontend is expected to forward to; only used in diagnostics.
    pub backend: String,
}

impl FrontendEndpoints {
    /// Load endpoints from environment variables or use defaults.
    pub fn from_env() -> Self {
        Self {
            frontend: std::env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            backend: std::env::var("BACKEND_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:8001".to_string()),
        }
    }

    pub fn generate_simulation_url(&self) -> String {
        format!(
            "{}{}",
            self.frontend.trim_end_matches('/'),
            GENERATE_SIMULATION_PATH
        )
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SimulationRequest {
    pub title: String,
    pub context: String,
    pub level: String,
}

impl Default for SimulationRequest {
    fn default() -> Self {
        Self {
            title: "Frontend Test Project".to_string(),
            context: "Testing connection".to_string(),
            level: "L1".to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("could not connect to {url}")]
    Connect {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("no response from {url} within {timeout:?}")]
    Timeout { url: String, timeout: Duration },

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// What came back from the proxy.
#[derive(Debug, Clone)]
pub struct ProbeOutcome {
    pub status: u16,
    pub elapsed: Duration,
    /// `simulation_id` from a 200 JSON body, when present.
    pub simulation_id: Option<String>,
    /// Leading slice of the raw body.
    pub body_excerpt: String,
}

impl ProbeOutcome {
    pub fn is_success(&self) -> bool {
        self.status == 200
    }

    /// Hints for reading a failed probe.
    pub fn diagnostics(&self, endpoints: &FrontendEndpoints) -> Vec<String> {
        match self.status {
            500 | 502 => vec![
                "If status is 500/502, the frontend might be failing to reach the backend."
                    .to_string(),
                format!("Check the backend is running at {}", endpoints.backend),
                format!(
                    "Check .env.local has NEXT_PUBLIC_API_URL={}",
                    endpoints.backend
                ),
            ],
            _ => Vec::new(),
        }
    }
}

/// Sends one simulation request through the frontend proxy.
pub async fn probe_generate_simulation(
    endpoints: &FrontendEndpoints,
    request: &SimulationRequest,
    timeout: Duration,
) -> Result<ProbeOutcome, ProbeError> {
    let url = endpoints.generate_simulation_url();
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|source| ProbeError::Request {
            url: url.clone(),
            source,
        })?;

    tracing::debug!(%url, title = %request.title, "Posting simulation request");

    let start = Instant::now();
    let response = client
        .post(&url)
        .json(request)
        .send()
        .await
        .map_err(|source| classify(&url, timeout, source))?;

    let status = response.status().as_u16();
    let body = response
        .text()
        .await
        .map_err(|source| classify(&url, timeout, source))?;
    let elapsed = start.elapsed();

    let simulation_id = if status == 200 {
        simulation_id(&body)
    } else {
        None
    };

    tracing::info!(status, elapsed_ms = elapsed.as_millis() as u64, "Proxy responded");

    Ok(ProbeOutcome {
        status,
        elapsed,
        simulation_id,
        body_excerpt: body.chars().take(BODY_EXCERPT_CHARS).collect(),
    })
}

fn classify(url: &str, timeout: Duration, source: reqwest::Error) -> ProbeError {
    if source.is_connect() {
        ProbeError::Connect {
            url: url.to_string(),
            source,
        }
    } else if source.is_timeout() {
        ProbeError::Timeout {
            url: url.to_string(),
            timeout,
        }
    } else {
        ProbeError::Request {
            url: url.to_string(),
            source,
        }
    }
}

fn simulation_id(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("simulation_id")? {
        serde_json::Value::String(id) => Some(id.clone()),
        serde_json::Value::Null => None,
        other => Some(other.to_string()),
    }
}
