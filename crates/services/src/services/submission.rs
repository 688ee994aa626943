//! HTTP adapter for the support-request intake backend.
//!
//! The backend response is decoded exactly once here, into a tagged
//! [`SubmitOutcome`]; nothing downstream re-inspects response shapes.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use forms::models::{FieldValue, FormSchema, FormState, RequestStatus, SubmissionReceipt};
use reqwest::{Client, StatusCode, multipart};
use serde::Deserialize;
use thiserror::Error;

use super::messages;

const INDIVIDUAL_ENDPOINT: &str = "/api/v1/support-requests/individual";
const ORGANIZATION_ENDPOINT: &str = "/api/v1/support-requests/institutional";
const STATUS_ENDPOINT: &str = "/api/v1/support-requests";

#[derive(Debug, Clone, Error)]
pub enum SubmitError {
    #[error("network error: {0}")]
    Transport(String),
    #[error("timeout")]
    Timeout,
    #[error("http {status}: {body}")]
    Http { status: u16, body: String },
    #[error("json error: {0}")]
    Serde(String),
    #[error("attachment read error: {0}")]
    Attachment(String),
    #[error("missing base url: SUPPORT_API_BASE_URL environment variable not set")]
    MissingBaseUrl,
}

/// Decoded backend verdict on a submission attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Accepted(SubmissionReceipt),
    /// Field errors keyed by *backend* field names; callers remap to UI
    /// names via the schema translation table.
    Rejected(HashMap<String, String>),
    /// Intake is closed; shown as a blocking notice, not inline errors.
    ServiceDisabled(String),
}

/// Seam between the form controller and the wire. Lets tests drive the
/// controller without a network.
#[async_trait]
pub trait SubmitBackend: Send + Sync {
    async fn submit(
        &self,
        schema: &FormSchema,
        form: &FormState,
        goals: Option<&[String]>,
    ) -> Result<SubmitOutcome, SubmitError>;
}

/// Client for the support-request intake endpoints.
#[derive(Debug, Clone)]
pub struct SupportClient {
    http: Client,
    base_url: String,
}

impl SupportClient {
    const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

    /// Create a client using the SUPPORT_API_BASE_URL environment variable.
    pub fn from_env() -> Result<Self, SubmitError> {
        let base_url =
            std::env::var("SUPPORT_API_BASE_URL").map_err(|_| SubmitError::MissingBaseUrl)?;
        Self::new(base_url)
    }

    pub fn new(base_url: impl Into<String>) -> Result<Self, SubmitError> {
        let http = Client::builder()
            .timeout(Self::REQUEST_TIMEOUT)
            .user_agent(concat!("support-intake/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SubmitError::Transport(e.to_string()))?;

        let base_url: String = base_url.into();
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub async fn submit_individual(
        &self,
        form: &FormState,
    ) -> Result<SubmitOutcome, SubmitError> {
        self.post_form(INDIVIDUAL_ENDPOINT, forms::schemas::individual(), form, None)
            .await
    }

    pub async fn submit_organization(
        &self,
        form: &FormState,
        goals: &[String],
    ) -> Result<SubmitOutcome, SubmitError> {
        self.post_form(
            ORGANIZATION_ENDPOINT,
            forms::schemas::organization(),
            form,
            Some(goals),
        )
        .await
    }

    /// Look up the review status of a previously submitted request.
    pub async fn request_status(
        &self,
        request_number: &str,
    ) -> Result<RequestStatus, SubmitError> {
        let url = format!(
            "{}{}/{}/status",
            self.base_url, STATUS_ENDPOINT, request_number
        );
        let res = self.http.get(url).send().await.map_err(map_reqwest_error)?;
        match res.status() {
            s if s.is_success() => res
                .json::<RequestStatus>()
                .await
                .map_err(|e| SubmitError::Serde(e.to_string())),
            s => {
                let status = s.as_u16();
                let body = res.text().await.unwrap_or_default();
                Err(SubmitError::Http { status, body })
            }
        }
    }

    async fn post_form(
        &self,
        endpoint: &str,
        schema: &FormSchema,
        form: &FormState,
        goals: Option<&[String]>,
    ) -> Result<SubmitOutcome, SubmitError> {
        let body = build_multipart(schema, form, goals).await?;
        let res = self
            .http
            .post(format!("{}{}", self.base_url, endpoint))
            .multipart(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        decode_response(res).await
    }
}

#[async_trait]
impl SubmitBackend for SupportClient {
    async fn submit(
        &self,
        schema: &FormSchema,
        form: &FormState,
        goals: Option<&[String]>,
    ) -> Result<SubmitOutcome, SubmitError> {
        if schema.has_goals {
            self.submit_organization(form, goals.unwrap_or(&[])).await
        } else {
            self.submit_individual(form).await
        }
    }
}

/// Scalars as text parts, files as binary parts, goals as repeated
/// `goals[]`. Blank and cleared fields are omitted entirely.
async fn build_multipart(
    schema: &FormSchema,
    form: &FormState,
    goals: Option<&[String]>,
) -> Result<multipart::Form, SubmitError> {
    let mut body = multipart::Form::new();
    for rule in &schema.rules {
        match form.get(rule.name) {
            FieldValue::Empty => {}
            FieldValue::Text(text) => {
                let text = text.trim();
                if !text.is_empty() {
                    body = body.text(rule.name, text.to_string());
                }
            }
            FieldValue::File(meta) => {
                let bytes = tokio::fs::read(&meta.path)
                    .await
                    .map_err(|e| SubmitError::Attachment(format!("{}: {e}", meta.file_name)))?;
                let part = multipart::Part::bytes(bytes)
                    .file_name(meta.file_name.clone())
                    .mime_str(&meta.content_type)
                    .map_err(|e| SubmitError::Attachment(e.to_string()))?;
                body = body.part(rule.name, part);
            }
        }
    }
    if let Some(goals) = goals {
        for goal in goals {
            let goal = goal.trim();
            if !goal.is_empty() {
                body = body.text("goals[]", goal.to_string());
            }
        }
    }
    Ok(body)
}

async fn decode_response(res: reqwest::Response) -> Result<SubmitOutcome, SubmitError> {
    match res.status() {
        s if s.is_success() => {
            let receipt = res
                .json::<SubmissionReceipt>()
                .await
                .map_err(|e| SubmitError::Serde(e.to_string()))?;
            Ok(SubmitOutcome::Accepted(receipt))
        }
        StatusCode::SERVICE_UNAVAILABLE => {
            let body = res.text().await.unwrap_or_default();
            let message = serde_json::from_str::<RejectionBody>(&body)
                .ok()
                .and_then(|b| b.message)
                .unwrap_or_else(|| messages::SERVICE_DISABLED.to_string());
            Ok(SubmitOutcome::ServiceDisabled(message))
        }
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            let status = res.status().as_u16();
            let body = res.text().await.unwrap_or_default();
            match decode_rejection(&body) {
                Some(fields) if !fields.is_empty() => Ok(SubmitOutcome::Rejected(fields)),
                _ => Err(SubmitError::Http { status, body }),
            }
        }
        s => {
            let status = s.as_u16();
            let body = res.text().await.unwrap_or_default();
            Err(SubmitError::Http { status, body })
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct RejectionBody {
    #[serde(default)]
    errors: HashMap<String, OneOrMany>,
    #[serde(default)]
    message: Option<String>,
}

/// Backend error values arrive as a single string or an array of strings;
/// the first message wins either way.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    fn into_first(self) -> Option<String> {
        match self {
            Self::One(s) => Some(s),
            Self::Many(v) => v.into_iter().next(),
        }
    }
}

fn decode_rejection(body: &str) -> Option<HashMap<String, String>> {
    if let Ok(parsed) = serde_json::from_str::<RejectionBody>(body)
        && !parsed.errors.is_empty()
    {
        return Some(flatten(parsed.errors));
    }
    // Fallback: a bare field→message map at the top level.
    let mut bare = serde_json::from_str::<HashMap<String, OneOrMany>>(body).ok()?;
    bare.remove("message");
    if bare.is_empty() {
        return None;
    }
    Some(flatten(bare))
}

fn flatten(errors: HashMap<String, OneOrMany>) -> HashMap<String, String> {
    errors
        .into_iter()
        .filter_map(|(field, value)| value.into_first().map(|msg| (field, msg)))
        .collect()
}

fn map_reqwest_error(e: reqwest::Error) -> SubmitError {
    if e.is_timeout() {
        SubmitError::Timeout
    } else {
        SubmitError::Transport(e.to_string())
    }
}
