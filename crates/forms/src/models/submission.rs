//! Wire DTOs for the support-request backend.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use ts_rs::TS;

/// Backend acknowledgement for an accepted support request. The only state
/// that survives the post-success form reset; the request number is what
/// applicants quote for status lookups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct SubmissionReceipt {
    pub request_number: String,
    pub phone_number: String,
    pub message: String,
}

/// Review state of a previously submitted request.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, Display, EnumString, Default,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RequestState {
    #[default]
    Pending,
    UnderReview,
    Approved,
    Rejected,
}

/// Status-lookup response, keyed by request number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct RequestStatus {
    pub request_number: String,
    pub state: RequestState,
    pub message: Option<String>,
}
