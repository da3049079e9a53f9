//! JSON request/response contract for hosts that expose the calculator over
//! HTTP. Routing and authentication stay with the host; this module only maps
//! a request body to a status code and a response envelope.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::amortization::{self, AmortizationResult, LoanRequest};
use crate::error::LoanCalcError;
use crate::reporting::{summarize, CalculationRecord, CalculationStats};

pub const STATUS_OK: u16 = 200;
pub const STATUS_BAD_REQUEST: u16 = 400;

/// Error code reported for any rejected calculation request.
pub const INVALID_DATA_CODE: &str = "invalid_data";
/// User-facing message for any rejected calculation request.
pub const INVALID_DATA_MESSAGE: &str = "Invalid input values";

/// Structured error body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn invalid_data() -> Self {
        Self {
            code: INVALID_DATA_CODE.into(),
            message: INVALID_DATA_MESSAGE.into(),
        }
    }
}

/// `{"success": bool, "data": ...}` envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    pub data: T,
}

/// Payload of a calculation reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CalculateReply {
    Calculated(AmortizationResult),
    Rejected(ApiError),
}

/// Status code plus envelope, ready for the host to write out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: u16,
    pub body: ApiEnvelope<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn to_json(&self) -> Result<String, LoanCalcError> {
        Ok(serde_json::to_string(&self.body)?)
    }
}

/// Answer a calculation request body.
///
/// Malformed bodies and out-of-range values both map to `400 invalid_data`;
/// the underlying reason is logged but not echoed to the client.
pub fn handle_calculate(body: &str) -> ApiResponse<CalculateReply> {
    match serde_json::from_str::<LoanRequest>(body) {
        Ok(request) => respond(&request),
        Err(e) => {
            tracing::info!(error = %e, "malformed calculation request");
            reject()
        }
    }
}

/// Answer an already-decoded calculation request.
pub fn respond(request: &LoanRequest) -> ApiResponse<CalculateReply> {
    match amortization::amortize(request) {
        Ok(result) => ApiResponse {
            status: STATUS_OK,
            body: ApiEnvelope {
                success: true,
                data: CalculateReply::Calculated(result),
            },
        },
        Err(e) => {
            tracing::info!(error = %e, "rejected calculation request");
            reject()
        }
    }
}

fn reject() -> ApiResponse<CalculateReply> {
    ApiResponse {
        status: STATUS_BAD_REQUEST,
        body: ApiEnvelope {
            success: false,
            data: CalculateReply::Rejected(ApiError::invalid_data()),
        },
    }
}

/// Answer a statistics request over the supplied log.
pub fn handle_stats(
    records: &[CalculationRecord],
    as_of: NaiveDate,
    recent_limit: usize,
) -> ApiResponse<CalculationStats> {
    ApiResponse {
        status: STATUS_OK,
        body: ApiEnvelope {
            success: true,
            data: summarize(records, as_of, recent_limit),
        },
    }
}
