//! Typed backend client
//!
//! [`VaultBackend`] is the seam between the screens and whatever answers
//! their requests. [`SimulatedBackend`] stands in for the real service:
//! it waits out a configured latency and returns fixed outcomes.

mod gate;
mod simulated;

pub use gate::*;
pub use simulated::*;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::auth::{DocumentSlot, DocumentUpload};
use crate::model::User;

/// One request type per screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestKind {
    Login,
    Register,
    VerifyOtp,
    ResendOtp,
    KycUpload,
}

impl RequestKind {
    pub fn endpoint(self) -> &'static str {
        match self {
            RequestKind::Login => "POST /api/auth/login",
            RequestKind::Register => "POST /api/auth/register",
            RequestKind::VerifyOtp => "POST /api/auth/verify-otp",
            RequestKind::ResendOtp => "POST /api/auth/resend-otp",
            RequestKind::KycUpload => "POST /api/kyc/upload",
        }
    }
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RequestKind::Login => "login",
            RequestKind::Register => "register",
            RequestKind::VerifyOtp => "verify_otp",
            RequestKind::ResendOtp => "resend_otp",
            RequestKind::KycUpload => "kyc_upload",
        })
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    #[error("Invalid credentials. Access denied.")]
    InvalidCredentials,

    #[error("A {0} request is already in flight")]
    Busy(RequestKind),

    #[error("Request rejected: {0}")]
    Rejected(String),
}

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub bio: String,
    pub tags: Vec<String>,
    pub referral: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyOtpRequest {
    pub email: String,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResendOtpRequest {
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KycUploadRequest {
    pub documents: Vec<(DocumentSlot, DocumentUpload)>,
}

// ============================================================================
// Responses
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user: User,
    pub token: String,
}

/// Account created; the email still has to be confirmed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterAccepted {
    pub verify_email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpVerified {
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpResent {
    pub email: String,
    pub cooldown_secs: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KycStatus {
    UnderReview,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KycReceipt {
    pub slots: Vec<DocumentSlot>,
    pub status: KycStatus,
}

/// Everything the auth screens ask of a backend
#[async_trait]
pub trait VaultBackend: Send + Sync {
    async fn login(&self, request: LoginRequest) -> Result<Session, ClientError>;

    async fn register(&self, request: RegisterRequest) -> Result<RegisterAccepted, ClientError>;

    async fn verify_otp(&self, request: VerifyOtpRequest) -> Result<OtpVerified, ClientError>;

    async fn resend_otp(&self, request: ResendOtpRequest) -> Result<OtpResent, ClientError>;

    async fn upload_kyc(&self, request: KycUploadRequest) -> Result<KycReceipt, ClientError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ClientError::InvalidCredentials.to_string(),
            "Invalid credentials. Access denied."
        );
        assert_eq!(
            ClientError::Busy(RequestKind::VerifyOtp).to_string(),
            "A verify_otp request is already in flight"
        );
    }

    #[test]
    fn test_endpoints() {
        assert_eq!(RequestKind::Login.endpoint(), "POST /api/auth/login");
        assert_eq!(RequestKind::KycUpload.endpoint(), "POST /api/kyc/upload");
    }
}
