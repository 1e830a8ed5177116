//! Auth flow configuration structures

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::client::RequestKind;

/// Simulated round-trip time per request kind, in milliseconds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatencyConfig {
    pub login_ms: u64,
    pub register_ms: u64,
    pub verify_otp_ms: u64,
    pub resend_otp_ms: u64,
    pub kyc_upload_ms: u64,
    /// Upper bound of random extra delay added to every request
    pub jitter_ms: u64,
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            login_ms: 1500,
            register_ms: 1500,
            verify_otp_ms: 1500,
            resend_otp_ms: 1000,
            kyc_upload_ms: 2000,
            jitter_ms: 0,
        }
    }
}

impl LatencyConfig {
    /// Zero latency everywhere, for tests and scripted runs
    pub fn instant() -> Self {
        Self {
            login_ms: 0,
            register_ms: 0,
            verify_otp_ms: 0,
            resend_otp_ms: 0,
            kyc_upload_ms: 0,
            jitter_ms: 0,
        }
    }

    pub fn base(&self, kind: RequestKind) -> Duration {
        let ms = match kind {
            RequestKind::Login => self.login_ms,
            RequestKind::Register => self.register_ms,
            RequestKind::VerifyOtp => self.verify_otp_ms,
            RequestKind::ResendOtp => self.resend_otp_ms,
            RequestKind::KycUpload => self.kyc_upload_ms,
        };
        Duration::from_millis(ms)
    }
}

/// Client-side KYC upload constraints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KycLimits {
    pub max_bytes: u64,
    pub allowed_mime_types: Vec<String>,
}

impl Default for KycLimits {
    fn default() -> Self {
        Self {
            max_bytes: 5 * 1024 * 1024,
            allowed_mime_types: ["image/jpeg", "image/png", "image/webp", "application/pdf"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl KycLimits {
    pub fn allows(&self, mime_type: &str) -> bool {
        self.allowed_mime_types.iter().any(|m| m == mime_type)
    }
}

/// OTP screen configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OtpConfig {
    pub resend_cooldown_secs: u32,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            resend_cooldown_secs: 60,
        }
    }
}

/// Auth flow configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub latency: LatencyConfig,
    pub kyc: KycLimits,
    pub otp: OtpConfig,
}
