//! In-process stand-in for the auth service

use async_trait::async_trait;
use rand::Rng;
use std::time::Duration;
use tracing::info;

use super::{
    ClientError, KycReceipt, KycStatus, KycUploadRequest, LoginRequest, OtpResent, OtpVerified,
    RegisterAccepted, RegisterRequest, RequestGate, RequestKind, ResendOtpRequest, Session,
    VaultBackend, VerifyOtpRequest,
};
use crate::auth::{DocumentSlot, OTP_LENGTH};
use crate::config::{AuthConfig, LatencyConfig};

/// Waits out the configured latency, then answers with a fixed outcome
///
/// Login is always refused. Everything else is accepted as long as the
/// request is well formed.
#[derive(Debug, Clone)]
pub struct SimulatedBackend {
    latency: LatencyConfig,
    resend_cooldown_secs: u32,
    gate: RequestGate,
}

impl SimulatedBackend {
    pub fn new(latency: LatencyConfig) -> Self {
        Self {
            latency,
            resend_cooldown_secs: AuthConfig::default().otp.resend_cooldown_secs,
            gate: RequestGate::new(),
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self {
            latency: config.latency.clone(),
            resend_cooldown_secs: config.otp.resend_cooldown_secs,
            gate: RequestGate::new(),
        }
    }

    /// Shared with every clone of this backend
    pub fn gate(&self) -> &RequestGate {
        &self.gate
    }

    pub fn is_pending(&self, kind: RequestKind) -> bool {
        self.gate.is_pending(kind)
    }

    // The rng is dropped before the caller awaits
    fn delay_for(&self, kind: RequestKind) -> Duration {
        let base = self.latency.base(kind);
        if self.latency.jitter_ms == 0 {
            return base;
        }
        let extra = rand::thread_rng().gen_range(0..=self.latency.jitter_ms);
        base + Duration::from_millis(extra)
    }

    async fn round_trip(&self, kind: RequestKind) {
        let delay = self.delay_for(kind);
        info!(endpoint = kind.endpoint(), delay_ms = delay.as_millis() as u64, "simulated request");
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl VaultBackend for SimulatedBackend {
    async fn login(&self, request: LoginRequest) -> Result<Session, ClientError> {
        let _in_flight = self.gate.try_acquire(RequestKind::Login)?;
        self.round_trip(RequestKind::Login).await;
        info!(email = %request.email, "login refused");
        Err(ClientError::InvalidCredentials)
    }

    async fn register(&self, request: RegisterRequest) -> Result<RegisterAccepted, ClientError> {
        let _in_flight = self.gate.try_acquire(RequestKind::Register)?;
        self.round_trip(RequestKind::Register).await;
        info!(username = %request.username, tags = request.tags.len(), "account registered");
        Ok(RegisterAccepted {
            verify_email: request.email,
        })
    }

    async fn verify_otp(&self, request: VerifyOtpRequest) -> Result<OtpVerified, ClientError> {
        let _in_flight = self.gate.try_acquire(RequestKind::VerifyOtp)?;
        self.round_trip(RequestKind::VerifyOtp).await;
        let well_formed =
            request.code.len() == OTP_LENGTH && request.code.chars().all(|c| c.is_ascii_digit());
        if !well_formed {
            return Err(ClientError::Rejected(format!(
                "code must be {OTP_LENGTH} digits"
            )));
        }
        Ok(OtpVerified {
            email: request.email,
        })
    }

    async fn resend_otp(&self, request: ResendOtpRequest) -> Result<OtpResent, ClientError> {
        let _in_flight = self.gate.try_acquire(RequestKind::ResendOtp)?;
        self.round_trip(RequestKind::ResendOtp).await;
        Ok(OtpResent {
            email: request.email,
            cooldown_secs: self.resend_cooldown_secs,
        })
    }

    async fn upload_kyc(&self, request: KycUploadRequest) -> Result<KycReceipt, ClientError> {
        let _in_flight = self.gate.try_acquire(RequestKind::KycUpload)?;
        self.round_trip(RequestKind::KycUpload).await;

        let mut slots: Vec<DocumentSlot> = request.documents.iter().map(|(slot, _)| *slot).collect();
        slots.sort();
        slots.dedup();
        let missing: Vec<String> = DocumentSlot::ALL
            .into_iter()
            .filter(|slot| slot.required() && !slots.contains(slot))
            .map(|slot| slot.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(ClientError::Rejected(format!(
                "missing documents: {}",
                missing.join(", ")
            )));
        }
        Ok(KycReceipt {
            slots,
            status: KycStatus::UnderReview,
        })
    }
}
