//! KYC document slots and client-side upload checks

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::client::KycUploadRequest;
use crate::config::KycLimits;
use crate::error::VaultError;

const MIB: u64 = 1024 * 1024;

/// Named document slot on the KYC screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentSlot {
    Aadhaar,
    Pan,
    Selfie,
}

impl DocumentSlot {
    pub const ALL: [DocumentSlot; 3] = [DocumentSlot::Aadhaar, DocumentSlot::Pan, DocumentSlot::Selfie];

    pub fn id(self) -> &'static str {
        match self {
            DocumentSlot::Aadhaar => "aadhaar",
            DocumentSlot::Pan => "pan",
            DocumentSlot::Selfie => "selfie",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DocumentSlot::Aadhaar => "Aadhaar Card",
            DocumentSlot::Pan => "PAN Card",
            DocumentSlot::Selfie => "Selfie with ID",
        }
    }

    /// Every slot is currently mandatory
    pub fn required(self) -> bool {
        true
    }
}

impl fmt::Display for DocumentSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for DocumentSlot {
    type Err = VaultError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        DocumentSlot::ALL
            .into_iter()
            .find(|slot| slot.id() == wanted)
            .ok_or_else(|| VaultError::UnknownDocumentSlot(s.to_string()))
    }
}

/// File picked for a slot; only metadata is inspected
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentUpload {
    pub file_name: String,
    pub mime_type: String,
    pub size_bytes: u64,
}

impl DocumentUpload {
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            size_bytes,
        }
    }

    pub fn preview_kind(&self) -> PreviewKind {
        if self.mime_type.starts_with("image/") {
            PreviewKind::Image
        } else {
            PreviewKind::Pdf
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewKind {
    Image,
    Pdf,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UploadError {
    #[error("Invalid file type. Use JPG, PNG or PDF.")]
    InvalidType(String),

    #[error("File too large. Max {max_mb}MB.")]
    TooLarge { size_bytes: u64, max_mb: u64 },
}

/// Type first, then size
pub fn validate_upload(upload: &DocumentUpload, limits: &KycLimits) -> Result<PreviewKind, UploadError> {
    if !limits.allows(&upload.mime_type) {
        return Err(UploadError::InvalidType(upload.mime_type.clone()));
    }
    if upload.size_bytes > limits.max_bytes {
        return Err(UploadError::TooLarge {
            size_bytes: upload.size_bytes,
            max_mb: limits.max_bytes / MIB,
        });
    }
    Ok(upload.preview_kind())
}

/// KYC screen state
#[derive(Debug, Clone, Default)]
pub struct KycForm {
    limits: KycLimits,
    files: BTreeMap<DocumentSlot, DocumentUpload>,
    errors: BTreeMap<DocumentSlot, UploadError>,
}

impl KycForm {
    pub fn new(limits: KycLimits) -> Self {
        Self {
            limits,
            ..Default::default()
        }
    }

    /// A rejected file leaves the slot as it was
    pub fn attach(&mut self, slot: DocumentSlot, upload: DocumentUpload) -> Result<PreviewKind, UploadError> {
        match validate_upload(&upload, &self.limits) {
            Ok(preview) => {
                self.errors.remove(&slot);
                self.files.insert(slot, upload);
                Ok(preview)
            }
            Err(err) => {
                tracing::warn!(%slot, file = %upload.file_name, error = %err, "upload rejected");
                self.errors.insert(slot, err.clone());
                Err(err)
            }
        }
    }

    pub fn remove(&mut self, slot: DocumentSlot) -> Option<DocumentUpload> {
        self.errors.remove(&slot);
        self.files.remove(&slot)
    }

    pub fn file(&self, slot: DocumentSlot) -> Option<&DocumentUpload> {
        self.files.get(&slot)
    }

    pub fn error(&self, slot: DocumentSlot) -> Option<&UploadError> {
        self.errors.get(&slot)
    }

    pub fn uploaded_count(&self) -> usize {
        self.files.len()
    }

    pub fn progress_percent(&self) -> f64 {
        self.uploaded_count() as f64 / DocumentSlot::ALL.len() as f64 * 100.0
    }

    pub fn missing(&self) -> Vec<DocumentSlot> {
        DocumentSlot::ALL
            .into_iter()
            .filter(|slot| slot.required() && !self.files.contains_key(slot))
            .collect()
    }

    pub fn all_required_uploaded(&self) -> bool {
        self.missing().is_empty()
    }

    /// Request carrying every attached document, or the slots still missing
    pub fn submission(&self) -> Result<KycUploadRequest, Vec<DocumentSlot>> {
        let missing = self.missing();
        if !missing.is_empty() {
            return Err(missing);
        }
        Ok(KycUploadRequest {
            documents: self
                .files
                .iter()
                .map(|(slot, upload)| (*slot, upload.clone()))
                .collect(),
        })
    }
}
