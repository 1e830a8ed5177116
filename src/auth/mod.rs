//! Auth screen logic: login, registration, OTP entry and KYC documents
//!
//! Validation failures here are values shown inline next to the inputs,
//! not crate errors.

mod kyc;
mod login;
mod otp;
mod register;

pub use kyc::*;
pub use login::*;
pub use otp::*;
pub use register::*;

use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Single inline message for a whole form
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{0}")]
pub struct FormError(pub &'static str);

/// Per-field inline messages, at most one per field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldErrors<F: Ord> {
    errors: BTreeMap<F, &'static str>,
}

impl<F: Ord> Default for FieldErrors<F> {
    fn default() -> Self {
        Self {
            errors: BTreeMap::new(),
        }
    }
}

impl<F: Ord + Copy> FieldErrors<F> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `message` for `field`, replacing any earlier one
    pub fn set(&mut self, field: F, message: &'static str) {
        self.errors.insert(field, message);
    }

    pub fn get(&self, field: F) -> Option<&'static str> {
        self.errors.get(&field).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (F, &'static str)> + '_ {
        self.errors.iter().map(|(f, m)| (*f, *m))
    }

    pub fn clear(&mut self) {
        self.errors.clear();
    }
}

impl<F: Ord + Copy + fmt::Display> fmt::Display for FieldErrors<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, message)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
        }
        Ok(())
    }
}

impl<F: Ord + Copy + fmt::Display + fmt::Debug> std::error::Error for FieldErrors<F> {}
