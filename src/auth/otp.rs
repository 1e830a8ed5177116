//! Six-digit one-time passcode entry and the resend countdown

use super::FormError;
use crate::client::{ResendOtpRequest, VerifyOtpRequest};

pub const OTP_LENGTH: usize = 6;

pub const INCOMPLETE_CODE: FormError = FormError("Enter all 6 digits");
pub const RESEND_NOT_READY: FormError = FormError("Resend not available yet");

/// Digit slots plus the index of the focused slot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OtpInput {
    digits: [Option<char>; OTP_LENGTH],
    focus: usize,
    error: Option<FormError>,
}

impl OtpInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn digit(&self, index: usize) -> Option<char> {
        self.digits.get(index).copied().flatten()
    }

    pub fn error(&self) -> Option<FormError> {
        self.error
    }

    /// Apply a change event on slot `index`
    ///
    /// Anything but digits is ignored and returns false. Only the last typed
    /// digit is kept; a non-empty value moves focus to the next slot.
    pub fn input(&mut self, index: usize, value: &str) -> bool {
        if index >= OTP_LENGTH || !value.chars().all(|c| c.is_ascii_digit()) {
            return false;
        }
        self.digits[index] = value.chars().last();
        self.error = None;
        if !value.is_empty() && index < OTP_LENGTH - 1 {
            self.focus = index + 1;
        }
        true
    }

    /// Clear the slot if it has a digit, otherwise step focus back
    pub fn backspace(&mut self, index: usize) {
        if index >= OTP_LENGTH {
            return;
        }
        if self.digits[index].is_some() {
            self.digits[index] = None;
        } else if index > 0 {
            self.focus = index - 1;
        }
    }

    pub fn move_left(&mut self) {
        self.focus = self.focus.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.focus < OTP_LENGTH - 1 {
            self.focus += 1;
        }
    }

    /// Paste from the clipboard: non-digits are stripped, the first six
    /// digits fill slots from 0. Returns how many slots were written.
    pub fn paste(&mut self, text: &str) -> usize {
        let pasted: Vec<char> = text
            .chars()
            .filter(char::is_ascii_digit)
            .take(OTP_LENGTH)
            .collect();
        if pasted.is_empty() {
            return 0;
        }
        for (slot, digit) in self.digits.iter_mut().zip(&pasted) {
            *slot = Some(*digit);
        }
        self.focus = pasted.len().min(OTP_LENGTH - 1);
        pasted.len()
    }

    pub fn code(&self) -> String {
        self.digits.iter().flatten().collect()
    }

    pub fn filled(&self) -> usize {
        self.digits.iter().filter(|d| d.is_some()).count()
    }

    pub fn is_complete(&self) -> bool {
        self.filled() == OTP_LENGTH
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// The code to submit, or the inline error if slots are missing
    pub fn verification_code(&mut self) -> Result<String, FormError> {
        let code = self.code();
        if code.len() < OTP_LENGTH {
            self.error = Some(INCOMPLETE_CODE);
            return Err(INCOMPLETE_CODE);
        }
        self.error = None;
        Ok(code)
    }
}

/// Seconds until another code may be requested
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResendCountdown {
    cooldown: u32,
    remaining: u32,
}

impl ResendCountdown {
    pub fn new(cooldown_secs: u32) -> Self {
        Self {
            cooldown: cooldown_secs,
            remaining: cooldown_secs,
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Advance one second; returns what is left
    pub fn tick(&mut self) -> u32 {
        self.remaining = self.remaining.saturating_sub(1);
        self.remaining
    }

    pub fn can_resend(&self) -> bool {
        self.remaining == 0
    }

    pub fn restart(&mut self) {
        self.remaining = self.cooldown;
    }
}

/// OTP screen state for one email address
#[derive(Debug, Clone)]
pub struct OtpSession {
    pub email: String,
    pub input: OtpInput,
    pub countdown: ResendCountdown,
}

impl OtpSession {
    pub fn new(email: impl Into<String>, cooldown_secs: u32) -> Self {
        Self {
            email: email.into(),
            input: OtpInput::new(),
            countdown: ResendCountdown::new(cooldown_secs),
        }
    }

    pub fn verify_request(&mut self) -> Result<VerifyOtpRequest, FormError> {
        let code = self.input.verification_code()?;
        Ok(VerifyOtpRequest {
            email: self.email.clone(),
            code,
        })
    }

    /// Start a resend: clears the digits once the countdown has run out
    pub fn begin_resend(&mut self) -> Result<ResendOtpRequest, FormError> {
        if !self.countdown.can_resend() {
            return Err(RESEND_NOT_READY);
        }
        self.input.clear();
        Ok(ResendOtpRequest {
            email: self.email.clone(),
        })
    }

    /// A new code went out; the cooldown starts over
    pub fn finish_resend(&mut self) {
        self.countdown.restart();
    }
}
