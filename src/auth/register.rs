//! Two-step registration: account details, then profile

use once_cell::sync::Lazy;
use regex::Regex;
use smallvec::SmallVec;
use std::fmt;

use super::{FieldErrors, FormError};
use crate::client::RegisterRequest;

static USERNAME_FORBIDDEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9_]").expect("static pattern"));
static HAS_UPPERCASE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Z]").expect("static pattern"));
static HAS_DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]").expect("static pattern"));
static HAS_SYMBOL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9]").expect("static pattern"));

const MIN_USERNAME_LEN: usize = 3;
const MIN_PASSWORD_LEN: usize = 8;
const LONG_PASSWORD_LEN: usize = 12;

pub const MAX_EXPERTISE_TAGS: usize = 5;
pub const MAX_BIO_CHARS: usize = 280;

pub const EXPERTISE_TAGS: [&str; 12] = [
    "Network Security",
    "Malware Analysis",
    "Penetration Testing",
    "Cryptography",
    "Web Security",
    "Reverse Engineering",
    "Forensics",
    "Cloud Security",
    "OSINT",
    "Social Engineering",
    "Exploit Dev",
    "Threat Intel",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RegisterField {
    Username,
    Email,
    Password,
    Confirm,
}

impl fmt::Display for RegisterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RegisterField::Username => "username",
            RegisterField::Email => "email",
            RegisterField::Password => "password",
            RegisterField::Confirm => "confirm",
        })
    }
}

/// Step 1 fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountDetails {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm: String,
}

impl AccountDetails {
    /// Later rules for the same field override earlier ones
    pub fn validate(&self) -> Result<(), FieldErrors<RegisterField>> {
        let mut errors = FieldErrors::new();

        if self.username.chars().count() < MIN_USERNAME_LEN {
            errors.set(RegisterField::Username, "Min 3 characters");
        }
        if USERNAME_FORBIDDEN.is_match(&self.username) {
            errors.set(RegisterField::Username, "Only lowercase, numbers, underscore");
        }
        if !self.email.contains('@') {
            errors.set(RegisterField::Email, "Valid email required");
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            errors.set(RegisterField::Password, "Min 8 characters");
        }
        if self.password != self.confirm {
            errors.set(RegisterField::Confirm, "Passphrases do not match");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn strength(&self) -> PasswordStrength {
        PasswordStrength::of(&self.password)
    }
}

/// Password strength score, 0..=5
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PasswordStrength(u8);

impl PasswordStrength {
    pub fn of(password: &str) -> Self {
        let len = password.chars().count();
        let checks = [
            len >= MIN_PASSWORD_LEN,
            len >= LONG_PASSWORD_LEN,
            HAS_UPPERCASE.is_match(password),
            HAS_DIGIT.is_match(password),
            HAS_SYMBOL.is_match(password),
        ];
        Self(checks.iter().filter(|passed| **passed).count() as u8)
    }

    pub fn score(self) -> u8 {
        self.0
    }

    pub fn label(self) -> &'static str {
        match self.0 {
            0 => "",
            1 | 2 => "WEAK",
            3 => "FAIR",
            _ => "STRONG",
        }
    }

    pub fn color(self) -> Option<&'static str> {
        match self.0 {
            0 => None,
            1 | 2 => Some("#ef4444"),
            3 => Some("#f59e0b"),
            _ => Some("#10b981"),
        }
    }
}

/// Outcome of toggling an expertise tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagToggle {
    Added,
    Removed,
    LimitReached,
    Unknown,
}

/// Step 2 fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileDetails {
    bio: String,
    pub referral: String,
    tags: SmallVec<[&'static str; MAX_EXPERTISE_TAGS]>,
}

impl ProfileDetails {
    /// Keeps the first 280 characters
    pub fn set_bio(&mut self, bio: &str) {
        self.bio = bio.chars().take(MAX_BIO_CHARS).collect();
    }

    pub fn bio(&self) -> &str {
        &self.bio
    }

    /// Character count for the `n/280` counter
    pub fn bio_len(&self) -> usize {
        self.bio.chars().count()
    }

    pub fn tags(&self) -> &[&'static str] {
        &self.tags
    }

    pub fn toggle_tag(&mut self, tag: &str) -> TagToggle {
        let Some(known) = EXPERTISE_TAGS.iter().copied().find(|t| *t == tag) else {
            return TagToggle::Unknown;
        };
        if let Some(pos) = self.tags.iter().position(|t| *t == known) {
            self.tags.remove(pos);
            TagToggle::Removed
        } else if self.tags.len() >= MAX_EXPERTISE_TAGS {
            TagToggle::LimitReached
        } else {
            self.tags.push(known);
            TagToggle::Added
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RegisterStep {
    #[default]
    Account,
    Profile,
}

pub const ACCOUNT_INCOMPLETE: FormError = FormError("Complete account details first");

/// Registration screen state
#[derive(Debug, Clone, Default)]
pub struct RegistrationFlow {
    step: RegisterStep,
    pub account: AccountDetails,
    pub profile: ProfileDetails,
    errors: FieldErrors<RegisterField>,
}

impl RegistrationFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> RegisterStep {
        self.step
    }

    pub fn errors(&self) -> &FieldErrors<RegisterField> {
        &self.errors
    }

    /// Move to the profile step if the account step is clean
    pub fn advance(&mut self) -> Result<(), FieldErrors<RegisterField>> {
        match self.account.validate() {
            Ok(()) => {
                self.errors.clear();
                self.step = RegisterStep::Profile;
                Ok(())
            }
            Err(errors) => {
                self.errors = errors.clone();
                Err(errors)
            }
        }
    }

    pub fn back(&mut self) {
        self.step = RegisterStep::Account;
    }

    /// Build the request; only possible from the profile step
    pub fn submission(&self) -> Result<RegisterRequest, FormError> {
        if self.step != RegisterStep::Profile || self.account.validate().is_err() {
            return Err(ACCOUNT_INCOMPLETE);
        }
        let referral = self.profile.referral.trim();
        Ok(RegisterRequest {
            username: self.account.username.clone(),
            email: self.account.email.clone(),
            password: self.account.password.clone(),
            bio: self.profile.bio.clone(),
            tags: self.profile.tags().iter().map(|t| t.to_string()).collect(),
            referral: (!referral.is_empty()).then(|| referral.to_string()),
        })
    }
}
