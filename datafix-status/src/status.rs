//! User status derivation
//!
//! Status is recomputed from scratch on every run from four credential
//! fields and the evaluation instant:
//!
//! ```text
//! New ──> Reset Password Sent ──┐
//!  │                            ├──> active | Phone Required
//!  └───> Reset Password Expires ┘
//! ```
//!
//! Arriving at `active` or `Phone Required` clears any outstanding reset
//! token. Going back to a reset state (forgot password) is possible in the
//! data but nothing here tracks history.

use datafix_common::{EvaluationInstant, Field, Record};
use serde_json::Value;
use std::fmt;
use tracing::warn;

pub const PASSWORD: &str = "password";
pub const PHONE: &str = "phone";
pub const RESET_TOKEN: &str = "resetPasswordToken";
pub const RESET_EXPIRES: &str = "resetPasswordExpires";
pub const STATUS: &str = "status";

/// Derived account status
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum UserStatus {
    New,
    ResetPasswordSent,
    ResetPasswordExpired,
    Active,
    PhoneRequired,
}

impl UserStatus {
    pub const ALL: [UserStatus; 5] = [
        UserStatus::New,
        UserStatus::ResetPasswordSent,
        UserStatus::ResetPasswordExpired,
        UserStatus::Active,
        UserStatus::PhoneRequired,
    ];

    /// Exact string stored in the `status` field
    pub fn label(&self) -> &'static str {
        match self {
            UserStatus::New => "New",
            UserStatus::ResetPasswordSent => "Reset Password Sent",
            UserStatus::ResetPasswordExpired => "Reset Password Expires",
            UserStatus::Active => "active",
            UserStatus::PhoneRequired => "Phone Required",
        }
    }

    /// Terminal states invalidate any pending reset flow
    pub fn clears_reset_state(&self) -> bool {
        matches!(self, UserStatus::Active | UserStatus::PhoneRequired)
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Typed view of the fields status depends on
#[derive(Debug, Clone, Copy)]
pub struct UserCredentials<'a> {
    pub password: Field<'a>,
    pub phone: Field<'a>,
    pub reset_token: Field<'a>,
    pub reset_expires: Field<'a>,
}

impl<'a> UserCredentials<'a> {
    pub fn from_record(record: &'a Record) -> Self {
        Self {
            password: record.field(PASSWORD),
            phone: record.field(PHONE),
            reset_token: record.field(RESET_TOKEN),
            reset_expires: record.field(RESET_EXPIRES),
        }
    }
}

/// Reading of `resetPasswordExpires`
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Expiry {
    /// Field unset (absent, null, zero, empty string)
    Unset,
    /// Integer epoch milliseconds, compared exactly
    Millis(i64),
    /// Epoch milliseconds with a fractional part
    Fractional(f64),
    /// Set, but not a number or numeric string
    Unreadable,
}

impl Expiry {
    pub fn from_field(field: Field<'_>) -> Self {
        if !field.is_set() {
            return Expiry::Unset;
        }
        match field.value() {
            Some(Value::Number(n)) => {
                if let Some(millis) = n.as_i64() {
                    Expiry::Millis(millis)
                } else if n.as_u64().is_some() {
                    // Above i64::MAX, so later than any representable instant
                    Expiry::Millis(i64::MAX)
                } else {
                    n.as_f64().map_or(Expiry::Unreadable, Expiry::Fractional)
                }
            }
            Some(Value::String(s)) => {
                let s = s.trim();
                match s.parse::<i64>() {
                    Ok(millis) => Expiry::Millis(millis),
                    Err(_) => s.parse::<f64>().map_or(Expiry::Unreadable, Expiry::Fractional),
                }
            }
            _ => Expiry::Unreadable,
        }
    }

    /// Strictly later than `instant`
    pub fn is_after(&self, instant: EvaluationInstant) -> bool {
        match self {
            Expiry::Millis(millis) => *millis > instant.epoch_millis(),
            // Instants stay below 2^53 ms, so the cast is exact
            Expiry::Fractional(millis) => *millis > instant.epoch_millis() as f64,
            Expiry::Unset | Expiry::Unreadable => false,
        }
    }
}

/// Compute the status for one user at `instant`
pub fn derive_status(credentials: &UserCredentials<'_>, instant: EvaluationInstant) -> UserStatus {
    if credentials.password.is_set() {
        return if credentials.phone.is_set() {
            UserStatus::Active
        } else {
            UserStatus::PhoneRequired
        };
    }

    if !credentials.reset_token.is_set() {
        return UserStatus::New;
    }

    if Expiry::from_field(credentials.reset_expires).is_after(instant) {
        UserStatus::ResetPasswordSent
    } else {
        UserStatus::ResetPasswordExpired
    }
}

/// Status written to one record, with the value it replaced
#[derive(Debug, Clone, PartialEq)]
pub struct StatusChange {
    pub previous: Option<Value>,
    pub status: UserStatus,
}

impl StatusChange {
    /// Whether the stored label differs from the one written
    pub fn changed(&self) -> bool {
        self.previous.as_ref().and_then(Value::as_str) != Some(self.status.label())
    }
}

/// Derive and store `status`, clearing reset fields for terminal states
pub fn apply_status(record: &mut Record, instant: EvaluationInstant) -> StatusChange {
    let credentials = UserCredentials::from_record(record);
    if matches!(Expiry::from_field(credentials.reset_expires), Expiry::Unreadable)
        && !credentials.password.is_set()
        && credentials.reset_token.is_set()
    {
        warn!(
            "User {}: unreadable {} {:?}, treating as expired",
            record.label(),
            RESET_EXPIRES,
            credentials.reset_expires.value()
        );
    }
    let status = derive_status(&credentials, instant);

    // status goes in before the reset fields so new keys land in that order
    let previous = record.set(STATUS, Value::String(status.label().to_string()));
    if status.clears_reset_state() {
        record.set(RESET_TOKEN, Value::Null);
        record.set(RESET_EXPIRES, Value::Null);
    }

    StatusChange { previous, status }
}
