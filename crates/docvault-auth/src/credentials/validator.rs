//! Pure format validation for credentials. No I/O.

use std::sync::LazyLock;

use regex::Regex;

use docvault_core::error::AppError;

// Patterns are literals; a failed compile leaves `None` and every
// credential is rejected.
static LOGIN_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]{8,20}$").ok());

static PASSWORD_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9!&*.,#@$]{8,20}$").ok());

const PASSWORD_SPECIALS: &str = "!&*.,#@$";

const PASSWORD_RULES: &str = "Password must be 8-20 characters of latin letters, digits and \
     !&*.,#@$ with at least one uppercase letter, one lowercase letter, one digit and one special character.";

/// Checks logins and passwords against the accepted formats.
#[derive(Debug, Clone, Copy, Default)]
pub struct CredentialValidator;

impl CredentialValidator {
    /// Creates a validator.
    pub fn new() -> Self {
        Self
    }

    /// A login is 8-20 latin letters or digits.
    pub fn validate_login(&self, login: &str) -> Result<(), AppError> {
        let len = login.chars().count();
        if !(8..=20).contains(&len) {
            return Err(AppError::validation("Login length must be between 8 and 20."));
        }
        if !LOGIN_RE.as_ref().is_some_and(|re| re.is_match(login)) {
            return Err(AppError::validation(
                "Login must contain only latin letters and digits.",
            ));
        }
        Ok(())
    }

    /// A password is 8-20 characters from the allowed set and contains
    /// every character class.
    pub fn validate_password(&self, password: &str) -> Result<(), AppError> {
        let complete = PASSWORD_RE
            .as_ref()
            .is_some_and(|re| re.is_match(password))
            && password.chars().any(|c| c.is_ascii_uppercase())
            && password.chars().any(|c| c.is_ascii_lowercase())
            && password.chars().any(|c| c.is_ascii_digit())
            && password.chars().any(|c| PASSWORD_SPECIALS.contains(c));

        if complete {
            Ok(())
        } else {
            Err(AppError::validation(PASSWORD_RULES))
        }
    }
}
