use thiserror::Error;

pub const OTP_LEN: usize = 6;
pub const MIN_PASSWORD_LEN: usize = 6;
pub const MAX_EMAIL_LEN: usize = 255;

/// Inline form errors. `Display` is exactly the text a screen renders next
/// to the offending field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("Email is required")]
    EmailRequired,
    #[error("Please enter a valid email address")]
    EmailInvalid,
    #[error("Email is too long")]
    EmailTooLong,
    #[error("Please enter a valid 6-digit OTP")]
    OtpFormat,
    #[error("Password is required")]
    PasswordRequired,
    #[error("New password is required")]
    NewPasswordRequired,
    #[error("Password must be at least 6 characters")]
    PasswordTooShort,
    #[error("Please confirm your password")]
    ConfirmPasswordRequired,
    #[error("Passwords do not match")]
    PasswordMismatch,
}

pub fn email(value: &str) -> Result<(), FieldError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(FieldError::EmailRequired);
    }
    if !value.contains('@') || !value.contains('.') {
        return Err(FieldError::EmailInvalid);
    }
    if value.len() > MAX_EMAIL_LEN {
        return Err(FieldError::EmailTooLong);
    }
    Ok(())
}

/// The login form only requires that a password is present; strength rules
/// apply when setting one (see [`new_password`]).
pub fn login_password(value: &str) -> Result<(), FieldError> {
    if value.is_empty() {
        Err(FieldError::PasswordRequired)
    } else {
        Ok(())
    }
}

/// Format-only check; whether the code is the right one is a separate
/// concern (see [`crate::otp`]).
pub fn otp_format(value: &str) -> Result<(), FieldError> {
    if value.len() == OTP_LEN && value.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(FieldError::OtpFormat)
    }
}

/// Outcome of validating the new/confirm password pair. Both fields are
/// checked independently so the screen can flag each one, matching how the
/// reset form reports problems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PasswordCheck {
    pub new_password: Option<FieldError>,
    pub confirm_password: Option<FieldError>,
}

impl PasswordCheck {
    pub fn is_ok(&self) -> bool {
        self.new_password.is_none() && self.confirm_password.is_none()
    }
}

pub fn new_password(new: &str, confirm: &str) -> PasswordCheck {
    let new_password = if new.trim().is_empty() {
        Some(FieldError::NewPasswordRequired)
    } else if new.len() < MIN_PASSWORD_LEN {
        Some(FieldError::PasswordTooShort)
    } else {
        None
    };
    let confirm_password = if confirm.trim().is_empty() {
        Some(FieldError::ConfirmPasswordRequired)
    } else if new != confirm {
        Some(FieldError::PasswordMismatch)
    } else {
        None
    };
    PasswordCheck {
        new_password,
        confirm_password,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn email_requires_at_and_dot() {
        assert_eq!(email(""), Err(FieldError::EmailRequired));
        assert_eq!(email("   "), Err(FieldError::EmailRequired));
        assert_eq!(email("nodomain"), Err(FieldError::EmailInvalid));
        assert_eq!(email("a@nodot"), Err(FieldError::EmailInvalid));
        assert_eq!(email("no-at.com"), Err(FieldError::EmailInvalid));
        assert_eq!(email("a@b.com"), Ok(()));
    }

    #[test]
    fn overlong_email_is_rejected() {
        let local = "a".repeat(MAX_EMAIL_LEN);
        assert_eq!(email(&format!("{local}@b.com")), Err(FieldError::EmailTooLong));
    }

    #[test]
    fn login_password_only_needs_to_be_present() {
        assert_eq!(login_password(""), Err(FieldError::PasswordRequired));
        assert_eq!(login_password("x"), Ok(()));
    }

    #[test]
    fn otp_must_be_exactly_six_digits() {
        assert_eq!(otp_format("123456"), Ok(()));
        assert_eq!(otp_format("000000"), Ok(()));
        assert_eq!(otp_format("12345"), Err(FieldError::OtpFormat));
        assert_eq!(otp_format("1234567"), Err(FieldError::OtpFormat));
        assert_eq!(otp_format("12345a"), Err(FieldError::OtpFormat));
        assert_eq!(otp_format(""), Err(FieldError::OtpFormat));
    }

    #[test]
    fn password_pair_reports_per_field() {
        let check = new_password("", "");
        assert_eq!(check.new_password, Some(FieldError::NewPasswordRequired));
        assert_eq!(
            check.confirm_password,
            Some(FieldError::ConfirmPasswordRequired)
        );
        assert!(!check.is_ok());

        let check = new_password("abc", "abc");
        assert_eq!(check.new_password, Some(FieldError::PasswordTooShort));
        assert_eq!(check.confirm_password, None);

        let check = new_password("abcdef", "abcdeg");
        assert_eq!(check.new_password, None);
        assert_eq!(check.confirm_password, Some(FieldError::PasswordMismatch));

        assert!(new_password("abcdef", "abcdef").is_ok());
    }

    #[test]
    fn six_char_password_is_the_floor() {
        assert!(new_password("123456", "123456").is_ok());
        assert!(!new_password("12345", "12345").is_ok());
    }
}
