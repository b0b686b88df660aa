use thiserror::Error;

use crate::validate;

/// The code the simulated backend accepts. There is no real delivery
/// channel; every other six-digit value is rejected.
pub const MOCK_OTP: &str = "123456";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OtpError {
    #[error("Please enter a valid 6-digit OTP")]
    BadFormat,
    #[error("Invalid OTP. Please try again.")]
    Mismatch,
}

/// Verifies a submitted code against the mock backend. Callers are expected
/// to have run [`validate::otp_format`] before submitting, so `BadFormat`
/// here means the pre-check was skipped.
pub fn verify_code(code: &str) -> Result<(), OtpError> {
    if validate::otp_format(code).is_err() {
        return Err(OtpError::BadFormat);
    }
    if code == MOCK_OTP {
        Ok(())
    } else {
        Err(OtpError::Mismatch)
    }
}
