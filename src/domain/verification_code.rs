use rand::Rng;

/// Number of digits in a one-time sharing code.
pub const VERIFICATION_CODE_LENGTH: usize = 6;

/// A 6-digit numeric one-time code, shared out of band by the owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationCode(String);

impl VerificationCode {
    /// Returns an instance of `VerificationCode` if the input is exactly
    /// six ASCII digits, an error message otherwise.
    pub fn parse(s: String) -> Result<VerificationCode, String> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err("Code is required".to_string());
        }
        let is_six_digits = trimmed.len() == VERIFICATION_CODE_LENGTH
            && trimmed.chars().all(|c| c.is_ascii_digit());
        if !is_six_digits {
            return Err(format!("{} is not a valid 6-digit code.", trimmed));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        Self(format!("{:06}", rng.gen_range(100000..=999999)))
    }
}

impl AsRef<str> for VerificationCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for VerificationCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
