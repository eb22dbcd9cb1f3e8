//! Registration validation.

/// Validation error for a registration request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Display name is empty.
    EmptyName,
    /// Email address is empty.
    EmptyEmail,
    /// Email address format is invalid.
    InvalidEmail,
    /// Secret is empty.
    EmptySecret,
}

impl ValidationError {
    /// Get human-readable error message.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::EmptyName => "Name is required",
            Self::EmptyEmail => "Email address is required",
            Self::InvalidEmail => "Invalid email address format",
            Self::EmptySecret => "Password is required",
        }
    }

    /// Get the field name this error relates to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::EmptyName => "name",
            Self::EmptyEmail | Self::InvalidEmail => "email",
            Self::EmptySecret => "secret",
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ValidationError {}

/// Result of validating a registration.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// Validate the fields of a new account.
///
/// Returns `Ok(())` if valid, or `Err(Vec<ValidationError>)` with all errors.
///
/// # Errors
///
/// Returns a vector of `ValidationError` if any fields are invalid.
pub fn validate_registration(name: &str, email: &str, secret: &str) -> ValidationResult {
    let mut errors = Vec::new();

    if name.trim().is_empty() {
        errors.push(ValidationError::EmptyName);
    }

    if email.trim().is_empty() {
        errors.push(ValidationError::EmptyEmail);
    } else if !is_valid_email(email) {
        errors.push(ValidationError::InvalidEmail);
    }

    if secret.is_empty() {
        errors.push(ValidationError::EmptySecret);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Basic email validation: one `@`, non-empty local part and domain.
///
/// Single-label domains (`alice@x`) are accepted since addresses here are
/// local to one installation.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }

    !domain.split('.').any(str::is_empty) && !email.contains(char::is_whitespace)
}
