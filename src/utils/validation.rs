//! Input validation utilities

/// Minimum password length accepted by the auth collaborator
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Validate email format (basic validation)
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    const INVALID: &str = "Unable to validate email address: invalid format";

    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(INVALID);
    };
    if local.is_empty() || domain.is_empty() || !domain.contains('.') {
        return Err(INVALID);
    }
    if domain.starts_with('.') || domain.ends_with('.') {
        return Err(INVALID);
    }
    Ok(())
}

/// Validate password length
pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err("Password should be at least 6 characters");
    }
    Ok(())
}

/// Sanitize a prompt (remove control characters, trim whitespace)
pub fn sanitize_prompt(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect::<String>()
        .trim()
        .to_string()
}
