//! Input validation for remote resource names.
//!
//! Names are checked locally so malformed input never reaches the provider.

use crate::core::constants::MAX_SECRET_NAME_LEN;
use crate::error::{Result, SecretError, StorageError};

/// Validate a Key Vault secret name.
///
/// Secret names must be:
/// - 1 to 127 characters
/// - only A-Z, a-z, 0-9 and hyphen
///
/// # Errors
///
/// Returns `SecretError::InvalidName` if the name is invalid.
pub fn validate_secret_name(name: &str) -> Result<()> {
    let invalid = |reason: String| SecretError::InvalidName {
        name: name.to_string(),
        reason,
    };

    if name.is_empty() {
        return Err(invalid("name cannot be empty".to_string()).into());
    }

    if name.len() > MAX_SECRET_NAME_LEN {
        return Err(invalid(format!(
            "name is {} characters, the limit is {}",
            name.len(),
            MAX_SECRET_NAME_LEN
        ))
        .into());
    }

    for (i, ch) in name.chars().enumerate() {
        if !ch.is_ascii_alphanumeric() && ch != '-' {
            return Err(invalid(format!(
                "invalid character '{}' at position {}. Only A-Z, a-z, 0-9, and hyphen are allowed",
                ch,
                i + 1
            ))
            .into());
        }
    }

    Ok(())
}

/// Validate a blob container name.
///
/// Container names must be:
/// - 3 to 63 characters
/// - only lowercase letters, digits and hyphen
/// - start with a letter or digit
/// - free of consecutive hyphens, and not end with one
///
/// # Errors
///
/// Returns `StorageError::InvalidName` if the name is invalid.
pub fn validate_container_name(name: &str) -> Result<()> {
    let invalid = |reason: &str| StorageError::InvalidName {
        kind: "container",
        name: name.to_string(),
        reason: reason.to_string(),
    };

    if !(3..=63).contains(&name.len()) {
        return Err(invalid("must be 3 to 63 characters").into());
    }

    if !name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(invalid("only lowercase letters, digits and hyphen are allowed").into());
    }

    if name.starts_with('-') || name.ends_with('-') {
        return Err(invalid("must start and end with a letter or digit").into());
    }

    if name.contains("--") {
        return Err(invalid("consecutive hyphens are not allowed").into());
    }

    Ok(())
}

/// Validate a blob object name.
///
/// # Errors
///
/// Returns `StorageError::InvalidName` if the name is empty or longer
/// than 1024 characters.
pub fn validate_object_name(name: &str) -> Result<()> {
    if name.is_empty() || name.chars().count() > 1024 {
        return Err(StorageError::InvalidName {
            kind: "object",
            name: name.to_string(),
            reason: "must be 1 to 1024 characters".to_string(),
        }
        .into());
    }

    Ok(())
}
