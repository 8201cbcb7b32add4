//! Nationality codes.
//!
//! The service stores ISO 3166-1 alpha-2 codes ("FR", "BR"). Only the shape of
//! the code is checked here; whether a code is known is the server's call.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid nationality code '{0}': expected two ASCII letters (ISO 3166-1 alpha-2)")]
pub struct InvalidNationality(pub String);

/// Trim and upper-case a nationality code, rejecting anything that is not two letters.
pub fn normalize_nationality(raw: &str) -> Result<String, InvalidNationality> {
    let code = raw.trim();
    if code.len() == 2 && code.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(code.to_ascii_uppercase())
    } else {
        Err(InvalidNationality(raw.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize_nationality(" fr ").unwrap(), "FR");
        assert_eq!(normalize_nationality("BR").unwrap(), "BR");
    }

    #[test]
    fn test_rejects_bad_codes() {
        assert!(normalize_nationality("FRA").is_err());
        assert!(normalize_nationality("").is_err());
        assert!(normalize_nationality("F1").is_err());
    }
}
