//! CLI argument validation functions
//!
//! This module provides custom validation functions for CLI arguments
//! that go beyond what clap can validate automatically.

use jiff::civil::Date;
use reqwest::Url;
use std::fs;
use std::path::PathBuf;

use crate::models::{HeightUnit, Position, SortBy, SortDirection, normalize_nationality};

/// Validate that a file path is accessible (exists and is readable)
pub fn validate_config_file_path(path_str: &str) -> Result<PathBuf, String> {
    validate_readable_file(path_str, "Configuration file")
}

/// Validate that a CSV file to import is accessible
pub fn validate_csv_file_path(path_str: &str) -> Result<PathBuf, String> {
    validate_readable_file(path_str, "CSV file")
}

fn validate_readable_file(path_str: &str, what: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(path_str);

    if !path.exists() {
        return Err(format!("{} does not exist: '{}'", what, path_str));
    }

    if !path.is_file() {
        return Err(format!("{} path is not a file: '{}'", what, path_str));
    }

    match fs::File::open(&path) {
        Ok(_) => Ok(path),
        Err(e) => Err(format!("Cannot read {} '{}': {}", what.to_lowercase(), path_str, e)),
    }
}

/// Validate the player service base URL (http or https)
pub fn validate_base_url(url_str: &str) -> Result<Url, String> {
    let url = Url::parse(url_str.trim())
        .map_err(|e| format!("Invalid base URL '{}': {}", url_str, e))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(format!(
            "Base URL must use http or https, got '{}'",
            other
        )),
    }
}

/// Validate a count that must be at least 1 (page number, page size)
pub fn validate_positive_count(value: &str) -> Result<u32, String> {
    let n: u32 = value
        .trim()
        .parse()
        .map_err(|_| format!("Expected a whole number greater than 0, got: '{}'", value))?;

    if n == 0 {
        return Err("Value must be greater than 0".to_string());
    }

    Ok(n)
}

pub fn validate_player_id(value: &str) -> Result<i64, String> {
    let id: i64 = value
        .trim()
        .parse()
        .map_err(|_| format!("Player id must be a whole number, got: '{}'", value))?;

    if id <= 0 {
        return Err(format!("Player id must be positive, got: {}", id));
    }

    Ok(id)
}

/// Validate a height; the unit is applied later
pub fn validate_height(value: &str) -> Result<f64, String> {
    match value.trim().parse::<f64>() {
        Ok(h) if h.is_finite() && h > 0.0 => Ok(h),
        _ => Err(format!("Height must be a positive number, got: '{}'", value)),
    }
}

pub fn validate_height_unit(value: &str) -> Result<HeightUnit, String> {
    value.parse()
}

pub fn validate_nationality(value: &str) -> Result<String, String> {
    normalize_nationality(value).map_err(|e| e.to_string())
}

pub fn validate_position(value: &str) -> Result<Position, String> {
    value.parse::<Position>().map_err(|e| e.to_string())
}

pub fn validate_sort_by(value: &str) -> Result<SortBy, String> {
    value.parse()
}

pub fn validate_sort_direction(value: &str) -> Result<SortDirection, String> {
    value.parse()
}

/// Validate an ISO calendar date (YYYY-MM-DD)
pub fn validate_date(value: &str) -> Result<Date, String> {
    value
        .trim()
        .parse::<Date>()
        .map_err(|_| format!("Expected a date as YYYY-MM-DD, got: '{}'", value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_file_path_validation() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap();
        assert!(validate_config_file_path(path).is_ok());

        let dir = tempfile::tempdir().unwrap();
        let err = validate_config_file_path(dir.path().to_str().unwrap()).unwrap_err();
        assert!(err.contains("not a file"));

        let err = validate_config_file_path("/nonexistent/roster.toml").unwrap_err();
        assert!(err.contains("does not exist"));
    }

    #[test]
    fn test_base_url_validation() {
        let valid = [
            "http://localhost:8081/api/players",
            "https://roster.example.com/api/players/",
        ];
        for url in valid {
            assert!(validate_base_url(url).is_ok(), "{} should be valid", url);
        }

        let invalid = ["", "localhost:8081", "ftp://example.com/players", "not a url"];
        for url in invalid {
            assert!(validate_base_url(url).is_err(), "'{}' should be invalid", url);
        }
    }

    #[test]
    fn test_positive_count_validation() {
        for value in ["1", "10", "25", " 3 "] {
            assert!(validate_positive_count(value).is_ok(), "{} should be valid", value);
        }
        for value in ["0", "-1", "abc", "", "1.5"] {
            assert!(validate_positive_count(value).is_err(), "'{}' should be invalid", value);
        }
    }

    #[test]
    fn test_player_id_validation() {
        assert_eq!(validate_player_id("42").unwrap(), 42);
        for value in ["0", "-3", "x"] {
            assert!(validate_player_id(value).is_err(), "'{}' should be invalid", value);
        }
    }

    #[test]
    fn test_height_validation() {
        assert_eq!(validate_height("1.85").unwrap(), 1.85);
        for value in ["0", "-1.8", "NaN", "inf", "tall"] {
            assert!(validate_height(value).is_err(), "'{}' should be invalid", value);
        }
    }

    #[test]
    fn test_code_validation() {
        assert_eq!(validate_nationality("fr").unwrap(), "FR");
        assert!(validate_nationality("France").is_err());
        assert_eq!(validate_position("cam").unwrap(), Position::Cam);
        assert!(validate_position("GK").is_err());
        assert_eq!(validate_height_unit("FT").unwrap(), HeightUnit::Feet);
    }

    #[test]
    fn test_date_validation() {
        assert_eq!(
            validate_date("1998-12-20").unwrap(),
            jiff::civil::date(1998, 12, 20)
        );
        assert!(validate_date("20/12/1998").is_err());
        assert!(validate_date("1998-02-30").is_err());
    }
}
