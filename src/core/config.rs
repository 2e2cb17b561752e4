use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::shared::constants::{DEFAULT_DIRECTORY_SIZE, DEFAULT_SUBMIT_ENDPOINT_URL};

#[derive(Debug, Clone)]
pub struct Config {
    pub submission: SubmissionConfig,
    pub directory: DirectoryConfig,
    pub photos: PhotoLibraryConfig,
}

/// Remote collection endpoint settings
#[derive(Debug, Clone)]
pub struct SubmissionConfig {
    /// Full URL the log is POSTed to
    pub endpoint_url: String,
    /// Transport timeout; expiry is reported as a failed submission
    pub request_timeout: Duration,
}

/// Candidate names offered by the add-crew control
#[derive(Debug, Clone)]
pub struct DirectoryConfig {
    pub employees: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct PhotoLibraryConfig {
    /// Root directory photo names are resolved against
    pub library_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            submission: SubmissionConfig::from_env()?,
            directory: DirectoryConfig::from_env()?,
            photos: PhotoLibraryConfig::from_env()?,
        })
    }
}

impl SubmissionConfig {
    const DEFAULT_TIMEOUT_SECS: u64 = 30;

    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            endpoint_url: parse_endpoint_url(env::var("SUBMIT_ENDPOINT_URL").ok())?,
            request_timeout: parse_timeout(
                env::var("SUBMIT_TIMEOUT_SECS").ok(),
                Self::DEFAULT_TIMEOUT_SECS,
            )?,
        })
    }
}

impl DirectoryConfig {
    pub fn from_env() -> Result<Self, String> {
        // Comma-separated names; falls back to the stock roster
        let employees = parse_directory(env::var("EMPLOYEE_DIRECTORY").ok())?;
        Ok(Self { employees })
    }
}

impl PhotoLibraryConfig {
    pub fn from_env() -> Result<Self, String> {
        let library_dir = env::var("PHOTO_LIBRARY_DIR").unwrap_or_else(|_| ".".to_string());

        Ok(Self {
            library_dir: PathBuf::from(library_dir),
        })
    }
}

/// Endpoint URL, defaulting when unset or blank; must be http(s)
pub fn parse_endpoint_url(raw: Option<String>) -> Result<String, String> {
    let endpoint_url = raw
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_SUBMIT_ENDPOINT_URL.to_string());

    if !endpoint_url.starts_with("http://") && !endpoint_url.starts_with("https://") {
        return Err(format!(
            "SUBMIT_ENDPOINT_URL must be an http(s) URL, got: {}",
            endpoint_url
        ));
    }

    Ok(endpoint_url)
}

/// Request timeout in whole seconds; zero is rejected
pub fn parse_timeout(raw: Option<String>, default_secs: u64) -> Result<Duration, String> {
    let timeout_secs = match raw {
        Some(value) => value
            .trim()
            .parse::<u64>()
            .map_err(|_| "SUBMIT_TIMEOUT_SECS must be a valid number".to_string())?,
        None => default_secs,
    };

    if timeout_secs == 0 {
        return Err("SUBMIT_TIMEOUT_SECS must be greater than zero".to_string());
    }

    Ok(Duration::from_secs(timeout_secs))
}

/// Directory names from the raw list, or the stock roster when unset
pub fn parse_directory(raw: Option<String>) -> Result<Vec<String>, String> {
    let employees = match raw {
        Some(raw) => parse_name_list(&raw),
        None => default_roster(DEFAULT_DIRECTORY_SIZE),
    };

    if employees.is_empty() {
        return Err("EMPLOYEE_DIRECTORY must contain at least one name".to_string());
    }

    Ok(employees)
}

/// Split a comma-separated list, trimming blanks
pub fn parse_name_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// `Employee 1` .. `Employee {size}`
pub fn default_roster(size: usize) -> Vec<String> {
    (1..=size).map(|i| format!("Employee {}", i)).collect()
}
