use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    /// Regex for the textual log date
    /// Must be two-digit month, two-digit day and four-digit year separated by slashes
    /// - Valid: "06/14/2025", "12/31/1999"
    /// - Invalid: "6/14/2025", "2025-06-14", "06/14/25", "06-14-2025"
    pub static ref DATE_REGEX: Regex = Regex::new(r"^\d{2}/\d{2}/\d{4}$").unwrap();
}

/// Reject dates that have the right shape but name no calendar day
pub fn validate_log_date(date: &str) -> Result<(), ValidationError> {
    NaiveDate::parse_from_str(date, "%m/%d/%Y")
        .map(|_| ())
        .map_err(|_| ValidationError::new("calendar_date"))
}

/// Apply the MM/DD/YYYY input mask to raw keystrokes
///
/// Non-digits are dropped, at most eight digits are kept, and separators are
/// inserted once the month and day are complete.
pub fn mask_date(input: &str) -> String {
    let digits: Vec<char> = input.chars().filter(|c| c.is_ascii_digit()).take(8).collect();

    let mut masked = String::with_capacity(10);
    for (i, c) in digits.iter().enumerate() {
        if i == 2 || i == 4 {
            masked.push('/');
        }
        masked.push(*c);
    }
    masked
}
