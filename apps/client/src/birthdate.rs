//! Birthdate entry: `DD/MM/YYYY` in, calendar date out.
//!
//! The year must be exactly four characters. Day and month may be one or two
//! digits. The rebuilt `YYYY-MM-DD` must name a real calendar day, so
//! day-of-month overflow (`31/04/2020`) and 29 February outside leap years
//! are rejected rather than rolled over.

use chrono::NaiveDate;

use crate::errors::FormError;

/// Parses a `DD/MM/YYYY` birthdate into a calendar date.
pub fn parse_birthdate(input: &str) -> Result<NaiveDate, FormError> {
    let mut parts = input.trim().split('/');
    let (Some(day), Some(month), Some(year), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(FormError::InvalidBirthdate);
    };

    if year.len() != 4 {
        return Err(FormError::InvalidBirthdate);
    }

    let day = parse_component(day, 2)?;
    let month = parse_component(month, 2)?;
    let year = parse_component(year, 4)?;

    NaiveDate::from_ymd_opt(year as i32, month, day).ok_or(FormError::InvalidBirthdate)
}

/// Normalizes a `DD/MM/YYYY` birthdate to the `YYYY-MM-DD` form the API stores.
pub fn normalize_birthdate(input: &str) -> Result<String, FormError> {
    parse_birthdate(input).map(|date| date.format("%Y-%m-%d").to_string())
}

/// Formats a stored date back into the `DD/MM/YYYY` form staff type in.
pub fn display_birthdate(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

fn parse_component(part: &str, max_len: usize) -> Result<u32, FormError> {
    if part.is_empty() || part.len() > max_len || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FormError::InvalidBirthdate);
    }
    part.parse().map_err(|_| FormError::InvalidBirthdate)
}
