use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::application::error::ValidationErrors;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_.%+-]+@[A-Za-z0-9_.-]+\.[a-zA-Z]{2,6}$").expect("email pattern compiles")
});
static LOWER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-z]").expect("pattern compiles"));
static UPPER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Z]").expect("pattern compiles"));
// Word characters are ASCII only; any other character counts as special.
static SPECIAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9_]").expect("pattern compiles"));

pub const PASSWORD_RULE: &str = "Field must contain at least 8 characters, at least one uppercase letter, one lowercase letter, and one special character";

pub fn not_blank(errors: &mut ValidationErrors, field: &str, value: &str, message: &str) {
    if value.trim().is_empty() {
        errors.add(field, message);
    }
}

pub fn email(errors: &mut ValidationErrors, field: &str, value: &str) {
    if !EMAIL_RE.is_match(value) {
        errors.add(field, "Invalid email format");
    }
}

pub fn password_strength(errors: &mut ValidationErrors, field: &str, value: &str) {
    let strong = value.chars().count() >= 8
        && LOWER_RE.is_match(value)
        && UPPER_RE.is_match(value)
        && SPECIAL_RE.is_match(value);
    if !strong {
        errors.add(field, PASSWORD_RULE);
    }
}

pub fn future_date(
    errors: &mut ValidationErrors,
    field: &str,
    value: Option<NaiveDate>,
    today: NaiveDate,
) {
    if let Some(date) = value {
        if date <= today {
            errors.add(field, "Deadline must be in the future");
        }
    }
}
