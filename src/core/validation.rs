//! Field validators for everything typed at the console.
//!
//! Each check is a pure function over the raw line so the collectors in
//! `ui::input` can re-prompt until it passes.

use super::types::{Location, Money};
use regex::Regex;
use std::sync::OnceLock;

pub const MIN_AGE: u8 = 18;
pub const MAX_AGE: u8 = 100;
pub const MIN_PASSWORD_LENGTH: usize = 8;
/// Prices must be strictly below this many dollars
pub const MAX_PRICE_DOLLARS: f64 = 1000.0;
pub const MAX_RATING: u8 = 5;

fn regex(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("static validation pattern"))
}

fn name_pattern() -> &'static Regex {
    static CELL: OnceLock<Regex> = OnceLock::new();
    regex(&CELL, r"^[a-zA-Z\s'-]+$")
}

fn letter_pattern() -> &'static Regex {
    static CELL: OnceLock<Regex> = OnceLock::new();
    regex(&CELL, r"[a-zA-Z]")
}

fn lowercase_pattern() -> &'static Regex {
    static CELL: OnceLock<Regex> = OnceLock::new();
    regex(&CELL, r"[a-z]")
}

fn uppercase_pattern() -> &'static Regex {
    static CELL: OnceLock<Regex> = OnceLock::new();
    regex(&CELL, r"[A-Z]")
}

fn digit_pattern() -> &'static Regex {
    static CELL: OnceLock<Regex> = OnceLock::new();
    regex(&CELL, r"\d")
}

fn licence_plate_pattern() -> &'static Regex {
    static CELL: OnceLock<Regex> = OnceLock::new();
    regex(&CELL, r"^[A-Z0-9 ]{1,8}$")
}

/// Letters, spaces, apostrophes and hyphens, with at least one letter
pub fn is_valid_name(input: &str) -> bool {
    !input.trim().is_empty() && name_pattern().is_match(input) && letter_pattern().is_match(input)
}

/// Whole years between 18 and 100 inclusive
pub fn parse_age(input: &str) -> Option<u8> {
    let age: i64 = input.trim().parse().ok()?;
    if (i64::from(MIN_AGE)..=i64::from(MAX_AGE)).contains(&age) {
        u8::try_from(age).ok()
    } else {
        None
    }
}

/// Exactly one `@` which is neither the first nor the last character
pub fn is_valid_email(input: &str) -> bool {
    if input.trim().is_empty() {
        return false;
    }
    let mut ats = input.match_indices('@');
    match (ats.next(), ats.next()) {
        (Some((index, _)), None) => index != 0 && index != input.len() - 1,
        _ => false,
    }
}

/// Ten digits starting with a zero
pub fn is_valid_mobile(input: &str) -> bool {
    input.len() == 10 && input.starts_with('0') && input.chars().all(|c| c.is_ascii_digit())
}

pub fn is_valid_password(input: &str) -> bool {
    input.chars().count() >= MIN_PASSWORD_LENGTH
        && lowercase_pattern().is_match(input)
        && uppercase_pattern().is_match(input)
        && digit_pattern().is_match(input)
}

/// Parse an `X,Y` pair of integers
pub fn parse_location(input: &str) -> Option<Location> {
    let parts: Vec<&str> = input.split(',').collect();
    if parts.len() != 2 {
        return None;
    }
    let x = parts[0].trim().parse().ok()?;
    let y = parts[1].trim().parse().ok()?;
    Some(Location::new(x, y))
}

/// Up to eight uppercase letters, digits or spaces, not all spaces
pub fn is_valid_licence_plate(input: &str) -> bool {
    !input.trim().is_empty() && licence_plate_pattern().is_match(input)
}

pub fn is_valid_restaurant_name(input: &str) -> bool {
    !input.trim().is_empty()
}

pub fn is_valid_menu_item_name(input: &str) -> bool {
    !input.trim().is_empty()
}

/// A decimal amount strictly between $0 and $1000
pub fn parse_price(input: &str) -> Option<Money> {
    let dollars: f64 = input.trim().parse().ok()?;
    if dollars > 0.0 && dollars < MAX_PRICE_DOLLARS {
        Money::from_dollars(dollars)
    } else {
        None
    }
}

/// A non-negative quantity, where zero means "cancel"
pub fn parse_quantity(input: &str) -> Option<u32> {
    input.trim().parse().ok()
}

/// A rating score from 0 to 5, where zero means "cancel"
pub fn parse_rating(input: &str) -> Option<u8> {
    let score: u8 = input.trim().parse().ok()?;
    (score <= MAX_RATING).then_some(score)
}

/// A 1-based choice from a list of `count` options
pub fn parse_choice(input: &str, count: usize) -> Option<usize> {
    let choice: usize = input.trim().parse().ok()?;
    (1..=count).contains(&choice).then_some(choice)
}
