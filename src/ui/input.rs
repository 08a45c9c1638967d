//! Field collectors that keep asking until the answer is valid

use super::console::Console;
use crate::core::errors::Result;
use crate::core::managers::UserManager;
use crate::core::models::{Profile, RestaurantStyle};
use crate::core::types::{Location, Money};
use crate::core::validation;
use std::io::{BufRead, Write};

const PASSWORD_RULES: &str = "Your password must:\n\
- be at least 8 characters long\n\
- contain a number\n\
- contain a lowercase letter\n\
- contain an uppercase letter\n\
Please enter a password:";

/// Prompt until `parse` accepts the line, printing `error` after each rejection
fn ask<R, W, T>(
    console: &mut Console<R, W>,
    prompt: &str,
    error: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<T>
where
    R: BufRead,
    W: Write,
{
    loop {
        let line = console.prompt(prompt)?;
        match parse(&line) {
            Some(value) => return Ok(value),
            None => console.say(error)?,
        }
    }
}

fn field_prompt(field: &str) -> String {
    format!("Please enter your {}:", field)
}

pub fn name<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<String> {
    ask(console, &field_prompt("name"), "Invalid name.", |line| {
        validation::is_valid_name(line).then(|| line.to_string())
    })
}

pub fn age<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<u8> {
    ask(console, &field_prompt("age (18-100)"), "Invalid age.", validation::parse_age)
}

/// Well-formed and not already registered
pub fn email<R: BufRead, W: Write>(console: &mut Console<R, W>, users: &UserManager) -> Result<String> {
    loop {
        let line = console.prompt(&field_prompt("email address"))?;
        if !validation::is_valid_email(&line) {
            console.say("Invalid email address.")?;
        } else if !users.is_email_unique(&line) {
            console.say("This email address is already in use.")?;
        } else {
            return Ok(line);
        }
    }
}

pub fn mobile<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<String> {
    ask(console, &field_prompt("mobile phone number"), "Invalid phone number.", |line| {
        validation::is_valid_mobile(line).then(|| line.to_string())
    })
}

/// A valid password entered twice
pub fn password<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<String> {
    loop {
        let first = console.prompt(PASSWORD_RULES)?;
        if !validation::is_valid_password(&first) {
            console.say("Invalid password.")?;
            continue;
        }
        let second = console.prompt("Please confirm your password:")?;
        if first == second {
            return Ok(first);
        }
        console.say("Passwords do not match.")?;
    }
}

pub fn location<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<Location> {
    ask(
        console,
        &field_prompt("location (in the form of X,Y)"),
        "Invalid location.",
        validation::parse_location,
    )
}

pub fn licence_plate<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<String> {
    ask(console, &field_prompt("licence plate"), "Invalid licence plate.", |line| {
        validation::is_valid_licence_plate(line).then(|| line.to_string())
    })
}

pub fn restaurant_name<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<String> {
    ask(console, &field_prompt("restaurant's name"), "Invalid restaurant name.", |line| {
        validation::is_valid_restaurant_name(line).then(|| line.to_string())
    })
}

pub fn restaurant_style<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<RestaurantStyle> {
    let mut prompt = vec!["Please select your restaurant's style:".to_string()];
    for (i, style) in RestaurantStyle::ALL.iter().enumerate() {
        prompt.push(format!("{}: {}", i + 1, style));
    }
    prompt.push(format!("Please enter a choice between 1 and {}:", RestaurantStyle::ALL.len()));

    ask(console, &prompt.join("\n"), "Invalid input. Please try again.", |line| {
        validation::parse_choice(line, RestaurantStyle::ALL.len()).map(|choice| RestaurantStyle::ALL[choice - 1])
    })
}

/// Name, age, email, mobile and password, in that order
pub fn profile<R: BufRead, W: Write>(console: &mut Console<R, W>, users: &UserManager) -> Result<Profile> {
    let name = name(console)?;
    let age = age(console)?;
    let email = email(console, users)?;
    let mobile = mobile(console)?;
    let password = password(console)?;
    Ok(Profile::new(&name, age, &email, &mobile, &password))
}

/// Zero means the customer changed their mind
pub fn quantity<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<u32> {
    ask(
        console,
        "Please enter quantity (0 to cancel):",
        "Invalid input.",
        validation::parse_quantity,
    )
}

/// Name and price of a new menu item, or `None` if the name is left blank
pub fn menu_item<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<Option<(String, Money)>> {
    let name = console.prompt("Please enter the name of the new item (blank to cancel):")?;
    if !validation::is_valid_menu_item_name(&name) {
        return Ok(None);
    }
    let price = ask(
        console,
        "Please enter the price of the new item (without the $):",
        "Invalid price.",
        validation::parse_price,
    )?;
    Ok(Some((name, price)))
}

/// A score from 1 to 5, or `None` when the customer enters 0
pub fn rating<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<Option<u8>> {
    let score = ask(
        console,
        "Please enter a rating for this restaurant (1-5, 0 to cancel):",
        "Invalid rating.",
        validation::parse_rating,
    )?;
    Ok((score > 0).then_some(score))
}

pub fn comment<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<String> {
    console.prompt("Please enter a comment to accompany this rating:")
}
