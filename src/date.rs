use std::{ops::RangeInclusive, str::FromStr};

use logos::{Lexer, Logos};
use miette::Diagnostic;
use thiserror::Error;
use time::{Date, Month};

/// The only date format understood anywhere in the crate.
pub const FORMAT: &str = "dd/MM/yyyy";

#[derive(Logos, Debug, PartialEq)]
enum Token {
    #[regex("[0-9]+")]
    Number,
    #[token("/")]
    Slash,
}

#[derive(Debug, Error, Diagnostic)]
pub enum DateError {
    #[error("Bad day, expecting one or two digits")]
    #[diagnostic(code(temperaturas::date::day))]
    BadDay,
    #[error("Bad month, expecting one or two digits")]
    #[diagnostic(code(temperaturas::date::month))]
    BadMonth,
    #[error("Bad year, expecting four digits")]
    #[diagnostic(code(temperaturas::date::year))]
    BadYear,
    #[error("Missing `/` separator")]
    #[diagnostic(code(temperaturas::date::separator))]
    MissingSlash,
    #[error("Unexpected input after the year: `{0}`")]
    #[diagnostic(code(temperaturas::date::trailing))]
    TrailingInput(String),
    #[error("Invalid date: {0}")]
    #[diagnostic(
        code(temperaturas::date::calendar),
        help("the day must exist in that month")
    )]
    InvalidDate(#[from] time::error::ComponentRange),
}

/// Parses a `dd/MM/yyyy` date strictly: nothing rolls over into the next
/// month, `31/02/2024` is an error.
pub fn parse(s: &str) -> Result<Date, DateError> {
    let mut date = Token::lexer(s);

    let day: u8 = number(&mut date, 1..=2).ok_or(DateError::BadDay)?;
    slash(&mut date)?;
    let month: u8 = number(&mut date, 1..=2).ok_or(DateError::BadMonth)?;
    slash(&mut date)?;
    let year: i32 = number(&mut date, 4..=4).ok_or(DateError::BadYear)?;

    if date.next().is_some() {
        return Err(DateError::TrailingInput(
            s[date.span().start..].to_string(),
        ));
    }

    let month = Month::try_from(month)?;
    Ok(Date::from_calendar_date(year, month, day)?)
}

fn number<T: FromStr>(lexer: &mut Lexer<Token>, digits: RangeInclusive<usize>) -> Option<T> {
    match lexer.next() {
        Some(Ok(Token::Number)) if digits.contains(&lexer.slice().len()) => {
            lexer.slice().parse().ok()
        }
        _ => None,
    }
}

fn slash(lexer: &mut Lexer<Token>) -> Result<(), DateError> {
    match lexer.next() {
        Some(Ok(Token::Slash)) => Ok(()),
        _ => Err(DateError::MissingSlash),
    }
}
