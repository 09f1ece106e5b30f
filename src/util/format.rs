//! Display helpers for dates and money.

use thiserror::Error;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, Month, OffsetDateTime, PrimitiveDateTime, Time};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("invalid amount")]
    InvalidAmount,
    #[error("invalid currency code: {0}")]
    InvalidCurrency(String),
    #[error("invalid date: {0}")]
    InvalidDate(String),
}

/// Replaces the date tokens in `pattern` with fields of `input`.
///
/// A token only matches a whole word, so `YYYYMM` is left alone while `YYYY-MM` is not.
pub fn format_date(input: &str, pattern: &str) -> Result<String, FormatError> {
    let moment = parse_date_time(input)?;
    let mut output = String::with_capacity(pattern.len() + 8);
    let mut rest = pattern;

    while let Some(first) = rest.chars().next() {
        let in_word = is_word_char(first);
        let end = rest
            .find(|ch: char| is_word_char(ch) != in_word)
            .unwrap_or(rest.len());
        let (segment, tail) = rest.split_at(end);

        match DateToken::parse(segment).filter(|_| in_word) {
            Some(token) => output.push_str(&token.render(&moment)),
            None => output.push_str(segment),
        }
        rest = tail;
    }

    Ok(output)
}

fn is_word_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

fn parse_date_time(input: &str) -> Result<PrimitiveDateTime, FormatError> {
    let trimmed = input.trim();

    // Wall-clock fields are kept as written; no offset conversion.
    if let Ok(parsed) = OffsetDateTime::parse(trimmed, &Rfc3339) {
        return Ok(PrimitiveDateTime::new(parsed.date(), parsed.time()));
    }

    let with_time = [
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]"),
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
        format_description!("[year]-[month]-[day]T[hour]:[minute]"),
    ];
    for description in with_time {
        if let Ok(parsed) = PrimitiveDateTime::parse(trimmed, description) {
            return Ok(parsed);
        }
    }

    Date::parse(trimmed, format_description!("[year]-[month]-[day]"))
        .map(|date| PrimitiveDateTime::new(date, Time::MIDNIGHT))
        .map_err(|_| FormatError::InvalidDate(input.to_string()))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DateToken {
    Day,
    DayPadded,
    Month,
    MonthPadded,
    MonthShort,
    MonthLong,
    YearShort,
    Year,
    Hour12,
    Hour12Padded,
    Hour24,
    Hour24Padded,
    Minute,
    MinutePadded,
    Second,
    SecondPadded,
    MeridiemUpper,
    MeridiemLower,
}

impl DateToken {
    fn parse(word: &str) -> Option<Self> {
        let token = match word {
            "d" => DateToken::Day,
            "dd" => DateToken::DayPadded,
            "M" => DateToken::Month,
            "MM" => DateToken::MonthPadded,
            "MMM" => DateToken::MonthShort,
            "MMMM" => DateToken::MonthLong,
            "YY" => DateToken::YearShort,
            "YYYY" => DateToken::Year,
            "h" => DateToken::Hour12,
            "hh" => DateToken::Hour12Padded,
            "H" => DateToken::Hour24,
            "HH" => DateToken::Hour24Padded,
            "m" => DateToken::Minute,
            "mm" => DateToken::MinutePadded,
            "s" => DateToken::Second,
            "ss" => DateToken::SecondPadded,
            "A" => DateToken::MeridiemUpper,
            "a" => DateToken::MeridiemLower,
            _ => return None,
        };
        Some(token)
    }

    fn render(self, moment: &PrimitiveDateTime) -> String {
        let hour = moment.hour();
        let hour12 = match hour % 12 {
            0 => 12,
            other => other,
        };
        match self {
            DateToken::Day => moment.day().to_string(),
            DateToken::DayPadded => format!("{:02}", moment.day()),
            DateToken::Month => u8::from(moment.month()).to_string(),
            DateToken::MonthPadded => format!("{:02}", u8::from(moment.month())),
            DateToken::MonthShort => month_name(moment.month())[..3].to_string(),
            DateToken::MonthLong => month_name(moment.month()).to_string(),
            DateToken::YearShort => {
                let year = moment.year().to_string();
                let start = year.len().saturating_sub(2);
                year[start..].to_string()
            }
            DateToken::Year => moment.year().to_string(),
            DateToken::Hour12 => hour12.to_string(),
            DateToken::Hour12Padded => format!("{hour12:02}"),
            DateToken::Hour24 => hour.to_string(),
            DateToken::Hour24Padded => format!("{hour:02}"),
            DateToken::Minute => moment.minute().to_string(),
            DateToken::MinutePadded => format!("{:02}", moment.minute()),
            DateToken::Second => moment.second().to_string(),
            DateToken::SecondPadded => format!("{:02}", moment.second()),
            DateToken::MeridiemUpper => (if hour < 12 { "AM" } else { "PM" }).to_string(),
            DateToken::MeridiemLower => (if hour < 12 { "am" } else { "pm" }).to_string(),
        }
    }
}

fn month_name(month: Month) -> &'static str {
    match month {
        Month::January => "January",
        Month::February => "February",
        Month::March => "March",
        Month::April => "April",
        Month::May => "May",
        Month::June => "June",
        Month::July => "July",
        Month::August => "August",
        Month::September => "September",
        Month::October => "October",
        Month::November => "November",
        Month::December => "December",
    }
}

/// Formats `amount` the way an en-US currency formatter with two fraction digits does.
pub fn format_currency(amount: f64, currency: &str) -> Result<String, FormatError> {
    if amount.is_nan() {
        return Err(FormatError::InvalidAmount);
    }

    let code = currency.trim();
    if code.len() != 3 || !code.chars().all(|ch| ch.is_ascii_alphabetic()) {
        return Err(FormatError::InvalidCurrency(currency.to_string()));
    }
    let code = code.to_ascii_uppercase();

    let sign = if amount.is_sign_negative() { "-" } else { "" };
    let digits = if amount.is_infinite() {
        "∞".to_string()
    } else {
        // `cents` is integral, so `{:.0}` prints its exact digits at any magnitude.
        let cents = format!("{:.0}", (amount.abs() * 100.0).round());
        let cents = format!("{cents:0>3}");
        let (whole, fraction) = cents.split_at(cents.len() - 2);
        format!("{}.{fraction}", group_thousands(whole))
    };

    Ok(match currency_symbol(&code) {
        Some(symbol) => format!("{sign}{symbol}{digits}"),
        None => format!("{sign}{code}\u{a0}{digits}"),
    })
}

fn currency_symbol(code: &str) -> Option<&'static str> {
    let symbol = match code {
        "USD" => "$",
        "EUR" => "€",
        "GBP" => "£",
        "JPY" => "¥",
        "CAD" => "CA$",
        "AUD" => "A$",
        "INR" => "₹",
        "CNY" => "CN¥",
        _ => return None,
    };
    Some(symbol)
}

fn group_thousands(raw: &str) -> String {
    let mut grouped = String::with_capacity(raw.len() + raw.len() / 3);
    for (idx, ch) in raw.chars().enumerate() {
        if idx > 0 && (raw.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
