//! Interactive transaction classifier
//!
//! Prompts for the five fields of a new transaction over any reader/writer
//! pair. Each prompt re-asks on invalid input, up to a fixed number of
//! attempts.

use std::io::{BufRead, Write};

use chrono::{Local, NaiveDate};
use tracing::warn;

use crate::error::{Error, Result};
use crate::models::{Amount, Category, Memo, SubCategory, Transaction, DATE_FORMAT};

/// Default number of attempts per prompt
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Parse an entry date. Empty input means `today`; future dates are rejected.
pub fn parse_entry_date(input: &str, today: NaiveDate) -> Result<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(today);
    }
    let date = NaiveDate::parse_from_str(input, DATE_FORMAT).map_err(|_| {
        Error::InvalidData(format!("Invalid date '{}'. Use mm-dd-yyyy.", input))
    })?;
    if date > today {
        return Err(Error::InvalidData(format!(
            "{} is in the future",
            date.format(DATE_FORMAT)
        )));
    }
    Ok(date)
}

/// Parse a one-letter category code (I/S/E/N, any case)
pub fn parse_category_code(input: &str) -> Result<Category> {
    let mut chars = input.trim().chars();
    let category = match (chars.next(), chars.next()) {
        (Some(code), None) => Category::from_code(code),
        _ => None,
    };
    category.ok_or_else(|| {
        Error::InvalidData(format!(
            "Invalid category code '{}'. Enter a code from the list.",
            input.trim()
        ))
    })
}

/// Parse a 1-based position in the category's sub-category list
pub fn parse_sub_category_choice(category: Category, input: &str) -> Result<SubCategory> {
    let options = category.sub_categories();
    input
        .trim()
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| options.get(i).copied())
        .ok_or_else(|| {
            Error::InvalidData(format!(
                "Enter a number between 1 and {}",
                options.len()
            ))
        })
}

/// Prompt driver over a line reader and a writer
pub struct Prompter<R, W> {
    input: R,
    output: W,
    max_attempts: u32,
    today: NaiveDate,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W, max_attempts: u32) -> Self {
        Self {
            input,
            output,
            max_attempts: max_attempts.max(1),
            today: Local::now().date_naive(),
        }
    }

    /// Fix the date used for "today" and the future-date check
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }

    /// Print `prompt` and read one line, without the trailing newline.
    /// Returns `None` at end of input.
    pub fn try_line(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        Ok(Some(buf.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Like [`Prompter::try_line`], but end of input is an error: there is
    /// nobody left to answer.
    pub fn line(&mut self, prompt: &str) -> Result<String> {
        self.try_line(prompt)?
            .ok_or_else(|| Error::InvalidData("Input ended before an answer".into()))
    }

    /// Ask until `parse` accepts the answer or the attempts run out
    fn ask<T>(
        &mut self,
        field: &'static str,
        prompt: &str,
        parse: impl Fn(&str) -> Result<T>,
    ) -> Result<T> {
        for attempt in 1..=self.max_attempts {
            let answer = self.line(prompt)?;
            match parse(&answer) {
                Ok(value) => return Ok(value),
                Err(e) => {
                    warn!("Rejected {} input (attempt {}): {}", field, attempt, e);
                    writeln!(self.output, "\n{}\n", e)?;
                }
            }
        }
        Err(Error::TooManyAttempts {
            field,
            attempts: self.max_attempts,
        })
    }

    pub fn date(&mut self) -> Result<NaiveDate> {
        let today = self.today;
        self.ask(
            "date",
            "Enter transaction date or press Enter for today (mm-dd-yyyy): ",
            |s| parse_entry_date(s, today),
        )
    }

    pub fn category(&mut self) -> Result<Category> {
        writeln!(self.output, "{} Categories {}", "*".repeat(15), "*".repeat(15))?;
        for category in Category::ALL {
            writeln!(self.output, "{} - {}", category.code(), category)?;
        }
        self.ask("category", "\nEnter category code: ", parse_category_code)
    }

    pub fn sub_category(&mut self, category: Category) -> Result<SubCategory> {
        writeln!(
            self.output,
            "{} Sub-Categories {}",
            "*".repeat(15),
            "*".repeat(15)
        )?;
        for (i, sub) in category.sub_categories().iter().enumerate() {
            writeln!(self.output, "{} - {}", i + 1, sub)?;
        }
        self.ask("sub-category", "\nEnter sub-category number: ", |s| {
            parse_sub_category_choice(category, s)
        })
    }

    pub fn memo(&mut self) -> Result<Memo> {
        self.ask("memo", "Enter a short memo: ", |s| Memo::new(s.trim()))
    }

    pub fn amount(&mut self) -> Result<Amount> {
        self.ask("amount", "Enter the amount: ", |s| s.parse::<Amount>())
    }

    /// Run all five prompts in order and build the transaction
    pub fn transaction(&mut self) -> Result<Transaction> {
        let date = self.date()?;
        let category = self.category()?;
        let sub_category = self.sub_category(category)?;
        let memo = self.memo()?;
        let amount = self.amount()?;
        Transaction::new(date, category, sub_category, memo, amount)
    }
}
