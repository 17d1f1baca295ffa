//! Interactive filter prompt.
//!
//! Questions are asked through a [`LineReader`] so the same loop runs against
//! a terminal editor or a scripted list of answers.

use crate::error::{BikeshareError, Result};
use crate::filters::{City, DayFilter, FilterSelection, MonthFilter};
use std::collections::VecDeque;
use std::str::FromStr;
use tracing::debug;

const CITY_QUESTION: &str = "Would you like to see data for Chicago, New York City, or Washington?\n";
const MONTH_QUESTION: &str =
    "Would you like to see data for which month? January, February, March, April, May, June or all?\n";
const DAY_QUESTION: &str = "Would you like to see data for which day? Monday..Sunday or all?\n";

/// Source of user answers.
pub trait LineReader {
    /// Show `prompt` and return the next line of input without its newline.
    ///
    /// Returns [`BikeshareError::InputClosed`] once no more input can arrive.
    fn read_line(&mut self, prompt: &str) -> Result<String>;
}

/// Canned answers, consumed front to back.
#[derive(Debug, Default, Clone)]
pub struct ScriptedReader {
    lines: VecDeque<String>,
    prompts_seen: usize,
}

impl ScriptedReader {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            prompts_seen: 0,
        }
    }

    /// How many times a prompt was shown.
    pub fn prompts_seen(&self) -> usize {
        self.prompts_seen
    }

    /// Answers not consumed yet.
    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

impl LineReader for ScriptedReader {
    fn read_line(&mut self, _prompt: &str) -> Result<String> {
        self.prompts_seen += 1;
        self.lines.pop_front().ok_or(BikeshareError::InputClosed)
    }
}

/// Ask for city, month and day until each answer is valid.
pub fn prompt_filters(reader: &mut impl LineReader) -> Result<FilterSelection> {
    let city: City = ask_until_valid(reader, CITY_QUESTION, "Please enter a valid input")?;
    let month: MonthFilter = ask_until_valid(reader, MONTH_QUESTION, "Please enter a valid month")?;
    let day: DayFilter = ask_until_valid(reader, DAY_QUESTION, "Please enter a valid day")?;

    println!("{}", "-".repeat(50));
    Ok(FilterSelection::new(city, month, day))
}

/// Ask `question` until the answer parses as `T`, printing `retry_message`
/// after every rejected answer.
pub fn ask_until_valid<T: FromStr>(
    reader: &mut impl LineReader,
    question: &str,
    retry_message: &str,
) -> Result<T> {
    loop {
        let line = reader.read_line(question)?;
        match line.parse::<T>() {
            Ok(value) => return Ok(value),
            Err(_) => {
                debug!("Rejected answer {:?}", line);
                println!("{}", retry_message);
            }
        }
    }
}

/// Ask a yes/no question. Only `yes` (any case) counts as affirmative.
pub fn ask_yes(reader: &mut impl LineReader, question: &str) -> Result<bool> {
    let answer = reader.read_line(question)?;
    Ok(is_affirmative(&answer))
}

pub fn is_affirmative(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("yes")
}
