//! Interactive prompts for choosing a survey day.
//!
//! Each prompt loops until it gets acceptable input. Reading past the end of
//! input fails with [`std::io::ErrorKind::UnexpectedEof`] so a closed stdin
//! ends the session instead of spinning.

use std::io::{self, BufRead, Write};

use crate::error::SurveyError;
use crate::survey::{DAY_RANGE, MONTH_RANGE, SurveyDate, YEAR_RANGE, check_component};

/// Line-oriented console wrapper around an input and an output stream.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Prints `message`, then reads one trimmed line.
    fn ask(&mut self, message: &str) -> io::Result<String> {
        write!(self.output, "{message}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed while waiting for an answer",
            ));
        }
        Ok(line.trim().to_string())
    }

    fn say(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "{message}")
    }

    /// Asks for one date component until it is an integer inside `range`.
    fn ask_component(
        &mut self,
        message: &str,
        component: &'static str,
        range: (u32, u32),
        out_of_range: &str,
    ) -> io::Result<u32> {
        loop {
            let answer = self.ask(message)?;
            match answer.parse::<u32>() {
                Ok(value) => match check_component(component, value, range) {
                    Ok(value) => return Ok(value),
                    Err(_) => self.say(out_of_range)?,
                },
                Err(_) => self.say("Integer required! Please enter valid numbers.")?,
            }
        }
    }

    /// Asks for day, month and year until together they form a valid survey date.
    pub fn survey_date(&mut self) -> Result<SurveyDate, SurveyError> {
        loop {
            let day = self.ask_component(
                "Please enter the day of the survey in the format DD: ",
                "day",
                DAY_RANGE,
                "Out of range - values must be between 1 and 31.",
            )?;
            let month = self.ask_component(
                "Please enter the month of the survey in the format MM: ",
                "month",
                MONTH_RANGE,
                "Out of range - values must be between 1 and 12.",
            )?;
            let year = self.ask_component(
                "Please enter the year of the survey in the format YYYY: ",
                "year",
                YEAR_RANGE,
                "Out of range - year must be between 2000 and 2024.",
            )?;

            match SurveyDate::new(day, month, year) {
                Ok(date) => return Ok(date),
                Err(_) => self.say(&format!(
                    "Invalid date {day:02}-{month:02}-{year}. Please try again."
                ))?,
            }
        }
    }

    /// Asks whether to load another dataset. `true` means yes.
    pub fn load_another(&mut self) -> Result<bool, SurveyError> {
        loop {
            let answer = self.ask("Do you want to load another dataset? (Y/N): ")?;
            match answer.to_uppercase().as_str() {
                "Y" => return Ok(true),
                "N" => return Ok(false),
                _ => self.say("INVALID input. Please enter 'Y' or 'N'.")?,
            }
        }
    }

    /// Writes a line of user-facing text.
    pub fn show(&mut self, message: &str) -> Result<(), SurveyError> {
        Ok(self.say(message)?)
    }

    /// The stream prompts are written to.
    pub fn writer(&mut self) -> &mut W {
        &mut self.output
    }
}
