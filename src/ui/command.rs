use chrono::NaiveDate;
use unsegen::input::*;

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{char, digit1, space0, space1},
    combinator::{all_consuming, map, map_res, opt, recognize},
    sequence::{delimited, pair, preceded, tuple},
    IResult,
};

use super::context::{Context, Mode};
use crate::cmds::Cmd;
use crate::ctrl::Outcome;
use crate::error::{Error, ErrorKind, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Goto(i32, u8, u8),
    Gregorian(NaiveDate),
    Run(Cmd, u32),
}

enum Parsed<'a> {
    Action(Action),
    Named(Option<u32>, &'a str),
}

fn unsigned<T: std::str::FromStr>(input: &str) -> IResult<&str, T> {
    map_res(digit1, str::parse)(input)
}

fn year(input: &str) -> IResult<&str, i32> {
    map_res(recognize(pair(opt(char('-')), digit1)), str::parse)(input)
}

fn goto(input: &str) -> IResult<&str, Parsed> {
    map(
        preceded(
            pair(tag("goto"), space1),
            tuple((
                year,
                preceded(space1, unsigned::<u8>),
                preceded(space1, unsigned::<u8>),
            )),
        ),
        |(y, m, d)| Parsed::Action(Action::Goto(y, m, d)),
    )(input)
}

fn gregorian(input: &str) -> IResult<&str, Parsed> {
    map_res(
        preceded(
            pair(tag("greg"), space1),
            recognize(tuple((digit1, char('-'), digit1, char('-'), digit1))),
        ),
        |date: &str| {
            NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .map(|date| Parsed::Action(Action::Gregorian(date)))
        },
    )(input)
}

fn named(input: &str) -> IResult<&str, Parsed> {
    map(
        pair(
            opt(unsigned::<u32>),
            take_while1(|c: char| c.is_ascii_lowercase() || c == '_'),
        ),
        |(count, name)| Parsed::Named(count, name),
    )(input)
}

/// Parses one command line: `goto Y M D`, `greg YYYY-MM-DD` or a command
/// name with an optional count in front, e.g. `3next_month`.
pub fn parse_command(line: &str) -> Result<Action> {
    let (_, parsed) = all_consuming(delimited(space0, alt((goto, gregorian, named)), space0))(line)
        .map_err(|_: nom::Err<nom::error::Error<&str>>| {
            Error::new(ErrorKind::ParseError, &format!("Not a command: {}", line.trim()))
        })?;

    match parsed {
        Parsed::Action(action) => Ok(action),
        Parsed::Named(count, name) => {
            let cmd: Cmd = name.parse()?;
            match count {
                Some(_) if !cmd.is_repeatable() => Err(Error::new(
                    ErrorKind::ParseError,
                    &format!("{} takes no count", cmd),
                )),
                count => Ok(Action::Run(cmd, count.unwrap_or(1))),
            }
        }
    }
}

/// Executes `action`, a step that had no effect counts as failure.
pub fn apply(context: &mut Context, action: Action) -> Result<()> {
    let outcome = match action {
        Action::Goto(year, month, day) => context.controller_mut().set_date(year, month, day),
        Action::Gregorian(date) => context.controller_mut().set_gregorian(date),
        Action::Run(cmd, count) => context.run(cmd, count),
    };

    match outcome {
        Outcome::Discarded(err) => Err(err),
        _ => Ok(()),
    }
}

pub struct CommandParser<'a> {
    context: &'a mut Context,
}

impl<'a> CommandParser<'a> {
    pub fn new(context: &'a mut Context) -> Self {
        CommandParser { context }
    }

    pub fn run_command(&mut self, line: &str) -> Result<()> {
        let action = parse_command(line)?;
        log::debug!("Running {:?}", action);
        apply(self.context, action)
    }

    fn report_error(&mut self, error: Error) {
        self.context.last_error_message = Some(format!("{}", error));
    }
}

impl Behavior for CommandParser<'_> {
    fn input(mut self, input: Input) -> Option<Input> {
        if let Event::Key(key) = input.event {
            match key {
                Key::Char('\n') => {
                    let line = self.context.input_sink_mut().finish_line().to_owned();
                    self.context.mode = Mode::Normal;
                    match self.run_command(&line) {
                        Ok(()) => self.context.last_error_message = None,
                        Err(e) => self.report_error(e),
                    }
                    None
                }
                _ => Some(input),
            }
        } else {
            Some(input)
        }
    }
}
