use phf::phf_map;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, ErrorKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cmd {
    NextDay,
    PrevDay,
    NextWeek,
    PrevWeek,
    NextMonth,
    PrevMonth,
    NextYear,
    PrevYear,
    Today,
    Command,
    Exit,
}

static CMD_NAMES: phf::Map<&'static str, Cmd> = phf_map! {
    "next_day" => Cmd::NextDay,
    "prev_day" => Cmd::PrevDay,
    "next_week" => Cmd::NextWeek,
    "prev_week" => Cmd::PrevWeek,
    "next_month" => Cmd::NextMonth,
    "prev_month" => Cmd::PrevMonth,
    "next_year" => Cmd::NextYear,
    "prev_year" => Cmd::PrevYear,
    "today" => Cmd::Today,
    "command" => Cmd::Command,
    "exit" => Cmd::Exit,
    "quit" => Cmd::Exit,
};

impl Cmd {
    pub fn from_name(name: &str) -> Option<Cmd> {
        CMD_NAMES.get(name).copied()
    }

    pub fn name(&self) -> &'static str {
        match self {
            Cmd::NextDay => "next_day",
            Cmd::PrevDay => "prev_day",
            Cmd::NextWeek => "next_week",
            Cmd::PrevWeek => "prev_week",
            Cmd::NextMonth => "next_month",
            Cmd::PrevMonth => "prev_month",
            Cmd::NextYear => "next_year",
            Cmd::PrevYear => "prev_year",
            Cmd::Today => "today",
            Cmd::Command => "command",
            Cmd::Exit => "exit",
        }
    }

    /// Whether a count in front of the command means anything.
    pub fn is_repeatable(&self) -> bool {
        !matches!(self, Cmd::Today | Cmd::Command | Cmd::Exit)
    }
}

impl fmt::Display for Cmd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Cmd {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Cmd::from_name(s).ok_or_else(|| {
            Error::new(ErrorKind::ParseError, &format!("unknown command '{}'", s))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        let all = [
            Cmd::NextDay,
            Cmd::PrevDay,
            Cmd::NextWeek,
            Cmd::PrevWeek,
            Cmd::NextMonth,
            Cmd::PrevMonth,
            Cmd::NextYear,
            Cmd::PrevYear,
            Cmd::Today,
            Cmd::Command,
            Cmd::Exit,
        ];

        for cmd in all.iter() {
            assert_eq!(cmd.name().parse::<Cmd>().unwrap(), *cmd);
        }
        assert_eq!(Cmd::from_name("quit"), Some(Cmd::Exit));
        assert!("jump".parse::<Cmd>().is_err());
    }
}
