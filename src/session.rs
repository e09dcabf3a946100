//! A line-oriented command language for playing the game in a terminal.
//!
//! Each command names coordinates and labels explicitly, standing in for the
//! clicks, drags and dialogs of a graphical board.

use std::fmt::Write;

use log::debug;
use thiserror::Error;

use crate::automaton::{Coord, SymbolSet};
use crate::error::AutomatonError;
use crate::game::Game;

pub const HELP: &str = "\
commands:
  state R C            place a state at row R, column C
  accept R C           toggle whether the state at R C is accepting
  remove R C           remove the state at R C and its transitions
  edge R C R' C' L     draw a transition labelled L (0, 1 or 01)
  unedge R C R' C'     erase the transition between two states
  run STRING           run a binary string through your DFA
  check                test your DFA against the target
  show                 print the board
  help                 print this message
  quit                 leave the game";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}'. Type 'help' for available commands.")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("`{0}` is not a number")]
    BadNumber(String),
    #[error(transparent)]
    BadLabel(#[from] AutomatonError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    State(Coord),
    Accept(Coord),
    Remove(Coord),
    Edge {
        from: Coord,
        to: Coord,
        symbols: SymbolSet,
    },
    Unedge {
        from: Coord,
        to: Coord,
    },
    Run(String),
    Check,
    Show,
    Help,
    Quit,
}

fn number(s: &str) -> Result<i32, CommandError> {
    s.parse().map_err(|_| CommandError::BadNumber(s.to_string()))
}

fn coord(args: &[&str], usage: &'static str) -> Result<Coord, CommandError> {
    match *args {
        [r, c] => Ok(Coord::new(number(r)?, number(c)?)),
        _ => Err(CommandError::Usage(usage)),
    }
}

impl Command {
    pub fn parse(input: &str) -> Result<Command, CommandError> {
        let parts: Vec<&str> = input.split_whitespace().collect();
        let (cmd, args) = match parts.split_first() {
            Some((cmd, args)) => (cmd.to_lowercase(), args),
            None => return Err(CommandError::Empty),
        };
        match cmd.as_str() {
            "state" | "s" => Ok(Command::State(coord(args, "state R C")?)),
            "accept" | "a" => Ok(Command::Accept(coord(args, "accept R C")?)),
            "remove" | "rm" => Ok(Command::Remove(coord(args, "remove R C")?)),
            "edge" | "e" => {
                const USAGE: &str = "edge R C R' C' LABEL";
                if args.len() < 5 {
                    return Err(CommandError::Usage(USAGE));
                }
                Ok(Command::Edge {
                    from: coord(&args[0..2], USAGE)?,
                    to: coord(&args[2..4], USAGE)?,
                    // "0 or 1" spans several words
                    symbols: args[4..].join(" ").parse()?,
                })
            }
            "unedge" | "ue" => {
                const USAGE: &str = "unedge R C R' C'";
                if args.len() != 4 {
                    return Err(CommandError::Usage(USAGE));
                }
                Ok(Command::Unedge {
                    from: coord(&args[0..2], USAGE)?,
                    to: coord(&args[2..4], USAGE)?,
                })
            }
            "run" | "r" => match *args {
                [] => Ok(Command::Run(String::new())),
                [s] => Ok(Command::Run(s.to_string())),
                _ => Err(CommandError::Usage("run STRING")),
            },
            "check" | "test" => Ok(Command::Check),
            "show" | "board" => Ok(Command::Show),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            _ => Err(CommandError::Unknown(cmd)),
        }
    }
}

/// What the front end should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Print the message and keep reading.
    Continue(String),
    Quit,
}

pub struct Session {
    game: Game,
}

impl Session {
    pub fn new(game: Game) -> Self {
        Session { game }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Parses and runs one line of input. Errors are reported as messages;
    /// nothing ends the session except `quit`.
    pub fn handle_line(&mut self, line: &str) -> Outcome {
        match Command::parse(line) {
            Ok(cmd) => self.execute(cmd),
            Err(CommandError::Empty) => Outcome::Continue(String::new()),
            Err(e) => Outcome::Continue(format!("error: {}", e)),
        }
    }

    pub fn execute(&mut self, cmd: Command) -> Outcome {
        debug!("executing {:?}", cmd);
        let automaton = self.game.automaton_mut();
        let msg = match cmd {
            Command::State(at) => {
                if automaton.add_state(at, false) {
                    format!("added state at {}", at)
                } else {
                    format!("cannot place a state at {}", at)
                }
            }
            Command::Accept(at) => match automaton.toggle_accept(at) {
                Some(true) => format!("state at {} is now accepting", at),
                Some(false) => format!("state at {} is now rejecting", at),
                None => format!("no state at {}", at),
            },
            Command::Remove(at) => {
                if automaton.remove_state(at) {
                    format!("removed state at {}", at)
                } else if at == automaton.config().origin {
                    "the start state cannot be removed".to_string()
                } else {
                    format!("no state at {}", at)
                }
            }
            Command::Edge { from, to, symbols } => {
                match automaton.add_transition(from, to, symbols) {
                    Ok(()) => format!("{} --{}--> {}", from, symbols, to),
                    Err(e @ AutomatonError::DuplicateTransition { .. }) => {
                        format!("{}; remove it first", e)
                    }
                    Err(e) => e.to_string(),
                }
            }
            Command::Unedge { from, to } => {
                if automaton.remove_transition(from, to) {
                    format!("erased {} -> {}", from, to)
                } else {
                    format!("no transition from {} to {}", from, to)
                }
            }
            Command::Run(input) => match automaton.accepts(&input) {
                Ok(true) => format!("{:?} is accepted", input),
                Ok(false) => format!("{:?} is rejected", input),
                Err(e) => format!("cannot run {:?}: {}", input, e),
            },
            Command::Check => self.game.check().to_string(),
            Command::Show => self.render(),
            Command::Help => HELP.to_string(),
            Command::Quit => return Outcome::Quit,
        };
        Outcome::Continue(msg)
    }

    /// A plain-text rendering of the board and its transitions.
    pub fn render(&self) -> String {
        let automaton = self.game.automaton();
        let config = automaton.config();
        let mut out = format!("target: {}\n", self.game.target());
        for row in 0..config.grid_size {
            for col in 0..config.grid_size {
                let at = Coord::new(row, col);
                let cell = match automaton.state_at(at).and_then(|id| automaton.state(id)) {
                    Some(s) if at == config.origin && s.is_accepting() => ">@",
                    Some(_) if at == config.origin => ">o",
                    Some(s) if s.is_accepting() => " @",
                    Some(_) => " o",
                    None => " .",
                };
                out.push_str(cell);
            }
            out.push('\n');
        }
        for t in automaton.transitions() {
            if let (Some(from), Some(to)) = (automaton.locate(t.from), automaton.locate(t.to)) {
                let _ = writeln!(out, "{} --{}--> {}", from, t.symbols, to);
            }
        }
        out.pop();
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("state 2 3"), Ok(Command::State(Coord::new(2, 3))));
        assert_eq!(Command::parse("  ACCEPT 1 1 "), Ok(Command::Accept(Coord::new(1, 1))));
        assert_eq!(
            Command::parse("edge 1 1 2 2 01"),
            Ok(Command::Edge {
                from: Coord::new(1, 1),
                to: Coord::new(2, 2),
                symbols: SymbolSet::BOTH,
            })
        );
        assert_eq!(
            Command::parse("e 1 1 1 1 0 or 1"),
            Ok(Command::Edge {
                from: Coord::new(1, 1),
                to: Coord::new(1, 1),
                symbols: SymbolSet::BOTH,
            })
        );
        assert_eq!(Command::parse("run"), Ok(Command::Run(String::new())));
        assert_eq!(Command::parse("run 0101"), Ok(Command::Run("0101".to_string())));
        assert_eq!(Command::parse("quit"), Ok(Command::Quit));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Command::parse("   "), Err(CommandError::Empty));
        assert_eq!(
            Command::parse("fly 1 2"),
            Err(CommandError::Unknown("fly".to_string()))
        );
        assert_eq!(
            Command::parse("state 1"),
            Err(CommandError::Usage("state R C"))
        );
        assert_eq!(
            Command::parse("state x 1"),
            Err(CommandError::BadNumber("x".to_string()))
        );
        assert_eq!(
            Command::parse("edge 1 1 2 2 2"),
            Err(CommandError::BadLabel(AutomatonError::InvalidLabel(
                "2".to_string()
            )))
        );
    }
}
