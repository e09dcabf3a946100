//! Error types for building and running an automaton.

use thiserror::Error;

use crate::automaton::{Coord, Symbol};

/// Errors raised by [`Automaton`](crate::automaton::Automaton) operations.
///
/// None of these are fatal: the automaton is left unchanged whenever a
/// mutation is rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AutomatonError {
    /// No state occupies the coordinate.
    #[error("no state at {0}")]
    NoState(Coord),

    /// A state already occupies the coordinate, or it is off the board.
    #[error("cannot place a state at {0}")]
    Occupied(Coord),

    /// An edge already connects this ordered pair of states.
    ///
    /// At most one edge is allowed per ordered pair, whatever its symbols.
    #[error("a transition from {from} to {to} already exists")]
    DuplicateTransition { from: Coord, to: Coord },

    /// The state has no outgoing rule for the symbol.
    ///
    /// Only incomplete automata produce this.
    #[error("no transition from {at} on {symbol}")]
    UndefinedTransition { at: Coord, symbol: Symbol },

    /// The input contains a character outside the binary alphabet.
    #[error("`{0}` is not a binary symbol")]
    InvalidSymbol(char),

    /// A transition label that does not denote a non-empty set of symbols.
    #[error("`{0}` is not a transition label (expected 0, 1 or 01)")]
    InvalidLabel(String),
}

/// A specialized `Result` type for automaton operations.
pub type Result<T> = std::result::Result<T, AutomatonError>;
