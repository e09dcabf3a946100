//! Build a deterministic finite automaton over `{0, 1}` on a grid and check
//! it against a target regular expression.
//!
//! The reference side is compiled with Brzozowski derivatives
//! ([`derivatives`], [`dfa`]); the player's side is an [`Automaton`] whose
//! transition function lives in [`delta`].

pub use automaton::{Automaton, Coord, State, StateId, Symbol, SymbolSet, Transition};
pub use config::{BoardConfig, GameConfig};
pub use dfa::Dfa;
pub use error::AutomatonError;
pub use game::{Game, GameError, Verdict};
pub use regex::Regex;

pub mod automaton;
pub mod config;
pub mod delta;
pub mod derivatives;
pub mod dfa;
pub mod error;
pub mod game;
pub mod regex;
pub mod session;
pub mod strings;
#[cfg(test)]
mod tests;
