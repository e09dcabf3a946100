//! One round of the game: a target regex and the player's automaton.

use std::fmt;

use log::info;
use thiserror::Error;

use crate::automaton::{Automaton, Coord};
use crate::config::GameConfig;
use crate::dfa::Dfa;
use crate::regex::{ParseError, Regex};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("bad target regex `{regex}`: {source}")]
    Target {
        regex: String,
        #[source]
        source: ParseError,
    },
    #[error("start state {origin} lies off the {grid_size}x{grid_size} board")]
    OriginOffBoard { origin: Coord, grid_size: i32 },
}

/// Outcome of checking the player's automaton.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Some state lacks a transition on `0` or `1`.
    Invalid,
    /// A DFA, but not for the target language.
    Incorrect { counterexample: String },
    Correct,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Verdict::Invalid => write!(f, "Your DFA is invalid."),
            Verdict::Incorrect { ref counterexample } => write!(
                f,
                "Your DFA is properly constructed but incorrect (try {:?}).",
                counterexample
            ),
            Verdict::Correct => write!(f, "Congratulations!"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Game {
    target: String,
    reference: Dfa,
    automaton: Automaton,
}

impl Game {
    pub fn new(config: GameConfig) -> Result<Game, GameError> {
        let board = config.board;
        if !board.contains(board.origin) {
            return Err(GameError::OriginOffBoard {
                origin: board.origin,
                grid_size: board.grid_size,
            });
        }
        let regex: Regex<char> = config.target.parse().map_err(|source| GameError::Target {
            regex: config.target.clone(),
            source,
        })?;
        let reference = Dfa::from_regex(regex);
        info!(
            "new game: target {:?} ({} reference states)",
            config.target,
            reference.len()
        );
        Ok(Game {
            target: config.target,
            reference,
            automaton: Automaton::with_config(board),
        })
    }

    /// The regex as the player sees it.
    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn automaton(&self) -> &Automaton {
        &self.automaton
    }

    pub fn automaton_mut(&mut self) -> &mut Automaton {
        &mut self.automaton
    }

    /// Whether the target regex matches `input` as a whole.
    pub fn target_matches(&self, input: &str) -> bool {
        self.reference.matches(input)
    }

    pub fn check(&self) -> Verdict {
        if !self.automaton.is_complete() {
            info!("verdict: incomplete automaton");
            return Verdict::Invalid;
        }
        let verdict = match self.automaton.counterexample_dfa(&self.reference) {
            Ok(None) => Verdict::Correct,
            Ok(Some(counterexample)) => Verdict::Incorrect { counterexample },
            // a complete automaton never gets stuck on binary input
            Err(_) => Verdict::Invalid,
        };
        info!("verdict: {:?}", verdict);
        verdict
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::SymbolSet;
    use crate::config::BoardConfig;

    #[test]
    fn test_default_target() {
        let game = Game::new(GameConfig::default()).unwrap();
        assert_eq!(game.target(), "01");
        assert!(game.target_matches("01"));
        assert!(!game.target_matches("010"));
        assert!(!game.target_matches(""));
    }

    #[test]
    fn test_bad_target() {
        let config = GameConfig {
            target: "(01".to_string(),
            ..GameConfig::default()
        };
        match Game::new(config) {
            Err(GameError::Target { regex, .. }) => assert_eq!(regex, "(01"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_fresh_board_is_invalid() {
        let game = Game::new(GameConfig::default()).unwrap();
        assert_eq!(game.check(), Verdict::Invalid);
        assert_eq!(game.check().to_string(), "Your DFA is invalid.");
    }

    #[test]
    fn test_origin_off_board() {
        for grid_size in [1, 0, -3] {
            let config = GameConfig {
                board: BoardConfig {
                    grid_size,
                    ..BoardConfig::default()
                },
                ..GameConfig::default()
            };
            match Game::new(config) {
                Err(GameError::OriginOffBoard { origin, .. }) => {
                    assert_eq!(origin, Coord::new(1, 1))
                }
                other => panic!("unexpected {:?}", other),
            }
        }
        let small = GameConfig {
            board: BoardConfig {
                grid_size: 2,
                ..BoardConfig::default()
            },
            ..GameConfig::default()
        };
        assert!(Game::new(small).is_ok());
    }

    #[test]
    fn test_long_counterexample_on_full_board() {
        // twenty states accepting only 0^17, against the empty language
        let config = GameConfig {
            target: "[]".to_string(),
            ..GameConfig::default()
        };
        let mut game = Game::new(config).unwrap();
        let origin = Coord::new(1, 1);
        let mut cells: Vec<Coord> = (0..5)
            .flat_map(|row| (0..5).map(move |col| Coord::new(row, col)))
            .filter(|&c| c != origin)
            .collect();
        let sink = cells.remove(0);
        let mut chain = vec![origin];
        chain.extend(cells.into_iter().take(18));

        let a = game.automaton_mut();
        a.add_state(sink, false);
        a.add_transition(sink, sink, SymbolSet::BOTH).unwrap();
        for &c in &chain[1..] {
            a.add_state(c, false);
        }
        a.toggle_accept(chain[17]);
        for w in chain.windows(2) {
            a.add_transition(w[0], w[1], SymbolSet::ZERO).unwrap();
            a.add_transition(w[0], sink, SymbolSet::ONE).unwrap();
        }
        a.add_transition(chain[18], sink, SymbolSet::BOTH).unwrap();
        assert_eq!(a.len(), 20);
        assert!(a.pumping_length() > a.config().max_bound);

        assert_eq!(
            game.check(),
            Verdict::Incorrect {
                counterexample: "0".repeat(17)
            }
        );
        assert_ne!(game.check(), Verdict::Correct);
    }
}
