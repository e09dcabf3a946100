//! Board and game configuration.

use crate::automaton::Coord;

/// Shape of the board and the equivalence checker's bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardConfig {
    /// Rows and columns on the board; coordinates run from `0` to
    /// `grid_size - 1`.
    pub grid_size: i32,
    /// Where the start state lives.
    pub origin: Coord,
    /// Smallest string length the equivalence checker enumerates up to.
    pub min_bound: usize,
    /// Largest string length the equivalence checker enumerates up to. Past
    /// it the checker searches the product with the reference DFA instead,
    /// which is exact.
    pub max_bound: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            grid_size: 5,
            origin: Coord::new(1, 1),
            min_bound: 13,
            max_bound: 16,
        }
    }
}

impl BoardConfig {
    pub fn contains(&self, coord: Coord) -> bool {
        (0..self.grid_size).contains(&coord.row) && (0..self.grid_size).contains(&coord.col)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub board: BoardConfig,
    /// The regex the player's automaton has to match.
    pub target: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            board: BoardConfig::default(),
            target: "01".to_string(),
        }
    }
}
