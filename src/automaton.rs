//! The automaton the player draws: states on a grid, edges between them.

use std::collections::{BTreeMap, VecDeque};
use std::fmt;
use std::str::FromStr;

use bit_set::BitSet;
use log::{debug, info, warn};

use crate::config::BoardConfig;
use crate::delta::Delta;
use crate::dfa::{Dfa, DFA_START};
use crate::error::{AutomatonError, Result};
use crate::regex::Regex;
use crate::strings::binary_strings;

/// A `(row, column)` position on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coord {
    pub row: i32,
    pub col: i32,
}

impl Coord {
    pub const fn new(row: i32, col: i32) -> Self {
        Coord { row, col }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "(r={},c={})", self.row, self.col)
    }
}

/// Handle of a state within one automaton. Handles are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateId(pub(crate) usize);

impl StateId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    accepting: bool,
}

impl State {
    pub fn new(accepting: bool) -> Self {
        State { accepting }
    }

    pub fn is_accepting(&self) -> bool {
        self.accepting
    }

    pub fn toggle_accept(&mut self) {
        self.accepting = !self.accepting;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symbol {
    Zero,
    One,
}

impl Symbol {
    pub const ALL: [Symbol; 2] = [Symbol::Zero, Symbol::One];

    pub fn from_char(c: char) -> Option<Symbol> {
        match c {
            '0' => Some(Symbol::Zero),
            '1' => Some(Symbol::One),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Symbol::Zero => '0',
            Symbol::One => '1',
        }
    }

    fn bit(self) -> u8 {
        match self {
            Symbol::Zero => 0b01,
            Symbol::One => 0b10,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A non-empty subset of `{0, 1}`: the label on an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SymbolSet(u8);

impl SymbolSet {
    pub const ZERO: SymbolSet = SymbolSet(0b01);
    pub const ONE: SymbolSet = SymbolSet(0b10);
    pub const BOTH: SymbolSet = SymbolSet(0b11);

    pub fn contains(self, symbol: Symbol) -> bool {
        self.0 & symbol.bit() != 0
    }

    pub fn iter(self) -> impl Iterator<Item = Symbol> {
        Symbol::ALL.into_iter().filter(move |&s| self.contains(s))
    }
}

impl From<Symbol> for SymbolSet {
    fn from(symbol: Symbol) -> Self {
        SymbolSet(symbol.bit())
    }
}

impl FromStr for SymbolSet {
    type Err = AutomatonError;

    /// Accepts `0`, `1`, `01`, `10` and `0 or 1`.
    fn from_str(s: &str) -> Result<SymbolSet> {
        let label = s.trim();
        if label == "0 or 1" {
            return Ok(SymbolSet::BOTH);
        }
        let mut bits = 0;
        for c in label.chars() {
            match Symbol::from_char(c) {
                // each symbol at most once
                Some(symbol) if bits & symbol.bit() == 0 => bits |= symbol.bit(),
                _ => return Err(AutomatonError::InvalidLabel(s.to_string())),
            }
        }
        if bits == 0 {
            return Err(AutomatonError::InvalidLabel(s.to_string()));
        }
        Ok(SymbolSet(bits))
    }
}

impl fmt::Display for SymbolSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for symbol in self.iter() {
            write!(f, "{}", symbol)?;
        }
        Ok(())
    }
}

/// An edge as the player drew it.
///
/// Two edges are the same edge when they connect the same ordered pair of
/// states; `symbols` does not take part in that comparison.
#[derive(Debug, Clone, Copy)]
pub struct Transition {
    pub from: StateId,
    pub to: StateId,
    pub symbols: SymbolSet,
}

impl Transition {
    pub fn connects(&self, from: StateId, to: StateId) -> bool {
        self.from == from && self.to == to
    }

    pub fn touches(&self, state: StateId) -> bool {
        self.from == state || self.to == state
    }
}

/// A player-built DFA over `{0, 1}`.
///
/// The start state sits at the board's origin and cannot be removed.
#[derive(Debug, Clone)]
pub struct Automaton {
    config: BoardConfig,
    /// Arena of states; removed states leave a `None` behind so that
    /// handles stay stable.
    states: Vec<Option<State>>,
    by_coord: BTreeMap<Coord, StateId>,
    start: StateId,
    transitions: Vec<Transition>,
    delta: Delta,
}

impl Default for Automaton {
    fn default() -> Self {
        Automaton::new()
    }
}

impl Automaton {
    /// A fresh automaton on the default board: just a non-accepting start
    /// state.
    pub fn new() -> Self {
        Automaton::with_config(BoardConfig::default())
    }

    pub fn with_config(config: BoardConfig) -> Self {
        let start = StateId(0);
        let mut by_coord = BTreeMap::new();
        by_coord.insert(config.origin, start);
        Automaton {
            config,
            states: vec![Some(State::new(false))],
            by_coord,
            start,
            transitions: Vec::new(),
            delta: Delta::new(),
        }
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn start(&self) -> StateId {
        self.start
    }

    /// Number of live states, the start state included.
    pub fn len(&self) -> usize {
        self.by_coord.len()
    }

    /// Never true: the start state always exists.
    pub fn is_empty(&self) -> bool {
        self.by_coord.is_empty()
    }

    pub fn state(&self, id: StateId) -> Option<&State> {
        self.states.get(id.0).and_then(Option::as_ref)
    }

    pub fn state_at(&self, coord: Coord) -> Option<StateId> {
        self.by_coord.get(&coord).copied()
    }

    /// Where `id` sits on the board, if it is still alive.
    pub fn locate(&self, id: StateId) -> Option<Coord> {
        self.by_coord
            .iter()
            .find(|&(_, &s)| s == id)
            .map(|(&coord, _)| coord)
    }

    /// All live states in coordinate order.
    pub fn states(&self) -> impl Iterator<Item = (Coord, StateId, &State)> + '_ {
        self.by_coord
            .iter()
            .filter_map(move |(&coord, &id)| self.state(id).map(|s| (coord, id, s)))
    }

    pub fn transitions(&self) -> impl Iterator<Item = &Transition> + '_ {
        self.transitions.iter()
    }

    pub fn delta(&self) -> &Delta {
        &self.delta
    }

    /// Places a new state. Returns false, changing nothing, when `coord` is
    /// taken or off the board.
    pub fn add_state(&mut self, coord: Coord, accepting: bool) -> bool {
        if !self.config.contains(coord) || self.by_coord.contains_key(&coord) {
            warn!("cannot place a state at {}", coord);
            return false;
        }
        let id = StateId(self.states.len());
        self.states.push(Some(State::new(accepting)));
        self.by_coord.insert(coord, id);
        debug!("added state {:?} at {} (accepting: {})", id, coord, accepting);
        true
    }

    /// Removes the state at `coord` together with every edge into or out of
    /// it. The start state is never removed. Returns whether anything was
    /// removed.
    pub fn remove_state(&mut self, coord: Coord) -> bool {
        if coord == self.config.origin {
            return false;
        }
        let id = match self.by_coord.remove(&coord) {
            Some(id) => id,
            None => return false,
        };
        self.transitions.retain(|t| !t.touches(id));
        self.delta.remove_touching(id);
        self.states[id.0] = None;
        debug!("removed state {:?} at {}", id, coord);
        true
    }

    /// Flips the accepting flag of the state at `coord`, returning the new
    /// value.
    pub fn toggle_accept(&mut self, coord: Coord) -> Option<bool> {
        let id = self.state_at(coord)?;
        let state = self.states.get_mut(id.0)?.as_mut()?;
        state.toggle_accept();
        debug!("state at {} accepting: {}", coord, state.is_accepting());
        Some(state.is_accepting())
    }

    /// Draws an edge from `from` to `to` labelled with `symbols`.
    ///
    /// Fails with [`AutomatonError::NoState`] if either endpoint is empty and
    /// with [`AutomatonError::DuplicateTransition`] if the two states are
    /// already connected in this direction. Self-loops are allowed.
    pub fn add_transition(&mut self, from: Coord, to: Coord, symbols: SymbolSet) -> Result<()> {
        let q1 = self.state_at(from).ok_or(AutomatonError::NoState(from))?;
        let q2 = self.state_at(to).ok_or(AutomatonError::NoState(to))?;
        if self.transitions.iter().any(|t| t.connects(q1, q2)) {
            warn!("rejected duplicate transition {} -> {}", from, to);
            return Err(AutomatonError::DuplicateTransition { from, to });
        }
        let t = Transition {
            from: q1,
            to: q2,
            symbols,
        };
        self.delta.add_transition(&t);
        self.transitions.push(t);
        debug!("added transition {} --{}--> {}", from, symbols, to);
        Ok(())
    }

    /// Removes the edge from `from` to `to`, if there is one.
    pub fn remove_transition(&mut self, from: Coord, to: Coord) -> bool {
        let (q1, q2) = match (self.state_at(from), self.state_at(to)) {
            (Some(q1), Some(q2)) => (q1, q2),
            _ => return false,
        };
        match self.transitions.iter().position(|t| t.connects(q1, q2)) {
            Some(ix) => {
                let t = self.transitions.remove(ix);
                self.delta.remove_transition(&t);
                true
            }
            None => false,
        }
    }

    /// Sets of live states that have a rule for `0` and for `1` respectively.
    fn defined(&self) -> (BitSet, BitSet) {
        let mut zero = BitSet::with_capacity(self.states.len());
        let mut one = BitSet::with_capacity(self.states.len());
        for (_, id, _) in self.states() {
            if self.delta.next_state(id, Symbol::Zero).is_some() {
                zero.insert(id.0);
            }
            if self.delta.next_state(id, Symbol::One).is_some() {
                one.insert(id.0);
            }
        }
        (zero, one)
    }

    /// True iff every state has somewhere to go on both `0` and `1`.
    pub fn is_complete(&self) -> bool {
        let (zero, one) = self.defined();
        self.states()
            .all(|(_, id, _)| zero.contains(id.0) && one.contains(id.0))
    }

    /// Every `(state, symbol)` pair without a rule, in coordinate order.
    pub fn missing_transitions(&self) -> Vec<(Coord, Symbol)> {
        let (zero, one) = self.defined();
        let mut missing = Vec::new();
        for (coord, id, _) in self.states() {
            if !zero.contains(id.0) {
                missing.push((coord, Symbol::Zero));
            }
            if !one.contains(id.0) {
                missing.push((coord, Symbol::One));
            }
        }
        missing
    }

    /// Runs `input` from the start state and reports whether it ends in an
    /// accepting state.
    ///
    /// Fails on a character other than `0`/`1`, or on reaching a state with
    /// no rule for the next symbol; the latter cannot happen when
    /// [`is_complete`](Automaton::is_complete) holds.
    pub fn accepts(&self, input: &str) -> Result<bool> {
        let mut current = self.start;
        for c in input.chars() {
            let symbol = Symbol::from_char(c).ok_or(AutomatonError::InvalidSymbol(c))?;
            current = self.delta.next_state(current, symbol).ok_or_else(|| {
                AutomatonError::UndefinedTransition {
                    at: self.locate(current).unwrap_or(self.config.origin),
                    symbol,
                }
            })?;
        }
        Ok(self
            .state(current)
            .map(State::is_accepting)
            .unwrap_or(false))
    }

    /// `max(2 * len + 1, min_bound)`: the string length the equivalence
    /// check has to cover.
    pub fn pumping_length(&self) -> usize {
        (2 * self.len() + 1).max(self.config.min_bound)
    }

    /// Whether [`pumping_length`](Automaton::pumping_length) is past
    /// `max_bound`, so that the check walks the product automaton instead of
    /// enumerating strings.
    pub fn exceeds_max_bound(&self) -> bool {
        self.pumping_length() > self.config.max_bound
    }

    /// The first string, shortest first, on which this automaton and `dfa`
    /// disagree. The empty string is tried before the enumerated ones.
    fn first_disagreement(&self, dfa: &Dfa) -> Result<Option<String>> {
        let bound = self.pumping_length();
        if self.exceeds_max_bound() {
            info!(
                "bound {} exceeds {}, searching the product automaton",
                bound, self.config.max_bound
            );
            return self.product_disagreement(dfa);
        }
        info!("checking strings up to length {}", bound);
        for s in std::iter::once(String::new()).chain(binary_strings(bound)) {
            let ours = self.accepts(&s)?;
            if ours != dfa.matches(&s) {
                debug!("disagreement on {:?}: automaton says {}", s, ours);
                return Ok(Some(s));
            }
        }
        Ok(None)
    }

    /// Breadth-first search over pairs of (our state, `dfa` state), trying
    /// `0` before `1`. Finds the same string enumeration would, with no
    /// bound on its length.
    fn product_disagreement(&self, dfa: &Dfa) -> Result<Option<String>> {
        let width = dfa.len();
        let key = |q: StateId, d: u32| q.0 * width + d as usize;
        let mut seen = BitSet::with_capacity(self.states.len() * width);
        let mut queue = VecDeque::new();
        seen.insert(key(self.start, DFA_START));
        queue.push_back((self.start, DFA_START, String::new()));

        while let Some((q, d, s)) = queue.pop_front() {
            let ours = self.state(q).map(State::is_accepting).unwrap_or(false);
            if ours != dfa.is_accepting(d) {
                debug!("disagreement on {:?}: automaton says {}", s, ours);
                return Ok(Some(s));
            }
            for symbol in Symbol::ALL {
                let next = self.delta.next_state(q, symbol).ok_or_else(|| {
                    AutomatonError::UndefinedTransition {
                        at: self.locate(q).unwrap_or(self.config.origin),
                        symbol,
                    }
                })?;
                let dnext = dfa.next_state(d, symbol.as_char());
                if seen.insert(key(next, dnext)) {
                    let mut t = s.clone();
                    t.push(symbol.as_char());
                    queue.push_back((next, dnext, t));
                }
            }
        }
        debug!("product search covered {} pairs", seen.len());
        Ok(None)
    }

    /// Compares this automaton with an already compiled reference DFA.
    pub fn counterexample_dfa(&self, dfa: &Dfa) -> Result<Option<String>> {
        self.first_disagreement(dfa)
    }

    /// The first string on which this automaton and `regex` disagree, if any
    /// within [`pumping_length`](Automaton::pumping_length). Past `max_bound`
    /// the search is exact and has no length limit.
    pub fn counterexample(&self, regex: &Regex<char>) -> Result<Option<String>> {
        self.first_disagreement(&Dfa::from_regex(regex.clone()))
    }

    /// Whether the automaton accepts exactly the strings `regex` matches, up
    /// to [`pumping_length`](Automaton::pumping_length).
    ///
    /// A `false` answer is certain. A `true` answer is only as good as the
    /// bound while enumeration is used; once the bound exceeds `max_bound`
    /// the answer is exact.
    pub fn matches_regex(&self, regex: &Regex<char>) -> Result<bool> {
        Ok(self.counterexample(regex)?.is_none())
    }
}
