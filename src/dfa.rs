use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, VecDeque};

use log::debug;

use crate::derivatives::Differentiable;
use crate::regex::Regex;

/// Conversion into a canonical representative, so that equivalent regexes
/// built along different derivative paths compare equal.
pub trait Normalize {
    fn normalize(self) -> Self;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub by_char: BTreeMap<char, u32>,
    pub default: u32,
    pub accepting: bool,
}

/// A table-driven DFA whose states are the normalised derivatives of a regex.
///
/// State 0 is the start state. State 1 is the dead state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dfa {
    pub transitions: Vec<Transition>,
}

pub const DFA_START: u32 = 0;
pub const DFA_DEAD: u32 = 1;

impl Dfa {
    pub fn from_regex(start: Regex<char>) -> Dfa {
        type Worklist = (BTreeMap<Regex<char>, u32>, VecDeque<Regex<char>>);
        fn index(worklist: &mut Worklist, re: Regex<char>) -> u32 {
            let next_index = worklist.0.len() as u32;
            match worklist.0.entry(re) {
                Entry::Vacant(view) => {
                    worklist.1.push_back(view.key().clone());
                    view.insert(next_index);
                    next_index
                }
                Entry::Occupied(view) => *view.get(),
            }
        }

        let start = start.normalize();
        let mut result = Dfa {
            transitions: Vec::new(),
        };
        let mut worklist = (BTreeMap::new(), VecDeque::new());

        index(&mut worklist, start);
        index(&mut worklist, Regex::Null);

        while let Some(re) = worklist.1.pop_front() {
            let d = re.derivative();
            let accepting = re.nullable();
            let mut by_char = BTreeMap::new();
            for (chars, dre) in d.d {
                let ix = index(&mut worklist, dre.normalize());
                for ch in chars {
                    by_char.insert(ch, ix);
                }
            }
            let default = index(&mut worklist, d.rest.normalize());
            result.transitions.push(Transition {
                by_char,
                default,
                accepting,
            });
        }

        debug!("compiled regex into {} dfa states", result.transitions.len());
        result
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    pub fn next_state(&self, state: u32, c: char) -> u32 {
        let t = &self.transitions[state as usize];
        t.by_char.get(&c).copied().unwrap_or(t.default)
    }

    pub fn is_accepting(&self, state: u32) -> bool {
        self.transitions[state as usize].accepting
    }

    /// Whole-string match.
    pub fn matches(&self, input: &str) -> bool {
        let mut state = DFA_START;
        for c in input.chars() {
            state = self.next_state(state, c);
            if state == DFA_DEAD {
                return false;
            }
        }
        self.transitions[state as usize].accepting
    }
}
