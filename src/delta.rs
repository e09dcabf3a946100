//! The transition function of a player-built automaton.

use log::debug;

use crate::automaton::{StateId, Symbol, Transition};

/// One `(source, destination, symbol)` triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rule {
    pub from: StateId,
    pub to: StateId,
    pub symbol: Symbol,
}

/// The rule set, queried by linear scan.
///
/// `Delta` has no notion of which states exist: keeping the rules consistent
/// with the live states is the job of [`Automaton`](crate::automaton::Automaton).
#[derive(Debug, Clone, Default)]
pub struct Delta {
    rules: Vec<Rule>,
}

impl Delta {
    pub fn new() -> Self {
        Delta { rules: Vec::new() }
    }

    pub fn add_rule(&mut self, rule: Rule) {
        debug!("rule {:?} --{}--> {:?}", rule.from, rule.symbol, rule.to);
        self.rules.push(rule);
    }

    /// Adds one rule per symbol on the edge.
    pub fn add_transition(&mut self, t: &Transition) {
        for symbol in t.symbols.iter() {
            self.add_rule(Rule {
                from: t.from,
                to: t.to,
                symbol,
            });
        }
    }

    /// Drops every rule the edge contributed.
    pub fn remove_transition(&mut self, t: &Transition) {
        self.rules
            .retain(|r| !(r.from == t.from && r.to == t.to && t.symbols.contains(r.symbol)));
    }

    /// Drops every rule that starts or ends at `state`.
    pub fn remove_touching(&mut self, state: StateId) {
        self.rules.retain(|r| r.from != state && r.to != state);
    }

    /// Where `state` goes on `symbol`, if anywhere. The first matching rule
    /// wins.
    pub fn next_state(&self, state: StateId, symbol: Symbol) -> Option<StateId> {
        self.rules
            .iter()
            .find(|r| r.from == state && r.symbol == symbol)
            .map(|r| r.to)
    }

    pub fn rules(&self) -> impl Iterator<Item = &Rule> + '_ {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
