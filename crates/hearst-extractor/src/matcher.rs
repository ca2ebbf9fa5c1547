//! Sequence Matcher module
//!
//! Runs every rule of a [`PatternTable`] over a token stream. Each rule is
//! simulated as a small NFA over its constraint sequence, so optional and
//! repeated constraints never need backtracking. For a given rule and start
//! position only the shortest match is reported: a wildcard gives up tokens
//! as soon as the remaining required constraints can match.

use hearst_core::Token;

use crate::pattern::{Constraint, PatternRule, PatternTable, Quantifier};

/// A rule matching a token range `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternMatch<'t> {
    /// Label of the matching rule
    pub label: &'t str,
    /// Position of the rule in the table
    pub rule_index: usize,
    pub start: usize,
    pub end: usize,
}

/// Find all matches of all rules.
///
/// Results are ordered by rule declaration order, then by start index.
pub fn find_matches<'t>(tokens: &[Token], table: &'t PatternTable) -> Vec<PatternMatch<'t>> {
    let mut matches = Vec::new();

    for (rule_index, rule) in table.rules().iter().enumerate() {
        for start in 0..tokens.len() {
            if let Some(end) = match_at(rule, tokens, start) {
                matches.push(PatternMatch {
                    label: &rule.label,
                    rule_index,
                    start,
                    end,
                });
            }
        }
    }

    matches
}

/// Shortest match of `rule` beginning exactly at `start`, returning its end
pub fn match_at(rule: &PatternRule, tokens: &[Token], start: usize) -> Option<usize> {
    let constraints = &rule.constraints;
    let accept = constraints.len();

    // A leading wildcard would only move the start of a match that is
    // already reported from a later position.
    let first = constraints
        .iter()
        .take_while(|c| c.quantifier == Quantifier::ZeroOrMore)
        .count();
    if first == accept {
        return None;
    }

    let mut current = vec![false; accept + 1];
    enter(constraints, &mut current, first);

    for (position, token) in tokens.iter().enumerate().skip(start) {
        let mut next = vec![false; accept + 1];
        let mut alive = false;

        for state in (0..accept).filter(|&s| current[s]) {
            let constraint = &constraints[state];
            if !constraint.matches(token) {
                continue;
            }
            alive = true;
            match constraint.quantifier {
                Quantifier::ZeroOrMore => enter(constraints, &mut next, state),
                Quantifier::One | Quantifier::Optional => {
                    enter(constraints, &mut next, state + 1)
                }
            }
        }

        if next[accept] {
            return Some(position + 1);
        }
        if !alive {
            return None;
        }
        current = next;
    }

    None
}

/// Mark `state` active together with every state reachable by skipping
/// optional constraints.
fn enter(constraints: &[Constraint], states: &mut [bool], mut state: usize) {
    loop {
        if states[state] {
            return;
        }
        states[state] = true;
        if state == constraints.len() || !constraints[state].quantifier.can_skip() {
            return;
        }
        state += 1;
    }
}
