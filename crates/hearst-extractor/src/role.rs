//! Role Resolver
//!
//! Picks the hypernym and hyponym anchor tokens out of a matched range.

use hearst_core::Token;

use crate::pattern::PatternTable;

/// Anchor token indices of one match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleAnchors {
    pub hypernym: usize,
    pub hyponym: usize,
}

/// Resolve the anchors of a match `[start, end)` produced by the rule `label`.
///
/// Membership in the last-role label set wins: a label declared with both
/// positions is always resolved as hypernym-last. For hypernym-first rules a
/// leading "such" is skipped, since the `such X as Y` shape puts the
/// hypernym one token later.
pub fn resolve_roles(
    table: &PatternTable,
    label: &str,
    start: usize,
    end: usize,
    tokens: &[Token],
) -> RoleAnchors {
    let last = end.saturating_sub(1).max(start);

    if table.is_last_role(label) {
        return RoleAnchors {
            hypernym: last,
            hyponym: start,
        };
    }

    let hypernym = match tokens.get(start) {
        Some(token) if token.lemma == "such" && start + 1 < end => start + 1,
        _ => start,
    };

    RoleAnchors {
        hypernym,
        hyponym: last,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hearst_core::Pos;

    fn words(lemmas: &[&str]) -> Vec<Token> {
        lemmas
            .iter()
            .enumerate()
            .map(|(i, l)| Token::new(i, *l, *l, Pos::Noun))
            .collect()
    }

    #[test]
    fn test_first_role() {
        let table = PatternTable::load(false).unwrap();
        let toks = words(&["x", "fruit", "such", "as", "fig", "y"]);
        let anchors = resolve_roles(&table, "such_as", 1, 5, &toks);
        assert_eq!(anchors, RoleAnchors { hypernym: 1, hyponym: 4 });
    }

    #[test]
    fn test_last_role() {
        let table = PatternTable::load(false).unwrap();
        let toks = words(&["figs", "and", "other", "fruits"]);
        let anchors = resolve_roles(&table, "other", 0, 4, &toks);
        assert_eq!(anchors, RoleAnchors { hypernym: 3, hyponym: 0 });
    }

    #[test]
    fn test_such_shifts_hypernym() {
        let table = PatternTable::load(true).unwrap();
        let toks = words(&["such", "fruits", "as", "figs"]);
        let anchors = resolve_roles(&table, "such_NOUN_as", 0, 4, &toks);
        assert_eq!(anchors, RoleAnchors { hypernym: 1, hyponym: 3 });
    }

    #[test]
    fn test_duplicate_label_resolves_as_last() {
        let table = PatternTable::load(true).unwrap();
        let toks = words(&["fruit", "type", "fig"]);
        let anchors = resolve_roles(&table, "type", 0, 3, &toks);
        assert_eq!(anchors, RoleAnchors { hypernym: 2, hyponym: 0 });
    }
}
