//! Conjunction Expander

use hearst_core::{Span, Token};

use crate::head::find_compound_head;
use crate::span::expand_to_noun_phrase;

/// Expanded spans of the conjuncts of `hyponym`, in conjunct-list order.
///
/// `hyponym` is the anchor as resolved from the match, before compound head
/// resolution. Conjuncts equal to `hypernym` or outside the sentence are
/// skipped.
pub fn conjunct_spans(hyponym: usize, hypernym: usize, tokens: &[Token]) -> Vec<Span> {
    let Some(anchor) = tokens.get(hyponym) else {
        return Vec::new();
    };

    anchor
        .conjuncts
        .iter()
        .copied()
        .filter(|&conjunct| conjunct != hypernym)
        .filter(|&conjunct| {
            let in_range = conjunct < tokens.len();
            if !in_range {
                tracing::warn!(
                    "Token {} lists conjunct {} outside a {}-token sentence",
                    hyponym,
                    conjunct,
                    tokens.len()
                );
            }
            in_range
        })
        .map(|conjunct| expand_to_noun_phrase(find_compound_head(conjunct, tokens), tokens))
        .collect()
}
