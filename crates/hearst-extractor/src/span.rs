//! Span Expander

use hearst_core::{Span, Token};

/// Widen `index` to the surrounding run of NOUN, PROPN and PRON tokens.
///
/// Pure POS adjacency; dependency structure is not consulted.
pub fn expand_to_noun_phrase(index: usize, tokens: &[Token]) -> Span {
    debug_assert!(index < tokens.len());

    let mut start = index;
    while start > 0 && tokens[start - 1].pos.is_nominal() {
        start -= 1;
    }

    let mut end = index + 1;
    while end < tokens.len() && tokens[end].pos.is_nominal() {
        end += 1;
    }

    Span::new(start, end)
}
