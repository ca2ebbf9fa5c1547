//! Compound Head Resolver

use hearst_core::Token;

/// Follow `compound` arcs from `index` up to the governing noun.
///
/// The walk moves to the head while the current token is a `compound`
/// dependent of a NOUN, PROPN or PRON. Cyclic or out-of-range head indices
/// are tolerated: the walk takes at most `tokens.len()` steps and stops on
/// the last valid token reached.
pub fn find_compound_head(index: usize, tokens: &[Token]) -> usize {
    let mut current = index;

    for _ in 0..tokens.len() {
        let Some(token) = tokens.get(current) else {
            break;
        };
        if token.dep != "compound" {
            break;
        }
        match tokens.get(token.head) {
            Some(head) if head.pos.is_nominal() && token.head != current => {
                current = token.head;
            }
            Some(_) => break,
            None => {
                tracing::warn!(
                    "Token {} points at head {} outside a {}-token sentence",
                    current,
                    token.head,
                    tokens.len()
                );
                break;
            }
        }
    }

    current
}
