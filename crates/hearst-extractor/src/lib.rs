//! Hearst Extractor - Lexico-syntactic hypernym extraction
//!
//! Finds is-a relations in annotated token streams with Hearst patterns
//! such as "X such as Y" or "Y and other X".
//!
//! The pipeline for one document:
//! token stream -> [`matcher`] -> [`role`] -> [`head`] -> [`span`]
//! -> [`conjunction`] -> relations appended to the [`Document`].

use hearst_core::{Document, Relation, Token};

/// Trait for relation extractors over annotated tokens
pub trait RelationExtractor: Send + Sync {
    /// Relations found in `tokens`, in processing order
    fn extract(&self, tokens: &[Token]) -> Vec<Relation>;

    /// Append extracted relations to the document.
    ///
    /// A document with no relations found is returned untouched.
    fn process(&self, mut document: Document) -> Document {
        let relations = self.extract(&document.tokens);
        if !relations.is_empty() {
            document.extend_relations(relations);
        }
        document
    }
}

pub mod conjunction;
pub mod head;
pub mod matcher;
pub mod pattern;
pub mod relation;
pub mod role;
pub mod span;

pub use matcher::PatternMatch;
pub use pattern::{Constraint, PatternRule, PatternTable, Predicate, Quantifier, RolePosition};
pub use relation::HyponymDetector;
