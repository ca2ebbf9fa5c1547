//! Relation Emitter
//!
//! Turns pattern matches into hypernym/hyponym relations:
//! - resolve the anchor tokens of each match
//! - climb compound arcs to the head noun
//! - widen both anchors to their noun phrases
//! - fan the hyponym out over its conjuncts

use hearst_core::{ExtractorConfig, Relation, Result, Span, Token};

use crate::conjunction::conjunct_spans;
use crate::head::find_compound_head;
use crate::matcher::{find_matches, PatternMatch};
use crate::pattern::PatternTable;
use crate::role::resolve_roles;
use crate::span::expand_to_noun_phrase;
use crate::RelationExtractor;

// ============================================================================
// Hyponym Detector
// ============================================================================

/// Hearst pattern relation extractor.
///
/// Holds only the immutable [`PatternTable`], so one detector can be shared
/// across threads and documents.
#[derive(Debug, Clone)]
pub struct HyponymDetector {
    table: PatternTable,
}

impl HyponymDetector {
    /// Create a detector over the built-in rules
    pub fn new(extended: bool) -> Result<Self> {
        Ok(Self::with_table(PatternTable::load(extended)?))
    }

    /// Create a detector from extractor configuration
    pub fn from_config(config: &ExtractorConfig) -> Result<Self> {
        Self::new(config.extended)
    }

    /// Create a detector over a custom rule table
    pub fn with_table(table: PatternTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &PatternTable {
        &self.table
    }

    /// All rule matches over `tokens`, in processing order
    pub fn find_matches<'s>(&'s self, tokens: &[Token]) -> Vec<PatternMatch<'s>> {
        find_matches(tokens, &self.table)
    }

    /// The base relation of a match followed by its conjunct relations
    fn relations_for_match(&self, m: &PatternMatch<'_>, tokens: &[Token]) -> Vec<Relation> {
        let anchors = resolve_roles(&self.table, m.label, m.start, m.end, tokens);

        let hypernym = find_compound_head(anchors.hypernym, tokens);
        let hyponym = find_compound_head(anchors.hyponym, tokens);

        let hypernym_span = expand_to_noun_phrase(hypernym, tokens);
        let hyponym_span = expand_to_noun_phrase(hyponym, tokens);

        let mut relations = Vec::new();
        push_disjoint(&mut relations, m.label, hypernym_span, hyponym_span);

        for span in conjunct_spans(anchors.hyponym, hypernym, tokens) {
            push_disjoint(&mut relations, m.label, hypernym_span, span);
        }

        relations
    }
}

fn push_disjoint(relations: &mut Vec<Relation>, label: &str, hypernym: Span, hyponym: Span) {
    if hypernym.overlaps(&hyponym) {
        tracing::debug!(
            "Dropping '{}' candidate with overlapping spans {:?} / {:?}",
            label,
            hypernym,
            hyponym
        );
        return;
    }
    relations.push(Relation::new(label, hypernym, hyponym));
}

impl RelationExtractor for HyponymDetector {
    fn extract(&self, tokens: &[Token]) -> Vec<Relation> {
        let matches = self.find_matches(tokens);
        tracing::debug!(
            "Found {} pattern matches over {} tokens",
            matches.len(),
            tokens.len()
        );

        let relations: Vec<Relation> = matches
            .iter()
            .flat_map(|m| self.relations_for_match(m, tokens))
            .collect();

        for relation in &relations {
            tracing::trace!(
                "{}: hypernym {:?}, hyponym {:?}",
                relation.predicate,
                relation.hypernym,
                relation.hyponym
            );
        }

        relations
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use hearst_core::{Document, Pos};

    // Keystone plant species such as fig trees are good for the soil .
    fn keystone_sentence() -> Vec<Token> {
        vec![
            Token::new(0, "Keystone", "keystone", Pos::Adj).with_dep("amod", 2),
            Token::new(1, "plant", "plant", Pos::Noun).with_dep("compound", 2),
            Token::new(2, "species", "species", Pos::Noun).with_dep("nsubj", 7),
            Token::new(3, "such", "such", Pos::Adj).with_dep("amod", 4),
            Token::new(4, "as", "as", Pos::Adp).with_dep("prep", 2),
            Token::new(5, "fig", "fig", Pos::Noun).with_dep("compound", 6),
            Token::new(6, "trees", "tree", Pos::Noun).with_dep("pobj", 4),
            Token::new(7, "are", "be", Pos::Aux),
            Token::new(8, "good", "good", Pos::Adj).with_dep("acomp", 7),
            Token::new(9, "for", "for", Pos::Adp).with_dep("prep", 8),
            Token::new(10, "the", "the", Pos::Det).with_dep("det", 11),
            Token::new(11, "soil", "soil", Pos::Noun).with_dep("pobj", 9),
            Token::new(12, ".", ".", Pos::Punct).with_dep("punct", 7),
        ]
    }

    #[test]
    fn test_such_as_relation() {
        let detector = HyponymDetector::new(false).unwrap();
        let relations = detector.extract(&keystone_sentence());

        assert_eq!(
            relations,
            vec![Relation::new("such_as", Span::new(1, 3), Span::new(5, 7))]
        );
    }

    #[test]
    fn test_relations_for_match_uses_head() {
        let detector = HyponymDetector::new(false).unwrap();
        let tokens = keystone_sentence();
        let matches = detector.find_matches(&tokens);

        assert_eq!(matches.len(), 1);
        assert_eq!((matches[0].start, matches[0].end), (2, 6));

        let relations = detector.relations_for_match(&matches[0], &tokens);
        assert_eq!(relations[0].hyponym, Span::new(5, 7));
    }

    #[test]
    fn test_overlapping_spans_dropped() {
        // fig type fruit: "type" is a noun, so both anchors expand to the
        // same three-token phrase.
        let detector = HyponymDetector::new(true).unwrap();
        let tokens = vec![
            Token::new(0, "fig", "fig", Pos::Noun),
            Token::new(1, "type", "type", Pos::Noun),
            Token::new(2, "fruit", "fruit", Pos::Noun),
        ];
        assert!(!detector.find_matches(&tokens).is_empty());
        assert!(detector.extract(&tokens).is_empty());
    }

    #[test]
    fn test_process_appends() {
        let detector = HyponymDetector::new(false).unwrap();
        let mut document = Document::new(keystone_sentence());
        document
            .relations
            .push(Relation::new("earlier", Span::new(11, 12), Span::new(0, 1)));

        let document = detector.process(document);
        assert_eq!(document.relations.len(), 2);
        assert_eq!(document.relations[0].predicate, "earlier");
        assert_eq!(document.relations[1].predicate, "such_as");
    }

    #[test]
    fn test_from_config() {
        let detector = HyponymDetector::from_config(&ExtractorConfig { extended: true }).unwrap();
        assert!(detector.table().len() > PatternTable::load(false).unwrap().len());
    }
}
