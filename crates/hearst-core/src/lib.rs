//! Hearst Core - Token, document and relation models
//!
//! This crate defines the shared data model used by the hearst extractor:
//! - Annotated tokens as delivered by an external NLP front end
//! - Documents that own their extracted relation list
//! - Relations and token spans
//! - Common error types
//! - Configuration management

pub mod config;

pub use config::{AppConfig, ConfigError, ExtractorConfig, LoggingConfig};

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Core error types for hearst operations
#[derive(Error, Debug)]
pub enum HearstError {
    #[error("Invalid pattern '{label}': {reason}")]
    InvalidPattern { label: String, reason: String },

    #[error("Unsupported pattern file version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("Failed to parse pattern file: {0}")]
    PatternParse(String),

    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, HearstError>;

// ============================================================================
// Part of Speech
// ============================================================================

/// Coarse Universal POS tags produced by the front end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Pos {
    Adj,
    Adp,
    Adv,
    Aux,
    Cconj,
    Det,
    Intj,
    Noun,
    Num,
    Part,
    Pron,
    Propn,
    Punct,
    Sconj,
    Sym,
    Verb,
    Space,
    X,
}

impl Pos {
    /// Tags that can anchor or extend a noun phrase
    pub const NOMINAL: [Pos; 3] = [Pos::Noun, Pos::Propn, Pos::Pron];

    /// Get the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Adj => "ADJ",
            Self::Adp => "ADP",
            Self::Adv => "ADV",
            Self::Aux => "AUX",
            Self::Cconj => "CCONJ",
            Self::Det => "DET",
            Self::Intj => "INTJ",
            Self::Noun => "NOUN",
            Self::Num => "NUM",
            Self::Part => "PART",
            Self::Pron => "PRON",
            Self::Propn => "PROPN",
            Self::Punct => "PUNCT",
            Self::Sconj => "SCONJ",
            Self::Sym => "SYM",
            Self::Verb => "VERB",
            Self::Space => "SPACE",
            Self::X => "X",
        }
    }

    /// NOUN, PROPN or PRON
    pub fn is_nominal(&self) -> bool {
        Self::NOMINAL.contains(self)
    }
}

impl std::fmt::Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Pos {
    type Err = HearstError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "ADJ" => Ok(Self::Adj),
            "ADP" => Ok(Self::Adp),
            "ADV" => Ok(Self::Adv),
            "AUX" => Ok(Self::Aux),
            "CCONJ" | "CONJ" => Ok(Self::Cconj),
            "DET" => Ok(Self::Det),
            "INTJ" => Ok(Self::Intj),
            "NOUN" => Ok(Self::Noun),
            "NUM" => Ok(Self::Num),
            "PART" => Ok(Self::Part),
            "PRON" => Ok(Self::Pron),
            "PROPN" => Ok(Self::Propn),
            "PUNCT" => Ok(Self::Punct),
            "SCONJ" => Ok(Self::Sconj),
            "SYM" => Ok(Self::Sym),
            "VERB" => Ok(Self::Verb),
            "SPACE" => Ok(Self::Space),
            "X" => Ok(Self::X),
            other => Err(HearstError::InvalidDocument(format!(
                "unknown POS tag: {}",
                other
            ))),
        }
    }
}

// ============================================================================
// Tokens
// ============================================================================

/// A single annotated token.
///
/// Tokens are produced by the external NLP front end and are never mutated
/// by the extractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Position in the sentence (0-based)
    pub index: usize,

    /// Surface text
    pub text: String,

    /// Lowercased canonical form
    pub lemma: String,

    /// Coarse POS tag
    pub pos: Pos,

    /// Dependency label (e.g. "compound", "cc")
    #[serde(default)]
    pub dep: String,

    /// Index of the syntactic governor; equals `index` for the root
    pub head: usize,

    /// Indices of tokens coordinated with this one
    #[serde(default)]
    pub conjuncts: Vec<usize>,
}

impl Token {
    /// Create a root token with no dependency label and no conjuncts
    pub fn new(index: usize, text: impl Into<String>, lemma: impl Into<String>, pos: Pos) -> Self {
        Self {
            index,
            text: text.into(),
            lemma: lemma.into(),
            pos,
            dep: String::new(),
            head: index,
            conjuncts: Vec::new(),
        }
    }

    /// Set dependency label and head index
    pub fn with_dep(mut self, dep: impl Into<String>, head: usize) -> Self {
        self.dep = dep.into();
        self.head = head;
        self
    }

    /// Set conjunct indices
    pub fn with_conjuncts(mut self, conjuncts: Vec<usize>) -> Self {
        self.conjuncts = conjuncts;
        self
    }

    /// True for PUNCT tokens or tokens made only of punctuation characters
    pub fn is_punct(&self) -> bool {
        self.pos == Pos::Punct
            || (!self.text.is_empty() && self.text.chars().all(|c| c.is_ascii_punctuation()))
    }
}

// ============================================================================
// Spans and Relations
// ============================================================================

/// Half-open token range `[start, end)` within one document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, index: usize) -> bool {
        self.start <= index && index < self.end
    }

    /// True if the two spans share at least one token
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// An is-a relation found by a Hearst pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    /// Label of the rule that produced this relation
    pub predicate: String,

    /// General term
    pub hypernym: Span,

    /// Specific term
    pub hyponym: Span,
}

impl Relation {
    pub fn new(predicate: impl Into<String>, hypernym: Span, hyponym: Span) -> Self {
        Self {
            predicate: predicate.into(),
            hypernym,
            hyponym,
        }
    }
}

// ============================================================================
// Documents
// ============================================================================

/// A flat annotated token sequence plus the relations extracted from it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Tokens in text order
    pub tokens: Vec<Token>,

    /// Extracted relations; only ever appended to
    #[serde(default)]
    pub relations: Vec<Relation>,
}

impl Document {
    /// Create a document with an empty relation list
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            relations: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Check that every token's index matches its position
    pub fn validate(&self) -> Result<()> {
        for (position, token) in self.tokens.iter().enumerate() {
            if token.index != position {
                return Err(HearstError::InvalidDocument(format!(
                    "token '{}' at position {} carries index {}",
                    token.text, position, token.index
                )));
            }
        }
        Ok(())
    }

    /// Surface text of a span, tokens joined by single spaces
    pub fn span_text(&self, span: Span) -> String {
        let end = span.end.min(self.tokens.len());
        let start = span.start.min(end);
        self.tokens[start..end]
            .iter()
            .map(|t| t.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Append relations, preserving their order
    pub fn extend_relations(&mut self, relations: impl IntoIterator<Item = Relation>) {
        self.relations.extend(relations);
    }
}

// ============================================================================
// Tests
// ============================================================================
