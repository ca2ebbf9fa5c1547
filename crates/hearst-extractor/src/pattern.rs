//! Pattern Table module
//!
//! Hearst rules are declarative data: an ordered list of token constraints
//! plus the position of the hypernym inside a match. The built-in rules are
//! embedded TOML files; external rule sets use the same format.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use hearst_core::{HearstError, Pos, Result, Token};

/// Rule file format version understood by this crate
pub const PATTERN_FILE_VERSION: u32 = 1;

const BASE_PATTERNS: &str = include_str!("patterns/base.toml");
const EXTENDED_PATTERNS: &str = include_str!("patterns/extended.toml");

// ============================================================================
// Constraints
// ============================================================================

/// Where the hypernym sits inside a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RolePosition {
    First,
    Last,
}

impl RolePosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::First => "first",
            Self::Last => "last",
        }
    }
}

impl std::fmt::Display for RolePosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl std::str::FromStr for RolePosition {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "first" => Ok(Self::First),
            "last" => Ok(Self::Last),
            other => Err(format!("unknown role position '{}'", other)),
        }
    }
}

/// How many tokens a constraint consumes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quantifier {
    /// Exactly one token
    One,
    /// Zero or one token (`?`)
    Optional,
    /// Zero or more tokens (`*`)
    ZeroOrMore,
}

impl Quantifier {
    /// True if the constraint may consume no token at all
    pub fn can_skip(&self) -> bool {
        !matches!(self, Self::One)
    }
}

/// Predicate over a single token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// POS tag is one of the set
    PosIn(Vec<Pos>),
    /// Lemma equals the string
    Lemma(String),
    /// Lemma is one of the set
    LemmaIn(Vec<String>),
    /// Dependency label equals the string
    Dep(String),
    /// Token is punctuation
    Punct,
    /// Any token
    Any,
}

impl Predicate {
    pub fn matches(&self, token: &Token) -> bool {
        match self {
            Self::PosIn(tags) => tags.contains(&token.pos),
            Self::Lemma(lemma) => token.lemma == *lemma,
            Self::LemmaIn(lemmas) => lemmas.iter().any(|l| *l == token.lemma),
            Self::Dep(dep) => token.dep == *dep,
            Self::Punct => token.is_punct(),
            Self::Any => true,
        }
    }
}

/// One element of a rule's constraint sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    pub predicate: Predicate,
    pub quantifier: Quantifier,
}

impl Constraint {
    pub fn one(predicate: Predicate) -> Self {
        Self {
            predicate,
            quantifier: Quantifier::One,
        }
    }

    /// A NOUN, PROPN or PRON token
    pub fn noun_phrase() -> Self {
        Self::one(Predicate::PosIn(Pos::NOMINAL.to_vec()))
    }

    pub fn lemma(lemma: impl Into<String>) -> Self {
        Self::one(Predicate::Lemma(lemma.into()))
    }

    pub fn optional_punct() -> Self {
        Self::one(Predicate::Punct).optional()
    }

    /// Zero or more tokens of any kind
    pub fn wildcard() -> Self {
        Self::one(Predicate::Any).repeated()
    }

    pub fn optional(mut self) -> Self {
        self.quantifier = Quantifier::Optional;
        self
    }

    pub fn repeated(mut self) -> Self {
        self.quantifier = Quantifier::ZeroOrMore;
        self
    }

    pub fn matches(&self, token: &Token) -> bool {
        self.predicate.matches(token)
    }
}

// ============================================================================
// Rules
// ============================================================================

/// A single Hearst rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternRule {
    pub label: String,
    pub constraints: Vec<Constraint>,
    pub position: RolePosition,
}

impl PatternRule {
    pub fn new(
        label: impl Into<String>,
        position: RolePosition,
        constraints: Vec<Constraint>,
    ) -> Self {
        Self {
            label: label.into(),
            constraints,
            position,
        }
    }

    fn validate(&self) -> Result<()> {
        if self.label.is_empty() {
            return Err(invalid("", "empty label"));
        }
        if self.constraints.is_empty() {
            return Err(invalid(&self.label, "empty constraint sequence"));
        }
        if self.constraints.iter().all(|c| c.quantifier.can_skip()) {
            return Err(invalid(&self.label, "pattern can match an empty token sequence"));
        }
        Ok(())
    }
}

fn invalid(label: &str, reason: impl Into<String>) -> HearstError {
    HearstError::InvalidPattern {
        label: label.to_string(),
        reason: reason.into(),
    }
}

// ============================================================================
// Pattern Table
// ============================================================================

/// Immutable, ordered rule collection with its derived role-label index
#[derive(Debug, Clone)]
pub struct PatternTable {
    rules: Vec<PatternRule>,
    first_role_labels: BTreeSet<String>,
    last_role_labels: BTreeSet<String>,
}

impl PatternTable {
    /// Load the built-in rules: base only, or base followed by the secondary set
    pub fn load(extended: bool) -> Result<Self> {
        let mut rules = parse_rules(BASE_PATTERNS)?;
        if extended {
            rules.extend(parse_rules(EXTENDED_PATTERNS)?);
        }
        Self::from_rules(rules)
    }

    /// Load rules from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Self::from_rules(parse_rules(content)?)
    }

    /// Load rules from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            HearstError::PatternParse(format!("{}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Build a table from already constructed rules
    pub fn from_rules(rules: Vec<PatternRule>) -> Result<Self> {
        let mut first_role_labels = BTreeSet::new();
        let mut last_role_labels = BTreeSet::new();

        for rule in &rules {
            rule.validate()?;
            match rule.position {
                RolePosition::First => first_role_labels.insert(rule.label.clone()),
                RolePosition::Last => last_role_labels.insert(rule.label.clone()),
            };
        }

        tracing::debug!(
            "Loaded {} patterns ({} first-role labels, {} last-role labels)",
            rules.len(),
            first_role_labels.len(),
            last_role_labels.len()
        );

        Ok(Self {
            rules,
            first_role_labels,
            last_role_labels,
        })
    }

    /// Rules in declaration order
    pub fn rules(&self) -> &[PatternRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn first_role_labels(&self) -> &BTreeSet<String> {
        &self.first_role_labels
    }

    pub fn last_role_labels(&self) -> &BTreeSet<String> {
        &self.last_role_labels
    }

    /// True if any rule with this label puts the hypernym last
    pub fn is_last_role(&self, label: &str) -> bool {
        self.last_role_labels.contains(label)
    }
}

// ============================================================================
// TOML rule files
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawPatternFile {
    version: u32,
    #[serde(default, rename = "rule")]
    rules: Vec<RawRule>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRule {
    label: String,
    position: String,
    #[serde(default)]
    pattern: Vec<RawConstraint>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawConstraint {
    Shorthand(String),
    Table(RawConstraintTable),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConstraintTable {
    pos: Option<Vec<String>>,
    lemma: Option<RawLemma>,
    dep: Option<String>,
    punct: Option<bool>,
    any: Option<bool>,
    op: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawLemma {
    One(String),
    Many(Vec<String>),
}

fn parse_rules(content: &str) -> Result<Vec<PatternRule>> {
    let file: RawPatternFile =
        toml::from_str(content).map_err(|e| HearstError::PatternParse(e.to_string()))?;

    if file.version != PATTERN_FILE_VERSION {
        return Err(HearstError::UnsupportedVersion {
            found: file.version,
            expected: PATTERN_FILE_VERSION,
        });
    }

    file.rules.into_iter().map(convert_rule).collect()
}

fn convert_rule(raw: RawRule) -> Result<PatternRule> {
    let position = raw
        .position
        .parse::<RolePosition>()
        .map_err(|reason| invalid(&raw.label, reason))?;

    let constraints = raw
        .pattern
        .into_iter()
        .map(|c| convert_constraint(&raw.label, c))
        .collect::<Result<Vec<_>>>()?;

    Ok(PatternRule::new(raw.label, position, constraints))
}

fn convert_constraint(label: &str, raw: RawConstraint) -> Result<Constraint> {
    let table = match raw {
        RawConstraint::Shorthand(s) => {
            return match s.as_str() {
                "NP" => Ok(Constraint::noun_phrase()),
                "PUNCT?" => Ok(Constraint::optional_punct()),
                "*" => Ok(Constraint::wildcard()),
                other => Err(invalid(label, format!("unknown shorthand '{}'", other))),
            };
        }
        RawConstraint::Table(table) => table,
    };

    let mut predicates = Vec::new();
    if let Some(tags) = table.pos {
        let tags = tags
            .iter()
            .map(|t| t.parse::<Pos>())
            .collect::<Result<Vec<_>>>()
            .map_err(|e| invalid(label, e.to_string()))?;
        predicates.push(Predicate::PosIn(tags));
    }
    match table.lemma {
        Some(RawLemma::One(lemma)) => predicates.push(Predicate::Lemma(lemma)),
        Some(RawLemma::Many(lemmas)) if lemmas.is_empty() => {
            return Err(invalid(label, "empty lemma set"));
        }
        Some(RawLemma::Many(lemmas)) => predicates.push(Predicate::LemmaIn(lemmas)),
        None => {}
    }
    if let Some(dep) = table.dep {
        predicates.push(Predicate::Dep(dep));
    }
    match table.punct {
        Some(true) => predicates.push(Predicate::Punct),
        Some(false) => return Err(invalid(label, "`punct` only accepts true")),
        None => {}
    }
    match table.any {
        Some(true) => predicates.push(Predicate::Any),
        Some(false) => return Err(invalid(label, "`any` only accepts true")),
        None => {}
    }

    if predicates.len() != 1 {
        return Err(invalid(
            label,
            format!("constraint needs exactly one predicate, found {}", predicates.len()),
        ));
    }
    let constraint = Constraint::one(predicates.remove(0));

    match table.op.as_deref() {
        None => Ok(constraint),
        Some("?") => Ok(constraint.optional()),
        Some("*") => Ok(constraint.repeated()),
        Some(other) => Err(invalid(label, format!("unknown operator '{}'", other))),
    }
}

// ============================================================================
// Tests
// ============================================================================
