use serde::{Deserialize, Serialize};
use std::{
    fmt,
    hash::{Hash, Hasher},
    sync::OnceLock,
};
use thiserror::Error as ThisError;

/// Canonical single-character wildcard.
pub const CHAR_WILDCARD: char = '_';

/// Canonical multi-character wildcard.
pub const STRING_WILDCARD: char = '%';

/// Default escape character for literal wildcard occurrences.
pub const DEFAULT_ESCAPE: char = '\\';

///
/// PatternError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum PatternError {
    #[error("wildcard and escape characters must be distinct: '{ch}'")]
    WildcardConflict { ch: char },

    #[error("pattern must not end with a dangling escape character")]
    DanglingEscape,
}

///
/// Wildcards
///
/// A validated (single-char wildcard, multi-char wildcard, escape) triple.
/// The three characters must be pairwise distinct.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Wildcards {
    single: char,
    multi: char,
    escape: char,
}

impl Wildcards {
    /// Canonical `_` / `%` / `\` wildcards.
    pub const CANONICAL: Self = Self {
        single: CHAR_WILDCARD,
        multi: STRING_WILDCARD,
        escape: DEFAULT_ESCAPE,
    };

    pub fn new(single: char, multi: char, escape: char) -> Result<Self, PatternError> {
        if single == multi {
            return Err(PatternError::WildcardConflict { ch: single });
        }
        if single == escape {
            return Err(PatternError::WildcardConflict { ch: single });
        }
        if multi == escape {
            return Err(PatternError::WildcardConflict { ch: multi });
        }

        Ok(Self {
            single,
            multi,
            escape,
        })
    }

    #[must_use]
    pub const fn single(&self) -> char {
        self.single
    }

    #[must_use]
    pub const fn multi(&self) -> char {
        self.multi
    }

    #[must_use]
    pub const fn escape(&self) -> char {
        self.escape
    }

    const fn is_reserved(&self, ch: char) -> bool {
        ch == self.single || ch == self.multi || ch == self.escape
    }
}

/// Escape every literal occurrence of a wildcard or escape character.
///
/// Single pass, O(n) in the literal length.
#[must_use]
pub fn escape_literal(literal: &str, wildcards: &Wildcards) -> String {
    let mut out = String::with_capacity(literal.len());
    for ch in literal.chars() {
        if wildcards.is_reserved(ch) {
            out.push(wildcards.escape());
        }
        out.push(ch);
    }

    out
}

///
/// PatternSource
///
/// What the caller handed us: a literal with a match shape, or a pattern
/// already expressed in the canonical `_`/`%` representation.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
enum PatternSource {
    Literal { text: String, shape: MatchShape },
    Expressed { pattern: String },
}

///
/// MatchShape
///
/// Which multi-character wildcards the call site requested around an
/// escaped literal.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
enum MatchShape {
    Exact,
    Prefix,
    Suffix,
    Substring,
}

///
/// LikePattern
///
/// Immutable pattern operand for `Like`/`NotLike` constraints. Carries the
/// caller's source form, a custom escape character, and a case-sensitivity
/// flag. The escaped canonical form is computed on first access and cached;
/// racing first accesses recompute the identical string, so the cache needs
/// no coordination beyond the cell itself. Equality and hashing ignore the
/// cache.
///

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LikePattern {
    source: PatternSource,
    escape: char,
    case_sensitive: bool,
    #[serde(skip)]
    escaped: OnceLock<String>,
}

impl LikePattern {
    fn from_literal(text: impl Into<String>, shape: MatchShape) -> Self {
        Self {
            source: PatternSource::Literal {
                text: text.into(),
                shape,
            },
            escape: DEFAULT_ESCAPE,
            case_sensitive: true,
            escaped: OnceLock::new(),
        }
    }

    /// Match the literal exactly (every wildcard occurrence escaped).
    #[must_use]
    pub fn exact(text: impl Into<String>) -> Self {
        Self::from_literal(text, MatchShape::Exact)
    }

    /// Match values starting with the literal.
    #[must_use]
    pub fn prefix(text: impl Into<String>) -> Self {
        Self::from_literal(text, MatchShape::Prefix)
    }

    /// Match values ending with the literal.
    #[must_use]
    pub fn suffix(text: impl Into<String>) -> Self {
        Self::from_literal(text, MatchShape::Suffix)
    }

    /// Match values containing the literal.
    #[must_use]
    pub fn substring(text: impl Into<String>) -> Self {
        Self::from_literal(text, MatchShape::Substring)
    }

    /// Accept a pattern already expressed with canonical `_`/`%` wildcards
    /// and `\` escapes.
    pub fn expressed(pattern: impl Into<String>) -> Result<Self, PatternError> {
        let pattern = pattern.into();
        validate_escapes(&pattern, DEFAULT_ESCAPE)?;

        Ok(Self {
            source: PatternSource::Expressed { pattern },
            escape: DEFAULT_ESCAPE,
            case_sensitive: true,
            escaped: OnceLock::new(),
        })
    }

    /// Accept a pattern expressed with caller-supplied wildcard characters,
    /// translating it into the canonical representation.
    ///
    /// The custom characters carry no escape semantics of their own; literal
    /// occurrences of the canonical wildcards in the input are escaped in the
    /// translation.
    pub fn expressed_with(
        pattern: &str,
        single: char,
        multi: char,
    ) -> Result<Self, PatternError> {
        let custom = Wildcards::new(single, multi, DEFAULT_ESCAPE)?;

        let mut canonical = String::with_capacity(pattern.len());
        for ch in pattern.chars() {
            if ch == custom.single() {
                canonical.push(CHAR_WILDCARD);
            } else if ch == custom.multi() {
                canonical.push(STRING_WILDCARD);
            } else {
                if Wildcards::CANONICAL.is_reserved(ch) {
                    canonical.push(DEFAULT_ESCAPE);
                }
                canonical.push(ch);
            }
        }

        Ok(Self {
            source: PatternSource::Expressed { pattern: canonical },
            escape: DEFAULT_ESCAPE,
            case_sensitive: true,
            escaped: OnceLock::new(),
        })
    }

    /// Replace the escape character. The new character must not collide with
    /// the canonical wildcards. An expressed pattern is rewritten so its
    /// escapes use the new character.
    pub fn with_escape(&self, escape: char) -> Result<Self, PatternError> {
        if escape == CHAR_WILDCARD || escape == STRING_WILDCARD {
            return Err(PatternError::WildcardConflict { ch: escape });
        }

        let source = match &self.source {
            PatternSource::Literal { .. } => self.source.clone(),
            PatternSource::Expressed { pattern } => PatternSource::Expressed {
                pattern: reescape(pattern, self.escape, escape)?,
            },
        };

        Ok(Self {
            source,
            escape,
            case_sensitive: self.case_sensitive,
            escaped: OnceLock::new(),
        })
    }

    /// Compare case-insensitively.
    #[must_use]
    pub fn ignore_case(&self) -> Self {
        Self {
            source: self.source.clone(),
            escape: self.escape,
            case_sensitive: false,
            escaped: OnceLock::new(),
        }
    }

    #[must_use]
    pub const fn escape(&self) -> char {
        self.escape
    }

    #[must_use]
    pub const fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    /// The canonical `_`/`%` pattern with every literal wildcard occurrence
    /// escaped. Computed once and cached.
    #[must_use]
    pub fn escaped(&self) -> &str {
        self.escaped.get_or_init(|| self.compute_escaped())
    }

    fn compute_escaped(&self) -> String {
        match &self.source {
            PatternSource::Expressed { pattern } => pattern.clone(),
            PatternSource::Literal { text, shape } => {
                // escape validity is a Wildcards invariant, not caller input
                let wildcards =
                    Wildcards::new(CHAR_WILDCARD, STRING_WILDCARD, self.escape)
                        .unwrap_or(Wildcards::CANONICAL);
                let body = escape_literal(text, &wildcards);

                match shape {
                    MatchShape::Exact => body,
                    MatchShape::Prefix => format!("{body}{STRING_WILDCARD}"),
                    MatchShape::Suffix => format!("{STRING_WILDCARD}{body}"),
                    MatchShape::Substring => {
                        format!("{STRING_WILDCARD}{body}{STRING_WILDCARD}")
                    }
                }
            }
        }
    }

    /// Render the canonical pattern with a provider dialect's wildcard
    /// characters.
    pub fn express_with(&self, single: char, multi: char) -> Result<String, PatternError> {
        let dialect = Wildcards::new(single, multi, self.escape)?;
        let canonical = self.escaped();

        let mut out = String::with_capacity(canonical.len());
        let mut chars = canonical.chars();
        while let Some(ch) = chars.next() {
            if ch == self.escape {
                let Some(literal) = chars.next() else {
                    return Err(PatternError::DanglingEscape);
                };
                push_literal(&mut out, literal, &dialect);
            } else if ch == CHAR_WILDCARD {
                out.push(dialect.single());
            } else if ch == STRING_WILDCARD {
                out.push(dialect.multi());
            } else {
                push_literal(&mut out, ch, &dialect);
            }
        }

        Ok(out)
    }
}

fn push_literal(out: &mut String, ch: char, dialect: &Wildcards) {
    if dialect.is_reserved(ch) {
        out.push(dialect.escape());
    }
    out.push(ch);
}

// Rewrite an expressed pattern's escapes from one escape character to another.
fn reescape(pattern: &str, old: char, new: char) -> Result<String, PatternError> {
    let wildcards = Wildcards::new(CHAR_WILDCARD, STRING_WILDCARD, new)?;

    let mut out = String::with_capacity(pattern.len());
    let mut chars = pattern.chars();
    while let Some(ch) = chars.next() {
        if ch == old {
            let Some(literal) = chars.next() else {
                return Err(PatternError::DanglingEscape);
            };
            push_literal(&mut out, literal, &wildcards);
        } else if ch == CHAR_WILDCARD || ch == STRING_WILDCARD {
            out.push(ch);
        } else {
            push_literal(&mut out, ch, &wildcards);
        }
    }

    Ok(out)
}

// Reject patterns ending in an unescaped escape character.
fn validate_escapes(pattern: &str, escape: char) -> Result<(), PatternError> {
    let mut chars = pattern.chars();
    while let Some(ch) = chars.next() {
        if ch == escape && chars.next().is_none() {
            return Err(PatternError::DanglingEscape);
        }
    }

    Ok(())
}

impl PartialEq for LikePattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
            && self.escape == other.escape
            && self.case_sensitive == other.case_sensitive
    }
}

impl Eq for LikePattern {}

impl Hash for LikePattern {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.source.hash(state);
        self.escape.hash(state);
        self.case_sensitive.hash(state);
    }
}

impl fmt::Display for LikePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' ESCAPE '{}'", self.escaped(), self.escape)
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_literal_escapes_every_reserved_character() {
        let escaped = escape_literal("100%_done\\", &Wildcards::CANONICAL);
        assert_eq!(escaped, "100\\%\\_done\\\\");
    }

    #[test]
    fn substring_shape_wraps_and_escapes() {
        let pattern = LikePattern::substring("test_value");
        assert_eq!(pattern.escaped(), "%test\\_value%");
    }

    #[test]
    fn prefix_and_suffix_shapes_place_single_wildcard() {
        assert_eq!(LikePattern::prefix("Bor").escaped(), "Bor%");
        assert_eq!(LikePattern::suffix("lis").escaped(), "%lis");
        assert_eq!(LikePattern::exact("50%").escaped(), "50\\%");
    }

    #[test]
    fn wildcard_conflict_names_the_character() {
        let err = Wildcards::new('_', '_', '\\').unwrap_err();
        assert_eq!(err, PatternError::WildcardConflict { ch: '_' });

        let err = Wildcards::new('*', '%', '*').unwrap_err();
        assert_eq!(err, PatternError::WildcardConflict { ch: '*' });
    }

    #[test]
    fn expressed_rejects_dangling_escape() {
        let err = LikePattern::expressed("abc\\").unwrap_err();
        assert_eq!(err, PatternError::DanglingEscape);

        // escaped escape at the end is fine
        assert!(LikePattern::expressed("abc\\\\").is_ok());
    }

    #[test]
    fn expressed_with_translates_custom_wildcards() {
        let pattern = LikePattern::expressed_with("?ri*", '?', '*').unwrap();
        assert_eq!(pattern.escaped(), "_ri%");

        // literal canonical wildcards in the input are escaped
        let pattern = LikePattern::expressed_with("100%*", '?', '*').unwrap();
        assert_eq!(pattern.escaped(), "100\\%%");
    }

    #[test]
    fn express_with_renders_dialect_wildcards() {
        let pattern = LikePattern::substring("a_b");
        let rendered = pattern.express_with('?', '*').unwrap();
        assert_eq!(rendered, "*a_b*");

        // canonical wildcards inside the literal stay literal
        let pattern = LikePattern::expressed("_x%").unwrap();
        assert_eq!(pattern.express_with('?', '*').unwrap(), "?x*");
    }

    #[test]
    fn escaped_form_is_cached_and_ignored_by_equality() {
        let a = LikePattern::substring("frost");
        let b = LikePattern::substring("frost");
        assert_eq!(a, b);

        // force the cache on one side only
        let _ = a.escaped();
        assert_eq!(a, b);
    }

    #[test]
    fn with_escape_rewrites_expressed_patterns() {
        let pattern = LikePattern::expressed("10\\%_off").unwrap();
        let rewritten = pattern.with_escape('#').unwrap();
        assert_eq!(rewritten.escaped(), "10#%_off");
    }

    #[test]
    fn ignore_case_and_escape_withers_allocate_new_values() {
        let base = LikePattern::substring("x");
        let ci = base.ignore_case();
        assert!(base.is_case_sensitive());
        assert!(!ci.is_case_sensitive());

        let custom = base.with_escape('#').unwrap();
        assert_eq!(custom.escape(), '#');
        assert_eq!(base.escape(), DEFAULT_ESCAPE);

        let err = base.with_escape('%').unwrap_err();
        assert_eq!(err, PatternError::WildcardConflict { ch: '%' });
    }
}
