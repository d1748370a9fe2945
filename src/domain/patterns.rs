//! Internal domain patterns: compilation, matching and conflict detection.
//!
//! A pattern such as `*.example.com` is escaped for literal matching except
//! for `*`, which matches any (possibly empty) character sequence. The whole
//! host must match; there is no substring matching and no case folding.

use std::fmt;
use std::sync::{Arc, RwLock};

use regex::Regex;
use thiserror::Error;

use crate::domain::entities::PatternSettings;

/// Errors raised while compiling a pattern list.
#[derive(Debug, Error)]
pub enum PatternError {
    #[error("Invalid domain pattern '{pattern}': {reason}")]
    Invalid { pattern: String, reason: String },
}

/// Splits the raw configuration text into patterns, one per line.
///
/// Any line break style is accepted and empty lines are dropped.
pub fn parse_pattern_list(raw: &str) -> Vec<String> {
    raw.split(['\n', '\r'])
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Converts a wildcard domain pattern into an anchored regular expression.
fn pattern_to_regex(pattern: &str) -> String {
    let body = pattern
        .split('*')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(".*");

    format!("^{body}$")
}

/// The literal host a pattern stands for once its wildcards are removed.
///
/// A wildcard that fills a whole label is dropped together with its dot, so
/// `*.example.com` stands for `example.com`.
///
/// This fixes which side of a pair is reported: with both `example.com` and
/// `*.example.com` configured, `*.example.com` is the redundant one, because
/// its literal form is matched by `example.com`, while `*.example.com` does
/// not match the bare `example.com`.
fn literal_form(pattern: &str) -> String {
    pattern
        .split('.')
        .filter(|label| *label != "*")
        .map(|label| label.replace('*', ""))
        .collect::<Vec<_>>()
        .join(".")
}

/// A single compiled pattern.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    pattern: String,
    regex: Regex,
}

impl CompiledPattern {
    pub fn compile(pattern: &str) -> Result<Self, PatternError> {
        let regex = Regex::new(&pattern_to_regex(pattern)).map_err(|e| PatternError::Invalid {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            pattern: pattern.to_string(),
            regex,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn is_match(&self, host: &str) -> bool {
        self.regex.is_match(host)
    }
}

/// The compiled form of a whole pattern list.
#[derive(Debug, Clone, Default)]
pub struct CompiledPatterns {
    patterns: Vec<CompiledPattern>,
}

impl CompiledPatterns {
    pub fn compile<S: AsRef<str>>(patterns: &[S]) -> Result<Self, PatternError> {
        let patterns = patterns
            .iter()
            .map(|p| CompiledPattern::compile(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { patterns })
    }

    /// Compiles the pattern list held by a settings snapshot.
    pub fn from_settings(settings: &PatternSettings) -> Result<Self, PatternError> {
        Self::compile(&parse_pattern_list(&settings.internal_patterns))
    }

    /// Returns true iff at least one pattern fully matches `host`.
    pub fn is_internal(&self, host: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(host))
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// A pattern made redundant by a broader one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternConflict {
    pub pattern: String,
    pub broader: String,
}

impl fmt::Display for PatternConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Cannot add {} to domains as it matches against another broader rule: {}",
            self.pattern, self.broader
        )
    }
}

/// Reports every pattern whose literal form (wildcards removed) is matched by
/// another pattern in the list.
///
/// Quadratic in the number of patterns; meant for configuration time only.
pub fn find_conflicts<S: AsRef<str>>(
    patterns: &[S],
) -> Result<Vec<PatternConflict>, PatternError> {
    let compiled = CompiledPatterns::compile(patterns)?;
    let mut conflicts = Vec::new();

    for (i, pattern) in patterns.iter().enumerate() {
        let pattern = pattern.as_ref();
        let literal = literal_form(pattern);

        for (j, other) in compiled.patterns.iter().enumerate() {
            if i != j && other.is_match(&literal) {
                conflicts.push(PatternConflict {
                    pattern: pattern.to_string(),
                    broader: other.pattern().to_string(),
                });
            }
        }
    }

    Ok(conflicts)
}

/// Owns the compiled-pattern cache for the current configuration snapshot.
///
/// The cached set is keyed by [`PatternSettings::version`]: asking for a
/// different version recompiles, and [`PatternMatcher::invalidate`] drops the
/// cache outright. Reads take a shared lock only.
#[derive(Debug, Default)]
pub struct PatternMatcher {
    cache: RwLock<Option<(i64, Arc<CompiledPatterns>)>>,
}

impl PatternMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the compiled patterns for `settings`, compiling on a cache miss.
    pub fn compiled(
        &self,
        settings: &PatternSettings,
    ) -> Result<Arc<CompiledPatterns>, PatternError> {
        if let Ok(guard) = self.cache.read() {
            if let Some((version, compiled)) = guard.as_ref() {
                if *version == settings.version {
                    return Ok(compiled.clone());
                }
            }
        }

        let compiled = Arc::new(CompiledPatterns::from_settings(settings)?);
        tracing::debug!(
            version = settings.version,
            patterns = compiled.len(),
            "Compiled internal domain patterns"
        );

        if let Ok(mut guard) = self.cache.write() {
            *guard = Some((settings.version, compiled.clone()));
        }

        Ok(compiled)
    }

    /// Drops the cached compiled set.
    pub fn invalidate(&self) {
        if let Ok(mut guard) = self.cache.write() {
            *guard = None;
        }
    }

    /// Version of the cached set, if any.
    pub fn cached_version(&self) -> Option<i64> {
        self.cache
            .read()
            .ok()
            .and_then(|guard| guard.as_ref().map(|(version, _)| *version))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile(patterns: &[&str]) -> CompiledPatterns {
        CompiledPatterns::compile(patterns).unwrap()
    }

    #[test]
    fn test_wildcard_matches_subdomains_only() {
        let set = compile(&["*.example.com"]);
        assert!(set.is_internal("foo.example.com"));
        assert!(set.is_internal("a.b.example.com"));
        assert!(!set.is_internal("example.com"));
    }

    #[test]
    fn test_wildcard_matches_empty_sequence() {
        let set = compile(&["*example.com"]);
        assert!(set.is_internal("example.com"));
        assert!(set.is_internal("myexample.com"));
    }

    #[test]
    fn test_match_is_anchored() {
        let set = compile(&["example.com"]);
        assert!(set.is_internal("example.com"));
        assert!(!set.is_internal("www.example.com"));
        assert!(!set.is_internal("example.com.evil.net"));
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        let set = compile(&["example.com"]);
        assert!(!set.is_internal("exampleXcom"));

        let set = compile(&["a+b.com"]);
        assert!(set.is_internal("a+b.com"));
        assert!(!set.is_internal("aab.com"));
    }

    #[test]
    fn test_match_is_case_sensitive() {
        let set = compile(&["example.com"]);
        assert!(!set.is_internal("EXAMPLE.COM"));
    }

    #[test]
    fn test_empty_set_matches_nothing() {
        let set = compile(&[]);
        assert!(set.is_empty());
        assert!(!set.is_internal("example.com"));
        assert!(!set.is_internal(""));
    }

    #[test]
    fn test_any_pattern_may_match() {
        let set = compile(&["*.localhost", "Foo"]);
        assert!(set.is_internal("foobar.localhost"));
        assert!(set.is_internal("Foo"));
        assert!(!set.is_internal("foo"));
    }

    #[test]
    fn test_parse_pattern_list_line_breaks() {
        assert_eq!(
            parse_pattern_list("*.localhost\rFoo\r\n\nexample.com\n"),
            vec!["*.localhost", "Foo", "example.com"]
        );
        assert!(parse_pattern_list("").is_empty());
    }

    #[test]
    fn test_find_conflicts_reports_redundant_pattern() {
        let conflicts = find_conflicts(&["example.com", "*.example.com"]).unwrap();
        assert_eq!(
            conflicts,
            vec![PatternConflict {
                pattern: "*.example.com".to_string(),
                broader: "example.com".to_string(),
            }]
        );
    }

    #[test]
    fn test_find_conflicts_direction_ignores_order() {
        let conflicts = find_conflicts(&["*.example.com", "example.com"]).unwrap();
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].pattern, "*.example.com");
        assert_eq!(conflicts[0].broader, "example.com");
        assert!(!CompiledPatterns::compile(&["*.example.com"]).unwrap().is_internal("example.com"));
    }

    #[test]
    fn test_literal_form() {
        assert_eq!(literal_form("*.example.com"), "example.com");
        assert_eq!(literal_form("foo*.example.com"), "foo.example.com");
        assert_eq!(literal_form("example.com"), "example.com");
        assert_eq!(literal_form("a*b.com"), "ab.com");
    }

    #[test]
    fn test_find_conflicts_broad_wildcard() {
        let conflicts = find_conflicts(&["foo.example.com", "*.example.com"]).unwrap();
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].pattern, "foo.example.com");
        assert_eq!(conflicts[0].broader, "*.example.com");
        assert_eq!(
            conflicts[0].to_string(),
            "Cannot add foo.example.com to domains as it matches against another broader rule: *.example.com"
        );
    }

    #[test]
    fn test_find_conflicts_none() {
        let conflicts = find_conflicts(&["example.com", "example.org", "*.test.net"]).unwrap();
        assert!(conflicts.is_empty());
    }

    #[test]
    fn test_find_conflicts_duplicates_conflict_both_ways() {
        let conflicts = find_conflicts(&["example.com", "example.com"]).unwrap();
        assert_eq!(conflicts.len(), 2);
    }

    #[test]
    fn test_matcher_caches_per_version() {
        let matcher = PatternMatcher::new();
        let v1 = PatternSettings::new("example.com".to_string(), 1, None);

        let first = matcher.compiled(&v1).unwrap();
        let second = matcher.compiled(&v1).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(matcher.cached_version(), Some(1));

        let v2 = PatternSettings::new("*.example.org".to_string(), 2, None);
        let third = matcher.compiled(&v2).unwrap();
        assert!(!Arc::ptr_eq(&first, &third));
        assert!(third.is_internal("www.example.org"));
        assert!(!third.is_internal("example.com"));
        assert_eq!(matcher.cached_version(), Some(2));
    }

    #[test]
    fn test_matcher_invalidate() {
        let matcher = PatternMatcher::new();
        let settings = PatternSettings::new("example.com".to_string(), 3, None);

        let first = matcher.compiled(&settings).unwrap();
        matcher.invalidate();
        assert_eq!(matcher.cached_version(), None);

        let second = matcher.compiled(&settings).unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
    }
}
