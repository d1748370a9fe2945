//! Href eligibility rules.
//!
//! The rules here are pure: they look at the href string and the compiled
//! internal patterns only. The one rule that needs storage (does a canonical
//! reference point at an existing record?) is reported as
//! [`Precheck::Canonical`] and settled by
//! [`crate::application::services::HrefClassifier`].

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::domain::patterns::CompiledPatterns;
use crate::utils::external_url::is_external;
use crate::utils::extract_host::extract_host;

/// Path prefix of canonical link record references.
pub const DEFAULT_LINK_PATH_PREFIX: &str = "/admin/content/linky";

static DEFAULT_CANONICAL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/admin/content/linky/(?P<id>\d+)").unwrap());

/// Why an href is left alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IneligibleReason {
    Fragment,
    Telephone,
    Mailto,
    Internal,
    /// Points at an existing link record.
    AlreadyCanonical(i64),
    /// Looks like a canonical reference but names no record.
    MalformedCanonicalReference(String),
    NotExternal,
}

impl fmt::Display for IneligibleReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fragment => write!(f, "fragment-only href"),
            Self::Telephone => write!(f, "telephone link"),
            Self::Mailto => write!(f, "mailto link"),
            Self::Internal => write!(f, "host matches an internal pattern"),
            Self::AlreadyCanonical(id) => write!(f, "already references link record {id}"),
            Self::MalformedCanonicalReference(id) => {
                write!(f, "references missing link record {id}")
            }
            Self::NotExternal => write!(f, "not an absolute external URL"),
        }
    }
}

/// Final eligibility of an href.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Eligible,
    Ineligible(IneligibleReason),
}

impl Classification {
    pub fn is_eligible(&self) -> bool {
        matches!(self, Self::Eligible)
    }
}

/// Outcome of the storage-free rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Precheck {
    Eligible,
    /// The href contains a canonical reference to this record id; whether the
    /// record exists decides the final classification.
    Canonical(i64),
    Ineligible(IneligibleReason),
}

/// The canonical link record path, `{prefix}/{id}`.
#[derive(Debug, Clone)]
pub struct CanonicalPath {
    prefix: String,
    regex: Regex,
}

impl CanonicalPath {
    /// Builds the path template for `prefix`.
    ///
    /// A missing leading slash is added and trailing slashes are dropped, so
    /// `admin/content/linky/` and `/admin/content/linky` are the same prefix.
    pub fn new(prefix: &str) -> Result<Self, regex::Error> {
        let trimmed = prefix.trim().trim_matches('/');
        let prefix = format!("/{trimmed}");
        let regex = Regex::new(&format!(r"{}/(?P<id>\d+)", regex::escape(&prefix)))?;

        Ok(Self { prefix, regex })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Finds a canonical reference anywhere in `href`.
    ///
    /// Returns the digits as written; they may not fit an `i64`.
    pub fn find_id<'a>(&self, href: &'a str) -> Option<&'a str> {
        self.regex
            .captures(href)
            .and_then(|captures| captures.name("id"))
            .map(|id| id.as_str())
    }

    /// Internal path of a record, without the leading slash.
    pub fn internal_path(&self, id: i64) -> String {
        format!("{}/{id}", &self.prefix[1..])
    }

    /// Replacement href for a record: `/` followed by its internal path.
    pub fn href_for(&self, id: i64) -> String {
        format!("/{}", self.internal_path(id))
    }
}

impl Default for CanonicalPath {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_LINK_PATH_PREFIX.to_string(),
            regex: DEFAULT_CANONICAL_REGEX.clone(),
        }
    }
}

/// Applies the storage-free eligibility rules in order; the first match wins.
///
/// 1. `#...` fragment
/// 2. `tel:` link
/// 3. `mailto:` link
/// 4. host matched by an internal pattern
/// 5. canonical reference (settled by the caller)
/// 6. anything that is not an absolute external URL
pub fn precheck(href: &str, internal: &CompiledPatterns, canonical: &CanonicalPath) -> Precheck {
    if href.starts_with('#') {
        return Precheck::Ineligible(IneligibleReason::Fragment);
    }
    if href.starts_with("tel:") {
        return Precheck::Ineligible(IneligibleReason::Telephone);
    }
    if href.starts_with("mailto:") {
        return Precheck::Ineligible(IneligibleReason::Mailto);
    }

    if let Some(host) = extract_host(href)
        && internal.is_internal(host)
    {
        return Precheck::Ineligible(IneligibleReason::Internal);
    }

    if let Some(digits) = canonical.find_id(href) {
        return match digits.parse::<i64>() {
            Ok(id) => Precheck::Canonical(id),
            Err(_) => Precheck::Ineligible(IneligibleReason::MalformedCanonicalReference(
                digits.to_string(),
            )),
        };
    }

    if !is_external(href) {
        return Precheck::Ineligible(IneligibleReason::NotExternal);
    }

    Precheck::Eligible
}
