//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`TreeId`] - Validated identifier of a design-model repository
//! - [`BranchName`] - Validated branch selector
//! - [`QualifiedName`] - A document's repository-unique dotted name
//! - [`VcsKind`] - Versioning-system kind behind a tree
//! - [`UtcTimestamp`] - RFC3339 timestamp
//! - [`Fingerprint`] - Content hash for snapshot idempotence checks
//!
//! # Validation
//!
//! These types enforce validity at construction time. Invalid values
//! cannot be represented, preventing entire classes of bugs.
//!
//! # Examples
//!
//! ```
//! use modelex::core::types::{BranchName, QualifiedName, TreeId};
//!
//! // Valid constructions
//! let tree = TreeId::new("acme-crm").unwrap();
//! let branch = BranchName::new("release/2.4").unwrap();
//! let name = QualifiedName::new("Sales.Customer").unwrap();
//! assert_eq!(name.module(), "Sales");
//!
//! // Invalid constructions fail at creation time
//! assert!(TreeId::new("has space").is_err());
//! assert!(BranchName::new("").is_err());
//! assert!(QualifiedName::new("Sales..Customer").is_err());
//! ```

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid tree id: {0}")]
    InvalidTreeId(String),

    #[error("invalid branch name: {0}")]
    InvalidBranchName(String),

    #[error("invalid qualified name: {0}")]
    InvalidQualifiedName(String),
}

/// A validated identifier of a design-model repository.
///
/// Tree ids come from the hosting service (the value shown on a tree's
/// portal page). They must be non-empty and free of whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TreeId(String);

impl TreeId {
    /// Create a new validated tree id.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidTreeId` if the id is empty or contains
    /// whitespace.
    pub fn new(id: impl Into<String>) -> Result<Self, TypeError> {
        let id = id.into();
        if id.is_empty() {
            return Err(TypeError::InvalidTreeId("tree id cannot be empty".into()));
        }
        if id.chars().any(|c| c.is_whitespace()) {
            return Err(TypeError::InvalidTreeId(format!(
                "tree id cannot contain whitespace: '{}'",
                id
            )));
        }
        Ok(Self(id))
    }

    /// Get the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TreeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for TreeId {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TreeId> for String {
    fn from(value: TreeId) -> Self {
        value.0
    }
}

/// A validated branch selector.
///
/// Branch names must be non-empty, free of whitespace and control
/// characters, and must not start with `-`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BranchName(String);

impl BranchName {
    /// Create a new validated branch name.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidBranchName` if the name violates the rules.
    pub fn new(name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();
        if name.is_empty() {
            return Err(TypeError::InvalidBranchName(
                "branch name cannot be empty".into(),
            ));
        }
        if name.starts_with('-') {
            return Err(TypeError::InvalidBranchName(
                "branch name cannot start with '-'".into(),
            ));
        }
        if name.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(TypeError::InvalidBranchName(format!(
                "branch name cannot contain whitespace or control characters: '{}'",
                name
            )));
        }
        Ok(Self(name))
    }

    /// Get the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BranchName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for BranchName {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<BranchName> for String {
    fn from(value: BranchName) -> Self {
        value.0
    }
}

/// A document's repository-unique dotted name.
///
/// The first segment is the owning module; the remainder is the document's
/// local name. Every dot-separated segment must be non-empty.
///
/// # Example
///
/// ```
/// use modelex::core::types::QualifiedName;
///
/// let name = QualifiedName::new("Sales.Customer").unwrap();
/// assert_eq!(name.module(), "Sales");
/// assert_eq!(name.local(), "Customer");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct QualifiedName(String);

impl QualifiedName {
    /// Create a new validated qualified name.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidQualifiedName` if the name is empty, is not
    /// dotted, or contains an empty segment.
    pub fn new(name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();
        if name.is_empty() {
            return Err(TypeError::InvalidQualifiedName(
                "qualified name cannot be empty".into(),
            ));
        }
        if !name.contains('.') {
            return Err(TypeError::InvalidQualifiedName(format!(
                "qualified name must contain a module segment: '{}'",
                name
            )));
        }
        if name.split('.').any(|segment| segment.is_empty()) {
            return Err(TypeError::InvalidQualifiedName(format!(
                "qualified name cannot contain empty segments: '{}'",
                name
            )));
        }
        Ok(Self(name))
    }

    /// Build a qualified name from a module and a local document name.
    pub fn from_parts(module: &str, local: &str) -> Result<Self, TypeError> {
        Self::new(format!("{}.{}", module, local))
    }

    /// Get the full dotted name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The owning module segment (everything before the first dot).
    pub fn module(&self) -> &str {
        self.0.split('.').next().unwrap_or(&self.0)
    }

    /// The local name (everything after the first dot).
    pub fn local(&self) -> &str {
        match self.0.split_once('.') {
            Some((_, local)) => local,
            None => &self.0,
        }
    }
}

impl std::fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for QualifiedName {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<QualifiedName> for String {
    fn from(value: QualifiedName) -> Self {
        value.0
    }
}

/// The versioning-system kind behind a tree's repository.
///
/// Each kind has a well-known default branch name, used when the branch
/// selector is absent or one of the default-branch aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VcsKind {
    /// Subversion-backed repository; default branch is `trunk`.
    Svn,
    /// Git-backed repository; default branch is `main`.
    Git,
}

impl VcsKind {
    /// The concrete default branch name for this kind.
    pub fn default_branch(&self) -> &'static str {
        match self {
            VcsKind::Svn => "trunk",
            VcsKind::Git => "main",
        }
    }
}

impl std::fmt::Display for VcsKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VcsKind::Svn => write!(f, "svn"),
            VcsKind::Git => write!(f, "git"),
        }
    }
}

/// An RFC3339 UTC timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtcTimestamp(DateTime<Utc>);

impl UtcTimestamp {
    /// Capture the current time.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Render as an RFC3339 string with second precision.
    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

impl std::fmt::Display for UtcTimestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_rfc3339())
    }
}

/// A SHA-256 content fingerprint.
///
/// Used to confirm snapshot idempotence: re-serializing an unchanged
/// document must produce the same fingerprint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Compute the fingerprint of a byte slice.
    pub fn of(bytes: impl AsRef<[u8]>) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(bytes.as_ref());
        Self(hex::encode(hasher.finalize()))
    }

    /// Get the hex digest as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tree_id_accepts_portal_style_ids() {
        assert!(TreeId::new("acme-crm").is_ok());
        assert!(TreeId::new("8a3f2c1e-77d4-4b02-9f51-0c6a1b2d3e4f").is_ok());
    }

    #[test]
    fn tree_id_rejects_empty_and_whitespace() {
        assert!(TreeId::new("").is_err());
        assert!(TreeId::new("two words").is_err());
        assert!(TreeId::new("tab\tid").is_err());
    }

    #[test]
    fn branch_name_rules() {
        assert!(BranchName::new("main").is_ok());
        assert!(BranchName::new("release/2.4").is_ok());
        assert!(BranchName::new("").is_err());
        assert!(BranchName::new("-flag").is_err());
        assert!(BranchName::new("has space").is_err());
    }

    #[test]
    fn qualified_name_parts() {
        let name = QualifiedName::new("Sales.Customer").unwrap();
        assert_eq!(name.module(), "Sales");
        assert_eq!(name.local(), "Customer");

        let nested = QualifiedName::new("Sales.Reports.Monthly").unwrap();
        assert_eq!(nested.module(), "Sales");
        assert_eq!(nested.local(), "Reports.Monthly");
    }

    #[test]
    fn qualified_name_rejects_malformed() {
        assert!(QualifiedName::new("").is_err());
        assert!(QualifiedName::new("NoModule").is_err());
        assert!(QualifiedName::new("Sales..Customer").is_err());
        assert!(QualifiedName::new(".Customer").is_err());
        assert!(QualifiedName::new("Sales.").is_err());
    }

    #[test]
    fn vcs_kind_default_branches() {
        assert_eq!(VcsKind::Svn.default_branch(), "trunk");
        assert_eq!(VcsKind::Git.default_branch(), "main");
    }

    #[test]
    fn vcs_kind_serde_lowercase() {
        assert_eq!(serde_json::to_string(&VcsKind::Svn).unwrap(), "\"svn\"");
        let kind: VcsKind = serde_json::from_str("\"git\"").unwrap();
        assert_eq!(kind, VcsKind::Git);
    }

    #[test]
    fn fingerprint_is_deterministic() {
        let a = Fingerprint::of("snapshot");
        let b = Fingerprint::of("snapshot");
        assert_eq!(a, b);
        assert_ne!(a, Fingerprint::of("other"));
        assert_eq!(a.as_str().len(), 64);
    }
}
