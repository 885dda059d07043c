//! export::serialize
//!
//! Dual serialization of one loaded unit.
//!
//! # Design
//!
//! `serialize` turns a loaded unit into its two parallel artifacts: a
//! canonical structural snapshot and a self-contained regeneration-script
//! fragment. It is generic over the [`Replay`] capabilities and never
//! inspects a unit's kind, so all document kinds flow through one code path.
//!
//! The script fragment wraps the unit's replay body in the import preamble
//! and a function named after the sanitized display identifier; the body
//! itself comes from the structural transcoder.

use crate::core::naming::sanitize;
use crate::core::replay::Replay;
use crate::core::types::Fingerprint;

use super::script::SCRIPT_PREAMBLE;

/// The two parallel artifacts produced for one unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DualArtifact {
    /// Canonical structural snapshot (pretty JSON)
    pub snapshot: String,
    /// Self-contained regeneration-script fragment
    pub script: String,
}

impl DualArtifact {
    /// Fingerprint of the snapshot, for idempotence checks and debug output.
    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint::of(&self.snapshot)
    }
}

/// Serialize one loaded unit into its snapshot and script fragment.
///
/// `display_identifier` names the regeneration function: a document's
/// qualified name, or a synthetic `PREFIX$$name` for nodes without one. The
/// identifier is sanitized here, so callers pass the display form.
///
/// # Errors
///
/// Returns the underlying serialization error if the unit's content cannot
/// be rendered as a snapshot.
pub fn serialize<R: Replay>(
    unit: &R,
    display_identifier: &str,
) -> serde_json::Result<DualArtifact> {
    let snapshot = unit.snapshot()?;
    let script = format!(
        "{}\n(function {}{})\n",
        SCRIPT_PREAMBLE,
        sanitize(display_identifier),
        unit.replay_body()
    );
    Ok(DualArtifact { snapshot, script })
}
