//! core::naming
//!
//! Identifier sanitization and script naming rules.
//!
//! # Features
//!
//! - Sanitize display names into regeneration-script identifiers
//! - Derive replay function names from qualified names
//! - Derive synthetic names for nodes that have no qualified name
//! - Derive folder variable identifiers

use crate::core::types::QualifiedName;

/// The escape character substituted for spaces and periods.
const ESCAPE: char = '$';

/// Sanitize a display name into a script-safe identifier token.
///
/// Replaces every space and every period with `$`, leaving all other
/// characters untouched. Total over all inputs and deterministic.
///
/// # Example
///
/// ```
/// use modelex::core::naming::sanitize;
///
/// assert_eq!(sanitize("Admin Tools"), "Admin$Tools");
/// assert_eq!(sanitize("Sales.Customer"), "Sales$Customer");
/// assert_eq!(sanitize("Plain"), "Plain");
/// ```
pub fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| if c == ' ' || c == '.' { ESCAPE } else { c })
        .collect()
}

/// The replay function name for a document, derived from its qualified name.
pub fn replay_fn_name(qualified: &QualifiedName) -> String {
    sanitize(qualified.as_str())
}

/// A synthetic replay function name for a node with no qualified name of
/// its own (domain models, security documents, positional collections).
///
/// Uses a double-escape join so the prefix reads as a separate segment:
/// `synthetic_fn_name("DM", "Sales")` is `DM$$Sales`.
pub fn synthetic_fn_name(prefix: &str, name: &str) -> String {
    format!("{}{}{}{}", prefix, ESCAPE, ESCAPE, sanitize(name))
}

/// The script variable identifier bound to a folder (or module root).
pub fn folder_ident(name: &str) -> String {
    format!("folder{}", sanitize(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_replaces_spaces_and_periods() {
        assert_eq!(sanitize("Admin Tools"), "Admin$Tools");
        assert_eq!(sanitize("Sales.Customer"), "Sales$Customer");
        assert_eq!(sanitize("a.b c.d"), "a$b$c$d");
    }

    #[test]
    fn sanitize_leaves_other_characters_untouched() {
        assert_eq!(sanitize("Nothing-To_Do"), "Nothing-To_Do");
        assert_eq!(sanitize(""), "");
        assert_eq!(sanitize("$already"), "$already");
    }

    #[test]
    fn sanitize_is_deterministic() {
        let name = "Admin Tools.v2";
        assert_eq!(sanitize(name), sanitize(name));
    }

    #[test]
    fn replay_fn_name_uses_qualified_name() {
        let qualified = QualifiedName::new("Sales.Customer").unwrap();
        assert_eq!(replay_fn_name(&qualified), "Sales$Customer");
    }

    #[test]
    fn synthetic_fn_name_double_escapes_prefix() {
        assert_eq!(synthetic_fn_name("DM", "Sales"), "DM$$Sales");
        assert_eq!(synthetic_fn_name("MSC", "Admin Tools"), "MSC$$Admin$Tools");
        assert_eq!(synthetic_fn_name("NAV", "0"), "NAV$$0");
    }

    #[test]
    fn folder_ident_prefixes_sanitized_name() {
        assert_eq!(folder_ident("Sales"), "folderSales");
        assert_eq!(folder_ident("Admin Tools"), "folderAdmin$Tools");
    }
}
