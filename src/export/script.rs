//! export::script
//!
//! Per-module regeneration-script accumulation.
//!
//! # Design
//!
//! A [`ScriptBuffer`] is the exclusively-owned, append-only accumulator for
//! one module's regeneration script. It is seeded with the capability-import
//! preamble, and every statement appended during the module's walk lands in
//! traversal order, so the flushed script replays top-to-bottom without ever
//! referencing a folder identifier before its creation statement.
//!
//! The buffer also records every identifier it emits. Sibling names that
//! sanitize to the same token would silently collide in the replayed script,
//! so a duplicate declaration aborts the run instead.

use std::collections::HashSet;

use thiserror::Error;

use crate::core::naming::folder_ident;
use crate::core::replay::js_str;

/// Fixed import preamble declaring the capability set regeneration scripts
/// depend on: the same vocabulary of container/document constructors the
/// source tree exposes.
pub const SCRIPT_PREAMBLE: &str = "import { containers, documents, datatypes, navigation, security, StructureBuilder } from \"designmodel-sdk\";\n";

/// Errors from script accumulation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScriptError {
    /// Two sibling names sanitized to the same script identifier.
    #[error("identifier collision: '{name}' sanitizes to '{identifier}', which is already taken")]
    IdentifierCollision {
        /// The colliding identifier token
        identifier: String,
        /// The display name that produced it
        name: String,
    },
}

/// Append-only script accumulator for one module.
#[derive(Debug)]
pub struct ScriptBuffer {
    text: String,
    declared: HashSet<String>,
}

impl ScriptBuffer {
    /// Start a buffer for a module, seeded with the import preamble.
    ///
    /// The module's own root identifier is pre-registered: top-level
    /// documents are replayed against it, and it is supplied by the replay
    /// environment rather than declared in the script.
    pub fn for_module(module_name: &str) -> Self {
        let mut declared = HashSet::new();
        declared.insert(folder_ident(module_name));
        Self {
            text: SCRIPT_PREAMBLE.to_string(),
            declared,
        }
    }

    /// Emit a folder-creation statement.
    ///
    /// Declares a new identifier for the folder, binds it to a creation
    /// under the parent's identifier, and sets its display name to the
    /// literal folder name.
    ///
    /// # Errors
    ///
    /// Returns `ScriptError::IdentifierCollision` if the folder's sanitized
    /// identifier was already declared in this module's script.
    pub fn declare_folder(&mut self, folder_name: &str, parent_name: &str) -> Result<(), ScriptError> {
        let ident = folder_ident(folder_name);
        if !self.declared.insert(ident.clone()) {
            return Err(ScriptError::IdentifierCollision {
                identifier: ident,
                name: folder_name.to_string(),
            });
        }
        self.text.push_str(&format!(
            "  var {} = containers.Folder.createIn({});\n  {}.name = {};\n",
            ident,
            folder_ident(parent_name),
            ident,
            js_str(folder_name)
        ));
        Ok(())
    }

    /// Emit a replay-call statement invoking a document's regeneration
    /// function with the parent folder identifier and the model handle.
    ///
    /// # Errors
    ///
    /// Returns `ScriptError::IdentifierCollision` if the function name was
    /// already emitted in this module's script.
    pub fn replay_call(&mut self, fn_name: &str, parent_name: &str) -> Result<(), ScriptError> {
        if !self.declared.insert(fn_name.to_string()) {
            return Err(ScriptError::IdentifierCollision {
                identifier: fn_name.to_string(),
                name: fn_name.to_string(),
            });
        }
        self.text.push_str(&format!(
            "  {}({}, model);\n",
            fn_name,
            folder_ident(parent_name)
        ));
        Ok(())
    }

    /// The accumulated script text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Consume the buffer, yielding the script text.
    pub fn into_string(self) -> String {
        self.text
    }
}
