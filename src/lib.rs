//! Modelex - A Rust-native CLI for exporting versioned design-model repositories
//!
//! Modelex is a single-binary tool that walks a hierarchical, versioned
//! design-model repository (modules, folders, documents) and, for every node
//! visited, emits two parallel artifacts: a canonical structural snapshot and
//! an executable regeneration script that reconstructs the node when replayed
//! against a fresh empty tree.
//!
//! # Architecture
//!
//! The codebase follows a strict layered architecture:
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to export)
//! - [`core`] - Domain types, naming rules, replay transcoding, configuration
//! - [`export`] - Traversal engine, dual serialization, artifact writing
//! - [`source`] - Abstraction for remote tree sources (HTTP v1)
//! - [`ui`] - User interaction utilities
//!
//! # Correctness Invariants
//!
//! Modelex maintains the following invariants:
//!
//! 1. Within any folder, documents are exported strictly before child folders,
//!    so a replayed script never references a folder before its creation
//! 2. Every script identifier is derived from the node name via the sanitizer,
//!    and sibling collisions abort the run instead of corrupting the script
//! 3. Re-serializing an unchanged document yields byte-identical snapshots
//! 4. A failed working-copy acquisition terminates cleanly with zero artifacts

pub mod cli;
pub mod core;
pub mod export;
pub mod source;
pub mod ui;
