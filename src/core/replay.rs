//! core::replay
//!
//! Structural-to-replay-statement transcoding.
//!
//! # Design
//!
//! The export engine is polymorphic over exactly two capabilities, captured
//! by the [`Replay`] trait: produce a canonical snapshot, and produce a
//! replay fragment body. It never branches on a unit's kind beyond these.
//!
//! The transcoder renders an opaque structural value as a sequence of
//! builder statements against the capability set named in the script
//! preamble (`model.create`, `.set`, `.part`, `.append`). Statement order
//! follows the value's canonical field order, so transcoding the identical
//! in-memory value twice yields identical text.

use serde_json::Value;

/// The two capabilities the export engine requires of a loaded unit.
pub trait Replay {
    /// Canonical structural snapshot of the unit's full content.
    ///
    /// Byte-stable under re-serialization of the identical in-memory value.
    fn snapshot(&self) -> serde_json::Result<String>;

    /// Replay fragment body: `(parent, model) { ... }`.
    ///
    /// When invoked with a live parent-folder reference and a live model
    /// handle, the body reconstructs the unit's structure and content
    /// against that parent.
    fn replay_body(&self) -> String;
}

/// Render a unit's structural content as a replay fragment body.
///
/// The body declares the unit against its parent and then assigns every
/// field in canonical order. Nested objects become numbered part variables;
/// arrays of objects become appended children.
///
/// # Example
///
/// ```
/// use modelex::core::replay::render_replay_body;
/// use serde_json::json;
///
/// let body = render_replay_body("Document", &json!({"name": "Customer"}));
/// assert!(body.starts_with("(parent, model) {"));
/// assert!(body.contains("model.create('Document', parent)"));
/// assert!(body.contains("unit.set('name', \"Customer\");"));
/// ```
pub fn render_replay_body(kind: &str, content: &Value) -> String {
    let mut out = String::new();
    out.push_str("(parent, model) {\n");
    out.push_str(&format!(
        "  var unit = model.create({}, parent);\n",
        js_str(kind)
    ));
    let mut counter = 0usize;
    render_value("unit", content, &mut out, &mut counter);
    out.push('}');
    out
}

/// Emit assignment statements for one structural value onto `target`.
fn render_value(target: &str, value: &Value, out: &mut String, counter: &mut usize) {
    match value {
        Value::Object(fields) => {
            for (key, field) in fields {
                render_field(target, key, field, out, counter);
            }
        }
        // A unit body is normally an object; anything else is assigned whole.
        other => {
            out.push_str(&format!("  {}.assign({});\n", target, json_literal(other)));
        }
    }
}

fn render_field(target: &str, key: &str, value: &Value, out: &mut String, counter: &mut usize) {
    match value {
        Value::Object(_) => {
            *counter += 1;
            let child = format!("u{}", counter);
            out.push_str(&format!(
                "  var {} = {}.part({});\n",
                child,
                target,
                js_str(key)
            ));
            render_value(&child, value, out, counter);
        }
        Value::Array(items) if items.iter().any(Value::is_object) => {
            for item in items {
                if item.is_object() {
                    *counter += 1;
                    let child = format!("u{}", counter);
                    out.push_str(&format!(
                        "  var {} = {}.append({});\n",
                        child,
                        target,
                        js_str(key)
                    ));
                    render_value(&child, item, out, counter);
                } else {
                    out.push_str(&format!(
                        "  {}.append({}, {});\n",
                        target,
                        js_str(key),
                        json_literal(item)
                    ));
                }
            }
        }
        scalar_or_flat_array => {
            out.push_str(&format!(
                "  {}.set({}, {});\n",
                target,
                js_str(key),
                json_literal(scalar_or_flat_array)
            ));
        }
    }
}

/// Render a value as a compact JSON literal (valid JavaScript).
fn json_literal(value: &Value) -> String {
    // Compact JSON over a canonically ordered map is deterministic.
    serde_json::to_string(value).unwrap_or_else(|_| "null".to_string())
}

/// Render a string as a single-quoted JavaScript literal.
pub fn js_str(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    out.push('\'');
    out
}
