//! Indented rendering of nested [`Value`] trees.
//!
//! Output goes to a caller-supplied line sink, one call per line, in
//! depth-first pre-order:
//!
//! ```text
//! deps = {
//!    model
//!    observe
//! }
//! name = core
//! ```
mod value;
pub use value::Value;

use std::fmt;

/// Indent unit used by [`StructurePrinter::default`].
pub const DEFAULT_INDENT: &str = "   ";

/// Renders [`Value`] trees as indented text.
///
/// Holds only the indent unit, so one printer can be shared freely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructurePrinter {
    indent: String,
}

impl Default for StructurePrinter {
    fn default() -> Self {
        Self::with_indent(DEFAULT_INDENT)
    }
}

impl StructurePrinter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Printer with a custom indent unit, repeated once per nesting level.
    pub fn with_indent(unit: impl Into<String>) -> Self {
        Self {
            indent: unit.into(),
        }
    }

    /// Renders a top-level value: empty prefix, depth 0.
    pub fn render<F>(&self, value: &Value, mut sink: F)
    where
        F: FnMut(&str),
    {
        self.walk(value, &mut sink, "", 0);
    }

    /// Renders `value` with `prefix` on its first line, nested `depth` levels deep.
    pub fn render_with<F>(&self, value: &Value, mut sink: F, prefix: &str, depth: usize)
    where
        F: FnMut(&str),
    {
        self.walk(value, &mut sink, prefix, depth);
    }

    /// Renders into a vector of lines.
    pub fn render_lines(&self, value: &Value) -> Vec<String> {
        let mut lines = Vec::new();
        self.render(value, |line| lines.push(line.to_string()));
        lines
    }

    fn walk(&self, value: &Value, sink: &mut dyn FnMut(&str), prefix: &str, depth: usize) {
        let pad = self.indent.repeat(depth);
        match value {
            Value::Pair(label, inner) => {
                self.walk(inner, sink, &format!("{label} = "), depth);
            }
            Value::Optional(Some(inner)) => self.walk(inner, sink, prefix, depth),
            Value::Optional(None) => sink(&format!("{pad}{prefix}")),
            Value::Collection(items) if items.is_empty() => sink(&format!("{pad}{prefix}{{}}")),
            Value::Collection(items) => {
                sink(&format!("{pad}{prefix}{{"));
                for item in items {
                    self.walk(item, sink, "", depth + 1);
                }
                sink(&format!("{pad}}}"));
            }
            Value::Scalar(text) => sink(&format!("{pad}{prefix}{text}")),
        }
    }
}

/// Renders `value` with the default printer.
pub fn render<F>(value: &Value, sink: F)
where
    F: FnMut(&str),
{
    StructurePrinter::default().render(value, sink);
}

/// Renders `value` with the default printer, starting at `prefix` and `depth`.
pub fn render_with<F>(value: &Value, sink: F, prefix: &str, depth: usize)
where
    F: FnMut(&str),
{
    StructurePrinter::default().render_with(value, sink, prefix, depth);
}

/// Renders `value` with the default printer into a vector of lines.
pub fn render_lines(value: &Value) -> Vec<String> {
    StructurePrinter::default().render_lines(value)
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_lines(self).join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines_with(value: &Value, prefix: &str, depth: usize) -> Vec<String> {
        let mut out = Vec::new();
        render_with(value, |l| out.push(l.to_string()), prefix, depth);
        out
    }

    #[test]
    fn empty_collection_with_prefix() {
        let value = Value::collection(Vec::<Value>::new());
        assert_eq!(lines_with(&value, "x = ", 0), vec!["x = {}"]);
    }

    #[test]
    fn labeled_collection_children_have_no_prefix() {
        let value = Value::pair("a", vec!["b", "c"]);
        assert_eq!(render_lines(&value), vec!["a = {", "   b", "   c", "}"]);
    }

    #[test]
    fn absent_optional_prints_bare_prefix() {
        assert_eq!(lines_with(&Value::none(), "k = ", 1), vec!["   k = "]);
    }

    #[test]
    fn absent_optional_at_top_level_is_blank_line() {
        assert_eq!(render_lines(&Value::none()), vec![""]);
    }

    #[test]
    fn top_level_scalar_has_no_prefix() {
        assert_eq!(render_lines(&Value::from(42)), vec!["42"]);
    }

    #[test]
    fn present_optional_is_transparent() {
        let value = Value::pair("scala", Value::some(Value::some("2.13")));
        assert_eq!(render_lines(&value), vec!["scala = 2.13"]);
    }

    #[test]
    fn nested_collections_render_independently() {
        let value = Value::collection([
            Value::collection(Vec::<Value>::new()),
            Value::collection(["x"]),
            Value::pair("empty", Value::collection(Vec::<Value>::new())),
        ]);

        assert_eq!(
            render_lines(&value),
            vec!["{", "   {}", "   {", "      x", "   }", "   empty = {}", "}"]
        );
    }

    #[test]
    fn closing_brace_drops_prefix() {
        let value = Value::collection([Value::pair("deps", vec!["model"])]);
        assert_eq!(
            render_lines(&value),
            vec!["{", "   deps = {", "      model", "   }", "}"]
        );
    }

    #[test]
    fn custom_indent_unit() {
        let printer = StructurePrinter::with_indent("\t");
        let value = Value::collection([Value::collection(["leaf"])]);
        assert_eq!(printer.render_lines(&value), vec!["{", "\t{", "\t\tleaf", "\t}", "}"]);
    }

    #[test]
    fn rendering_is_repeatable() {
        let value = Value::collection([
            Value::pair("name", "core"),
            Value::pair("scala", None::<String>),
            Value::pair("deps", vec!["model", "observe"]),
        ]);

        let mut out = Vec::new();
        render(&value, |l| out.push(l.to_string()));
        render(&value, |l| out.push(l.to_string()));

        let (first, second) = out.split_at(out.len() / 2);
        assert_eq!(first, second);
    }

    #[test]
    fn display_joins_lines() {
        let value = Value::pair("a", vec!["b"]);
        assert_eq!(value.to_string(), "a = {\n   b\n}");
    }
}
