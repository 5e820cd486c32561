use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{ModelError, ModelResult, Property};

/// Ordered list of system properties.
///
/// Lookups scan from the end, so later entries override earlier ones.
/// Serialized as a transparent array of [`Property`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Properties(pub Vec<Property>);

impl Properties {
    /// Create an empty property set.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over all properties in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Property> {
        self.0.iter()
    }

    /// Get the value for a key, returning the last matching entry.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .rev()
            .find(|p| p.key() == key)
            .map(|p| p.value())
    }

    /// Interpret a property as a boolean flag.
    ///
    /// Accepts `true/false`, `yes/no`, `on/off` and `1/0` (case-insensitive).
    /// A present key with an empty value counts as `true` (`-Dflag`).
    /// Returns `None` when the key is absent or the value is not recognized.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        let raw = self.get(key)?.trim().to_ascii_lowercase();
        match raw.as_str() {
            "" | "true" | "yes" | "on" | "1" => Some(true),
            "false" | "no" | "off" | "0" => Some(false),
            _ => None,
        }
    }

    /// Append a property. Later entries override earlier ones in [`Properties::get`].
    pub fn push<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.0.push(Property::new(key, value));
    }

    /// Merge two property sets, where entries from `other` win.
    pub fn merged(&self, other: &Properties) -> Properties {
        let mut out = self.0.clone();
        out.extend(other.0.clone());
        Properties(out)
    }

    /// Parse `.properties`-style text.
    ///
    /// - blank lines and lines starting with `#` or `!` are skipped;
    /// - the first `=` or `:` separates key and value, both trimmed;
    /// - a line ending in `\` continues on the next line, whose leading whitespace is dropped.
    pub fn parse(text: &str) -> ModelResult<Self> {
        let mut out = Properties::new();
        let mut pending: Option<(usize, String)> = None;

        for (idx, raw) in text.lines().enumerate() {
            let line_no = idx + 1;
            let (start, mut logical) = match pending.take() {
                Some((start, acc)) => (start, acc + raw.trim_start()),
                None => {
                    let trimmed = raw.trim_start();
                    if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
                        continue;
                    }
                    (line_no, trimmed.to_string())
                }
            };

            if logical.ends_with('\\') {
                logical.pop();
                pending = Some((start, logical));
                continue;
            }
            out.0.push(parse_line(start, &logical)?);
        }

        // Continuation on the last line: keep what was collected.
        if let Some((start, logical)) = pending {
            out.0.push(parse_line(start, &logical)?);
        }
        Ok(out)
    }

    /// Read and parse a `.properties` file.
    pub fn load(path: impl AsRef<Path>) -> ModelResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Extract `-Dkey=value` arguments.
    ///
    /// `-Dkey` without `=` sets an empty value. Every other argument,
    /// including `-D` and `-D=value` with no key, is returned untouched, in order.
    pub fn from_args<I, S>(args: I) -> (Self, Vec<String>)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut props = Properties::new();
        let mut rest = Vec::new();

        for arg in args {
            let arg = arg.into();
            match arg.strip_prefix("-D").and_then(system_property) {
                Some(prop) => props.0.push(prop),
                None => rest.push(arg),
            }
        }
        (props, rest)
    }
}

impl Default for Properties {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<Property> for Properties {
    fn from_iter<T: IntoIterator<Item = Property>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Splits the part after `-D` on its first `=`; `None` when the key is blank.
fn system_property(assignment: &str) -> Option<Property> {
    let (key, value) = assignment.split_once('=').unwrap_or((assignment, ""));
    let key = key.trim();
    (!key.is_empty()).then(|| Property::from((key, value)))
}

fn parse_line(line: usize, logical: &str) -> ModelResult<Property> {
    Property::parse_assignment(logical).ok_or_else(|| ModelError::InvalidProperty {
        line,
        reason: format!("empty key in {logical:?}"),
    })
}

#[cfg(test)]
mod tests {
    use super::Properties;
    use crate::ModelError;

    #[test]
    fn new_is_empty() {
        let props = Properties::new();
        assert!(props.is_empty());
        assert!(props.get("a").is_none());
    }

    #[test]
    fn push_and_override_last_wins() {
        let mut props = Properties::new();
        props.push("a", "one");
        props.push("b", "x");
        props.push("a", "two");

        assert_eq!(props.get("a"), Some("two"));
        assert_eq!(props.get("b"), Some("x"));
        assert_eq!(props.len(), 3);
    }

    #[test]
    fn merged_other_overrides_base() {
        let mut base = Properties::new();
        base.push("a", "base");
        base.push("b", "b");
        let mut other = Properties::new();
        other.push("a", "override");

        let merged = base.merged(&other);
        assert_eq!(merged.get("a"), Some("override"));
        assert_eq!(merged.get("b"), Some("b"));
    }

    #[test]
    fn parse_skips_comments_and_blank_lines() {
        let text = "# comment\n! also comment\n\n  sbt.version = 1.9.7\nname:demo\n";
        let props = Properties::parse(text).unwrap();

        assert_eq!(props.len(), 2);
        assert_eq!(props.get("sbt.version"), Some("1.9.7"));
        assert_eq!(props.get("name"), Some("demo"));
    }

    #[test]
    fn parse_joins_continuation_lines() {
        let text = "paths = a,\\\n        b,\\\n        c\nnext=1";
        let props = Properties::parse(text).unwrap();

        assert_eq!(props.get("paths"), Some("a,b,c"));
        assert_eq!(props.get("next"), Some("1"));
    }

    #[test]
    fn parse_keeps_trailing_continuation_on_last_line() {
        let props = Properties::parse("k = v\\").unwrap();
        assert_eq!(props.get("k"), Some("v"));
    }

    #[test]
    fn parse_reports_line_of_empty_key() {
        let err = Properties::parse("ok=1\n\n = nope").unwrap_err();
        assert!(matches!(err, ModelError::InvalidProperty { line: 3, .. }));
    }

    #[test]
    fn load_reports_missing_file() {
        let err = Properties::load("/definitely/not/here.properties").unwrap_err();
        assert!(matches!(err, ModelError::Io(_)));
    }

    #[test]
    fn load_reads_file() {
        let path = std::env::temp_dir().join(format!("wrapkit-props-{}.properties", std::process::id()));
        std::fs::write(&path, "a=1\nb = two\n").unwrap();

        let props = Properties::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(props.get("a"), Some("1"));
        assert_eq!(props.get("b"), Some("two"));
    }

    #[test]
    fn from_args_extracts_system_properties() {
        let args = ["-Dfile.encoding=UTF-8", "compile", "-Dquiet", "-D", "-Xmx1g", "-Dk=a=b"];
        let (props, rest) = Properties::from_args(args);

        assert_eq!(props.get("file.encoding"), Some("UTF-8"));
        assert_eq!(props.get("quiet"), Some(""));
        assert_eq!(props.get("k"), Some("a=b"));
        assert_eq!(rest, vec!["compile", "-D", "-Xmx1g"]);
    }

    #[test]
    fn from_args_leaves_keyless_assignments_alone() {
        let args = ["-D=oops", "-D =x", "-D", "-Dok=1"];
        let (props, rest) = Properties::from_args(args);

        assert_eq!(props.len(), 1);
        assert_eq!(props.get("ok"), Some("1"));
        assert!(props.iter().all(|p| !p.key().trim().is_empty()));
        assert_eq!(rest, vec!["-D=oops", "-D =x", "-D"]);
    }

    #[test]
    fn get_bool_recognizes_common_spellings() {
        let (props, _) = Properties::from_args([
            "-Da=true", "-Db=OFF", "-Dc", "-Dd=1", "-De=maybe",
        ]);

        assert_eq!(props.get_bool("a"), Some(true));
        assert_eq!(props.get_bool("b"), Some(false));
        assert_eq!(props.get_bool("c"), Some(true));
        assert_eq!(props.get_bool("d"), Some(true));
        assert_eq!(props.get_bool("e"), None);
        assert_eq!(props.get_bool("missing"), None);
    }

    #[test]
    fn serde_transparent_roundtrip_json() {
        let props = Properties::parse("a=1\nb=2").unwrap();
        let json = serde_json::to_string(&props).unwrap();
        assert!(json.starts_with('['));

        let back: Properties = serde_json::from_str(&json).unwrap();
        assert_eq!(back, props);
    }
}
