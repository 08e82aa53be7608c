//! Locates the single `polyglot.export_value(...)` call in a script.

use crate::scanner::{
    extract_balanced, in_string_literal, index_of_top_level, is_identifier_char,
    split_top_level_commas, strip_comments, strip_outer, strip_quotes,
};
use once_cell::sync::Lazy;
use regex::Regex;

static EXPORT_START: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"polyglot\.export_value\s*\(\s*["'](\w+)["']\s*,"#).unwrap()
});

/// What a script publishes to the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportInfo {
    /// Name the host sees; becomes the contract class name
    pub api_name: String,
    pub target: ExportTarget,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportTarget {
    /// `export_value("Api", SomeClass)`
    Class(String),
    /// `export_value("Api", {"name": function, ...})`
    Functions(NameMapping),
}

/// Exported name → internal function name, in declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameMapping {
    entries: Vec<(String, String)>,
}

impl ExportInfo {
    pub fn is_class_export(&self) -> bool {
        matches!(self.target, ExportTarget::Class(_))
    }

    pub fn target_class_name(&self) -> Option<&str> {
        match &self.target {
            ExportTarget::Class(name) => Some(name),
            ExportTarget::Functions(_) => None,
        }
    }

    pub fn name_mapping(&self) -> Option<&NameMapping> {
        match &self.target {
            ExportTarget::Class(_) => None,
            ExportTarget::Functions(mapping) => Some(mapping),
        }
    }
}

impl NameMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Later keys replace earlier ones, as in a Python dict literal
    pub fn insert(&mut self, exported: impl Into<String>, internal: impl Into<String>) {
        let exported = exported.into();
        let internal = internal.into();
        match self.entries.iter_mut().find(|(e, _)| *e == exported) {
            Some(entry) => entry.1 = internal,
            None => self.entries.push((exported, internal)),
        }
    }

    pub fn contains_internal(&self, internal: &str) -> bool {
        self.entries.iter().any(|(_, i)| i == internal)
    }

    /// Every exported name bound to `internal`
    pub fn aliases_of<'a>(&'a self, internal: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.entries
            .iter()
            .filter(move |(_, i)| i == internal)
            .map(|(e, _)| e.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(e, i)| (e.as_str(), i.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Find the first export call in `source`, or `None` when there is none.
/// Commented-out calls and calls spelled inside string literals are skipped.
pub fn find_export(source: &str) -> Option<ExportInfo> {
    let code = strip_comments(source);
    let caps = EXPORT_START.captures_iter(&code).find(|caps| {
        let Some(m) = caps.get(0) else {
            return false;
        };
        let line_start = code[..m.start()].rfind('\n').map_or(0, |i| i + 1);
        !in_string_literal(&code[line_start..], m.start() - line_start)
    })?;
    let api_name = caps[1].to_string();
    let start = caps.get(0)?.end();

    let remainder = code[start..].trim_start();
    let target = if remainder.starts_with('{') {
        let block = extract_balanced(remainder, 0, '{', '}');
        ExportTarget::Functions(parse_export_dict(block))
    } else {
        ExportTarget::Class(leading_identifier(argument_text(remainder)).to_string())
    };

    Some(ExportInfo { api_name, target })
}

/// Text of the argument up to the next top-level `,` or the call's `)`
fn argument_text(s: &str) -> &str {
    let comma = index_of_top_level(s, ',');
    let paren = s.find(')');
    let end = match (comma, paren) {
        (Some(c), Some(p)) => c.min(p),
        (Some(c), None) => c,
        (None, Some(p)) => p,
        (None, None) => s.len(),
    };
    s[..end].trim()
}

fn leading_identifier(s: &str) -> &str {
    let end = s
        .char_indices()
        .find(|(_, c)| !is_identifier_char(*c))
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    &s[..end]
}

fn parse_export_dict(block: &str) -> NameMapping {
    let mut mapping = NameMapping::new();
    let inside = strip_outer(block, '{', '}');

    for entry in split_top_level_commas(inside) {
        let Some(colon) = index_of_top_level(entry, ':') else {
            continue;
        };
        if colon == 0 {
            continue;
        }
        let key = strip_quotes(entry[..colon].trim());
        let value = entry[colon + 1..].trim();
        if key.is_empty() || value.is_empty() {
            continue;
        }
        mapping.insert(key, value);
    }

    mapping
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_export() {
        let export = find_export("polyglot.export_value(\"MyApi\", MyClass)").unwrap();
        assert_eq!(export.api_name, "MyApi");
        assert!(export.is_class_export());
        assert_eq!(export.target_class_name(), Some("MyClass"));
        assert!(export.name_mapping().is_none());
    }

    #[test]
    fn test_class_export_single_quotes_and_spacing() {
        let export = find_export("polyglot.export_value ( 'Api' ,  Impl  )\n").unwrap();
        assert_eq!(export.api_name, "Api");
        assert_eq!(export.target_class_name(), Some("Impl"));
    }

    #[test]
    fn test_class_export_with_trailing_argument() {
        let export = find_export("polyglot.export_value('Api', Impl, extra)").unwrap();
        assert_eq!(export.target_class_name(), Some("Impl"));
    }

    #[test]
    fn test_dict_export() {
        let source = r#"polyglot.export_value("Api", {"m1": f1, 'm2': f2})"#;
        let export = find_export(source).unwrap();
        assert!(!export.is_class_export());

        let mapping = export.name_mapping().unwrap();
        let entries: Vec<_> = mapping.iter().collect();
        assert_eq!(entries, vec![("m1", "f1"), ("m2", "f2")]);
    }

    #[test]
    fn test_dict_export_multiline_with_aliases() {
        let source = "polyglot.export_value(\"Api\", {\n    \"first\": shared,\n    \"second\": shared,\n    \"other\": other,\n})\n";
        let export = find_export(source).unwrap();
        let mapping = export.name_mapping().unwrap();

        assert_eq!(mapping.len(), 3);
        assert!(mapping.contains_internal("shared"));
        assert_eq!(mapping.aliases_of("shared").collect::<Vec<_>>(), vec!["first", "second"]);
        assert!(!mapping.contains_internal("missing"));
    }

    #[test]
    fn test_duplicate_exported_key_last_wins() {
        let mut mapping = NameMapping::new();
        mapping.insert("m", "a");
        mapping.insert("m", "b");
        assert_eq!(mapping.len(), 1);
        assert_eq!(mapping.aliases_of("b").collect::<Vec<_>>(), vec!["m"]);
    }

    #[test]
    fn test_first_export_wins() {
        let source = "polyglot.export_value('A', X)\npolyglot.export_value('B', Y)\n";
        assert_eq!(find_export(source).unwrap().api_name, "A");
    }

    #[test]
    fn test_dict_export_ignores_comments() {
        let source = "polyglot.export_value(\"Api\", {\n    # user's helpers\n    \"m1\": f1,  # first one\n    \"m2\": f2,\n})\n";
        let export = find_export(source).unwrap();

        let entries: Vec<_> = export.name_mapping().unwrap().iter().collect();
        assert_eq!(entries, vec![("m1", "f1"), ("m2", "f2")]);
    }

    #[test]
    fn test_commented_and_quoted_exports_skipped() {
        let source = "# polyglot.export_value('Old', Gone)\nlog = \"polyglot.export_value('Doc', Doc)\"\npolyglot.export_value('C', C)\n";
        let export = find_export(source).unwrap();
        assert_eq!(export.api_name, "C");
        assert_eq!(export.target_class_name(), Some("C"));
    }

    #[test]
    fn test_no_export() {
        assert!(find_export("class Foo:\n    pass").is_none());
        assert!(find_export("polyglot.export_value(Api, Foo)").is_none());
        assert!(find_export("# polyglot.export_value('Api', Foo)").is_none());
    }
}
