//! Line-oriented scan for the method definitions an export publishes.

use crate::export::{ExportInfo, ExportTarget, NameMapping};
use once_cell::sync::Lazy;
use polyglot_contract::CodegenOptions;
use regex::Regex;
use tracing::{debug, trace};

/// Decorator marking a method for inclusion when
/// `CodegenOptions::only_included_methods` is set
pub const INCLUDE_DECORATOR: &str = "@adapter_include";

static CLASS_DEF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*class\s+(\w+)\s*(?:\([^)]*\))?\s*:").unwrap());

static DEF_START: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(?:async\s+)?def\s+(\w+)\s*\(").unwrap());

/// A method definition that survived filtering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodCandidate {
    /// Index of the `def` line
    pub line: usize,
    pub indent: usize,
    /// Name as written in the script
    pub internal_name: String,
    /// Names the host sees; more than one when a function is exported under aliases
    pub exported_names: Vec<String>,
    /// Whether the inclusion decorator preceded the definition
    pub included: bool,
}

/// One-shot inclusion flag carried from a decorator line to the next `def`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DecoratorState {
    Idle,
    ArmedByDecorator,
}

impl DecoratorState {
    /// Any line that is neither a decorator nor a `def` disarms the flag
    fn after_line(self, trimmed: &str) -> Self {
        if trimmed == INCLUDE_DECORATOR {
            DecoratorState::ArmedByDecorator
        } else if trimmed.starts_with('@') {
            self
        } else {
            DecoratorState::Idle
        }
    }

    fn is_armed(self) -> bool {
        self == DecoratorState::ArmedByDecorator
    }
}

/// Indentation width; a tab counts as four columns
pub fn indent_level(line: &str) -> usize {
    line.chars()
        .map_while(|c| match c {
            ' ' => Some(1),
            '\t' => Some(4),
            _ => None,
        })
        .sum()
}

/// Lines that take part in block structure. Blank and comment-only lines
/// never open or close a block.
pub fn is_code_line(trimmed: &str) -> bool {
    !trimmed.is_empty() && !trimmed.starts_with('#')
}

/// Remove the indentation shared by every non-blank line
pub fn dedent(source: &str) -> String {
    let common = source
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start_matches([' ', '\t']).len())
        .min()
        .unwrap_or(0);

    source
        .lines()
        .map(|line| {
            if line.trim().is_empty() {
                ""
            } else {
                line[common..].trim_end()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Enumerate the methods `export` publishes, dropping private names and,
/// when requested, anything not marked with [`INCLUDE_DECORATOR`].
pub fn scan_methods(
    lines: &[&str],
    export: &ExportInfo,
    options: &CodegenOptions,
) -> Vec<MethodCandidate> {
    match &export.target {
        ExportTarget::Class(class_name) => scan_class_methods(lines, class_name, options),
        ExportTarget::Functions(mapping) => scan_exported_functions(lines, mapping, options),
    }
}

fn should_skip(name: &str, options: &CodegenOptions, included: bool) -> bool {
    name.starts_with('_') || (options.only_included_methods && !included)
}

fn scan_class_methods(
    lines: &[&str],
    class_name: &str,
    options: &CodegenOptions,
) -> Vec<MethodCandidate> {
    let mut methods = Vec::new();
    let mut class_indent: Option<usize> = None;
    let mut member_indent: Option<usize> = None;
    let mut decorator = DecoratorState::Idle;

    for (i, raw) in lines.iter().enumerate() {
        let trimmed = raw.trim();

        let Some(boundary) = class_indent else {
            if let Some(caps) = CLASS_DEF.captures(raw) {
                if &caps[1] == class_name {
                    class_indent = Some(indent_level(raw));
                    debug!(class = class_name, line = i, "found exported class");
                }
            }
            continue;
        };

        let indent = indent_level(raw);
        if is_code_line(trimmed) {
            if indent <= boundary {
                trace!(line = i, "class body ends");
                break;
            }
            member_indent.get_or_insert(indent);
        }

        let def_name = DEF_START
            .captures(raw)
            .filter(|_| Some(indent) == member_indent)
            .map(|caps| caps[1].to_string());

        let Some(name) = def_name else {
            decorator = decorator.after_line(trimmed);
            continue;
        };

        let included = decorator.is_armed();
        decorator = DecoratorState::Idle;

        if should_skip(&name, options, included) {
            debug!(method = %name, included, "skipping method");
            continue;
        }

        methods.push(MethodCandidate {
            line: i,
            indent,
            exported_names: vec![name.clone()],
            internal_name: name,
            included,
        });
    }

    if class_indent.is_none() {
        debug!(class = class_name, "exported class not found in source");
    }

    methods
}

fn scan_exported_functions(
    lines: &[&str],
    mapping: &NameMapping,
    options: &CodegenOptions,
) -> Vec<MethodCandidate> {
    let mut methods = Vec::new();
    let mut decorator = DecoratorState::Idle;

    for (i, raw) in lines.iter().enumerate() {
        let trimmed = raw.trim();
        let indent = indent_level(raw);

        let def_name = DEF_START
            .captures(raw)
            .filter(|_| indent == 0)
            .map(|caps| caps[1].to_string());

        let Some(name) = def_name else {
            decorator = decorator.after_line(trimmed);
            continue;
        };

        let included = decorator.is_armed();
        decorator = DecoratorState::Idle;

        if !mapping.contains_internal(&name) {
            continue;
        }
        if should_skip(&name, options, included) {
            debug!(function = %name, included, "skipping exported function");
            continue;
        }

        let exported_names: Vec<String> = mapping
            .aliases_of(&name)
            .filter(|alias| !alias.starts_with('_'))
            .map(str::to_string)
            .collect();
        if exported_names.is_empty() {
            continue;
        }

        methods.push(MethodCandidate {
            line: i,
            indent,
            internal_name: name,
            exported_names,
            included,
        });
    }

    methods
}
