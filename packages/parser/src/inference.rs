//! Return-type resolution for a single method.
//!
//! An explicit `->` annotation always wins. Otherwise the body is scanned
//! for the first `return` and its expression is typed from literals,
//! container displays, comprehensions and the built-in container
//! constructors. Only the first `return` is considered; sibling branches
//! returning other types are not unified.

use crate::scanner::{
    balance_delta, extract_balanced, find_keyword, find_top_level_str, index_of_top_level,
    matching_close, split_top_level_commas, strip_comment, strip_outer,
};
use crate::signature::MethodSignature;
use crate::structure::{indent_level, is_code_line};
use crate::type_mapper::map_annotation;
use once_cell::sync::Lazy;
use polyglot_contract::Type;
use regex::Regex;
use tracing::trace;

static INT_LITERAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?\d[\d_]*$").unwrap());
static FLOAT_LITERAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?\d[\d_]*\.\d[\d_]*$").unwrap());

const DOCSTRING_DELIMITERS: [&str; 2] = ["\"\"\"", "'''"];

/// Prefix letters allowed before a string literal's opening quote
const STRING_PREFIXES: [char; 6] = ['r', 'R', 'f', 'F', 'u', 'U'];

/// Resolve the return type of the method whose header is `signature`
pub fn resolve_return_type(
    signature: &MethodSignature,
    lines: &[&str],
    method_indent: usize,
) -> Type {
    if let Some(annotation) = signature
        .return_annotation
        .as_deref()
        .filter(|a| !a.trim().is_empty())
    {
        trace!(annotation, "return type from annotation");
        return map_annotation(annotation);
    }

    if let Some(inline) = signature.inline_body.as_deref() {
        if let Some(expr) = return_expression(inline) {
            return infer_wrapped(expr, lines, signature.end_line + 1, method_indent);
        }
    }

    infer_return_type(lines, signature.end_line + 1, method_indent)
}

/// Scan the body starting at line `start` for the first `return`
pub fn infer_return_type(lines: &[&str], start: usize, method_indent: usize) -> Type {
    let mut docstring: Option<&str> = None;

    for (i, raw) in lines.iter().enumerate().skip(start) {
        let trimmed = raw.trim();

        if let Some(delimiter) = docstring {
            if trimmed.contains(delimiter) {
                docstring = None;
            }
            continue;
        }

        if !is_code_line(trimmed) {
            continue;
        }
        if indent_level(raw) <= method_indent {
            break;
        }

        if let Some(delimiter) = docstring_delimiter(trimmed) {
            if trimmed.matches(delimiter).count() == 1 {
                docstring = Some(delimiter);
            }
            continue;
        }

        if let Some(expr) = return_expression(trimmed) {
            trace!(line = i, expr, "return site");
            return infer_wrapped(expr, lines, i + 1, method_indent);
        }
    }

    Type::Unknown
}

/// Delimiter of a (possibly `r`/`u`/`f` prefixed) triple-quoted string
/// starting `trimmed`
fn docstring_delimiter(trimmed: &str) -> Option<&'static str> {
    let unprefixed = strip_string_prefix(trimmed)?;
    DOCSTRING_DELIMITERS
        .iter()
        .copied()
        .find(|d| unprefixed.starts_with(*d))
}

/// `v` without its string prefix, `None` when the prefix is too long to be one
fn strip_string_prefix(v: &str) -> Option<&str> {
    let body = v.trim_start_matches(STRING_PREFIXES);
    (v.len() - body.len() <= 2).then_some(body)
}

/// Text following a `return` keyword on `line`, `Some("")` for a bare return
fn return_expression(line: &str) -> Option<&str> {
    let code = strip_comment(line);
    let pos = find_keyword(code, "return")?;
    Some(code[pos + "return".len()..].trim())
}

fn infer_wrapped(expr: &str, lines: &[&str], next: usize, method_indent: usize) -> Type {
    if expr.is_empty() {
        return Type::Unknown;
    }
    let expr = collect_wrapped_expression(expr, lines, next, method_indent);
    infer_expr_type(&expr)
}

/// Join continuation lines while an opening bracket at the start of `expr`
/// stays unbalanced, without leaving the method body
fn collect_wrapped_expression(
    expr: &str,
    lines: &[&str],
    next: usize,
    method_indent: usize,
) -> String {
    let mut text = expr.to_string();
    let Some(open) = expr.chars().next().filter(|c| matches!(c, '[' | '{' | '(')) else {
        return text;
    };

    let mut balance = balance_delta(expr, open);
    for raw in lines.iter().skip(next) {
        if balance <= 0 {
            break;
        }
        let trimmed = raw.trim();
        if is_code_line(trimmed) && indent_level(raw) <= method_indent {
            break;
        }
        let piece = strip_comment(trimmed).trim();
        if piece.is_empty() {
            continue;
        }
        text.push(' ');
        text.push_str(piece);
        balance += balance_delta(piece, open);
    }
    text
}

/// Infer the canonical type of a single Python expression
pub fn infer_expr_type(expr: &str) -> Type {
    let e = expr.trim();

    if e.starts_with('[') {
        return infer_list(e);
    }
    if e.starts_with('{') {
        return infer_braces(e);
    }
    for wrapper in ["list", "set", "tuple"] {
        if let Some(arg) = call_argument(e, wrapper) {
            if arg.is_empty() {
                return Type::list(Type::Unknown);
            }
            return infer_expr_type(arg);
        }
    }
    if let Some(arg) = call_argument(e, "dict") {
        return infer_dict_call(arg);
    }

    detect_literal_type(e)
}

fn encloses(e: &str) -> bool {
    matching_close(e) == Some(e.len() - 1)
}

/// Body of a comprehension, the text before its top-level ` for `
fn comprehension_body(inside: &str) -> Option<&str> {
    let for_idx = find_top_level_str(inside, " for ")?;
    find_top_level_str(&inside[for_idx..], " in ")?;
    Some(inside[..for_idx].trim())
}

fn infer_list(e: &str) -> Type {
    if !encloses(e) {
        return Type::Unknown;
    }
    let inside = strip_outer(e, '[', ']');
    if inside.is_empty() {
        return Type::list(Type::Unknown);
    }
    if let Some(body) = comprehension_body(inside) {
        return Type::list(infer_expr_type(body));
    }
    Type::list(unify_expressions(split_top_level_commas(inside)))
}

/// `{...}`: dict display, set display, or one of their comprehensions
fn infer_braces(e: &str) -> Type {
    if !encloses(e) {
        return Type::Unknown;
    }
    let inside = strip_outer(e, '{', '}');
    if inside.is_empty() {
        return Type::string_map(Type::Unknown);
    }

    if let Some(body) = comprehension_body(inside) {
        return match index_of_top_level(body, ':') {
            Some(colon) => Type::string_map(infer_expr_type(&body[colon + 1..])),
            None => Type::list(infer_expr_type(body)),
        };
    }

    if index_of_top_level(inside, ':').is_some() {
        return infer_dict_values(inside);
    }
    Type::list(unify_expressions(split_top_level_commas(inside)))
}

/// String-keyed map over the unified types of each `key: value` entry
fn infer_dict_values(inside: &str) -> Type {
    let values = split_top_level_commas(inside)
        .into_iter()
        .filter_map(|entry| index_of_top_level(entry, ':').map(|colon| &entry[colon + 1..]))
        .map(infer_expr_type);
    Type::string_map(Type::unify_all(values))
}

/// `dict({...})`, `dict(a=1, b=2)` or `dict()`
fn infer_dict_call(args: &str) -> Type {
    if args.is_empty() {
        return Type::string_map(Type::Unknown);
    }
    if args.starts_with('{') {
        return infer_braces(args);
    }
    let values = split_top_level_commas(args)
        .into_iter()
        .filter_map(|entry| {
            let eq = index_of_top_level(entry, '=')?;
            (!entry[eq + 1..].starts_with('=')).then(|| &entry[eq + 1..])
        })
        .map(infer_expr_type);
    Type::string_map(Type::unify_all(values))
}

/// The argument text of `name(...)` when the call spans all of `e`
fn call_argument<'a>(e: &'a str, name: &str) -> Option<&'a str> {
    let rest = e.strip_prefix(name)?;
    if !rest.starts_with('(') {
        return None;
    }
    let block = extract_balanced(e, name.len(), '(', ')');
    if name.len() + block.len() != e.len() || !block.ends_with(')') {
        return None;
    }
    Some(strip_outer(block, '(', ')'))
}

fn unify_expressions(expressions: Vec<&str>) -> Type {
    Type::unify_all(expressions.into_iter().map(infer_expr_type))
}

/// Type of a literal token, `Unknown` for anything else
pub fn detect_literal_type(value: &str) -> Type {
    let v = value.trim();
    if INT_LITERAL.is_match(v) {
        return Type::INT;
    }
    if FLOAT_LITERAL.is_match(v) {
        return Type::FLOAT;
    }
    if is_string_literal(v) {
        return Type::STRING;
    }
    if v == "True" || v == "False" {
        return Type::BOOLEAN;
    }
    Type::Unknown
}

fn is_string_literal(v: &str) -> bool {
    let Some(body) = strip_string_prefix(v) else {
        return false;
    };
    body.len() >= 2
        && ((body.starts_with('"') && body.ends_with('"'))
            || (body.starts_with('\'') && body.ends_with('\'')))
}
