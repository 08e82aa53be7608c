//! Reassembles a `def` header that may span several physical lines.

use crate::scanner::{
    find_top_level_str, index_of_top_level, split_top_level_commas, strip_comment,
};
use crate::type_mapper::map_annotation;
use once_cell::sync::Lazy;
use polyglot_contract::{ContractParam, Type};
use regex::Regex;

static PARAM_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\w+$").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSignature {
    pub params: Vec<ContractParam>,
    /// Raw text between `->` and the closing colon
    pub return_annotation: Option<String>,
    /// Code following the colon on the header's last line (`def f(): return 1`)
    pub inline_body: Option<String>,
    /// Index of the line holding the header's closing colon
    pub end_line: usize,
}

impl MethodSignature {
    fn empty(end_line: usize) -> Self {
        Self {
            params: Vec::new(),
            return_annotation: None,
            inline_body: None,
            end_line,
        }
    }
}

/// Parse the signature whose `def` keyword is on line `start`
pub fn parse_signature(lines: &[&str], start: usize) -> MethodSignature {
    let mut header = String::new();
    let mut end_line = start;
    let mut colon = None;

    for (idx, raw) in lines.iter().enumerate().skip(start) {
        let piece = strip_comment(raw).trim();
        if !piece.is_empty() {
            if !header.is_empty() {
                header.push(' ');
            }
            header.push_str(piece);
        }
        end_line = idx;

        colon = index_of_top_level(&header, ':');
        if colon.is_some() {
            break;
        }
    }

    let (head, inline_body) = match colon {
        Some(c) => {
            let rest = header[c + 1..].trim();
            (&header[..c], (!rest.is_empty()).then(|| rest.to_string()))
        }
        None => (header.as_str(), None),
    };

    let Some(open) = head.find('(') else {
        return MethodSignature::empty(end_line);
    };
    let arrow = find_top_level_str(head, "->");
    let Some(close) = head[..arrow.unwrap_or(head.len())].rfind(')') else {
        return MethodSignature::empty(end_line);
    };
    if close <= open {
        return MethodSignature::empty(end_line);
    }

    let return_annotation = arrow
        .map(|a| head[a + 2..].trim())
        .filter(|annotation| !annotation.is_empty())
        .map(str::to_string);

    MethodSignature {
        params: parse_params(&head[open + 1..close]),
        return_annotation,
        inline_body,
        end_line,
    }
}

/// Parse `name[: type][= default]` entries, dropping `self` and anything
/// that is not a plain named parameter (`*args`, `**kwargs`, `/`, `*`).
/// Defaults never contribute to the parameter type.
pub fn parse_params(raw: &str) -> Vec<ContractParam> {
    split_top_level_commas(raw)
        .into_iter()
        .filter_map(|part| {
            let part = part.trim();
            let declaration = match index_of_top_level(part, '=') {
                Some(eq) => &part[..eq],
                None => part,
            };
            let (name, annotation) = match index_of_top_level(declaration, ':') {
                Some(colon) => (declaration[..colon].trim(), Some(&declaration[colon + 1..])),
                None => (declaration.trim(), None),
            };

            if name == "self" || !PARAM_NAME.is_match(name) {
                return None;
            }

            let type_ = annotation.map(map_annotation).unwrap_or(Type::Unknown);
            Some(ContractParam::new(name, type_))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signature(source: &str) -> MethodSignature {
        let lines: Vec<&str> = source.lines().collect();
        parse_signature(&lines, 0)
    }

    #[test]
    fn test_simple_signature() {
        let sig = signature("def foo(self, a: int, b):");
        assert_eq!(
            sig.params,
            vec![
                ContractParam::new("a", Type::INT),
                ContractParam::new("b", Type::Unknown),
            ]
        );
        assert_eq!(sig.return_annotation, None);
        assert_eq!(sig.inline_body, None);
        assert_eq!(sig.end_line, 0);
    }

    #[test]
    fn test_default_does_not_infer_type() {
        let sig = signature("def m(self, b: str = \"default\", c = 1):");
        assert_eq!(sig.params[0], ContractParam::new("b", Type::STRING));
        assert_eq!(sig.params[1], ContractParam::new("c", Type::Unknown));
    }

    #[test]
    fn test_return_annotation() {
        let sig = signature("def m(self) -> Dict[str, List[int]]:");
        assert_eq!(sig.return_annotation.as_deref(), Some("Dict[str, List[int]]"));
        assert!(sig.params.is_empty());
    }

    #[test]
    fn test_multiline_signature_with_comments() {
        let source = "def run(self,  # receiver\n        rows: List[Dict[str, int]],\n        flag: bool = True,  # toggles\n        ) -> int:  # done\n    return 1\n";
        let sig = signature(source);
        assert_eq!(sig.end_line, 3);
        assert_eq!(
            sig.params,
            vec![
                ContractParam::new("rows", Type::list(Type::string_map(Type::INT))),
                ContractParam::new("flag", Type::BOOLEAN),
            ]
        );
        assert_eq!(sig.return_annotation.as_deref(), Some("int"));
    }

    #[test]
    fn test_inline_body() {
        let sig = signature("def f1(): return 'x'");
        assert!(sig.params.is_empty());
        assert_eq!(sig.inline_body.as_deref(), Some("return 'x'"));
    }

    #[test]
    fn test_defaults_with_nested_syntax() {
        let sig = signature("def f(self, key=lambda x: x, sep='->', items: list = [1, 2]):");
        let names: Vec<_> = sig.params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["key", "sep", "items"]);
        assert_eq!(sig.params[2].type_, Type::list(Type::Unknown));
        assert_eq!(sig.return_annotation, None);
    }

    #[test]
    fn test_star_params_dropped() {
        let sig = signature("def f(self, a, *args, b: int = 2, **kwargs):");
        let names: Vec<_> = sig.params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_annotated_self_dropped() {
        let sig = signature("def f(self: 'C', x: float):");
        assert_eq!(sig.params, vec![ContractParam::new("x", Type::FLOAT)]);
    }

    #[test]
    fn test_unterminated_header() {
        let sig = signature("def broken(self, a");
        assert!(sig.params.is_empty());
        assert_eq!(sig.end_line, 0);
    }
}
