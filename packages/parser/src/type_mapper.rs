//! Maps Python type annotations onto the canonical [`Type`] model.
//!
//! Mapping is total: anything unrecognised, including malformed generic
//! syntax, maps to `Type::Unknown` instead of failing.

use crate::scanner::split_top_level_commas;
use polyglot_contract::Type;

/// Map an annotation such as `int`, `List[str]` or `Dict[str, List[int]]`
pub fn map_annotation(annotation: &str) -> Type {
    let annotation = annotation.trim();
    if annotation.is_empty() {
        return Type::Unknown;
    }
    parse_type(annotation)
}

fn parse_type(text: &str) -> Type {
    let text = text.trim();
    let text = text.strip_prefix("typing.").unwrap_or(text);

    match text {
        "int" => Type::INT,
        "float" => Type::FLOAT,
        "str" => Type::STRING,
        "bool" => Type::BOOLEAN,
        "list" | "set" | "tuple" | "List" | "Set" | "Tuple" => Type::list(Type::Unknown),
        "dict" | "Dict" => Type::string_map(Type::Unknown),
        "Any" => Type::Unknown,
        _ => parse_generic(text).unwrap_or(Type::Unknown),
    }
}

/// `Base[Args]` forms. Returns `None` for anything that is not a
/// well-formed generic with a recognised head.
fn parse_generic(text: &str) -> Option<Type> {
    let open = text.find('[')?;
    if open == 0 || !text.ends_with(']') || !brackets_balanced(text) {
        return None;
    }

    let head = text[..open].trim();
    let inner = &text[open + 1..text.len() - 1];
    let args: Vec<&str> = split_top_level_commas(inner)
        .into_iter()
        .map(str::trim)
        .filter(|arg| !arg.is_empty())
        .collect();

    match head.to_lowercase().as_str() {
        "list" | "set" => Some(Type::list(Type::unify_all(args.iter().map(|a| parse_type(a))))),
        "tuple" => {
            // `Tuple[int, ...]` is a variadic homogeneous tuple
            let elements = args.iter().filter(|a| **a != "...").map(|a| parse_type(a));
            Some(Type::list(Type::unify_all(elements)))
        }
        "dict" => match args.as_slice() {
            [key, value, ..] => Some(Type::map(parse_type(key), parse_type(value))),
            _ => Some(Type::string_map(Type::Unknown)),
        },
        _ => match head {
            "Optional" => Some(args.first().map(|a| parse_type(a)).unwrap_or(Type::Unknown)),
            "Union" => Some(Type::Unknown),
            _ => None,
        },
    }
}

fn brackets_balanced(text: &str) -> bool {
    let mut depth = 0i32;
    for c in text.chars() {
        match c {
            '[' => depth += 1,
            ']' => depth -= 1,
            _ => {}
        }
        if depth < 0 {
            return false;
        }
    }
    depth == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_basic_types() {
        assert_eq!(map_annotation("int"), Type::INT);
        assert_eq!(map_annotation("float"), Type::FLOAT);
        assert_eq!(map_annotation("str"), Type::STRING);
        assert_eq!(map_annotation("bool"), Type::BOOLEAN);
    }

    #[test]
    fn test_map_blank() {
        assert_eq!(map_annotation(""), Type::Unknown);
        assert_eq!(map_annotation("   "), Type::Unknown);
    }

    #[test]
    fn test_map_whitespace_insignificant() {
        assert_eq!(map_annotation(" int "), Type::INT);
        assert_eq!(map_annotation(" List[ int ] "), Type::list(Type::INT));
    }

    #[test]
    fn test_map_bare_containers() {
        assert_eq!(map_annotation("list"), Type::list(Type::Unknown));
        assert_eq!(map_annotation("set"), Type::list(Type::Unknown));
        assert_eq!(map_annotation("tuple"), Type::list(Type::Unknown));
        assert_eq!(map_annotation("dict"), Type::string_map(Type::Unknown));
        assert_eq!(map_annotation("List"), Type::list(Type::Unknown));
        assert_eq!(map_annotation("typing.Dict"), Type::string_map(Type::Unknown));
    }

    #[test]
    fn test_map_generic_list_and_set() {
        assert_eq!(map_annotation("List[int]"), Type::list(Type::INT));
        assert_eq!(map_annotation("list[str]"), Type::list(Type::STRING));
        assert_eq!(map_annotation("Set[float]"), Type::list(Type::FLOAT));
        assert_eq!(map_annotation("List[]"), Type::list(Type::Unknown));
    }

    #[test]
    fn test_map_tuple() {
        assert_eq!(map_annotation("Tuple[int, int]"), Type::list(Type::INT));
        assert_eq!(map_annotation("Tuple[int, str]"), Type::list(Type::Unknown));
        assert_eq!(map_annotation("tuple[str, ...]"), Type::list(Type::STRING));
    }

    #[test]
    fn test_map_dict() {
        assert_eq!(map_annotation("Dict[str, int]"), Type::string_map(Type::INT));
        assert_eq!(map_annotation("Dict[int, bool]"), Type::map(Type::INT, Type::BOOLEAN));
        assert_eq!(map_annotation("Dict[str]"), Type::string_map(Type::Unknown));
    }

    #[test]
    fn test_map_nested_generics() {
        assert_eq!(
            map_annotation("List[List[int]]"),
            Type::list(Type::list(Type::INT))
        );
        assert_eq!(
            map_annotation("Dict[str, List[Dict[str, float]]]"),
            Type::string_map(Type::list(Type::string_map(Type::FLOAT)))
        );
    }

    #[test]
    fn test_map_optional() {
        assert_eq!(map_annotation("Optional[str]"), Type::STRING);
        assert_eq!(map_annotation("Optional[List[int]]"), Type::list(Type::INT));
        assert_eq!(map_annotation("Optional[]"), Type::Unknown);
    }

    #[test]
    fn test_map_union_and_any() {
        assert_eq!(map_annotation("Union[int, str]"), Type::Unknown);
        assert_eq!(map_annotation("Any"), Type::Unknown);
        assert_eq!(map_annotation("typing.Any"), Type::Unknown);
    }

    #[test]
    fn test_map_typing_prefix() {
        assert_eq!(map_annotation("typing.List[int]"), Type::list(Type::INT));
    }

    #[test]
    fn test_map_unknown_identifiers() {
        assert_eq!(map_annotation("FooBar"), Type::Unknown);
        assert_eq!(map_annotation("np.ndarray"), Type::Unknown);
        assert_eq!(map_annotation("Callable[[int], str]"), Type::Unknown);
    }

    #[test]
    fn test_map_malformed_generics() {
        assert_eq!(map_annotation("List["), Type::Unknown);
        assert_eq!(map_annotation("List]"), Type::Unknown);
        assert_eq!(map_annotation("List[int]]"), Type::Unknown);
        assert_eq!(map_annotation("[int]"), Type::Unknown);
    }
}
