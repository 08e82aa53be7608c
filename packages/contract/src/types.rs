use serde::{Deserialize, Serialize};
use std::fmt;

/// Scalar types recognised by the contract model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Primitive {
    Int,
    Float,
    String,
    Boolean,
}

/// Host-language-agnostic type of a parameter or return value
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "of", rename_all = "snake_case")]
pub enum Type {
    /// Type could not be decided
    Unknown,

    Primitive(Primitive),

    /// Homogeneous sequence (lists, sets and tuples all land here)
    List(Box<Type>),

    Map { key: Box<Type>, value: Box<Type> },

    /// Reserved: never produced by inference
    Union(Vec<Type>),

    /// Reserved: named object reference, never produced by inference
    Object(String),
}

impl Type {
    pub const INT: Type = Type::Primitive(Primitive::Int);
    pub const FLOAT: Type = Type::Primitive(Primitive::Float);
    pub const STRING: Type = Type::Primitive(Primitive::String);
    pub const BOOLEAN: Type = Type::Primitive(Primitive::Boolean);

    pub fn list(element: Type) -> Type {
        Type::List(Box::new(element))
    }

    pub fn map(key: Type, value: Type) -> Type {
        Type::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    /// Map keyed by strings, the shape assumed for every dict literal
    pub fn string_map(value: Type) -> Type {
        Type::map(Type::STRING, value)
    }

    /// Unify two types into the most specific type covering both.
    ///
    /// Identical primitives unify to themselves, lists and maps unify
    /// element-wise, and every other pairing collapses to `Unknown`.
    pub fn unify(t1: &Type, t2: &Type) -> Type {
        match (t1, t2) {
            (Type::Primitive(p1), Type::Primitive(p2)) if p1 == p2 => Type::Primitive(*p1),
            (Type::List(e1), Type::List(e2)) => Type::list(Type::unify(e1, e2)),
            (
                Type::Map { key: k1, value: v1 },
                Type::Map { key: k2, value: v2 },
            ) => Type::map(Type::unify(k1, k2), Type::unify(v1, v2)),
            _ => Type::Unknown,
        }
    }

    /// Fold a sequence of candidate types left to right.
    /// An empty sequence yields `Unknown`.
    pub fn unify_all<I>(types: I) -> Type
    where
        I: IntoIterator<Item = Type>,
    {
        types
            .into_iter()
            .reduce(|acc, t| Type::unify(&acc, &t))
            .unwrap_or(Type::Unknown)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Type::Unknown)
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, Type::Primitive(_))
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Primitive::Int => "int",
            Primitive::Float => "float",
            Primitive::String => "str",
            Primitive::Boolean => "bool",
        };
        f.write_str(name)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Unknown => f.write_str("unknown"),
            Type::Primitive(p) => write!(f, "{}", p),
            Type::List(element) => write!(f, "list[{}]", element),
            Type::Map { key, value } => write!(f, "dict[{}, {}]", key, value),
            Type::Union(types) => {
                let parts: Vec<String> = types.iter().map(|t| t.to_string()).collect();
                write!(f, "union[{}]", parts.join(", "))
            }
            Type::Object(name) => f.write_str(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples() -> Vec<Type> {
        vec![
            Type::Unknown,
            Type::INT,
            Type::FLOAT,
            Type::STRING,
            Type::BOOLEAN,
            Type::list(Type::INT),
            Type::list(Type::STRING),
            Type::list(Type::Unknown),
            Type::string_map(Type::INT),
            Type::string_map(Type::BOOLEAN),
            Type::map(Type::INT, Type::list(Type::FLOAT)),
            Type::Union(vec![Type::INT, Type::STRING]),
            Type::Object("Point".to_string()),
        ]
    }

    #[test]
    fn test_unify_same_primitive() {
        assert_eq!(Type::unify(&Type::STRING, &Type::STRING), Type::STRING);
        assert_eq!(Type::unify(&Type::INT, &Type::INT), Type::INT);
    }

    #[test]
    fn test_unify_different_primitives_is_unknown() {
        assert_eq!(Type::unify(&Type::INT, &Type::FLOAT), Type::Unknown);
        assert_eq!(Type::unify(&Type::STRING, &Type::BOOLEAN), Type::Unknown);
    }

    #[test]
    fn test_unify_unknown_does_not_absorb() {
        assert_eq!(Type::unify(&Type::Unknown, &Type::INT), Type::Unknown);
        assert_eq!(Type::unify(&Type::Unknown, &Type::Unknown), Type::Unknown);
    }

    #[test]
    fn test_unify_lists_element_wise() {
        let a = Type::list(Type::INT);
        let b = Type::list(Type::INT);
        assert_eq!(Type::unify(&a, &b), Type::list(Type::INT));

        let c = Type::list(Type::STRING);
        assert_eq!(Type::unify(&a, &c), Type::list(Type::Unknown));
    }

    #[test]
    fn test_unify_maps_key_and_value() {
        let a = Type::string_map(Type::INT);
        let b = Type::string_map(Type::FLOAT);
        assert_eq!(Type::unify(&a, &b), Type::string_map(Type::Unknown));

        let c = Type::map(Type::INT, Type::INT);
        assert_eq!(Type::unify(&a, &c), Type::map(Type::Unknown, Type::INT));
    }

    #[test]
    fn test_unify_list_with_map_is_unknown() {
        let list = Type::list(Type::INT);
        let map = Type::string_map(Type::INT);
        assert_eq!(Type::unify(&list, &map), Type::Unknown);
    }

    #[test]
    fn test_unify_reserved_variants_collapse() {
        let union = Type::Union(vec![Type::INT]);
        assert_eq!(Type::unify(&union, &union), Type::Unknown);

        let object = Type::Object("Point".to_string());
        assert_eq!(Type::unify(&object, &object), Type::Unknown);
    }

    #[test]
    fn test_unify_is_symmetric() {
        let samples = samples();
        for a in &samples {
            for b in &samples {
                assert_eq!(Type::unify(a, b), Type::unify(b, a), "{} vs {}", a, b);
            }
        }
    }

    #[test]
    fn test_unify_all_homogeneous_is_order_independent() {
        let forward = Type::unify_all(vec![
            Type::list(Type::INT),
            Type::list(Type::INT),
            Type::list(Type::INT),
        ]);
        assert_eq!(forward, Type::list(Type::INT));
    }

    #[test]
    fn test_unify_all_collapses_on_mismatch() {
        let unified = Type::unify_all(vec![Type::INT, Type::INT, Type::STRING, Type::INT]);
        assert_eq!(unified, Type::Unknown);
    }

    #[test]
    fn test_unify_all_empty_is_unknown() {
        assert_eq!(Type::unify_all(Vec::new()), Type::Unknown);
    }

    #[test]
    fn test_display() {
        let t = Type::string_map(Type::list(Type::INT));
        assert_eq!(t.to_string(), "dict[str, list[int]]");
    }

    #[test]
    fn test_serde_variant_tags_round_trip() {
        for t in samples() {
            let json = serde_json::to_string(&t).unwrap();
            let back: Type = serde_json::from_str(&json).unwrap();
            assert_eq!(back, t);
        }

        let json = serde_json::to_value(Type::list(Type::INT)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "kind": "list", "of": { "kind": "primitive", "of": "int" } })
        );

        let json = serde_json::to_value(Type::Unknown).unwrap();
        assert_eq!(json, serde_json::json!({ "kind": "unknown" }));
    }
}
