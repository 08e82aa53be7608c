use crate::CodeGenerator;
use polyglot_contract::{ContractClass, ContractMethod, Primitive, Type};

/// Keywords that need the `r#` prefix to be used as identifiers
const RESERVED: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "const", "crate", "do", "dyn", "enum",
    "extern", "final", "fn", "gen", "impl", "let", "loop", "macro", "match", "mod", "move",
    "mut", "override", "priv", "pub", "ref", "static", "struct", "trait", "type", "typeof",
    "unsafe", "unsized", "use", "virtual", "where", "yield",
];

/// Rust trait generator. Dynamic types fall back to `serde_json::Value`.
#[derive(Debug, Clone, Default)]
pub struct RustGenerator;

impl RustGenerator {
    pub fn new() -> Self {
        Self
    }

    fn identifier(name: &str) -> String {
        if RESERVED.contains(&name) {
            format!("r#{}", name)
        } else {
            name.to_string()
        }
    }
}

impl CodeGenerator for RustGenerator {
    fn generate_type(&self, type_: &Type) -> String {
        match type_ {
            Type::Primitive(p) => match p {
                Primitive::Int => "i64",
                Primitive::Float => "f64",
                Primitive::String => "String",
                Primitive::Boolean => "bool",
            }
            .to_string(),
            Type::List(inner) => format!("Vec<{}>", self.generate_type(inner)),
            Type::Map { key, value } => format!(
                "std::collections::HashMap<{}, {}>",
                self.generate_type(key),
                self.generate_type(value)
            ),
            // No union types in Rust
            Type::Unknown | Type::Union(_) => "serde_json::Value".to_string(),
            Type::Object(name) => name.clone(),
        }
    }

    fn generate_method(&self, method: &ContractMethod) -> String {
        let mut params = vec!["&self".to_string()];
        params.extend(method.params.iter().map(|p| {
            format!("{}: {}", Self::identifier(&p.name), self.generate_type(&p.type_))
        }));

        format!(
            "fn {}({}) -> {};",
            Self::identifier(&method.name),
            params.join(", "),
            self.generate_type(&method.return_type)
        )
    }

    fn generate_interface(&self, class: &ContractClass) -> String {
        let mut lines = vec![format!("pub trait {} {{", class.name)];

        for method in &class.methods {
            lines.push(format!("    {}", self.generate_method(method)));
        }

        lines.push("}".to_string());
        lines.join("\n") + "\n"
    }

    fn file_extension(&self) -> &'static str {
        ".rs"
    }
}
