//! Renders contract models into host-language interface sources.
//!
//! Generators are pure functions of a [`ContractClass`]; they never feed
//! back into parsing.

pub mod java;
pub mod rust;
pub mod target;
pub mod typescript;

pub use java::JavaGenerator;
pub use rust::RustGenerator;
pub use target::{CodegenError, Target};
pub use typescript::TypeScriptGenerator;

use polyglot_contract::{ContractClass, ContractMethod, Type};

/// Plugin trait for rendering a contract in a target language
pub trait CodeGenerator {
    /// Generate code for a single type
    fn generate_type(&self, type_: &Type) -> String;

    /// Generate a single method declaration (no trailing newline)
    fn generate_method(&self, method: &ContractMethod) -> String;

    /// Generate a complete source file for the class
    fn generate_interface(&self, class: &ContractClass) -> String;

    /// Extension of generated files, including the dot
    fn file_extension(&self) -> &'static str;

    /// File name the interface for `class` is written to
    fn file_name(&self, class: &ContractClass) -> String {
        format!("{}{}", class.name, self.file_extension())
    }
}

/// Every type referenced by the class, outermost first, nested types included
pub(crate) fn referenced_types(class: &ContractClass) -> Vec<&Type> {
    fn walk<'a>(type_: &'a Type, out: &mut Vec<&'a Type>) {
        out.push(type_);
        match type_ {
            Type::List(inner) => walk(inner, out),
            Type::Map { key, value } => {
                walk(key, out);
                walk(value, out);
            }
            Type::Union(members) => members.iter().for_each(|m| walk(m, out)),
            _ => {}
        }
    }

    let mut out = Vec::new();
    for method in &class.methods {
        walk(&method.return_type, &mut out);
        for param in &method.params {
            walk(&param.type_, &mut out);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use polyglot_contract::ContractParam;

    #[test]
    fn test_referenced_types_walks_nested() {
        let class = ContractClass::new(
            "Api",
            vec![ContractMethod::new(
                "m",
                vec![ContractParam::new("a", Type::list(Type::INT))],
                Type::string_map(Type::BOOLEAN),
            )],
        );

        let types = referenced_types(&class);
        assert_eq!(types.len(), 5);
        assert!(types.contains(&&Type::INT));
        assert!(types.contains(&&Type::BOOLEAN));
        assert!(types.contains(&&Type::STRING));
    }

    #[test]
    fn test_default_file_name() {
        let class = ContractClass::new("StatsApi", vec![]);
        assert_eq!(JavaGenerator::new().file_name(&class), "StatsApi.java");
        assert_eq!(TypeScriptGenerator::new().file_name(&class), "StatsApi.ts");
        assert_eq!(RustGenerator::new().file_name(&class), "StatsApi.rs");
    }
}
