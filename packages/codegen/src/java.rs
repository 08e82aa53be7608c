use crate::{referenced_types, CodeGenerator};
use polyglot_contract::{ContractClass, ContractMethod, Primitive, Type};
use std::collections::BTreeSet;

/// Java interface generator
///
/// Primitives render as their boxed types so they can sit inside
/// collections. Anything without a Java counterpart becomes `Object`.
#[derive(Debug, Clone, Default)]
pub struct JavaGenerator {
    package: Option<String>,
}

impl JavaGenerator {
    pub fn new() -> Self {
        Self { package: None }
    }

    pub fn with_package(package: impl Into<String>) -> Self {
        Self {
            package: Some(package.into()).filter(|p: &String| !p.trim().is_empty()),
        }
    }

    /// `java.util` imports needed by the class, sorted
    pub fn imports(&self, class: &ContractClass) -> BTreeSet<&'static str> {
        referenced_types(class)
            .into_iter()
            .filter_map(|type_| match type_ {
                Type::List(_) => Some("java.util.List"),
                Type::Map { .. } => Some("java.util.Map"),
                _ => None,
            })
            .collect()
    }
}

impl CodeGenerator for JavaGenerator {
    fn generate_type(&self, type_: &Type) -> String {
        match type_ {
            Type::Primitive(p) => match p {
                Primitive::Int => "Integer",
                Primitive::Float => "Double",
                Primitive::String => "String",
                Primitive::Boolean => "Boolean",
            }
            .to_string(),
            Type::List(inner) => format!("List<{}>", self.generate_type(inner)),
            Type::Map { key, value } => format!(
                "Map<{}, {}>",
                self.generate_type(key),
                self.generate_type(value)
            ),
            Type::Unknown | Type::Union(_) | Type::Object(_) => "Object".to_string(),
        }
    }

    fn generate_method(&self, method: &ContractMethod) -> String {
        let params: Vec<String> = method
            .params
            .iter()
            .map(|p| format!("{} {}", self.generate_type(&p.type_), p.name))
            .collect();

        format!(
            "{} {}({});",
            self.generate_type(&method.return_type),
            method.name,
            params.join(", ")
        )
    }

    fn generate_interface(&self, class: &ContractClass) -> String {
        let mut lines = Vec::new();

        if let Some(package) = &self.package {
            lines.push(format!("package {};", package));
            lines.push(String::new());
        }

        let imports = self.imports(class);
        if !imports.is_empty() {
            for import in &imports {
                lines.push(format!("import {};", import));
            }
            lines.push(String::new());
        }

        lines.push(format!("public interface {} {{", class.name));
        for (i, method) in class.methods.iter().enumerate() {
            if i > 0 {
                lines.push(String::new());
            }
            lines.push(format!("    {}", self.generate_method(method)));
        }
        lines.push("}".to_string());

        lines.join("\n") + "\n"
    }

    fn file_extension(&self) -> &'static str {
        ".java"
    }
}
