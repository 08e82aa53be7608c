use crate::CodeGenerator;
use polyglot_contract::{ContractClass, ContractMethod, Primitive, Type};

/// TypeScript interface generator
#[derive(Debug, Clone, Default)]
pub struct TypeScriptGenerator;

impl TypeScriptGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Array element, parenthesised when it is a union
    fn generate_element(&self, type_: &Type) -> String {
        match type_ {
            Type::Union(members) if members.len() > 1 => format!("({})", self.generate_type(type_)),
            _ => self.generate_type(type_),
        }
    }
}

impl CodeGenerator for TypeScriptGenerator {
    fn generate_type(&self, type_: &Type) -> String {
        match type_ {
            Type::Unknown => "unknown".to_string(),
            Type::Primitive(p) => match p {
                Primitive::Int | Primitive::Float => "number",
                Primitive::String => "string",
                Primitive::Boolean => "boolean",
            }
            .to_string(),
            Type::List(inner) => format!("{}[]", self.generate_element(inner)),
            Type::Map { key, value } => format!(
                "Record<{}, {}>",
                self.generate_type(key),
                self.generate_type(value)
            ),
            Type::Union(members) if members.is_empty() => "unknown".to_string(),
            Type::Union(members) => {
                let type_strs: Vec<String> = members.iter().map(|t| self.generate_type(t)).collect();
                type_strs.join(" | ")
            }
            Type::Object(name) => name.clone(),
        }
    }

    fn generate_method(&self, method: &ContractMethod) -> String {
        let params: Vec<String> = method
            .params
            .iter()
            .map(|p| format!("{}: {}", p.name, self.generate_type(&p.type_)))
            .collect();

        format!(
            "{}({}): {};",
            method.name,
            params.join(", "),
            self.generate_type(&method.return_type)
        )
    }

    fn generate_interface(&self, class: &ContractClass) -> String {
        let mut lines = vec![format!("export interface {} {{", class.name)];

        for method in &class.methods {
            lines.push(format!("  {}", self.generate_method(method)));
        }

        lines.push("}".to_string());
        lines.join("\n") + "\n"
    }

    fn file_extension(&self) -> &'static str {
        ".ts"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polyglot_contract::ContractParam;

    #[test]
    fn test_generate_primitive_types() {
        let gen = TypeScriptGenerator::new();

        assert_eq!(gen.generate_type(&Type::INT), "number");
        assert_eq!(gen.generate_type(&Type::FLOAT), "number");
        assert_eq!(gen.generate_type(&Type::STRING), "string");
        assert_eq!(gen.generate_type(&Type::BOOLEAN), "boolean");
        assert_eq!(gen.generate_type(&Type::Unknown), "unknown");
    }

    #[test]
    fn test_generate_container_types() {
        let gen = TypeScriptGenerator::new();

        assert_eq!(gen.generate_type(&Type::list(Type::STRING)), "string[]");
        assert_eq!(
            gen.generate_type(&Type::string_map(Type::list(Type::INT))),
            "Record<string, number[]>"
        );
    }

    #[test]
    fn test_generate_union_and_object() {
        let gen = TypeScriptGenerator::new();

        let union = Type::Union(vec![Type::STRING, Type::INT]);
        assert_eq!(gen.generate_type(&union), "string | number");
        assert_eq!(gen.generate_type(&Type::list(union)), "(string | number)[]");
        assert_eq!(gen.generate_type(&Type::Object("Point".to_string())), "Point");
    }

    #[test]
    fn test_generate_interface() {
        let gen = TypeScriptGenerator::new();
        let class = ContractClass::new(
            "StatsApi",
            vec![ContractMethod::new(
                "randomNumbers",
                vec![ContractParam::new("n", Type::INT)],
                Type::list(Type::FLOAT),
            )],
        );

        assert_eq!(
            gen.generate_interface(&class),
            "export interface StatsApi {\n  randomNumbers(n: number): number[];\n}\n"
        );
    }
}
