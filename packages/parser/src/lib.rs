//! # Polyglot Contract Parser
//!
//! Static, non-executing extraction of the callable surface a guest script
//! exports through `polyglot.export_value(...)`.
//!
//! ## Pipeline
//!
//! - **Export resolution**: find the export call and whether it binds a
//!   class or a name → function mapping
//! - **Structural scan**: indentation-tracked walk for method definitions,
//!   honouring the `@adapter_include` marker
//! - **Signature parsing**: multi-line header reassembly and parameter
//!   splitting
//! - **Return-type inference**: annotation first, otherwise the first
//!   `return` expression is typed from literals and container displays
//!
//! Missing or odd constructs degrade to `Type::Unknown`; only a missing
//! export or an unsupported language is an error.
//!
//! ## Example
//!
//! ```rust
//! use polyglot_contract::{CodegenOptions, Type};
//! use polyglot_parser::parse;
//!
//! let source = r#"
//! class StatsApi:
//!     def random_numbers(self, n: int = 10):
//!         return [1, 2, 3]
//!
//! polyglot.export_value("StatsApi", StatsApi)
//! "#;
//!
//! let model = parse(source, &CodegenOptions::default()).unwrap();
//! let method = &model.classes[0].methods[0];
//! assert_eq!(method.name, "random_numbers");
//! assert_eq!(method.return_type, Type::list(Type::INT));
//! ```

pub mod export;
pub mod generator;
pub mod inference;
pub mod javascript;
pub mod python;
pub mod scanner;
pub mod signature;
pub mod structure;
pub mod type_mapper;

pub use export::{find_export, ExportInfo, ExportTarget, NameMapping};
pub use generator::{ContractGenerator, DefaultContractGenerator};
pub use javascript::JsContractParser;
pub use python::PythonContractParser;
pub use structure::INCLUDE_DECORATOR;
pub use type_mapper::map_annotation;

use polyglot_contract::{
    CodegenOptions, ContractModel, ContractResult, LanguageParser, ScriptDescriptor,
};

/// Extract the contract of a Python script
pub fn parse(source: &str, options: &CodegenOptions) -> ContractResult<ContractModel> {
    PythonContractParser.parse(&ScriptDescriptor::python(source), options)
}
