//! # Polyglot Contract Model
//!
//! Language-agnostic description of the callable surface a guest script
//! exports: classes, methods, parameters and their canonical types.
//!
//! Parsers produce a [`ContractModel`]; renderers consume it to emit
//! statically-typed host interfaces. Nothing in here knows about Python
//! syntax or about any particular host language.
//!
//! ```rust
//! use polyglot_contract::{ContractClass, ContractMethod, ContractModel, Type};
//!
//! let model = ContractModel::single(ContractClass::new(
//!     "StatsApi",
//!     vec![ContractMethod::new("randomNumbers", vec![], Type::list(Type::INT))],
//! ));
//! assert_eq!(model.classes[0].methods[0].return_type.to_string(), "list[int]");
//! ```

pub mod error;
pub mod language;
pub mod model;
pub mod options;
pub mod parser;
pub mod types;

pub use error::{ContractError, ContractResult};
pub use language::{ScriptDescriptor, SupportedLanguage};
pub use model::{ContractClass, ContractMethod, ContractModel, ContractParam};
pub use options::CodegenOptions;
pub use parser::LanguageParser;
pub use types::{Primitive, Type};
