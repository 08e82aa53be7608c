use crate::{CodeGenerator, JavaGenerator, RustGenerator, TypeScriptGenerator};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodegenError {
    #[error("Unknown target '{0}' (expected one of: java, typescript, rust)")]
    UnknownTarget(String),
}

/// Host language a contract is rendered into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    #[default]
    Java,
    #[serde(alias = "ts")]
    TypeScript,
    Rust,
}

impl Target {
    pub const ALL: [Target; 3] = [Target::Java, Target::TypeScript, Target::Rust];

    pub fn id(&self) -> &'static str {
        match self {
            Target::Java => "java",
            Target::TypeScript => "typescript",
            Target::Rust => "rust",
        }
    }

    /// Build the generator for this target. `package` only affects Java.
    pub fn generator(&self, package: Option<&str>) -> Box<dyn CodeGenerator> {
        match self {
            Target::Java => Box::new(match package {
                Some(package) => JavaGenerator::with_package(package),
                None => JavaGenerator::new(),
            }),
            Target::TypeScript => Box::new(TypeScriptGenerator::new()),
            Target::Rust => Box::new(RustGenerator::new()),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Target {
    type Err = CodegenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "java" => Ok(Target::Java),
            "typescript" | "ts" => Ok(Target::TypeScript),
            "rust" | "rs" => Ok(Target::Rust),
            _ => Err(CodegenError::UnknownTarget(s.to_string())),
        }
    }
}
