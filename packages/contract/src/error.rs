use crate::language::SupportedLanguage;
use thiserror::Error;

pub type ContractResult<T> = Result<T, ContractError>;

/// The only failures that escape contract extraction. Everything else
/// degrades to `Type::Unknown` or to an omitted method.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContractError {
    #[error("No polyglot.export_value found{}", file_suffix(.file))]
    NoExport { file: Option<String> },

    #[error("Language '{language}' is not supported for contract generation{}", file_suffix(.file))]
    UnsupportedLanguage {
        language: SupportedLanguage,
        file: Option<String>,
    },
}

fn file_suffix(file: &Option<String>) -> String {
    file.as_ref()
        .map(|name| format!(" in {}", name))
        .unwrap_or_default()
}

impl ContractError {
    pub fn no_export(file: Option<&str>) -> Self {
        Self::NoExport {
            file: file.map(str::to_string),
        }
    }

    pub fn unsupported_language(language: SupportedLanguage, file: Option<&str>) -> Self {
        Self::UnsupportedLanguage {
            language,
            file: file.map(str::to_string),
        }
    }
}
