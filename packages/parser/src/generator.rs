use crate::javascript::JsContractParser;
use crate::python::PythonContractParser;
use polyglot_contract::{
    CodegenOptions, ContractError, ContractModel, ContractResult, LanguageParser,
    ScriptDescriptor,
};
use tracing::instrument;

/// Entry point turning one script into its contract model
pub trait ContractGenerator {
    fn generate(
        &self,
        script: &ScriptDescriptor,
        options: &CodegenOptions,
    ) -> ContractResult<ContractModel>;
}

/// Dispatches each script to the parser registered for its language
pub struct DefaultContractGenerator {
    parsers: Vec<Box<dyn LanguageParser + Send + Sync>>,
}

impl DefaultContractGenerator {
    pub fn new() -> Self {
        Self {
            parsers: vec![Box::new(PythonContractParser), Box::new(JsContractParser)],
        }
    }

    /// Generator with no parsers registered
    pub fn empty() -> Self {
        Self {
            parsers: Vec::new(),
        }
    }

    /// Register a parser, replacing any existing one for the same language
    pub fn with_parser(mut self, parser: impl LanguageParser + Send + Sync + 'static) -> Self {
        self.parsers.retain(|p| p.language() != parser.language());
        self.parsers.push(Box::new(parser));
        self
    }
}

impl Default for DefaultContractGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl ContractGenerator for DefaultContractGenerator {
    #[instrument(skip_all, fields(language = %script.language, file = ?script.file_name))]
    fn generate(
        &self,
        script: &ScriptDescriptor,
        options: &CodegenOptions,
    ) -> ContractResult<ContractModel> {
        let parser = self
            .parsers
            .iter()
            .find(|p| p.language() == script.language)
            .ok_or_else(|| {
                ContractError::unsupported_language(script.language, script.file_name.as_deref())
            })?;

        parser.parse(script, options)
    }
}
