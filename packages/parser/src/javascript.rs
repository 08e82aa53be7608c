use polyglot_contract::{
    CodegenOptions, ContractError, ContractModel, ContractResult, LanguageParser,
    ScriptDescriptor, SupportedLanguage,
};

/// Placeholder for JavaScript sources. Contract extraction is not
/// implemented, so every parse fails with an explicit unsupported error
/// rather than returning an empty contract.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsContractParser;

impl LanguageParser for JsContractParser {
    fn language(&self) -> SupportedLanguage {
        SupportedLanguage::Js
    }

    fn parse(
        &self,
        script: &ScriptDescriptor,
        _options: &CodegenOptions,
    ) -> ContractResult<ContractModel> {
        Err(ContractError::unsupported_language(
            SupportedLanguage::Js,
            script.file_name.as_deref(),
        ))
    }
}
