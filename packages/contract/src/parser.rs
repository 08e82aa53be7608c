use crate::error::ContractResult;
use crate::language::{ScriptDescriptor, SupportedLanguage};
use crate::model::ContractModel;
use crate::options::CodegenOptions;

/// Language-specific contract extractor.
///
/// Implementations read script text statically and must never execute it.
pub trait LanguageParser {
    fn language(&self) -> SupportedLanguage;

    fn parse(
        &self,
        script: &ScriptDescriptor,
        options: &CodegenOptions,
    ) -> ContractResult<ContractModel>;
}
