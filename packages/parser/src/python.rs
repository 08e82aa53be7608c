use crate::export::find_export;
use crate::inference::resolve_return_type;
use crate::signature::parse_signature;
use crate::structure::{dedent, scan_methods};
use polyglot_contract::{
    CodegenOptions, ContractClass, ContractError, ContractMethod, ContractModel, ContractResult,
    LanguageParser, ScriptDescriptor, SupportedLanguage,
};
use tracing::debug;

/// Static contract extractor for Python scripts.
///
/// Reads the single `polyglot.export_value(...)` call and the class or
/// functions it publishes. The script is never executed.
#[derive(Debug, Clone, Copy, Default)]
pub struct PythonContractParser;

impl PythonContractParser {
    pub fn new() -> Self {
        Self
    }
}

impl LanguageParser for PythonContractParser {
    fn language(&self) -> SupportedLanguage {
        SupportedLanguage::Python
    }

    fn parse(
        &self,
        script: &ScriptDescriptor,
        options: &CodegenOptions,
    ) -> ContractResult<ContractModel> {
        let source = dedent(&script.source);

        let export = find_export(&source)
            .ok_or_else(|| ContractError::no_export(script.file_name.as_deref()))?;
        debug!(
            api = %export.api_name,
            class_export = export.is_class_export(),
            "resolved export"
        );

        let lines: Vec<&str> = source.lines().collect();
        let mut methods = Vec::new();

        for candidate in scan_methods(&lines, &export, options) {
            let signature = parse_signature(&lines, candidate.line);
            let return_type = resolve_return_type(&signature, &lines, candidate.indent);

            for name in candidate.exported_names {
                methods.push(ContractMethod::new(
                    name,
                    signature.params.clone(),
                    return_type.clone(),
                ));
            }
        }

        Ok(ContractModel::single(ContractClass::new(
            export.api_name,
            methods,
        )))
    }
}
