use anyhow::{anyhow, Result};
use clap::Args;
use polyglot_contract::{CodegenOptions, ScriptDescriptor, SupportedLanguage};
use polyglot_parser::{ContractGenerator, DefaultContractGenerator};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct InspectArgs {
    /// Script to inspect
    pub file: String,

    /// Only export methods marked with @adapter_include
    #[arg(long)]
    pub only_included_methods: bool,
}

pub fn inspect(args: InspectArgs, cwd: &str) -> Result<()> {
    let path = PathBuf::from(cwd).join(&args.file);
    let options = CodegenOptions {
        only_included_methods: args.only_included_methods,
    };
    println!("{}", inspect_file(&path, &options)?);
    Ok(())
}

/// Extracted contract model of `path` as pretty JSON
pub fn inspect_file(path: &Path, options: &CodegenOptions) -> Result<String> {
    let language = SupportedLanguage::from_path(path)
        .ok_or_else(|| anyhow!("Unrecognized script extension: {}", path.display()))?;
    let source = fs::read_to_string(path)
        .map_err(|e| anyhow!("Cannot read {}: {}", path.display(), e))?;

    let mut descriptor = ScriptDescriptor::new(language, source);
    if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
        descriptor = descriptor.with_file_name(name);
    }

    let model = DefaultContractGenerator::new().generate(&descriptor, options)?;
    Ok(serde_json::to_string_pretty(&model)?)
}
