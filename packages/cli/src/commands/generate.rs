use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use polyglot_codegen::{CodeGenerator, Target};
use polyglot_contract::{CodegenOptions, ScriptDescriptor, SupportedLanguage};
use polyglot_parser::{ContractGenerator, DefaultContractGenerator};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Directory of scripts (defaults to srcDir from config)
    pub path: Option<String>,

    /// Target language (java, typescript, rust)
    #[arg(short, long)]
    pub target: Option<Target>,

    /// Output directory (overrides config)
    #[arg(short, long)]
    pub out_dir: Option<String>,

    /// Java package for generated interfaces (overrides config)
    #[arg(short, long)]
    pub package: Option<String>,

    /// Only export methods marked with @adapter_include
    #[arg(long)]
    pub only_included_methods: bool,

    /// Output to stdout instead of files
    #[arg(long)]
    pub stdout: bool,
}

/// Counts for one generate run
#[derive(Debug, Default, PartialEq, Eq)]
pub struct GenerateSummary {
    pub succeeded: usize,
    pub failed: usize,
}

/// Effective settings after merging CLI flags over the config file
struct Settings {
    src_dir: PathBuf,
    out_dir: PathBuf,
    target: Target,
    package: Option<String>,
    options: CodegenOptions,
    stdout: bool,
}

impl Settings {
    fn resolve(args: GenerateArgs, config: Config, cwd: &str) -> Self {
        let src_dir = match &args.path {
            Some(path) => PathBuf::from(cwd).join(path),
            None => config.get_src_dir(cwd),
        };
        let out_dir = match &args.out_dir {
            Some(out) => PathBuf::from(cwd).join(out),
            None => config.get_out_dir(cwd),
        };

        Self {
            src_dir,
            out_dir,
            target: args.target.unwrap_or(config.target),
            package: args.package.or(config.base_package),
            options: CodegenOptions {
                only_included_methods: args.only_included_methods
                    || config.only_included_methods,
            },
            stdout: args.stdout,
        }
    }
}

pub fn generate(args: GenerateArgs, cwd: &str) -> Result<()> {
    let summary = run(args, cwd)?;
    if summary.failed > 0 {
        return Err(anyhow!("{} script(s) failed", summary.failed));
    }
    Ok(())
}

/// Generate interfaces for every script, reporting per-file failures
/// without stopping the batch
pub fn run(args: GenerateArgs, cwd: &str) -> Result<GenerateSummary> {
    let config = Config::load(cwd)?;
    let settings = Settings::resolve(args, config, cwd);

    if !settings.src_dir.is_dir() {
        return Err(anyhow!(
            "Source directory does not exist: {}",
            settings.src_dir.display()
        ));
    }

    if !settings.stdout {
        println!(
            "{}",
            format!("🔨 Generating {} interfaces...", settings.target)
                .bright_blue()
                .bold()
        );
    }

    let scripts = find_scripts(&settings.src_dir);
    if scripts.is_empty() {
        println!("{}", "⚠️  No .py scripts found".yellow());
        return Ok(GenerateSummary::default());
    }
    debug!(count = scripts.len(), src_dir = %settings.src_dir.display(), "found scripts");

    let contracts = DefaultContractGenerator::new();
    let renderer = settings.target.generator(settings.package.as_deref());
    let mut summary = GenerateSummary::default();

    for script in &scripts {
        let relative_path = script.strip_prefix(&settings.src_dir).unwrap_or(script);
        match generate_file(script, &contracts, renderer.as_ref(), &settings) {
            Ok(outputs) => {
                summary.succeeded += 1;
                if !settings.stdout {
                    println!(
                        "  {} {} → {}",
                        "✓".green(),
                        relative_path.display(),
                        outputs.join(", ")
                    );
                }
            }
            Err(e) => {
                summary.failed += 1;
                eprintln!(
                    "  {} {} - {}",
                    "✗".red(),
                    relative_path.display(),
                    e.to_string().red()
                );
            }
        }
    }

    if !settings.stdout {
        println!();
        if summary.failed == 0 {
            println!(
                "{} Generated contracts for {} scripts",
                "✅".green(),
                summary.succeeded
            );
        } else {
            println!(
                "{} Generated contracts for {} scripts, {} errors",
                "⚠️".yellow(),
                summary.succeeded,
                summary.failed
            );
        }
    }

    Ok(summary)
}

fn find_scripts(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|path| SupportedLanguage::from_path(path) == Some(SupportedLanguage::Python))
        .collect();
    files.sort();
    files
}

/// Extract, render and write one script. Returns the written file names.
fn generate_file(
    script_path: &Path,
    contracts: &dyn ContractGenerator,
    renderer: &dyn CodeGenerator,
    settings: &Settings,
) -> Result<Vec<String>> {
    let source = fs::read_to_string(script_path)?;
    let file_name = script_path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown");

    let descriptor = ScriptDescriptor::python(source).with_file_name(file_name);
    let model = contracts.generate(&descriptor, &settings.options)?;

    let mut outputs = Vec::new();
    for class in &model.classes {
        let rendered = renderer.generate_interface(class);

        if settings.stdout {
            println!("{}", rendered);
            outputs.push("stdout".to_string());
            continue;
        }

        fs::create_dir_all(&settings.out_dir)?;
        let output_file = settings.out_dir.join(renderer.file_name(class));
        fs::write(&output_file, rendered)?;
        outputs.push(renderer.file_name(class));
    }

    Ok(outputs)
}
