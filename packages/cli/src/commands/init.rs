use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use polyglot_codegen::Target;
use std::fs;
use std::path::PathBuf;

pub const EXAMPLE_SCRIPT: &str = r#"class StatsApi:
    @adapter_include
    def random_numbers(self, n: int = 10):
        return [i * 2 for i in range(n)]

    def summary(self, values: List[float]) -> Dict[str, float]:
        return {"mean": sum(values) / len(values)}


polyglot.export_value("StatsApi", StatsApi)
"#;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Target language (java, typescript, rust)
    #[arg(short, long, default_value = "java")]
    pub target: Target,

    /// Source directory
    #[arg(short, long, default_value = "src")]
    pub src_dir: String,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!(
        "{}",
        "📝 Initializing polyglot contracts...".bright_blue().bold()
    );

    let src_dir = PathBuf::from(cwd).join(&args.src_dir);
    if !src_dir.exists() {
        fs::create_dir_all(&src_dir)?;
        println!("  {} Created {}/", "✓".green(), args.src_dir);
    }

    let example_file = src_dir.join("stats_api.py");
    if !example_file.exists() {
        fs::write(&example_file, EXAMPLE_SCRIPT)?;
        println!("  {} Created stats_api.py", "✓".green());
    }

    let config = Config {
        src_dir: args.src_dir.clone(),
        target: args.target,
        ..Config::default()
    };

    let config_json = serde_json::to_string_pretty(&config)?;
    fs::write(&config_path, config_json)?;

    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    println!();
    println!("{}", "✅ Project initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Edit {}/stats_api.py", args.src_dir);
    println!("  2. Run: polyglot generate");
    println!("  3. Check output in {}/", config.out_dir);

    Ok(())
}
