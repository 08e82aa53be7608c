use polyglot_codegen::Target;
use polyglot_contract::CodegenOptions;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_CONFIG_NAME: &str = "polyglot.config.json";

/// Polyglot configuration file format
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory scanned for guest scripts
    #[serde(default = "default_src_dir")]
    pub src_dir: String,

    /// Directory generated interfaces are written to
    #[serde(default = "default_out_dir")]
    pub out_dir: String,

    #[serde(default)]
    pub target: Target,

    /// Java package for generated interfaces
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_package: Option<String>,

    /// Only export methods marked with `@adapter_include`
    #[serde(default)]
    pub only_included_methods: bool,
}

fn default_src_dir() -> String {
    "src".to_string()
}

fn default_out_dir() -> String {
    "generated".to_string()
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content).map_err(|e| {
                anyhow::anyhow!("Invalid {}: {}", config_path.display(), e)
            })?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Get absolute path to source directory
    pub fn get_src_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.src_dir)
    }

    /// Get absolute path to output directory
    pub fn get_out_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.out_dir)
    }

    pub fn codegen_options(&self) -> CodegenOptions {
        CodegenOptions {
            only_included_methods: self.only_included_methods,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            src_dir: default_src_dir(),
            out_dir: default_out_dir(),
            target: Target::default(),
            base_package: None,
            only_included_methods: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "srcDir": "scripts",
            "outDir": "src/main/java",
            "target": "java",
            "basePackage": "com.demo",
            "onlyIncludedMethods": true
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.src_dir, "scripts");
        assert_eq!(config.out_dir, "src/main/java");
        assert_eq!(config.target, Target::Java);
        assert_eq!(config.base_package.as_deref(), Some("com.demo"));
        assert!(config.codegen_options().only_included_methods);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{ "target": "typescript" }"#).unwrap();
        assert_eq!(config.src_dir, "src");
        assert_eq!(config.out_dir, "generated");
        assert_eq!(config.target, Target::TypeScript);
        assert!(!config.only_included_methods);
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.src_dir, "src");
        assert_eq!(config.out_dir, "generated");
        assert_eq!(config.target, Target::Java);
        assert_eq!(config.base_package, None);
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path().to_str().unwrap()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_invalid_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(DEFAULT_CONFIG_NAME), "{ not json").unwrap();
        let err = Config::load(dir.path().to_str().unwrap()).unwrap_err();
        assert!(err.to_string().contains(DEFAULT_CONFIG_NAME));
    }
}
