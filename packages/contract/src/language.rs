use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Guest languages a script can be declared in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupportedLanguage {
    Python,
    Js,
}

impl SupportedLanguage {
    pub const ALL: [SupportedLanguage; 2] = [SupportedLanguage::Python, SupportedLanguage::Js];

    pub fn id(&self) -> &'static str {
        match self {
            SupportedLanguage::Python => "python",
            SupportedLanguage::Js => "js",
        }
    }

    /// File extension including the leading dot
    pub fn ext(&self) -> &'static str {
        match self {
            SupportedLanguage::Python => ".py",
            SupportedLanguage::Js => ".js",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|lang| lang.id() == id)
    }

    /// Detect the language from a path's extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        Self::ALL
            .into_iter()
            .find(|lang| lang.ext().trim_start_matches('.') == ext)
    }
}

impl fmt::Display for SupportedLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Raw script text handed to a parser
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptDescriptor {
    pub language: SupportedLanguage,
    pub source: String,
    /// Only used to make error messages point at a file
    pub file_name: Option<String>,
}

impl ScriptDescriptor {
    pub fn new(language: SupportedLanguage, source: impl Into<String>) -> Self {
        Self {
            language,
            source: source.into(),
            file_name: None,
        }
    }

    pub fn python(source: impl Into<String>) -> Self {
        Self::new(SupportedLanguage::Python, source)
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }
}
