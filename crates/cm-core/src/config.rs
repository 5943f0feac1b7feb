use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{MinifyError, Result};

/// Settings for one merge run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinifyConfig {
    /// Soft wrap column. `0` disables wrapping.
    pub line_width: usize,
    /// Keyword introducing an import directive (`using` for C#, `import` for Java).
    pub import_keyword: String,
    /// Keep `///` documentation comments in the body.
    pub keep_doc_comments: bool,
}

impl MinifyConfig {
    pub fn with_line_width(mut self, line_width: usize) -> Self {
        self.line_width = line_width;
        self
    }

    pub fn with_import_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.import_keyword = keyword.into();
        self
    }

    pub fn with_doc_comments(mut self, keep: bool) -> Self {
        self.keep_doc_comments = keep;
        self
    }

    /// Parse a JSON document. Missing fields take their defaults.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| MinifyError::Open {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_json(&text)?;
        tracing::debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }

    /// The import keyword must itself be an identifier, otherwise no
    /// directive could ever match it.
    pub fn validate(&self) -> Result<()> {
        let mut chars = self.import_keyword.chars();
        let valid = match chars.next() {
            Some(first) => {
                (first == '_' || first.is_alphabetic())
                    && chars.all(|c| c == '_' || c.is_alphanumeric())
            }
            None => false,
        };
        if !valid {
            return Err(MinifyError::InvalidConfig(format!(
                "import keyword {:?} is not an identifier",
                self.import_keyword
            )));
        }
        Ok(())
    }
}

impl Default for MinifyConfig {
    fn default() -> Self {
        Self {
            line_width: 0,
            import_keyword: "using".into(),
            keep_doc_comments: true,
        }
    }
}
