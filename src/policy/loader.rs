use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::domain::{RuleSet, RulesError};

/// Errors that can occur while loading a rule document.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Rules(#[from] RulesError),
}

/// Document format, picked from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
}

impl Format {
    /// `.json` files are JSON, anything else is treated as YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Format::Json,
            _ => Format::Yaml,
        }
    }
}

/// Parse and validate a rule document.
pub fn parse_rules(content: &str, format: Format) -> Result<RuleSet, LoadError> {
    let rules: RuleSet = match format {
        Format::Json => serde_json::from_str(content)?,
        Format::Yaml => serde_yaml::from_str(content)?,
    };

    rules.validate()?;

    Ok(rules)
}

/// Load a rule set from a YAML or JSON file.
pub fn load_rules(path: impl AsRef<Path>) -> Result<RuleSet, LoadError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;

    parse_rules(&content, Format::from_path(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{Builder, NamedTempFile};

    #[test]
    fn test_load_yaml_rules() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
discounts:
  "1-100": 0.30
  "101-220": 0.20
  "221-300": 0.15
  "301-469": 0.13
  "470+": 0.10
"#
        )
        .unwrap();

        let rules = load_rules(file.path()).unwrap();
        let discounts = rules.category("discounts").unwrap();

        assert_eq!(discounts.len(), 5);
        assert_eq!(discounts.rate("301-469"), Some(0.13));
    }

    #[test]
    fn test_load_json_rules() {
        let mut file = Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"discounts": {{"0-100": 0.25}}}}"#).unwrap();

        let rules = load_rules(file.path()).unwrap();

        assert_eq!(rules.category("discounts").unwrap().rate("0-100"), Some(0.25));
    }

    #[test]
    fn test_load_rejects_percent_rates() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "discounts:\n  \"1-100\": 30").unwrap();

        let result = load_rules(file.path());

        assert!(matches!(result, Err(LoadError::Rules(_))));
        assert!(result.unwrap_err().to_string().contains("outside"));
    }

    #[test]
    fn test_load_rejects_wrong_shape() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "discounts: [0.3, 0.2]").unwrap();

        assert!(matches!(load_rules(file.path()), Err(LoadError::Yaml(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_rules("/nonexistent/tierconf/defaults.yaml");
        assert!(matches!(result, Err(LoadError::Io(_))));
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(Format::from_path(Path::new("a.JSON")), Format::Json);
        assert_eq!(Format::from_path(Path::new("a.yml")), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("noext")), Format::Yaml);
    }
}
