// src/overrides/file.rs
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::debug;

use crate::domain::RuleSet;
use crate::policy::{parse_rules, Format, LoadError};

use super::traits::{OverrideError, OverrideProvider};

/// Extensions tried, in order, for each key.
const EXTENSIONS: [&str; 3] = ["yaml", "yml", "json"];

/// Document store backed by a directory of `{key}.yaml|yml|json` files.
///
/// Documents are re-read on every fetch so edits apply to the next request.
#[derive(Debug, Clone)]
pub struct FileOverrides {
    dir: PathBuf,
}

impl FileOverrides {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileOverrides { dir: dir.into() }
    }

    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }

    fn candidates(&self, key: &str) -> impl Iterator<Item = PathBuf> + '_ {
        let key = key.to_string();
        EXTENSIONS
            .iter()
            .map(move |ext| self.dir.join(format!("{key}.{ext}")))
    }
}

/// Keys name a single file inside the store directory.
fn validate_key(key: &str) -> Result<(), OverrideError> {
    let allowed = key
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));

    if key.is_empty() || !allowed || key == "." || key == ".." {
        return Err(OverrideError::InvalidKey(key.to_string()));
    }

    Ok(())
}

#[async_trait]
impl OverrideProvider for FileOverrides {
    fn kind(&self) -> &'static str {
        "file"
    }

    async fn fetch(&self, key: &str) -> Result<Option<RuleSet>, OverrideError> {
        validate_key(key)?;

        for path in self.candidates(key) {
            match tokio::fs::read_to_string(&path).await {
                Ok(content) => {
                    debug!(path = %path.display(), "Read override document");
                    return Ok(Some(parse_rules(&content, Format::from_path(&path))?));
                }
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => return Err(LoadError::Io(e).into()),
            }
        }

        Ok(None)
    }
}
