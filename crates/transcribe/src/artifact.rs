use std::path::{Path, PathBuf};

use jiff::civil::DateTime;
use serde_json::Value;

use crate::error::Result;

/// Flat directory of `transcript_<YYYYMMDD_HHMMSS>.json` files
///
/// Names have second granularity, so two saves within the same second
/// target the same file and the later one wins.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    /// Create the directory if needed and return a store writing into it
    ///
    /// Safe to call concurrently or on an existing directory.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;

        tracing::debug!(dir = %dir.display(), "artifact directory ready");

        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write the provider payload as indented JSON, returning the filename
    pub async fn save(&self, transcription: &Value) -> Result<String> {
        let filename = artifact_name(jiff::Zoned::now().datetime());
        let path = self.dir.join(&filename);

        let contents = serde_json::to_vec_pretty(transcription).map_err(std::io::Error::other)?;
        tokio::fs::write(&path, contents).await?;

        tracing::info!(path = %path.display(), "saved transcript");

        Ok(filename)
    }
}

/// Artifact filename for a local timestamp
pub fn artifact_name(at: DateTime) -> String {
    format!("transcript_{}.json", at.strftime("%Y%m%d_%H%M%S"))
}
