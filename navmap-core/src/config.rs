//! Configuration loading from navmap.toml.

use serde::Deserialize;
use std::{fs, path::Path};

use crate::error::{IoResultExt, NavmapError, NavmapResult};

/// Main configuration structure for navmap.toml.
///
/// ```toml
/// ignore = ["Preview", "*Mock"]
///
/// [output]
/// dir = "navigation_analysis"
/// ```
#[derive(Debug, Deserialize, Default)]
pub struct NavmapConfig {
    /// List of file-stem names or patterns to ignore.
    pub ignore: Option<Vec<String>>,
    /// Output configuration.
    pub output: Option<OutputConfig>,
}

/// Output artifact configuration.
#[derive(Debug, Deserialize, Default)]
pub struct OutputConfig {
    /// Directory the four artifacts are written into.
    pub dir: Option<String>,
}

impl NavmapConfig {
    /// Configured output directory, if any.
    pub fn output_dir(&self) -> Option<&str> {
        self.output.as_ref()?.dir.as_deref()
    }

    /// Configured ignore patterns (empty slice when absent).
    pub fn ignore_patterns(&self) -> &[String] {
        self.ignore.as_deref().unwrap_or_default()
    }
}

/// Loads configuration from navmap.toml if it exists.
///
/// A missing file is fine (None); an unreadable or malformed file is an
/// error, since the user wrote it deliberately.
pub fn load_config(root: &Path) -> NavmapResult<Option<NavmapConfig>> {
    let path = root.join("navmap.toml");
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(&path).with_read_path(&path)?;
    let cfg =
        toml::from_str(&content).map_err(|e| NavmapError::config(&path, e.to_string()))?;
    Ok(Some(cfg))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

    fn temp_root() -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "navmap_config_test_{}_{}",
            std::process::id(),
            TEST_COUNTER.fetch_add(1, Ordering::SeqCst)
        ));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_missing_config_is_none() {
        let root = temp_root();
        assert!(load_config(&root).unwrap().is_none());
        fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_load_full_config() {
        let root = temp_root();
        fs::write(
            root.join("navmap.toml"),
            "ignore = [\"Preview\", \"*Mock\"]\n\n[output]\ndir = \"out/nav\"\n",
        )
        .unwrap();

        let cfg = load_config(&root).unwrap().unwrap();
        assert_eq!(cfg.ignore_patterns(), ["Preview", "*Mock"]);
        assert_eq!(cfg.output_dir(), Some("out/nav"));

        fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_partial_config_defaults() {
        let root = temp_root();
        fs::write(root.join("navmap.toml"), "ignore = [\"Preview\"]\n").unwrap();

        let cfg = load_config(&root).unwrap().unwrap();
        assert_eq!(cfg.output_dir(), None);

        fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_malformed_config_is_config_error() {
        let root = temp_root();
        fs::write(root.join("navmap.toml"), "ignore = not-a-list").unwrap();

        let err = load_config(&root).unwrap_err();
        assert!(matches!(err, NavmapError::Config { .. }));
        assert!(!err.is_recoverable());

        fs::remove_dir_all(&root).ok();
    }
}
