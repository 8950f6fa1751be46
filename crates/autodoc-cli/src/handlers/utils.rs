//! Shared utilities for command handlers

use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use autodoc_core::ApiManifest;
use std::path::Path;

/// Load and validate an API manifest
pub fn load_manifest(path: &Path) -> Result<ApiManifest> {
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let _timer = Timer::with_details("load_manifest", &path.display().to_string());
    Ok(ApiManifest::load(path)?)
}

/// Title precedence: command line, manifest, configuration, then a fixed
/// fallback.
pub fn pick_title<'a>(cli: Option<&'a str>, manifest: &'a str, config: Option<&'a str>) -> &'a str {
    cli.filter(|t| !t.is_empty())
        .or_else(|| Some(manifest).filter(|t| !t.is_empty()))
        .or(config)
        .unwrap_or("API Documentation")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_title() {
        assert_eq!(pick_title(Some("Cli"), "Manifest", Some("Config")), "Cli");
        assert_eq!(pick_title(None, "Manifest", Some("Config")), "Manifest");
        assert_eq!(pick_title(Some(""), "", Some("Config")), "Config");
        assert_eq!(pick_title(None, "", None), "API Documentation");
    }

    #[test]
    fn test_missing_manifest() {
        let err = load_manifest(Path::new("/nonexistent/api.yaml")).unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }
}
