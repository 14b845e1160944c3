use anyhow::{Context, Result};
use mesh_core::config::Settings;
use std::{fs, path::Path};

/// Parses a JSON settings object, merging it over the defaults.
pub(crate) fn parse_settings(json: &str) -> Result<Settings> {
    serde_json::from_str(json).context("invalid settings JSON")
}

pub(crate) fn load_settings(path: &Path) -> Result<Settings> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("could not read settings from {}", path.display()))?;
    parse_settings(&json).with_context(|| format!("in {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_merges_partial_object() {
        let s = parse_settings(r##"{ "gravity": 0.02, "lineStroke": "#336699" }"##).unwrap();

        assert_eq!(s.gravity, 0.02);
        assert_eq!(s.line_stroke, "#336699");
        assert_eq!(s.fps, 15.0);
        assert_eq!(s.vertex_count, 5);
    }

    #[test]
    fn parse_rejects_wrong_types() {
        let err = parse_settings(r#"{ "fps": "fast" }"#).unwrap_err();
        assert!(format!("{err:#}").contains("invalid settings JSON"));
    }

    #[test]
    fn load_reports_missing_file() {
        let path = std::env::temp_dir().join("mesh-view-does-not-exist.json");
        let err = load_settings(&path).unwrap_err();
        assert!(err.to_string().contains("could not read settings"));
    }

    #[test]
    fn load_reads_file_from_disk() {
        let path = std::env::temp_dir().join(format!("mesh-view-settings-{}.json", std::process::id()));
        fs::write(&path, r#"{ "vertexCount": 9 }"#).unwrap();

        let s = load_settings(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(s.vertex_count, 9);
    }
}
