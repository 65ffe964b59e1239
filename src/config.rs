use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_TITLE: &str = "Test suite";
pub const DEFAULT_OUTPUT_PATH: &str = "test-report.html";

/// Flat report options assembled by the caller from its project
/// configuration. Every field is optional in the serialized form; absent
/// values fall back to the documented defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportConfig {
    pub page_title: Option<String>,
    pub output_path: Option<PathBuf>,
    pub include_failure_msg: bool,
}

impl ReportConfig {
    /// Decodes a configuration section lifted out of a larger document. A
    /// missing, null, or malformed section yields the defaults silently.
    pub fn from_value(value: &serde_json::Value) -> Self {
        serde_json::from_value(value.clone()).unwrap_or_default()
    }

    pub fn page_title(&self) -> &str {
        self.page_title.as_deref().unwrap_or(DEFAULT_PAGE_TITLE)
    }

    pub fn output_path(&self) -> &Path {
        self.output_path
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_OUTPUT_PATH))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn defaults_apply_when_unset() {
        let config = ReportConfig::default();
        assert_eq!(config.page_title(), "Test suite");
        assert_eq!(config.output_path(), Path::new("test-report.html"));
        assert!(!config.include_failure_msg);
    }

    #[test]
    fn from_value_reads_recognized_options() {
        let config = ReportConfig::from_value(&json!({
            "pageTitle": "Acceptance run",
            "outputPath": "reports/acceptance.html",
            "includeFailureMsg": true
        }));
        assert_eq!(config.page_title(), "Acceptance run");
        assert_eq!(config.output_path(), Path::new("reports/acceptance.html"));
        assert!(config.include_failure_msg);
    }

    #[test]
    fn missing_or_malformed_section_falls_back_to_defaults() {
        for value in [
            json!(null),
            json!("not an object"),
            json!({ "includeFailureMsg": "yes" }),
        ] {
            let config = ReportConfig::from_value(&value);
            assert_eq!(config.page_title(), "Test suite");
            assert_eq!(config.output_path(), Path::new("test-report.html"));
            assert!(!config.include_failure_msg);
        }
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let config = ReportConfig::from_value(&json!({
            "pageTitle": "Nightly",
            "theme": "dark"
        }));
        assert_eq!(config.page_title(), "Nightly");
    }
}
