use std::env;
use std::path::PathBuf;

/// Runtime locations for survey input and generated output.
///
/// Read from the environment (after `.env` has been loaded):
///
/// | Variable              | Default       |
/// |-----------------------|---------------|
/// | `SURVEY_DATA_DIR`     | `.`           |
/// | `SURVEY_RESULTS_FILE` | `results.txt` |
/// | `SURVEY_CHART_DIR`    | `charts`      |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub data_dir: PathBuf,
    pub results_file: PathBuf,
    pub chart_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            results_file: PathBuf::from("results.txt"),
            chart_dir: PathBuf::from("charts"),
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds settings from an arbitrary key lookup; unset or empty keys keep their default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let path = |key: &str, default: PathBuf| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
                .unwrap_or(default)
        };

        Self {
            data_dir: path("SURVEY_DATA_DIR", defaults.data_dir),
            results_file: path("SURVEY_RESULTS_FILE", defaults.results_file),
            chart_dir: path("SURVEY_CHART_DIR", defaults.chart_dir),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_when_unset() {
        let settings = Settings::from_lookup(|_| None);
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("SURVEY_DATA_DIR", "/srv/survey"),
            ("SURVEY_RESULTS_FILE", ""),
        ]
        .into_iter()
        .collect();
        let settings = Settings::from_lookup(|k| vars.get(k).map(|v| v.to_string()));

        assert_eq!(settings.data_dir, PathBuf::from("/srv/survey"));
        assert_eq!(settings.results_file, PathBuf::from("results.txt"));
        assert_eq!(settings.chart_dir, PathBuf::from("charts"));
    }
}
