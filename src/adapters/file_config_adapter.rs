//! INI file configuration adapter.
//!
//! Section and key names are case-insensitive (configparser lowercases them).

use crate::domain::error::TrendscoreError;
use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TrendscoreError> {
        let path = path.as_ref();
        let mut config = Ini::new();
        config
            .load(path)
            .map_err(|reason| TrendscoreError::ConfigParse {
                file: path.display().to_string(),
                reason,
            })?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, TrendscoreError> {
        let mut config = Ini::new();
        config
            .read(content.to_string())
            .map_err(|reason| TrendscoreError::ConfigParse {
                file: "<string>".into(),
                reason,
            })?;
        Ok(Self { config })
    }
}

fn invalid_value(section: &str, key: &str, reason: String) -> TrendscoreError {
    TrendscoreError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason,
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_int(&self, section: &str, key: &str) -> Result<Option<i64>, TrendscoreError> {
        self.config
            .getint(section, key)
            .map_err(|reason| invalid_value(section, key, reason))
    }

    fn get_double(&self, section: &str, key: &str) -> Result<Option<f64>, TrendscoreError> {
        self.config
            .getfloat(section, key)
            .map_err(|reason| invalid_value(section, key, reason))
    }

    fn get_section(&self, section: &str) -> Vec<(String, String)> {
        let mut entries: Vec<(String, String)> = self
            .config
            .get_map_ref()
            .get(&section.to_lowercase())
            .map(|keys| {
                keys.iter()
                    .filter_map(|(k, v)| v.as_ref().map(|v| (k.clone(), v.clone())))
                    .collect()
            })
            .unwrap_or_default();
        entries.sort();
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    const SAMPLE: &str = r#"
[data]
path = /var/lib/trendscore/bars
period = 6mo

[symbols]
THYAO = THYAO.IS
ASELS = ASELS.IS
EREGL = EREGL.IS

[backtest]
threshold = 70
initial_capital = 100000.5
start_index = 50
"#;

    #[test]
    fn from_string_parses_config() {
        let adapter = FileConfigAdapter::from_string(SAMPLE).unwrap();
        assert_eq!(
            adapter.get_string("data", "path"),
            Some("/var/lib/trendscore/bars".to_string())
        );
        assert_eq!(adapter.get_string("DATA", "Period"), Some("6mo".to_string()));
    }

    #[test]
    fn get_string_returns_none_for_missing_key() {
        let adapter = FileConfigAdapter::from_string(SAMPLE).unwrap();
        assert_eq!(adapter.get_string("backtest", "missing"), None);
        assert_eq!(adapter.get_string("missing_section", "key"), None);
    }

    #[test]
    fn get_int_present_and_absent() {
        let adapter = FileConfigAdapter::from_string(SAMPLE).unwrap();
        assert_eq!(adapter.get_int("backtest", "threshold").unwrap(), Some(70));
        assert_eq!(adapter.get_int("backtest", "missing").unwrap(), None);
        assert_eq!(adapter.get_int("missing_section", "threshold").unwrap(), None);
    }

    #[test]
    fn get_int_rejects_non_integer() {
        let adapter = FileConfigAdapter::from_string(SAMPLE).unwrap();
        let err = adapter.get_int("data", "period").unwrap_err();
        assert!(matches!(
            err,
            TrendscoreError::ConfigInvalid { section, key, .. } if section == "data" && key == "period"
        ));
        assert!(adapter.get_int("backtest", "initial_capital").is_err());
    }

    #[test]
    fn get_double_present_and_absent() {
        let adapter = FileConfigAdapter::from_string(SAMPLE).unwrap();
        assert_eq!(
            adapter.get_double("backtest", "initial_capital").unwrap(),
            Some(100000.5)
        );
        assert_eq!(adapter.get_double("backtest", "threshold").unwrap(), Some(70.0));
        assert_eq!(adapter.get_double("backtest", "missing").unwrap(), None);
    }

    #[test]
    fn get_double_rejects_non_number() {
        let adapter = FileConfigAdapter::from_string(SAMPLE).unwrap();
        let err = adapter.get_double("data", "path").unwrap_err();
        assert!(matches!(err, TrendscoreError::ConfigInvalid { key, .. } if key == "path"));
    }

    #[test]
    fn get_section_is_sorted() {
        let adapter = FileConfigAdapter::from_string(SAMPLE).unwrap();
        let symbols = adapter.get_section("symbols");
        assert_eq!(
            symbols,
            vec![
                ("asels".to_string(), "ASELS.IS".to_string()),
                ("eregl".to_string(), "EREGL.IS".to_string()),
                ("thyao".to_string(), "THYAO.IS".to_string()),
            ]
        );
        assert!(adapter.get_section("absent").is_empty());
    }

    #[test]
    fn from_file_reads_config() {
        let file = create_temp_config(SAMPLE);
        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(adapter.get_section("symbols").len(), 3);
    }

    #[test]
    fn from_file_returns_parse_error_for_missing_file() {
        let result = FileConfigAdapter::from_file("/nonexistent/path/config.ini");
        assert!(matches!(result, Err(TrendscoreError::ConfigParse { .. })));
    }
}
