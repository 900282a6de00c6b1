//! Configuration access port trait.

use crate::domain::error::TrendscoreError;

pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;

    /// `Ok(None)` when the key is absent; `ConfigInvalid` when it is not an integer.
    fn get_int(&self, section: &str, key: &str) -> Result<Option<i64>, TrendscoreError>;

    /// `Ok(None)` when the key is absent; `ConfigInvalid` when it is not a number.
    fn get_double(&self, section: &str, key: &str) -> Result<Option<f64>, TrendscoreError>;

    /// Every key/value pair in `section`, sorted by key. Empty if the section is absent.
    fn get_section(&self, section: &str) -> Vec<(String, String)>;
}
