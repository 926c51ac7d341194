use chrono_tz::Tz;
use url::Url;

use crate::error::CanvasError;

pub const DEFAULT_TIMEZONE: Tz = chrono_tz::America::Santiago;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Everything needed to talk to one Canvas instance. Built once per run and
/// only read afterwards.
#[derive(Debug, Clone)]
pub struct CanvasConfig {
    /// API root, e.g. `https://canvas.example.com/api/v1`.
    pub base_url: Option<String>,
    pub token: Option<String>,
    /// Public URL used for course links. Derived from `base_url` when unset.
    pub clean_url: Option<String>,
    /// Zone dates are displayed in and "today" is computed in.
    pub timezone: Tz,
    pub timeout_secs: u64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        CanvasConfig {
            base_url: None,
            token: None,
            clean_url: None,
            timezone: DEFAULT_TIMEZONE,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl CanvasConfig {
    /// Reads `URL`, `TOKEN`, `CLEAN_URL`, `TIMEZONE` and `REQUEST_TIMEOUT_SECS`,
    /// loading a `.env` file first when one exists.
    pub fn from_env() -> Result<Self, CanvasError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, CanvasError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let timezone = match non_empty("TIMEZONE") {
            Some(name) => parse_timezone(&name)?,
            None => DEFAULT_TIMEZONE,
        };

        let timeout_secs = match non_empty("REQUEST_TIMEOUT_SECS") {
            Some(raw) => raw.parse().map_err(|_| {
                CanvasError::config(&format!("REQUEST_TIMEOUT_SECS no es un número: {}", raw))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(CanvasConfig {
            base_url: non_empty("URL"),
            token: non_empty("TOKEN"),
            clean_url: non_empty("CLEAN_URL"),
            timezone,
            timeout_secs,
        })
    }

    /// The API root without a trailing slash. Missing or malformed is fatal.
    pub fn base_url(&self) -> Result<String, CanvasError> {
        let raw = self.base_url.as_deref().ok_or_else(|| {
            CanvasError::config("la URL base no está configurada (variable URL o --url)")
        })?;
        Url::parse(raw)
            .map_err(|e| CanvasError::config(&format!("URL base inválida '{}': {}", raw, e)))?;
        Ok(raw.trim_end_matches('/').to_string())
    }

    pub fn token(&self) -> Result<&str, CanvasError> {
        self.token
            .as_deref()
            .ok_or_else(|| CanvasError::validation("falta el API Token (variable TOKEN o --token)"))
    }

    /// Checks the settings a run cannot start without. A missing base URL is
    /// reported before a missing token: the first aborts, the second is a
    /// user mistake.
    pub fn check_credentials(&self) -> Result<(), CanvasError> {
        self.base_url()?;
        self.token()?;
        Ok(())
    }

    /// Public URL for links; falls back to the API root minus `/api/v1`.
    pub fn clean_url(&self) -> String {
        if let Some(clean) = &self.clean_url {
            return clean.trim_end_matches('/').to_string();
        }
        let base = self.base_url.as_deref().unwrap_or_default().trim_end_matches('/');
        base.strip_suffix("/api/v1").unwrap_or(base).to_string()
    }

    /// Public link to a course page.
    pub fn course_link(&self, course_id: &str) -> String {
        format!("{}/courses/{}", self.clean_url(), course_id)
    }
}

/// Everything that must hold before any course is fetched.
pub fn validate_request(config: &CanvasConfig, course_ids: &[String]) -> Result<(), CanvasError> {
    config.check_credentials()?;
    if course_ids.is_empty() {
        return Err(CanvasError::validation("no se ingresaron IDs de cursos"));
    }
    Ok(())
}

pub fn parse_timezone(name: &str) -> Result<Tz, CanvasError> {
    name.parse::<Tz>()
        .map_err(|_| CanvasError::config(&format!("zona horaria desconocida: {}", name)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<CanvasConfig, CanvasError> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        CanvasConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn missing_base_url_is_a_config_error() {
        let config = config_from(&[("TOKEN", "abc")]).unwrap();
        let err = config.base_url().unwrap_err();
        assert_eq!(err.kind, ErrorKind::Config);
    }

    #[test]
    fn missing_token_is_a_validation_error() {
        let config = config_from(&[("URL", "https://canvas.test/api/v1"), ("TOKEN", "  ")]).unwrap();
        assert_eq!(config.token().unwrap_err().kind, ErrorKind::Validation);
    }

    #[test]
    fn clean_url_defaults_to_api_root_without_suffix() {
        let config = config_from(&[("URL", "https://canvas.test/api/v1/")]).unwrap();
        assert_eq!(config.base_url().unwrap(), "https://canvas.test/api/v1");
        assert_eq!(config.course_link("42"), "https://canvas.test/courses/42");
    }

    #[test]
    fn explicit_clean_url_wins() {
        let config = config_from(&[
            ("URL", "https://canvas-api.internal/api/v1"),
            ("CLEAN_URL", "https://cursos.example.cl/"),
        ])
        .unwrap();
        assert_eq!(config.course_link("7"), "https://cursos.example.cl/courses/7");
    }

    #[test]
    fn timezone_and_timeout_are_parsed() {
        let config = config_from(&[("TIMEZONE", "Europe/Madrid"), ("REQUEST_TIMEOUT_SECS", "5")]).unwrap();
        assert_eq!(config.timezone, chrono_tz::Europe::Madrid);
        assert_eq!(config.timeout_secs, 5);

        assert!(config_from(&[("TIMEZONE", "Mars/Olympus")]).is_err());
        assert!(config_from(&[("REQUEST_TIMEOUT_SECS", "soon")]).is_err());
    }

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn missing_base_url_wins_over_missing_token() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.check_credentials().unwrap_err().kind, ErrorKind::Config);
        assert_eq!(validate_request(&config, &[]).unwrap_err().kind, ErrorKind::Config);
    }

    #[test]
    fn missing_token_or_ids_are_validation_errors() {
        let no_token = config_from(&[("URL", "https://canvas.test/api/v1")]).unwrap();
        assert_eq!(
            validate_request(&no_token, &ids(&["1"])).unwrap_err().kind,
            ErrorKind::Validation
        );

        let complete = config_from(&[("URL", "https://canvas.test/api/v1"), ("TOKEN", "abc")]).unwrap();
        assert_eq!(validate_request(&complete, &[]).unwrap_err().kind, ErrorKind::Validation);
        assert!(validate_request(&complete, &ids(&["1", "2"])).is_ok());
    }

    #[test]
    fn malformed_base_url_is_a_config_error() {
        let config = config_from(&[("URL", "not a url"), ("TOKEN", "abc")]).unwrap();
        assert_eq!(config.check_credentials().unwrap_err().kind, ErrorKind::Config);
    }
}
