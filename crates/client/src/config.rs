use crate::error::FetchError;
use views::pagination::DEFAULT_PAGE_SIZE;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

/// Runtime settings of the front ends
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL every request path is appended to
    pub api_url: String,
    /// Records requested per page of a paginated list
    pub page_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Config {
    /// Reads `COURSES_API_URL` and `COURSES_PAGE_SIZE`, after loading a `.env` file if present
    pub fn load() -> Result<Self, FetchError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from a variable lookup, falling back to defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, FetchError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup("COURSES_API_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let page_size = match lookup("COURSES_PAGE_SIZE") {
            Some(value) => match value.trim().parse::<usize>() {
                Ok(size) if size > 0 => size,
                _ => {
                    return Err(FetchError::InvalidConfig {
                        name: "COURSES_PAGE_SIZE",
                        value,
                    });
                }
            },
            None => DEFAULT_PAGE_SIZE,
        };

        Ok(Self { api_url, page_size })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        assert_eq!(Config::from_lookup(lookup(&[])).unwrap(), Config::default());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("COURSES_API_URL", "https://mcgill.courses/api/"),
            ("COURSES_PAGE_SIZE", "50"),
        ]))
        .unwrap();

        assert_eq!(config.api_url, "https://mcgill.courses/api");
        assert_eq!(config.page_size, 50);
    }

    #[test]
    fn test_invalid_page_size() {
        for value in ["zero", "0", "-3"] {
            let err = Config::from_lookup(lookup(&[("COURSES_PAGE_SIZE", value)])).unwrap_err();
            assert!(matches!(
                err,
                FetchError::InvalidConfig { name: "COURSES_PAGE_SIZE", .. }
            ));
        }
    }
}
