use crate::consts::cli_consts::backend::DEFAULT_BASE_URL;
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

/// Which monitor backend the dashboard talks to.
#[derive(Clone, Default, PartialEq, Eq)]
pub enum Environment {
    /// Backend on this machine at its default port.
    #[default]
    Local,
    /// Backend at an explicit base URL.
    Custom { base_url: String },
}

impl Environment {
    /// Returns the base URL of the monitor backend.
    pub fn base_url(&self) -> String {
        match self {
            Environment::Local => DEFAULT_BASE_URL.to_string(),
            Environment::Custom { base_url } => base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("local") || trimmed.is_empty() {
            return Ok(Environment::Local);
        }
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            return Ok(Environment::Custom {
                base_url: trimmed.to_string(),
            });
        }
        Err(format!(
            "Unknown environment '{}': expected 'local' or an http(s) URL",
            trimmed
        ))
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Local => write!(f, "Local"),
            Environment::Custom { .. } => write!(f, "Custom"),
        }
    }
}

impl Debug for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Environment::{}, URL: {}", self, self.base_url())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_environment() {
        assert_eq!("local".parse::<Environment>(), Ok(Environment::Local));
        assert_eq!("".parse::<Environment>(), Ok(Environment::Local));
        assert_eq!(
            "https://monitor.example.com/"
                .parse::<Environment>()
                .map(|e| e.base_url()),
            Ok("https://monitor.example.com".to_string())
        );
        assert!("staging".parse::<Environment>().is_err());
    }
}
