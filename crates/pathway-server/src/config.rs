//! Service configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use pathway_core::ValidationPolicy;
use pathway_report::Branding;

/// Top-level pathway configuration.
///
/// Note: Custom Debug impl masks the admin secret to keep it out of logs.
#[derive(Clone, Serialize, Deserialize)]
pub struct PathwayConfig {
    /// Address the HTTP service listens on.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    /// SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,
    /// Shared secret for the admin login. Unset means every login fails.
    #[serde(default)]
    pub admin_secret: Option<String>,
    /// Reject blank identity fields and ratings outside 1-5.
    #[serde(default)]
    pub strict_validation: bool,
    /// Text and filenames used in exports and reports.
    #[serde(default)]
    pub branding: Branding,
}

impl std::fmt::Debug for PathwayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PathwayConfig")
            .field("bind_addr", &self.bind_addr)
            .field("database_path", &self.database_path)
            .field("admin_secret", &self.admin_secret.as_ref().map(|_| "***"))
            .field("strict_validation", &self.strict_validation)
            .field("branding", &self.branding)
            .finish()
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0:8000".to_string()
}
fn default_database_path() -> PathBuf {
    PathBuf::from("./career_guidance.db")
}

impl Default for PathwayConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            database_path: default_database_path(),
            admin_secret: None,
            strict_validation: false,
            branding: Branding::default(),
        }
    }
}

impl PathwayConfig {
    pub fn validation_policy(&self) -> ValidationPolicy {
        if self.strict_validation {
            ValidationPolicy::Strict
        } else {
            ValidationPolicy::Permissive
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
/// Substituted values are not themselves scanned for references.
fn resolve_env_vars(s: &str) -> String {
    resolve_with(s, |name| std::env::var(name).ok())
}

fn resolve_with(s: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let var_name = &rest[start + 2..start + end];
        result.push_str(&lookup(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

/// Apply `PATHWAY_*` overrides, reading variables through `lookup`.
fn apply_env_overrides(config: &mut PathwayConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(secret) = lookup("PATHWAY_ADMIN_SECRET") {
        config.admin_secret = Some(secret);
    }
    if let Some(path) = lookup("PATHWAY_DATABASE") {
        config.database_path = PathBuf::from(path);
    }
    if let Some(addr) = lookup("PATHWAY_BIND") {
        config.bind_addr = addr;
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `pathway.toml` in the current directory
/// 2. `~/.config/pathway/config.toml`
///
/// Environment variable overrides: `PATHWAY_ADMIN_SECRET`, `PATHWAY_DATABASE`,
/// `PATHWAY_BIND`.
pub fn load_config() -> Result<PathwayConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<PathwayConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("pathway.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!("loaded config from {}", path.display());
            config
        }
        None => PathwayConfig::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());

    if config.admin_secret.is_none() {
        tracing::warn!("no admin secret configured; admin login is disabled");
    }

    Ok(config)
}

/// Parse a TOML document, resolving `${VAR}` references in string settings.
pub fn parse_config(content: &str) -> Result<PathwayConfig> {
    let mut config: PathwayConfig = toml::from_str(content)?;
    config.bind_addr = resolve_env_vars(&config.bind_addr);
    config.database_path = PathBuf::from(resolve_env_vars(&config.database_path.to_string_lossy()));
    config.admin_secret = config
        .admin_secret
        .as_deref()
        .map(resolve_env_vars)
        .filter(|s| !s.is_empty());
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("pathway"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_PATHWAY_TEST_VAR", "hello");
        assert_eq!(resolve_env_vars("${_PATHWAY_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_vars("prefix_${_PATHWAY_TEST_VAR}_suffix"),
            "prefix_hello_suffix"
        );
        std::env::remove_var("_PATHWAY_TEST_VAR");
    }

    #[test]
    fn self_referencing_value_is_not_expanded_again() {
        let lookup = |name: &str| match name {
            "LOOP" => Some("a${LOOP}b".to_string()),
            _ => None,
        };
        assert_eq!(resolve_with("x${LOOP}y", lookup), "xa${LOOP}by");
        assert_eq!(resolve_with("${MISSING}-${LOOP}", lookup), "-a${LOOP}b");
        assert_eq!(resolve_with("open ${UNCLOSED", lookup), "open ${UNCLOSED");
    }

    #[test]
    fn default_config() {
        let config = PathwayConfig::default();
        assert_eq!(config.bind_addr, "0.0.0.0:8000");
        assert_eq!(config.database_path, PathBuf::from("./career_guidance.db"));
        assert!(config.admin_secret.is_none());
        assert_eq!(config.validation_policy(), ValidationPolicy::Permissive);
        assert_eq!(config.branding.institution, "SOPHIA ACADEMY");
    }

    #[test]
    fn parse_full_config() {
        let toml_str = r#"
bind_addr = "127.0.0.1:9000"
database_path = "/var/lib/pathway/scores.db"
admin_secret = "s3cret"
strict_validation = true

[branding]
institution = "ST. JOSEPH'S"
"#;
        let config = parse_config(toml_str).unwrap();
        assert_eq!(config.bind_addr, "127.0.0.1:9000");
        assert_eq!(config.admin_secret.as_deref(), Some("s3cret"));
        assert_eq!(config.validation_policy(), ValidationPolicy::Strict);
        assert_eq!(config.branding.institution, "ST. JOSEPH'S");
        assert_eq!(config.branding.report_title, "SSLC Career Guidance Report");
    }

    #[test]
    fn unset_secret_reference_disables_login() {
        let config = parse_config(r#"admin_secret = "${_PATHWAY_UNSET_SECRET_VAR}""#).unwrap();
        assert!(config.admin_secret.is_none());
    }

    #[test]
    fn env_overrides_win() {
        let mut config = parse_config(r#"admin_secret = "from-file""#).unwrap();
        apply_env_overrides(&mut config, |key| match key {
            "PATHWAY_ADMIN_SECRET" => Some("from-env".into()),
            "PATHWAY_DATABASE" => Some("/tmp/other.db".into()),
            _ => None,
        });
        assert_eq!(config.admin_secret.as_deref(), Some("from-env"));
        assert_eq!(config.database_path, PathBuf::from("/tmp/other.db"));
        assert_eq!(config.bind_addr, "0.0.0.0:8000");
    }

    #[test]
    fn debug_masks_secret() {
        let config = parse_config(r#"admin_secret = "hunter2""#).unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("***"));
    }

    #[test]
    fn explicit_missing_path_is_error() {
        let err = load_config_from(Some(Path::new("/nonexistent/pathway.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }
}
