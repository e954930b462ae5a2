//! App (tenant) policy records.

use serde::Deserialize;

/// Policy record for a calling application.
///
/// The implicit "public" app serves requests that carry no API key and must
/// never have one configured.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Label used in logs and the admin CLI.
    pub name: String,
    pub enabled: bool,
    pub api_key: String,
    /// Domains this app may create links under. The first one is the default.
    pub allowed_domains: Vec<String>,
    /// Inclusive lower bound on the requested TTL, `0` means unbounded.
    pub min_duration_sec: u64,
    /// Inclusive upper bound on the requested TTL, `0` means unbounded.
    pub max_duration_sec: u64,
}

impl AppConfig {
    /// Name for log lines, falling back to a fixed label for unnamed apps.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            if self.api_key.is_empty() {
                "public"
            } else {
                "unnamed"
            }
        } else {
            &self.name
        }
    }

    pub fn default_domain(&self) -> Option<&str> {
        self.allowed_domains.first().map(String::as_str)
    }

    pub fn allows_domain(&self, domain: &str) -> bool {
        self.allowed_domains
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(domain))
    }
}

/// Contents of the apps configuration file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppsConfig {
    /// App used for requests without an API key. Absent means anonymous
    /// requests are rejected.
    pub public: Option<AppConfig>,
    pub apps: Vec<AppConfig>,
}
