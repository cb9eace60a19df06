use config::{Config, ConfigError, Environment, File};
use dotenv::dotenv;
use serde::Deserialize;
use std::{env, fmt, str::FromStr};

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum AppEnvironment {
    Development,
    Production,
    Testing,
}

impl FromStr for AppEnvironment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" => Ok(AppEnvironment::Development),
            "production" => Ok(AppEnvironment::Production),
            "testing" => Ok(AppEnvironment::Testing),
            _ => Err(ConfigError::Message(format!("Invalid environment: {}", s))),
        }
    }
}

#[derive(Deserialize, Clone)]
#[serde(rename_all = "snake_case")]
pub struct AppConfig {
    #[serde(default = "default_env")]
    pub env: AppEnvironment,

    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_worker_count")]
    pub worker_count: usize,

    #[serde(default = "default_cors_origins")]
    pub cors_allowed_origins: Vec<String>,

    #[serde(default = "default_trust_forwarded")]
    pub trust_x_forwarded_for: bool,

    #[serde(default)]
    pub email: EmailConfig,
}

#[derive(Deserialize, Clone)]
#[serde(rename_all = "snake_case")]
pub struct EmailConfig {
    #[serde(default)]
    pub user: String,

    #[serde(default)]
    pub pass: String,

    /// Well-known provider name (e.g. "gmail"); takes precedence over `host`.
    #[serde(default)]
    pub service: Option<String>,

    #[serde(default = "default_smtp_host")]
    pub host: String,

    #[serde(default = "default_smtp_port")]
    pub port: u16,

    /// Implicit TLS on connect; false means STARTTLS upgrade.
    #[serde(default)]
    pub secure: bool,

    #[serde(default)]
    pub admin_email: String,

    #[serde(default = "default_from_name")]
    pub from_name: String,

    /// Overrides the contact confirmation subject when set.
    #[serde(default)]
    pub user_subject: Option<String>,
}

impl Default for EmailConfig {
    fn default() -> Self {
        EmailConfig {
            user: String::new(),
            pass: String::new(),
            service: None,
            host: default_smtp_host(),
            port: default_smtp_port(),
            secure: false,
            admin_email: String::new(),
            from_name: default_from_name(),
            user_subject: None,
        }
    }
}

impl EmailConfig {
    /// The relay host to connect to. A recognized `service` name wins over
    /// the configured host.
    pub fn resolved_host(&self) -> &str {
        match self.service.as_deref() {
            Some(s) if s.eq_ignore_ascii_case("gmail") => "smtp.gmail.com",
            Some(s) if s.eq_ignore_ascii_case("outlook") => "smtp-mail.outlook.com",
            _ => &self.host,
        }
    }
}

fn default_env() -> AppEnvironment {
    AppEnvironment::Development
}
fn default_name() -> String {
    "Formdesk-API".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_worker_count() -> usize {
    num_cpus::get()
}
fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}
fn default_trust_forwarded() -> bool {
    true
}
fn default_smtp_host() -> String {
    "smtp.gmail.com".to_string()
}
fn default_smtp_port() -> u16 {
    587
}
fn default_from_name() -> String {
    "Website Contact".to_string()
}

impl AppConfig {
    pub fn new() -> Result<Self, ConfigError> {
        dotenv().ok();

        let raw_env = env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let env_name = AppEnvironment::from_str(&raw_env)
            .map_err(|_| ConfigError::Message(format!("Invalid APP_ENV value: {}", raw_env)))?;

        let builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(
                File::with_name(&format!("config/{}", env_name.to_string().to_lowercase()))
                    .required(false),
            )
            .add_source(Environment::with_prefix("APP").separator("_").ignore_empty(true));

        let mut config: Self = builder.build()?.try_deserialize()?;

        config.env = env_name;

        // The mail settings ship as bare env vars, not under the APP_ prefix
        config.email.user = fill_or_env(config.email.user, "EMAIL_USER")?;
        config.email.pass = fill_or_env(config.email.pass, "EMAIL_PASS")?;
        config.email.admin_email = fill_or_env(config.email.admin_email, "ADMIN_EMAIL")?;
        config.email.host = env_override(config.email.host, "EMAIL_HOST");
        if config.email.service.is_none() {
            config.email.service = env::var("EMAIL_SERVICE").ok().filter(|s| !s.is_empty());
        }
        config.email.from_name = env_override(config.email.from_name, "EMAIL_FROM_NAME");
        if let Ok(port) = env::var("EMAIL_PORT") {
            config.email.port = port
                .parse()
                .map_err(|_| ConfigError::Message(format!("Invalid EMAIL_PORT: {}", port)))?;
        }
        if let Ok(secure) = env::var("EMAIL_SECURE") {
            config.email.secure = secure.eq_ignore_ascii_case("true");
        }
        if config.email.user_subject.is_none() {
            config.email.user_subject = env::var("USER_EMAIL_SUBJECT").ok();
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.email.user.trim().is_empty() {
            errors.push("EMAIL_USER cannot be empty");
        }
        if self.email.pass.is_empty() {
            errors.push("EMAIL_PASS cannot be empty");
        }
        if !self.email.admin_email.contains('@') {
            errors.push("ADMIN_EMAIL must be a valid address");
        }
        if self.is_production() && self.cors_origins().iter().any(|o| o == "*") {
            errors.push("Wildcard CORS (*) is not allowed in production");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Message(errors.join(", ")))
        }
    }

    pub fn is_production(&self) -> bool {
        self.env == AppEnvironment::Production
    }

    pub fn cors_origins(&self) -> Vec<String> {
        self.cors_allowed_origins
            .iter()
            .flat_map(|origin| origin.split(','))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

fn fill_or_env(current: String, env_key: &str) -> Result<String, ConfigError> {
    if current.trim().is_empty() {
        env::var(env_key).map_err(|_| ConfigError::Message(format!("{env_key} must be set")))
    } else {
        Ok(current)
    }
}

fn env_override(current: String, env_key: &str) -> String {
    match env::var(env_key) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => current,
    }
}

impl fmt::Display for AppEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AppEnvironment::Development => "development",
            AppEnvironment::Production => "production",
            AppEnvironment::Testing => "testing",
        };
        write!(f, "{s}")
    }
}

trait Redact {
    fn redact(&self) -> &str;
}

impl Redact for str {
    fn redact(&self) -> &str {
        if self.is_empty() {
            "[MISSING]"
        } else {
            "[REDACTED]"
        }
    }
}

impl Redact for String {
    fn redact(&self) -> &str {
        self.as_str().redact()
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("name", &self.name)
            .field("port", &self.port)
            .field("host", &self.host)
            .field("worker_count", &self.worker_count)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("trust_x_forwarded_for", &self.trust_x_forwarded_for)
            .field("email", &self.email)
            .finish()
    }
}

impl fmt::Debug for EmailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailConfig")
            .field("user", &self.user)
            .field("pass", &self.pass.redact())
            .field("service", &self.service)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("secure", &self.secure)
            .field("admin_email", &self.admin_email)
            .field("from_name", &self.from_name)
            .field("user_subject", &self.user_subject)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cors_origins_splits_comma_separated_entries() {
        let config = AppConfig {
            env: AppEnvironment::Testing,
            name: default_name(),
            port: default_port(),
            host: default_host(),
            worker_count: 1,
            cors_allowed_origins: vec!["https://a.example, https://b.example".to_string()],
            trust_x_forwarded_for: true,
            email: EmailConfig::default(),
        };

        assert_eq!(
            config.cors_origins(),
            vec!["https://a.example".to_string(), "https://b.example".to_string()]
        );
    }

    #[test]
    fn validate_rejects_missing_credentials() {
        let config = AppConfig {
            env: AppEnvironment::Development,
            name: default_name(),
            port: default_port(),
            host: default_host(),
            worker_count: 1,
            cors_allowed_origins: default_cors_origins(),
            trust_x_forwarded_for: true,
            email: EmailConfig::default(),
        };

        let err = config.validate().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("EMAIL_USER"));
        assert!(message.contains("EMAIL_PASS"));
    }

    #[test]
    fn known_service_name_overrides_host() {
        let mut email = EmailConfig::default();
        email.host = "smtp.example.com".into();
        assert_eq!(email.resolved_host(), "smtp.example.com");

        email.service = Some("Gmail".into());
        assert_eq!(email.resolved_host(), "smtp.gmail.com");
    }

    #[test]
    fn debug_redacts_password() {
        let config = EmailConfig {
            user: "mailer@example.com".into(),
            pass: "hunter2hunter2".into(),
            admin_email: "admin@example.com".into(),
            ..EmailConfig::default()
        };

        let debugged = format!("{:?}", config);
        assert!(!debugged.contains("hunter2"));
        assert!(debugged.contains("[REDACTED]"));
    }
}
