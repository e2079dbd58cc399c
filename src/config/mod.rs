//! Environment-backed configuration.
//!
//! Most settings have defaults. Override with `SIGDETECT_*` environment variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::net::IpAddr;
use std::path::PathBuf;
use std::str::FromStr;

use crate::constants::{
    DEFAULT_MAX_IMAGE_PIXELS, DEFAULT_MODEL_FILE, DEFAULT_NO_SIGNATURE_CONFIDENCE, is_probability,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Where target images are acquired from.
pub enum StorageProvider {
    #[default]
    /// S3 bucket, via the `aws` CLI.
    S3,
    /// Local directory tree rooted at [`Config::local_root`].
    Local,
}

impl std::str::FromStr for StorageProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "s3" | "aws" => Ok(Self::S3),
            "local" | "fs" => Ok(Self::Local),
            _ => Err(format!("Unknown storage provider: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// How failure reports are delivered.
pub enum NotifierKind {
    #[default]
    /// Structured log event only.
    Log,
    /// SNS topic publish, via the `aws` CLI.
    Sns,
    /// JSON POST to an HTTP endpoint.
    Webhook,
}

impl std::str::FromStr for NotifierKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "log" | "none" => Ok(Self::Log),
            "sns" => Ok(Self::Sns),
            "webhook" | "http" => Ok(Self::Webhook),
            _ => Err(format!("Unknown notifier: {}", s)),
        }
    }
}

/// Service configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `SIGDETECT_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `8080`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// Log filter used when `RUST_LOG` is unset. Default: `info`.
    pub log_level: String,

    /// Storage location identifier (bucket name for S3).
    pub file_bucket: String,

    /// Acquisition backend. Default: S3.
    pub storage_provider: StorageProvider,

    /// Root directory for the local storage provider. Default: `./.data`.
    pub local_root: PathBuf,

    /// Directory that acquired targets are written to.
    pub scratch_dir: PathBuf,

    /// Notification channel identifier (topic ARN or webhook URL).
    pub notify_channel: Option<String>,

    /// Notification backend. Default: log only.
    pub notifier: NotifierKind,

    /// Confidence reported when no signature region is proposed. Default: `0.9`.
    pub no_signature_confidence: f32,

    /// Path to the trained model artifact. Default: `./model.onnx`.
    pub model_path: PathBuf,

    /// Run the engine in stub mode (no model file required).
    pub stub_model: bool,

    /// Largest accepted image, in pixels.
    pub max_image_pixels: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            log_level: "info".to_string(),
            file_bucket: String::new(),
            storage_provider: StorageProvider::default(),
            local_root: PathBuf::from("./.data"),
            scratch_dir: env::temp_dir().join("sigdetect"),
            notify_channel: None,
            notifier: NotifierKind::default(),
            no_signature_confidence: DEFAULT_NO_SIGNATURE_CONFIDENCE,
            model_path: PathBuf::from(DEFAULT_MODEL_FILE),
            stub_model: false,
            max_image_pixels: DEFAULT_MAX_IMAGE_PIXELS,
        }
    }
}

impl Config {
    const ENV_PORT: &'static str = "SIGDETECT_PORT";
    const ENV_BIND_ADDR: &'static str = "SIGDETECT_BIND_ADDR";
    const ENV_LOG_LEVEL: &'static str = "SIGDETECT_LOG_LEVEL";
    const ENV_FILE_BUCKET: &'static str = "SIGDETECT_FILE_BUCKET";
    const ENV_STORAGE_PROVIDER: &'static str = "SIGDETECT_STORAGE_PROVIDER";
    const ENV_LOCAL_ROOT: &'static str = "SIGDETECT_LOCAL_ROOT";
    const ENV_SCRATCH_DIR: &'static str = "SIGDETECT_SCRATCH_DIR";
    const ENV_NOTIFY_CHANNEL: &'static str = "SIGDETECT_NOTIFY_CHANNEL";
    const ENV_NOTIFIER: &'static str = "SIGDETECT_NOTIFIER";
    const ENV_NO_SIGNATURE_CONFIDENCE: &'static str = "SIGDETECT_NO_SIGNATURE_CONFIDENCE";
    const ENV_MODEL_PATH: &'static str = "SIGDETECT_MODEL_PATH";
    const ENV_STUB_MODEL: &'static str = "SIGDETECT_STUB_MODEL";
    const ENV_MAX_IMAGE_PIXELS: &'static str = "SIGDETECT_MAX_IMAGE_PIXELS";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let log_level = Self::parse_string_from_env(Self::ENV_LOG_LEVEL, defaults.log_level);
        let file_bucket = Self::parse_string_from_env(Self::ENV_FILE_BUCKET, defaults.file_bucket);
        let storage_provider =
            Self::parse_choice_from_env(Self::ENV_STORAGE_PROVIDER, defaults.storage_provider)?;
        let local_root = Self::parse_path_from_env(Self::ENV_LOCAL_ROOT, defaults.local_root);
        let scratch_dir = Self::parse_path_from_env(Self::ENV_SCRATCH_DIR, defaults.scratch_dir);
        let notify_channel = Self::parse_optional_string_from_env(Self::ENV_NOTIFY_CHANNEL);
        let notifier = Self::parse_choice_from_env(Self::ENV_NOTIFIER, defaults.notifier)?;
        let no_signature_confidence = Self::parse_number_from_env(
            Self::ENV_NO_SIGNATURE_CONFIDENCE,
            defaults.no_signature_confidence,
        )?;
        let model_path = Self::parse_path_from_env(Self::ENV_MODEL_PATH, defaults.model_path);
        let stub_model = Self::parse_bool_from_env(Self::ENV_STUB_MODEL, defaults.stub_model);
        let max_image_pixels =
            Self::parse_number_from_env(Self::ENV_MAX_IMAGE_PIXELS, defaults.max_image_pixels)?;

        Ok(Self {
            port,
            bind_addr,
            log_level,
            file_bucket,
            storage_provider,
            local_root,
            scratch_dir,
            notify_channel,
            notifier,
            no_signature_confidence,
            model_path,
            stub_model,
            max_image_pixels,
        })
    }

    /// Validates paths and provider requirements (does not create directories).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_probability(self.no_signature_confidence) {
            return Err(ConfigError::InvalidConfidence {
                value: self.no_signature_confidence,
            });
        }

        match self.storage_provider {
            StorageProvider::S3 if self.file_bucket.trim().is_empty() => {
                return Err(ConfigError::MissingEnvVar {
                    name: Self::ENV_FILE_BUCKET,
                });
            }
            StorageProvider::Local if self.local_root.exists() && !self.local_root.is_dir() => {
                return Err(ConfigError::NotADirectory {
                    path: self.local_root.clone(),
                });
            }
            _ => {}
        }

        if self.max_image_pixels == 0 {
            return Err(ConfigError::InvalidPixelLimit);
        }

        if self.notifier != NotifierKind::Log && self.notify_channel.is_none() {
            return Err(ConfigError::MissingEnvVar {
                name: Self::ENV_NOTIFY_CHANNEL,
            });
        }

        if self.scratch_dir.exists() && !self.scratch_dir.is_dir() {
            return Err(ConfigError::NotADirectory {
                path: self.scratch_dir.clone(),
            });
        }

        if !self.stub_model {
            if !self.model_path.exists() {
                return Err(ConfigError::PathNotFound {
                    path: self.model_path.clone(),
                });
            }
            if !self.model_path.is_file() {
                return Err(ConfigError::NotAFile {
                    path: self.model_path.clone(),
                });
            }
            if !cfg!(feature = "onnx") {
                return Err(ConfigError::BackendUnavailable);
            }
        }

        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_choice_from_env<T>(var_name: &'static str, default: T) -> Result<T, ConfigError>
    where
        T: std::str::FromStr,
    {
        match env::var(var_name) {
            Ok(value) if value.trim().is_empty() => Ok(default),
            Ok(value) => value.parse().map_err(|_| ConfigError::InvalidChoice {
                name: var_name,
                value,
            }),
            Err(_) => Ok(default),
        }
    }

    fn parse_path_from_env(var_name: &str, default: PathBuf) -> PathBuf {
        env::var(var_name).map(PathBuf::from).unwrap_or(default)
    }

    fn parse_optional_string_from_env(var_name: &str) -> Option<String> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        env::var(var_name).unwrap_or(default)
    }

    fn parse_bool_from_env(var_name: &str, default: bool) -> bool {
        env::var(var_name)
            .map(|s| s != "false" && s != "0")
            .unwrap_or(default)
    }

    fn parse_number_from_env<T: FromStr>(
        var_name: &'static str,
        default: T,
    ) -> Result<T, ConfigError> {
        match env::var(var_name) {
            Ok(value) if value.trim().is_empty() => Ok(default),
            Ok(value) => value.trim().parse().map_err(|_| ConfigError::InvalidNumber {
                name: var_name,
                value,
            }),
            Err(_) => Ok(default),
        }
    }
}
