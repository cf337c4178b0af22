//! Configuration module
//!
//! Configuration for the HTTP server (`Config`) and for the asset migration CLI
//! (`MigrationConfig`). Both are read from the environment, with `.env` loaded
//! through dotenvy first. Parsing goes through a lookup function so the same code
//! path can be driven from a map in tests.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::storage_types::StorageBackend;

// Common constants
const SERVER_PORT: u16 = 4000;
const MAX_CONNECTIONS: u32 = 10;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const SMTP_PORT: u16 = 587;
const EMAIL_MX_TIMEOUT_MS: u64 = 3000;
const UPLOAD_CONCURRENCY: usize = 4;

fn env_lookup(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn non_empty<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    lookup(key)
        .and_then(|s| s.trim().to_lowercase().parse().ok())
        .unwrap_or(default)
}

fn is_production_env(environment: &str) -> bool {
    let environment = environment.to_lowercase();
    environment == "production" || environment == "prod"
}

/// HTTP server configuration
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub server_port: u16,
    pub environment: String,
    pub cors_origins: Vec<String>,
    pub database_url: String,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    // Email address validation
    pub email_mx_check_enabled: bool,
    pub email_mx_timeout_ms: u64,
    // Contact notifications
    pub smtp_host: Option<String>,
    pub smtp_port: u16,
    pub smtp_user: Option<String>,
    pub smtp_password: Option<String>,
    pub smtp_from: Option<String>,
    pub smtp_tls: bool,
    pub contact_notify_to: Vec<String>,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("ENVIRONMENT")
            .or_else(|| lookup("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let cors_origins = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:3000".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let server_port = match lookup("PORT") {
            Some(port) => port
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            None => SERVER_PORT,
        };

        let database_url = non_empty(&lookup, "DATABASE_URL")
            .ok_or_else(|| anyhow::anyhow!("DATABASE_URL must be set"))?;

        let config = ServerConfig {
            server_port,
            environment,
            cors_origins,
            database_url,
            db_max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", MAX_CONNECTIONS),
            db_timeout_seconds: parse_or(&lookup, "DB_TIMEOUT_SECONDS", CONNECTION_TIMEOUT_SECS),
            email_mx_check_enabled: parse_or(&lookup, "EMAIL_MX_CHECK_ENABLED", true),
            email_mx_timeout_ms: parse_or(&lookup, "EMAIL_MX_TIMEOUT_MS", EMAIL_MX_TIMEOUT_MS),
            smtp_host: non_empty(&lookup, "SMTP_HOST"),
            smtp_port: lookup("SMTP_PORT")
                .and_then(|s| s.trim().parse().ok())
                .filter(|&p| p > 0)
                .unwrap_or(SMTP_PORT),
            smtp_user: non_empty(&lookup, "SMTP_USER"),
            smtp_password: non_empty(&lookup, "SMTP_PASSWORD"),
            smtp_from: non_empty(&lookup, "SMTP_FROM"),
            smtp_tls: parse_or(&lookup, "SMTP_TLS", true),
            contact_notify_to: lookup("CONTACT_NOTIFY_TO")
                .unwrap_or_default()
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if !self.database_url.starts_with("postgres://")
            && !self.database_url.starts_with("postgresql://")
        {
            return Err(anyhow::anyhow!(
                "DATABASE_URL must be a valid PostgreSQL connection string"
            ));
        }

        if is_production_env(&self.environment) && self.cors_origins.iter().any(|o| o == "*") {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        if self.email_mx_timeout_ms == 0 {
            return Err(anyhow::anyhow!("EMAIL_MX_TIMEOUT_MS cannot be 0"));
        }

        if !self.contact_notify_to.is_empty()
            && (self.smtp_host.is_none() || self.smtp_from.is_none())
        {
            return Err(anyhow::anyhow!(
                "CONTACT_NOTIFY_TO requires SMTP_HOST and SMTP_FROM to be set"
            ));
        }

        Ok(())
    }
}

/// Application configuration (HTTP server).
#[derive(Clone, Debug)]
pub struct Config(pub Box<ServerConfig>);

impl Config {
    fn as_server(&self) -> &ServerConfig {
        &self.0
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        Ok(Config(Box::new(ServerConfig::from_env()?)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.as_server().validate()
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        is_production_env(&self.as_server().environment)
    }

    pub fn server_port(&self) -> u16 {
        self.as_server().server_port
    }

    pub fn environment(&self) -> &str {
        &self.as_server().environment
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.as_server().cors_origins
    }

    pub fn database_url(&self) -> &str {
        &self.as_server().database_url
    }

    pub fn db_max_connections(&self) -> u32 {
        self.as_server().db_max_connections
    }

    pub fn db_timeout_seconds(&self) -> u64 {
        self.as_server().db_timeout_seconds
    }

    pub fn email_mx_check_enabled(&self) -> bool {
        self.as_server().email_mx_check_enabled
    }

    pub fn email_mx_timeout_ms(&self) -> u64 {
        self.as_server().email_mx_timeout_ms
    }

    pub fn smtp_host(&self) -> Option<&str> {
        self.as_server().smtp_host.as_deref()
    }

    pub fn smtp_port(&self) -> u16 {
        self.as_server().smtp_port
    }

    pub fn smtp_user(&self) -> Option<&str> {
        self.as_server().smtp_user.as_deref()
    }

    pub fn smtp_password(&self) -> Option<&str> {
        self.as_server().smtp_password.as_deref()
    }

    pub fn smtp_from(&self) -> Option<&str> {
        self.as_server().smtp_from.as_deref()
    }

    pub fn smtp_tls(&self) -> bool {
        self.as_server().smtp_tls
    }

    pub fn contact_notify_to(&self) -> &[String] {
        &self.as_server().contact_notify_to
    }
}

/// Remote store configuration used by the asset uploader.
#[derive(Clone, Debug)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub s3_bucket: Option<String>,
    pub s3_region: Option<String>,
    /// Custom endpoint for S3-compatible providers (MinIO, R2, DigitalOcean Spaces, ...)
    pub s3_endpoint: Option<String>,
    pub aws_region: Option<String>,
    pub local_storage_path: Option<String>,
    pub local_storage_base_url: Option<String>,
    /// CDN origin placed in front of the bucket; replaces the backend URL when set.
    pub public_base_url: Option<String>,
}

impl StorageConfig {
    /// Parse without validating; only the upload phase needs a usable backend.
    pub fn from_lookup<F>(lookup: &F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend = match non_empty(lookup, "STORAGE_BACKEND") {
            Some(s) => s.parse()?,
            None => StorageBackend::S3,
        };

        let config = StorageConfig {
            backend,
            s3_bucket: non_empty(lookup, "S3_BUCKET"),
            s3_region: non_empty(lookup, "S3_REGION"),
            s3_endpoint: non_empty(lookup, "S3_ENDPOINT"),
            aws_region: non_empty(lookup, "AWS_REGION"),
            local_storage_path: non_empty(lookup, "LOCAL_STORAGE_PATH"),
            local_storage_base_url: non_empty(lookup, "LOCAL_STORAGE_BASE_URL"),
            public_base_url: non_empty(lookup, "ASSET_PUBLIC_BASE_URL"),
        };

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        match self.backend {
            StorageBackend::S3 => {
                if self.s3_bucket.is_none() {
                    return Err(anyhow::anyhow!(
                        "S3_BUCKET must be set when using S3 storage backend"
                    ));
                }
                if self.s3_region.is_none() && self.aws_region.is_none() {
                    return Err(anyhow::anyhow!(
                        "S3_REGION or AWS_REGION must be set when using S3 storage backend"
                    ));
                }
            }
            StorageBackend::Local => {
                if self.local_storage_path.is_none() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_PATH must be set when using local storage backend"
                    ));
                }
                if self.local_storage_base_url.is_none() && self.public_base_url.is_none() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_BASE_URL or ASSET_PUBLIC_BASE_URL must be set when using local storage backend"
                    ));
                }
            }
        }
        Ok(())
    }

    /// Region for S3, falling back to AWS_REGION.
    pub fn region(&self) -> Option<&str> {
        self.s3_region.as_deref().or(self.aws_region.as_deref())
    }
}

/// Asset migration configuration (upload, rewrite, cleanup phases).
#[derive(Clone, Debug)]
pub struct MigrationConfig {
    pub storage: StorageConfig,
    pub images_dir: PathBuf,
    pub videos_dir: PathBuf,
    pub project_root: PathBuf,
    pub asset_map_path: PathBuf,
    /// Directory name (not path) holding the migration scripts and map; never rewritten.
    pub scripts_dir: String,
    pub images_folder: String,
    pub videos_folder: String,
    pub upload_concurrency: usize,
}

impl MigrationConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let storage = StorageConfig::from_lookup(&lookup)?;

        let project_root = non_empty(&lookup, "MIGRATION_PROJECT_ROOT")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        let scripts_dir =
            non_empty(&lookup, "MIGRATION_SCRIPTS_DIR").unwrap_or_else(|| "scripts".to_string());

        let config = MigrationConfig {
            storage,
            images_dir: non_empty(&lookup, "MIGRATION_IMAGES_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| project_root.join("public").join("images")),
            videos_dir: non_empty(&lookup, "MIGRATION_VIDEOS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| project_root.join("public").join("video")),
            asset_map_path: non_empty(&lookup, "MIGRATION_ASSET_MAP_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| project_root.join(&scripts_dir).join("asset-map.json")),
            project_root,
            scripts_dir,
            images_folder: non_empty(&lookup, "MIGRATION_IMAGES_FOLDER")
                .unwrap_or_else(|| "website/images".to_string()),
            videos_folder: non_empty(&lookup, "MIGRATION_VIDEOS_FOLDER")
                .unwrap_or_else(|| "website/videos".to_string()),
            upload_concurrency: parse_or(&lookup, "MIGRATION_UPLOAD_CONCURRENCY", UPLOAD_CONCURRENCY),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.upload_concurrency == 0 {
            return Err(anyhow::anyhow!("MIGRATION_UPLOAD_CONCURRENCY cannot be 0"));
        }
        if self.scripts_dir.contains('/') || self.scripts_dir.contains('\\') {
            return Err(anyhow::anyhow!(
                "MIGRATION_SCRIPTS_DIR must be a directory name, not a path"
            ));
        }
        for folder in [&self.images_folder, &self.videos_folder] {
            if folder.contains("..") || folder.starts_with('/') {
                return Err(anyhow::anyhow!("Invalid remote folder: {}", folder));
            }
        }
        Ok(())
    }
}
