use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum GlobalConfigError {
    #[error("missing required global config field: {0}")]
    MissingField(&'static str),
}

/// Which storage backend handles uploads. Only `Local` is implemented;
/// the other selectors fall back to local with a warning at bootstrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageProviderKind {
    Local,
    S3,
    Minio,
}

impl StorageProviderKind {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "local" => Some(Self::Local),
            "s3" => Some(Self::S3),
            "minio" => Some(Self::Minio),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::S3 => "s3",
            Self::Minio => "minio",
        }
    }
}

/// Final, merged global configuration used by the running process.
///
/// Merge order (after DB connection): CLI > ENV > DB, then persist back to DB.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalConfig {
    pub host: String,
    pub port: u16,
    /// HS256 signing secret for session and API-key JWTs.
    pub jwt_secret: String,
    /// Database DSN used for this process.
    pub dsn: String,
    /// Base URL used to build public file URLs.
    pub base_url: String,
    /// Allowed CORS origin; empty means same-origin only.
    #[serde(default)]
    pub cors_origin: Option<String>,
    /// Root directory for uploaded files.
    #[serde(default)]
    pub uploads_dir: String,
    pub storage_provider: StorageProviderKind,
}

/// Optional layer used for merging global config.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalConfigPatch {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub jwt_secret: Option<String>,
    pub dsn: Option<String>,
    pub base_url: Option<String>,
    pub cors_origin: Option<String>,
    pub uploads_dir: Option<String>,
    pub storage_provider: Option<StorageProviderKind>,
}

impl GlobalConfigPatch {
    pub fn overlay(&mut self, other: GlobalConfigPatch) {
        if other.host.is_some() {
            self.host = other.host;
        }
        if other.port.is_some() {
            self.port = other.port;
        }
        if other.jwt_secret.is_some() {
            self.jwt_secret = other.jwt_secret;
        }
        if other.dsn.is_some() {
            self.dsn = other.dsn;
        }
        if other.base_url.is_some() {
            self.base_url = other.base_url;
        }
        if other.cors_origin.is_some() {
            self.cors_origin = other.cors_origin;
        }
        if other.uploads_dir.is_some() {
            self.uploads_dir = other.uploads_dir;
        }
        if other.storage_provider.is_some() {
            self.storage_provider = other.storage_provider;
        }
    }

    pub fn into_config(self) -> Result<GlobalConfig, GlobalConfigError> {
        Ok(GlobalConfig {
            host: self.host.unwrap_or_else(|| "0.0.0.0".to_string()),
            port: self.port.unwrap_or(3000),
            jwt_secret: self
                .jwt_secret
                .ok_or(GlobalConfigError::MissingField("jwt_secret"))?,
            dsn: self.dsn.ok_or(GlobalConfigError::MissingField("dsn"))?,
            base_url: self
                .base_url
                .unwrap_or_else(|| "http://localhost:3000".to_string()),
            cors_origin: self.cors_origin,
            uploads_dir: self.uploads_dir.unwrap_or_else(|| "uploads".to_string()),
            storage_provider: self.storage_provider.unwrap_or(StorageProviderKind::Local),
        })
    }
}

impl From<GlobalConfig> for GlobalConfigPatch {
    fn from(value: GlobalConfig) -> Self {
        Self {
            host: Some(value.host),
            port: Some(value.port),
            jwt_secret: Some(value.jwt_secret),
            dsn: Some(value.dsn),
            base_url: Some(value.base_url),
            cors_origin: value.cors_origin,
            uploads_dir: Some(value.uploads_dir),
            storage_provider: Some(value.storage_provider),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_patch() -> GlobalConfigPatch {
        GlobalConfigPatch {
            host: Some("127.0.0.1".into()),
            port: Some(8080),
            jwt_secret: Some("secret".into()),
            dsn: Some("sqlite::memory:".into()),
            base_url: Some("http://cms.local".into()),
            cors_origin: None,
            uploads_dir: Some("uploads".into()),
            storage_provider: Some(StorageProviderKind::Local),
        }
    }

    #[test]
    fn overlay_prefers_other_layer() {
        let mut base = full_patch();
        base.overlay(GlobalConfigPatch {
            port: Some(9090),
            ..Default::default()
        });
        let config = base.into_config().unwrap();
        assert_eq!(config.port, 9090);
        assert_eq!(config.host, "127.0.0.1");
    }

    #[test]
    fn missing_secret_is_an_error() {
        let mut patch = full_patch();
        patch.jwt_secret = None;
        assert!(patch.into_config().is_err());
    }

    #[test]
    fn provider_parse() {
        assert_eq!(
            StorageProviderKind::parse("S3"),
            Some(StorageProviderKind::S3)
        );
        assert_eq!(StorageProviderKind::parse("gcs"), None);
    }
}
