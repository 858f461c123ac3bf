use clap::Parser;

use quill_common::{GlobalConfigPatch, StorageProviderKind};

#[derive(Parser)]
#[command(name = "quill")]
pub(crate) struct Cli {
    #[arg(long, default_value = "")]
    pub(crate) dsn: String,
    #[arg(long, default_value = "")]
    pub(crate) data_dir: String,
    #[arg(long)]
    pub(crate) host: Option<String>,
    #[arg(long)]
    pub(crate) port: Option<u16>,
    #[arg(long)]
    pub(crate) jwt_secret: Option<String>,
    #[arg(long)]
    pub(crate) base_url: Option<String>,
    #[arg(long)]
    pub(crate) cors_origin: Option<String>,
    #[arg(long)]
    pub(crate) uploads_dir: Option<String>,
    #[arg(long)]
    pub(crate) storage_provider: Option<String>,
}

impl Cli {
    pub(crate) fn as_patch(&self) -> GlobalConfigPatch {
        GlobalConfigPatch {
            host: self.host.clone(),
            port: self.port,
            jwt_secret: self.jwt_secret.clone(),
            dsn: None,
            base_url: self.base_url.clone(),
            cors_origin: self.cors_origin.clone(),
            uploads_dir: self.uploads_dir.clone(),
            storage_provider: self
                .storage_provider
                .as_deref()
                .and_then(StorageProviderKind::parse),
        }
    }
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}

/// The ENV layer sits between DB-persisted config and CLI flags.
pub(crate) fn env_patch() -> GlobalConfigPatch {
    GlobalConfigPatch {
        host: env_value("QUILL_HOST"),
        port: env_value("QUILL_PORT").and_then(|value| value.parse().ok()),
        jwt_secret: env_value("QUILL_JWT_SECRET"),
        dsn: None,
        base_url: env_value("QUILL_BASE_URL"),
        cors_origin: env_value("QUILL_CORS_ORIGIN"),
        uploads_dir: env_value("QUILL_UPLOADS_DIR"),
        storage_provider: env_value("QUILL_STORAGE_PROVIDER")
            .as_deref()
            .and_then(StorageProviderKind::parse),
    }
}
