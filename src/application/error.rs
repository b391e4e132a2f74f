use thiserror::Error;

use crate::{
    application::preview::ConvertError, config::LoadError, infra::error::InfraError,
    presentation::page::PageRenderError,
};

/// Top-level application error surfaced by the binary.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] LoadError),
    #[error(transparent)]
    Infra(#[from] InfraError),
    #[error("notebook conversion failed: {0}")]
    Convert(#[from] ConvertError),
    #[error("page rendering failed: {0}")]
    Page(#[from] PageRenderError),
    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
