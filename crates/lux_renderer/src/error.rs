//! Renderer errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to build render thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("failed to encode image: {0}")]
    Encode(#[from] image::ImageError),
}

pub type RenderResult<T> = Result<T, RenderError>;
