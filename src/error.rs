use thiserror::Error;

use crate::math::MatrixError;

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("model {model}: triangle {triangle} references vertex {index}, but only {vertex_count} exist")]
    InvalidIndex {
        model: String,
        triangle: usize,
        index: usize,
        vertex_count: usize,
    },
    #[error("instance refers to unknown model {0:?}")]
    UnknownModel(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Config(#[from] ron::error::SpannedError),
    #[error("config serialize error: {0}")]
    Serialize(#[from] ron::Error),
    #[error("failed to load OBJ: {0}")]
    Obj(#[from] tobj::LoadError),
    #[error("failed to write image: {0}")]
    Image(#[from] image::ImageError),
    #[error(transparent)]
    Matrix(#[from] MatrixError),
    #[error(transparent)]
    Scene(#[from] SceneError),
}

pub type Result<T> = std::result::Result<T, Error>;
