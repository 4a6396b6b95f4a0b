use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeometryError {
    #[error("Container has no usable area: {width}x{height}")]
    EmptyContainer { width: f64, height: f64 },

    #[error("Image has no usable intrinsic size: {width}x{height}")]
    EmptyImage { width: f64, height: f64 },
}

pub type Result<T> = std::result::Result<T, GeometryError>;
