//! Crate error type
//!
//! The simulation itself cannot fail; these cover configuration parsing and
//! platform/renderer setup.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid value for `{key}`: {value}")]
    InvalidParam { key: &'static str, value: String },
    #[error("Browser object unavailable: {0}")]
    MissingBrowserObject(&'static str),
    #[error("No suitable graphics adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),
    #[error("Failed to create device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("Failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("Surface is not compatible with the adapter")]
    IncompatibleSurface,
}
