//! Error types for particle-field.
//!
//! This module provides error types for configuration validation, config
//! file loading, GPU initialization, and the window and snapshot hosts.

use std::fmt;

/// Errors found while validating a [`FieldConfig`](crate::FieldConfig).
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// `ease` must be strictly positive; it divides the remaining offset every frame.
    NonPositiveEase(f32),
    /// `staticity` must be strictly positive; it divides the pointer target.
    NonPositiveStaticity(f32),
    /// The base particle radius cannot be negative.
    NegativeSize(f32),
    /// A numeric option was NaN or infinite.
    NonFiniteValue {
        /// Name of the offending option.
        field: &'static str,
    },
    /// The color string is not a 3 or 6 digit hex color.
    InvalidColor(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NonPositiveEase(v) => write!(f, "ease must be greater than 0 (got {})", v),
            ConfigError::NonPositiveStaticity(v) => {
                write!(f, "staticity must be greater than 0 (got {})", v)
            }
            ConfigError::NegativeSize(v) => write!(f, "size must not be negative (got {})", v),
            ConfigError::NonFiniteValue { field } => write!(f, "{} must be a finite number", field),
            ConfigError::InvalidColor(s) => {
                write!(f, "Invalid color {:?}: expected #rgb or #rrggbb hex", s)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Errors that can occur while loading a configuration file.
#[derive(Debug)]
pub enum LoadError {
    /// Failed to read or write the file.
    Io(std::io::Error),
    /// The file is not valid configuration JSON.
    Json(serde_json::Error),
    /// The file parsed but holds an invalid configuration.
    Invalid(ConfigError),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(e) => write!(f, "Failed to access config file: {}", e),
            LoadError::Json(e) => write!(f, "Failed to parse config JSON: {}", e),
            LoadError::Invalid(e) => write!(f, "Invalid configuration: {}", e),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(e) => Some(e),
            LoadError::Json(e) => Some(e),
            LoadError::Invalid(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for LoadError {
    fn from(e: std::io::Error) -> Self {
        LoadError::Io(e)
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(e: serde_json::Error) -> Self {
        LoadError::Json(e)
    }
}

impl From<ConfigError> for LoadError {
    fn from(e: ConfigError) -> Self {
        LoadError::Invalid(e)
    }
}

/// Errors that can occur during GPU initialization.
#[derive(Debug)]
pub enum GpuError {
    /// Failed to create a surface for rendering.
    SurfaceCreation(wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    NoAdapter,
    /// Failed to create GPU device.
    DeviceCreation(wgpu::RequestDeviceError),
    /// The surface reports no texture formats for the chosen adapter.
    UnsupportedSurface,
}

impl fmt::Display for GpuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpuError::SurfaceCreation(e) => write!(f, "Failed to create GPU surface: {}", e),
            GpuError::NoAdapter => write!(f, "No compatible GPU adapter found. Ensure your system has a GPU with WebGPU/Vulkan/Metal/DX12 support."),
            GpuError::DeviceCreation(e) => write!(f, "Failed to create GPU device: {}", e),
            GpuError::UnsupportedSurface => {
                write!(f, "The window surface is not supported by the GPU adapter")
            }
        }
    }
}

impl std::error::Error for GpuError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GpuError::SurfaceCreation(e) => Some(e),
            GpuError::DeviceCreation(e) => Some(e),
            GpuError::NoAdapter | GpuError::UnsupportedSurface => None,
        }
    }
}

impl From<wgpu::CreateSurfaceError> for GpuError {
    fn from(e: wgpu::CreateSurfaceError) -> Self {
        GpuError::SurfaceCreation(e)
    }
}

impl From<wgpu::RequestDeviceError> for GpuError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        GpuError::DeviceCreation(e)
    }
}

/// Errors that can occur when running the windowed field.
#[derive(Debug)]
pub enum RunError {
    /// Failed to create event loop.
    EventLoop(winit::error::EventLoopError),
    /// Failed to create window.
    Window(winit::error::OsError),
    /// The field configuration was rejected.
    Config(ConfigError),
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunError::EventLoop(e) => write!(f, "Failed to create event loop: {}", e),
            RunError::Window(e) => write!(f, "Failed to create window: {}", e),
            RunError::Config(e) => write!(f, "Invalid configuration: {}", e),
        }
    }
}

impl std::error::Error for RunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RunError::EventLoop(e) => Some(e),
            RunError::Window(e) => Some(e),
            RunError::Config(e) => Some(e),
        }
    }
}

impl From<winit::error::EventLoopError> for RunError {
    fn from(e: winit::error::EventLoopError) -> Self {
        RunError::EventLoop(e)
    }
}

impl From<winit::error::OsError> for RunError {
    fn from(e: winit::error::OsError) -> Self {
        RunError::Window(e)
    }
}

impl From<ConfigError> for RunError {
    fn from(e: ConfigError) -> Self {
        RunError::Config(e)
    }
}

/// Errors that can occur while rendering a headless snapshot.
#[derive(Debug)]
pub enum SnapshotError {
    /// Failed to encode or write the image.
    Image(image::ImageError),
    /// The field configuration was rejected.
    Config(ConfigError),
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::Image(e) => write!(f, "Failed to write snapshot: {}", e),
            SnapshotError::Config(e) => write!(f, "Invalid configuration: {}", e),
        }
    }
}

impl std::error::Error for SnapshotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SnapshotError::Image(e) => Some(e),
            SnapshotError::Config(e) => Some(e),
        }
    }
}

impl From<image::ImageError> for SnapshotError {
    fn from(e: image::ImageError) -> Self {
        SnapshotError::Image(e)
    }
}

impl From<ConfigError> for SnapshotError {
    fn from(e: ConfigError) -> Self {
        SnapshotError::Config(e)
    }
}
