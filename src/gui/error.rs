use std::{error::Error, fmt::Display};

/// Anything that can go wrong while driving the terminal.
#[derive(Debug)]
pub enum QuadrantGuiError {
    #[allow(missing_docs)]
    IOError(std::io::Error),
    /// The board could not be opened.
    DeviceError(String, std::io::Error),
}

impl Display for QuadrantGuiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuadrantGuiError::IOError(e) => write!(f, "terminal io error: {}", e),
            QuadrantGuiError::DeviceError(device, e) => {
                write!(f, "could not open {}: {}", device, e)
            }
        }
    }
}

impl Error for QuadrantGuiError {}

impl From<std::io::Error> for QuadrantGuiError {
    fn from(value: std::io::Error) -> Self {
        Self::IOError(value)
    }
}
