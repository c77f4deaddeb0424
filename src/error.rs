use thiserror::Error;

#[derive(Error, Debug)]
pub enum GuidanceError {
    #[error("Invalid coordinate: latitude {latitude}, longitude {longitude}")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Sensor stream closed: {0}")]
    StreamClosed(String),
}

pub type Result<T> = std::result::Result<T, GuidanceError>;
