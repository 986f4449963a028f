use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocketError {
    /// Establishing a client connection failed even after retrying.
    ///
    /// `attempts` is the number of retries performed after the initial
    /// try; `message` is the driver's description of the last failure.
    #[error("MongoDB connection failed after {attempts} attempts: {message}")]
    Connection { attempts: u32, message: String },

    #[error("Driver error: {0}")]
    Driver(#[from] mongodb::error::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] bson::ser::Error),

    #[error("Deserialization error: {0}")]
    Deserialize(#[from] bson::de::Error),
}

pub type Result<T> = std::result::Result<T, DocketError>;
