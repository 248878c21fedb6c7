use std::num::TryFromIntError;
use thiserror::Error;

/// Internal issues with the codebase indicating unexpected behavior & possible bugs
#[derive(Error, Debug)]
pub enum InternalError {
    /// A Discord snowflake does not fit into the signed column it is stored in.
    #[error("Discord ID {value} cannot be stored as a signed 64-bit integer: {source}")]
    IdOutOfRange {
        /// The id that failed to convert
        value: u64,
        #[source]
        source: TryFromIntError,
    },

    /// A stored id is negative and cannot be a Discord snowflake.
    #[error("Stored ID {value} is not a valid Discord ID: {source}")]
    NegativeStoredId {
        /// The stored value that failed to convert
        value: i64,
        #[source]
        source: TryFromIntError,
    },
}
