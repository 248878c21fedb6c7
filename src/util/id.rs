//! Conversions between Discord snowflakes and their stored representation.
//!
//! Snowflakes are unsigned 64-bit values while the schema stores them in signed
//! `BIGINT` columns. Every id crossing the repository boundary goes through these helpers.

use crate::error::{internal::InternalError, AppError};

/// Converts a Discord id into the signed value stored in the database.
///
/// # Returns
/// - `Ok(i64)` - The id as stored
/// - `Err(AppError::InternalErr(IdOutOfRange))` - The id exceeds `i64::MAX`
pub fn to_db_id(value: u64) -> Result<i64, AppError> {
    let id = i64::try_from(value).map_err(|e| InternalError::IdOutOfRange { value, source: e })?;

    Ok(id)
}

/// Converts a stored id back into a Discord id.
///
/// # Returns
/// - `Ok(u64)` - The Discord id
/// - `Err(AppError::InternalErr(NegativeStoredId))` - The stored value is negative
pub fn from_db_id(value: i64) -> Result<u64, AppError> {
    let id =
        u64::try_from(value).map_err(|e| InternalError::NegativeStoredId { value, source: e })?;

    Ok(id)
}
