//! Store Entry Module
//!
//! Defines what the in-process store keeps under each key.

use crate::error::{Result, StoreError};

// == Entry ==
/// A single key's contents: a string value or a list of values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// Plain value written by SET or INCR
    Bytes(Vec<u8>),
    /// List built up by RPUSH
    List(Vec<Vec<u8>>),
}

impl Entry {
    // == As Bytes ==
    /// Returns the string value, or a wrong-type error for lists.
    pub fn as_bytes(&self, key: &str) -> Result<&[u8]> {
        match self {
            Entry::Bytes(b) => Ok(b),
            Entry::List(_) => Err(StoreError::WrongType(key.to_string())),
        }
    }

    // == As List ==
    /// Returns the list value, or a wrong-type error for strings.
    pub fn as_list(&self, key: &str) -> Result<&[Vec<u8>]> {
        match self {
            Entry::List(items) => Ok(items),
            Entry::Bytes(_) => Err(StoreError::WrongType(key.to_string())),
        }
    }

    /// Returns the list value mutably, or a wrong-type error for strings.
    pub fn as_list_mut(&mut self, key: &str) -> Result<&mut Vec<Vec<u8>>> {
        match self {
            Entry::List(items) => Ok(items),
            Entry::Bytes(_) => Err(StoreError::WrongType(key.to_string())),
        }
    }

    // == As Integer ==
    /// Parses the string value as a signed decimal integer.
    pub fn as_integer(&self, key: &str) -> Result<i64> {
        let bytes = self.as_bytes(key)?;
        std::str::from_utf8(bytes)
            .ok()
            .and_then(|s| s.parse::<i64>().ok())
            .ok_or_else(|| {
                StoreError::Conversion(format!("value at '{key}' is not an integer"))
            })
    }
}
