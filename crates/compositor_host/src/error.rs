// SPDX-License-Identifier: MIT OR Apache-2.0
//! Host binding errors.

use thiserror::Error;

/// Faults raised by a host while binding scene properties
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    /// A property with this key is already registered
    #[error("Property already registered: {0}")]
    AlreadyRegistered(String),

    /// No property with this key is registered
    #[error("Property not registered: {0}")]
    NotRegistered(String),

    /// The host refused the operation
    #[error("Host rejected operation: {0}")]
    Rejected(String),
}

/// Result type for host operations
pub type Result<T> = std::result::Result<T, HostError>;
