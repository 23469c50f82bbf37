//! Errors raised by registers, tables and predictors.

/// Failure modes of the simulator.
///
/// Every one of these indicates a configuration bug on the caller's side,
/// so none of them are retried.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SimError {
    /// A bit-vector was assigned to a register or slot of a different width.
    #[error("length mismatch: expected {expected} bits, found {found}")]
    LengthMismatch { expected: usize, found: usize },

    /// An index fell outside the addressable range of a table.
    #[error("index {index} is out of range for a table with {size} entries")]
    InvalidIndex { index: usize, size: usize },

    /// The requested hash mode isn't implemented.
    #[error("unsupported hash mode '{0}'")]
    UnsupportedHashMode(String),

    /// A configured width is zero or too large to back with a dense table.
    #[error("invalid {name} width ({width} bits)")]
    InvalidWidth { name: &'static str, width: usize },
}

pub type Result<T> = std::result::Result<T, SimError>;

impl SimError {
    /// Fail with [SimError::LengthMismatch] unless `found == expected`.
    pub fn check_len(expected: usize, found: usize) -> Result<()> {
        if expected == found {
            Ok(())
        } else {
            Err(Self::LengthMismatch { expected, found })
        }
    }
}
