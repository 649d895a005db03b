//! Error type for RUT validation.

use thiserror::Error;

use crate::CheckDigit;

/// Why an input was rejected.
///
/// Diagnostic only: every rejection surfaces as the same [`InvalidFormat`]
/// error with the same message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The input is empty.
    Empty,

    /// The input has no hyphen.
    MissingSeparator,

    /// The input has more than one hyphen.
    MultipleSeparators,

    /// The hyphen is not immediately before the last character.
    MisplacedSeparator,

    /// The root is empty, contains a non-digit, or overflows.
    InvalidRoot,

    /// The last character is neither a digit nor `K`.
    InvalidCheckCharacter,

    /// The supplied check character does not match the root.
    CheckDigitMismatch { expected: CheckDigit },
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rejection::Empty => f.write_str("input is empty"),
            Rejection::MissingSeparator => f.write_str("missing hyphen before check character"),
            Rejection::MultipleSeparators => f.write_str("more than one hyphen"),
            Rejection::MisplacedSeparator => {
                f.write_str("hyphen must be immediately before the check character")
            }
            Rejection::InvalidRoot => f.write_str("root is not a decimal number"),
            Rejection::InvalidCheckCharacter => f.write_str("check character must be 0-9 or K"),
            Rejection::CheckDigitMismatch { expected } => {
                write!(f, "check character does not match, expected '{expected}'")
            }
        }
    }
}

/// The input is not a valid RUT.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("Invalid Rut")]
pub struct InvalidFormat {
    reason: Rejection,
}

impl InvalidFormat {
    pub(crate) const fn new(reason: Rejection) -> Self {
        Self { reason }
    }

    /// Returns the diagnostic reason for the rejection.
    #[must_use]
    pub const fn reason(&self) -> Rejection {
        self.reason
    }

    /// Returns true if the input failed the structural hyphen check.
    pub fn is_structural(&self) -> bool {
        matches!(
            self.reason,
            Rejection::Empty
                | Rejection::MissingSeparator
                | Rejection::MultipleSeparators
                | Rejection::MisplacedSeparator
        )
    }
}
