//! The validated, normalized RUT.

use crate::error::{InvalidFormat, Rejection};
use crate::CheckDigit;

/// A validated RUT in normalized form.
///
/// The normalized text is the input uppercased with every `.` and the hyphen
/// removed: the root digits followed by one check character. Equality,
/// ordering and hashing follow that text.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rut {
    normalized: String,
    root: u64,
    check_digit: CheckDigit,
}

impl Rut {
    /// Validates `input` and returns its normalized form.
    ///
    /// The hyphen check runs before any normalization or arithmetic, so a
    /// malformed string never reaches the numeric path.
    pub fn parse(input: &str) -> Result<Self, InvalidFormat> {
        let reject = |reason| Err(InvalidFormat::new(reason));

        if input.is_empty() {
            return reject(Rejection::Empty);
        }

        match input.matches('-').count() {
            0 => return reject(Rejection::MissingSeparator),
            1 => {}
            _ => return reject(Rejection::MultipleSeparators),
        }

        let len = input.chars().count();
        let hyphen_at = input.chars().position(|c| c == '-');
        if hyphen_at.map(|at| at + 2) != Some(len) {
            return reject(Rejection::MisplacedSeparator);
        }

        let normalized: String = input
            .to_uppercase()
            .chars()
            .filter(|c| *c != '.' && *c != '-')
            .collect();

        let mut chars = normalized.chars();
        let Some(check_char) = chars.next_back() else {
            return reject(Rejection::InvalidRoot);
        };
        let root_text = chars.as_str();

        if root_text.is_empty() || !root_text.bytes().all(|b| b.is_ascii_digit()) {
            return reject(Rejection::InvalidRoot);
        }
        let Ok(root) = root_text.parse::<u64>() else {
            return reject(Rejection::InvalidRoot);
        };

        let Some(supplied) = CheckDigit::from_char(check_char) else {
            return reject(Rejection::InvalidCheckCharacter);
        };

        let expected = CheckDigit::compute(root);
        if supplied != expected {
            return reject(Rejection::CheckDigitMismatch { expected });
        }

        Ok(Self {
            normalized,
            root,
            check_digit: expected,
        })
    }

    /// Builds the RUT for a root, computing its check digit.
    #[must_use]
    pub fn from_root(root: u64) -> Self {
        let check_digit = CheckDigit::compute(root);
        Self {
            normalized: format!("{root}{check_digit}"),
            root,
            check_digit,
        }
    }

    /// Returns the normalized text, e.g. `157225200`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.normalized
    }

    /// Returns the numeric root.
    #[must_use]
    pub const fn root(&self) -> u64 {
        self.root
    }

    #[must_use]
    pub const fn check_digit(&self) -> CheckDigit {
        self.check_digit
    }

    /// Returns the root digits exactly as they appear in the normalized text.
    fn root_digits(&self) -> &str {
        // normalized is ASCII and ends in exactly one check character
        &self.normalized[..self.normalized.len() - 1]
    }

    /// Formats as `15722520-0`.
    #[must_use]
    pub fn hyphenated(&self) -> String {
        format!("{}-{}", self.root_digits(), self.check_digit)
    }

    /// Formats with thousands separators, e.g. `15.722.520-0`.
    #[must_use]
    pub fn dotted(&self) -> String {
        let digits = self.root_digits();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 2);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push('.');
            }
            out.push(c);
        }
        out.push('-');
        out.push(self.check_digit.as_char());
        out
    }
}

/// Returns true if `input` is a valid RUT.
pub fn is_valid(input: &str) -> bool {
    Rut::parse(input).is_ok()
}

impl std::fmt::Display for Rut {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.normalized)
    }
}

impl std::str::FromStr for Rut {
    type Err = InvalidFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Rut {
    fn as_ref(&self) -> &str {
        &self.normalized
    }
}

impl serde::Serialize for Rut {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.normalized)
    }
}

impl<'de> serde::Deserialize<'de> for Rut {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let parsed = match stored_form(&s) {
            Some((root, check)) => Self::parse(&format!("{root}-{check}")),
            None => Self::parse(&s),
        };
        parsed.map_err(serde::de::Error::custom)
    }
}

/// Splits a normalized value (root digits then one check character) into
/// its parts. Anything with separators is left to [`Rut::parse`].
fn stored_form(s: &str) -> Option<(&str, &str)> {
    let (root, check) = s.split_at_checked(s.len().checked_sub(1)?)?;
    let normalized = !root.is_empty()
        && root.bytes().all(|b| b.is_ascii_digit())
        && matches!(check.as_bytes(), [b'0'..=b'9' | b'K']);
    normalized.then_some((root, check))
}

// =============================================================================
// Tests
// =============================================================================
