//! Modulo-11 check digit.

/// The check character of a RUT: a decimal digit or `K`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CheckDigit {
    /// A decimal digit, always in `0..=9`.
    Digit(u8),
    /// The letter `K`.
    K,
}

impl CheckDigit {
    /// Computes the check digit for a root.
    ///
    /// Digits are consumed least-significant first. Each one is weighted by
    /// `9 - (position mod 6)` and folded into an accumulator that starts at 1
    /// and stays reduced modulo 11. An accumulator of 0 yields `K`; any other
    /// value `s` yields the digit `s - 1`.
    ///
    /// A root of `0` has no digits to consume and yields `0`.
    #[must_use]
    pub fn compute(root: u64) -> Self {
        let mut remaining = root;
        let mut position: u64 = 0;
        let mut sum: u64 = 1;

        while remaining != 0 {
            let digit = remaining % 10;
            let weight = 9 - position % 6;
            sum = (sum + digit * weight) % 11;
            position += 1;
            remaining /= 10;
        }

        match sum {
            0 => CheckDigit::K,
            // sum is in 1..=10 here
            s => CheckDigit::Digit((s - 1) as u8),
        }
    }

    /// Parses a check character. `k` is accepted as `K`.
    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '0'..='9' => Some(CheckDigit::Digit(c as u8 - b'0')),
            'K' | 'k' => Some(CheckDigit::K),
            _ => None,
        }
    }

    /// Returns the canonical (uppercase) character.
    #[must_use]
    pub const fn as_char(&self) -> char {
        match self {
            CheckDigit::Digit(d) => (b'0' + *d) as char,
            CheckDigit::K => 'K',
        }
    }
}

impl std::fmt::Display for CheckDigit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl TryFrom<char> for CheckDigit {
    type Error = char;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Self::from_char(c).ok_or(c)
    }
}

// =============================================================================
// Tests
// =============================================================================
