//! Numeric record identifiers.

use crate::IdError;

/// Worker ID is a positive integer assigned by the store, not synthesized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WorkerId(i64);

impl WorkerId {
    /// The first ID handed out by an empty store.
    pub const FIRST: Self = Self(1);

    /// Creates a WorkerId, rejecting zero and negative values.
    pub fn new(id: i64) -> Result<Self, IdError> {
        if id < 1 {
            return Err(IdError::InvalidNumber(id.to_string()));
        }
        Ok(Self(id))
    }

    /// Returns the underlying i64 value.
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }

    /// Returns the next ID in sequence.
    #[must_use]
    pub const fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl Default for WorkerId {
    fn default() -> Self {
        Self::FIRST
    }
}

impl std::fmt::Display for WorkerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for WorkerId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(IdError::Empty);
        }
        let id = s
            .parse::<i64>()
            .map_err(|_| IdError::InvalidNumber(s.to_string()))?;
        Self::new(id)
    }
}

impl TryFrom<i64> for WorkerId {
    type Error = IdError;

    fn try_from(id: i64) -> Result<Self, Self::Error> {
        Self::new(id)
    }
}

impl From<WorkerId> for i64 {
    fn from(id: WorkerId) -> Self {
        id.0
    }
}

impl serde::Serialize for WorkerId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_i64(self.0)
    }
}

impl<'de> serde::Deserialize<'de> for WorkerId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let id = i64::deserialize(deserializer)?;
        Self::new(id).map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worker_id_next() {
        let id = WorkerId::FIRST;
        assert_eq!(id.value(), 1);
        assert_eq!(id.next().value(), 2);
    }

    #[test]
    fn test_worker_id_rejects_non_positive() {
        assert!(WorkerId::new(0).is_err());
        assert!(WorkerId::new(-3).is_err());
        assert!("0".parse::<WorkerId>().is_err());
    }

    #[test]
    fn test_worker_id_parse() {
        assert_eq!("42".parse::<WorkerId>().unwrap().value(), 42);
        assert!(matches!("".parse::<WorkerId>(), Err(IdError::Empty)));
        assert!(matches!(
            "abc".parse::<WorkerId>(),
            Err(IdError::InvalidNumber(_))
        ));
    }

    #[test]
    fn test_worker_id_json_roundtrip() {
        let id = WorkerId::new(12345).unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "12345");
        let parsed: WorkerId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, parsed);
        assert!(serde_json::from_str::<WorkerId>("0").is_err());
    }
}
