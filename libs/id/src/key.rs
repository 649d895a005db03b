//! Company key synthesis.

use chrono::{Datelike, NaiveDate, NaiveDateTime};

use crate::{Clock, IdError, SystemClock};

/// A company's permanent key: a short name prefix followed by a fixed-width
/// millisecond timestamp.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CompanyKey(String);

impl CompanyKey {
    /// Maximum number of name characters taken as prefix.
    pub const PREFIX_LEN: usize = 3;

    /// Width of the `YYYYMMDDHHMMSSmmm` timestamp.
    pub const TIMESTAMP_WIDTH: usize = 17;

    const TIMESTAMP_FORMAT: &'static str = "%Y%m%d%H%M%S%3f";

    /// Builds the key for `name` created at `now`.
    ///
    /// The prefix is the first three characters of `name`, or all of it when
    /// shorter. An empty name yields a bare timestamp.
    ///
    /// Instants before year 0000 or after 9999 are clamped to the first or
    /// last millisecond of that range, keeping the timestamp 17 digits wide.
    #[must_use]
    pub fn generate(name: &str, now: NaiveDateTime) -> Self {
        let prefix: String = name.chars().take(Self::PREFIX_LEN).collect();
        let now = clamp_to_key_range(now);
        Self(format!("{prefix}{}", now.format(Self::TIMESTAMP_FORMAT)))
    }

    /// Parses a stored key.
    pub fn parse(s: &str) -> Result<Self, IdError> {
        if s.is_empty() {
            return Err(IdError::Empty);
        }

        if s.len() < Self::TIMESTAMP_WIDTH {
            return Err(IdError::TooShort {
                expected: Self::TIMESTAMP_WIDTH,
                actual: s.len(),
            });
        }

        let split = s.len() - Self::TIMESTAMP_WIDTH;
        let (Some(prefix), Some(timestamp)) = (s.get(..split), s.get(split..)) else {
            return Err(IdError::InvalidTimestamp(s.to_string()));
        };

        if prefix.chars().count() > Self::PREFIX_LEN {
            return Err(IdError::PrefixTooLong {
                max: Self::PREFIX_LEN,
                actual: prefix.to_string(),
            });
        }

        parse_timestamp(timestamp)?;
        Ok(Self(s.to_string()))
    }

    /// Returns the name-derived prefix.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.0[..self.0.len() - Self::TIMESTAMP_WIDTH]
    }

    /// Returns the creation instant encoded in the key.
    #[must_use]
    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        parse_timestamp(&self.0[self.0.len() - Self::TIMESTAMP_WIDTH..]).ok()
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn clamp_to_key_range(now: NaiveDateTime) -> NaiveDateTime {
    let bound = match now.year() {
        y if y < 0 => NaiveDate::from_ymd_opt(0, 1, 1).and_then(|d| d.and_hms_milli_opt(0, 0, 0, 0)),
        y if y > 9999 => {
            NaiveDate::from_ymd_opt(9999, 12, 31).and_then(|d| d.and_hms_milli_opt(23, 59, 59, 999))
        }
        _ => None,
    };
    bound.unwrap_or(now)
}

fn parse_timestamp(digits: &str) -> Result<NaiveDateTime, IdError> {
    let invalid = || IdError::InvalidTimestamp(digits.to_string());

    if digits.len() != CompanyKey::TIMESTAMP_WIDTH || !digits.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(invalid());
    }

    let field = |range: std::ops::Range<usize>| -> Result<u32, IdError> {
        digits[range].parse().map_err(|_| invalid())
    };

    let year = field(0..4)? as i32;
    let date = NaiveDate::from_ymd_opt(year, field(4..6)?, field(6..8)?).ok_or_else(invalid)?;
    date.and_hms_milli_opt(field(8..10)?, field(10..12)?, field(12..14)?, field(14..17)?)
        .ok_or_else(invalid)
}

impl std::fmt::Display for CompanyKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for CompanyKey {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for CompanyKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for CompanyKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for CompanyKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Generates company keys from a clock.
#[derive(Debug, Clone, Default)]
pub struct KeyGenerator<C = SystemClock> {
    clock: C,
}

impl<C: Clock> KeyGenerator<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    /// Generates a key for `name`, reading the clock once.
    pub fn generate(&self, name: &str) -> CompanyKey {
        CompanyKey::generate(name, self.clock.now())
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FixedClock;
    use chrono::Timelike;
    use proptest::prelude::*;
    use rstest::rstest;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32, ms: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_milli_opt(h, mi, s, ms)
            .unwrap()
    }

    #[rstest]
    #[case("previred", "pre20240110223344422")]
    #[case("ab", "ab20240110223344422")]
    #[case("abc", "abc20240110223344422")]
    #[case("", "20240110223344422")]
    #[case("ñandú", "ñan20240110223344422")]
    fn test_generate(#[case] name: &str, #[case] expected: &str) {
        let key = CompanyKey::generate(name, at(2024, 1, 10, 22, 33, 44, 422));
        assert_eq!(key.as_str(), expected);
    }

    #[test]
    fn test_generate_pads_timestamp_fields() {
        let key = CompanyKey::generate("acme", at(2024, 2, 3, 4, 5, 6, 7));
        assert_eq!(key.as_str(), "acm20240203040506007");
    }

    #[rstest]
    #[case(at(9999, 12, 31, 23, 59, 59, 999), "pre99991231235959999")]
    #[case(at(10_000, 1, 1, 0, 0, 0, 0), "pre99991231235959999")]
    #[case(at(0, 1, 1, 0, 0, 0, 0), "pre00000101000000000")]
    #[case(at(-1, 6, 15, 12, 0, 0, 0), "pre00000101000000000")]
    fn test_generate_keeps_fixed_width_at_year_bounds(
        #[case] now: NaiveDateTime,
        #[case] expected: &str,
    ) {
        let key = CompanyKey::generate("previred", now);
        assert_eq!(key.as_str(), expected);
        assert_eq!(key.prefix(), "pre");
        assert!(key.timestamp().is_some());
        assert_eq!(CompanyKey::parse(key.as_str()), Ok(key));
    }

    #[test]
    fn test_generate_drops_sub_millisecond_precision() {
        let precise = at(2024, 1, 10, 22, 33, 44, 0)
            .with_nanosecond(422_999_999)
            .unwrap();
        let key = CompanyKey::generate("previred", precise);
        assert_eq!(key.as_str(), "pre20240110223344422");
        assert_eq!(key.timestamp(), precise.with_nanosecond(422_000_000));
    }

    #[test]
    fn test_same_name_different_instant() {
        let a = CompanyKey::generate("previred", at(2024, 1, 10, 22, 33, 44, 422));
        let b = CompanyKey::generate("previred", at(2024, 1, 10, 22, 33, 44, 423));
        assert_ne!(a, b);
        assert_eq!(a.prefix(), b.prefix());
        assert!(a < b);
    }

    #[test]
    fn test_key_generator_uses_clock() {
        let generator = KeyGenerator::new(FixedClock(at(2024, 1, 10, 22, 33, 44, 422)));
        assert_eq!(generator.generate("previred").as_str(), "pre20240110223344422");
        assert_eq!(generator.generate("previred"), generator.generate("previred"));
    }

    #[test]
    fn test_system_clock_generator() {
        let key = KeyGenerator::new(SystemClock::Utc).generate("acme");
        assert_eq!(key.prefix(), "acm");
        assert!(key.timestamp().is_some());
    }

    #[test]
    fn test_parse_roundtrip() {
        let key = CompanyKey::generate("previred", at(2024, 1, 10, 22, 33, 44, 422));
        let parsed: CompanyKey = key.to_string().parse().unwrap();
        assert_eq!(key, parsed);
        assert_eq!(parsed.prefix(), "pre");
        assert_eq!(parsed.timestamp(), Some(at(2024, 1, 10, 22, 33, 44, 422)));
    }

    #[rstest]
    #[case("", IdError::Empty)]
    #[case("pre2024", IdError::TooShort { expected: 17, actual: 7 })]
    #[case("prev20240110223344422", IdError::PrefixTooLong { max: 3, actual: "prev".to_string() })]
    #[case("pre2024011022334442x", IdError::InvalidTimestamp("2024011022334442x".to_string()))]
    #[case("pre20241310223344422", IdError::InvalidTimestamp("20241310223344422".to_string()))]
    #[case("pre20240110253344422", IdError::InvalidTimestamp("20240110253344422".to_string()))]
    fn test_parse_invalid(#[case] input: &str, #[case] expected: IdError) {
        assert_eq!(CompanyKey::parse(input).unwrap_err(), expected);
    }

    #[test]
    fn test_json_roundtrip() {
        let key = CompanyKey::generate("previred", at(2024, 1, 10, 22, 33, 44, 422));
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"pre20240110223344422\"");
        let parsed: CompanyKey = serde_json::from_str(&json).unwrap();
        assert_eq!(key, parsed);
    }

    fn instants() -> impl Strategy<Value = NaiveDateTime> {
        (
            1000i32..=9999,
            1u32..=12,
            1u32..=28,
            0u32..24,
            0u32..60,
            0u32..60,
            0u32..1000,
        )
            .prop_map(|(y, mo, d, h, mi, s, ms)| at(y, mo, d, h, mi, s, ms))
    }

    proptest! {
        #[test]
        fn prop_key_shape(name in "\\PC{0,12}", now in instants()) {
            let key = CompanyKey::generate(&name, now);
            let expected_prefix: String = name.chars().take(3).collect();
            prop_assert_eq!(key.prefix(), expected_prefix.as_str());
            prop_assert_eq!(key.as_str().len(), expected_prefix.len() + CompanyKey::TIMESTAMP_WIDTH);
            prop_assert_eq!(key.timestamp(), Some(now));
            prop_assert_eq!(CompanyKey::parse(key.as_str()).unwrap(), key);
        }

        #[test]
        fn prop_distinct_instants_give_distinct_keys(a in instants(), b in instants()) {
            prop_assume!(a != b);
            prop_assert_ne!(CompanyKey::generate("acme", a), CompanyKey::generate("acme", b));
        }
    }
}
