//! Provider credential handling.

use std::fmt;

/// Placeholder values shipped in sample configuration files.
const PLACEHOLDER_KEYS: [&str; 2] = ["your_openweather_api_key_here", "your_api_key_here"];
/// Keys of this length or shorter are treated as unset.
const MIN_KEY_LEN_EXCLUSIVE: usize = 10;

/// An API key that passed the plausibility check.
///
/// `Debug` never prints the key.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Accept a configured key unless it is blank, a known placeholder, or
    /// too short to be real.
    ///
    /// # Examples
    /// ```
    /// use geodir_backend::outbound::openweather::ApiKey;
    ///
    /// assert!(ApiKey::parse("your_api_key_here").is_none());
    /// assert!(ApiKey::parse("0123456789").is_none());
    /// assert!(ApiKey::parse("0123456789a").is_some());
    /// ```
    pub fn parse(raw: impl AsRef<str>) -> Option<Self> {
        let raw = raw.as_ref().trim();
        if raw.len() <= MIN_KEY_LEN_EXCLUSIVE || PLACEHOLDER_KEYS.contains(&raw) {
            return None;
        }
        Some(Self(raw.to_owned()))
    }

    pub(super) fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("short")]
    #[case("your_openweather_api_key_here")]
    #[case("your_api_key_here")]
    fn rejects_unusable_keys(#[case] raw: &str) {
        assert!(ApiKey::parse(raw).is_none());
    }

    #[rstest]
    fn debug_output_is_redacted() {
        let key = ApiKey::parse("abcdef0123456789").expect("valid key");
        assert!(!format!("{key:?}").contains("abcdef"));
    }
}
