//! Path patterns for security constraints.
//!
//! Supported forms:
//! - `/test`: exact path;
//! - `/users/*/roles`: `*` as a whole segment matches exactly one segment;
//! - `/admin/**`: trailing `**` matches the base path and everything below.
//!
//! Empty segments are ignored on both sides, so `/test/` and `//test` match
//! `/test`. Matching is iterative and allocation-free.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use warden_core::{ConfigError, ConfigResult};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Any,
}

/// A compiled path pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    raw: String,
    segments: Vec<Segment>,
    prefix: bool,
}

impl PathPattern {
    pub fn new(raw: impl Into<String>) -> ConfigResult<Self> {
        let raw = raw.into();
        if !raw.starts_with('/') {
            return Err(ConfigError::pattern(raw, "must start with '/'"));
        }

        let parts: Vec<&str> = raw.split('/').filter(|s| !s.is_empty()).collect();
        let mut segments = Vec::with_capacity(parts.len());
        let mut prefix = false;

        for (i, part) in parts.iter().enumerate() {
            match *part {
                "**" if i + 1 == parts.len() => prefix = true,
                "**" => return Err(ConfigError::pattern(&raw, "'**' is only allowed at the end")),
                "*" => segments.push(Segment::Any),
                p if p.contains('*') => {
                    return Err(ConfigError::pattern(
                        &raw,
                        "wildcards must occupy a whole segment",
                    ));
                }
                p => segments.push(Segment::Literal(p.to_string())),
            }
        }

        Ok(Self {
            raw,
            segments,
            prefix,
        })
    }

    pub fn matches(&self, path: &str) -> bool {
        let mut parts = path.split('/').filter(|s| !s.is_empty());

        for segment in &self.segments {
            let Some(part) = parts.next() else {
                return false;
            };
            match segment {
                Segment::Any => {}
                Segment::Literal(lit) if lit == part => {}
                Segment::Literal(_) => return false,
            }
        }

        self.prefix || parts.next().is_none()
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl core::fmt::Display for PathPattern {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.raw)
    }
}

impl core::str::FromStr for PathPattern {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for PathPattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for PathPattern {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// A literal pattern built from segments always matches the path made
        /// of the same segments, with or without a trailing slash.
        #[test]
        fn literal_pattern_matches_itself(
            segments in proptest::collection::vec("[a-z0-9_-]{1,8}", 0..5),
            trailing in any::<bool>(),
        ) {
            let path = format!("/{}", segments.join("/"));
            let pat = PathPattern::new(path.clone()).unwrap();
            let request = if trailing { format!("{path}/") } else { path };
            prop_assert!(pat.matches(&request));
        }

        /// A prefix pattern matches any extension of its base path.
        #[test]
        fn prefix_pattern_matches_descendants(
            base in proptest::collection::vec("[a-z]{1,8}", 1..4),
            rest in proptest::collection::vec("[a-z]{1,8}", 0..4),
        ) {
            let pat = PathPattern::new(format!("/{}/**", base.join("/"))).unwrap();
            let mut all = base.clone();
            all.extend(rest);
            let path = format!("/{}", all.join("/"));
            prop_assert!(pat.matches(&path));
        }

        /// An exact pattern never matches a strictly longer path.
        #[test]
        fn exact_pattern_rejects_descendants(
            base in proptest::collection::vec("[a-z]{1,8}", 0..4),
            extra in "[a-z]{1,8}",
        ) {
            let path = format!("/{}", base.join("/"));
            let pat = PathPattern::new(path.clone()).unwrap();
            let longer = format!("{}/{extra}", path.trim_end_matches('/'));
            prop_assert!(!pat.matches(&longer));
        }
    }
}
