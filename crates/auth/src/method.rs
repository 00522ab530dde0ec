use std::borrow::Cow;

use serde::{Deserialize, Deserializer, Serialize};

/// HTTP method name as used by the security constraints.
///
/// Methods are stored upper-case so that `get`, `Get` and `GET` compare equal.
/// The type is deliberately a string rather than a framework type so this crate
/// stays independent of any HTTP stack.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Method(Cow<'static, str>);

impl Method {
    pub const GET: Method = Method(Cow::Borrowed("GET"));
    pub const POST: Method = Method(Cow::Borrowed("POST"));
    pub const PUT: Method = Method(Cow::Borrowed("PUT"));
    pub const PATCH: Method = Method(Cow::Borrowed("PATCH"));
    pub const DELETE: Method = Method(Cow::Borrowed("DELETE"));

    pub fn new(name: impl AsRef<str>) -> Self {
        let name = name.as_ref().trim();
        match name {
            "GET" => Self::GET,
            "POST" => Self::POST,
            "PUT" => Self::PUT,
            "PATCH" => Self::PATCH,
            "DELETE" => Self::DELETE,
            other => Self(Cow::Owned(other.to_ascii_uppercase())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Method {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Method {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl<'de> Deserialize<'de> for Method {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(Self::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_names_are_case_insensitive() {
        assert_eq!(Method::new("get"), Method::GET);
        assert_eq!(Method::new(" Post "), Method::POST);
        assert_eq!(Method::new("options").as_str(), "OPTIONS");
    }
}
