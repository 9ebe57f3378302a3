use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque handle to a generated image, usually a `data:` URI or a URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(String);

impl ImageRef {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn from_base64(mime: &str, data: &str) -> Self {
        let mime = mime.trim();
        let mime = if mime.is_empty() { "image/png" } else { mime };
        Self(format!("data:{mime};base64,{data}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for ImageRef {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ImageRef {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base64_builds_data_uri() {
        let image = ImageRef::from_base64("image/jpeg", "AAAA");
        assert_eq!(image.as_str(), "data:image/jpeg;base64,AAAA");
    }

    #[test]
    fn base64_defaults_missing_mime() {
        let image = ImageRef::from_base64("  ", "AAAA");
        assert_eq!(image.as_str(), "data:image/png;base64,AAAA");
    }

    #[test]
    fn serializes_as_plain_string() {
        let raw = serde_json::to_string(&ImageRef::new("img-1")).unwrap();
        assert_eq!(raw, "\"img-1\"");
    }
}
