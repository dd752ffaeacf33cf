use unicode_segmentation::UnicodeSegmentation;

/// Shown to the owner when the requester did not give a name.
pub const DEFAULT_REQUESTER_NAME: &str = "Someone";

const MAX_REQUESTER_NAME_GRAPHEMES: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequesterName(String);

impl RequesterName {
    /// Returns an instance of `RequesterName` if the input is non-blank and
    /// at most 256 graphemes long. Any characters are allowed.
    pub fn parse(s: String) -> Result<RequesterName, String> {
        let trimmed = s.trim();
        // A grapheme is defined by the Unicode standard as a "user-perceived"
        // character: `å` is a single grapheme, but it is composed of two characters
        // (`a` and `̊`).
        let is_too_long = trimmed.graphemes(true).count() > MAX_REQUESTER_NAME_GRAPHEMES;
        if trimmed.is_empty() || is_too_long {
            Err(format!("{} is not a valid requester name.", s))
        } else {
            Ok(Self(trimmed.to_string()))
        }
    }

    /// Missing or blank names fall back to the default name.
    pub fn parse_or_default(s: Option<String>) -> Result<RequesterName, String> {
        match s {
            Some(s) if !s.trim().is_empty() => Self::parse(s),
            _ => Ok(Self::default()),
        }
    }
}

impl Default for RequesterName {
    fn default() -> Self {
        Self(DEFAULT_REQUESTER_NAME.to_string())
    }
}

impl AsRef<str> for RequesterName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
