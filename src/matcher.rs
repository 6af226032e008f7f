use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::LogError;

static AZURE_PIPELINES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^##vso\[").expect("static pattern is valid"));

static TEAMCITY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^##teamcity\[").expect("static pattern is valid"));

type MatchFn = dyn Fn(&str) -> bool + Send + Sync;

/// Decides from the raw template whether a message bypasses the palette.
///
/// Messages that are already service messages for a CI log scanner must
/// reach the console byte for byte, so they are written without colors.
pub enum MessageMatcher {
    Function(Box<MatchFn>),
    Pattern(Regex),
}

impl MessageMatcher {
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        MessageMatcher::Function(Box::new(f))
    }

    pub fn from_pattern(pattern: &str) -> Result<Self, LogError> {
        Ok(MessageMatcher::Pattern(Regex::new(pattern)?))
    }

    /// Matches nothing; every message gets the palette.
    pub fn never() -> Self {
        MessageMatcher::from_fn(|_| false)
    }

    /// `##vso[...]` logging commands
    pub fn azure_pipelines() -> Self {
        MessageMatcher::Pattern(AZURE_PIPELINES.clone())
    }

    /// `##teamcity[...]` service messages
    pub fn teamcity() -> Self {
        MessageMatcher::Pattern(TEAMCITY.clone())
    }

    pub fn matches(&self, template: &str) -> bool {
        match self {
            MessageMatcher::Function(f) => f(template),
            MessageMatcher::Pattern(regex) => regex.is_match(template),
        }
    }
}

impl From<Regex> for MessageMatcher {
    fn from(regex: Regex) -> Self {
        MessageMatcher::Pattern(regex)
    }
}

impl std::fmt::Debug for MessageMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageMatcher::Function(_) => f.write_str("MessageMatcher::Function(..)"),
            MessageMatcher::Pattern(regex) => {
                f.debug_tuple("MessageMatcher::Pattern").field(&regex.as_str()).finish()
            }
        }
    }
}
