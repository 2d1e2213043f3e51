use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

// Case-sensitive prefix match: anything may follow the profile segment.
static LINKEDIN_PROFILE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(https?://)?(www\.)?linkedin\.com/in/").expect("Failed to compile regex")
});

#[derive(Debug, Serialize, Deserialize)]
pub struct LinkedinUrl(String);

impl LinkedinUrl {
    /// Returns an instance of `LinkedinUrl` if the input looks like a
    /// LinkedIn profile URL, with or without scheme and `www.`.
    pub fn parse(url: String) -> Result<LinkedinUrl, String> {
        if !LINKEDIN_PROFILE.is_match(&url) {
            return Err("Invalid LinkedIn URL".to_string());
        }

        Ok(Self(url))
    }
}

impl AsRef<str> for LinkedinUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
