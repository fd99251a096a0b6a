pub mod config;
pub mod coordinator;
pub mod credential;
pub mod error;
pub mod extractor;
pub mod messaging;
pub mod presenter;

#[cfg(test)]
mod tests;

pub const GEMINI_API_HOST: &str = "https://generativelanguage.googleapis.com";
pub const GEMINI_MODEL: &str = "gemini-2.0-flash";
pub const GEMINI_ENDPOINT: &str = const_format::concatcp!(
    GEMINI_API_HOST,
    "/v1beta/models/",
    GEMINI_MODEL,
    ":generateContent"
);

pub const SUPPORTED_SITE: &str = "https://leetcode.com";
pub const PROBLEMS_URL_PREFIX: &str = const_format::concatcp!(SUPPORTED_SITE, "/problems/");
pub const SUBMISSIONS_URL_PREFIX: &str = const_format::concatcp!(SUPPORTED_SITE, "/submissions/");
