//! Pages the analyze action is allowed to run on.

use crate::{PROBLEMS_URL_PREFIX, SUBMISSIONS_URL_PREFIX};

pub const SUPPORTED_URL_PREFIXES: [&str; 2] = [PROBLEMS_URL_PREFIX, SUBMISSIONS_URL_PREFIX];

/// True for problem and submission pages of the supported site.
pub fn is_supported_url(url: &str) -> bool {
    SUPPORTED_URL_PREFIXES
        .iter()
        .any(|prefix| url.starts_with(prefix))
}
