use regex::Regex;
use reqwest::header::{HeaderMap, LINK};
use url::Url;

use crate::error::Result;

/// Return the `rel="next"` target of a response's `Link` header, resolved
/// against the URL of the page it came from.
pub fn next_page_url(current: &Url, headers: &HeaderMap) -> Result<Option<Url>> {
    let link_re = Regex::new(r#"<(?<target>[^>]*)>(?<params>[^<]*)"#)?;
    let rel_re = Regex::new(r#"(?i)\brel\s*=\s*"?(?<rel>[^";,]+)"?"#)?;

    for value in headers.get_all(LINK) {
        let Ok(value) = value.to_str() else {
            continue;
        };

        for captures in link_re.captures_iter(value) {
            let is_next = rel_re
                .captures(&captures["params"])
                .map(|rel| {
                    rel["rel"]
                        .split_whitespace()
                        .any(|r| r.eq_ignore_ascii_case("next"))
                })
                .unwrap_or(false);

            if is_next {
                return Ok(Some(current.join(&captures["target"])?));
            }
        }
    }

    Ok(None)
}
