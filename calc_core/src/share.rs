//! # Shareable Links
//!
//! A calculator's inputs are encoded in the query string of its page URL,
//! so a link reopens the form exactly as it was:
//!
//! ```text
//! https://example.com/calculators/voltage-drop?phase=three&gauge=10&length=150&...
//! ```

use url::Url;

use crate::errors::{CalcError, CalcResult};
use crate::form::FormState;
use crate::routes::{find_route, Page};

/// Build a share link for the form's current values.
///
/// The route path is appended to the base, so a site served under
/// `https://host/tools` links to `https://host/tools/calculators/...`.
/// Every field is included in field order; empty values are omitted.
pub fn share_url(base: &str, form: &FormState) -> CalcResult<String> {
    let mut base = Url::parse(base).map_err(|e| CalcError::invalid_share_url(base, e.to_string()))?;
    if !base.path().ends_with('/') {
        let dir = format!("{}/", base.path());
        base.set_path(&dir);
    }
    let route = form.kind().path();
    let mut url = base
        .join(route.trim_start_matches('/'))
        .map_err(|e| CalcError::invalid_share_url(base.as_str(), e.to_string()))?;

    {
        let mut query = url.query_pairs_mut();
        query.clear();
        for (key, value) in form.values() {
            if !value.is_empty() {
                query.append_pair(key, value);
            }
        }
    }

    Ok(url.into())
}

/// Strip any site prefix in front of the calculator route.
fn route_path(path: &str) -> &str {
    path.rfind("/calculators/").map_or(path, |at| &path[at..])
}

/// Reopen a form from a share link.
///
/// Unknown parameters and invalid values are skipped with a warning; the
/// field keeps its default. Only a URL that does not name a calculator page
/// is an error.
pub fn parse_share_url(link: &str) -> CalcResult<FormState> {
    let url = Url::parse(link).map_err(|e| CalcError::invalid_share_url(link, e.to_string()))?;

    let kind = match find_route(route_path(url.path())) {
        Some(Page::Calculator(kind)) => kind,
        _ => return Err(CalcError::invalid_share_url(link, format!("{} is not a calculator page", url.path()))),
    };

    let mut form = FormState::new(kind);
    for (key, value) in url.query_pairs() {
        if form.get(&key).is_none() {
            tracing::warn!(calculator = kind.slug(), key = %key, "ignoring unknown share link parameter");
            continue;
        }
        if let Err(e) = form.set(&key, &value) {
            tracing::warn!(calculator = kind.slug(), key = %key, value = %value, error = %e, "ignoring invalid share link value");
            // Leave the default rather than the rejected text
            let default = form.default_of(&key).unwrap_or_default().to_string();
            let _ = form.set(&key, &default);
        }
    }

    Ok(form)
}
