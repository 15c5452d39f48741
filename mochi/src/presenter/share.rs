use url::Url;

use crate::types::constant::SHARE_QUERY_PARAM;

/// Link to `base` carrying `claim` in the `fact` query parameter.
///
/// Other parameters of `base` are kept. A blank claim removes the parameter.
pub fn share_url(base: &Url, claim: &str) -> Url {
    let mut url = base.clone();
    let kept: Vec<(String, String)> = base
        .query_pairs()
        .filter(|(key, _)| key != SHARE_QUERY_PARAM)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    let claim = claim.trim();
    if kept.is_empty() && claim.is_empty() {
        url.set_query(None);
        return url;
    }

    {
        let mut pairs = url.query_pairs_mut();
        pairs.clear().extend_pairs(kept);
        if !claim.is_empty() {
            pairs.append_pair(SHARE_QUERY_PARAM, claim);
        }
    }
    url
}

/// Claim carried by a share link, if any.
pub fn claim_from_url(url: &Url) -> Option<String> {
    url.query_pairs()
        .find(|(key, _)| key == SHARE_QUERY_PARAM)
        .map(|(_, value)| value.trim().to_string())
        .filter(|claim| !claim.is_empty())
}
