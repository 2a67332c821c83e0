use percent_encoding::utf8_percent_encode;

use crate::constants::OAUTH_ENCODE_SET;

/// Percent-encode a string the way OAuth 1.0a requires.
///
/// OAuth1 encoding is stricter than typical URL-encoding: only the RFC 3986
/// unreserved characters stay unescaped, and space becomes `%20` rather
/// than `+`.
pub fn percent_encode(value: &str) -> String {
    utf8_percent_encode(value, &OAUTH_ENCODE_SET).to_string()
}

/// Build the normalized parameter string used in the signature base string.
///
/// Every key and value is percent-encoded individually, pairs are sorted by
/// encoded key and then by encoded value, and the result is joined as
/// `k=v` pairs separated by `&`. Entries sharing both key and value are all
/// retained.
pub fn normalize(parameters: &[(String, String)]) -> String {
    let mut pairs = parameters
        .iter()
        .map(|(k, v)| (percent_encode(k), percent_encode(v)))
        .collect::<Vec<_>>();
    pairs.sort();

    let mut s = String::with_capacity(16);
    for (idx, (k, v)) in pairs.into_iter().enumerate() {
        if idx != 0 {
            s.push('&');
        }

        s.push_str(&k);
        s.push('=');
        s.push_str(&v);
    }

    s
}
