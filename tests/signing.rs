use std::str::FromStr;

use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::{Method, Request, Uri};
use percent_encoding::percent_decode_str;
use pretty_assertions::assert_eq;
use reqsign_oauth1::{
    AccessToken, ConsumerKey, ConsumerSecret, ErrorKind, HashingAlgorithm, HmacSignature,
    RequestSigner, TokenSecret,
};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn consumer_key() -> ConsumerKey {
    ConsumerKey::new("consumer_key").expect("must be valid")
}

fn consumer_secret() -> ConsumerSecret {
    ConsumerSecret::new("consumer_secret").expect("must be valid")
}

fn access_token() -> AccessToken {
    AccessToken::new("access_token").expect("must be valid")
}

fn token_secret() -> TokenSecret {
    TokenSecret::new("token_secret").expect("must be valid")
}

/// Split an `OAuth k="v",...` header back into decoded key/value pairs.
fn parse_authorization(value: &str) -> Vec<(String, String)> {
    let parameters = value
        .strip_prefix("OAuth ")
        .expect("header must start with OAuth");

    parameters
        .split(',')
        .map(|pair| {
            let (k, v) = pair.split_once('=').expect("pair must contain =");
            let v = percent_decode_str(v.trim_matches('"'))
                .decode_utf8()
                .expect("value must decode");
            (k.to_string(), v.into_owned())
        })
        .collect()
}

fn captured_value<'a>(parameters: &'a [(String, String)], key: &str) -> &'a str {
    parameters
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
        .unwrap_or_else(|| panic!("{key} must be present"))
}

#[test]
fn test_empty_credentials_are_rejected() {
    let err = ConsumerKey::new("").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CredentialInvalid);

    assert!(ConsumerSecret::new("").is_err());
    assert!(AccessToken::new("").is_err());
    assert!(TokenSecret::new(String::new()).is_err());
}

#[test]
fn test_immutability() {
    let signer = RequestSigner::new(consumer_key(), consumer_secret());
    let signer_with_access_token = signer.with_access_token(access_token(), token_secret());
    assert_ne!(signer, signer_with_access_token);

    let signer_without_access_token = signer_with_access_token.without_access_token();
    assert_ne!(signer_with_access_token, signer_without_access_token);
    assert_eq!(signer, signer_without_access_token);
}

#[test]
fn test_sign() {
    init_logger();

    let request = Request::post("https://example.com/")
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body("foo=bar&bar=baz".to_string())
        .expect("request must be valid");
    let signer = RequestSigner::new(consumer_key(), consumer_secret())
        .with_algorithm(HashingAlgorithm::Sha512)
        .with_access_token(access_token(), token_secret());

    let signed = signer.sign(request).expect("sign must succeed");

    let value = signed.headers()[AUTHORIZATION]
        .to_str()
        .expect("header must be valid");
    let captured = parse_authorization(value);

    let keys = captured.iter().map(|(k, _)| k.as_str()).collect::<Vec<_>>();
    assert_eq!(
        keys,
        vec![
            "oauth_consumer_key",
            "oauth_nonce",
            "oauth_signature_method",
            "oauth_timestamp",
            "oauth_version",
            "oauth_token",
            "oauth_signature",
        ]
    );
    assert_eq!(captured_value(&captured, "oauth_consumer_key"), "consumer_key");
    assert_eq!(captured_value(&captured, "oauth_signature_method"), "HMAC-SHA512");
    assert_eq!(captured_value(&captured, "oauth_version"), "1.0");
    assert_eq!(captured_value(&captured, "oauth_token"), "access_token");
    assert_eq!(captured_value(&captured, "oauth_nonce").len(), 32);

    // Feeding the captured parameters and the form parameters back into a
    // fresh signature must reproduce oauth_signature byte for byte.
    let mut parameters = captured
        .iter()
        .filter(|(k, _)| k != "oauth_signature")
        .cloned()
        .collect::<Vec<_>>();
    parameters.push(("foo".to_string(), "bar".to_string()));
    parameters.push(("bar".to_string(), "baz".to_string()));

    let recomputed = HmacSignature::new(consumer_secret())
        .with_algorithm(HashingAlgorithm::Sha512)
        .with_token_secret(token_secret())
        .sign(
            &Uri::from_str("https://example.com/").expect("uri must be valid"),
            &parameters,
            &Method::POST,
        )
        .expect("sign must succeed");

    assert_eq!(captured_value(&captured, "oauth_signature"), recomputed);
}

#[test]
fn test_sign_to_request_authorization() {
    init_logger();

    let request = Request::post("https://example.com/")
        .body("foo=bar&bar=baz".to_string())
        .expect("request must be valid");
    let signer = RequestSigner::new(consumer_key(), consumer_secret());

    let signed = signer
        .sign_to_request_authorization(
            request,
            "https://example.com/callback",
            &[(
                "extra_test_to_make_sure_this_is_included".to_string(),
                "Yay!".to_string(),
            )],
        )
        .expect("sign must succeed");

    let value = signed.headers()[AUTHORIZATION]
        .to_str()
        .expect("header must be valid");
    let captured = parse_authorization(value);

    let keys = captured.iter().map(|(k, _)| k.as_str()).collect::<Vec<_>>();
    assert_eq!(
        keys,
        vec![
            "oauth_consumer_key",
            "oauth_nonce",
            "oauth_signature_method",
            "oauth_timestamp",
            "oauth_version",
            "oauth_callback",
            "extra_test_to_make_sure_this_is_included",
            "oauth_signature",
        ]
    );
    for (key, value) in &captured {
        assert!(!value.is_empty(), "{key} must not be empty");
    }
    assert_eq!(
        captured_value(&captured, "oauth_callback"),
        "https://example.com/callback"
    );
    assert_eq!(
        captured_value(&captured, "extra_test_to_make_sure_this_is_included"),
        "Yay!"
    );
    assert_eq!(captured_value(&captured, "oauth_nonce").len(), 32);

    // No form content type on this request, so only the captured
    // parameters took part in signing.
    let parameters = captured
        .iter()
        .filter(|(k, _)| k != "oauth_signature")
        .cloned()
        .collect::<Vec<_>>();

    let recomputed = HmacSignature::new(consumer_secret())
        .sign(
            &Uri::from_str("https://example.com/").expect("uri must be valid"),
            &parameters,
            &Method::POST,
        )
        .expect("sign must succeed");

    assert_eq!(captured_value(&captured, "oauth_signature"), recomputed);
}

#[test]
fn test_nonce_is_fresh_for_every_call() {
    let signer = RequestSigner::new(consumer_key(), consumer_secret());

    let mut nonces = Vec::new();
    for _ in 0..2 {
        let request = Request::get("https://example.com/")
            .body(String::new())
            .expect("request must be valid");
        let signed = signer.sign(request).expect("sign must succeed");

        let value = signed.headers()[AUTHORIZATION]
            .to_str()
            .expect("header must be valid");
        let captured = parse_authorization(value);
        let nonce = captured_value(&captured, "oauth_nonce").to_string();

        assert_eq!(nonce.len(), 32);
        assert!(nonce.chars().all(|c| c.is_ascii_alphanumeric()));
        nonces.push(nonce);
    }

    assert_ne!(nonces[0], nonces[1]);
}
