use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::HeaderValue;
use http::Request;
use rand::distributions::Alphanumeric;
use rand::Rng;

use crate::constants::*;
use crate::credential::{AccessToken, ConsumerKey, ConsumerSecret, TokenSecret};
use crate::normalize::percent_encode;
use crate::signature::{HashingAlgorithm, HmacSignature};
use crate::time::{format_timestamp, now, DateTime};
use crate::Result;

/// Signer that attaches an OAuth 1.0a `Authorization` header to requests.
///
/// The signer is never mutated after construction: credential transitions
/// return new instances, and [`RequestSigner::sign`] consumes a request and
/// returns the signed copy. A single signer can therefore serve concurrent
/// callers; the only per-call state is the freshly drawn nonce and
/// timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSigner {
    consumer_key: ConsumerKey,
    consumer_secret: ConsumerSecret,
    signature: HmacSignature,
    access_token: Option<(AccessToken, TokenSecret)>,

    time: Option<DateTime>,
    nonce: Option<String>,
}

impl RequestSigner {
    /// Create a new signer from consumer credentials, signing with
    /// HMAC-SHA1.
    pub fn new(consumer_key: ConsumerKey, consumer_secret: ConsumerSecret) -> Self {
        let signature = HmacSignature::new(consumer_secret.clone());

        Self {
            consumer_key,
            consumer_secret,
            signature,
            access_token: None,
            time: None,
            nonce: None,
        }
    }

    /// Switch the signature variant.
    pub fn with_algorithm(mut self, algorithm: HashingAlgorithm) -> Self {
        self.signature = self.signature.with_algorithm(algorithm);
        self
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    #[cfg(test)]
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// Specify the nonce.
    ///
    /// # Note
    ///
    /// Nonces must be freshly drawn for every request.
    /// Only use this function for testing.
    #[cfg(test)]
    pub fn with_nonce(mut self, nonce: &str) -> Self {
        self.nonce = Some(nonce.to_string());
        self
    }

    /// Return a signer that signs with the given access token.
    ///
    /// The receiver is left untouched.
    pub fn with_access_token(&self, token: AccessToken, secret: TokenSecret) -> Self {
        let mut signer = self.clone();
        signer.signature = self.signature.with_token_secret(secret.clone());
        signer.access_token = Some((token, secret));
        signer
    }

    /// Return a signer with the access token dropped.
    ///
    /// The result equals a signer that never held a token.
    pub fn without_access_token(&self) -> Self {
        let mut signer = self.clone();
        signer.signature = self.signature.without_token_secret();
        signer.access_token = None;
        signer
    }

    /// Sign a request, returning a new request with the OAuth
    /// `Authorization` header appended.
    ///
    /// The signed parameter set merges the generated protocol parameters
    /// with the request's query string and, when the body is declared as
    /// `application/x-www-form-urlencoded`, its form parameters. Only the
    /// protocol parameters appear in the header.
    pub fn sign<B: AsRef<[u8]>>(&self, request: Request<B>) -> Result<Request<B>> {
        self.sign_with(request, None, &[])
    }

    /// Sign a request for the OAuth1 request-token step.
    ///
    /// Adds `oauth_callback` and the caller's extra parameters; both take
    /// part in signing and both appear in the resulting header.
    pub fn sign_to_request_authorization<B: AsRef<[u8]>>(
        &self,
        request: Request<B>,
        callback_uri: &str,
        extra_parameters: &[(String, String)],
    ) -> Result<Request<B>> {
        self.sign_with(request, Some(callback_uri), extra_parameters)
    }

    fn sign_with<B: AsRef<[u8]>>(
        &self,
        request: Request<B>,
        callback_uri: Option<&str>,
        extra_parameters: &[(String, String)],
    ) -> Result<Request<B>> {
        let (mut parts, body) = request.into_parts();

        let mut oauth_parameters = self.oauth_parameters();
        if let Some(callback) = callback_uri {
            oauth_parameters.push((OAUTH_CALLBACK.to_string(), callback.to_string()));
        }
        oauth_parameters.extend(extra_parameters.iter().cloned());

        let mut signed_parameters = oauth_parameters.clone();
        signed_parameters.extend(request_parameters(&parts, body.as_ref()));

        let signature = self
            .signature
            .sign(&parts.uri, &signed_parameters, &parts.method)?;
        oauth_parameters.push((OAUTH_SIGNATURE.to_string(), signature));

        let mut authorization: HeaderValue = authorization_header(&oauth_parameters).parse()?;
        authorization.set_sensitive(true);
        parts.headers.append(AUTHORIZATION, authorization);

        Ok(Request::from_parts(parts, body))
    }

    /// Protocol parameters generated for one signing call, in the order
    /// they are serialized into the header.
    fn oauth_parameters(&self) -> Vec<(String, String)> {
        let mut parameters = vec![
            (
                OAUTH_CONSUMER_KEY.to_string(),
                self.consumer_key.as_str().to_string(),
            ),
            (OAUTH_NONCE.to_string(), self.generate_nonce()),
            (
                OAUTH_SIGNATURE_METHOD.to_string(),
                self.signature.algorithm().method_name().to_string(),
            ),
            (
                OAUTH_TIMESTAMP.to_string(),
                format_timestamp(self.time.unwrap_or_else(now)),
            ),
            (OAUTH_VERSION.to_string(), OAUTH_VERSION_VALUE.to_string()),
        ];

        if let Some((token, _)) = &self.access_token {
            parameters.push((OAUTH_TOKEN.to_string(), token.as_str().to_string()));
        }

        parameters
    }

    fn generate_nonce(&self) -> String {
        if let Some(nonce) = &self.nonce {
            return nonce.clone();
        }

        rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(NONCE_LENGTH)
            .map(char::from)
            .collect()
    }
}

/// Collect the request's own parameters: the query string, and the body
/// when it is declared as `application/x-www-form-urlencoded`.
fn request_parameters(parts: &http::request::Parts, body: &[u8]) -> Vec<(String, String)> {
    let mut parameters = Vec::new();

    if let Some(query) = parts.uri.query() {
        parameters.extend(parse_form(query.as_bytes()));
    }

    let form_encoded = parts
        .headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.starts_with("application/x-www-form-urlencoded"))
        .unwrap_or_default();
    if form_encoded {
        parameters.extend(parse_form(body));
    }

    parameters
}

fn parse_form(input: &[u8]) -> Vec<(String, String)> {
    form_urlencoded::parse(input)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

/// Serialize parameters into an `OAuth k="v"` header value. Values are
/// percent-encoded and pairs are comma separated without a space.
fn authorization_header(parameters: &[(String, String)]) -> String {
    let mut s = String::with_capacity(256);
    s.push_str("OAuth ");

    for (idx, (k, v)) in parameters.iter().enumerate() {
        if idx != 0 {
            s.push(',');
        }

        s.push_str(k);
        s.push_str("=\"");
        s.push_str(&percent_encode(v));
        s.push('"');
    }

    s
}
