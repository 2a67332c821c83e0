//! Signing HTTP requests with OAuth 1.0a.
//!
//! This crate computes OAuth 1.0a request signatures and attaches them to
//! HTTP requests as an `Authorization` header. It performs no I/O: the
//! signer is a pure function from an immutable request value to a new
//! request value carrying the signed header.
//!
//! ## Overview
//!
//! The crate is built around a few small pieces:
//!
//! - **Credentials**: [`ConsumerKey`], [`ConsumerSecret`], [`AccessToken`]
//!   and [`TokenSecret`] are validated, immutable wrappers around the
//!   strings issued by the provider
//! - **Signature**: [`HmacSignature`] derives the signing key and computes
//!   the HMAC over the signature base string, with the hash function
//!   selected by [`HashingAlgorithm`]
//! - **Signer**: [`RequestSigner`] generates the protocol parameters,
//!   merges them with the request's own parameters and serializes the
//!   `Authorization` header
//!
//! ## Example
//!
//! ```
//! use http::Request;
//! use reqsign_oauth1::{AccessToken, ConsumerKey, ConsumerSecret, RequestSigner, TokenSecret};
//!
//! # fn main() -> reqsign_oauth1::Result<()> {
//! let signer = RequestSigner::new(
//!     ConsumerKey::new("consumer_key")?,
//!     ConsumerSecret::new("consumer_secret")?,
//! )
//! .with_access_token(
//!     AccessToken::new("access_token")?,
//!     TokenSecret::new("token_secret")?,
//! );
//!
//! let request = Request::post("https://api.example.com/1.1/statuses/update.json")
//!     .header("content-type", "application/x-www-form-urlencoded")
//!     .body("status=hello".to_string())
//!     .expect("request must be valid");
//!
//! let signed = signer.sign(request)?;
//! assert!(signed.headers().contains_key(http::header::AUTHORIZATION));
//! # Ok(())
//! # }
//! ```

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;

mod constants;

mod credential;
pub use credential::AccessToken;
pub use credential::ConsumerKey;
pub use credential::ConsumerSecret;
pub use credential::TokenSecret;

mod error;
pub use error::{Error, ErrorKind, Result};

mod normalize;
pub use normalize::{normalize, percent_encode};

mod signature;
pub use signature::{HashingAlgorithm, HmacSignature};

mod signer;
pub use signer::RequestSigner;
