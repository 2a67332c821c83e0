use std::fmt::Debug;
use std::fmt::Formatter;

use crate::{Error, Result};

/// Redact a credential for Debug output: keep the first and last three
/// characters only when the value is long enough to stay unidentifiable.
fn redact(value: &str) -> String {
    if value.len() < 12 {
        "***".to_string()
    } else {
        format!("{}***{}", &value[..3], &value[value.len() - 3..])
    }
}

macro_rules! credential {
    ($(#[$meta:meta])* $name:ident, $what:literal) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq)]
        pub struct $name(String);

        impl $name {
            /// Create a new value. Empty input is rejected.
            pub fn new(value: impl Into<String>) -> Result<Self> {
                let value = value.into();
                if value.is_empty() {
                    return Err(Error::credential_invalid(concat!(
                        $what,
                        " must not be empty"
                    )));
                }

                Ok(Self(value))
            }

            /// Borrow the raw string value.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Debug for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.debug_tuple(stringify!($name))
                    .field(&redact(&self.0))
                    .finish()
            }
        }
    };
}

credential!(
    /// Key identifying the consumer application to the provider.
    ConsumerKey,
    "consumer key"
);

credential!(
    /// Secret paired with the consumer key, part of the signing key.
    ConsumerSecret,
    "consumer secret"
);

credential!(
    /// Token authorizing the consumer to act on behalf of a user.
    AccessToken,
    "access token"
);

credential!(
    /// Secret paired with the access token, part of the signing key.
    TokenSecret,
    "token secret"
);
