//! Checkout Link

use std::{fmt, str::FromStr};

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use thiserror::Error;
use url::Url;

/// Base of every checkout link; the destination is appended as the path.
pub const CHECKOUT_BASE_URL: &str = "https://wa.me/";

/// Bytes escaped in the message text: everything except `A-Z a-z 0-9 - . _ ~ /`.
const MESSAGE_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'/');

/// Invalid destination identifiers.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DestinationError {
    /// No identifier was given.
    #[error("destination is empty")]
    Empty,

    /// The identifier contains something other than ASCII digits.
    #[error("destination {0:?} must contain only digits (country, area and number)")]
    NotDigits(String),
}

/// Errors building a checkout link.
#[derive(Debug, Error, PartialEq)]
pub enum CheckoutError {
    /// The assembled link is not a valid URL.
    #[error("invalid checkout link: {0}")]
    Url(#[from] url::ParseError),
}

/// Phone-number-style identifier of the shop's messaging account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationId(String);

impl DestinationId {
    /// The identifier's digits.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for DestinationId {
    type Err = DestinationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim();

        if digits.is_empty() {
            return Err(DestinationError::Empty);
        }

        if !digits.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(DestinationError::NotDigits(digits.to_string()));
        }

        Ok(Self(digits.to_string()))
    }
}

impl fmt::Display for DestinationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Link that opens a compose view pre-filled with the order message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutLink(Url);

impl CheckoutLink {
    /// The link as a URL.
    pub fn url(&self) -> &Url {
        &self.0
    }

    /// The link as text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for CheckoutLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

/// Percent-encode a message for use as the `text` query parameter.
pub fn encode_message(message: &str) -> String {
    utf8_percent_encode(message, MESSAGE_ENCODE_SET).to_string()
}

/// Build `https://wa.me/<destination>?text=<encoded message>`.
///
/// # Errors
///
/// Returns [`CheckoutError::Url`] if the assembled link does not parse.
pub fn build_checkout_link(
    message: &str,
    destination: &DestinationId,
) -> Result<CheckoutLink, CheckoutError> {
    let link = format!(
        "{CHECKOUT_BASE_URL}{destination}?text={}",
        encode_message(message)
    );

    Ok(CheckoutLink(Url::parse(&link)?))
}
