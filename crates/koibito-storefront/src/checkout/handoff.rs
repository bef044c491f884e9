//! One-way hand-off of the order summary to the restaurant's chat.
//!
//! The storefront builds a pre-filled messenger link and passes it to a
//! [`LinkOpener`]. Nothing comes back: a blocked pop-up or a closed tab is
//! invisible to the storefront.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

/// Koibito's messenger page.
pub const DEFAULT_MESSENGER_PAGE_ID: &str = "100064992872218";

const MESSENGER_BASE_URL: &str = "https://m.me";

/// Characters left as-is by JavaScript's `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Escape text for use as a URI query value.
pub fn encode_uri_component(text: &str) -> String {
    utf8_percent_encode(text, URI_COMPONENT).to_string()
}

/// Builds `https://m.me/{page}?text=...` links.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessengerLink {
    pub page_id: String,
}

impl MessengerLink {
    pub fn new(page_id: impl Into<String>) -> Self {
        Self {
            page_id: page_id.into(),
        }
    }

    /// Link that opens a chat with `message` typed in.
    pub fn uri_for(&self, message: &str) -> String {
        format!(
            "{}/{}?text={}",
            MESSENGER_BASE_URL,
            self.page_id,
            encode_uri_component(message)
        )
    }
}

impl Default for MessengerLink {
    fn default() -> Self {
        Self::new(DEFAULT_MESSENGER_PAGE_ID)
    }
}

/// Opens a URI in a new browsing context.
///
/// Fire and forget.
pub trait LinkOpener {
    fn open(&self, uri: &str);
}
