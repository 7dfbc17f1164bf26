use serde::{Deserialize, Serialize};
use std::fmt;
use url::form_urlencoded;

/// Transport form of clue text.
///
/// Text fetched from the trivia source can carry characters that are unsafe to
/// hand to a presentation layer verbatim (`<i>`, `&`, quotes, ...). It is encoded
/// once when the clue is built and decoded only when it is displayed, so the
/// displayed string is always byte-for-byte the fetched one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncodedText(String);

impl EncodedText {
    pub fn encode(raw: &str) -> Self {
        Self(form_urlencoded::byte_serialize(raw.as_bytes()).collect())
    }

    /// 解碼回原始文字；編碼結果不含 `&` 或 `=`，所以整段會被解析成單一 key
    pub fn decode(&self) -> String {
        form_urlencoded::parse(self.0.as_bytes())
            .next()
            .map(|(key, _)| key.into_owned())
            .unwrap_or_default()
    }

    pub fn as_encoded(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.decode().trim().is_empty()
    }
}

impl fmt::Display for EncodedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
