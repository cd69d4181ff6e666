use std::borrow::Cow;

pub mod code_validator;

pub use code_validator::{is_generated_code, is_valid_custom_code, is_valid_url};

/// 生成短码的默认长度
pub const DEFAULT_CODE_LENGTH: usize = 6;

const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Generate a random alphanumeric code.
///
/// Characters are drawn uniformly with replacement; the result is not
/// guaranteed to be unique and is not suitable for secrets.
pub fn generate_random_code(length: usize) -> String {
    use std::iter;

    iter::repeat_with(|| CODE_ALPHABET[rand::random_range(0..CODE_ALPHABET.len())] as char)
        .take(length)
        .collect()
}

/// Reserved and sub-delim characters left as-is in a redirect target
const LOCATION_SAFE: &str = ":/%#?=@[]!$&'()*+,;-._~";

fn is_location_safe(c: char) -> bool {
    c.is_ascii_alphanumeric() || LOCATION_SAFE.contains(c)
}

/// Percent-encode a target URL for the `Location` header.
///
/// Existing `%` escapes and URL delimiters are kept; spaces, control
/// characters and non-ASCII characters are encoded as UTF-8 bytes.
pub fn encode_location(url: &str) -> Cow<'_, str> {
    if url.chars().all(is_location_safe) {
        return Cow::Borrowed(url);
    }

    let mut encoded = String::with_capacity(url.len() + 16);
    let mut buf = [0u8; 4];
    for c in url.chars() {
        if is_location_safe(c) {
            encoded.push(c);
        } else {
            encoded.push_str(&urlencoding::encode(c.encode_utf8(&mut buf)));
        }
    }
    Cow::Owned(encoded)
}
