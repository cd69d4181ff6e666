//! 输入校验
//!
//! URL 与自定义短码的格式检查。URL 只做前缀和长度检查，不做完整解析。

use super::DEFAULT_CODE_LENGTH;

/// 自定义短码最小长度
pub const CUSTOM_CODE_MIN_LENGTH: usize = 3;
/// 自定义短码最大长度
pub const CUSTOM_CODE_MAX_LENGTH: usize = 20;

/// URL 的最小长度（不含）
const URL_MIN_LENGTH: usize = 10;

const ALLOWED_SCHEMES: [&str; 2] = ["http://", "https://"];

/// 检查目标 URL
///
/// 以 `http://` 或 `https://` 开头（区分大小写）且长度超过 10 个字符。
pub fn is_valid_url(url: &str) -> bool {
    ALLOWED_SCHEMES.iter().any(|scheme| url.starts_with(scheme))
        && url.chars().count() > URL_MIN_LENGTH
}

/// 检查自定义短码
///
/// 长度 3..=20，去掉 `-` 和 `_` 后其余字符均为字母或数字。
/// 仅由 `-`/`_` 组成的短码同样合法。
pub fn is_valid_custom_code(code: &str) -> bool {
    let len = code.chars().count();
    (CUSTOM_CODE_MIN_LENGTH..=CUSTOM_CODE_MAX_LENGTH).contains(&len)
        && code
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .all(char::is_alphanumeric)
}

/// Whether `code` has the shape of a system-generated code.
pub fn is_generated_code(code: &str) -> bool {
    code.len() == DEFAULT_CODE_LENGTH && code.chars().all(|c| c.is_ascii_alphanumeric())
}
