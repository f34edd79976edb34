use std::error::Error;
use std::fmt;

/// Represents errors that can occur during trilang processing
///
/// This error type encapsulates all possible errors that can occur
/// at the crate boundary, e.g. when starting the web server.
#[derive(Debug)]
pub struct TrilangError {
    details: String,
}

impl TrilangError {
    /// Creates a new TrilangError with the given message
    pub fn new(msg: &str) -> TrilangError {
        TrilangError {
            details: msg.to_string(),
        }
    }
}

impl fmt::Display for TrilangError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.details)
    }
}

impl Error for TrilangError {
    fn description(&self) -> &str {
        &self.details
    }
}

/// 响应体日志截断长度上限
pub const MAX_LOGGED_BODY_BYTES: usize = 512;

/// 截断外部服务的响应体，用于错误消息和日志
///
/// 保证在字符边界截断，超长时追加省略号。
pub fn truncate_body(body: &str, max_bytes: usize) -> String {
    if body.len() <= max_bytes {
        return body.to_string();
    }

    let mut end = max_bytes;
    while end > 0 && !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…", &body[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_body_keeps_short_bodies() {
        assert_eq!(truncate_body("ok", 512), "ok");
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let body = "响应内容超长需要截断";
        let truncated = truncate_body(body, 7);
        assert!(truncated.ends_with('…'));
        assert!(truncated.len() <= 7 + '…'.len_utf8());
    }
}
