//! Text helpers for command arguments and HTML output.

/// Escape text for Telegram's HTML parse mode.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Turn a raw command argument into an optional value.
///
/// Blank arguments become `None`.
pub fn optional_arg(args: &str) -> Option<String> {
    let trimmed = args.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("<b>&</b>"), "&lt;b&gt;&amp;&lt;/b&gt;");
        assert_eq!(html_escape("plain"), "plain");
    }

    #[test]
    fn test_optional_arg() {
        assert_eq!(optional_arg(""), None);
        assert_eq!(optional_arg("   "), None);
        assert_eq!(optional_arg("  coding  "), Some("coding".to_string()));
    }
}
