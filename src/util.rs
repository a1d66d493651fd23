//! Small shared helpers

use std::time::SystemTime;

pub fn now_epoch_millis() -> u64 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

pub fn now_epoch_secs() -> u64 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Human-readable time since a Unix-epoch-seconds timestamp
pub fn time_ago(epoch_secs: u64) -> String {
    let now = now_epoch_secs();
    let diff = now.saturating_sub(epoch_secs);

    if diff < 60 {
        "just now".to_string()
    } else if diff < 3600 {
        let mins = diff / 60;
        format!("{} min{} ago", mins, if mins == 1 { "" } else { "s" })
    } else if diff < 86400 {
        let hours = diff / 3600;
        format!("{} hour{} ago", hours, if hours == 1 { "" } else { "s" })
    } else if diff < 604800 {
        let days = diff / 86400;
        format!("{} day{} ago", days, if days == 1 { "" } else { "s" })
    } else {
        let weeks = diff / 604800;
        format!("{} week{} ago", weeks, if weeks == 1 { "" } else { "s" })
    }
}

/// First line of `text`, cut to at most `max_chars` characters
pub fn excerpt(text: &str, max_chars: usize) -> String {
    let first_line = text.lines().next().unwrap_or("").trim();
    if first_line.chars().count() <= max_chars {
        first_line.to_string()
    } else {
        let cut: String = first_line.chars().take(max_chars).collect();
        format!("{}…", cut)
    }
}

/// Escape text for embedding in HTML output
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_ago_just_now() {
        assert_eq!(time_ago(now_epoch_secs()), "just now");
    }

    #[test]
    fn test_time_ago_ranges() {
        let now = now_epoch_secs();
        assert_eq!(time_ago(now - 60), "1 min ago");
        assert_eq!(time_ago(now - 120), "2 mins ago");
        assert_eq!(time_ago(now - 7200), "2 hours ago");
        assert_eq!(time_ago(now - 172800), "2 days ago");
        assert_eq!(time_ago(now - 1209600), "2 weeks ago");
    }

    #[test]
    fn test_excerpt_takes_first_line() {
        assert_eq!(excerpt("# Title\nbody text", 100), "# Title");
        assert_eq!(excerpt("", 100), "");
    }

    #[test]
    fn test_excerpt_truncates() {
        let long = "x".repeat(150);
        let e = excerpt(&long, 100);
        assert_eq!(e.chars().count(), 101);
        assert!(e.ends_with('…'));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&amp;&#39;&lt;/a&gt;"
        );
    }
}
