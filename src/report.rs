use std::fmt::Write;

/// Column at which report lines are hard-wrapped.
pub const MAX_LINE_LENGTH: usize = 100;

/// What one execution saw: status line, response headers in wire order, and
/// the (decompressed) body as text. Produced by the executor, sent to the
/// printing side of the dispatcher, printed, dropped.
#[derive(Debug)]
pub struct ResponseReport {
    pub status: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl ResponseReport {
    pub fn render(&self) -> String {
        let divider = "-".repeat(MAX_LINE_LENGTH);
        let mut out = String::new();
        let _ = writeln!(out, "{divider}");
        let _ = writeln!(out, "Response Status: {}", self.status);
        let _ = writeln!(out);
        let _ = writeln!(out, "Response Headers:");
        let _ = writeln!(out);
        for (name, value) in &self.headers {
            let _ = writeln!(out, "{}", wrap_text(&format!("{name}: {value}")));
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "Response Body:");
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", wrap_text(&self.body));
        let _ = writeln!(out, "{divider}");
        out
    }
}

/// Hard-wraps `text` every [`MAX_LINE_LENGTH`] characters. Not word-aware;
/// counts characters rather than bytes so multi-byte UTF-8 never splits.
pub fn wrap_text(text: &str) -> String {
    if text.chars().count() <= MAX_LINE_LENGTH {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len() + text.len() / MAX_LINE_LENGTH);
    for (i, ch) in text.chars().enumerate() {
        if i > 0 && i % MAX_LINE_LENGTH == 0 {
            out.push('\n');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(0)]
    #[test_case(1)]
    #[test_case(99)]
    #[test_case(100)]
    fn short_strings_pass_through(len: usize) {
        let s = "x".repeat(len);
        assert_eq!(wrap_text(&s), s);
    }

    #[test_case(101, 2)]
    #[test_case(200, 2)]
    #[test_case(201, 3)]
    #[test_case(350, 4)]
    fn long_strings_split_into_full_segments(len: usize, segments: usize) {
        let s = "y".repeat(len);
        let wrapped = wrap_text(&s);
        let lines: Vec<&str> = wrapped.split('\n').collect();
        assert_eq!(lines.len(), segments);
        assert!(lines.iter().all(|l| l.chars().count() <= MAX_LINE_LENGTH));
        assert_eq!(wrapped.replace('\n', ""), s);
    }

    #[test]
    fn wrapping_counts_characters_not_bytes() {
        // 101 two-byte characters must split after the 100th character
        let s = "é".repeat(101);
        let wrapped = wrap_text(&s);
        let lines: Vec<&str> = wrapped.split('\n').collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].chars().count(), 100);
        assert_eq!(lines[1], "é");
    }

    #[test]
    fn renders_all_sections() {
        let report = ResponseReport {
            status: "200 OK".to_string(),
            headers: vec![("Content-Type".to_string(), "text/plain".to_string())],
            body: "hello".to_string(),
        };
        let text = report.render();
        assert!(text.contains("Response Status: 200 OK"));
        assert!(text.contains("Content-Type: text/plain"));
        assert!(text.contains("Response Body:"));
        assert!(text.contains("hello"));
        assert!(text.starts_with(&"-".repeat(MAX_LINE_LENGTH)));
        assert!(text.trim_end().ends_with(&"-".repeat(MAX_LINE_LENGTH)));
    }
}
