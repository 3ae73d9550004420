/// Sandbox tokens granted to the preview frame. Scripts may run, but the frame
/// never shares the host's origin.
pub const SANDBOX_POLICY: &str = "allow-scripts";

/// The isolated rendering surface. Holds the last document assigned to it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SandboxedFrame {
    srcdoc: Option<String>,
    loads: usize,
}

impl SandboxedFrame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(&mut self, document: String) {
        self.srcdoc = Some(document);
        self.loads += 1;
    }

    pub fn srcdoc(&self) -> Option<&str> {
        self.srcdoc.as_deref()
    }

    /// Number of documents assigned so far.
    pub fn loads(&self) -> usize {
        self.loads
    }

    pub fn to_html(&self) -> String {
        format!(
            r#"<iframe id="previewFrame" title="Generated site preview" sandbox="{}" referrerpolicy="no-referrer" srcdoc="{}"></iframe>"#,
            SANDBOX_POLICY,
            escape_html(self.srcdoc.as_deref().unwrap_or_default())
        )
    }
}

/// Escapes text for use inside element content or a double-quoted attribute.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sandbox_never_grants_same_origin() {
        let frame = SandboxedFrame::new();
        let tag = frame.to_html();
        assert!(tag.contains(r#"sandbox="allow-scripts""#));
        assert!(!tag.contains("allow-same-origin"));
        assert!(!SANDBOX_POLICY.contains("allow-same-origin"));
    }

    #[test]
    fn test_srcdoc_is_attribute_escaped() {
        let mut frame = SandboxedFrame::new();
        frame.load(r#"<p class="a">Tom & 'Jerry'</p>"#.to_string());

        let tag = frame.to_html();
        assert!(tag.contains(
            "srcdoc=\"&lt;p class=&quot;a&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/p&gt;\""
        ));
        assert_eq!(frame.loads(), 1);
    }
}
