use crate::domain::model::GenerationResult;
use regex::Regex;
use std::sync::OnceLock;

fn style_close() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)</(style)").expect("valid regex"))
}

fn script_close() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)</(script)").expect("valid regex"))
}

/// Wraps the three fragments in a minimal HTML5 skeleton: CSS in a single
/// `<style>` block, the markup as the body, JS in a single trailing `<script>`.
///
/// A closing `</style` or `</script` inside a fragment would end its block
/// early, so it is written as `<\/style` / `<\/script`.
pub fn assemble_document(site: &GenerationResult) -> String {
    let css = style_close().replace_all(&site.css, r"<\/$1");
    let js = script_close().replace_all(&site.js, r"<\/$1");

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8"/>
<meta name="viewport" content="width=device-width,initial-scale=1.0"/>
<style>
{css}
</style>
</head>
<body>
{html}

<script>
{js}
</script>
</body>
</html>"#,
        css = css,
        html = site.html,
        js = js,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bakery() -> GenerationResult {
        GenerationResult {
            html: "<h1>Bakery</h1>".to_string(),
            css: "h1{color:red}".to_string(),
            js: String::new(),
            notes: "simple".to_string(),
        }
    }

    #[test]
    fn test_document_skeleton() {
        let doc = assemble_document(&bakery());

        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert!(doc.contains(r#"<meta name="viewport" content="width=device-width,initial-scale=1.0"/>"#));
        assert_eq!(doc.matches("<style>").count(), 1);
        assert_eq!(doc.matches("<body>").count(), 1);
        assert_eq!(doc.matches("<script>").count(), 1);
        assert!(doc.contains("<style>\nh1{color:red}\n</style>"));

        let body_start = doc.find("<body>").unwrap();
        let body_end = doc.find("</body>").unwrap();
        assert!(doc[body_start..body_end].contains("<h1>Bakery</h1>"));
    }

    #[test]
    fn test_notes_are_not_rendered() {
        let doc = assemble_document(&bakery());
        assert!(!doc.contains("simple"));
    }

    #[test]
    fn test_closing_tags_in_fragments_are_neutralized() {
        let site = GenerationResult {
            html: "<p>x</p>".to_string(),
            css: "p{}</STYLE><style>p{color:blue}".to_string(),
            js: "console.log('</script><script>alert(1)')".to_string(),
            notes: String::new(),
        };
        let doc = assemble_document(&site);

        assert_eq!(doc.matches("</style>").count(), 1);
        assert_eq!(doc.matches("</script>").count(), 1);
        assert!(doc.contains(r"<\/STYLE>"));
        assert!(doc.contains(r"<\/script>"));
    }
}
