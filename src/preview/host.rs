use crate::preview::client::Panels;
use crate::preview::frame::{escape_html, SandboxedFrame};

/// A standalone page showing the status line, the four panels and the
/// sandboxed preview. Written by `site-forge generate`.
pub fn render_host_page(prompt: &str, status: &str, panels: &Panels, frame: &SandboxedFrame) -> String {
    let panel = |id: &str, label: &str, text: &str| {
        format!(
            "<section class=\"panel\"><h2>{label}</h2><textarea id=\"{id}\" spellcheck=\"false\">{text}</textarea></section>",
            label = label,
            id = id,
            text = escape_html(text),
        )
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8"/>
<meta name="viewport" content="width=device-width,initial-scale=1.0"/>
<title>site-forge preview</title>
<style>
body{{margin:0;font-family:system-ui,sans-serif;background:#f4f4f5;color:#18181b}}
header{{padding:12px 20px;background:#18181b;color:#fafafa}}
main{{display:grid;grid-template-columns:1fr 1fr;gap:12px;padding:12px}}
#previewFrame{{width:100%;height:80vh;border:1px solid #d4d4d8;background:#fff}}
.panels{{display:grid;gap:8px}}
.panel textarea{{width:100%;min-height:140px;font-family:monospace}}
</style>
</head>
<body>
<header><strong>Prompt:</strong> {prompt} &middot; <span id="status">{status}</span></header>
<main>
{frame}
<div class="panels">
{html}
{css}
{js}
{notes}
</div>
</main>
</body>
</html>
"#,
        prompt = escape_html(prompt),
        status = escape_html(status),
        frame = frame.to_html(),
        html = panel("htmlCode", "HTML", &panels.html),
        css = panel("cssCode", "CSS", &panels.css),
        js = panel("jsCode", "JS", &panels.js),
        notes = panel("notesText", "Notes", &panels.notes),
    )
}
