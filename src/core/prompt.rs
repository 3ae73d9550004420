/// Fixed instruction sent to the model. `{prompt}` is replaced with the
/// user's request.
const INSTRUCTION_TEMPLATE: &str = r#"You are a senior front-end engineer who builds websites from short briefs.

Build a SINGLE-PAGE responsive website from the request below and nothing else.

Request:
"{prompt}"

Return these fields:
1. "html": only the inner markup of <body> (header, sections, footer and so on).
   Never emit <html>, <head>, <body>, <style> or <script> tags.
   - Semantic HTML5.
   - Placeholder copy is fine; draw imagery with inline SVG or CSS gradients, never remote URLs.
   - Include navigation, a hero and content sections where they fit the request.
2. "css": the complete stylesheet, mobile-first, with modern spacing and typography.
   - No CDNs, no @import of remote files, no web fonts.
   - CSS variables, flexbox, grid and media queries are allowed.
3. "js": vanilla JavaScript for small interactions such as a menu toggle or accordion.
   - Return a minimal stub when the page needs no interaction.
4. "notes": a very short summary of the design decisions, at most 50 words.

Rules:
- No Markdown and no code fences.
- Do not repeat these instructions in comments.
- The output MUST match the response schema."#;

pub fn build_instruction(prompt: &str) -> String {
    INSTRUCTION_TEMPLATE.replace("{prompt}", prompt)
}
