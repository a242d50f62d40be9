//! Server-rendered HTML pages

pub mod detail;
pub mod home;

pub use detail::render_detail;
pub use home::render_home;

/// Escapes text for use in HTML element content and quoted attributes
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>"#;

const PAGE_STYLE: &str = r#"</title>
    <style>
        body { font-family: sans-serif; background: #181818; color: #e4e4e4; margin: 0; }
        main { max-width: 960px; margin: 0 auto; padding: 2rem 1rem; }
        a { color: #e4a11b; }
        table { border-collapse: collapse; width: 100%; }
        td, th { border-bottom: 1px solid #333; padding: 0.5rem; text-align: left; vertical-align: top; }
        .cards { display: flex; flex-wrap: wrap; gap: 1rem; }
        .card { width: 140px; }
        .card img, .poster { max-width: 100%; }
        .good { color: #4caf50; }
        .bad { color: #f44336; }
        .unknown { color: #9e9e9e; }
    </style>
</head>
<body>
<main>
"#;

const PAGE_TAIL: &str = r#"
</main>
</body>
</html>
"#;

/// Wraps `body` (already escaped) in the shared page layout
pub(crate) fn page(title: &str, body: &str) -> String {
    let title = escape(title);
    let mut html = String::with_capacity(
        PAGE_HEAD.len() + title.len() + PAGE_STYLE.len() + body.len() + PAGE_TAIL.len(),
    );
    html.push_str(PAGE_HEAD);
    html.push_str(&title);
    html.push_str(PAGE_STYLE);
    html.push_str(body);
    html.push_str(PAGE_TAIL);
    html
}
