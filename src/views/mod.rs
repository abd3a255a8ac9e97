//! Server-rendered HTML pages.
//!
//! Pages are plain `format!` strings wrapped in a shared layout. Anything
//! that came from a user or the database goes through [`escape`].

pub mod product;

use axum::http::StatusCode;
use axum::response::Html;

const STYLE: &str = r#"
    body { font-family: Arial, sans-serif; margin: 40px; background: #f5f5f5; }
    .container { max-width: 960px; margin: 0 auto; background: white; padding: 30px; border-radius: 10px; }
    nav a { margin-right: 16px; color: #007bff; text-decoration: none; }
    table { border-collapse: collapse; width: 100%; margin-top: 16px; }
    th, td { text-align: left; padding: 8px; border-bottom: 1px solid #ddd; }
    .notice { background: #e7f5e9; border-left: 4px solid #28a745; padding: 10px; }
    .errors { background: #fdecea; border-left: 4px solid #dc3545; padding: 10px; }
    label { display: block; margin-top: 12px; }
    input { padding: 6px; width: 320px; }
"#;

/// Escape text for HTML element content and double-quoted attributes.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn layout(title: &str, body: &str) -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>{title} - Stockroom</title>
    <style>{STYLE}</style>
</head>
<body>
    <div class="container">
        <nav><a href="/">Home</a><a href="/products">Products</a><a href="/product/add">Add product</a></nav>
        <h1>{title}</h1>
{body}
    </div>
</body>
</html>
"#,
        title = escape(title),
    ))
}

fn message_list(class: &str, messages: &[String]) -> String {
    if messages.is_empty() {
        return String::new();
    }
    let items: String = messages
        .iter()
        .map(|m| format!("<li>{}</li>", escape(m)))
        .collect();
    format!(r#"<div class="{class}"><ul>{items}</ul></div>"#)
}

pub fn home_page() -> Html<String> {
    layout(
        "Inventory",
        r#"        <p>Track products, their stock levels and prices.</p>
        <ul>
            <li><a href="/products">View all products</a></li>
            <li><a href="/product/add">Add a new product</a></li>
        </ul>"#,
    )
}

pub fn error_page(status: StatusCode, messages: &[String]) -> Html<String> {
    let title = status.canonical_reason().unwrap_or("Error");
    let body = format!(
        r#"        {}
        <p><a href="/products">Back to products</a></p>"#,
        message_list("errors", messages)
    );
    layout(title, &body)
}
