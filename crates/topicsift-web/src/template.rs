use axum::response::Html;

const INDEX_HTML: &str = include_str!("../../../templates/index.html");

/// Render the index page, injecting the configured model name.
///
/// The name only lands in HTML text and attribute positions; scripts read
/// it back from `data-model`.
pub fn render_index(model: &str) -> Html<String> {
    let html = INDEX_HTML.replace("{{ model }}", &html_escape(model));
    Html(html)
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
