use axum::response::Html;

const USAGE: &str = r#"<h1>Image Search Abstraction Layer API</h1>
<p>Usage:</p>
<ul>
    <li>Search for images: <code>/query/yoursearchterm?page=1</code></li>
    <li>View recent searches: <code>/recent/</code></li>
</ul>
<p>Example Search: <a href="/query/cats%20funny?page=1">/query/cats funny?page=1</a></p>
<p>Example Recent: <a href="/recent/">/recent/</a></p>
"#;

pub async fn usage() -> Html<&'static str> {
    Html(USAGE)
}
