use axum::{http::StatusCode, response::Html, response::IntoResponse};

const INDEX_PAGE: &str = "<html>
<head><title>Tvheadend Exporter</title></head>
<body>
<h1>Tvheadend Exporter</h1>
<p><a href=\"/metrics\">Metrics</a></p>
<p><a href=\"/catalog\">Metric catalog</a></p>
</body>
</html>
";

pub async fn index() -> impl IntoResponse {
    Html(INDEX_PAGE)
}

pub async fn health_live() -> impl IntoResponse {
    StatusCode::OK
}
