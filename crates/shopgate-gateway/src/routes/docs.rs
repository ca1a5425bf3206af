//! Serves the rendered API surface: the OpenAPI document and a small
//! interactive viewer that fetches it.

use actix_web::{web, HttpResponse};

use crate::state::AppState;

const VIEWER_HTML: &str = r##"<!DOCTYPE html>
<html>
<head>
  <title>E-Commerce Gateway API</title>
  <meta charset="utf-8"/>
  <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css"/>
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
  <script>
    SwaggerUIBundle({
      url: "/docs/openapi.json",
      dom_id: "#swagger-ui",
    });
  </script>
</body>
</html>
"##;

/// GET /docs/openapi.json - the gateway's declared surface, rendered once
/// at startup and byte-stable across requests.
pub async fn openapi_json(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("application/json")
        .body(state.openapi_doc.as_ref().clone())
}

/// GET /docs - interactive documentation viewer
pub async fn viewer() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(VIEWER_HTML)
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/docs", web::get().to(viewer))
        .route("/docs/openapi.json", web::get().to(openapi_json));
}
