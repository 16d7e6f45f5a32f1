//! HTTP response building module
//!
//! Builders for every response the dev server emits. Header insertion order is
//! the order the headers go out on the wire.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::ext::ReasonPhrase;
use hyper::{Response, StatusCode};

/// CORS headers attached to file and preflight responses
pub const CORS_HEADERS: [(&str, &str); 3] = [
    ("Access-Control-Allow-Origin", "*"),
    (
        "Access-Control-Allow-Methods",
        "GET, POST, PUT, DELETE, OPTIONS",
    ),
    (
        "Access-Control-Allow-Headers",
        "Content-Type, Authorization",
    ),
];

/// Build 200 response carrying a file's bytes
pub fn build_file_response(data: Bytes, content_type: &str, is_head: bool) -> Response<Full<Bytes>> {
    let content_length = data.len();
    let body = if is_head { Bytes::new() } else { data };

    let mut builder = Response::builder()
        .status(200)
        .header("Content-Type", content_type)
        .header("Content-Length", content_length);
    for (name, value) in CORS_HEADERS {
        builder = builder.header(name, value);
    }

    builder
        .header("Cache-Control", "no-cache")
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build OPTIONS response (CORS preflight)
pub fn build_options_response() -> Response<Full<Bytes>> {
    let mut builder = Response::builder().status(200);
    for (name, value) in CORS_HEADERS {
        builder = builder.header(name, value);
    }

    builder.body(Full::new(Bytes::new())).unwrap_or_else(|e| {
        log_build_error("OPTIONS", &e);
        Response::new(Full::new(Bytes::new()))
    })
}

/// Build the custom 404 page for `path`
pub fn build_404_response(path: &str, is_head: bool) -> Response<Full<Bytes>> {
    let html = not_found_page(path);
    let content_length = html.len();
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from(html)
    };

    Response::builder()
        .status(404)
        .header("Content-Type", "text/html")
        .header("Content-Length", content_length)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("404", &e);
            let mut resp = Response::new(Full::new(Bytes::from("404 Not Found")));
            *resp.status_mut() = StatusCode::NOT_FOUND;
            resp
        })
}

/// Build a standard error page
///
/// `message` becomes the status line's reason phrase when it is a valid one,
/// and is shown in the page body either way.
pub fn build_error_response(
    status: StatusCode,
    message: &str,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let html = error_page(status, message);
    let content_length = html.len();
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from(html)
    };

    let mut builder = Response::builder()
        .status(status)
        .header("Content-Type", "text/html;charset=utf-8")
        .header("Connection", "close")
        .header("Content-Length", content_length);
    if let Ok(reason) = ReasonPhrase::try_from(message.to_owned()) {
        builder = builder.extension(reason);
    }

    builder.body(Full::new(body)).unwrap_or_else(|e| {
        log_build_error(status.as_str(), &e);
        let mut resp = Response::new(Full::new(Bytes::new()));
        *resp.status_mut() = status;
        resp
    })
}

/// Short explanation shown under the message on error pages
pub const fn explain(status: StatusCode) -> &'static str {
    match status.as_u16() {
        403 => "Request forbidden -- authorization will not help",
        500 => "Server got itself in trouble",
        501 => "Server does not support this operation",
        _ => "",
    }
}

fn not_found_page(path: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>404 Not Found - Loom4</title>
    <style>
        body {{
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            margin: 0; padding: 40px; background: #f8fafc; color: #2d3748;
        }}
        .container {{
            max-width: 600px; margin: 0 auto; background: white;
            padding: 40px; border-radius: 12px; box-shadow: 0 4px 6px rgba(0,0,0,0.1);
        }}
        h1 {{ color: #e53e3e; font-size: 2rem; margin-bottom: 20px; }}
        .code {{ background: #f7fafc; padding: 10px; border-radius: 6px; font-family: monospace; }}
        a {{ color: #3182ce; text-decoration: none; }}
        a:hover {{ text-decoration: underline; }}
    </style>
</head>
<body>
    <div class="container">
        <h1>404 Not Found</h1>
        <p>The requested file <span class="code">{}</span> was not found.</p>
        <p><a href="/">← Return to Loom4 Application</a></p>
    </div>
</body>
</html>"#,
        escape_html(path)
    )
}

fn error_page(status: StatusCode, message: &str) -> String {
    let code = status.as_u16();
    format!(
        r#"<!DOCTYPE HTML>
<html lang="en">
    <head>
        <meta charset="utf-8">
        <title>Error response</title>
    </head>
    <body>
        <h1>Error response</h1>
        <p>Error code: {code}</p>
        <p>Message: {}.</p>
        <p>Error code explanation: {code} - {}.</p>
    </body>
</html>
"#,
        escape_html(message),
        explain(status)
    )
}

/// Escape characters with special meaning in HTML text
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_bytes(resp: Response<Full<Bytes>>) -> Bytes {
        resp.into_body().collect().await.unwrap().to_bytes()
    }

    fn header<'a>(resp: &'a Response<Full<Bytes>>, name: &str) -> &'a str {
        resp.headers().get(name).unwrap().to_str().unwrap()
    }

    #[tokio::test]
    async fn test_file_response_headers_in_order() {
        let resp = build_file_response(Bytes::from_static(b"body {}"), "text/css", false);
        assert_eq!(resp.status(), StatusCode::OK);

        let names: Vec<&str> = resp.headers().keys().map(|k| k.as_str()).collect();
        assert_eq!(
            names,
            [
                "content-type",
                "content-length",
                "access-control-allow-origin",
                "access-control-allow-methods",
                "access-control-allow-headers",
                "cache-control",
            ]
        );
        assert_eq!(header(&resp, "content-length"), "7");
        assert_eq!(header(&resp, "cache-control"), "no-cache");
        assert_eq!(body_bytes(resp).await, Bytes::from_static(b"body {}"));
    }

    #[tokio::test]
    async fn test_head_keeps_length_drops_body() {
        let resp = build_file_response(Bytes::from_static(b"12345"), "text/plain", true);
        assert_eq!(header(&resp, "content-length"), "5");
        assert!(body_bytes(resp).await.is_empty());
    }

    #[tokio::test]
    async fn test_options_response() {
        let resp = build_options_response();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers().len(), 3);
        assert_eq!(header(&resp, "access-control-allow-origin"), "*");
        assert_eq!(
            header(&resp, "access-control-allow-methods"),
            "GET, POST, PUT, DELETE, OPTIONS"
        );
        assert_eq!(
            header(&resp, "access-control-allow-headers"),
            "Content-Type, Authorization"
        );
        assert!(body_bytes(resp).await.is_empty());
    }

    #[tokio::test]
    async fn test_404_page() {
        let resp = build_404_response("/missing.png", false);
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(header(&resp, "content-type"), "text/html");
        assert!(resp.headers().get("access-control-allow-origin").is_none());

        let declared: usize = header(&resp, "content-length").parse().unwrap();
        let body = body_bytes(resp).await;
        assert_eq!(declared, body.len());

        let html = std::str::from_utf8(&body).unwrap();
        assert!(html.contains("<title>404 Not Found - Loom4</title>"));
        assert!(html.contains("/missing.png"));
        assert!(html.contains(r#"<a href="/">"#));
    }

    #[test]
    fn test_404_page_escapes_path() {
        let html = not_found_page("/<script>");
        assert!(html.contains("/&lt;script&gt;"));
        assert!(!html.contains("/<script>"));
    }

    #[tokio::test]
    async fn test_error_page_reason_phrase() {
        let resp = build_error_response(
            StatusCode::FORBIDDEN,
            "Forbidden: Directory traversal not allowed",
            false,
        );
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        let reason = resp.extensions().get::<ReasonPhrase>().unwrap();
        assert_eq!(
            reason.as_bytes(),
            b"Forbidden: Directory traversal not allowed"
        );
        assert_eq!(header(&resp, "content-type"), "text/html;charset=utf-8");

        let body = body_bytes(resp).await;
        let html = std::str::from_utf8(&body).unwrap();
        assert!(html.contains("Error code: 403"));
        assert!(html.contains("Request forbidden -- authorization will not help"));
    }

    #[test]
    fn test_explain_only_covers_error_page_codes() {
        assert_eq!(explain(StatusCode::INTERNAL_SERVER_ERROR), "Server got itself in trouble");
        // 404 has its own page and never reaches the standard error page
        assert_eq!(explain(StatusCode::NOT_FOUND), "");
    }

    #[test]
    fn test_error_page_invalid_reason_is_skipped() {
        let resp = build_error_response(StatusCode::INTERNAL_SERVER_ERROR, "bad\r\nline", false);
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(resp.extensions().get::<ReasonPhrase>().is_none());
    }
}
