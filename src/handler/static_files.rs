//! Static file serving module
//!
//! Maps a request path onto the document root, enforces the traversal rules,
//! and builds the file or error response.

use crate::error::ServeError;
use crate::handler::router::RequestContext;
use crate::http;
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use percent_encoding::percent_decode_str;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Served in place of `/`
pub const INDEX_PATH: &str = "/index.html";

/// Serve the file named by the request path, or the matching error page
pub async fn serve_file(ctx: &RequestContext<'_>, document_root: &Path) -> Response<Full<Bytes>> {
    let path = effective_path(ctx.path);

    match load_file(document_root, path).await {
        Ok((content, content_type)) => {
            http::build_file_response(Bytes::from(content), content_type, ctx.is_head)
        }
        Err(ServeError::NotFound) => http::build_404_response(path, ctx.is_head),
        Err(e) => {
            if let ServeError::Io(ref io) = e {
                logger::log_serve_failed(path, io);
            }
            http::build_error_response(e.status(), &e.to_string(), ctx.is_head)
        }
    }
}

/// Substitute the index page for the bare root path
pub fn effective_path(path: &str) -> &str {
    if path == "/" {
        INDEX_PATH
    } else {
        path
    }
}

/// True when the path, raw or percent-decoded, contains a parent-directory sequence
pub fn contains_traversal(path: &str) -> bool {
    path.contains("..") || percent_decode_str(path).decode_utf8_lossy().contains("..")
}

/// Resolve a request path to an existing regular file under `document_root`
///
/// `document_root` must already be canonical.
pub async fn resolve_path(document_root: &Path, path: &str) -> Result<PathBuf, ServeError> {
    if contains_traversal(path) {
        return Err(ServeError::TraversalRejected);
    }

    let decoded = percent_decode_str(path)
        .decode_utf8()
        .map_err(|_| ServeError::NotFound)?;
    let candidate = document_root.join(decoded.trim_start_matches('/'));

    // Missing files and directories both answer 404, never a listing
    let metadata = fs::metadata(&candidate)
        .await
        .map_err(|_| ServeError::NotFound)?;
    if metadata.is_dir() {
        return Err(ServeError::NotFound);
    }

    let canonical = fs::canonicalize(&candidate)
        .await
        .map_err(|_| ServeError::NotFound)?;
    if !canonical.starts_with(document_root) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {} -> {}",
            path,
            canonical.display()
        ));
        return Err(ServeError::TraversalRejected);
    }

    Ok(candidate)
}

/// Resolve and read a file, returning its bytes and content type
pub async fn load_file(
    document_root: &Path,
    path: &str,
) -> Result<(Vec<u8>, &'static str), ServeError> {
    let file_path = resolve_path(document_root, path).await?;
    let content = fs::read(&file_path).await?;
    let content_type = http::get_content_type(&file_path.to_string_lossy());
    Ok((content, content_type))
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use hyper::ext::ReasonPhrase;
    use tempfile::TempDir;

    fn doc_root() -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("index.html"), b"<h1>hi</h1>\n").unwrap();
        std::fs::write(dir.path().join("app.js"), b"").unwrap();
        std::fs::create_dir(dir.path().join("assets")).unwrap();
        std::fs::write(dir.path().join("assets").join("my file.txt"), b"spaced").unwrap();
        let root = dir.path().canonicalize().unwrap();
        (dir, root)
    }

    #[test]
    fn test_effective_path() {
        assert_eq!(effective_path("/"), "/index.html");
        assert_eq!(effective_path("/app.js"), "/app.js");
        assert_eq!(effective_path(""), "");
    }

    #[test]
    fn test_contains_traversal() {
        assert!(contains_traversal("/../../etc/passwd"));
        assert!(contains_traversal("/assets/.."));
        assert!(contains_traversal("/notes..txt"));
        assert!(contains_traversal("/%2e%2e/secret"));
        assert!(contains_traversal("/.%2E/secret"));
        assert!(!contains_traversal("/assets/app.min.js"));
        assert!(!contains_traversal("/%2e/app.js"));
    }

    #[tokio::test]
    async fn test_traversal_rejected_even_if_file_exists() {
        let (_dir, root) = doc_root();
        let result = resolve_path(&root, "/assets/../index.html").await;
        assert!(matches!(result, Err(ServeError::TraversalRejected)));
    }

    #[tokio::test]
    async fn test_load_existing_files() {
        let (_dir, root) = doc_root();

        let (content, content_type) = load_file(&root, "/index.html").await.unwrap();
        assert_eq!(content, b"<h1>hi</h1>\n");
        assert_eq!(content_type, "text/html");

        let (content, content_type) = load_file(&root, "/app.js").await.unwrap();
        assert!(content.is_empty());
        assert_eq!(content_type, "text/javascript");
    }

    #[tokio::test]
    async fn test_percent_decoded_lookup() {
        let (_dir, root) = doc_root();
        let (content, content_type) = load_file(&root, "/assets/my%20file.txt").await.unwrap();
        assert_eq!(content, b"spaced");
        assert_eq!(content_type, "text/plain");
    }

    #[tokio::test]
    async fn test_missing_and_directory_are_not_found() {
        let (_dir, root) = doc_root();
        assert!(matches!(
            resolve_path(&root, "/missing.png").await,
            Err(ServeError::NotFound)
        ));
        assert!(matches!(
            resolve_path(&root, "/assets/").await,
            Err(ServeError::NotFound)
        ));
        assert!(matches!(
            resolve_path(&root, "/assets").await,
            Err(ServeError::NotFound)
        ));
        // Invalid UTF-8 after decoding
        assert!(matches!(
            resolve_path(&root, "/%FF.txt").await,
            Err(ServeError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_binary_file_is_byte_identical() {
        let (_dir, root) = doc_root();
        let bytes: Vec<u8> = vec![0x89, b'P', b'N', b'G', 0x00, 0xFF, 0xFE, 0x80, 0x0D, 0x0A];
        std::fs::write(root.join("logo.png"), &bytes).unwrap();

        let ctx = RequestContext {
            path: "/logo.png",
            is_head: false,
        };
        let resp = serve_file(&ctx, &root).await;
        assert_eq!(resp.status(), hyper::StatusCode::OK);
        assert_eq!(resp.headers()["content-type"], "image/png");
        assert_eq!(resp.headers()["content-length"], "10");

        let body = resp.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(body.as_ref(), bytes.as_slice());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_unreadable_file_is_server_error() {
        let (_dir, root) = doc_root();
        // A socket passes the existence check but cannot be opened for reading
        let _socket = std::os::unix::net::UnixListener::bind(root.join("dev.sock")).unwrap();

        let ctx = RequestContext {
            path: "/dev.sock",
            is_head: false,
        };
        let resp = serve_file(&ctx, &root).await;
        assert_eq!(resp.status(), hyper::StatusCode::INTERNAL_SERVER_ERROR);

        let reason = resp.extensions().get::<ReasonPhrase>().unwrap();
        let reason = std::str::from_utf8(reason.as_bytes()).unwrap();
        assert!(reason.starts_with("Internal Server Error: "), "{reason}");

        let body = resp.into_body().collect().await.unwrap().to_bytes();
        assert!(std::str::from_utf8(&body).unwrap().contains("Error code: 500"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_symlink_escaping_root_rejected() {
        let (_dir, root) = doc_root();
        let outside = TempDir::new().unwrap();
        std::fs::write(outside.path().join("secret.txt"), b"secret").unwrap();
        std::os::unix::fs::symlink(outside.path().join("secret.txt"), root.join("leak.txt"))
            .unwrap();

        assert!(matches!(
            resolve_path(&root, "/leak.txt").await,
            Err(ServeError::TraversalRejected)
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_symlink_inside_root_served() {
        let (_dir, root) = doc_root();
        std::os::unix::fs::symlink(root.join("index.html"), root.join("home.html")).unwrap();

        let (content, _) = load_file(&root, "/home.html").await.unwrap();
        assert_eq!(content, b"<h1>hi</h1>\n");
    }
}
