//! MIME type detection module
//!
//! Returns the Content-Type for a served file based on its name.

/// Content types that front-end code relies on, checked before the generic table
const FIXED_TYPES: [(&str, &str); 4] = [
    (".js", "text/javascript"),
    (".css", "text/css"),
    (".html", "text/html"),
    (".json", "application/json"),
];

/// Used when the generic table has no entry for the extension
const FALLBACK_TYPE: &str = "text/plain";

/// Get MIME Content-Type for a file path
///
/// # Examples
/// ```
/// use loom_devserver::http::mime::get_content_type;
/// assert_eq!(get_content_type("app.js"), "text/javascript");
/// assert_eq!(get_content_type("logo.png"), "image/png");
/// assert_eq!(get_content_type("Makefile"), "text/plain");
/// ```
pub fn get_content_type(file_path: &str) -> &'static str {
    FIXED_TYPES
        .iter()
        .find(|(suffix, _)| file_path.ends_with(suffix))
        .map(|(_, content_type)| *content_type)
        .or_else(|| mime_guess::from_path(file_path).first_raw())
        .unwrap_or(FALLBACK_TYPE)
}
