//! HTTP protocol layer module
//!
//! Content-type policy and response builders, decoupled from file resolution.

pub mod mime;
pub mod response;

// Re-export commonly used types
pub use mime::get_content_type;
pub use response::{
    build_404_response, build_error_response, build_file_response, build_options_response,
};
