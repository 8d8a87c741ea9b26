//! Request pipeline stages and tower layers
//!
//! The stages run as axum extractors: a handler names the stage output it
//! needs as an argument, and a failing stage answers the request with its
//! [`ApiError`](crate::handlers::ApiError) before the handler is called.
//!
//! - [`PageCursor`](crate::repository::PageCursor) parses `?page_id=`
//! - [`Loaded`] resolves `/{collection}/{id}` to a stored record

pub mod page_cursor;
pub mod request_tracking;
pub mod resource_loader;

pub use page_cursor::{parse_page_cursor, PAGE_ID_PARAM};
pub use request_tracking::{
    request_id_layer, request_id_propagation_layer, sensitive_headers_layer, REQUEST_ID_HEADER,
    SENSITIVE_HEADERS,
};
pub use resource_loader::{resolve_resource, Loaded, ID_PARAM};
