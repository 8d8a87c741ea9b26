//! HTTP handlers and their error and response types
//!
//! # Features
//!
//! - **Generic handlers**: [`list`], [`get_one`] and [`put`] serve any [`Resource`](crate::resource::Resource)
//! - **Error taxonomy**: [`ApiError`] with its three kinds and the [`ErrorEnvelope`] body
//! - **Bodies**: [`JsonBody`] in, [`Rendered`] out, both failing into [`ApiError`]

mod body;
mod error;
mod resources;
mod response;

pub use body::JsonBody;
pub use error::{ApiError, ApiErrorKind, ErrorEnvelope};
pub use resources::{fallback, get_one, list, put};
pub use response::Rendered;
