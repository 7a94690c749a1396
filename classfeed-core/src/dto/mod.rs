//! Data Transfer Objects for the analysis service API
//!
//! Shapes that only exist on the wire: the multipart upload form, the
//! error bodies the service returns, and timestamp (de)serialization.

pub mod error;
pub mod timestamp;
pub mod upload;
