//! # Server Module
//!
//! The boundary between the router and whatever transport carries requests.
//! The dispatcher only needs a method and a path; [`RequestSource`] is that
//! seam. Parsing, sockets and response writing stay with the caller.

pub mod request;

pub use request::{ParsedRequest, RequestSource};
