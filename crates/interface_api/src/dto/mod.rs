//! Request/response bodies

pub mod tiss;
