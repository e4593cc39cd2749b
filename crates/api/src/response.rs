//! Shared response envelope types for API handlers.
//!
//! Most responses use a `{ "data": ... }` envelope. Write endpoints that the
//! web client checks for an outcome use [`MessageResponse`], which adds a
//! `message` field next to the data.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(DataResponse { data: items }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// `{ "message": ..., "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct MessageResponse<T: Serialize> {
    pub message: &'static str,
    pub data: T,
}

impl<T: Serialize> MessageResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            message: "success",
            data,
        }
    }
}
