// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Server error types and HTTP response conversions.

use axum::{
	http::StatusCode,
	response::{IntoResponse, Response},
	Json,
};
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
	/// No page exists for the requested locale.
	#[error("Locale not found: {0}")]
	LocaleNotFound(String),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
	pub error: String,
	pub message: String,
}

impl IntoResponse for ServerError {
	fn into_response(self) -> Response {
		let (status, error_response) = match &self {
			ServerError::LocaleNotFound(locale) => (
				StatusCode::NOT_FOUND,
				ErrorResponse {
					error: "not_found".to_string(),
					message: format!("Locale not found: {locale}"),
				},
			),
		};

		(status, Json(error_response)).into_response()
	}
}
