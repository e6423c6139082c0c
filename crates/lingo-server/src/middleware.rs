// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Root redirect middleware.
//!
//! Add with `from_fn_with_state`:
//!
//! ```ignore
//! use axum::middleware::from_fn_with_state;
//!
//! let app = Router::new()
//!     .route("/", get(index))
//!     .layer(from_fn_with_state(state.clone(), root_redirect_layer));
//! ```

use axum::{
	body::Body,
	extract::State,
	http::{
		header::{LOCATION, VARY},
		HeaderValue, Request,
	},
	middleware::Next,
	response::{IntoResponse, Response},
};
use lingo_common_i18n::{
	decide_root_redirect, DetectionContext, RedirectDecision, ServerContext, ROOT_PATH,
};
use tracing::{debug, instrument, warn};

use crate::api::AppState;

/// Redirect requests for `/` to a locale-specific root.
///
/// Detection (cookie first, then `Accept-Language`) feeds the redirect
/// policy. The query string is carried over to the `Location`. Any other path
/// is forwarded untouched.
#[instrument(
	name = "root_redirect_layer",
	skip_all,
	fields(target = tracing::field::Empty)
)]
pub async fn root_redirect_layer(
	State(state): State<AppState>,
	request: Request<Body>,
	next: Next,
) -> Response {
	if request.uri().path() != ROOT_PATH {
		return next.run(request).await;
	}

	let context = DetectionContext::Server(ServerContext::from_headers(request.headers()));
	let detection = state.detector.detect(&context);
	let decision = decide_root_redirect(ROOT_PATH, &state.redirect, detection.resolved());

	let RedirectDecision::Redirect {
		target_path,
		status,
	} = decision
	else {
		return next.run(request).await;
	};

	let location = match request.uri().query() {
		Some(query) => format!("{target_path}?{query}"),
		None => target_path,
	};

	let location = match HeaderValue::from_str(&location) {
		Ok(value) => value,
		Err(e) => {
			warn!(location = %location, error = %e, "invalid redirect location, serving root");
			return next.run(request).await;
		}
	};

	tracing::Span::current().record("target", tracing::field::debug(&location));
	debug!(status = status.as_u16(), "redirecting root request");

	(
		status,
		[
			(LOCATION, location),
			(VARY, HeaderValue::from_static("accept-language, cookie")),
		],
	)
		.into_response()
}
