use std::borrow::Cow;

use axum::{
	body::Body,
	extract::rejection,
	http::{Response, StatusCode},
	response::IntoResponse,
};
use schemars::JsonSchema;
use serde::Serialize;

use crate::extract::Json;

pub type Map = serde_json::Map<String, serde_json::Value>;

/// A single error message presented to the client.
///
/// The `details` map carries structured context, such as the id that
/// failed to resolve.
#[derive(Debug, Serialize, JsonSchema)]
pub struct Message<'e> {
	pub content: Cow<'e, str>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub field: Option<Cow<'e, str>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub details: Option<Cow<'e, Map>>,
}

/// The body attached to every error response.
#[derive(Debug, Serialize, JsonSchema)]
pub struct ErrorResponse<'e> {
	pub success: bool,
	pub errors: Vec<Message<'e>>,
}

/// Maps an error onto a status code and a list of client-facing messages.
///
/// The Display trait is not sent to the client, so it can show
/// sensitive information.
pub trait ErrorShape: Sized {
	fn status(&self) -> StatusCode;
	fn errors(&self) -> Vec<Message<'_>>;

	fn into_response(self) -> Response<Body> {
		(
			self.status(),
			Json(ErrorResponse {
				success: false,
				errors: self.errors(),
			}),
		)
			.into_response()
	}
}

/// An application-level error, shared by every route.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
	#[error("validation error: {0}")]
	Validation(#[from] validator::ValidationErrors),
	#[error("json error: {0}")]
	Json(#[from] rejection::JsonRejection),
	#[error("query error: {0}")]
	Query(#[from] rejection::QueryRejection),
	#[error("path error: {0}")]
	Path(#[from] rejection::PathRejection),
	#[error("database error: {0}")]
	Database(#[from] sqlx::Error),
}

impl ErrorShape for AppError {
	fn status(&self) -> StatusCode {
		match self {
			Self::Validation(..) | Self::Json(..) | Self::Query(..) | Self::Path(..) => {
				StatusCode::BAD_REQUEST
			}
			Self::Database(..) => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}

	fn errors(&self) -> Vec<Message<'_>> {
		match self {
			Self::Validation(errors) => errors
				.field_errors()
				.into_iter()
				.flat_map(|(field, errors)| {
					errors.iter().map(move |error| Message {
						content: error.to_string().into(),
						field: Some(field.to_string().into()),
						details: None,
					})
				})
				.collect(),
			Self::Json(error) => vec![Message {
				content: error.to_string().into(),
				field: None,
				details: None,
			}],
			Self::Query(error) => vec![Message {
				content: error.to_string().into(),
				field: None,
				details: None,
			}],
			Self::Path(error) => vec![Message {
				content: error.to_string().into(),
				field: None,
				details: None,
			}],
			// Database details stay server-side
			Self::Database(..) => Vec::new(),
		}
	}
}

impl IntoResponse for AppError {
	fn into_response(self) -> Response<Body> {
		ErrorShape::into_response(self)
	}
}

/// An error returned from a route handler: either a route-specific error
/// or an application-level one.
#[derive(Debug, thiserror::Error)]
pub enum RouteError<E> {
	#[error(transparent)]
	App(AppError),
	#[error(transparent)]
	Route(E),
}

impl<E> From<AppError> for RouteError<E> {
	fn from(error: AppError) -> Self {
		Self::App(error)
	}
}

impl<E> From<sqlx::Error> for RouteError<E> {
	fn from(error: sqlx::Error) -> Self {
		Self::App(AppError::Database(error))
	}
}

impl<E> ErrorShape for RouteError<E>
where
	E: ErrorShape,
{
	fn status(&self) -> StatusCode {
		match self {
			Self::App(error) => error.status(),
			Self::Route(error) => error.status(),
		}
	}

	fn errors(&self) -> Vec<Message<'_>> {
		match self {
			Self::App(error) => error.errors(),
			Self::Route(error) => error.errors(),
		}
	}
}

impl<E> IntoResponse for RouteError<E>
where
	E: ErrorShape,
{
	fn into_response(self) -> Response<Body> {
		ErrorShape::into_response(self)
	}
}

impl<E> aide::OperationOutput for RouteError<E> {
	type Inner = ErrorResponse<'static>;
}
