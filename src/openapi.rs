use std::borrow::Cow;

use aide::{openapi::Tag, transform::TransformOpenApi};

use crate::{error, extract::Json};

pub mod tag {
	pub const NEWS: &str = "News";
}

/// Applies the top-level documentation to the generated api.
pub fn docs(api: TransformOpenApi) -> TransformOpenApi {
	api.title("News API")
		.summary("A CRUD service for news posts")
		.description(include_str!("../README.md"))
		.tag(Tag {
			name: tag::NEWS.into(),
			description: Some("News post management".into()),
			..Default::default()
		})
		.default_response_with::<Json<error::ErrorResponse>, _>(|res| {
			res.example(error::ErrorResponse {
				success: false,
				errors: vec![error::Message {
					content: "error message".into(),
					field: Some("optional field".into()),
					details: Some(Cow::Owned({
						let mut map = error::Map::new();
						map.insert("key".into(), serde_json::json!("value"));
						map
					})),
				}],
			})
		})
}
