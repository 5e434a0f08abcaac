pub use crate::route::model::IdInput;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// A single news post, created by a user.
#[derive(Debug, Serialize, FromRow, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct News {
	/// The unique identifier of the post.
	pub id: Uuid,
	/// The title of the post.
	pub title: String,
	/// The content of the post.
	pub content: String,
	/// Labels attached to the post, used for filtering the listing.
	pub tags: Vec<String>,
	/// The user that created the post.
	pub creator_id: Uuid,
}

/// Wrapper around a single post, `null` when the lookup missed.
#[derive(Debug, Serialize, JsonSchema)]
pub struct NewsResponse {
	pub news: Option<News>,
}

/// Wrapper around the filtered listing, empty when nothing matched.
#[derive(Debug, Serialize, JsonSchema)]
pub struct NewsListResponse {
	pub news: Vec<News>,
}

#[derive(Debug, Deserialize, Validate, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateNewsInput {
	#[validate(length(min = 1))]
	pub title: String,
	pub content: String,
	pub tags: Vec<String>,
	pub creator_id: Uuid,
}

/// Replaces every mutable field of a post at once. Partial updates are
/// not supported, so all fields are required.
#[derive(Debug, Deserialize, Validate, JsonSchema)]
pub struct UpdateNewsInput {
	#[validate(length(min = 1))]
	pub title: String,
	pub content: String,
	pub tags: Vec<String>,
}

/// The field to sort the listing by.
#[derive(Debug, Default, Clone, Copy, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
	#[default]
	Title,
}

#[derive(Debug, Default, Clone, Copy, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
	Asc,
	#[default]
	Desc,
}

impl SortBy {
	pub fn as_sql(self) -> &'static str {
		match self {
			Self::Title => "title",
		}
	}
}

impl SortOrder {
	pub fn as_sql(self) -> &'static str {
		match self {
			Self::Asc => "ASC",
			Self::Desc => "DESC",
		}
	}
}

#[derive(Debug, Deserialize, Validate, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListNewsQuery {
	#[serde(default)]
	pub sort_by: SortBy,
	#[serde(default)]
	pub sort_order: SortOrder,
	/// Comma-separated list of tags to filter by.
	pub tags: Option<String>,
	/// Case-insensitive substring match against title and content.
	pub search_query: Option<String>,
}

impl ListNewsQuery {
	/// The tags to filter by, matching posts that share at least one.
	///
	/// The filter only applies when the parameter contains a comma; a
	/// single tag without one is ignored entirely.
	pub fn tag_filter(&self) -> Option<Vec<String>> {
		self.tags
			.as_deref()
			.filter(|tags| tags.contains(','))
			.map(|tags| tags.split(',').map(str::to_owned).collect())
	}

	/// An `ILIKE` pattern matching posts whose title or content contains
	/// the search term, with wildcards in the term itself escaped.
	///
	/// An empty term is treated as no filter at all.
	pub fn search_pattern(&self) -> Option<String> {
		self.search_query
			.as_deref()
			.filter(|term| !term.is_empty())
			.map(|term| {
				let escaped = term
					.replace('\\', "\\\\")
					.replace('%', "\\%")
					.replace('_', "\\_");

				format!("%{escaped}%")
			})
	}
}
