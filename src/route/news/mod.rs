use std::borrow::Cow;

use aide::axum::{routing::get_with, ApiRouter};
use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use crate::{error, AppState};

pub mod model;
pub mod route;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("unknown news post {0}")]
	UnknownNews(Uuid),
}

pub type RouteError = error::RouteError<Error>;

impl From<Error> for RouteError {
	fn from(error: Error) -> Self {
		Self::Route(error)
	}
}

pub fn routes() -> ApiRouter<AppState> {
	use route::*;

	ApiRouter::new()
		.api_route(
			"/",
			get_with(list_news, list_news_docs).post_with(create_news, create_news_docs),
		)
		.api_route(
			"/:id",
			get_with(get_news, get_news_docs)
				.put_with(update_news, update_news_docs)
				.delete_with(delete_news, delete_news_docs),
		)
}

impl error::ErrorShape for Error {
	fn status(&self) -> StatusCode {
		match self {
			Self::UnknownNews(..) => StatusCode::NOT_FOUND,
		}
	}

	fn errors(&self) -> Vec<error::Message<'_>> {
		match self {
			Self::UnknownNews(news) => vec![error::Message {
				content: "unknown_news".into(),
				field: None,
				details: Some(Cow::Owned({
					let mut map = error::Map::new();
					map.insert("news".into(), json!(news));
					map
				})),
			}],
		}
	}
}

#[cfg(test)]
mod test {
	use crate::test::*;

	const CREATOR: &str = "8c3749a4-965c-4a8b-92cd-995de5856b30";

	async fn create(
		app: &TestServer,
		title: &str,
		content: &str,
		tags: &[&str],
	) -> serde_json::Value {
		let response = app
			.post("/news")
			.json(&json!({
				"title": title,
				"content": content,
				"tags": tags,
				"creatorId": CREATOR,
			}))
			.await;

		assert_eq!(response.status_code(), 200);

		response.json::<serde_json::Value>()["news"].clone()
	}

	#[sqlx::test]
	async fn test_create_news(pool: Database) {
		// Nothing is listening on the publisher address, so this also
		// verifies that creation succeeds when the announcement fails.
		let app = app(pool);

		let news = create(
			&app,
			"Grand opening",
			"The new library opens on Saturday.",
			&["local", "culture"],
		)
		.await;

		assert!(!news["id"].as_str().unwrap().is_empty());
		assert_eq!(news["title"], "Grand opening");
		assert_eq!(news["content"], "The new library opens on Saturday.");
		assert_eq!(news["tags"], json!(["local", "culture"]));
		assert_eq!(news["creatorId"], CREATOR);
	}

	#[sqlx::test]
	async fn test_create_news_rejects_invalid_input(pool: Database) {
		let app = app(pool);

		let response = app
			.post("/news")
			.json(&json!({
				"content": "No title here.",
				"tags": [],
				"creatorId": CREATOR,
			}))
			.await;

		assert_eq!(response.status_code(), 400);

		let response = app
			.post("/news")
			.json(&json!({
				"title": "",
				"content": "Empty title.",
				"tags": [],
				"creatorId": CREATOR,
			}))
			.await;

		assert_eq!(response.status_code(), 400);
	}

	#[sqlx::test]
	async fn test_get_news_by_id(pool: Database) {
		let app = app(pool);

		let news = create(&app, "Tax season", "File by the end of April.", &[]).await;
		let id = news["id"].as_str().unwrap();

		let first = app.get(&format!("/news/{id}")).await;
		let second = app.get(&format!("/news/{id}")).await;

		assert_eq!(first.status_code(), 200);
		assert_eq!(first.json::<serde_json::Value>()["news"], news);
		assert_eq!(
			first.json::<serde_json::Value>(),
			second.json::<serde_json::Value>()
		);
	}

	#[sqlx::test]
	async fn test_get_missing_news_returns_null(pool: Database) {
		let app = app(pool);

		let response = app
			.get(&format!("/news/{}", uuid::Uuid::new_v4()))
			.await;

		assert_eq!(response.status_code(), 200);
		assert_eq!(response.json::<serde_json::Value>()["news"], json!(null));
	}

	#[sqlx::test]
	async fn test_get_news_rejects_malformed_id(pool: Database) {
		let app = app(pool);

		let response = app.get("/news/not-a-uuid").await;

		assert_eq!(response.status_code(), 400);
	}

	#[sqlx::test]
	async fn test_list_news_filters_by_tag_overlap(pool: Database) {
		let app = app(pool);

		create(&app, "a", "-", &["local"]).await;
		create(&app, "b", "-", &["sports", "culture"]).await;
		create(&app, "c", "-", &["weather"]).await;

		let response = app.get("/news?tags=local,sports").await;
		let news = response.json::<serde_json::Value>();
		let news = news["news"].as_array().unwrap();

		assert_eq!(news.len(), 2);
		assert!(news.iter().all(|post| post["title"] == "a" || post["title"] == "b"));

		// A single tag without a comma is not treated as a filter.
		let response = app.get("/news?tags=local").await;

		assert_eq!(
			response.json::<serde_json::Value>()["news"]
				.as_array()
				.unwrap()
				.len(),
			3
		);
	}

	#[sqlx::test]
	async fn test_list_news_search_is_case_insensitive(pool: Database) {
		let app = app(pool);

		create(&app, "foo bar", "-", &["local"]).await;
		create(&app, "baz", "contains Foo somewhere", &["sports"]).await;
		create(&app, "unrelated", "-", &["local"]).await;

		let response = app.get("/news?searchQuery=FOO").await;
		let news = response.json::<serde_json::Value>();
		let news = news["news"].as_array().unwrap();

		assert_eq!(news.len(), 2);

		// Both filters combine with a logical AND.
		let response = app.get("/news?searchQuery=FOO&tags=local,culture").await;
		let news = response.json::<serde_json::Value>();
		let news = news["news"].as_array().unwrap();

		assert_eq!(news.len(), 1);
		assert_eq!(news[0]["title"], "foo bar");
	}

	#[sqlx::test]
	async fn test_list_news_sorts_by_title(pool: Database) {
		let app = app(pool);

		create(&app, "banana", "-", &[]).await;
		create(&app, "apple", "-", &[]).await;
		create(&app, "cherry", "-", &[]).await;

		let titles = |response: serde_json::Value| {
			response["news"]
				.as_array()
				.unwrap()
				.iter()
				.map(|post| post["title"].as_str().unwrap().to_owned())
				.collect::<Vec<_>>()
		};

		// Descending by title is the default.
		let response = app.get("/news").await;

		assert_eq!(titles(response.json()), ["cherry", "banana", "apple"]);

		let response = app.get("/news?sortBy=title&sortOrder=asc").await;

		assert_eq!(titles(response.json()), ["apple", "banana", "cherry"]);
	}

	#[sqlx::test]
	async fn test_update_news_replaces_all_fields(pool: Database) {
		let app = app(pool);

		let news = create(&app, "Draft", "Original body.", &["local", "culture"]).await;
		let id = news["id"].as_str().unwrap();

		let response = app
			.put(&format!("/news/{id}"))
			.json(&json!({
				"title": "Final",
				"content": "Edited body.",
				"tags": [],
			}))
			.await;

		assert_eq!(response.status_code(), 200);

		let updated = response.json::<serde_json::Value>()["news"].clone();

		assert_eq!(updated["id"].as_str().unwrap(), id);
		assert_eq!(updated["title"], "Final");
		assert_eq!(updated["content"], "Edited body.");
		// Tags are replaced wholesale, not merged.
		assert_eq!(updated["tags"], json!([]));

		let fetched = app.get(&format!("/news/{id}")).await;

		assert_eq!(fetched.json::<serde_json::Value>()["news"], updated);
	}

	#[sqlx::test]
	async fn test_update_missing_news_errors(pool: Database) {
		let app = app(pool);

		let response = app
			.put(&format!("/news/{}", uuid::Uuid::new_v4()))
			.json(&json!({
				"title": "Final",
				"content": "Edited body.",
				"tags": [],
			}))
			.await;

		assert_eq!(response.status_code(), 404);
	}

	#[sqlx::test]
	async fn test_delete_news_returns_snapshot(pool: Database) {
		let app = app(pool);

		let news = create(&app, "Short lived", "-", &["local"]).await;
		let id = news["id"].as_str().unwrap();

		let response = app.delete(&format!("/news/{id}")).await;

		assert_eq!(response.status_code(), 200);
		assert_eq!(response.json::<serde_json::Value>()["news"], news);

		let fetched = app.get(&format!("/news/{id}")).await;

		assert_eq!(fetched.json::<serde_json::Value>()["news"], json!(null));
	}

	#[sqlx::test]
	async fn test_delete_missing_news_errors(pool: Database) {
		let app = app(pool);

		let response = app
			.delete(&format!("/news/{}", uuid::Uuid::new_v4()))
			.await;

		assert_eq!(response.status_code(), 404);

		let body = response.json::<serde_json::Value>();

		assert_eq!(body["success"], json!(false));
		assert_eq!(body["errors"][0]["content"], "unknown_news");
	}
}
