use aide::transform::TransformOperation;
use axum::extract::State;

use crate::{
	extract::{Json, Path, Query},
	openapi::tag,
	publish::PublishRequest,
	AppState, Database,
};

use super::{model, Error, RouteError};

/// Creates a news post containing a title, content and a list of tags.
///
/// The post is announced to the news manager before it is stored; the
/// announcement never affects the outcome of the request.
pub async fn create_news(
	State(state): State<AppState>,
	Json(input): Json<model::CreateNewsInput>,
) -> Result<Json<model::NewsResponse>, RouteError> {
	state
		.publisher
		.publish(&PublishRequest {
			title: &input.title,
			content: &input.content,
			tags: &input.tags,
		})
		.await;

	let news = sqlx::query_as::<_, model::News>(
		r#"
			INSERT INTO news (id, title, content, tags, creator_id)
			VALUES (DEFAULT, $1, $2, $3, $4)
			RETURNING *
		"#,
	)
	.bind(&input.title)
	.bind(&input.content)
	.bind(&input.tags)
	.bind(input.creator_id)
	.fetch_one(&state.database)
	.await?;

	Ok(Json(model::NewsResponse { news: Some(news) }))
}

pub fn create_news_docs(op: TransformOperation) -> TransformOperation {
	op.summary("Create post")
		.description("Creates a news post containing a title, content and a list of tags.")
		.tag(tag::NEWS)
}

/// Returns a post with a specific id if it exists, `null` otherwise.
pub async fn get_news(
	State(database): State<Database>,
	Path(path): Path<model::IdInput>,
) -> Result<Json<model::NewsResponse>, RouteError> {
	let news = sqlx::query_as::<_, model::News>(
		r#"
			SELECT * FROM news
			WHERE id = $1
		"#,
	)
	.bind(path.id)
	.fetch_optional(&database)
	.await?;

	Ok(Json(model::NewsResponse { news }))
}

pub fn get_news_docs(op: TransformOperation) -> TransformOperation {
	op.summary("Get single post")
		.description("Returns a post with a specific id if it exists.")
		.tag(tag::NEWS)
}

/// Returns all posts matching the tag and search filters, sorted.
pub async fn list_news(
	State(database): State<Database>,
	Query(query): Query<model::ListNewsQuery>,
) -> Result<Json<model::NewsListResponse>, RouteError> {
	tracing::debug!(tags = ?query.tags, "listing news posts");

	let sql = format!(
		r#"
			SELECT * FROM news
			WHERE ($1::text[] IS NULL OR tags && $1)
				AND ($2::text IS NULL OR title ILIKE $2 OR content ILIKE $2)
			ORDER BY {by} {order}
		"#,
		by = query.sort_by.as_sql(),
		order = query.sort_order.as_sql(),
	);

	let news = sqlx::query_as::<_, model::News>(&sql)
		.bind(query.tag_filter())
		.bind(query.search_pattern())
		.fetch_all(&database)
		.await?;

	Ok(Json(model::NewsListResponse { news }))
}

pub fn list_news_docs(op: TransformOperation) -> TransformOperation {
	op.summary("List posts")
		.description("Returns all news posts, filtered and sorted by the query parameters.")
		.tag(tag::NEWS)
}

/// Replaces the title, content and tags of an existing post.
pub async fn update_news(
	State(database): State<Database>,
	Path(path): Path<model::IdInput>,
	Json(input): Json<model::UpdateNewsInput>,
) -> Result<Json<model::NewsResponse>, RouteError> {
	let news = sqlx::query_as::<_, model::News>(
		r#"
			UPDATE news
			SET title = $1, content = $2, tags = $3
			WHERE id = $4
			RETURNING *
		"#,
	)
	.bind(&input.title)
	.bind(&input.content)
	.bind(&input.tags)
	.bind(path.id)
	.fetch_optional(&database)
	.await?;

	let news = news.ok_or(Error::UnknownNews(path.id))?;

	Ok(Json(model::NewsResponse { news: Some(news) }))
}

pub fn update_news_docs(op: TransformOperation) -> TransformOperation {
	op.summary("Update post")
		.description("Replaces the title, content and tags of a post by its unique id.")
		.tag(tag::NEWS)
}

/// Deletes a post by its unique id, returning the deleted record.
pub async fn delete_news(
	State(database): State<Database>,
	Path(path): Path<model::IdInput>,
) -> Result<Json<model::NewsResponse>, RouteError> {
	let news = sqlx::query_as::<_, model::News>(
		r#"
			DELETE FROM news
			WHERE id = $1
			RETURNING *
		"#,
	)
	.bind(path.id)
	.fetch_optional(&database)
	.await?;

	let news = news.ok_or(Error::UnknownNews(path.id))?;

	Ok(Json(model::NewsResponse { news: Some(news) }))
}

pub fn delete_news_docs(op: TransformOperation) -> TransformOperation {
	op.summary("Delete post")
		.description("Deletes a post by its unique id if it exists.")
		.tag(tag::NEWS)
}
