use serde::Serialize;

/// Client for the news-manager publishing endpoint.
///
/// Publishing is best-effort: failures are logged and never surfaced to
/// the caller, and no retry is attempted.
#[derive(Clone)]
pub struct Publisher {
	http: reqwest::Client,
	url: String,
}

/// The payload accepted by the publishing endpoint.
#[derive(Debug, Serialize)]
pub struct PublishRequest<'p> {
	pub title: &'p str,
	pub content: &'p str,
	pub tags: &'p [String],
}

impl Publisher {
	pub fn new(base_url: &str) -> Self {
		Self {
			http: reqwest::Client::new(),
			url: format!("{}/api/v1/publish", base_url.trim_end_matches('/')),
		}
	}

	/// Announces a post to the news manager.
	///
	/// The response body is ignored; a transport error or non-2xx status
	/// is logged and swallowed.
	pub async fn publish(&self, request: &PublishRequest<'_>) {
		let result = self
			.http
			.post(&self.url)
			.json(request)
			.send()
			.await
			.and_then(reqwest::Response::error_for_status);

		if let Err(error) = result {
			tracing::error!(%error, "failed to publish news post");
		}
	}
}

#[cfg(test)]
mod test {
	use super::Publisher;

	#[test]
	fn test_endpoint_url() {
		let publisher = Publisher::new("http://news-manager:8082/");

		assert_eq!(publisher.url, "http://news-manager:8082/api/v1/publish");
	}
}
