use crate::base_url::BaseUrls;
use crate::error::ApiError;
use crate::request::{ApiRequest, RequestData};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use std::time::Duration;

pub const APP_ID_HEADER: &str = "X-App-ID";

/// Sends one request and maps the outcome, nothing more.
///
/// No credential lookup and no retry happens here; callers pass the bearer
/// token explicitly and decide what to do with a 401.
#[derive(Debug, Clone)]
pub struct RawClient {
    http: reqwest::Client,
    app_id: String,
}

impl RawClient {
    pub fn new(app_id: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            app_id: app_id.into(),
        })
    }

    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    pub async fn execute<R>(
        &self,
        request: &R,
        base_urls: &BaseUrls,
        bearer: Option<&str>,
    ) -> Result<R::Response, ApiError>
    where
        R: ApiRequest,
    {
        let method = R::METHOD;
        let url = format!(
            "{}{}",
            base_urls.for_visibility(R::VISIBILITY),
            request.endpoint()
        );

        let mut builder = self
            .http
            .request(method.clone(), &url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .header(APP_ID_HEADER, &self.app_id);

        if let Some(token) = bearer {
            builder = builder.bearer_auth(token);
        }

        builder = match request.data() {
            RequestData::Empty => builder,
            RequestData::Query(query) => builder.query(query),
            RequestData::Json(body) => builder.json(body),
        };

        tracing::debug!(
            method = %method,
            %url,
            authenticated = bearer.is_some(),
            "sending request"
        );

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::debug!(method = %method, %url, %status, "request failed");
            return Err(ApiError::Http { status, body });
        }

        // 204 and friends decode as JSON null
        let body = if body.trim().is_empty() {
            "null"
        } else {
            body.as_str()
        };
        Ok(serde_json::from_str(body)?)
    }
}
