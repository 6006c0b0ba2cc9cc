use crate::{config::Config, error::FetchError};
use log::debug;
use reqwest::{Client, RequestBuilder, Response};
use serde::{Serialize, de::DeserializeOwned};

/// Thin JSON client for the courses API
#[derive(Debug, Clone)]
pub struct FetchClient {
    client: Client,
    base_url: String,
}

impl FetchClient {
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let client = Client::builder().build()?;

        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    /// Absolute URL of an API path such as `/courses`
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Sends the request and turns non-success statuses into errors
    async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError> {
        let response = request.send().await?;
        let status = response.status();
        debug!("{} {}", status, response.url());

        if status.is_success() {
            return Ok(response);
        }

        let message = response.text().await.unwrap_or_default();
        Err(FetchError::Status { status, message })
    }

    /// GETs `path` and decodes the JSON body
    pub async fn get_data<T>(&self, path: &str) -> Result<T, FetchError>
    where
        T: DeserializeOwned,
    {
        let response = self.send(self.client.get(self.url(path))).await?;
        Ok(response.json::<T>().await?)
    }

    /// GETs `path` with `query` encoded as URL parameters
    pub async fn get_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, FetchError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let request = self.client.get(self.url(path)).query(query);
        let response = self.send(request).await?;
        Ok(response.json::<T>().await?)
    }

    pub async fn post<B>(&self, path: &str, body: &B) -> Result<(), FetchError>
    where
        B: Serialize + ?Sized,
    {
        self.send(self.client.post(self.url(path)).json(body))
            .await
            .map(drop)
    }

    pub async fn put<B>(&self, path: &str, body: &B) -> Result<(), FetchError>
    where
        B: Serialize + ?Sized,
    {
        self.send(self.client.put(self.url(path)).json(body))
            .await
            .map(drop)
    }

    /// DELETE with a JSON body identifying the resource
    pub async fn delete<B>(&self, path: &str, body: &B) -> Result<(), FetchError>
    where
        B: Serialize + ?Sized,
    {
        self.send(self.client.delete(self.url(path)).json(body))
            .await
            .map(drop)
    }
}
