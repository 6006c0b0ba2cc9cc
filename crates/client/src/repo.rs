use crate::{error::FetchError, fetch::FetchClient};
use models::{Course, InteractionRequest, InteractionsPayload, Review, Subscription};
use serde::{Deserialize, Serialize};
use serde_json::json;
use views::{
    feed::{FeedPage, FeedSource},
    interactions::InteractionService,
    pagination::{PageSource, SearchSource},
    profile::ProfileService,
};

/// Filters of a `/reviews` request; unset fields are left out of the query
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<usize>,
    /// Newest first
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sorted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub with_user_count: Option<bool>,
}

impl ReviewQuery {
    pub fn course(course_id: &str) -> Self {
        Self {
            course_id: Some(course_id.to_string()),
            ..Default::default()
        }
    }

    pub fn user(user_id: &str) -> Self {
        Self {
            user_id: Some(user_id.to_string()),
            ..Default::default()
        }
    }

    /// A page of the newest reviews across all courses
    pub fn feed(offset: usize, limit: usize, with_user_count: bool) -> Self {
        Self {
            limit: Some(limit),
            offset: Some(offset),
            sorted: Some(true),
            with_user_count: with_user_count.then_some(true),
            ..Default::default()
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReviewsPayload {
    pub reviews: Vec<Review>,
    pub unique_user_count: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SearchResults {
    courses: Vec<Course>,
}

/// Typed access to every endpoint the front ends use
#[derive(Debug, Clone)]
pub struct Repo {
    fetch: FetchClient,
}

impl Repo {
    pub fn new(fetch: FetchClient) -> Self {
        Self { fetch }
    }

    pub async fn get_reviews(&self, query: &ReviewQuery) -> Result<ReviewsPayload, FetchError> {
        self.fetch.get_query("/reviews", query).await
    }

    pub async fn get_user_reviews(&self, user_id: &str) -> Result<Vec<Review>, FetchError> {
        Ok(self.get_reviews(&ReviewQuery::user(user_id)).await?.reviews)
    }

    pub async fn get_subscriptions(&self) -> Result<Vec<Subscription>, FetchError> {
        self.fetch.get_data("/subscriptions").await
    }

    pub async fn remove_subscription(&self, course_id: &str) -> Result<(), FetchError> {
        self.fetch
            .delete("/subscriptions", &json!({ "course_id": course_id }))
            .await
    }

    pub async fn get_courses(&self, limit: usize, offset: usize) -> Result<Vec<Course>, FetchError> {
        self.fetch
            .get_query("/courses", &[("limit", limit), ("offset", offset)])
            .await
    }

    /// Fetches a course by id
    ///
    /// # Returns
    /// `None` if the course does not exist
    pub async fn get_course(&self, id: &str) -> Result<Option<Course>, FetchError> {
        match self.fetch.get_data(&format!("/courses/{id}")).await {
            Ok(course) => Ok(course),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }

    pub async fn search(&self, query: &str) -> Result<Vec<Course>, FetchError> {
        let results: SearchResults = self.fetch.get_query("/search", &[("query", query)]).await?;
        Ok(results.courses)
    }

    pub async fn get_interactions(
        &self,
        course_id: &str,
        user_id: &str,
        referrer: Option<&str>,
    ) -> Result<InteractionsPayload, FetchError> {
        let mut query = vec![("course_id", course_id), ("user_id", user_id)];
        if let Some(referrer) = referrer {
            query.push(("referrer", referrer));
        }

        self.fetch.get_query("/interactions", &query).await
    }

    pub async fn add_interaction(&self, request: &InteractionRequest) -> Result<(), FetchError> {
        self.fetch.post("/interactions", request).await
    }

    pub async fn remove_interaction(&self, request: &InteractionRequest) -> Result<(), FetchError> {
        self.fetch.delete("/interactions", request).await
    }

    pub async fn update_review(&self, review: &Review) -> Result<(), FetchError> {
        self.fetch.put("/reviews", review).await
    }

    pub async fn delete_review(&self, course_id: &str) -> Result<(), FetchError> {
        self.fetch
            .delete("/reviews", &json!({ "course_id": course_id }))
            .await
    }
}

impl PageSource<Course> for Repo {
    type Error = FetchError;

    async fn fetch_page(&self, offset: usize, limit: usize) -> Result<Vec<Course>, FetchError> {
        self.get_courses(limit, offset).await
    }
}

impl SearchSource<Course> for Repo {
    type Error = FetchError;

    async fn search(&self, query: &str) -> Result<Vec<Course>, FetchError> {
        Repo::search(self, query).await
    }
}

impl FeedSource for Repo {
    type Error = FetchError;

    async fn fetch_feed(
        &self,
        offset: usize,
        limit: usize,
        with_user_count: bool,
    ) -> Result<FeedPage, FetchError> {
        let payload = self
            .get_reviews(&ReviewQuery::feed(offset, limit, with_user_count))
            .await?;

        Ok(FeedPage {
            reviews: payload.reviews,
            unique_user_count: payload.unique_user_count,
        })
    }
}

impl InteractionService for Repo {
    type Error = FetchError;

    async fn get_interactions(
        &self,
        course_id: &str,
        user_id: &str,
        referrer: Option<&str>,
    ) -> Result<InteractionsPayload, FetchError> {
        Repo::get_interactions(self, course_id, user_id, referrer).await
    }

    async fn add_interaction(&self, request: &InteractionRequest) -> Result<(), FetchError> {
        Repo::add_interaction(self, request).await
    }

    async fn remove_interaction(&self, request: &InteractionRequest) -> Result<(), FetchError> {
        Repo::remove_interaction(self, request).await
    }
}

impl ProfileService for Repo {
    type Error = FetchError;

    async fn get_user_reviews(&self, user_id: &str) -> Result<Vec<Review>, FetchError> {
        Repo::get_user_reviews(self, user_id).await
    }

    async fn get_subscriptions(&self) -> Result<Vec<Subscription>, FetchError> {
        Repo::get_subscriptions(self).await
    }

    async fn remove_subscription(&self, course_id: &str) -> Result<(), FetchError> {
        Repo::remove_subscription(self, course_id).await
    }
}
