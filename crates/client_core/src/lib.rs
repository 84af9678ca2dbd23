use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use shared::{
    domain::{Student, StudentId},
    protocol::StudentDraft,
};
use tracing::{debug, info, warn};
use url::Url;

pub mod config;
pub mod error;
pub mod form;
pub mod page;
pub mod render;

pub use error::{Action, ClientError};
pub use form::{StudentForm, ValidationError};
pub use page::{Outcome, PageView, StudentsPage};

/// The student collection as seen by the page.
#[async_trait]
pub trait StudentApi: Send + Sync {
    async fn list_students(&self) -> Result<Vec<Student>, ClientError>;
    async fn fetch_student(&self, id: StudentId) -> Result<Student, ClientError>;
    async fn create_student(&self, draft: &StudentDraft) -> Result<(), ClientError>;
    async fn replace_student(&self, id: StudentId, draft: &StudentDraft)
        -> Result<(), ClientError>;
    async fn delete_student(&self, id: StudentId) -> Result<(), ClientError>;
}

pub struct HttpStudentApi {
    http: Client,
    collection_url: Url,
}

impl HttpStudentApi {
    pub fn new(collection_url: &str) -> Result<Self, ClientError> {
        Self::with_client(Client::new(), collection_url)
    }

    pub fn with_client(http: Client, collection_url: &str) -> Result<Self, ClientError> {
        let parsed = Url::parse(collection_url).map_err(|err| ClientError::InvalidBaseUrl {
            url: collection_url.to_string(),
            reason: err.to_string(),
        })?;
        if parsed.cannot_be_a_base() || !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::InvalidBaseUrl {
                url: collection_url.to_string(),
                reason: "expected an http(s) url".to_string(),
            });
        }
        Ok(Self {
            http,
            collection_url: parsed,
        })
    }

    pub fn record_url(&self, id: StudentId) -> Url {
        let mut url = self.collection_url.clone();
        // http(s) urls always have segments; checked in `with_client`.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(&id.to_string());
        }
        url
    }
}

fn expect_success(
    action: Action,
    sent: Result<Response, reqwest::Error>,
) -> Result<Response, ClientError> {
    let response = sent.map_err(|source| ClientError::Transport { action, source })?;
    let status = response.status();
    if !status.is_success() {
        warn!(%action, %status, "request rejected");
        return Err(ClientError::Rejected { action, status });
    }
    Ok(response)
}

async fn decode_json<T: DeserializeOwned>(
    action: Action,
    response: Response,
) -> Result<T, ClientError> {
    let body = response
        .bytes()
        .await
        .map_err(|source| ClientError::Transport { action, source })?;
    serde_json::from_slice(&body).map_err(|source| ClientError::Decode { action, source })
}

#[async_trait]
impl StudentApi for HttpStudentApi {
    async fn list_students(&self) -> Result<Vec<Student>, ClientError> {
        debug!(url = %self.collection_url, "GET collection");
        let response = expect_success(
            Action::List,
            self.http.get(self.collection_url.clone()).send().await,
        )?;
        let students: Vec<Student> = decode_json(Action::List, response).await?;
        debug!(count = students.len(), "collection loaded");
        Ok(students)
    }

    async fn fetch_student(&self, id: StudentId) -> Result<Student, ClientError> {
        let url = self.record_url(id);
        debug!(%url, "GET record");
        let response = expect_success(Action::Fetch, self.http.get(url).send().await)?;
        decode_json(Action::Fetch, response).await
    }

    async fn create_student(&self, draft: &StudentDraft) -> Result<(), ClientError> {
        debug!(url = %self.collection_url, "POST collection");
        expect_success(
            Action::Create,
            self.http
                .post(self.collection_url.clone())
                .json(draft)
                .send()
                .await,
        )?;
        info!(enrollment = %draft.enrollment, "student created");
        Ok(())
    }

    async fn replace_student(
        &self,
        id: StudentId,
        draft: &StudentDraft,
    ) -> Result<(), ClientError> {
        let url = self.record_url(id);
        debug!(%url, "PUT record");
        expect_success(Action::Replace, self.http.put(url).json(draft).send().await)?;
        info!(%id, "student updated");
        Ok(())
    }

    async fn delete_student(&self, id: StudentId) -> Result<(), ClientError> {
        let url = self.record_url(id);
        debug!(%url, "DELETE record");
        expect_success(Action::Delete, self.http.delete(url).send().await)?;
        info!(%id, "student deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/mock_server.rs"]
mod mock_server;

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
