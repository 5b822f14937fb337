use async_trait::async_trait;
use crate::models::{LikeEvent, Profile};
use crate::services::gateway::{GatewayError, LikeStore, ProfileGateway};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::collections::HashSet;
use std::time::Duration;

/// Collection IDs in the document store
#[derive(Debug, Clone)]
pub struct StoreCollections {
    pub profiles: String,
    pub likes: String,
}

/// REST client for the remote document store
///
/// Handles all communication with the store:
/// - Fetching a single profile
/// - Listing the profile pool page by page
/// - Recording likes
pub struct DocumentStoreClient {
    base_url: String,
    api_key: String,
    project_id: String,
    database_id: String,
    page_size: usize,
    client: Client,
    collections: StoreCollections,
}

impl DocumentStoreClient {
    /// Create a new document store client
    pub fn new(
        base_url: String,
        api_key: String,
        project_id: String,
        database_id: String,
        collections: StoreCollections,
        page_size: usize,
        timeout: Duration,
    ) -> Result<Self, GatewayError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url,
            api_key,
            project_id,
            database_id,
            page_size: page_size.max(1),
            client,
            collections,
        })
    }

    fn documents_url(&self, collection: &str) -> String {
        format!(
            "{}/databases/{}/collections/{}/documents",
            self.base_url.trim_end_matches('/'),
            self.database_id,
            collection
        )
    }

    fn request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header("X-Api-Key", &self.api_key)
            .header("X-Project-Id", &self.project_id)
    }

    /// Fetch one page of profile documents
    ///
    /// Returns the parsed profiles, the raw document count of the page and
    /// the store's reported total, if any.
    async fn list_page(&self, offset: usize) -> Result<(Vec<Profile>, usize, Option<u64>), GatewayError> {
        let url = format!(
            "{}?queries%5B%5D={}&queries%5B%5D={}",
            self.documents_url(&self.collections.profiles),
            urlencoding::encode(&format!("limit({})", self.page_size)),
            urlencoding::encode(&format!("offset({})", offset)),
        );

        let response = self.request(self.client.get(&url)).send().await?;

        if !response.status().is_success() {
            return Err(GatewayError::ApiError(format!(
                "Failed to list profiles: {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;

        let documents = json
            .get("documents")
            .and_then(|d| d.as_array())
            .ok_or_else(|| GatewayError::InvalidResponse("Missing documents array".into()))?;

        let page_len = documents.len();
        let total = json.get("total").and_then(|t| t.as_u64());

        let profiles = documents
            .iter()
            .filter_map(|doc| {
                let data = doc.get("data").unwrap_or(doc);
                match serde_json::from_value::<Profile>(data.clone()) {
                    Ok(profile) => Some(profile),
                    Err(e) => {
                        tracing::warn!("Skipping profile document: {}", e);
                        None
                    }
                }
            })
            .collect();

        Ok((profiles, page_len, total))
    }
}

#[async_trait]
impl ProfileGateway for DocumentStoreClient {
    async fn get_profile(&self, user_id: &str) -> Result<Option<Profile>, GatewayError> {
        let url = format!(
            "{}/{}",
            self.documents_url(&self.collections.profiles),
            urlencoding::encode(user_id)
        );

        tracing::debug!("Fetching profile for user: {}", user_id);

        let response = self.request(self.client.get(&url)).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_else(|_| "Unable to read body".to_string());
            tracing::error!("Failed to fetch profile for {}: {} - {}", user_id, status, body);
            return Err(GatewayError::ApiError(format!(
                "Failed to fetch profile: {}",
                status
            )));
        }

        let json: Value = response.json().await?;
        let data = json.get("data").unwrap_or(&json);

        serde_json::from_value(data.clone())
            .map(Some)
            .map_err(|e| GatewayError::InvalidResponse(format!("Failed to parse profile: {}", e)))
    }

    async fn list_profiles(&self) -> Result<Vec<Profile>, GatewayError> {
        let mut profiles: Vec<Profile> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        let mut offset = 0;

        loop {
            let (page, page_len, total) = self.list_page(offset).await?;

            // A store that ignores the offset serves the same page again
            if page.iter().any(|p| seen.contains(&p.user_id)) {
                tracing::warn!("Profile listing repeated at offset {}; stopping", offset);
                break;
            }

            seen.extend(page.iter().map(|p| p.user_id.clone()));
            profiles.extend(page);
            offset += page_len;

            let exhausted = total.is_some_and(|total| offset as u64 >= total);
            if page_len == 0 || page_len < self.page_size || exhausted {
                break;
            }
        }

        tracing::debug!("Listed {} profiles ({} documents scanned)", profiles.len(), offset);

        Ok(profiles)
    }
}

#[async_trait]
impl LikeStore for DocumentStoreClient {
    async fn record_like(&self, like: &LikeEvent) -> Result<(), GatewayError> {
        let url = self.documents_url(&self.collections.likes);

        let payload = serde_json::json!({
            "documentId": like.id,
            "data": like,
        });

        let response = self.request(self.client.post(&url)).json(&payload).send().await?;

        if !response.status().is_success() {
            return Err(GatewayError::ApiError(format!(
                "Failed to record like: {}",
                response.status()
            )));
        }

        tracing::debug!("Recorded like: {} -> {}", like.user_id, like.target_user_id);

        Ok(())
    }
}
