// src/integrations/firestore/client.rs
//
// Remote document store integration (Firestore REST surface).
//
// ARCHITECTURE:
// - Thin HTTP client over the documents API
// - Supports exactly what the catalog layer pushes to the server:
//   equality filters, ordering, point get, add, patch-with-mask, delete
// - Maps wire values ↔ typed FieldValue (NO domain knowledge)
// - Used by RemoteTruckRepository
//
// CRITICAL RULES:
// - This is INFRASTRUCTURE, not DOMAIN
// - Never creates or modifies domain entities directly
// - No retries here; retry policy belongs to callers

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::{header, Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Connection settings for the document store.
#[derive(Debug, Clone)]
pub struct FirestoreConfig {
    pub base_url: String,
    pub project_id: String,
    pub database: String,
}

impl FirestoreConfig {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            base_url: "https://firestore.googleapis.com/v1".to_string(),
            project_id: project_id.into(),
            database: "(default)".to_string(),
        }
    }

    /// Read the configuration from the environment.
    ///
    /// `TRUCKHUB_FIRESTORE_PROJECT` is required; `TRUCKHUB_FIRESTORE_BASE_URL`
    /// overrides the endpoint (useful against an emulator).
    pub fn from_env() -> AppResult<Self> {
        let project_id = std::env::var("TRUCKHUB_FIRESTORE_PROJECT")
            .map_err(|_| AppError::Other("TRUCKHUB_FIRESTORE_PROJECT is not set".to_string()))?;
        let mut config = Self::new(project_id);
        if let Ok(base_url) = std::env::var("TRUCKHUB_FIRESTORE_BASE_URL") {
            config.base_url = base_url;
        }
        Ok(config)
    }

    fn documents_url(&self) -> String {
        format!(
            "{}/projects/{}/databases/{}/documents",
            self.base_url, self.project_id, self.database
        )
    }
}

/// A typed document store value, serialized in the store's tagged wire form
/// (e.g. `{"stringValue": "Actros"}`). Integers travel as strings on the
/// wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum FieldValue {
    StringValue(String),
    IntegerValue(String),
    DoubleValue(f64),
    BooleanValue(bool),
    TimestampValue(DateTime<Utc>),
    ArrayValue(ArrayValue),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ArrayValue {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<FieldValue>,
}

impl FieldValue {
    pub fn string(value: impl Into<String>) -> Self {
        FieldValue::StringValue(value.into())
    }

    pub fn integer(value: i64) -> Self {
        FieldValue::IntegerValue(value.to_string())
    }

    pub fn timestamp(value: DateTime<Utc>) -> Self {
        FieldValue::TimestampValue(value)
    }

    pub fn string_array<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FieldValue::ArrayValue(ArrayValue {
            values: items.into_iter().map(FieldValue::string).collect(),
        })
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::StringValue(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::IntegerValue(raw) => raw.parse().ok(),
            FieldValue::DoubleValue(d) => Some(*d as i64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::BooleanValue(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            FieldValue::TimestampValue(t) => Some(*t),
            _ => None,
        }
    }

    pub fn as_str_array(&self) -> Option<Vec<String>> {
        match self {
            FieldValue::ArrayValue(array) => Some(
                array
                    .values
                    .iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect(),
            ),
            _ => None,
        }
    }
}

/// A stored document: server-assigned resource name plus typed fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub fields: HashMap<String, FieldValue>,
    #[serde(default, skip_serializing)]
    pub create_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing)]
    pub update_time: Option<DateTime<Utc>>,
}

impl Document {
    /// Last path segment of the resource name, i.e. the document id.
    pub fn doc_id(&self) -> Option<&str> {
        self.name.as_deref().and_then(|name| name.rsplit('/').next())
    }
}

/// Server-evaluated query: collection + optional equality filters + ordering.
/// This is deliberately the whole query surface; range predicates stay
/// client-side in the catalog service.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredQuery {
    from: Vec<CollectionSelector>,
    #[serde(rename = "where", skip_serializing_if = "Option::is_none")]
    filter: Option<QueryFilter>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    order_by: Vec<QueryOrder>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct CollectionSelector {
    collection_id: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
enum QueryFilter {
    FieldFilter(FieldFilter),
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct FieldFilter {
    field: FieldReference,
    op: String,
    value: FieldValue,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct FieldReference {
    field_path: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryOrder {
    field: FieldReference,
    direction: String,
}

impl StructuredQuery {
    pub fn collection(collection_id: impl Into<String>) -> Self {
        Self {
            from: vec![CollectionSelector {
                collection_id: collection_id.into(),
            }],
            filter: None,
            order_by: Vec::new(),
        }
    }

    /// Add a server-side equality filter.
    pub fn where_eq(mut self, field_path: impl Into<String>, value: FieldValue) -> Self {
        self.filter = Some(QueryFilter::FieldFilter(FieldFilter {
            field: FieldReference {
                field_path: field_path.into(),
            },
            op: "EQUAL".to_string(),
            value,
        }));
        self
    }

    pub fn order_by_desc(mut self, field_path: impl Into<String>) -> Self {
        self.order_by.push(QueryOrder {
            field: FieldReference {
                field_path: field_path.into(),
            },
            direction: "DESCENDING".to_string(),
        });
        self
    }
}

/// One element of a runQuery response stream; elements without a document
/// (read-time markers) are skipped.
#[derive(Debug, Deserialize)]
struct RunQueryItem {
    document: Option<Document>,
}

/// Document store client
pub struct FirestoreClient {
    config: FirestoreConfig,
    http_client: Client,
}

impl FirestoreClient {
    pub fn new(config: FirestoreConfig) -> Self {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            config,
            http_client,
        }
    }

    /// Execute a structured query and return the matching documents.
    pub async fn run_query(&self, query: StructuredQuery) -> AppResult<Vec<Document>> {
        let url = format!("{}:runQuery", self.config.documents_url());
        let body = serde_json::json!({ "structuredQuery": query });

        let response = self
            .http_client
            .post(&url)
            .header(header::ACCEPT, "application/json")
            .json(&body)
            .send()
            .await?;
        let response = Self::error_for_status(response).await?;

        let items: Vec<RunQueryItem> = response.json().await?;
        Ok(items.into_iter().filter_map(|item| item.document).collect())
    }

    /// Point lookup. Absence is a normal outcome, returned as `Ok(None)`.
    pub async fn get_document(&self, collection: &str, id: &str) -> AppResult<Option<Document>> {
        let url = format!("{}/{}/{}", self.config.documents_url(), collection, id);

        let response = self.http_client.get(&url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = Self::error_for_status(response).await?;

        Ok(Some(response.json().await?))
    }

    /// Create a document with a server-assigned id.
    pub async fn create_document(
        &self,
        collection: &str,
        fields: HashMap<String, FieldValue>,
    ) -> AppResult<Document> {
        let url = format!("{}/{}", self.config.documents_url(), collection);
        let body = Document {
            name: None,
            fields,
            create_time: None,
            update_time: None,
        };

        let response = self.http_client.post(&url).json(&body).send().await?;
        let response = Self::error_for_status(response).await?;

        Ok(response.json().await?)
    }

    /// Merge-update: only the masked field paths are written.
    pub async fn patch_document(
        &self,
        collection: &str,
        id: &str,
        fields: HashMap<String, FieldValue>,
        mask: &[String],
    ) -> AppResult<()> {
        let url = format!("{}/{}/{}", self.config.documents_url(), collection, id);
        let body = Document {
            name: None,
            fields,
            create_time: None,
            update_time: None,
        };
        let mask_params: Vec<(&str, &str)> = mask
            .iter()
            .map(|path| ("updateMask.fieldPaths", path.as_str()))
            .collect();

        let response = self
            .http_client
            .patch(&url)
            .query(&mask_params)
            .json(&body)
            .send()
            .await?;
        Self::error_for_status(response).await?;
        Ok(())
    }

    pub async fn delete_document(&self, collection: &str, id: &str) -> AppResult<()> {
        let url = format!("{}/{}/{}", self.config.documents_url(), collection, id);

        let response = self.http_client.delete(&url).send().await?;
        Self::error_for_status(response).await?;
        Ok(())
    }

    /// Map a non-success HTTP response to `AppError::Remote`, keeping a
    /// truncated body for diagnostics.
    async fn error_for_status(response: reqwest::Response) -> AppResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let mut message = response.text().await.unwrap_or_default();
        message.truncate(512);
        Err(AppError::Remote {
            status: status.as_u16(),
            message,
        })
    }
}
