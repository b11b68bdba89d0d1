//! MongoDB client and collection wrapper

use bson::{doc, Document};
use mongodb::{
    options::IndexOptions,
    results::{DeleteResult, InsertManyResult},
    Client, Collection, IndexModel,
};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{error, info};

use crate::types::ApiError;

/// Trait for schemas that provide index definitions
pub trait IntoIndexes {
    fn into_indices() -> Vec<(Document, Option<IndexOptions>)>;
}

/// MongoDB client wrapper
#[derive(Clone)]
pub struct MongoClient {
    client: Client,
    db_name: String,
}

impl MongoClient {
    /// Create a new MongoDB client and verify the connection
    pub async fn new(uri: &str, db_name: &str) -> Result<Self, ApiError> {
        info!("Connecting to MongoDB at {}", uri);

        // Use serverSelectionTimeoutMS to avoid hanging on unreachable MongoDB
        let timeout_uri = if uri.contains('?') {
            format!("{}&serverSelectionTimeoutMS=3000&connectTimeoutMS=3000", uri)
        } else {
            format!("{}?serverSelectionTimeoutMS=3000&connectTimeoutMS=3000", uri)
        };

        let client = Client::with_uri_str(&timeout_uri)
            .await
            .map_err(|e| ApiError::Database(format!("Failed to connect to MongoDB: {}", e)))?;

        // Verify connection with timeout
        client
            .database(db_name)
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| ApiError::Database(format!("MongoDB ping failed: {}", e)))?;

        info!("Connected to MongoDB database '{}'", db_name);

        Ok(Self {
            client,
            db_name: db_name.to_string(),
        })
    }

    /// Get a typed collection with its schema indexes applied
    pub async fn collection<T>(&self, name: &str) -> Result<MongoCollection<T>, ApiError>
    where
        T: Serialize + DeserializeOwned + Unpin + Send + Sync + IntoIndexes,
    {
        MongoCollection::new(&self.client, &self.db_name, name).await
    }

    /// Get the raw MongoDB client
    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// Get the database name
    pub fn db_name(&self) -> &str {
        &self.db_name
    }
}

/// Typed MongoDB collection with automatic indexing
#[derive(Debug, Clone)]
pub struct MongoCollection<T>
where
    T: Serialize + DeserializeOwned + Unpin + Send + Sync,
{
    inner: Collection<T>,
}

impl<T> MongoCollection<T>
where
    T: Serialize + DeserializeOwned + Unpin + Send + Sync + IntoIndexes,
{
    /// Create a new collection and apply indexes
    pub async fn new(
        client: &Client,
        db_name: &str,
        collection_name: &str,
    ) -> Result<Self, ApiError> {
        let collection = client.database(db_name).collection::<T>(collection_name);
        let mongo_collection = MongoCollection { inner: collection };

        mongo_collection.apply_indexes().await?;

        Ok(mongo_collection)
    }

    /// Apply schema-defined indexes
    async fn apply_indexes(&self) -> Result<(), ApiError> {
        let schema_indices = T::into_indices();

        if schema_indices.is_empty() {
            return Ok(());
        }

        let indices: Vec<IndexModel> = schema_indices
            .into_iter()
            .map(|(keys, opts)| IndexModel::builder().keys(keys).options(opts).build())
            .collect();

        self.inner
            .create_indexes(indices)
            .await
            .map_err(|e| ApiError::Database(format!("Failed to create indexes: {}", e)))?;

        Ok(())
    }

    /// Insert many documents in one call
    pub async fn insert_many(
        &self,
        items: impl IntoIterator<Item = T>,
    ) -> Result<InsertManyResult, ApiError> {
        self.inner
            .insert_many(items)
            .await
            .map_err(|e| ApiError::Database(format!("Insert failed: {}", e)))
    }

    /// Delete all documents matching the filter
    pub async fn delete_many(&self, filter: Document) -> Result<DeleteResult, ApiError> {
        self.inner
            .delete_many(filter)
            .await
            .map_err(|e| ApiError::Database(format!("Delete failed: {}", e)))
    }

    /// Find documents matching the filter, sorted by the given keys
    pub async fn find_sorted(&self, filter: Document, sort: Document) -> Result<Vec<T>, ApiError> {
        self.find_inner(filter, sort, None).await
    }

    /// Find documents matching the filter, sorted, capped at `limit`
    pub async fn find_sorted_limit(
        &self,
        filter: Document,
        sort: Document,
        limit: i64,
    ) -> Result<Vec<T>, ApiError> {
        self.find_inner(filter, sort, Some(limit)).await
    }

    async fn find_inner(
        &self,
        filter: Document,
        sort: Document,
        limit: Option<i64>,
    ) -> Result<Vec<T>, ApiError> {
        use futures_util::StreamExt;

        let mut find = self.inner.find(filter).sort(sort);
        if let Some(limit) = limit {
            find = find.limit(limit);
        }

        let cursor = find
            .await
            .map_err(|e| ApiError::Database(format!("Find failed: {}", e)))?;

        let results: Vec<T> = cursor
            .filter_map(|doc| async {
                match doc {
                    Ok(d) => Some(d),
                    Err(e) => {
                        error!("Error reading document: {}", e);
                        None
                    }
                }
            })
            .collect()
            .await;

        Ok(results)
    }

    /// Count all documents matching the filter
    pub async fn count(&self, filter: Document) -> Result<u64, ApiError> {
        self.inner
            .count_documents(filter)
            .await
            .map_err(|e| ApiError::Database(format!("Count failed: {}", e)))
    }

    /// Get the underlying collection for advanced operations
    pub fn inner(&self) -> &Collection<T> {
        &self.inner
    }
}
