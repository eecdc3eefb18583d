//! MongoDB-backed policy store.

use async_trait::async_trait;
use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use super::PolicyStore;

/// Errors raised while setting up the store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("invalid MongoDB connection string")]
    InvalidUri(#[source] mongodb::error::Error),

    #[error("MongoDB connection failed")]
    Connection(#[source] mongodb::error::Error),
}

/// One persisted policy entry.
#[derive(Debug, Serialize, Deserialize)]
struct PolicyDocument {
    namespace: String,
    key: String,
    value: Value,
}

/// Durable [`PolicyStore`] with one document per (namespace, key).
///
/// Reads degrade to "absent" on database errors; the engine's contract is
/// get-with-default, so a failed read resolves to the caller's default.
#[derive(Debug, Clone)]
pub struct MongoStore {
    collection: Collection<PolicyDocument>,
}

impl MongoStore {
    /// Connect to MongoDB and open the policy collection.
    pub async fn connect(uri: &str, db_name: &str) -> Result<Self, StoreError> {
        let options = ClientOptions::parse(uri).await.map_err(StoreError::InvalidUri)?;
        let client = Client::with_options(options).map_err(StoreError::Connection)?;

        // Ping to verify the connection before handing the store out.
        client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(StoreError::Connection)?;

        info!("Connected to MongoDB policy store");

        Ok(Self {
            collection: client.database(db_name).collection("policy"),
        })
    }

    /// Upsert one key. Administrative surfaces use this to mutate the
    /// allow-lists, per-handler mask overrides and the bounding mask.
    pub async fn set(
        &self,
        namespace: &str,
        key: &str,
        value: Value,
    ) -> Result<(), mongodb::error::Error> {
        let filter = doc! { "namespace": namespace, "key": key };
        let document = PolicyDocument {
            namespace: namespace.to_string(),
            key: key.to_string(),
            value,
        };
        let options = mongodb::options::ReplaceOptions::builder()
            .upsert(true)
            .build();

        self.collection
            .replace_one(filter, document)
            .with_options(options)
            .await?;

        Ok(())
    }
}

#[async_trait]
impl PolicyStore for MongoStore {
    async fn get(&self, namespace: &str, key: &str) -> Option<Value> {
        let filter = doc! { "namespace": namespace, "key": key };

        match self.collection.find_one(filter).await {
            Ok(document) => document.map(|d| d.value),
            Err(error) => {
                warn!(namespace, key, %error, "policy store read failed, using default");
                None
            }
        }
    }
}
