//! Stores of greeting records.

use async_trait::async_trait;
use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::put_item::{PutItemError, PutItemOutput};
use aws_sdk_dynamodb::types::AttributeValue;
use aws_smithy_runtime_api::client::orchestrator::HttpResponse;
use std::collections::BTreeMap;
use std::sync::Mutex;
use tracing::{Level, event};

use crate::error::Error;
use crate::greeting::GreetingRecord;

type PutItemResult = Result<
    PutItemOutput,
    SdkError<PutItemError, HttpResponse>,
>;

/// Capability to persist greeting records.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Writes a single record keyed by its ID.
    ///
    /// A record with the same ID is overwritten.
    async fn put(&self, record: &GreetingRecord) -> Result<(), Error>;
}

/// Store backed by a DynamoDB table.
///
/// The table must have a string hash key `id`.
#[derive(Clone, Debug)]
pub struct DynamoDbStore {
    table_name: String,
    dynamodb: aws_sdk_dynamodb::Client,
}

impl DynamoDbStore {
    /// Creates a store that writes to a given table.
    pub fn new(
        dynamodb: aws_sdk_dynamodb::Client,
        table_name: impl Into<String>,
    ) -> Self {
        Self {
            table_name: table_name.into(),
            dynamodb,
        }
    }

    /// Returns the name of the table.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

#[async_trait]
impl RecordStore for DynamoDbStore {
    async fn put(&self, record: &GreetingRecord) -> Result<(), Error> {
        event!(
            Level::INFO,
            "putting record {} into table {}",
            record.id,
            self.table_name,
        );
        let result: PutItemResult = self.dynamodb.put_item()
            .table_name(self.table_name.clone())
            .set_item(Some(record_to_item(record)))
            .send().await;
        result?;
        Ok(())
    }
}

/// Converts a record into a DynamoDB item.
pub fn record_to_item(
    record: &GreetingRecord,
) -> std::collections::HashMap<String, AttributeValue> {
    std::collections::HashMap::from([
        ("id".to_string(), AttributeValue::S(record.id.clone())),
        ("timestamp".to_string(), AttributeValue::S(record.timestamp.clone())),
        ("message".to_string(), AttributeValue::S(record.message.clone())),
    ])
}

/// Store that keeps records in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: Mutex<BTreeMap<String, GreetingRecord>>,
    failure: Option<String>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that rejects every write with a given reason.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            items: Mutex::new(BTreeMap::new()),
            failure: Some(reason.into()),
        }
    }

    /// Returns all the records ordered by ID.
    pub fn items(&self) -> Vec<GreetingRecord> {
        self.lock_items().values().cloned().collect()
    }

    /// Returns the record of a given ID.
    pub fn get(&self, id: &str) -> Option<GreetingRecord> {
        self.lock_items().get(id).cloned()
    }

    fn lock_items(
        &self,
    ) -> std::sync::MutexGuard<'_, BTreeMap<String, GreetingRecord>> {
        // a panicking writer cannot leave a half-written map behind
        self.items.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn put(&self, record: &GreetingRecord) -> Result<(), Error> {
        if let Some(reason) = self.failure.as_ref() {
            return Err(Error::StoreError(reason.clone()));
        }
        self.lock_items().insert(record.id.clone(), record.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, timestamp: &str) -> GreetingRecord {
        GreetingRecord {
            id: id.to_string(),
            timestamp: timestamp.to_string(),
            message: "hi".to_string(),
        }
    }

    #[test]
    fn record_to_item_has_three_string_attributes() {
        let item = record_to_item(&record("req-42", "2024-01-01T00:00:00Z"));
        assert_eq!(item.len(), 3);
        assert_eq!(item["id"], AttributeValue::S("req-42".to_string()));
        assert_eq!(
            item["timestamp"],
            AttributeValue::S("2024-01-01T00:00:00Z".to_string()),
        );
        assert_eq!(item["message"], AttributeValue::S("hi".to_string()));
    }

    #[tokio::test]
    async fn memory_store_overwrites_records_with_the_same_id() {
        let store = MemoryStore::new();
        store.put(&record("a", "t1")).await.unwrap();
        store.put(&record("b", "t1")).await.unwrap();
        store.put(&record("a", "t2")).await.unwrap();
        assert_eq!(store.items(), vec![record("a", "t2"), record("b", "t1")]);
        assert_eq!(store.get("b"), Some(record("b", "t1")));
        assert_eq!(store.get("c"), None);
    }

    #[tokio::test]
    async fn failing_memory_store_keeps_nothing() {
        let store = MemoryStore::failing("throttled");
        let err = store.put(&record("a", "t1")).await.unwrap_err();
        assert_eq!(err.to_string(), "Store error: throttled");
        assert!(store.items().is_empty());
    }
}
