//! `DocumentStoreTrait` implementation for `DocumentStore`.

use async_trait::async_trait;

use crate::error::StoreError;
use crate::traits::DocumentStoreTrait;

use super::core::DocumentStore;
use super::types::Document;

#[async_trait]
impl DocumentStoreTrait for DocumentStore {
    async fn insert(&self, path: &str, data: &str) -> Result<(), StoreError> {
        Self::insert(self, path, data).await
    }

    async fn read(&self, path: &str) -> Result<Option<Document>, StoreError> {
        Self::read(self, path).await
    }

    async fn get_collection(&self, path: &str) -> Result<Vec<Document>, StoreError> {
        Self::get_collection(self, path).await
    }

    async fn update(&self, path: &str, data: &str) -> Result<(), StoreError> {
        Self::update(self, path, data).await
    }

    async fn delete(&self, path: &str) -> Result<(), StoreError> {
        Self::delete(self, path).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::store::core::tests::test_store;
    use crate::store::JsonDocuments;
    use serde_json::{json, Value};

    async fn roundtrip(store: &dyn DocumentStoreTrait) {
        store.insert("/t/a", "1a").await.unwrap();
        store.insert("/t/b", "1b").await.unwrap();
        store.update("/t/a", "2a").await.unwrap();

        let doc = store.read("/t/a").await.unwrap().unwrap();
        assert_eq!(doc.data.as_deref(), Some("2a"));

        store.delete("/t/b").await.unwrap();
        let children = store.get_collection("/t").await.unwrap();
        assert_eq!(children.len(), 1);
    }

    #[tokio::test]
    async fn test_trait_object_dispatch() {
        let store = test_store().await;
        roundtrip(&store).await;
    }

    #[tokio::test]
    async fn test_json_documents_over_sqlite() {
        let docs = JsonDocuments::new(test_store().await);
        docs.insert_json("/cfg/theme", &json!({"dark": true}))
            .await
            .unwrap();
        docs.insert_json("/cfg/lang", &json!("en")).await.unwrap();

        let theme: Option<Value> = docs.read_json("/cfg/theme").await.unwrap();
        assert_eq!(theme, Some(json!({"dark": true})));

        let all: Vec<Value> = docs.get_collection_json("/cfg").await.unwrap();
        assert_eq!(all, vec![json!({"dark": true}), json!("en")]);

        docs.into_inner().close().await.unwrap();
    }
}
