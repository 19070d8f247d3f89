//! Thin seam over the Kubernetes API.
//!
//! The reconciler only ever reads objects by key and creates new ones, so that
//! is all [`ObjectStore`] exposes. [`KubeStore`] talks to the API server.

use crate::{Error, Result};
use async_trait::async_trait;
use k8s_openapi::NamespaceResourceScope;
use kube::{
    api::{Api, PostParams},
    client::Client,
    Resource, ResourceExt,
};
use serde::{de::DeserializeOwned, Serialize};
use std::fmt::Debug;

/// Namespaced, statically typed objects the store can read and write.
pub trait StoredObject:
    Resource<DynamicType = (), Scope = NamespaceResourceScope>
    + Clone
    + DeserializeOwned
    + Serialize
    + Debug
    + Send
    + Sync
    + 'static
{
}

impl<K> StoredObject for K where
    K: Resource<DynamicType = (), Scope = NamespaceResourceScope>
        + Clone
        + DeserializeOwned
        + Serialize
        + Debug
        + Send
        + Sync
        + 'static
{
}

#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Fetch an object by key. A missing object is `Ok(None)`, never an error.
    async fn get<K: StoredObject>(&self, namespace: &str, name: &str) -> Result<Option<K>>;

    /// Create an object in its own namespace.
    async fn create<K: StoredObject>(&self, obj: &K) -> Result<K>;
}

/// [`ObjectStore`] backed by the Kubernetes API server
#[derive(Clone)]
pub struct KubeStore {
    client: Client,
    field_manager: String,
}

impl KubeStore {
    pub fn new(client: Client, field_manager: impl Into<String>) -> Self {
        Self {
            client,
            field_manager: field_manager.into(),
        }
    }
}

#[async_trait]
impl ObjectStore for KubeStore {
    async fn get<K: StoredObject>(&self, namespace: &str, name: &str) -> Result<Option<K>> {
        let api: Api<K> = Api::namespaced(self.client.clone(), namespace);
        api.get_opt(name).await.map_err(Error::KubeError)
    }

    async fn create<K: StoredObject>(&self, obj: &K) -> Result<K> {
        let ns = obj
            .namespace()
            .ok_or_else(|| Error::MissingNamespace(obj.name_any()))?;
        let api: Api<K> = Api::namespaced(self.client.clone(), &ns);
        let pp = PostParams {
            field_manager: Some(self.field_manager.clone()),
            ..PostParams::default()
        };
        api.create(&pp, obj).await.map_err(Error::KubeError)
    }
}
