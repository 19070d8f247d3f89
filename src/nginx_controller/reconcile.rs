use super::{create_owned_deployment, NginxDeploy};
use crate::{store::ObjectStore, Error, Result};
use k8s_openapi::api::apps::v1::Deployment;
use kube::{
    runtime::{controller::Action, reflector::ObjectRef},
    ResourceExt,
};
use serde::Serialize;
use std::time::Duration;
use tracing::*;


/// What a single reconciliation did
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "camelCase")]
pub enum ReconcileOutcome {
    /// The NginxDeploy no longer exists
    ResourceGone,
    /// The managed Deployment was missing and has been created
    Created { name: String },
    /// The managed Deployment is already there, left untouched
    AlreadyExists { name: String },
}

impl ReconcileOutcome {
    pub fn action(&self) -> Action {
        match self {
            ReconcileOutcome::Created { .. } => Action::requeue(Duration::ZERO),
            ReconcileOutcome::ResourceGone | ReconcileOutcome::AlreadyExists { .. } => {
                Action::await_change()
            }
        }
    }
}

/// Makes sure every valid NginxDeploy has its nginx Deployment.
///
/// Existence is all that is checked: a Deployment that drifted from the
/// desired shape is left alone, and nothing is ever updated or deleted.
pub struct Reconciler<S> {
    store: S,
}

impl<S: ObjectStore> Reconciler<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn reconcile(&self, key: &ObjectRef<NginxDeploy>) -> Result<ReconcileOutcome> {
        let ns = key
            .namespace
            .as_deref()
            .ok_or_else(|| Error::MissingNamespace(key.name.clone()))?;

        let nd = match self.store.get::<NginxDeploy>(ns, &key.name).await {
            Ok(Some(nd)) => nd,
            Ok(None) => {
                info!(
                    "NginxDeploy \"{}\" not found in {}, ignoring since it must be deleted",
                    key.name, ns
                );
                return Ok(ReconcileOutcome::ResourceGone);
            }
            Err(e) => {
                error!("Failed to get NginxDeploy \"{}\" in {}: {}", key.name, ns, e);
                return Err(e);
            }
        };

        if let Err(e) = nd.validate() {
            error!("Invalid NginxDeploy \"{}\" in {}: {}", nd.name_any(), ns, e);
            return Err(e);
        }

        let desired = create_owned_deployment(&nd)?;
        let name = desired.name_any();
        match self.store.get::<Deployment>(ns, &name).await {
            Ok(Some(_)) => {
                info!("Deployment \"{}\" already exists in {}", name, ns);
                Ok(ReconcileOutcome::AlreadyExists { name })
            }
            Ok(None) => {
                info!("Creating Deployment \"{}\" in {}", name, ns);
                if let Err(e) = self.store.create(&desired).await {
                    error!("Failed to create Deployment \"{}\" in {}: {}", name, ns, e);
                    return Err(e);
                }
                Ok(ReconcileOutcome::Created { name })
            }
            Err(e) => {
                error!("Failed to get Deployment \"{}\" in {}: {}", name, ns, e);
                Err(e)
            }
        }
    }
}
