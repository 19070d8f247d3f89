//! Fake cluster for controller tests, backed by `kube-fake-client`.

use super::{NginxDeploy, NginxDeploySpec};
use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use kube::Client;
use kube_fake_client::{interceptor, ClientBuilder, Error as FakeError};
use std::sync::{Arc, Mutex};

/// A request the controller sent to the fake API server
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    Get { namespace: String, name: String },
    Create { kind: String, namespace: String, name: String },
}

#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<Call>>>);

impl CallLog {
    fn push(&self, call: Call) {
        self.0.lock().unwrap().push(call);
    }

    pub fn all(&self) -> Vec<Call> {
        self.0.lock().unwrap().clone()
    }

    pub fn gets(&self) -> Vec<String> {
        self.all()
            .into_iter()
            .filter_map(|c| match c {
                Call::Get { name, .. } => Some(name),
                Call::Create { .. } => None,
            })
            .collect()
    }

    pub fn creates_of(&self, kind: &str) -> Vec<String> {
        self.all()
            .into_iter()
            .filter_map(|c| match c {
                Call::Create { kind: k, name, .. } if k == kind => Some(name),
                _ => None,
            })
            .collect()
    }
}

/// `sample` in `default`, as the API server would hand it out
pub fn sample(foo: &str) -> NginxDeploy {
    named("sample", foo)
}

pub fn named(name: &str, foo: &str) -> NginxDeploy {
    let mut nd = NginxDeploy::new(name, NginxDeploySpec { foo: foo.into() });
    nd.metadata = ObjectMeta {
        name: Some(name.into()),
        namespace: Some("default".into()),
        uid: Some(format!("3f1c2a9e-0000-4000-8000-{:0>12}", name.len())),
        ..ObjectMeta::default()
    };
    nd
}

#[derive(Default)]
pub struct FakeCluster {
    nginx_deploys: Vec<NginxDeploy>,
    deployments: Vec<Deployment>,
    failing_gets: Vec<String>,
    failing_creates: Vec<String>,
}

impl FakeCluster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_nginx_deploy(mut self, nd: NginxDeploy) -> Self {
        self.nginx_deploys.push(nd);
        self
    }

    pub fn with_deployment(mut self, deploy: Deployment) -> Self {
        self.deployments.push(deploy);
        self
    }

    /// Answer GETs for `name` with a 500
    pub fn failing_get(mut self, name: &str) -> Self {
        self.failing_gets.push(name.to_string());
        self
    }

    /// Answer POSTs creating `name` with a 500
    pub fn failing_create(mut self, name: &str) -> Self {
        self.failing_creates.push(name.to_string());
        self
    }

    pub async fn build(self) -> (Client, CallLog) {
        let log = CallLog::default();
        let get_log = log.clone();
        let create_log = log.clone();
        let failing_gets = self.failing_gets;
        let failing_creates = self.failing_creates;

        let funcs = interceptor::Funcs::new()
            .get(move |ctx| {
                get_log.push(Call::Get {
                    namespace: ctx.namespace.to_string(),
                    name: ctx.name.to_string(),
                });
                if failing_gets.iter().any(|n| n == ctx.name) {
                    return Err(FakeError::Internal(format!("get {} timed out", ctx.name)));
                }
                Ok(None)
            })
            .create(move |ctx| {
                let kind = ctx.object["kind"].as_str().unwrap_or_default().to_string();
                let name = ctx.object["metadata"]["name"]
                    .as_str()
                    .unwrap_or_default()
                    .to_string();
                create_log.push(Call::Create {
                    kind: kind.clone(),
                    namespace: ctx.namespace.to_string(),
                    name: name.clone(),
                });
                if failing_creates.contains(&name) {
                    return Err(FakeError::Internal(format!("create {name} forbidden")));
                }
                // Events are accepted but not stored
                if kind == "Event" {
                    return Ok(Some(ctx.object.clone()));
                }
                Ok(None)
            });

        let client = ClientBuilder::new()
            .with_resource::<NginxDeploy>()
            .with_objects(self.nginx_deploys)
            .with_objects(self.deployments)
            .with_interceptor_funcs(funcs)
            .build()
            .await
            .expect("fake client");
        (client, log)
    }
}
