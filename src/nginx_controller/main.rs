use super::{NginxDeploy, ReconcileOutcome, Reconciler, NGINX_MANAGER_NAME};
use crate::{config::Config, events_helper::emit_info, store::KubeStore, Error, Result};
use chrono::{DateTime, Utc};
use futures::StreamExt;
use kube::{
    api::{Api, ListParams, ResourceExt},
    client::Client,
    runtime::{
        controller::{Action, Controller},
        events::{Recorder, Reporter},
        reflector::ObjectRef,
        watcher,
    },
};
use serde::Serialize;
use std::sync::Arc;
use tokio::{sync::RwLock, time::Duration};
use tracing::*;

// Context for our reconciler
pub struct Context {
    /// Reconciler talking to the API server
    pub reconciler: Reconciler<KubeStore>,
    /// Event recorder
    pub recorder: Recorder,
    /// Diagnostics read by the web server
    pub diagnostics: Arc<RwLock<Diagnostics>>,
    /// Delay before a failed reconciliation is retried
    pub error_requeue: Duration,
}

async fn reconcile_nginx_deploy(nd: Arc<NginxDeploy>, ctx: Arc<Context>) -> Result<Action> {
    let key = ObjectRef::from_obj(nd.as_ref());
    info!(
        "Reconciling NginxDeploy \"{}\" in {}",
        nd.name_any(),
        nd.namespace().unwrap_or_default()
    );
    let outcome = ctx.reconciler.reconcile(&key).await?;
    if let ReconcileOutcome::Created { name } = &outcome {
        emit_info(
            &ctx.recorder,
            nd.as_ref(),
            "DeploymentCreated",
            "Created",
            Some(format!("Created `{}` Deployment for `{}` NginxDeploy", name, nd.name_any())),
        )
        .await;
    }
    let action = outcome.action();
    ctx.diagnostics.write().await.record(outcome);
    Ok(action)
}

fn error_policy(nd: Arc<NginxDeploy>, error: &Error, ctx: Arc<Context>) -> Action {
    warn!("reconcile of NginxDeploy \"{}\" failed: {:?}", nd.name_any(), error);
    // Skipped while the web server holds a read lock, the next failure catches up
    if let Ok(mut diagnostics) = ctx.diagnostics.try_write() {
        diagnostics.record_error(error);
    }
    Action::requeue(ctx.error_requeue)
}

/// Diagnostics to be exposed by the web server
#[derive(Clone, Serialize)]
pub struct Diagnostics {
    pub last_event: DateTime<Utc>,
    pub reconciliations: u64,
    pub last_outcome: Option<ReconcileOutcome>,
    pub failures: u64,
    pub last_error: Option<String>,
    #[serde(skip)]
    pub reporter: Reporter,
}
impl Default for Diagnostics {
    fn default() -> Self {
        Self {
            last_event: Utc::now(),
            reconciliations: 0,
            last_outcome: None,
            failures: 0,
            last_error: None,
            reporter: NGINX_MANAGER_NAME.into(),
        }
    }
}
impl Diagnostics {
    fn recorder(&self, client: Client) -> Recorder {
        Recorder::new(client, self.reporter.clone())
    }

    fn record(&mut self, outcome: ReconcileOutcome) {
        self.last_event = Utc::now();
        self.reconciliations += 1;
        self.last_outcome = Some(outcome);
    }

    fn record_error(&mut self, error: &Error) {
        self.last_event = Utc::now();
        self.failures += 1;
        self.last_error = Some(error.to_string());
    }
}

/// State shared between the controller and the web server
#[derive(Clone, Default)]
pub struct State {
    /// Diagnostics populated by the reconciler
    diagnostics: Arc<RwLock<Diagnostics>>,
}

impl State {
    /// State getter
    pub async fn diagnostics(&self) -> Diagnostics {
        self.diagnostics.read().await.clone()
    }

    // Create a Controller Context that can update State
    pub async fn to_context(&self, client: Client, config: &Config) -> Arc<Context> {
        Arc::new(Context {
            reconciler: Reconciler::new(KubeStore::new(client.clone(), NGINX_MANAGER_NAME)),
            recorder: self.diagnostics.read().await.recorder(client),
            diagnostics: self.diagnostics.clone(),
            error_requeue: config.error_requeue(),
        })
    }
}

/// Watch NginxDeploy objects and reconcile them until a shutdown signal arrives
pub async fn run(state: State, config: Config) -> Result<()> {
    let client = Client::try_default().await.map_err(Error::KubeError)?;
    let api: Api<NginxDeploy> = match &config.namespace {
        Some(ns) => Api::namespaced(client.clone(), ns),
        None => Api::all(client.clone()),
    };
    if let Err(e) = api.list(&ListParams::default().limit(1)).await {
        error!("NginxDeploy CRD is not queryable; {e:?}. Is the CRD installed?");
        info!("Installation: cargo run --bin gencrd -- -o . && kubectl apply -f nginxdeploy.yaml");
        return Err(Error::KubeError(e));
    }
    info!("Starting {} controller", NGINX_MANAGER_NAME);
    Controller::new(api, watcher::Config::default().any_semantic())
        .shutdown_on_signal()
        .run(
            reconcile_nginx_deploy,
            error_policy,
            state.to_context(client, &config).await,
        )
        .filter_map(async |x| std::result::Result::ok(x))
        .for_each(async |_| ())
        .await;
    Ok(())
}
