use super::NginxDeploy;
use crate::{Error, Result};
use k8s_openapi::{
    api::{
        apps::v1::{Deployment, DeploymentSpec},
        core::v1::{Container, ContainerPort, PodSpec, PodTemplateSpec},
    },
    apimachinery::pkg::apis::meta::v1::{LabelSelector, ObjectMeta},
};
use kube::{Resource, ResourceExt};
use std::collections::BTreeMap;

pub static DEPLOYMENT_NAME_SUFFIX: &str = "nginx-deployment";
pub static APP_LABEL_KEY: &str = "app";
pub static APP_LABEL_VALUE: &str = "nginx";
pub static INSTANCE_LABEL_KEY: &str = "app.kubernetes.io/instance";
pub static NGINX_CONTAINER_NAME: &str = "nginx";
pub static NGINX_IMAGE: &str = "nginx:latest";
pub const NGINX_CONTAINER_PORT: i32 = 80;
pub const NGINX_REPLICAS: i32 = 1;

/// Name of the Deployment managed on behalf of `nd`
pub fn managed_deployment_name(nd: &NginxDeploy) -> String {
    format!("{}-{}", nd.name_any(), DEPLOYMENT_NAME_SUFFIX)
}

fn selector_labels(nd: &NginxDeploy) -> BTreeMap<String, String> {
    BTreeMap::from([
        (APP_LABEL_KEY.to_string(), APP_LABEL_VALUE.to_string()),
        (INSTANCE_LABEL_KEY.to_string(), nd.name_any()),
    ])
}

/// Desired Deployment for `nd`. Everything but the name, namespace, instance
/// label and owner reference is fixed.
pub fn create_owned_deployment(nd: &NginxDeploy) -> Result<Deployment> {
    let namespace = nd
        .namespace()
        .ok_or_else(|| Error::MissingNamespace(nd.name_any()))?;
    let labels = selector_labels(nd);
    // No UID means the object never came from the API server
    let owner_references = nd.controller_owner_ref(&()).map(|oref| vec![oref]);

    Ok(Deployment {
        metadata: ObjectMeta {
            name: Some(managed_deployment_name(nd)),
            namespace: Some(namespace),
            labels: Some(labels.clone()),
            owner_references,
            ..ObjectMeta::default()
        },
        spec: Some(DeploymentSpec {
            replicas: Some(NGINX_REPLICAS),
            selector: LabelSelector {
                match_labels: Some(labels.clone()),
                ..LabelSelector::default()
            },
            template: PodTemplateSpec {
                metadata: Some(ObjectMeta {
                    labels: Some(labels),
                    ..ObjectMeta::default()
                }),
                spec: Some(PodSpec {
                    containers: vec![Container {
                        name: NGINX_CONTAINER_NAME.to_string(),
                        image: Some(NGINX_IMAGE.to_string()),
                        ports: Some(vec![ContainerPort {
                            container_port: NGINX_CONTAINER_PORT,
                            protocol: Some("TCP".to_string()),
                            ..ContainerPort::default()
                        }]),
                        ..Container::default()
                    }],
                    ..PodSpec::default()
                }),
            },
            ..DeploymentSpec::default()
        }),
        ..Deployment::default()
    })
}
