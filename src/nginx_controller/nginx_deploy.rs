use crate::{Error, Result};
use kube::{CustomResource, CustomResourceExt};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(CustomResource, Deserialize, Serialize, Clone, Debug, Default, JsonSchema)]
#[serde(rename_all = "camelCase")]
#[kube(group = "app.example.com", version = "v1", kind = "NginxDeploy", derive = "Default", namespaced)]
pub struct NginxDeploySpec {
    #[serde(default)]
    pub foo: String,
}

impl NginxDeploy {
    /// Reject objects the controller refuses to act on
    pub fn validate(&self) -> Result<()> {
        if self.spec.foo.is_empty() {
            return Err(Error::InvalidSpec(
                "foo field in spec cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// CRD manifest as YAML, ready for `kubectl apply -f -`
pub fn crd_yaml() -> Result<String> {
    serde_yaml::to_string(&NginxDeploy::crd()).map_err(|e| Error::OtherError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_foo_is_invalid() {
        let nd = NginxDeploy::new("sample", NginxDeploySpec::default());
        match nd.validate() {
            Err(Error::InvalidSpec(msg)) => assert!(msg.contains("foo")),
            other => panic!("expected InvalidSpec, got {other:?}"),
        }
    }

    #[test]
    fn non_empty_foo_is_valid() {
        let nd = NginxDeploy::new("sample", NginxDeploySpec { foo: "bar".into() });
        assert!(nd.validate().is_ok());
    }

    #[test]
    fn missing_foo_deserializes_as_empty() {
        let nd: NginxDeploy = serde_json::from_value(serde_json::json!({
            "apiVersion": "app.example.com/v1",
            "kind": "NginxDeploy",
            "metadata": { "name": "sample", "namespace": "default" },
            "spec": {}
        }))
        .expect("deserialize");
        assert!(nd.validate().is_err());
    }
}
