use crate::secret::{SecretError, SecretProvider, SecretRef};
use serde::Deserialize;
use std::process::Command;
use tracing::{debug, warn};

//--------------------------------------------------------------------------------------------------
// Secret provider backed by the kubectl CLI
//--------------------------------------------------------------------------------------------------

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct KubectlConfig {
    pub program: String,
    pub context: Option<String>,
}

impl Default for KubectlConfig {
    fn default() -> Self {
        KubectlConfig {
            program: "kubectl".to_string(),
            context: None,
        }
    }
}

pub struct KubectlSecretProvider {
    config: KubectlConfig,
}

impl KubectlSecretProvider {
    pub fn new(config: KubectlConfig) -> Self {
        Self { config }
    }

    fn args(&self, secret: &SecretRef) -> Vec<String> {
        let mut args = vec![
            "get".to_string(),
            "secret".to_string(),
            secret.name.clone(),
            "-n".to_string(),
            secret.namespace.clone(),
            "-o".to_string(),
            format!("jsonpath={{.data.{}}}", secret.key),
        ];
        if let Some(context) = &self.config.context {
            args.push("--context".to_string());
            args.push(context.clone());
        }
        args
    }
}

impl SecretProvider for KubectlSecretProvider {
    fn fetch(&self, secret: &SecretRef) -> Result<Vec<u8>, SecretError> {
        let args = self.args(secret);
        debug!("Running {} {}", self.config.program, args.join(" "));

        let output = Command::new(&self.config.program)
            .args(&args)
            .output()
            .map_err(|e| {
                warn!("Failed to run {}: {}", self.config.program, e);
                SecretError::Access {
                    secret: secret.clone(),
                    reason: format!("failed to run {}: {}", self.config.program, e),
                }
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            warn!("{} exited with {}: {}", self.config.program, output.status, stderr);
            return Err(SecretError::Access {
                secret: secret.clone(),
                reason: if stderr.is_empty() {
                    format!("{} exited with {}", self.config.program, output.status)
                } else {
                    stderr
                },
            });
        }

        Ok(output.stdout)
    }
}

//--------------------------------------------------------------------------------------------------
