//! Deployment target classification.

use serde::{Deserialize, Serialize};

/// Which static deployment should serve a request.
///
/// GitHub Pages publishes one build of the SPA per long-lived branch,
/// each under its own base path. The default build lives directly under
/// the site root; branch builds live one segment deeper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DeploymentTarget {
    /// The default landing deployment at `/<root>/`.
    Landing,
    /// A branch-specific deployment at `/<root>/<branch>/`.
    BranchDeployment {
        /// Name of the deployed branch.
        branch: String,
    },
}

impl DeploymentTarget {
    /// Returns the deployment's entry path under `site_root`.
    pub fn entry_path(&self, site_root: &str) -> String {
        match self {
            Self::Landing => format!("/{}/", site_root),
            Self::BranchDeployment { branch } => format!("/{}/{}/", site_root, branch),
        }
    }

    /// Returns the deployed branch name, if any.
    pub fn branch(&self) -> Option<&str> {
        match self {
            Self::Landing => None,
            Self::BranchDeployment { branch } => Some(branch),
        }
    }
}

/// Decides whether an unrecognized leading path segment names a branch
/// deployment.
///
/// The 404 handler has no way to enumerate live deployments, so the
/// shipped policy is optimistic: any segment that is not a known component
/// is assumed to be a deployment branch. The trait exists so a validating
/// strategy can be substituted without touching the path classifier.
pub trait DeploymentPolicy: Send + Sync {
    /// Returns true if `segment` should be treated as a deployment branch.
    fn accepts_branch(&self, segment: &str) -> bool;
}

/// The default, optimistic policy: every segment is accepted.
#[derive(Debug, Clone, Copy, Default)]
pub struct OptimisticPolicy;

impl DeploymentPolicy for OptimisticPolicy {
    fn accepts_branch(&self, _segment: &str) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_paths() {
        assert_eq!(DeploymentTarget::Landing.entry_path("sgex"), "/sgex/");
        let target = DeploymentTarget::BranchDeployment {
            branch: "feature-123".to_string(),
        };
        assert_eq!(target.entry_path("sgex"), "/sgex/feature-123/");
    }

    #[test]
    fn test_tagged_json_shape() {
        let json = serde_json::to_string(&DeploymentTarget::Landing).unwrap();
        assert_eq!(json, r#"{"kind":"landing"}"#);

        let target = DeploymentTarget::BranchDeployment {
            branch: "main".to_string(),
        };
        let json = serde_json::to_string(&target).unwrap();
        assert_eq!(json, r#"{"kind":"branchDeployment","branch":"main"}"#);
    }

    #[test]
    fn test_optimistic_policy_accepts_everything() {
        assert!(OptimisticPolicy.accepts_branch("feature-123"));
        assert!(OptimisticPolicy.accepts_branch(""));
    }
}
