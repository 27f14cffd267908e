//! The workflow file deployed to every private repository.
//!
//! Two variants exist. They differ only in the file name and in the branch the file is
//! committed to (and triggered on). The YAML bodies are compile-time constants; nothing
//! about a target repository changes what gets written.

use std::fmt;
use std::str::FromStr;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use github_client::FileWritePayload;
use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "workflow_tests.rs"]
mod tests;

/// Directory GitHub Actions reads workflow definitions from.
pub const WORKFLOWS_DIRECTORY: &str = ".github/workflows";

const BUILD_WORKFLOW: &str = r#"name: Example workflow with OX Security Scan
on:
  push:
    branches:
      - master
  pull_request:
    types: [opened, reopened, synchronize]
    branches:
      - master
jobs:
  security:
    runs-on: ubuntu-latest
    steps:
      - name: Run OX Security Scan to check for vulnerabilities
        with:
          ox_api_key: ${{ secrets.OX_API_KEY }}
          ox_host_url: ${{ vars.OX_HOST_URL }}
        uses: oxsecurity/ox-security-scan@main"#;

const OX_SCAN_WORKFLOW: &str = r#"name: Example workflow with OX Security Scan
on:
  push:
    branches:
      - main
  pull_request:
    types: [opened, reopened, synchronize]
    branches:
      - main
jobs:
  security:
    runs-on: ubuntu-latest
    steps:
      - name: Run OX Security Scan to check for vulnerabilities
        with:
          ox_api_key: ${{ secrets.OX_API_KEY }}
          ox_host_url: ${{ vars.OX_HOST_URL }}
        uses: oxsecurity/ox-security-scan@main"#;

/// Which flavour of the workflow file to deploy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorkflowVariant {
    /// `build.yml` on `master`
    #[default]
    Build,

    /// `ox-scan.yml` on `main`
    OxScan,
}

impl WorkflowVariant {
    pub fn file_name(&self) -> &'static str {
        match self {
            WorkflowVariant::Build => "build.yml",
            WorkflowVariant::OxScan => "ox-scan.yml",
        }
    }

    pub fn branch(&self) -> &'static str {
        match self {
            WorkflowVariant::Build => "master",
            WorkflowVariant::OxScan => "main",
        }
    }

    /// The YAML document committed for this variant.
    pub fn contents(&self) -> &'static str {
        match self {
            WorkflowVariant::Build => BUILD_WORKFLOW,
            WorkflowVariant::OxScan => OX_SCAN_WORKFLOW,
        }
    }
}

impl fmt::Display for WorkflowVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkflowVariant::Build => write!(f, "build"),
            WorkflowVariant::OxScan => write!(f, "ox-scan"),
        }
    }
}

impl FromStr for WorkflowVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "build" => Ok(WorkflowVariant::Build),
            "ox-scan" => Ok(WorkflowVariant::OxScan),
            other => Err(format!(
                "unknown workflow variant '{}', expected 'build' or 'ox-scan'",
                other
            )),
        }
    }
}

/// A workflow definition ready to be sent through the Contents API.
///
/// The content is base64 encoded once, up front, and reused for every repository.
///
/// # Examples
///
/// ```rust
/// use pipeline_updater_core::{WorkflowFile, WorkflowVariant};
///
/// let workflow = WorkflowFile::new(WorkflowVariant::OxScan);
///
/// assert_eq!(workflow.path(), ".github/workflows/ox-scan.yml");
/// assert_eq!(workflow.branch(), "main");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowFile {
    variant: WorkflowVariant,
    path: String,
    encoded_content: String,
}

impl WorkflowFile {
    pub fn new(variant: WorkflowVariant) -> Self {
        Self {
            variant,
            path: format!("{}/{}", WORKFLOWS_DIRECTORY, variant.file_name()),
            encoded_content: STANDARD.encode(variant.contents().as_bytes()),
        }
    }

    pub fn variant(&self) -> WorkflowVariant {
        self.variant
    }

    /// Repository-relative path, e.g. `.github/workflows/build.yml`.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn file_name(&self) -> &'static str {
        self.variant.file_name()
    }

    pub fn branch(&self) -> &'static str {
        self.variant.branch()
    }

    pub fn encoded_content(&self) -> &str {
        &self.encoded_content
    }

    /// Body for the first write attempt, which only succeeds if the file is absent.
    pub fn create_payload(&self) -> FileWritePayload {
        FileWritePayload::new(
            &format!("Add new file: {}", self.file_name()),
            &self.encoded_content,
            self.branch(),
        )
    }

    /// Body for overwriting an existing file with the given revision hash.
    pub fn update_payload(&self, sha: Option<String>) -> FileWritePayload {
        FileWritePayload::new(
            &format!("Update file: {}", self.file_name()),
            &self.encoded_content,
            self.branch(),
        )
        .with_sha(sha)
    }
}
