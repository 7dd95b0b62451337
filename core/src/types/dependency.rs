use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::ecosystem::Ecosystem;

/// What role a detected file plays for the ecosystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencyFileKind {
    /// Direct dependency declaration with version ranges.
    Declaration,
    /// Fully resolved, pinned dependency tree.
    Lockfile,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyFile {
    pub ecosystem: Ecosystem,
    pub kind: DependencyFileKind,
    pub path: PathBuf,
}
