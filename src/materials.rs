//! Material Kind Registry
//!
//! The material system itself lives with the backend; the orchestrator only
//! needs to answer "what kind of material is this name" without inspecting
//! material objects. The kind is stored as a tagged enum at registration
//! time and resolved in O(1).

use std::collections::HashMap;

use crate::errors::{GfxError, Result};

/// Kind tag of a registered material.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialKind {
    /// Ordinary lit surface material.
    Standard,
    /// Sky-dome material, drawn by the sky stage.
    Sky,
}

/// Name-keyed registry of material kinds.
#[derive(Debug, Default)]
pub struct MaterialKindRegistry {
    kinds: HashMap<String, MaterialKind>,
}

impl MaterialKindRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or re-registers) a material name with its kind.
    pub fn register(&mut self, name: impl Into<String>, kind: MaterialKind) {
        self.kinds.insert(name.into(), kind);
    }

    /// Whether any material with this name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.kinds.contains_key(name)
    }

    /// The kind of the named material.
    pub fn kind(&self, name: &str) -> Result<MaterialKind> {
        self.kinds
            .get(name)
            .copied()
            .ok_or_else(|| GfxError::Configuration(format!("non-existent material: \"{name}\"")))
    }
}
