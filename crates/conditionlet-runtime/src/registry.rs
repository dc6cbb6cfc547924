//! Conditionlet Registry Module
//!
//! Maps stable type identifiers to shared conditionlet instances. Hosts fill a
//! registry during startup and then only read from it; a registry can also be
//! published once as the process-wide instance.

use crate::conditionlets::{
    ConditionletSettings, RequestHeaderConditionlet, UsersIpAddressConditionlet,
};
use crate::error::{Result, RuntimeError};
use conditionlet_core::Conditionlet;
use once_cell::sync::OnceCell;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

static GLOBAL: OnceCell<ConditionletRegistry> = OnceCell::new();

/// Registry of conditionlets keyed by type id
#[derive(Default)]
pub struct ConditionletRegistry {
    conditionlets: HashMap<String, Arc<dyn Conditionlet>>,
}

impl ConditionletRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in conditionlets
    pub fn with_builtins(settings: ConditionletSettings) -> Self {
        let builtins: [Arc<dyn Conditionlet>; 2] = [
            Arc::new(UsersIpAddressConditionlet::new(settings.clone())),
            Arc::new(RequestHeaderConditionlet::new(settings)),
        ];

        let mut registry = Self::new();
        for conditionlet in builtins {
            registry
                .conditionlets
                .insert(conditionlet.id().to_string(), conditionlet);
        }
        info!("Registered {} built-in conditionlets", registry.len());
        registry
    }

    /// Register a conditionlet under `id`
    ///
    /// The id usually equals `conditionlet.id()`, but aliases are allowed.
    pub fn register(&mut self, id: impl Into<String>, conditionlet: Arc<dyn Conditionlet>) -> Result<()> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(RuntimeError::InvalidId(id));
        }
        if self.conditionlets.contains_key(&id) {
            return Err(RuntimeError::DuplicateConditionlet(id));
        }

        if id != conditionlet.id() {
            debug!("Registering {} under alias {}", conditionlet.id(), id);
        }
        self.conditionlets.insert(id, conditionlet);
        Ok(())
    }

    /// Resolve a conditionlet, failing with `NotFound` for unknown ids
    pub fn resolve(&self, id: &str) -> Result<Arc<dyn Conditionlet>> {
        self.get(id)
            .cloned()
            .ok_or_else(|| RuntimeError::NotFound(id.to_string()))
    }

    /// Get a conditionlet by id
    pub fn get(&self, id: &str) -> Option<&Arc<dyn Conditionlet>> {
        self.conditionlets.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.conditionlets.contains_key(id)
    }

    /// Registered ids, sorted
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.conditionlets.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.conditionlets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditionlets.is_empty()
    }

    /// Publish this registry as the process-wide instance
    ///
    /// Succeeds once; the registry is read-only from then on.
    pub fn install_global(self) -> Result<&'static ConditionletRegistry> {
        let mut pending = Some(self);
        let installed = GLOBAL.get_or_init(|| {
            info!("Installing global conditionlet registry");
            pending.take().unwrap_or_default()
        });
        if pending.is_some() {
            return Err(RuntimeError::GlobalAlreadyInstalled);
        }
        Ok(installed)
    }

    /// The process-wide registry, if one was installed
    pub fn global() -> Option<&'static ConditionletRegistry> {
        GLOBAL.get()
    }
}

impl fmt::Debug for ConditionletRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConditionletRegistry")
            .field("ids", &self.ids())
            .finish()
    }
}
