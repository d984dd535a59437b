//! Exercise registry
//!
//! Maps exercise ids to shared definitions. The registry is owned by the
//! host; the core never reaches for a global one.

use std::collections::HashMap;
use std::sync::Arc;

use super::definition::ExerciseDefinition;
use crate::error::{TrainerError, TrainerResult};

/// Catalog compiled into the crate
const BUILTIN_CATALOG: &str = include_str!("../../data/exercises.json");

#[derive(Debug, Default, Clone)]
pub struct ExerciseRegistry {
    definitions: HashMap<String, Arc<ExerciseDefinition>>,
}

impl ExerciseRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with the built-in catalog
    pub fn builtin() -> TrainerResult<Self> {
        let mut registry = Self::new();
        let definitions: Vec<ExerciseDefinition> = serde_json::from_str(BUILTIN_CATALOG)?;
        for definition in definitions {
            registry.register(definition)?;
        }
        Ok(registry)
    }

    /// Validate and insert a definition, replacing any previous one with the same id
    pub fn register(&mut self, definition: ExerciseDefinition) -> TrainerResult<()> {
        definition.validate()?;
        log::debug!("Registered exercise '{}'", definition.id);
        self.definitions
            .insert(definition.id.clone(), Arc::new(definition));
        Ok(())
    }

    /// Load a JSON array of definitions.
    ///
    /// Entries that fail validation are skipped with a warning; malformed
    /// JSON fails the whole call. Returns the number registered.
    pub fn load_json(&mut self, json: &str) -> TrainerResult<usize> {
        let definitions: Vec<ExerciseDefinition> = serde_json::from_str(json)?;
        let mut loaded = 0;
        for definition in definitions {
            let id = definition.id.clone();
            match self.register(definition) {
                Ok(()) => loaded += 1,
                Err(e) => log::warn!("Skipping exercise '{}': {}", id, e),
            }
        }
        Ok(loaded)
    }

    pub fn get(&self, id: &str) -> Option<Arc<ExerciseDefinition>> {
        self.definitions.get(id).cloned()
    }

    /// Like `get`, but an unknown id is an error
    pub fn require(&self, id: &str) -> TrainerResult<Arc<ExerciseDefinition>> {
        self.get(id).ok_or_else(|| TrainerError::UnknownExercise { id: id.to_string() })
    }

    pub fn contains(&self, id: &str) -> bool {
        self.definitions.contains_key(id)
    }

    /// Registered ids, sorted
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.definitions.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
