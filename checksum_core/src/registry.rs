//! Static registry of supported hash algorithms
//!
//! Algorithm names resolve case-insensitively but otherwise exactly; there is
//! no aliasing or prefix matching. The global registry is built once and
//! shared for the lifetime of the process.

use std::collections::HashMap;

use once_cell::sync::OnceCell;

use crate::algorithms;
use crate::error::{Result, ValidationError};
use crate::traits::HashAlgorithmImpl;

/// Algorithm used when the caller does not name one
pub const DEFAULT_ALGORITHM: &str = "SHA256";

static GLOBAL_REGISTRY: OnceCell<AlgorithmRegistry> = OnceCell::new();

/// Immutable lookup table from algorithm name to implementation
pub struct AlgorithmRegistry {
    // keyed by lowercased canonical name
    algorithms: HashMap<String, Box<dyn HashAlgorithmImpl>>,
    names: Vec<&'static str>,
}

impl AlgorithmRegistry {
    /// Build a registry holding every supported algorithm
    pub fn new() -> Self {
        let mut registry = Self {
            algorithms: HashMap::new(),
            names: Vec::new(),
        };
        algorithms::register_all(&mut registry);
        registry.names.sort_unstable_by_key(|name| name.to_ascii_lowercase());
        registry
    }

    /// Access the shared process-wide registry
    pub fn global() -> &'static Self {
        GLOBAL_REGISTRY.get_or_init(Self::new)
    }

    /// Register one algorithm implementation
    ///
    /// Panics if the name is already taken; registration happens once at
    /// startup with a fixed algorithm set, so a collision is a bug.
    pub fn register(&mut self, algorithm: Box<dyn HashAlgorithmImpl>) {
        let id = algorithm.id();
        let key = id.to_ascii_lowercase();
        let previous = self.algorithms.insert(key, algorithm);
        assert!(previous.is_none(), "duplicate algorithm registration: {id}");
        self.names.push(id);
    }

    /// Resolve an algorithm by name, ignoring ASCII case
    pub fn resolve(&self, name: &str) -> Result<&dyn HashAlgorithmImpl> {
        self.algorithms
            .get(&name.to_ascii_lowercase())
            .map(|algorithm| algorithm.as_ref())
            .ok_or_else(|| ValidationError::unsupported_algorithm(name).into())
    }

    /// Canonical names of every registered algorithm, sorted
    pub fn list(&self) -> &[&'static str] {
        &self.names
    }

    /// Number of registered algorithms
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for AlgorithmRegistry {
    fn default() -> Self {
        Self::new()
    }
}
