//! Ordered registry of search providers.

use std::sync::Arc;

use crate::Provider;

/// Ordered mapping from provider name to implementation.
///
/// Built once at startup and shared read-only between queries.
#[derive(Default, Clone)]
pub struct ProviderRegistry {
    providers: Vec<Arc<dyn Provider>>,
}

impl ProviderRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a provider. A provider with the same name is replaced in place.
    pub fn register<P: Provider + 'static>(&mut self, provider: P) {
        self.register_arc(Arc::new(provider));
    }

    /// Registers an already shared provider.
    pub fn register_arc(&mut self, provider: Arc<dyn Provider>) {
        let key = provider.name().to_lowercase();
        match self
            .providers
            .iter_mut()
            .find(|existing| existing.name().to_lowercase() == key)
        {
            Some(slot) => *slot = provider,
            None => self.providers.push(provider),
        }
    }

    /// Looks up a provider by name, case-insensitively.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Provider>> {
        self.providers
            .iter()
            .find(|provider| provider.name().eq_ignore_ascii_case(name))
    }

    /// Names of enabled providers, lowercased, in registration order.
    pub fn names(&self) -> Vec<String> {
        self.providers
            .iter()
            .filter(|provider| provider.is_enabled())
            .map(|provider| provider.name().to_lowercase())
            .collect()
    }

    /// Number of registered providers, enabled or not.
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.providers.iter().map(|p| p.name()).collect::<Vec<_>>())
            .finish()
    }
}
