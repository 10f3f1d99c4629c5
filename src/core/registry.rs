//! Named directories of pluggable components
//!
//! Each registry maps a name to a constructor and holds the process-wide
//! default instance of its component kind.

use super::formatter::Formatter;
use super::handler::Handler;
use super::record_builder::Builder;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Constructor stored in a registry
pub type Factory<T> = Arc<dyn Fn() -> Arc<T> + Send + Sync>;

pub type HandlerRegistry = ComponentRegistry<dyn Handler>;
pub type FormatterRegistry = ComponentRegistry<dyn Formatter>;
pub type BuilderRegistry = ComponentRegistry<dyn Builder>;

/// Registry of constructors for one component kind, plus its default instance
///
/// # Example
///
/// ```
/// use rust_logged::{FormatterRegistry, TemplateFormatter};
/// use std::sync::Arc;
///
/// let registry = FormatterRegistry::new("formatter", Arc::new(TemplateFormatter::default()));
/// registry.add("Short", || Arc::new(TemplateFormatter::with_template("{level} {message}")));
///
/// assert!(registry.get("Short").is_some());
/// assert!(registry.create("Missing").is_none());
/// ```
pub struct ComponentRegistry<T: ?Sized> {
    kind: &'static str,
    factories: RwLock<HashMap<String, Factory<T>>>,
    default: RwLock<Arc<T>>,
}

impl<T: ?Sized> ComponentRegistry<T> {
    pub fn new(kind: &'static str, default: Arc<T>) -> Self {
        Self {
            kind,
            factories: RwLock::new(HashMap::new()),
            default: RwLock::new(default),
        }
    }

    /// Register a constructor; an existing name is replaced
    pub fn add<F>(&self, name: impl Into<String>, factory: F)
    where
        F: Fn() -> Arc<T> + Send + Sync + 'static,
    {
        self.factories.write().insert(name.into(), Arc::new(factory));
    }

    /// Constructor registered under `name`
    pub fn get(&self, name: &str) -> Option<Factory<T>> {
        self.factories.read().get(name).cloned()
    }

    /// Build a fresh instance from the constructor registered under `name`
    pub fn create(&self, name: &str) -> Option<Arc<T>> {
        self.get(name).map(|factory| factory())
    }

    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.factories.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn default_instance(&self) -> Arc<T> {
        Arc::clone(&self.default.read())
    }

    pub fn set_default(&self, instance: Arc<T>) {
        *self.default.write() = instance;
    }
}

impl<T: ?Sized> fmt::Debug for ComponentRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentRegistry")
            .field("kind", &self.kind)
            .field("names", &self.names())
            .finish()
    }
}
