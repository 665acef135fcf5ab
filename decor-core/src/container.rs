use std::any::{type_name, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::handler::Instance;

// ── ClassId ────────────────────────────────────────────────────────────────

/// Identity of a controller type, as handed to a [`Container`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClassId {
    type_id: TypeId,
    name: &'static str,
}

impl ClassId {
    pub fn of<C: 'static>() -> Self {
        Self {
            type_id: TypeId::of::<C>(),
            name: type_name::<C>(),
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

// ── ResolveError ───────────────────────────────────────────────────────────

/// Errors raised while obtaining a controller instance.
///
/// The registrar never wraps or retries these: whatever a [`Container`]
/// returns is what the caller of
/// [`register_controllers`](crate::registrar::register_controllers) sees.
#[derive(Debug)]
pub enum ResolveError {
    /// Nothing is registered that can produce the requested type.
    NoProvider { identifier: String },
    /// The produced instance is not of the requested type.
    TypeMismatch { expected: String },
    /// A container-specific failure.
    Other(Box<dyn std::error::Error + Send + Sync>),
}

impl ResolveError {
    pub fn no_provider(id: &ClassId) -> Self {
        ResolveError::NoProvider {
            identifier: id.name().to_string(),
        }
    }
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::NoProvider { identifier } => {
                write!(f, "No provider for {identifier}")
            }
            ResolveError::TypeMismatch { expected } => {
                write!(f, "Resolved instance is not a `{expected}`")
            }
            ResolveError::Other(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ResolveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ResolveError::Other(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

// ── Container ──────────────────────────────────────────────────────────────

/// External resolver producing controller instances.
///
/// Plug an existing DI container in by implementing this trait. When a
/// container is supplied to the registrar, it is the only source of
/// controller instances.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot resolve controller instances",
    label = "this type is not a `Container`",
    note = "implement `Container::get`, or use `SimpleContainer`"
)]
pub trait Container: Send + Sync {
    fn get(&self, id: &ClassId) -> Result<Instance, ResolveError>;
}

/// Typed access on top of [`Container`].
pub trait ContainerExt: Container {
    fn resolve<C: Send + Sync + 'static>(&self) -> Result<Arc<C>, ResolveError> {
        let id = ClassId::of::<C>();
        self.get(&id)?
            .downcast::<C>()
            .map_err(|_| ResolveError::TypeMismatch {
                expected: id.name().to_string(),
            })
    }
}

impl<T: Container + ?Sized> ContainerExt for T {}

impl<T: Container + ?Sized> Container for Arc<T> {
    fn get(&self, id: &ClassId) -> Result<Instance, ResolveError> {
        (**self).get(id)
    }
}

type Factory = Box<dyn Fn() -> Instance + Send + Sync>;

enum Provider {
    Instance(Instance),
    Factory(Factory),
}

/// A map-backed [`Container`] keyed by type.
///
/// ```ignore
/// let container = SimpleContainer::new()
///     .provide(GreetingController::new(GreetingService::default()));
/// ```
#[derive(Default)]
pub struct SimpleContainer {
    providers: HashMap<TypeId, Provider>,
}

impl fmt::Debug for SimpleContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimpleContainer")
            .field("provider_count", &self.providers.len())
            .finish()
    }
}

impl SimpleContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a shared instance. Every resolution returns the same `Arc`.
    pub fn provide<C: Send + Sync + 'static>(mut self, instance: C) -> Self {
        self.providers
            .insert(TypeId::of::<C>(), Provider::Instance(Arc::new(instance)));
        self
    }

    /// Register a factory invoked on every resolution.
    pub fn provide_with<C, F>(mut self, factory: F) -> Self
    where
        C: Send + Sync + 'static,
        F: Fn() -> C + Send + Sync + 'static,
    {
        let factory: Factory = Box::new(move || Arc::new(factory()) as Instance);
        self.providers
            .insert(TypeId::of::<C>(), Provider::Factory(factory));
        self
    }

    pub fn contains<C: 'static>(&self) -> bool {
        self.providers.contains_key(&TypeId::of::<C>())
    }
}

impl Container for SimpleContainer {
    fn get(&self, id: &ClassId) -> Result<Instance, ResolveError> {
        match self.providers.get(&id.type_id()) {
            Some(Provider::Instance(instance)) => Ok(instance.clone()),
            Some(Provider::Factory(factory)) => Ok(factory()),
            None => Err(ResolveError::no_provider(id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Service {
        message: &'static str,
    }

    #[derive(Debug)]
    struct Unknown;

    #[test]
    fn resolves_provided_instance() {
        let container = SimpleContainer::new().provide(Service { message: "hello" });
        let a = container.resolve::<Service>().unwrap();
        let b = container.resolve::<Service>().unwrap();
        assert_eq!(a.message, "hello");
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn factory_builds_fresh_instances() {
        let container = SimpleContainer::new().provide_with(|| Service { message: "fresh" });
        let a = container.resolve::<Service>().unwrap();
        let b = container.resolve::<Service>().unwrap();
        assert_eq!(b.message, "fresh");
        assert!(!Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn missing_type_is_no_provider() {
        let container = SimpleContainer::new();
        let err = container.resolve::<Unknown>().unwrap_err();
        match err {
            ResolveError::NoProvider { identifier } => assert!(identifier.ends_with("Unknown")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn display_names_the_identifier() {
        let err = ResolveError::no_provider(&ClassId::of::<Unknown>());
        assert!(err.to_string().starts_with("No provider for "));
    }

    #[test]
    fn arc_container_delegates() {
        let container: Arc<dyn Container> = Arc::new(SimpleContainer::new().provide(Service { message: "arc" }));
        assert_eq!(container.resolve::<Service>().unwrap().message, "arc");
    }
}
