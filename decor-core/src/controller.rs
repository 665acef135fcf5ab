use std::sync::Arc;

use crate::container::{ClassId, Container, ResolveError};
use crate::handler::Instance;
use crate::registry::ControllerRegistry;

/// A type that knows how to describe its own routes and middleware.
///
/// Generated by `#[routes]`; can also be implemented by hand on top of
/// [`ControllerRegistry::describe`].
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a controller",
    label = "missing `Controller` impl",
    note = "add `#[derive(Controller)]` to the struct and `#[routes]` to its impl block"
)]
pub trait Controller: Send + Sync + 'static {
    fn describe(registry: &mut ControllerRegistry);
}

/// A controller type as seen by the registrar: its identity plus, when the
/// type is `Default`, a way to build it without a container.
#[derive(Debug, Clone, Copy)]
pub struct ControllerClass {
    id: ClassId,
    construct: Option<fn() -> Instance>,
}

fn construct_default<C: Default + Send + Sync + 'static>() -> Instance {
    Arc::new(C::default())
}

impl ControllerClass {
    /// A controller constructible with `Default::default()`.
    pub fn of<C: Default + Send + Sync + 'static>() -> Self {
        Self {
            id: ClassId::of::<C>(),
            construct: Some(construct_default::<C> as fn() -> Instance),
        }
    }

    /// A controller that can only be obtained from a [`Container`].
    pub fn injected<C: Send + Sync + 'static>() -> Self {
        Self {
            id: ClassId::of::<C>(),
            construct: None,
        }
    }

    pub fn id(&self) -> &ClassId {
        &self.id
    }

    pub fn name(&self) -> &'static str {
        self.id.name()
    }

    /// Obtain an instance: from the container when one is given, otherwise
    /// through the default constructor.
    pub fn instantiate(&self, container: Option<&dyn Container>) -> Result<Instance, ResolveError> {
        match (container, self.construct) {
            (Some(container), _) => container.get(&self.id),
            (None, Some(construct)) => Ok(construct()),
            (None, None) => Err(ResolveError::no_provider(&self.id)),
        }
    }
}
