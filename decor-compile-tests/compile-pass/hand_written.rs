use std::sync::Arc;

use decor::prelude::*;

pub struct Greeter {
    greeting: String,
}

impl Controller for Greeter {
    fn describe(registry: &mut ControllerRegistry) {
        registry
            .describe::<Self>("/greet")
            .get("/", "greet", |this: Arc<Greeter>, _req| async move {
                this.greeting.clone()
            });
    }
}

fn main() {
    let container = SimpleContainer::new().provide(Greeter {
        greeting: "hi".into(),
    });
    let _builder = AppBuilder::new()
        .with_container(container)
        .register_injected::<Greeter>();
}
