pub mod controllers;
pub mod middleware;
pub mod models;
pub mod services;

use decor::http::routing::get;
use decor::prelude::*;

use controllers::greeting_controller::GreetingController;
use controllers::user_controller::UserController;
use services::GreetingService;

/// Assemble the demo application from `config`.
pub fn app(config: DecorConfig) -> AppBuilder {
    let salutation = config.get_or("app.greeting", "Hello".to_string());
    let container = SimpleContainer::new()
        .provide(UserController::default())
        .provide(GreetingController::new(GreetingService::new(salutation)));

    AppBuilder::new()
        .with_config(config)
        .with_container(container)
        .middleware(middleware::request_log())
        .register_injected::<UserController>()
        .register_injected::<GreetingController>()
        .merge(Router::new().route("/health", get(|| async { "OK" })))
}
