use decor::prelude::*;

#[derive(Controller, Default)]
#[controller(path = "/unit")]
pub struct UnitController;

#[routes]
impl UnitController {
    #[get("/ping")]
    async fn ping(&self) -> &'static str {
        "pong"
    }
}

fn main() {
    let mut registry = ControllerRegistry::new();
    registry.install::<UnitController>();
}
