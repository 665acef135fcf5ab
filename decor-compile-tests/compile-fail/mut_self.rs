#![allow(dead_code)]

use decor::prelude::*;

#[derive(Controller, Default)]
#[controller(path = "/counter")]
pub struct CounterController;

#[routes]
impl CounterController {
    #[post("/bump")]
    async fn bump(&mut self) -> &'static str {
        "bumped"
    }
}

fn main() {}
