#![allow(dead_code)]

use decor::prelude::*;

#[derive(Controller, Default)]
#[controller(path = "/users")]
pub struct UserController;

#[routes]
impl UserController {
    #[post("/")]
    async fn create(&self, req: Request, extra: u32) -> &'static str {
        "created"
    }
}

fn main() {}
