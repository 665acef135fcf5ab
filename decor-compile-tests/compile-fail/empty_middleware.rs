#![allow(dead_code)]

use decor::prelude::*;

#[derive(Controller, Default)]
#[controller(path = "/audit")]
pub struct AuditController;

#[routes]
impl AuditController {
    #[post("/")]
    #[middleware()]
    async fn record(&self) -> &'static str {
        "recorded"
    }
}

fn main() {}
