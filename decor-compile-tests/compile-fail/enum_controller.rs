#![allow(dead_code)]

use decor::prelude::*;

#[derive(Controller)]
#[controller(path = "/test")]
pub enum MyController {
    Variant1,
    Variant2,
}

fn main() {}
