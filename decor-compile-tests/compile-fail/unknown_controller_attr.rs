#![allow(dead_code)]

use decor::prelude::*;

#[derive(Controller)]
#[controller(path = "/test", state = AppState)]
pub struct MyController;

fn main() {}
