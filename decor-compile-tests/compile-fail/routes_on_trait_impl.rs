#![allow(dead_code)]

use decor::prelude::*;

pub struct Greeter;

pub trait Greet {
    fn greet(&self) -> &'static str;
}

#[routes]
impl Greet for Greeter {
    fn greet(&self) -> &'static str {
        "hi"
    }
}

fn main() {}
