//! Attribute extraction utilities.
//!
//! - `route`: HTTP route attributes (`#[get]`, `#[post]`, ...) and
//!   `#[middleware(..)]`

pub mod route;

pub use route::*;
