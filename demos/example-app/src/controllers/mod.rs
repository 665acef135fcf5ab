pub mod greeting_controller;
pub mod user_controller;
