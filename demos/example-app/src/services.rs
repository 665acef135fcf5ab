/// Builds greetings from the configured salutation.
#[derive(Clone, Debug)]
pub struct GreetingService {
    salutation: String,
}

impl GreetingService {
    pub fn new(salutation: impl Into<String>) -> Self {
        Self {
            salutation: salutation.into(),
        }
    }

    pub fn greet(&self, name: &str) -> String {
        format!("{}, {name}!", self.salutation)
    }
}
