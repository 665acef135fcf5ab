use decor::prelude::*;

use crate::services::GreetingService;

/// Has no `Default`: it is only ever resolved from the container.
#[derive(Controller)]
#[controller(path = "/greeting")]
pub struct GreetingController {
    service: GreetingService,
}

impl GreetingController {
    pub fn new(service: GreetingService) -> Self {
        Self { service }
    }
}

#[routes]
impl GreetingController {
    #[get]
    fn greet_world(&self) -> String {
        self.service.greet("World")
    }

    #[get("/{name}")]
    async fn greet(&self, req: Request) -> ApiResult<String> {
        let (mut parts, _body) = req.into_parts();
        let Path(name) = Path::<String>::from_request_parts(&mut parts, &())
            .await
            .map_err(|e| HttpError::BadRequest(e.body_text()))?;
        Ok(self.service.greet(&name))
    }
}
