use std::sync::RwLock;

use decor::prelude::*;

use crate::middleware::{require_json, served_by};
use crate::models::{CreateUserRequest, User};

#[derive(Controller)]
#[controller(path = "/users", middleware(served_by("users")))]
pub struct UserController {
    users: RwLock<Vec<User>>,
}

impl Default for UserController {
    fn default() -> Self {
        Self {
            users: RwLock::new(vec![
                User { id: 1, name: "John Doe".into() },
                User { id: 2, name: "Jane Smith".into() },
            ]),
        }
    }
}

impl UserController {
    fn snapshot(&self) -> Result<Vec<User>, HttpError> {
        self.users
            .read()
            .map(|users| users.clone())
            .map_err(|_| HttpError::Internal("user store poisoned".into()))
    }
}

#[routes]
impl UserController {
    #[get("/")]
    async fn get_users(&self) -> JsonResult<Vec<User>> {
        Ok(Json(self.snapshot()?))
    }

    #[get("/{id}")]
    async fn get_user(&self, req: Request) -> JsonResult<User> {
        let (mut parts, _body) = req.into_parts();
        let Path(id) = Path::<u64>::from_request_parts(&mut parts, &())
            .await
            .map_err(|e| HttpError::BadRequest(e.body_text()))?;

        self.snapshot()?
            .into_iter()
            .find(|u| u.id == id)
            .map(Json)
            .ok_or_else(|| HttpError::NotFound("User not found".into()))
    }

    #[post("/")]
    #[middleware(require_json())]
    async fn create_user(&self, req: Request) -> ApiResult<(StatusCode, Json<User>)> {
        let Json(body) = Json::<CreateUserRequest>::from_request(req, &())
            .await
            .map_err(|e| HttpError::BadRequest(e.body_text()))?;

        let mut users = self
            .users
            .write()
            .map_err(|_| HttpError::Internal("user store poisoned".into()))?;
        let user = User {
            id: users.len() as u64 + 1,
            name: body.name,
        };
        users.push(user.clone());
        Ok((StatusCode::CREATED, Json(user)))
    }
}
