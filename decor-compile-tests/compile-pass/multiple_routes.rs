use decor::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Item {
    pub id: u64,
    pub name: String,
}

#[derive(Controller, Default)]
#[controller(path = "/items")]
pub struct ItemController;

#[routes]
impl ItemController {
    #[get]
    async fn list(&self) -> Json<Vec<Item>> {
        Json(vec![])
    }

    #[get("/{id}")]
    async fn get_by_id(&self, req: Request) -> ApiResult<Json<Item>> {
        let (mut parts, _body) = req.into_parts();
        let Path(id) = Path::<u64>::from_request_parts(&mut parts, &())
            .await
            .map_err(|e| HttpError::BadRequest(e.body_text()))?;
        Ok(Json(Item { id, name: "test".into() }))
    }

    #[post]
    #[put("/{id}")]
    async fn save(&self, req: Request) -> ApiResult<Json<Item>> {
        let Json(item) = Json::<Item>::from_request(req, &())
            .await
            .map_err(|e| HttpError::BadRequest(e.body_text()))?;
        Ok(Json(item))
    }

    #[delete("/{id}")]
    fn delete(&self) -> StatusCode {
        StatusCode::NO_CONTENT
    }

    #[head]
    #[options]
    async fn probe(&self) -> StatusCode {
        StatusCode::OK
    }
}

fn main() {}
