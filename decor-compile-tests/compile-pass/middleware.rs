use decor::prelude::*;

fn tag(value: &'static str) -> MiddlewareHandler {
    MiddlewareHandler::from_fn(move |req: Request, next: Next| async move {
        let mut resp = next.run(req).await;
        resp.headers_mut()
            .insert("x-tag", HeaderValue::from_static(value));
        resp
    })
}

#[derive(Controller, Default)]
#[controller(path = "/guarded", middleware(tag("class"), vec![tag("a"), tag("b")]))]
pub struct GuardedController;

#[routes]
impl GuardedController {
    #[get]
    #[middleware(tag("method"))]
    #[middleware([tag("x"), tag("y")])]
    async fn index(&self) -> &'static str {
        "ok"
    }

    #[middleware(tag("orphan"))]
    fn helper(&self) {}
}

fn main() {}
