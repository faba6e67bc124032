pub mod cache;
pub mod error;
pub mod models;
pub mod page;
pub mod routes;
pub mod stitch_pipeline;

use worker::{Context, Env, Request, Response, Result, event};

#[event(fetch)]
async fn fetch(req: Request, env: Env, ctx: Context) -> Result<Response> {
    routes::handle(req, env, ctx).await
}
