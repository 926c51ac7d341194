use http::Extensions;
use reqwest::header::{AUTHORIZATION, HeaderValue};
use reqwest::{Request, Response};
use reqwest_middleware::{Middleware, Next, Result};

use crate::error::CanvasError;

/// Adds `Authorization: Bearer <token>` to every outgoing request.
pub struct BearerAuthMiddleware {
    header: HeaderValue,
}

impl BearerAuthMiddleware {
    pub fn new(token: &str) -> std::result::Result<Self, CanvasError> {
        let mut header = HeaderValue::from_str(&format!("Bearer {}", token.trim()))
            .map_err(|_| CanvasError::config("el token contiene caracteres no válidos"))?;
        header.set_sensitive(true);
        Ok(BearerAuthMiddleware { header })
    }
}

#[async_trait::async_trait]
impl Middleware for BearerAuthMiddleware {
    async fn handle(
        &self,
        mut req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> Result<Response> {
        req.headers_mut().insert(AUTHORIZATION, self.header.clone());
        next.run(req, extensions).await
    }
}
