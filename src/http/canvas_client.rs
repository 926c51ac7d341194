use std::time::Duration;

use log::{debug, warn};
use reqwest::Client;
use reqwest::header::LINK;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::core::config::CanvasConfig;
use crate::error::CanvasError;
use crate::http::auth_middleware::BearerAuthMiddleware;
use crate::http::link_header::next_link;

const USER_AGENT: &str = concat!("canvas-extract/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

/// A successful fetch. Failures are `None` at the call site, never a partial value.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchResult {
    Single(Value),
    /// Every page's array, concatenated in server order.
    Pages(Vec<Value>),
}

impl FetchResult {
    pub fn into_value(self) -> Value {
        match self {
            FetchResult::Single(value) => value,
            FetchResult::Pages(items) => Value::Array(items),
        }
    }
}

pub struct CanvasClient {
    client: ClientWithMiddleware,
    base_url: String,
}

impl CanvasClient {
    /// Fails when the base URL or token is missing; those abort the run.
    pub fn new(config: &CanvasConfig) -> Result<Self, CanvasError> {
        let base_url = config.base_url()?;
        let auth = BearerAuthMiddleware::new(config.token()?)?;

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CanvasError::config(&format!("no se pudo crear el cliente HTTP: {}", e)))?;

        let client = ClientBuilder::new(client).with(auth).build();

        Ok(CanvasClient { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Calls `{base_url}{endpoint}`. With `paginated`, follows `Link: rel="next"`
    /// until exhausted. Any failure is logged and yields `None`; pages already
    /// collected are dropped.
    pub async fn request(
        &self,
        method: Method,
        endpoint: &str,
        payload: Option<&Value>,
        paginated: bool,
    ) -> Option<FetchResult> {
        let mut url = format!("{}{}", self.base_url, endpoint);
        let mut items = Vec::new();

        loop {
            let (value, next) = match self.send_once(method, &url, payload).await {
                Ok(page) => page,
                Err(err) => {
                    warn!("Error en la petición a {}: {}", url, err.message);
                    return None;
                }
            };

            if !paginated {
                return Some(FetchResult::Single(value));
            }

            match value {
                Value::Array(page) => items.extend(page),
                other => {
                    warn!(
                        "Respuesta paginada inesperada en {}: se esperaba un arreglo, llegó {}",
                        url,
                        json_kind(&other)
                    );
                    return None;
                }
            }

            match next {
                Some(next_url) => {
                    debug!("siguiente página: {}", next_url);
                    url = next_url;
                }
                None => return Some(FetchResult::Pages(items)),
            }
        }
    }

    /// Single GET decoded into `T`.
    pub async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Option<T> {
        let value = self.request(Method::Get, endpoint, None, false).await?.into_value();
        decode(endpoint, value)
    }

    /// Paginated GET decoded into `Vec<T>`.
    pub async fn get_all<T: DeserializeOwned>(&self, endpoint: &str) -> Option<Vec<T>> {
        let value = self.request(Method::Get, endpoint, None, true).await?.into_value();
        decode(endpoint, value)
    }

    async fn send_once(
        &self,
        method: Method,
        url: &str,
        payload: Option<&Value>,
    ) -> Result<(Value, Option<String>), CanvasError> {
        debug!("{:?} {}", method, url);

        let mut builder = match method {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
            Method::Put => self.client.put(url),
            Method::Delete => self.client.delete(url),
        };
        if method != Method::Delete {
            if let Some(payload) = payload {
                builder = builder.json(payload);
            }
        }

        let response = builder.send().await?;
        let status = response.status();
        let next = response
            .headers()
            .get(LINK)
            .and_then(|v| v.to_str().ok())
            .and_then(next_link);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CanvasError::request(&format!("({}): {}", status, body)));
        }

        let value: Value = response.json().await?;
        Ok((value, next))
    }
}

fn decode<T: DeserializeOwned>(endpoint: &str, value: Value) -> Option<T> {
    match serde_json::from_value(value) {
        Ok(decoded) => Some(decoded),
        Err(err) => {
            warn!("No se pudo interpretar la respuesta de {}: {}", endpoint, err);
            None
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "un booleano",
        Value::Number(_) => "un número",
        Value::String(_) => "un texto",
        Value::Array(_) => "un arreglo",
        Value::Object(_) => "un objeto",
    }
}
