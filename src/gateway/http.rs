use crate::config::ConsoleConfig;
use crate::error::GatewayError;
use crate::gateway::traits::RemoteGateway;
use crate::gateway::types::{ApiPath, Envelope, FormPayload, Method, RequestBody, Scope};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// reqwest-backed gateway talking to the provider backend
pub struct HttpGateway {
    client: Client,
    shopkeeper_base: String,
    auth_base: String,
}

impl HttpGateway {
    /// Create a gateway from the console configuration
    pub fn new(config: &ConsoleConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            shopkeeper_base: config.shopkeeper_base_url.clone(),
            auth_base: config.auth_base_url.clone(),
        })
    }

    fn url(&self, path: &ApiPath) -> String {
        let base = match path.scope {
            Scope::Auth => &self.auth_base,
            Scope::Shopkeeper => &self.shopkeeper_base,
        };
        join_url(base, &path.path)
    }

    fn multipart(form: FormPayload) -> Result<Form, GatewayError> {
        let mut multipart = Form::new();
        for (name, value) in form.fields {
            multipart = multipart.text(name, value);
        }
        for file in form.files {
            let part = Part::bytes(file.upload.bytes)
                .file_name(file.upload.file_name)
                .mime_str(&file.upload.mime)?;
            multipart = multipart.part(file.field, part);
        }
        Ok(multipart)
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[async_trait]
impl RemoteGateway for HttpGateway {
    async fn request(
        &self,
        method: Method,
        path: &ApiPath,
        body: RequestBody,
    ) -> Result<Envelope, GatewayError> {
        let url = self.url(path);
        debug!("Sending {} {}", method, url);

        let builder = match method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Delete => self.client.delete(&url),
        };
        let builder = match body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Form(form) => builder.multipart(Self::multipart(form)?),
        };

        let response = builder.send().await.map_err(|e| {
            warn!("{} {} failed: {}", method, url, e);
            GatewayError::from(e)
        })?;

        let status = response.status().as_u16();
        let text = response.text().await?;
        debug!("{} {} -> {} ({} bytes)", method, url, status, text.len());

        // Error pages are often not JSON; keep them as a string so the status
        // check still sees the real code.
        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or(Value::String(text))
        };

        Ok(Envelope::new(status, body))
    }

    fn backend_name(&self) -> &'static str {
        "http"
    }
}
