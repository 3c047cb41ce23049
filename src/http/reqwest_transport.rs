//! reqwest-backed [`Transport`].

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};

use super::{ApiRequest, ApiResponse, Method, MultipartPart, RequestBody, Transport};
use crate::{
    config::ClientConfig,
    errors::{ApiError, ApiResult},
};

/// Production transport issuing real HTTP requests against the configured API root
#[derive(Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    config: ClientConfig,
}

impl ReqwestTransport {
    pub fn new(config: ClientConfig) -> ApiResult<Self> {
        config.validate()?;

        let builder = reqwest::Client::builder().user_agent(config.user_agent());
        #[cfg(not(target_family = "wasm"))]
        let builder = builder.timeout(config.timeout());
        let client = builder.build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

fn to_reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Patch => reqwest::Method::PATCH,
        Method::Delete => reqwest::Method::DELETE,
    }
}

fn to_form(parts: Vec<MultipartPart>) -> ApiResult<Form> {
    let mut form = Form::new();
    for part in parts {
        form = match part {
            MultipartPart::Text { name, value } => form.text(name, value),
            MultipartPart::File {
                name,
                filename,
                content_type,
                bytes,
            } => {
                let file = Part::bytes(bytes)
                    .file_name(filename)
                    .mime_str(&content_type)
                    .map_err(|e| ApiError::Transport(format!("Invalid content type: {e}")))?;
                form.part(name, file)
            }
        };
    }
    Ok(form)
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> ApiResult<ApiResponse> {
        let url = self.config.url_for(&request.target());
        let mut builder = self.client.request(to_reqwest_method(request.method), url);

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart(parts) => builder.multipart(to_form(parts)?),
        };

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();

        Ok(ApiResponse { status, body })
    }
}
