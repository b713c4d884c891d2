//! Native [`HttpBackend`] over `reqwest`.

#[cfg(test)]
#[path = "backend_test.rs"]
mod backend_test;

use std::time::Duration;

use async_trait::async_trait;
use chatbot::ClientError;
use chatbot::transport::{HttpBackend, HttpRequest, HttpResponse, Method, RequestBody};
use chatbot::upload::UPLOAD_FIELD;

pub struct ReqwestBackend {
    client: reqwest::Client,
}

impl ReqwestBackend {
    /// # Errors
    ///
    /// Fails when the TLS backend cannot be initialized.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait(?Send)]
impl HttpBackend for ReqwestBackend {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ClientError> {
        let builder = self.client.request(reqwest_method(request.method), &request.url);
        let builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart(document) => {
                let part = reqwest::multipart::Part::bytes(document.bytes).file_name(document.file_name);
                builder.multipart(reqwest::multipart::Form::new().part(UPLOAD_FIELD, part))
            }
        };

        let response = builder.send().await.map_err(transport_error)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(transport_error)?;
        Ok(HttpResponse { status, body })
    }
}

fn reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Delete => reqwest::Method::DELETE,
    }
}

fn transport_error(error: reqwest::Error) -> ClientError {
    if error.is_timeout() {
        ClientError::Transport("request timed out".to_owned())
    } else {
        ClientError::transport(error)
    }
}
