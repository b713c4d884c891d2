//! Browser [`HttpBackend`] over `fetch`.
//!
//! Client-side (csr): real HTTP via `gloo-net`; documents go out as
//! `FormData` so the browser sets the multipart boundary.
//! Native builds (tests, `cargo check` without the feature): every request
//! fails with a transport error.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "backend_test.rs"]
mod backend_test;

use async_trait::async_trait;
use chatbot::ClientError;
use chatbot::transport::{HttpBackend, HttpRequest, HttpResponse};

/// MIME type sent with an uploaded document.
pub fn document_mime(file_name: &str) -> &'static str {
    let extension = file_name.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase());
    match extension.as_deref() {
        Some("pdf") => "application/pdf",
        Some("docx") => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        Some("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserBackend;

impl BrowserBackend {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait(?Send)]
impl HttpBackend for BrowserBackend {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ClientError> {
        #[cfg(feature = "csr")]
        {
            use chatbot::transport::{Method, RequestBody};
            use gloo_net::http::Request;

            let builder = match request.method {
                Method::Get => Request::get(&request.url),
                Method::Post => Request::post(&request.url),
                Method::Delete => Request::delete(&request.url),
            };
            let prepared = match request.body {
                RequestBody::Empty => builder.build(),
                RequestBody::Json(value) => builder.json(&value),
                RequestBody::Multipart(document) => {
                    let form = multipart_form(&document.file_name, &document.bytes)?;
                    builder.body(form)
                }
            }
            .map_err(ClientError::transport)?;

            let response = prepared.send().await.map_err(ClientError::transport)?;
            let status = response.status();
            let body = response.text().await.map_err(ClientError::transport)?;
            Ok(HttpResponse { status, body })
        }
        #[cfg(not(feature = "csr"))]
        {
            Err(ClientError::Transport(format!("{} {} requires a browser", request.method.as_str(), request.url)))
        }
    }
}

#[cfg(feature = "csr")]
fn multipart_form(file_name: &str, bytes: &[u8]) -> Result<web_sys::FormData, ClientError> {
    let js_error = |e: wasm_bindgen::JsValue| ClientError::Transport(format!("{e:?}"));
    let array = js_sys::Uint8Array::from(bytes);
    let parts = js_sys::Array::of1(&array);
    let options = web_sys::BlobPropertyBag::new();
    options.set_type(document_mime(file_name));
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options).map_err(js_error)?;
    let form = web_sys::FormData::new().map_err(js_error)?;
    form.append_with_blob_and_filename(chatbot::upload::UPLOAD_FIELD, &blob, file_name)
        .map_err(js_error)?;
    Ok(form)
}
