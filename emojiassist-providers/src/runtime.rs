use crate::request::{Body, HttpRequest};
use anyhow::{Context, anyhow};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::time::Duration;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }

    /// Turns a non-2xx response into an error that names the service and keeps the body.
    pub fn error_for_status(self, service: &str) -> anyhow::Result<Self> {
        if self.is_success() {
            return Ok(self);
        }
        Err(anyhow!(
            "{service} request failed: status={} body={}",
            self.status,
            String::from_utf8_lossy(&self.body).trim()
        ))
    }
}

pub async fn execute(req: &HttpRequest) -> anyhow::Result<HttpResponse> {
    // The transport timeouts are the only ones enforced anywhere in the request path.
    let client = reqwest::Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(REQUEST_TIMEOUT)
        .build()
        .context("build http client")?;

    let mut headers = HeaderMap::new();
    for (k, v) in &req.headers {
        let name = HeaderName::from_bytes(k.as_bytes())
            .with_context(|| format!("invalid header name: {k}"))?;
        let value =
            HeaderValue::from_str(v).with_context(|| format!("invalid header value for {k}"))?;
        headers.insert(name, value);
    }

    let builder = match req.method.as_str() {
        "GET" => client.get(&req.url),
        "POST" => client.post(&req.url),
        other => return Err(anyhow!("unsupported method: {other}")),
    }
    .headers(headers);

    let builder = match &req.body {
        Body::Empty => builder,
        Body::Json(s) => builder.body(s.clone()),
        Body::MultipartFormData { bytes, .. } => builder.body(bytes.clone()),
    };

    log::debug!("http {} {} ({} bytes)", req.method, req.url, req.body_len());

    let resp = builder.send().await.context("http request failed")?;
    let status = resp.status().as_u16();
    let body = resp
        .bytes()
        .await
        .context("failed reading response body")?
        .to_vec();

    Ok(HttpResponse { status, body })
}

/// True when the request never got an HTTP answer (DNS, connect, timeout).
pub fn is_transport_error(err: &anyhow::Error) -> bool {
    err.chain()
        .filter_map(|c| c.downcast_ref::<reqwest::Error>())
        .any(|e| e.is_connect() || e.is_timeout() || e.is_request())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_string, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn posts_json_with_headers() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/echo"))
            .and(header("authorization", "Bearer k"))
            .and(body_string(r#"{"text":"Cat"}"#))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .expect(1)
            .mount(&server)
            .await;

        let req = HttpRequest::post_json(format!("{}/echo", server.uri()), &json!({"text": "Cat"}))
            .with_header("Authorization", "Bearer k");
        let resp = execute(&req).await.unwrap();
        assert!(resp.is_success());
        assert_eq!(resp.body, b"ok");
    }

    #[test]
    fn error_for_status_names_service_and_body() {
        let resp = HttpResponse {
            status: 429,
            body: b"rate limited\n".to_vec(),
        };
        let err = resp.error_for_status("LLM").unwrap_err();
        assert_eq!(
            err.to_string(),
            "LLM request failed: status=429 body=rate limited"
        );
    }

    #[tokio::test]
    async fn refused_connection_is_a_transport_error() {
        // Port 9 (discard) is not listening on test hosts.
        let req = HttpRequest::post_json("http://127.0.0.1:9/x", &json!({}));
        let err = execute(&req).await.unwrap_err();
        assert!(is_transport_error(&err));

        let status_err = HttpResponse {
            status: 500,
            body: vec![],
        }
        .error_for_status("LLM")
        .unwrap_err();
        assert!(!is_transport_error(&status_err));
    }

    #[tokio::test]
    async fn rejects_unknown_method() {
        let req = HttpRequest {
            method: "PATCH".into(),
            url: "http://127.0.0.1:9".into(),
            headers: vec![],
            body: Body::Empty,
        };
        assert!(execute(&req).await.is_err());
    }
}
