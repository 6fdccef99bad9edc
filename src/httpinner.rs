// File: httpinner.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

use crate::config::ProbeOptions;
use crate::errors::TransportError;
use log::debug;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::redirect::Policy;

#[derive(Debug, Clone)]
pub struct HttpResponse {
    status: u16,
    headers: HeaderMap,
    body: String,
    url: String,
}

impl HttpResponse {
    pub fn new_with_all(status: u16, headers: HeaderMap, body: String, url: String) -> Self {
        HttpResponse {
            status,
            headers,
            body,
            url,
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Final URL after redirects.
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Performs a single GET. Implementations must not retry.
#[allow(async_fn_in_trait)]
pub trait HttpClient {
    async fn get(&self, url: &str, options: &ProbeOptions)
        -> Result<HttpResponse, TransportError>;

    /// Whether requests can be issued at all.
    fn ensure_available(&self) -> Result<(), TransportError> {
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReqwestClient;

impl ReqwestClient {
    pub fn new() -> Self {
        ReqwestClient
    }

    fn build_client(options: &ProbeOptions) -> Result<reqwest::Client, TransportError> {
        let redirect = match options.redirect_limit() {
            0 => Policy::none(),
            n => Policy::limited(n),
        };

        reqwest::Client::builder()
            .timeout(options.timeout_duration())
            .danger_accept_invalid_certs(!options.tls_verify())
            .redirect(redirect)
            .gzip(options.decompress())
            .brotli(options.decompress())
            .deflate(options.decompress())
            .build()
            .map_err(|e| TransportError::Client(e.to_string()))
    }

    fn request_headers(options: &ProbeOptions) -> Result<HeaderMap, TransportError> {
        let mut headers = HeaderMap::new();
        for (name, value) in options.extra_headers() {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| TransportError::InvalidHeader(name.clone()))?;
            let header_value = HeaderValue::from_str(value)
                .map_err(|_| TransportError::InvalidHeader(format!("{}: {}", name, value)))?;
            headers.insert(header_name, header_value);
        }
        Ok(headers)
    }
}

impl HttpClient for ReqwestClient {
    async fn get(
        &self,
        url: &str,
        options: &ProbeOptions,
    ) -> Result<HttpResponse, TransportError> {
        let client = Self::build_client(options)?;
        let headers = Self::request_headers(options)?;

        debug!("GET {} ({} extra headers)", url, headers.len());
        let response = client.get(url).headers(headers).send().await?;

        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        let headers = response.headers().clone();
        let body = response.text().await?;

        Ok(HttpResponse::new_with_all(status, headers, body, final_url))
    }

    fn ensure_available(&self) -> Result<(), TransportError> {
        Self::build_client(&ProbeOptions::new()).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_headers_from_options() {
        let options = ProbeOptions::new()
            .with_extra_header("Cache-Control", "no-cache")
            .with_extra_header("Cookie", "wordpress_logged_in=1");

        let headers = ReqwestClient::request_headers(&options).unwrap();
        assert_eq!(headers.get("cache-control").unwrap(), "no-cache");
        assert_eq!(headers.get("cookie").unwrap(), "wordpress_logged_in=1");
    }

    #[test]
    fn test_invalid_header_name_rejected() {
        let options = ProbeOptions::new().with_extra_header("bad header", "x");

        let err = ReqwestClient::request_headers(&options).unwrap_err();
        assert_eq!(err, TransportError::InvalidHeader("bad header".to_string()));
    }

    #[test]
    fn test_invalid_header_value_rejected() {
        let options = ProbeOptions::new().with_extra_header("X-Test", "line\nbreak");

        let err = ReqwestClient::request_headers(&options).unwrap_err();
        assert!(matches!(err, TransportError::InvalidHeader(_)));
    }

    #[test]
    fn test_build_client_with_defaults() {
        assert!(ReqwestClient::build_client(&ProbeOptions::new()).is_ok());
    }

    #[test]
    fn test_build_client_without_redirects() {
        let mut options = ProbeOptions::new();
        options.set_redirect_limit(0);
        options.set_tls_verify(true);
        options.set_decompress(false);
        assert!(ReqwestClient::build_client(&options).is_ok());
    }
}
