// File: common/mod.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

#![allow(dead_code)]

use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const PING_PATH: &str = "/wp-json/wpci/v1/ping";

pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

pub fn ping_url(server: &MockServer) -> String {
    format!("{}{}", server.uri(), PING_PATH)
}

pub fn create_mock_response(status: u16, headers: &[(&str, &str)]) -> ResponseTemplate {
    let mut response = ResponseTemplate::new(status).set_body_string("<html><body>home</body></html>");
    for (key, value) in headers {
        response = response.append_header(*key, *value);
    }
    response
}

/// A ping endpoint that behaves correctly: never cacheable.
pub async fn mount_ping(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(PING_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .append_header("cache-control", "no-store, no-cache, must-revalidate, max-age=0")
                .append_header("pragma", "no-cache")
                .append_header("expires", "0")
                .set_body_json(json!({ "now": 1735689600.123, "rand": "k3J9xQ2mZ8pL4vB7nR1t" })),
        )
        .mount(server)
        .await;
}

/// Home page served as MISS on the first request with marker 1, HIT after.
pub async fn mount_cached_home(server: &MockServer, miss: &[(&str, &str)], hit: &[(&str, &str)]) {
    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("wpci_probe", "1"))
        .respond_with(create_mock_response(200, miss))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("wpci_probe", "1"))
        .respond_with(create_mock_response(200, hit))
        .with_priority(2)
        .mount(server)
        .await;
}

pub async fn mount_no_cache_home(server: &MockServer, headers: &[(&str, &str)]) {
    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("wpci_probe", "2"))
        .and(header("cache-control", "no-cache"))
        .respond_with(create_mock_response(200, headers))
        .mount(server)
        .await;
}
