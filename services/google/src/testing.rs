// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::sync::{Arc, Mutex};

use bytes::Bytes;
use gcred_core::{HttpSend, Result};

pub const TEST_KEY_JSON: &str = include_str!("../testdata/test_key.json");
pub const TEST_PUBLIC_KEY_PEM: &str = include_str!("../testdata/test_key.pub.pem");
pub const TEST_PKCS1_PEM: &str = include_str!("../testdata/test_key_pkcs1.pem");

/// MockHttpSend answers every request with the same response and records the requests.
#[derive(Debug, Clone)]
pub struct MockHttpSend {
    status: http::StatusCode,
    body: String,
    requests: Arc<Mutex<Vec<http::Request<Bytes>>>>,
}

impl MockHttpSend {
    pub fn new(status: http::StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            requests: Arc::default(),
        }
    }

    /// Take all recorded requests.
    pub fn requests(&self) -> Vec<http::Request<Bytes>> {
        std::mem::take(&mut *self.requests.lock().unwrap())
    }
}

#[async_trait::async_trait]
impl HttpSend for MockHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        self.requests.lock().unwrap().push(req);

        Ok(http::Response::builder()
            .status(self.status)
            .body(Bytes::from(self.body.clone()))?)
    }
}
