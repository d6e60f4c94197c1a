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

mod default;
mod service_account;

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use bytes::Bytes;
use gcred_core::{Context, HttpSend, Result, StaticEnv};
use gcred_file_read_tokio::TokioFileRead;

pub fn test_key_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata/test_key.json")
}

pub fn create_test_context(http: MockHttpSend, envs: HashMap<String, String>) -> Context {
    let _ = env_logger::builder().is_test(true).try_init();

    Context::new()
        .with_file_read(TokioFileRead)
        .with_http_send(http)
        .with_env(StaticEnv { envs })
}

/// MockHttpSend stands in for the OAuth2 token endpoint.
#[derive(Debug, Clone)]
pub struct MockHttpSend {
    status: http::StatusCode,
    body: String,
    requests: Arc<Mutex<Vec<http::Request<Bytes>>>>,
}

impl MockHttpSend {
    pub fn token(access_token: &str) -> Self {
        Self::new(
            http::StatusCode::OK,
            format!(r#"{{"access_token":"{access_token}","expires_in":3599,"token_type":"Bearer"}}"#),
        )
    }

    pub fn new(status: http::StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            requests: Arc::default(),
        }
    }

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
