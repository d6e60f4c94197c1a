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

use std::collections::HashMap;

use http::header::AUTHORIZATION;
use pretty_assertions::assert_eq;

use gcred_core::{ErrorKind, Result, Signer};
use gcred_google::{RequestSigner, ServiceAccountCredentials, ServiceAccountKey};

use crate::credential_providers::{create_test_context, test_key_path, MockHttpSend};

fn request_parts() -> http::request::Parts {
    http::Request::get("https://storage.googleapis.com/storage/v1/b/test-bucket/o")
        .body(())
        .unwrap()
        .into_parts()
        .0
}

#[tokio::test]
async fn test_sign_with_service_account() -> Result<()> {
    let http = MockHttpSend::token("ya29.signed");
    let ctx = create_test_context(http.clone(), HashMap::new());

    let creds = ServiceAccountCredentials::from_key_file(
        "https://www.googleapis.com/auth/devstorage.read_only",
        test_key_path(),
    )?;
    let signer = Signer::new(ctx, creds, RequestSigner);

    let mut parts = request_parts();
    signer.sign(&mut parts, None).await?;
    assert_eq!(parts.headers[AUTHORIZATION], "Bearer ya29.signed");
    assert!(!parts.headers.contains_key("x-goog-user-project"));

    // The token is still valid, no second exchange happens.
    let mut parts = request_parts();
    signer.sign(&mut parts, None).await?;
    assert_eq!(parts.headers[AUTHORIZATION], "Bearer ya29.signed");
    assert_eq!(http.requests().len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_sign_with_quota_project() -> Result<()> {
    let ctx = create_test_context(MockHttpSend::token("ya29.signed"), HashMap::new());

    let key = ServiceAccountKey::from_file(test_key_path())?.with_quota_project_id("billing");
    let creds = ServiceAccountCredentials::from_key("scope1", key)?;
    let signer = Signer::new(ctx, creds, RequestSigner);

    let mut parts = request_parts();
    signer.sign(&mut parts, None).await?;
    assert_eq!(parts.headers["x-goog-user-project"], "billing");
    Ok(())
}

#[tokio::test]
async fn test_sign_with_rejected_token_exchange() {
    let ctx = create_test_context(
        MockHttpSend::new(http::StatusCode::BAD_REQUEST, r#"{"error":"invalid_grant"}"#),
        HashMap::new(),
    );

    let creds = ServiceAccountCredentials::from_key_file("scope1", test_key_path()).unwrap();
    let signer = Signer::new(ctx, creds, RequestSigner);

    let mut parts = request_parts();
    let err = signer.sign(&mut parts, None).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unexpected);
    assert!(!parts.headers.contains_key(AUTHORIZATION));
}
