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

use pretty_assertions::assert_eq;

use gcred_core::{ErrorKind, ProvideCredential, Result, SigningCredential};
use gcred_google::{CredentialLoader, DefaultCredentialProvider, DEFAULT_SCOPE};

use super::{create_test_context, test_key_path, MockHttpSend};

fn envs(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[tokio::test]
async fn test_default_provider_without_env() -> Result<()> {
    let http = MockHttpSend::token("ya29.default");
    let ctx = create_test_context(http.clone(), HashMap::new());

    let cred = DefaultCredentialProvider::new().provide_credential(&ctx).await?;
    assert!(cred.is_none());
    assert!(http.requests().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_default_provider_from_env() -> Result<()> {
    let key_path = test_key_path();
    let http = MockHttpSend::token("ya29.default");
    let ctx = create_test_context(
        http.clone(),
        envs(&[(
            "GOOGLE_APPLICATION_CREDENTIALS",
            key_path.to_str().unwrap(),
        )]),
    );

    let provider = DefaultCredentialProvider::new();
    let creds = provider
        .load_credentials(&ctx)
        .await?
        .expect("credentials must be loaded");
    assert_eq!(
        creds.cache_key(),
        format!("gcred-test@gcred-test.iam.gserviceaccount.com:{DEFAULT_SCOPE}")
    );

    let cred = provider
        .provide_credential(&ctx)
        .await?
        .expect("credential must be provided");
    assert!(cred.is_valid());
    assert_eq!(cred.token.access_token, "ya29.default");
    assert_eq!(http.requests().len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_default_provider_scope_from_env() -> Result<()> {
    let key_path = test_key_path();
    let ctx = create_test_context(
        MockHttpSend::token("ya29.default"),
        envs(&[
            ("GOOGLE_APPLICATION_CREDENTIALS", key_path.to_str().unwrap()),
            (
                "GOOGLE_SCOPE",
                "https://www.googleapis.com/auth/devstorage.read_only",
            ),
        ]),
    );

    let creds = DefaultCredentialProvider::new()
        .with_subject("admin@example.com")
        .load_credentials(&ctx)
        .await?
        .expect("credentials must be loaded");
    assert_eq!(
        creds.cache_key(),
        "gcred-test@gcred-test.iam.gserviceaccount.com:https://www.googleapis.com/auth/devstorage.read_only:admin@example.com"
    );
    Ok(())
}

#[tokio::test]
async fn test_default_provider_invalid_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("key.json");
    std::fs::write(&path, r#"{"client_email":"a@b.com"}"#).unwrap();

    let ctx = create_test_context(MockHttpSend::token("ya29.default"), HashMap::new());
    let err = DefaultCredentialProvider::new()
        .with_key_path(path.to_str().unwrap())
        .provide_credential(&ctx)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);

    let err = DefaultCredentialProvider::new()
        .with_key_path(dir.path().join("absent.json").to_str().unwrap())
        .provide_credential(&ctx)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
}
