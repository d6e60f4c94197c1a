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
use test_case::test_case;

use gcred_core::{ErrorKind, ProvideCredential, Result, SigningCredential};
use gcred_google::{
    CredentialLoader, KeySource, Scope, ServiceAccountCredentials, ServiceAccountKey,
    TOKEN_CREDENTIAL_URI,
};

use super::{create_test_context, test_key_path, MockHttpSend};

fn load_test_key() -> ServiceAccountKey {
    ServiceAccountKey::from_file(test_key_path()).expect("test key must be valid")
}

#[test_case(Scope::from("scope1 scope2") ; "delimited scope")]
#[test_case(Scope::from(["scope1", "scope2"]) ; "list scope")]
#[test_case(Scope::from("https://www.googleapis.com/auth/cloud-platform") ; "single scope")]
fn test_valid_key_yields_cache_key(scope: Scope) {
    let creds = ServiceAccountCredentials::from_key(scope, load_test_key()).unwrap();

    let cache_key = creds.cache_key();
    assert!(!cache_key.is_empty());
    assert!(cache_key.starts_with("gcred-test@gcred-test.iam.gserviceaccount.com:"));
    assert_eq!(cache_key, creds.cache_key());
}

#[test]
fn test_cache_key_documented_example() {
    let key = ServiceAccountKey::from_slice(
        br#"{"client_email":"a@b.com","private_key":"PEMDATA"}"#,
    )
    .unwrap();
    let creds = ServiceAccountCredentials::from_key("scope1 scope2", key).unwrap();

    assert_eq!(creds.cache_key(), "a@b.com:scope1:scope2");
}

#[test_case(Some("admin@example.com") ; "with subject")]
#[test_case(Some("") ; "with empty subject")]
#[test_case(None ; "without subject")]
fn test_cache_key_subject_suffix(subject: Option<&str>) {
    let base = ServiceAccountCredentials::from_key("scope1", load_test_key()).unwrap();
    let creds = ServiceAccountCredentials::new(
        "scope1",
        load_test_key(),
        subject.map(|s| s.to_string()),
    )
    .unwrap();

    let expected = match subject {
        Some(sub) if !sub.is_empty() => format!("{}:{sub}", base.cache_key()),
        _ => base.cache_key(),
    };
    assert_eq!(creds.cache_key(), expected);
}

#[test_case(r#"{"private_key":"PEMDATA"}"#, "missing client_email field" ; "missing client_email")]
#[test_case(r#"{"client_email":null,"private_key":"PEMDATA"}"#, "missing client_email field" ; "null client_email")]
#[test_case(r#"{"client_email":"a@b.com"}"#, "missing private_key field" ; "missing private_key")]
#[test_case(r#"{"type":"service_account","client_email":"a@b.com","private_key":""}"#, "missing private_key field" ; "empty private_key")]
fn test_missing_required_field(content: &str, message: &str) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("key.json");
    std::fs::write(&path, content).unwrap();

    for source in [
        KeySource::Path(path),
        KeySource::Key(ServiceAccountKey::from_slice(content.as_bytes()).unwrap()),
    ] {
        let err = ServiceAccountCredentials::new("scope1", source, None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(err.message(), message);
    }
}

#[test]
fn test_key_path_matches_parsed_key() {
    let from_path = ServiceAccountCredentials::new(
        "scope1 scope2",
        test_key_path(),
        Some("admin@example.com".to_string()),
    )
    .unwrap();
    let from_key = ServiceAccountCredentials::new(
        "scope1 scope2",
        load_test_key(),
        Some("admin@example.com".to_string()),
    )
    .unwrap();

    assert_eq!(from_path.cache_key(), from_key.cache_key());
    assert_eq!(from_path.client_name(), from_key.client_name());
    assert_eq!(from_path.project_id(), from_key.project_id());
    assert_eq!(from_path.auth().sub(), from_key.auth().sub());
    assert_eq!(from_path.auth().audience(), TOKEN_CREDENTIAL_URI);
}

#[test]
fn test_unreadable_key_path() {
    let dir = tempfile::tempdir().unwrap();

    let err = ServiceAccountCredentials::new("scope1", dir.path().join("absent.json"), None)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);

    // A directory can't be read as a file either.
    let err = ServiceAccountCredentials::new("scope1", dir.path(), None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
}

#[test]
fn test_malformed_key_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("key.json");
    std::fs::write(&path, "client_email = a@b.com").unwrap();

    let err = ServiceAccountCredentials::from_key_file("scope1", &path).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Parse);
}

#[tokio::test]
async fn test_fetch_token() -> Result<()> {
    let http = MockHttpSend::token("ya29.integration");
    let ctx = create_test_context(http.clone(), HashMap::new());

    let creds = ServiceAccountCredentials::from_key_file("scope1", test_key_path())?;
    let token = creds.fetch_token(&ctx).await?;
    assert_eq!(token.access_token, "ya29.integration");
    assert!(token.is_valid());

    let cred = creds
        .provide_credential(&ctx)
        .await?
        .expect("credential must be provided");
    assert!(cred.is_valid());
    assert_eq!(cred.quota_project, None);

    let requests = http.requests();
    assert_eq!(requests.len(), 2);
    for req in requests {
        assert_eq!(req.uri(), TOKEN_CREDENTIAL_URI);
    }
    Ok(())
}

#[tokio::test]
async fn test_fetch_token_rejected() {
    let http = MockHttpSend::new(
        http::StatusCode::UNAUTHORIZED,
        r#"{"error":"unauthorized_client"}"#,
    );
    let ctx = create_test_context(http, HashMap::new());

    let creds = ServiceAccountCredentials::from_key_file("scope1", test_key_path()).unwrap();
    let err = creds.fetch_token(&ctx).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unexpected);
}
