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

use std::fmt::{self, Debug};

use gcred_core::utils::Redact;
use gcred_core::{Error, Result};
use serde::Deserialize;

/// ServiceAccountKey is the JSON key file Google hands out for a service account.
///
/// Only `client_email` and `private_key` are required to build credentials, and they
/// are checked by [`ServiceAccountKey::validate`] instead of by the decoder. Every other
/// field is optional and unknown fields are ignored.
#[derive(Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "snake_case")]
pub struct ServiceAccountKey {
    /// The type of the credential file, `service_account` for keys issued by Google.
    #[serde(rename = "type")]
    pub key_type: Option<String>,
    /// The project the service account belongs to.
    pub project_id: Option<String>,
    /// The id of the private key.
    pub private_key_id: Option<String>,
    /// PEM encoded RSA private key.
    pub private_key: Option<String>,
    /// The email address of the service account.
    pub client_email: Option<String>,
    /// The numeric client id of the service account.
    pub client_id: Option<String>,
    /// The token endpoint recorded in the key file.
    pub token_uri: Option<String>,
    /// The project billed for quota, sent as `x-goog-user-project`.
    pub quota_project_id: Option<String>,
}

impl Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("type", &self.key_type)
            .field("project_id", &self.project_id)
            .field("private_key_id", &self.private_key_id)
            .field("private_key", &Redact::from(&self.private_key))
            .field("client_email", &self.client_email)
            .field("client_id", &self.client_id)
            .field("token_uri", &self.token_uri)
            .field("quota_project_id", &self.quota_project_id)
            .finish()
    }
}

impl ServiceAccountKey {
    /// Create a key from the two required fields.
    pub fn new(client_email: impl Into<String>, private_key: impl Into<String>) -> Self {
        Self {
            client_email: Some(client_email.into()),
            private_key: Some(private_key.into()),
            ..Default::default()
        }
    }

    /// Decode a key from JSON bytes.
    ///
    /// The content must be a JSON object; required fields are not checked here.
    pub fn from_slice(v: &[u8]) -> Result<Self> {
        serde_json::from_slice(v)
            .map_err(|e| Error::parse("failed to parse service account key").with_source(e))
    }

    /// Read and decode a key file.
    ///
    /// The file is read in one go and closed before decoding starts.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read(path).map_err(|e| {
            Error::io(format!(
                "failed to read service account key {}",
                path.display()
            ))
            .with_source(e)
        })?;
        Self::from_slice(&content)
    }

    /// Set the quota project.
    pub fn with_quota_project_id(mut self, quota_project_id: impl Into<String>) -> Self {
        self.quota_project_id = Some(quota_project_id.into());
        self
    }

    /// Check that both `client_email` and `private_key` are present and non-empty.
    ///
    /// Returns them as `(client_email, private_key)`.
    pub fn validate(&self) -> Result<(&str, &str)> {
        let client_email = non_empty(&self.client_email)
            .ok_or_else(|| Error::invalid_argument("missing client_email field"))?;
        let private_key = non_empty(&self.private_key)
            .ok_or_else(|| Error::invalid_argument("missing private_key field"))?;
        Ok((client_email, private_key))
    }
}

fn non_empty(v: &Option<String>) -> Option<&str> {
    v.as_deref().filter(|v| !v.is_empty())
}
