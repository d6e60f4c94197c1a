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

use log::debug;

use gcred_core::{Context, ProvideCredential, Result};

use crate::constants::{DEFAULT_SCOPE, GOOGLE_APPLICATION_CREDENTIALS, GOOGLE_SCOPE};
use crate::credential::Credential;
use crate::key::ServiceAccountKey;
use crate::scope::Scope;

use super::ServiceAccountCredentials;

/// DefaultCredentialProvider discovers a service account key the way Google
/// application default credentials do.
///
/// Resolution order:
///
/// - key path: [`with_key_path`](Self::with_key_path), then `GOOGLE_APPLICATION_CREDENTIALS`
/// - scope: [`with_scope`](Self::with_scope), then `GOOGLE_SCOPE`, then the cloud-platform scope
///
/// An empty value at any step is skipped, as if it were not set.
///
/// Files are read through the [`Context`], so a `FileRead` must be configured.
#[derive(Debug, Clone, Default)]
pub struct DefaultCredentialProvider {
    key_path: Option<String>,
    scope: Option<Scope>,
    subject: Option<String>,
}

impl DefaultCredentialProvider {
    /// Create a new DefaultCredentialProvider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the path of the service account key file.
    pub fn with_key_path(mut self, path: impl Into<String>) -> Self {
        self.key_path = Some(path.into());
        self
    }

    /// Set the OAuth2 scope.
    pub fn with_scope(mut self, scope: impl Into<Scope>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// Set the account to impersonate with domain-wide delegation.
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Resolve the service account credentials without fetching a token.
    ///
    /// Returns `Ok(None)` if no key path is configured.
    pub async fn load_credentials(
        &self,
        ctx: &Context,
    ) -> Result<Option<ServiceAccountCredentials>> {
        let Some(path) = self
            .key_path
            .clone()
            .filter(|v| !v.is_empty())
            .or_else(|| ctx.env_var(GOOGLE_APPLICATION_CREDENTIALS).filter(|v| !v.is_empty()))
        else {
            debug!("no service account key path configured, skipping");
            return Ok(None);
        };

        debug!("loading service account key from {path}");
        let content = ctx.file_read(&path).await?;
        let key = ServiceAccountKey::from_slice(&content)?;

        let scope = self
            .scope
            .clone()
            .filter(|s| !s.is_empty())
            .or_else(|| {
                ctx.env_var(GOOGLE_SCOPE)
                    .map(Scope::from)
                    .filter(|s| !s.is_empty())
            })
            .unwrap_or_else(|| Scope::from(DEFAULT_SCOPE));

        ServiceAccountCredentials::new(scope, key, self.subject.clone()).map(Some)
    }
}

#[async_trait::async_trait]
impl ProvideCredential for DefaultCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        match self.load_credentials(ctx).await? {
            Some(creds) => creds.provide_credential(ctx).await,
            None => Ok(None),
        }
    }
}
