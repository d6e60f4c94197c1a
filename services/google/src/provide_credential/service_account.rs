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

use std::path::{Path, PathBuf};

use jsonwebtoken::Algorithm;
use log::debug;
use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::pkcs1v15::SigningKey;
use rsa::pkcs8::DecodePrivateKey;
use rsa::signature::{RandomizedSigner, SignatureEncoding};
use rsa::RsaPrivateKey;
use sha2::Sha256;

use gcred_core::hash::base64_encode;
use gcred_core::{Context, Error, ProvideCredential, Result};

use crate::constants::TOKEN_CREDENTIAL_URI;
use crate::credential::{Credential, Token};
use crate::credential_loader::CredentialLoader;
use crate::key::ServiceAccountKey;
use crate::oauth2::{OAuth2, OAuth2Config};
use crate::scope::Scope;

/// Where the service account key comes from.
#[derive(Debug, Clone)]
pub enum KeySource {
    /// An already decoded key.
    Key(ServiceAccountKey),
    /// Path to a JSON key file.
    Path(PathBuf),
}

impl From<ServiceAccountKey> for KeySource {
    fn from(key: ServiceAccountKey) -> Self {
        KeySource::Key(key)
    }
}

impl From<PathBuf> for KeySource {
    fn from(path: PathBuf) -> Self {
        KeySource::Path(path)
    }
}

impl From<&Path> for KeySource {
    fn from(path: &Path) -> Self {
        KeySource::Path(path.to_path_buf())
    }
}

/// ServiceAccountCredentials authorizes as a service account with its JSON key.
///
/// The key is validated once at construction: both `client_email` and `private_key`
/// must be present and non-empty, otherwise construction fails with
/// [`ErrorKind::InvalidArgument`](gcred_core::ErrorKind::InvalidArgument). Nothing is
/// sent over the network until a token is fetched.
#[derive(Debug, Clone)]
pub struct ServiceAccountCredentials {
    auth: OAuth2,
    project_id: Option<String>,
    quota_project: Option<String>,
}

impl ServiceAccountCredentials {
    /// Create credentials from a scope, a key source and an optional subject to
    /// impersonate with domain-wide delegation.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::Io`](gcred_core::ErrorKind::Io) if the key file can't be read.
    /// - [`ErrorKind::Parse`](gcred_core::ErrorKind::Parse) if the key file isn't a JSON object.
    /// - [`ErrorKind::InvalidArgument`](gcred_core::ErrorKind::InvalidArgument) if
    ///   `client_email` or `private_key` is missing.
    pub fn new(
        scope: impl Into<Scope>,
        key: impl Into<KeySource>,
        subject: Option<String>,
    ) -> Result<Self> {
        let key = match key.into() {
            KeySource::Key(key) => key,
            KeySource::Path(path) => {
                debug!("loading service account key from {}", path.display());
                ServiceAccountKey::from_file(&path)?
            }
        };
        let (client_email, private_key) = key.validate()?;

        let auth = OAuth2::new(OAuth2Config {
            audience: Some(TOKEN_CREDENTIAL_URI.to_string()),
            issuer: client_email.to_string(),
            scope: Some(scope.into()),
            signing_algorithm: Algorithm::RS256,
            signing_key: private_key.to_string(),
            sub: subject.filter(|s| !s.is_empty()),
            token_credential_uri: TOKEN_CREDENTIAL_URI.to_string(),
        });

        Ok(Self {
            auth,
            project_id: key.project_id.clone(),
            quota_project: key.quota_project_id.clone(),
        })
    }

    /// Create credentials from a decoded key.
    pub fn from_key(scope: impl Into<Scope>, key: ServiceAccountKey) -> Result<Self> {
        Self::new(scope, key, None)
    }

    /// Create credentials from a JSON key file.
    pub fn from_key_file(scope: impl Into<Scope>, path: impl AsRef<Path>) -> Result<Self> {
        Self::new(scope, path.as_ref(), None)
    }

    /// The configured token fetcher.
    pub fn auth(&self) -> &OAuth2 {
        &self.auth
    }

    /// The service account email.
    pub fn client_name(&self) -> &str {
        self.auth.issuer()
    }

    /// The project the service account belongs to.
    pub fn project_id(&self) -> Option<&str> {
        self.project_id.as_deref()
    }

    /// The project billed for quota.
    pub fn quota_project(&self) -> Option<&str> {
        self.quota_project.as_deref()
    }

    /// Sign `data` with the service account private key.
    ///
    /// Returns the base64 encoded RSASSA-PKCS1-v1_5 SHA-256 signature.
    pub fn sign_blob(&self, data: &[u8]) -> Result<String> {
        let pem = self.auth.signing_key();
        let private_key = match RsaPrivateKey::from_pkcs8_pem(pem) {
            Ok(key) => key,
            Err(_) => RsaPrivateKey::from_pkcs1_pem(pem).map_err(|e| {
                Error::credential_invalid("failed to parse private key").with_source(e)
            })?,
        };

        let signing_key = SigningKey::<Sha256>::new(private_key);
        let signature = signing_key.sign_with_rng(&mut rand::thread_rng(), data);
        Ok(base64_encode(&signature.to_bytes()))
    }
}

#[async_trait::async_trait]
impl CredentialLoader for ServiceAccountCredentials {
    fn cache_key(&self) -> String {
        let mut key = format!(
            "{}:{}",
            self.auth.issuer(),
            self.auth.cache_key().unwrap_or_default()
        );
        if let Some(sub) = self.auth.sub() {
            key.push(':');
            key.push_str(sub);
        }
        key
    }

    async fn fetch_token(&self, ctx: &Context) -> Result<Token> {
        self.auth.fetch_token(ctx).await
    }
}

#[async_trait::async_trait]
impl ProvideCredential for ServiceAccountCredentials {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let token = self.fetch_token(ctx).await?;

        Ok(Some(Credential {
            token,
            quota_project: self.quota_project.clone(),
        }))
    }
}
