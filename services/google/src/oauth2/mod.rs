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

//! OAuth2 JWT-bearer token fetcher.
//!
//! [`OAuth2`] is configured once with an [`OAuth2Config`] and exchanges a signed JWT
//! assertion for an access token every time [`OAuth2::fetch_token`] is called. It keeps
//! no token state of its own; caching is left to the caller.

mod helpers;
mod types;

use std::fmt::{self, Debug};

use jsonwebtoken::{Algorithm, EncodingKey, Header};
use log::debug;

use gcred_core::{time::now, utils::Redact, Context, Error, Result};

use crate::constants::{JWT_BEARER_GRANT_TYPE, JWT_LIFETIME_SECS};
use crate::credential::Token;
use crate::scope::Scope;
use helpers::{oauth2_post_form, token_from_response};
use types::{Claims, TokenResponse};

/// Configuration of an [`OAuth2`] token fetcher.
#[derive(Clone)]
pub struct OAuth2Config {
    /// The `aud` claim, defaults to `token_credential_uri` when absent.
    pub audience: Option<String>,
    /// The `iss` claim, the service account email.
    pub issuer: String,
    /// Requested scopes.
    pub scope: Option<Scope>,
    /// Algorithm used to sign the assertion.
    pub signing_algorithm: Algorithm,
    /// PEM encoded private key used to sign the assertion.
    pub signing_key: String,
    /// The `sub` claim, the account to impersonate.
    pub sub: Option<String>,
    /// Endpoint the assertion is posted to.
    pub token_credential_uri: String,
}

impl Debug for OAuth2Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuth2Config")
            .field("audience", &self.audience)
            .field("issuer", &self.issuer)
            .field("scope", &self.scope)
            .field("signing_algorithm", &self.signing_algorithm)
            .field("signing_key", &Redact::from(&self.signing_key))
            .field("sub", &self.sub)
            .field("token_credential_uri", &self.token_credential_uri)
            .finish()
    }
}

/// OAuth2 token fetcher using the JWT-bearer grant.
#[derive(Clone, Debug)]
pub struct OAuth2 {
    config: OAuth2Config,
}

impl OAuth2 {
    /// Create a new fetcher. The signing key is not parsed until a token is fetched.
    pub fn new(config: OAuth2Config) -> Self {
        Self { config }
    }

    /// The issuer of the JWT assertion.
    pub fn issuer(&self) -> &str {
        &self.config.issuer
    }

    /// The subject to impersonate, if any.
    pub fn sub(&self) -> Option<&str> {
        self.config.sub.as_deref()
    }

    /// The requested scopes, if any.
    pub fn scope(&self) -> Option<&Scope> {
        self.config.scope.as_ref()
    }

    pub(crate) fn signing_key(&self) -> &str {
        &self.config.signing_key
    }

    /// The audience of the JWT assertion.
    pub fn audience(&self) -> &str {
        self.config
            .audience
            .as_deref()
            .unwrap_or(&self.config.token_credential_uri)
    }

    /// Key identifying which tokens this fetcher produces.
    ///
    /// Scopes joined by `:` when any scope is set, otherwise the audience.
    pub fn cache_key(&self) -> Option<String> {
        if let Some(scope) = self.config.scope.as_ref().filter(|s| !s.is_empty()) {
            return Some(scope.scopes().join(":"));
        }

        self.config.audience.clone().filter(|v| !v.is_empty())
    }

    /// Build the signed JWT assertion.
    pub fn to_jwt_assertion(&self) -> Result<String> {
        let iat = now().timestamp() as u64;
        let claims = Claims {
            iss: self.config.issuer.clone(),
            scope: self
                .config
                .scope
                .as_ref()
                .filter(|s| !s.is_empty())
                .map(|s| s.to_space_delimited()),
            aud: self.audience().to_string(),
            exp: iat + JWT_LIFETIME_SECS,
            iat,
            sub: self.config.sub.clone(),
        };

        let key = EncodingKey::from_rsa_pem(self.config.signing_key.as_bytes()).map_err(|e| {
            Error::credential_invalid("failed to parse RSA private key").with_source(e)
        })?;

        jsonwebtoken::encode(&Header::new(self.config.signing_algorithm), &claims, &key)
            .map_err(|e| Error::credential_invalid("failed to encode JWT").with_source(e))
    }

    /// Exchange a fresh JWT assertion for an access token.
    pub async fn fetch_token(&self, ctx: &Context) -> Result<Token> {
        debug!(
            "fetching token for {} from {}",
            self.config.issuer, self.config.token_credential_uri
        );

        let assertion = self.to_jwt_assertion()?;
        let resp: TokenResponse = oauth2_post_form(
            ctx,
            &self.config.token_credential_uri,
            &[
                ("grant_type", JWT_BEARER_GRANT_TYPE),
                ("assertion", &assertion),
            ],
        )
        .await?;

        token_from_response(resp)
    }
}
