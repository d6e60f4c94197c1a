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

use std::time::Duration;

use http::header::AUTHORIZATION;
use http::HeaderValue;
use log::debug;

use gcred_core::{Context, Error, Result, SignRequest, SigningCredential};

use crate::constants::X_GOOG_USER_PROJECT;
use crate::credential::Credential;

/// RequestSigner authorizes requests with the bearer token of a [`Credential`].
///
/// When the credential names a quota project it's also sent as `x-goog-user-project`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RequestSigner;

#[async_trait::async_trait]
impl SignRequest for RequestSigner {
    type Credential = Credential;

    async fn sign_request(
        &self,
        _ctx: &Context,
        req: &mut http::request::Parts,
        credential: Option<&Self::Credential>,
        expires_in: Option<Duration>,
    ) -> Result<()> {
        if expires_in.is_some() {
            return Err(Error::invalid_argument(
                "bearer token authorization doesn't support expiring requests",
            ));
        }

        let Some(cred) = credential.filter(|c| c.is_valid()) else {
            return Err(Error::credential_invalid("no valid token available"));
        };

        let mut value: HeaderValue = format!("Bearer {}", cred.token.access_token).parse()?;
        value.set_sensitive(true);
        req.headers.insert(AUTHORIZATION, value);

        if let Some(project) = &cred.quota_project {
            debug!("billing request to quota project {project}");
            req.headers.insert(X_GOOG_USER_PROJECT, project.parse()?);
        }

        Ok(())
    }
}
