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

use gcred_core::time::{now, DateTime};
use gcred_core::utils::Redact;
use gcred_core::SigningCredential;

/// Token represents an OAuth2 access token with expiration.
#[derive(Clone, Default)]
pub struct Token {
    /// The access token.
    pub access_token: String,
    /// The expiration time of the token.
    pub expires_at: Option<DateTime>,
}

impl Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("access_token", &Redact::from(&self.access_token))
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

impl SigningCredential for Token {
    fn is_valid(&self) -> bool {
        if self.access_token.is_empty() {
            return false;
        }

        match self.expires_at {
            Some(expires_at) => {
                // Consider token invalid if it expires within 2 minutes
                let buffer = chrono::TimeDelta::try_seconds(2 * 60).expect("in bounds");
                now() < expires_at - buffer
            }
            None => true,
        }
    }
}

/// Credential is what the service account loader hands to the request signer.
#[derive(Clone, Debug, Default)]
pub struct Credential {
    /// OAuth2 access token.
    pub token: Token,
    /// The project billed for quota, if the key names one.
    pub quota_project: Option<String>,
}

impl SigningCredential for Credential {
    fn is_valid(&self) -> bool {
        self.token.is_valid()
    }
}
