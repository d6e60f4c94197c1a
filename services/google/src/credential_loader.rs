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

use std::fmt::Debug;

use gcred_core::{Context, Result};

use crate::credential::Token;

/// CredentialLoader is the capability shared by every credential that can mint
/// OAuth2 access tokens.
#[async_trait::async_trait]
pub trait CredentialLoader: Debug + Send + Sync + 'static {
    /// Key identifying this credential configuration for cache lookups.
    ///
    /// Equal keys mean equal tokens may be shared. The key is never a secret.
    fn cache_key(&self) -> String;

    /// Fetch a new access token.
    async fn fetch_token(&self, ctx: &Context) -> Result<Token>;
}
