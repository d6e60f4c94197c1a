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

//! Google service account credentials.
//!
//! Load a service account key, validate it, and authorize requests with OAuth2
//! access tokens obtained through the JWT-bearer grant.
//!
//! ```no_run
//! use gcred_core::{Context, OsEnv, Signer};
//! use gcred_google::{CredentialLoader, RequestSigner, ServiceAccountCredentials};
//! use gcred_http_send_reqwest::ReqwestHttpSend;
//!
//! # async fn example() -> gcred_core::Result<()> {
//! let creds = ServiceAccountCredentials::from_key_file(
//!     "https://www.googleapis.com/auth/devstorage.read_only",
//!     "/path/to/service-account.json",
//! )?;
//! println!("cache key: {}", creds.cache_key());
//!
//! let ctx = Context::new()
//!     .with_http_send(ReqwestHttpSend::default())
//!     .with_env(OsEnv);
//! let signer = Signer::new(ctx, creds, RequestSigner);
//!
//! let mut parts = http::Request::get("https://storage.googleapis.com/storage/v1/b/my-bucket/o")
//!     .body(())?
//!     .into_parts()
//!     .0;
//! signer.sign(&mut parts, None).await?;
//! # Ok(())
//! # }
//! ```

mod constants;
pub use constants::{DEFAULT_SCOPE, TOKEN_CREDENTIAL_URI};

mod credential;
pub use credential::{Credential, Token};

mod key;
pub use key::ServiceAccountKey;

mod scope;
pub use scope::Scope;

pub mod oauth2;

mod credential_loader;
pub use credential_loader::CredentialLoader;

mod provide_credential;
pub use provide_credential::{DefaultCredentialProvider, KeySource, ServiceAccountCredentials};

mod sign_request;
pub use sign_request::RequestSigner;

#[cfg(test)]
mod testing;
