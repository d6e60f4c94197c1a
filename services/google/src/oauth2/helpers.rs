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

//! OAuth2 helper functions for Google services

use bytes::Bytes;
use http::{header::CONTENT_TYPE, Method, StatusCode};
use log::error;
use serde::de::DeserializeOwned;

use gcred_core::{time::now, Context, Error, Result};

use super::types::TokenResponse;
use crate::credential::Token;

/// Send a form encoded OAuth2 POST request and parse the JSON response.
pub async fn oauth2_post_form<R: DeserializeOwned>(
    ctx: &Context,
    url: &str,
    params: &[(&str, &str)],
) -> Result<R> {
    let body = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params)
        .finish();

    let req = http::Request::builder()
        .method(Method::POST)
        .uri(url)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Bytes::from(body))
        .map_err(|e| Error::unexpected("failed to build HTTP request").with_source(e))?;

    let resp = ctx.http_send(req).await?;

    if resp.status() != StatusCode::OK {
        error!("OAuth2 request to {} failed: {:?}", url, resp);
        let body = String::from_utf8_lossy(resp.body());
        return Err(Error::unexpected(format!(
            "OAuth2 request failed ({}): {}",
            resp.status(),
            body
        )));
    }

    serde_json::from_slice(resp.body())
        .map_err(|e| Error::parse("failed to parse OAuth2 response").with_source(e))
}

/// Convert a standard OAuth2 token response to our Token type.
///
/// An `expires_in` that does not fit in a timestamp is rejected as a parse error.
pub fn token_from_response(resp: TokenResponse) -> Result<Token> {
    let expires_at = match resp.expires_in {
        Some(expires_in) => Some(
            i64::try_from(expires_in)
                .ok()
                .and_then(chrono::TimeDelta::try_seconds)
                .and_then(|d| now().checked_add_signed(d))
                .ok_or_else(|| {
                    Error::parse(format!(
                        "OAuth2 response has out of range expires_in: {expires_in}"
                    ))
                })?,
        ),
        None => None,
    };

    Ok(Token {
        access_token: resp.access_token,
        expires_at,
    })
}
