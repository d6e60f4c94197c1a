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

// Env values used by the default credential provider.
pub const GOOGLE_APPLICATION_CREDENTIALS: &str = "GOOGLE_APPLICATION_CREDENTIALS";
pub const GOOGLE_SCOPE: &str = "GOOGLE_SCOPE";

// Default OAuth2 scope for Google Cloud services
pub const DEFAULT_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";

/// The OAuth2 token endpoint used both as the JWT audience and the token credential URI.
pub const TOKEN_CREDENTIAL_URI: &str = "https://oauth2.googleapis.com/token";

pub const JWT_BEARER_GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

// Lifetime of the JWT assertion in seconds, the max Google accepts.
pub const JWT_LIFETIME_SECS: u64 = 3600;

pub const X_GOOG_USER_PROJECT: &str = "x-goog-user-project";
