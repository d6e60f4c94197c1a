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

/// Scope is the set of OAuth2 scopes requested for a token.
///
/// It's either a single space-delimited string or an ordered list of scope strings.
/// Caller-given order is always preserved so that the resulting cache keys and JWT
/// claims are reproducible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// Scopes separated by whitespace, e.g. `"scope1 scope2"`.
    Delimited(String),
    /// Scopes in an explicit list.
    List(Vec<String>),
}

impl Scope {
    /// The scope identifiers in order.
    ///
    /// Both forms are normalized the same way. A delimited string is split on
    /// whitespace. List entries are trimmed, and entries left empty are dropped, so
    /// `["a", " b ", ""]` yields `["a", "b"]` just like `"a  b"`.
    pub fn scopes(&self) -> Vec<&str> {
        match self {
            Scope::Delimited(s) => s.split_whitespace().collect(),
            Scope::List(v) => v
                .iter()
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }

    /// Whether no scope identifier is present.
    pub fn is_empty(&self) -> bool {
        self.scopes().is_empty()
    }

    /// Render the scopes the way the `scope` JWT claim expects them.
    pub fn to_space_delimited(&self) -> String {
        self.scopes().join(" ")
    }
}

impl From<&str> for Scope {
    fn from(v: &str) -> Self {
        Scope::Delimited(v.to_string())
    }
}

impl From<String> for Scope {
    fn from(v: String) -> Self {
        Scope::Delimited(v)
    }
}

impl From<&String> for Scope {
    fn from(v: &String) -> Self {
        Scope::Delimited(v.clone())
    }
}

impl From<Vec<String>> for Scope {
    fn from(v: Vec<String>) -> Self {
        Scope::List(v)
    }
}

impl From<&[&str]> for Scope {
    fn from(v: &[&str]) -> Self {
        Scope::List(v.iter().map(|s| s.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Scope {
    fn from(v: [&str; N]) -> Self {
        Scope::List(v.iter().map(|s| s.to_string()).collect())
    }
}
