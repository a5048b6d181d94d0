/*
 * Copyright © 2025, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

///! common utility functions for network operations

use std::time::Duration;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};

use crate::define_error;

define_error!{ pub SaferoNetError =
    NotFoundError(String) : "not found {0}",
    HttpError(#[from] reqwest::Error) : "http error: {0}",
    StatusError(u16,String) : "response status {0}: {1}",
    OpFailed(String) : "operation failed: {0}",
    ParseError(String) : "parse error: {0}"
}

pub type Result<T> = std::result::Result<T, SaferoNetError>;

pub const USER_AGENT: &str = concat!("safero/", env!("CARGO_PKG_VERSION"));

/// the reqwest client we use for all upstream providers. The timeout covers the whole request including
/// the body, so a stalled provider can't hold up a dashboard request indefinitely
pub fn http_client (timeout: Duration)->Result<Client> {
    Ok( Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()? )
}

/// GET the response body as text, optionally with a bearer token
pub async fn get_text (client: &Client, url: &str, bearer: Option<&str>)->Result<String> {
    let response = send( with_bearer( client.get(url), bearer), url).await?;
    Ok( response.text().await.map_err( reqwest::Error::without_url)? )
}

/// GET and deserialize a JSON response
pub async fn get_json<T> (client: &Client, url: &str, bearer: Option<&str>)->Result<T> where T: DeserializeOwned {
    let response = send( with_bearer( client.get(url), bearer), url).await?;
    from_json(response).await
}

/// POST an `application/x-www-form-urlencoded` body and deserialize the JSON response. This is what
/// OAuth2 token endpoints expect
pub async fn post_form_json<F,T> (client: &Client, url: &str, form: &F)->Result<T> where F: Serialize + ?Sized, T: DeserializeOwned {
    let response = send( client.post(url).form(form), url).await?;
    from_json(response).await
}

fn with_bearer (req: RequestBuilder, bearer: Option<&str>)->RequestBuilder {
    if let Some(token) = bearer { req.bearer_auth(token) } else { req }
}

/// reqwest errors are stripped of their URL since our URLs can carry secrets (e.g. the FIRMS map key)
async fn send (req: RequestBuilder, url: &str)->Result<Response> {
    let response = req.send().await.map_err( reqwest::Error::without_url)?;

    match response.status() {
        status if status.is_success() => Ok(response),
        StatusCode::NOT_FOUND => {
            Err( SaferoNetError::NotFoundError( url_origin(url)))
        }
        other => {
            let msg = response.text().await.unwrap_or_default();
            Err( SaferoNetError::StatusError( other.as_u16(), truncate(&msg, 200).to_string()))
        }
    }
}

pub async fn from_json<T> (response: Response)->Result<T> where T: DeserializeOwned {
    let bytes = response.bytes().await.map_err( reqwest::Error::without_url)?;
    serde_json::from_slice( &bytes).map_err(|e| SaferoNetError::ParseError(e.to_string()))
}

/// strip the query part of URLs and mask the given secret before we log them
pub fn redact_url (url: &str, secret: Option<&str>)->String {
    let url = match url.find('?') {
        Some(idx) => format!("{}?…", &url[..idx]),
        None => url.to_string()
    };
    mask_secret( &url, secret)
}

/// replace all occurrences of `secret` in `text`
pub fn mask_secret (text: &str, secret: Option<&str>)->String {
    match secret {
        Some(s) if !s.is_empty() => text.replace(s, "***"),
        _ => text.to_string()
    }
}

/// scheme and host of `url` - error values don't know which path segments are secret
pub fn url_origin (url: &str)->String {
    match url.find("://") {
        Some(idx) => {
            let rest = &url[idx+3..];
            let host_end = rest.find( |c| c == '/' || c == '?').unwrap_or( rest.len());
            format!("{}/…", &url[..idx+3+host_end])
        }
        None => "<url>".to_string()
    }
}

fn truncate (s: &str, max_len: usize)->&str {
    match s.char_indices().nth(max_len) {
        Some((idx,_)) => &s[..idx],
        None => s
    }
}
