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

//! Google Earth Engine access through a service account.
//!
//! The token flow is the standard OAuth2 JWT bearer grant (RFC 7523): we sign an assertion with the service account's
//! RSA key, post it to the token endpoint and get a bearer token back. A lightweight asset listing request then tells
//! us if the token is accepted by Earth Engine. The NDVI / flood numbers themselves come from [crate::estimate]

use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::Client;
use serde::{Serialize,Deserialize};
use tracing::{debug,info,warn};

use safero_common::{config::env_secret, datetime::{epoch_secs, ymd}, if_let, net::{get_text, post_form_json}};

use crate::{
    errors::{op_failed, Result},
    estimate::{estimate_hazards, HazardEstimate},
    regions::Region,
    risk::{classify_flood_risk, classify_vegetation_stress, RiskLevel},
};

pub const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
pub const ASSERTION_LIFETIME_SECS: i64 = 3600;

#[derive(Debug,Clone,Serialize,Deserialize)]
#[serde(default)]
pub struct GeeConfig {
    pub token_url: String,
    pub api_url: String,
    pub scope: String,
    pub probe_asset: String, // asset folder we list to check connectivity
    pub key_env: String, // name of the env var that holds the service account JSON
}

impl Default for GeeConfig {
    fn default()->Self {
        GeeConfig {
            token_url: "https://oauth2.googleapis.com/token".to_string(),
            api_url: "https://earthengine.googleapis.com/v1".to_string(),
            scope: "https://www.googleapis.com/auth/earthengine.readonly".to_string(),
            probe_asset: "projects/earthengine-public/assets/COPERNICUS".to_string(),
            key_env: "GEE_SERVICE_ACCOUNT_KEY".to_string(),
        }
    }
}

/* #region service account ******************************************************************************/

/// the parts of a Google service account key file we need
#[derive(Clone,Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String, // PEM encoded PKCS#8
    pub project_id: String,
    #[serde(default)]
    pub private_key_id: Option<String>,
    #[serde(default)]
    pub token_uri: Option<String>, // overrides the configured token endpoint
}

// don't leak the private key into logs
impl std::fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("client_email", &self.client_email)
            .field("project_id", &self.project_id)
            .field("private_key_id", &self.private_key_id)
            .field("token_uri", &self.token_uri)
            .finish_non_exhaustive()
    }
}

impl ServiceAccountKey {
    pub fn from_json (json: &str)->Result<Self> {
        let mut key: ServiceAccountKey = serde_json::from_str(json)?;

        // keys that went through env files or dashboards often have their newlines escaped twice
        if key.private_key.contains("\\n") {
            key.private_key = key.private_key.replace("\\n", "\n");
        }
        if !key.private_key.contains("-----BEGIN") {
            return Err( op_failed!("private key of {} is not PEM encoded", key.client_email))
        }

        Ok(key)
    }

    /// get the key from the given environment variable. Both a missing variable and an invalid key are reported as `None`
    pub fn from_env (var: &str)->Option<Self> {
        if_let! {
            Some(json) = { env_secret(var) } else { debug!("no GEE service account configured ({var})"); None },
            Ok(key) = { Self::from_json(&json) } else |e| { warn!("invalid GEE service account in {var}: {e:?}"); None } => {
                Some(key)
            }
        }
    }
}

/* #endregion service account */

/* #region token ******************************************************************************/

/// the claims of the JWT assertion we exchange for an access token
#[derive(Debug,Clone,Serialize,Deserialize,PartialEq)]
pub struct Claims {
    pub iss: String,
    pub sub: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
    pub scope: String,
}

/// build and RS256-sign the JWT assertion for the given service account
pub fn create_assertion (key: &ServiceAccountKey, scope: &str, aud: &str, now: DateTime<Utc>)->Result<String> {
    let iat = epoch_secs(now);
    let claims = Claims {
        iss: key.client_email.clone(),
        sub: key.client_email.clone(),
        aud: aud.to_string(),
        iat,
        exp: iat + ASSERTION_LIFETIME_SECS,
        scope: scope.to_string(),
    };

    let mut header = Header::new( Algorithm::RS256);
    header.kid = key.private_key_id.clone();

    let encoding_key = EncodingKey::from_rsa_pem( key.private_key.as_bytes())?;
    Ok( encode( &header, &claims, &encoding_key)? )
}

#[derive(Debug,Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
}

#[derive(Debug,Clone)]
pub struct AccessToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// exchange a signed assertion for a bearer token
pub async fn request_token (client: &Client, config: &GeeConfig, key: &ServiceAccountKey)->Result<AccessToken> {
    let now = Utc::now();
    let token_url = key.token_uri.as_deref().unwrap_or( &config.token_url);
    let assertion = create_assertion( key, &config.scope, token_url, now)?;
    let form = [("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())];

    let response: TokenResponse = post_form_json( client, token_url, &form).await?;
    if response.access_token.is_empty() {
        return Err( op_failed!("empty access token from {token_url}"))
    }

    let expires_at = now + TimeDelta::seconds( response.expires_in.unwrap_or(ASSERTION_LIFETIME_SECS));
    Ok( AccessToken { token: response.access_token, expires_at } )
}

/// get a bearer token, logging and swallowing any failure. Callers always have the estimate fallback
pub async fn acquire_token (client: &Client, config: &GeeConfig, key: Option<&ServiceAccountKey>)->Option<AccessToken> {
    let Some(key) = key else {
        debug!("no GEE service account, skipping authentication");
        return None
    };

    match request_token( client, config, key).await {
        Ok(token) => {
            debug!("obtained GEE access token for {}", key.client_email);
            Some(token)
        }
        Err(e) => {
            warn!("GEE authentication failed for {}: {e}", key.client_email);
            None
        }
    }
}

/// issue a cheap authenticated Earth Engine request to check if the token is accepted
pub async fn probe_connectivity (client: &Client, config: &GeeConfig, token: &AccessToken)->bool {
    let url = format!("{}/{}:listAssets?pageSize=1", config.api_url, config.probe_asset);

    match get_text( client, &url, Some(token.token.as_str())).await {
        Ok(_) => true,
        Err(e) => {
            warn!("GEE connectivity probe failed: {e}");
            false
        }
    }
}

/* #endregion token */

/* #region analysis ******************************************************************************/

/// what we report as the GEE part of a region analysis. Values are estimates (see [crate::estimate]),
/// `connected` only tells if authentication and the connectivity probe succeeded
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeeAnalysis {
    pub ndvi_mean: Option<f64>,
    pub ndvi_min: Option<f64>,
    pub ndvi_max: Option<f64>,
    pub flood_percentage: Option<f64>,
    pub water_percentage: Option<f64>,
    pub vegetation_stress: Option<RiskLevel>,
    pub flood_risk: Option<RiskLevel>,
    pub data_date: String,
    pub connected: bool,
    pub source: String,
}

pub const SOURCE_GEE_ESTIMATE: &str = "gee-estimate";
pub const SOURCE_SEASONAL_ESTIMATE: &str = "seasonal-estimate";

impl GeeAnalysis {
    pub fn from_estimate (est: &HazardEstimate, date: DateTime<Utc>, connected: bool)->Self {
        GeeAnalysis {
            ndvi_mean: Some(est.ndvi_mean),
            ndvi_min: Some(est.ndvi_min),
            ndvi_max: Some(est.ndvi_max),
            flood_percentage: Some(est.flood_percentage),
            water_percentage: Some(est.water_percentage),
            vegetation_stress: Some( classify_vegetation_stress( est.ndvi_mean)),
            flood_risk: Some( classify_flood_risk( est.flood_percentage)),
            data_date: ymd(date),
            connected,
            source: if connected { SOURCE_GEE_ESTIMATE } else { SOURCE_SEASONAL_ESTIMATE }.to_string(),
        }
    }
}

/// authenticate, probe and estimate. This never fails - without credentials or with a failing upstream
/// we still return the estimate, just with `connected = false`
pub async fn analyze_gee (client: &Client, config: &GeeConfig, key: Option<&ServiceAccountKey>, region: &Region, date: DateTime<Utc>)->GeeAnalysis {
    let connected = match acquire_token( client, config, key).await {
        Some(token) => probe_connectivity( client, config, &token).await,
        None => false
    };
    info!("GEE analysis for {} (connected: {connected})", region.id);

    let est = estimate_hazards( region, date, &mut rand::rng());
    GeeAnalysis::from_estimate( &est, date, connected)
}

/* #endregion analysis */
