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

//! scene search on the Copernicus Data Space Ecosystem (CDSE) OData catalog.
//!
//! This is the older catalog based data path of the dashboard. The catalog is public, client credentials
//! (`COPERNICUS_CLIENT_ID`/`COPERNICUS_CLIENT_SECRET`) are only used if they are set in the environment.
//! See https://documentation.dataspace.copernicus.eu/APIs/OData.html

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Serialize,Deserialize};
use strum::{Display, EnumString};
use tracing::{debug,info,warn};
use url::Url;

use safero_common::{config::env_secret, datetime::{days_before, rfc3339_millis}, net::{get_json, post_form_json}};

use crate::{errors::{missing_credentials, op_failed, Result}, regions::Region};

pub const CLIENT_CREDENTIALS_GRANT: &str = "client_credentials";

#[derive(Debug,Clone,Serialize,Deserialize)]
#[serde(default)]
pub struct CopernicusConfig {
    pub token_url: String,
    pub catalog_url: String,
    pub client_id_env: String,
    pub client_secret_env: String,
    pub max_results: usize,
    pub default_max_cloud_cover: f64,
}

impl Default for CopernicusConfig {
    fn default()->Self {
        CopernicusConfig {
            token_url: "https://identity.dataspace.copernicus.eu/auth/realms/CDSE/protocol/openid-connect/token".to_string(),
            catalog_url: "https://catalogue.dataspace.copernicus.eu/odata/v1/Products".to_string(),
            client_id_env: "COPERNICUS_CLIENT_ID".to_string(),
            client_secret_env: "COPERNICUS_CLIENT_SECRET".to_string(),
            max_results: 10,
            default_max_cloud_cover: 30.0,
        }
    }
}

/// client id and secret, read from the environment
#[derive(Clone)]
pub struct ClientCredentials {
    pub client_id: String,
    pub client_secret: String,
}

impl std::fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientCredentials").field("client_id", &self.client_id).finish_non_exhaustive()
    }
}

impl ClientCredentials {
    pub fn from_env (config: &CopernicusConfig)->Result<Self> {
        let client_id = env_secret( &config.client_id_env).ok_or_else( || missing_credentials!("{}", config.client_id_env))?;
        let client_secret = env_secret( &config.client_secret_env).ok_or_else( || missing_credentials!("{}", config.client_secret_env))?;
        Ok( ClientCredentials { client_id, client_secret } )
    }
}

#[derive(Debug,Clone,Copy,PartialEq,Eq,Default,Serialize,Deserialize,Display,EnumString)]
pub enum Satellite {
    #[serde(rename = "sentinel-1")]
    #[strum(serialize = "sentinel-1")]
    Sentinel1,

    #[default]
    #[serde(rename = "sentinel-2")]
    #[strum(serialize = "sentinel-2")]
    Sentinel2,

    #[serde(rename = "sentinel-3")]
    #[strum(serialize = "sentinel-3")]
    Sentinel3,
}

impl Satellite {
    pub fn collection_name (&self)->&'static str {
        match self {
            Satellite::Sentinel1 => "SENTINEL-1",
            Satellite::Sentinel2 => "SENTINEL-2",
            Satellite::Sentinel3 => "SENTINEL-3",
        }
    }

    /// Sentinel-1 is SAR, cloud cover is not an attribute of its products
    pub fn has_cloud_cover (&self)->bool {
        !matches!( self, Satellite::Sentinel1)
    }
}

#[derive(Debug,Clone,PartialEq)]
pub struct SceneQuery {
    pub satellite: Satellite,
    pub days_back: u32,
    pub max_cloud_cover: f64,
}

impl SceneQuery {
    pub fn new (satellite: Option<Satellite>, days_back: u32, max_cloud_cover: Option<f64>, config: &CopernicusConfig)->Self {
        SceneQuery {
            satellite: satellite.unwrap_or_default(),
            days_back,
            max_cloud_cover: max_cloud_cover.unwrap_or( config.default_max_cloud_cover).clamp( 0.0, 100.0),
        }
    }
}

/// the parts of a catalog product we report
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CopernicusScene {
    pub id: String,
    pub name: String,
    pub sensing_date: String,
    pub cloud_cover: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footprint: Option<serde_json::Value>, // GeoJSON
    pub online: bool,
}

/* #region OData ******************************************************************************/

pub fn catalog_filter (region: &Region, query: &SceneQuery, now: DateTime<Utc>)->String {
    let mut filter = format!(
        "Collection/Name eq '{}' and OData.CSC.Intersects(area=geography'SRID=4326;{}') and ContentDate/Start gt {} and ContentDate/Start lt {}",
        query.satellite.collection_name(),
        region.polygon_wkt(),
        rfc3339_millis( days_before( now, query.days_back)),
        rfc3339_millis( now)
    );

    if query.satellite.has_cloud_cover() {
        filter.push_str( &format!(
            " and Attributes/OData.CSC.DoubleAttribute/any(att:att/Name eq 'cloudCover' and att/OData.CSC.DoubleAttribute/Value le {:.2})",
            query.max_cloud_cover
        ));
    }
    filter
}

pub fn build_catalog_url (config: &CopernicusConfig, region: &Region, query: &SceneQuery, now: DateTime<Utc>)->Result<Url> {
    let mut url = Url::parse( &config.catalog_url)?;
    url.query_pairs_mut()
        .append_pair( "$filter", &catalog_filter( region, query, now))
        .append_pair( "$orderby", "ContentDate/Start desc")
        .append_pair( "$top", &config.max_results.to_string())
        .append_pair( "$expand", "Attributes");
    Ok(url)
}

#[derive(Debug,Deserialize)]
struct ODataResponse {
    #[serde(default)]
    value: Vec<ODataProduct>,
}

#[derive(Debug,Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ODataProduct {
    id: String,
    name: String,
    content_date: Option<ODataContentDate>,
    #[serde(default)]
    online: Option<bool>,
    geo_footprint: Option<serde_json::Value>,
    #[serde(default)]
    attributes: Vec<ODataAttribute>,
}

#[derive(Debug,Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ODataContentDate {
    start: String,
}

#[derive(Debug,Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ODataAttribute {
    name: String,
    value: serde_json::Value,
}

impl From<ODataProduct> for CopernicusScene {
    fn from (p: ODataProduct)->Self {
        let cloud_cover = p.attributes.iter()
            .find( |a| a.name == "cloudCover")
            .and_then( |a| a.value.as_f64());

        CopernicusScene {
            id: p.id,
            name: p.name,
            sensing_date: p.content_date.map( |d| d.start).unwrap_or_default(),
            cloud_cover,
            footprint: p.geo_footprint,
            online: p.online.unwrap_or(true),
        }
    }
}

pub fn parse_scenes (json: &str)->Result<Vec<CopernicusScene>> {
    let response: ODataResponse = serde_json::from_str(json)?;
    Ok( response.value.into_iter().map( CopernicusScene::from).collect() )
}

/* #endregion OData */

#[derive(Debug,Deserialize)]
struct TokenResponse {
    access_token: String,
}

pub async fn request_token (client: &Client, config: &CopernicusConfig, credentials: &ClientCredentials)->Result<String> {
    let form = [
        ("grant_type", CLIENT_CREDENTIALS_GRANT),
        ("client_id", credentials.client_id.as_str()),
        ("client_secret", credentials.client_secret.as_str()),
    ];
    let response: TokenResponse = post_form_json( client, &config.token_url, &form).await?;
    if response.access_token.is_empty() {
        Err( op_failed!("empty access token from {}", config.token_url))
    } else {
        Ok(response.access_token)
    }
}

async fn query_catalog (client: &Client, config: &CopernicusConfig, credentials: Option<&ClientCredentials>, region: &Region, query: &SceneQuery)->Result<Vec<CopernicusScene>> {
    let token = match credentials {
        Some(credentials) => match request_token( client, config, credentials).await {
            Ok(token) => Some(token),
            Err(e) => { warn!("Copernicus authentication failed, searching anonymously: {e}"); None }
        }
        None => None
    };

    let url = build_catalog_url( config, region, query, Utc::now())?;
    debug!("querying Copernicus catalog for {} {}", region.id, query.satellite);

    let response: ODataResponse = get_json( client, url.as_str(), token.as_deref()).await?;
    Ok( response.value.into_iter().map( CopernicusScene::from).collect() )
}

/// search the catalog for recent scenes over `region`. Failures are logged and reported as no scenes
pub async fn search_scenes (client: &Client, config: &CopernicusConfig, credentials: Option<&ClientCredentials>, region: &Region, query: &SceneQuery)->Vec<CopernicusScene> {
    match query_catalog( client, config, credentials, region, query).await {
        Ok(scenes) => {
            info!("{} {} scenes for {}", scenes.len(), query.satellite, region.id);
            scenes
        }
        Err(e) => {
            warn!("Copernicus catalog search for {} failed: {e}", region.id);
            Vec::new()
        }
    }
}
