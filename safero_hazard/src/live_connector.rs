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

use std::sync::Arc;
use async_trait::async_trait;
use reqwest::Client;

use safero_common::{datetime::{secs, utc_now}, net::http_client};
use crate::{
    copernicus::{search_scenes, ClientCredentials, CopernicusScene, SceneQuery},
    errors::Result,
    firms::{fetch_hotspots, FireSummary},
    gee::{analyze_gee, GeeAnalysis, ServiceAccountKey},
    regions::Region,
    HazardConfig, HazardConnector,
};

/// the [HazardConnector] that talks to the real providers.
/// Secrets are read once from the environment when the connector is created. Missing ones are not an error, they just
/// select the respective fallback (seasonal estimate, open FIRMS feed, anonymous catalog search)
pub struct LiveHazardConnector {
    config: Arc<HazardConfig>,
    client: Client,
    gee_key: Option<ServiceAccountKey>,
    firms_key: Option<String>,
    copernicus_credentials: Option<ClientCredentials>,
}

impl LiveHazardConnector {
    pub fn new (config: Arc<HazardConfig>)->Result<Self> {
        let client = http_client( secs( config.http_timeout_secs))?;
        let gee_key = ServiceAccountKey::from_env( &config.gee.key_env);
        let firms_key = config.firms.map_key();
        let copernicus_credentials = ClientCredentials::from_env( &config.copernicus).ok();

        Ok( LiveHazardConnector { config, client, gee_key, firms_key, copernicus_credentials } )
    }

    pub fn has_gee_key (&self)->bool { self.gee_key.is_some() }
    pub fn has_firms_key (&self)->bool { self.firms_key.is_some() }
    pub fn has_copernicus_credentials (&self)->bool { self.copernicus_credentials.is_some() }
}

#[async_trait]
impl HazardConnector for LiveHazardConnector {

    async fn gee_analysis (&self, region: &Region)->Option<GeeAnalysis> {
        Some( analyze_gee( &self.client, &self.config.gee, self.gee_key.as_ref(), region, utc_now()).await )
    }

    async fn fire_hotspots (&self, region: &Region, n_days: u32)->FireSummary {
        fetch_hotspots( &self.client, &self.config.firms, self.firms_key.as_deref(), region, n_days).await
    }

    async fn copernicus_scenes (&self, region: &Region, query: &SceneQuery)->Vec<CopernicusScene> {
        search_scenes( &self.client, &self.config.copernicus, self.copernicus_credentials.as_ref(), region, query).await
    }
}
