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
#![allow(unused)]

//! the hazard domain of safero: Romanian regions, satellite derived vegetation / flood estimates (Google Earth Engine),
//! fire hotspots (NASA FIRMS), Sentinel scene search (Copernicus) and the risk classification on top of them.
//!
//! Upstream providers are accessed through the [HazardConnector] trait so that servers and tests can inject their own
//! implementation. [live_connector::LiveHazardConnector] is the one that talks to the real services

use std::path::Path;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Serialize,Deserialize};
use tracing::debug;

use safero_common::{config::load_config_or_default, datetime::{ser_rfc3339_millis, utc_now}};

pub mod errors;
pub mod regions;
pub mod risk;
pub mod estimate;
pub mod gee;
pub mod firms;
pub mod copernicus;
pub mod live_connector;

use errors::Result;
use regions::Region;
use gee::{GeeAnalysis, GeeConfig};
use firms::{FireSummary, FirmsConfig};
use copernicus::{CopernicusConfig, CopernicusScene, SceneQuery};
use risk::{classify_hazards, HazardIndicators};

pub const CONFIG_ID: &str = "hazard";

/// the non-secret configuration of all upstream providers. Secrets are only taken from the environment
#[derive(Debug,Clone,Serialize,Deserialize)]
#[serde(default)]
pub struct HazardConfig {
    pub gee: GeeConfig,
    pub firms: FirmsConfig,
    pub copernicus: CopernicusConfig,
    pub http_timeout_secs: u64,
}

impl Default for HazardConfig {
    fn default()->Self {
        HazardConfig {
            gee: GeeConfig::default(),
            firms: FirmsConfig::default(),
            copernicus: CopernicusConfig::default(),
            http_timeout_secs: 60,
        }
    }
}

impl HazardConfig {
    pub fn load (path: Option<&Path>)->Result<Self> {
        Ok( load_config_or_default( path, CONFIG_ID)? )
    }
}

/// the abstraction of our upstream providers.
/// Implementations are expected to handle provider failures themselves - what comes back is either a usable result
/// or the respective empty value
#[async_trait]
pub trait HazardConnector: Send + Sync {
    /// `None` if there is no analysis for this region
    async fn gee_analysis (&self, region: &Region)->Option<GeeAnalysis>;

    async fn fire_hotspots (&self, region: &Region, n_days: u32)->FireSummary;

    async fn copernicus_scenes (&self, region: &Region, query: &SceneQuery)->Vec<CopernicusScene>;
}

/// the full analysis of a region
#[derive(Debug,Clone,Serialize)]
pub struct RegionAnalysis {
    pub region: Region,
    pub gee: Option<GeeAnalysis>,
    pub fires: FireSummary,
    pub indicators: HazardIndicators,
    #[serde(serialize_with = "ser_rfc3339_millis")]
    pub timestamp: DateTime<Utc>,
}

/// get GEE analysis and fire hotspots for `region` concurrently and classify the hazards
pub async fn analyze_region (connector: &dyn HazardConnector, region: &Region, n_days: u32)->RegionAnalysis {
    let (gee, fires) = tokio::join!(
        connector.gee_analysis( region),
        connector.fire_hotspots( region, n_days)
    );
    debug!("analyzed {}: gee={}, {} hotspots", region.id, gee.is_some(), fires.count);

    let indicators = classify_hazards( gee.as_ref(), &fires);
    RegionAnalysis { region: *region, gee, fires, indicators, timestamp: utc_now() }
}
