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

/// a module that imports hotspots from NASAs Fire Information for Resource Management System (FIRMS)
/// see https://firms.modaps.eosdis.nasa.gov/api/area/ for the keyed area API and
/// https://firms.modaps.eosdis.nasa.gov/active_fire/ for the open regional CSV feeds

use reqwest::Client;
use serde::{Serialize,Deserialize};
use tracing::{debug,info,warn};

use safero_common::{BoundingBox, MinMaxAvg, config::env_secret, net::{get_text, mask_secret, redact_url}, round_to};

use crate::{errors::Result, regions::Region};

pub const MIN_DAYS: u32 = 1;
pub const MAX_DAYS: u32 = 10; // FIRMS only accepts full day ranges 1..=10
pub const DEFAULT_DAYS: u32 = 7;
pub const OPEN_FEED_MAX_DAYS: u32 = 7; // the longest open feed period

/// MODIS reports confidence as a 0..100 percentage
pub const MODIS_HIGH_CONFIDENCE: f64 = 80.0;

#[derive(Debug,Clone,Serialize,Deserialize)]
#[serde(default)]
pub struct FirmsConfig {
    pub base_url: String,
    pub open_url: String,     // directory of the open regional CSV feeds
    pub source: String,       // data source of the keyed area query
    pub open_region: String,  // region name of the open feed files
    pub map_key_env: String,  // env var with the (rate limited) map key - keep this private
    pub margin: f64,          // degrees added around region boxes when filtering open feed data
}

impl Default for FirmsConfig {
    fn default()->Self {
        FirmsConfig {
            base_url: "https://firms.modaps.eosdis.nasa.gov".to_string(),
            open_url: "https://firms.modaps.eosdis.nasa.gov/data/active_fire/suomi-npp-viirs-c2/csv".to_string(),
            source: "VIIRS_SNPP_NRT".to_string(),
            open_region: "Europe".to_string(),
            map_key_env: "NASA_FIRMS_API_KEY".to_string(),
            margin: 0.5,
        }
    }
}

impl FirmsConfig {
    pub fn map_key (&self)->Option<String> {
        env_secret( &self.map_key_env)
    }
}

/// a single hotspot as we send it to clients. Values are taken verbatim from the FIRMS CSV rows
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FireHotspot {
    pub latitude: f64,
    pub longitude: f64,
    pub brightness: f64,   // Kelvin, from bright_ti4 (VIIRS) or brightness (MODIS)
    pub confidence: String, // l|n|h for VIIRS, 0..100 for MODIS
    pub acq_date: String,
    pub acq_time: String,  // hhmm UTC
    pub satellite: String,
    pub frp: f64,          // fire radiative power in MW
}

impl FireHotspot {
    pub fn is_high_confidence (&self)->bool {
        let conf = self.confidence.trim();
        match conf.to_ascii_lowercase().as_str() {
            "h" | "high" => true,
            "l" | "low" | "n" | "nominal" => false,
            _ => conf.parse::<f64>().map( |c| c >= MODIS_HIGH_CONFIDENCE).unwrap_or(false)
        }
    }
}

/// which FIRMS endpoint the hotspots came from
#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize,Deserialize)]
pub enum FirmsSource {
    #[serde(rename = "firms-area")]
    Area,
    #[serde(rename = "firms-open")]
    Open,
}

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FireSummary {
    pub hotspots: Vec<FireHotspot>,
    pub count: usize,
    pub high_confidence_count: usize,
    pub total_frp: f64,
    pub max_frp: f64,
    pub source: FirmsSource,
}

impl FireSummary {
    pub fn new (hotspots: Vec<FireHotspot>, source: FirmsSource)->Self {
        let mut frp = MinMaxAvg::new();
        let mut total_frp = 0.0;
        for h in &hotspots {
            frp.add( h.frp);
            total_frp += h.frp;
        }

        FireSummary {
            count: hotspots.len(),
            high_confidence_count: hotspots.iter().filter( |h| h.is_high_confidence()).count(),
            total_frp: round_to( total_frp, 2),
            max_frp: if frp.n > 0 { frp.max } else { 0.0 },
            hotspots,
            source
        }
    }

    pub fn empty (source: FirmsSource)->Self {
        FireSummary::new( Vec::new(), source)
    }
}

pub fn clamp_days (days: Option<u32>)->u32 {
    days.unwrap_or(DEFAULT_DAYS).clamp( MIN_DAYS, MAX_DAYS)
}

/// according to https://firms.modaps.eosdis.nasa.gov/api/area/
///   [BASE_URL]/api/area/csv/[MAP_KEY]/[SOURCE]/[AREA_COORDINATES]/[DAY_RANGE]
///   e.g. /api/area/csv/0123456789abcdef/VIIRS_SNPP_NRT/20.5,43.6,29.7,48.1/1
pub fn area_query_url (config: &FirmsConfig, map_key: &str, bbox: &BoundingBox<f64>, n_days: u32)->String {
    format!( "{}/api/area/csv/{}/{}/{},{},{},{}/{}",
             config.base_url, map_key, config.source,
             bbox.west, bbox.south, bbox.east, bbox.north, n_days)
}

/// the open feeds only come in 24h, 48h and 7d flavors, so we pick the smallest one that covers the requested days
pub fn open_feed_url (config: &FirmsConfig, n_days: u32)->String {
    let period = match n_days {
        0 | 1 => "24h",
        2 => "48h",
        _ => "7d"
    };
    format!( "{}/SUOMI_VIIRS_C2_{}_{}.csv", config.open_url, config.open_region, period)
}

/* #region CSV parsing ******************************************************************************/

/// column indices looked up from the CSV header, which means we don't depend on column order
#[derive(Debug,Default)]
struct ColumnMap {
    latitude: Option<usize>,
    longitude: Option<usize>,
    brightness: Option<usize>,
    confidence: Option<usize>,
    acq_date: Option<usize>,
    acq_time: Option<usize>,
    satellite: Option<usize>,
    frp: Option<usize>,
}

impl ColumnMap {
    fn from_headers (headers: &csv::StringRecord)->Self {
        let mut map = ColumnMap::default();

        for (i,h) in headers.iter().enumerate() {
            match h.trim().to_ascii_lowercase().as_str() {
                "latitude" => map.latitude = Some(i),
                "longitude" => map.longitude = Some(i),
                "bright_ti4" => map.brightness = Some(i),
                "brightness" => { if map.brightness.is_none() { map.brightness = Some(i) } } // MODIS
                "confidence" => map.confidence = Some(i),
                "acq_date" => map.acq_date = Some(i),
                "acq_time" => map.acq_time = Some(i),
                "satellite" => map.satellite = Some(i),
                "frp" => map.frp = Some(i),
                _ => {}
            }
        }
        map
    }

    fn has_position (&self)->bool {
        self.latitude.is_some() && self.longitude.is_some()
    }
}

fn field<'a> (rec: &'a csv::StringRecord, idx: Option<usize>)->&'a str {
    idx.and_then( |i| rec.get(i)).map( |s| s.trim()).unwrap_or("")
}

/// NaN-safe numeric field parser - everything that isn't a finite number becomes 0
pub fn parse_f64_or_zero (s: &str)->f64 {
    s.trim().parse::<f64>().ok().filter( |v| v.is_finite()).unwrap_or(0.0)
}

/// parse FIRMS CSV text into hotspots. Responses with less than a header and one data line, or without
/// latitude/longitude columns (FIRMS reports errors such as invalid keys as plain text), yield an empty list
pub fn parse_hotspots (text: &str)->Result<Vec<FireHotspot>> {
    if text.lines().filter( |l| !l.trim().is_empty()).count() < 2 {
        return Ok( Vec::new())
    }

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader( text.as_bytes());

    let columns = ColumnMap::from_headers( reader.headers()?);
    if !columns.has_position() {
        warn!("FIRMS response has no position columns: {}", text.lines().next().unwrap_or_default());
        return Ok( Vec::new())
    }

    let mut hotspots = Vec::new();
    for res in reader.records() {
        match res {
            Ok(rec) => {
                hotspots.push( FireHotspot {
                    latitude: parse_f64_or_zero( field( &rec, columns.latitude)),
                    longitude: parse_f64_or_zero( field( &rec, columns.longitude)),
                    brightness: parse_f64_or_zero( field( &rec, columns.brightness)),
                    confidence: field( &rec, columns.confidence).to_string(),
                    acq_date: field( &rec, columns.acq_date).to_string(),
                    acq_time: field( &rec, columns.acq_time).to_string(),
                    satellite: field( &rec, columns.satellite).to_string(),
                    frp: parse_f64_or_zero( field( &rec, columns.frp)),
                })
            }
            Err(e) => debug!("skipping malformed FIRMS record: {e}")
        }
    }

    Ok(hotspots)
}

/// keep the hotspots that are within `bbox` grown by `margin` degrees
pub fn filter_hotspots (hotspots: Vec<FireHotspot>, bbox: &BoundingBox<f64>, margin: f64)->Vec<FireHotspot> {
    let bbox = bbox.expanded( margin);
    hotspots.into_iter().filter( |h| bbox.contains( h.longitude, h.latitude)).collect()
}

/* #endregion CSV parsing */

async fn retrieve_hotspots (client: &Client, url: &str)->Result<Vec<FireHotspot>> {
    let text = get_text( client, url, None).await?;
    parse_hotspots( &text)
}

/// retrieve the hotspots for `region` over the last `n_days`. Uses the keyed area query if we have a map key, or the
/// open regional feed filtered by region otherwise. Any failure is logged and reported as an empty summary
pub async fn fetch_hotspots (client: &Client, config: &FirmsConfig, map_key: Option<&str>, region: &Region, n_days: u32)->FireSummary {
    let n_days = n_days.clamp( MIN_DAYS, MAX_DAYS);

    let (url, source) = match map_key {
        Some(key) => (area_query_url( config, key, &region.bbox, n_days), FirmsSource::Area),
        None => {
            if n_days > OPEN_FEED_MAX_DAYS {
                info!("open FIRMS feed only covers {OPEN_FEED_MAX_DAYS} days, requested {n_days} for {}", region.id);
            }
            (open_feed_url( config, n_days), FirmsSource::Open)
        }
    };
    debug!("retrieving FIRMS hotspots from {}", redact_url( &url, map_key));

    let hotspots = match retrieve_hotspots( client, &url).await {
        Ok(hotspots) => hotspots,
        Err(e) => {
            warn!("FIRMS retrieval for {} failed: {}", region.id, mask_secret( &e.to_string(), map_key));
            return FireSummary::empty( source)
        }
    };

    let hotspots = match source {
        FirmsSource::Area => hotspots,
        FirmsSource::Open => filter_hotspots( hotspots, &region.bbox, config.margin)
    };
    info!("{} FIRMS hotspots for {} ({} days)", hotspots.len(), region.id, n_days);

    FireSummary::new( hotspots, source)
}
