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

use std::sync::atomic::{AtomicU32, Ordering};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use rand::{rngs::StdRng, SeedableRng};
use safero_hazard::{
    analyze_region, HazardConnector,
    copernicus::{CopernicusScene, SceneQuery},
    estimate::estimate_hazards,
    firms::{FireHotspot, FireSummary, FirmsSource},
    gee::GeeAnalysis,
    regions::{find_region, Region},
    risk::RiskLevel,
};

/// a connector with canned results. `gee_available` simulates a failing GEE provider
struct StubConnector {
    gee_available: bool,
    n_hotspots: usize,
    requested_days: AtomicU32,
}

impl StubConnector {
    fn new (gee_available: bool, n_hotspots: usize)->Self {
        StubConnector { gee_available, n_hotspots, requested_days: AtomicU32::new(0) }
    }
}

#[async_trait]
impl HazardConnector for StubConnector {
    async fn gee_analysis (&self, region: &Region)->Option<GeeAnalysis> {
        if self.gee_available {
            let date = Utc.with_ymd_and_hms( 2025, 1, 10, 0, 0, 0).unwrap();
            let est = estimate_hazards( region, date, &mut StdRng::seed_from_u64(1));
            Some( GeeAnalysis::from_estimate( &est, date, false))
        } else {
            None
        }
    }

    async fn fire_hotspots (&self, region: &Region, n_days: u32)->FireSummary {
        self.requested_days.store( n_days, Ordering::Relaxed);
        let (lon,lat) = region.center();
        let hotspots = (0..self.n_hotspots).map( |_| FireHotspot {
            latitude: lat, longitude: lon, brightness: 320.0, confidence: "n".to_string(),
            acq_date: "2025-01-09".to_string(), acq_time: "1100".to_string(), satellite: "N".to_string(), frp: 3.0
        }).collect();
        FireSummary::new( hotspots, FirmsSource::Area)
    }

    async fn copernicus_scenes (&self, _region: &Region, _query: &SceneQuery)->Vec<CopernicusScene> {
        Vec::new()
    }
}

#[tokio::test]
async fn test_analyze_region() {
    let connector = StubConnector::new( true, 6);
    let region = find_region("oltenia").unwrap();

    let analysis = analyze_region( &connector, region, 3).await;
    assert_eq!( connector.requested_days.load( Ordering::Relaxed), 3);
    assert_eq!( analysis.region.id, "oltenia");
    assert_eq!( analysis.fires.count, 6);
    assert_eq!( analysis.indicators.fire_risk, RiskLevel::High);
    assert!( analysis.indicators.vegetation_stress.is_some()); // january NDVI
    assert!( analysis.indicators.flood_risk.is_some());
    assert!( analysis.indicators.overall_risk >= RiskLevel::High);

    let json = serde_json::to_value( &analysis).unwrap();
    println!("{}", serde_json::to_string_pretty(&json).unwrap());
    assert_eq!( json["region"]["bbox"], serde_json::json!([22.3, 43.6, 24.5, 45.2]));
    assert!( json["timestamp"].as_str().unwrap().ends_with('Z'));
    assert_eq!( json["gee"]["source"], "seasonal-estimate");
}

#[tokio::test]
async fn test_analyze_without_gee() {
    let connector = StubConnector::new( false, 1);
    let region = find_region("moldova").unwrap();

    let analysis = analyze_region( &connector, region, 7).await;
    assert!( analysis.gee.is_none());
    assert_eq!( analysis.fires.count, 1);
    assert_eq!( analysis.indicators.fire_risk, RiskLevel::Medium);
    assert_eq!( analysis.indicators.flood_risk, None);
    assert_eq!( analysis.indicators.vegetation_stress, None);
    assert_eq!( analysis.indicators.overall_risk, RiskLevel::Medium);

    let json = serde_json::to_value( &analysis).unwrap();
    assert!( json["gee"].is_null());
}
