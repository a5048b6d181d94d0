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
use axum::{body::{to_bytes, Body}, http::{Request, StatusCode}, Router};
use chrono::{TimeZone, Utc};
use serde_json::Value;
use tower::ServiceExt;

use safero_hazard::{
    HazardConfig, HazardConnector,
    copernicus::{CopernicusScene, Satellite, SceneQuery},
    firms::{FireHotspot, FireSummary, FirmsSource},
    gee::GeeAnalysis,
    estimate::HazardEstimate,
    regions::Region,
};
use safero_server::{build_router, AppState, ServerConfig};

/// canned provider results. A connector without GEE simulates a failing GEE upstream
struct StubConnector {
    with_gee: bool,
}

#[async_trait]
impl HazardConnector for StubConnector {
    async fn gee_analysis (&self, _region: &Region)->Option<GeeAnalysis> {
        if !self.with_gee { return None }

        let est = HazardEstimate { ndvi_mean: 0.62, ndvi_min: 0.37, ndvi_max: 0.77, flood_percentage: 1.5, water_percentage: 3.2 };
        Some( GeeAnalysis::from_estimate( &est, Utc.with_ymd_and_hms( 2025, 8, 15, 0, 0, 0).unwrap(), false))
    }

    async fn fire_hotspots (&self, region: &Region, _n_days: u32)->FireSummary {
        let (lon,lat) = region.center();
        let hotspot = FireHotspot {
            latitude: lat, longitude: lon, brightness: 335.0, confidence: "h".to_string(),
            acq_date: "2025-08-14".to_string(), acq_time: "1042".to_string(), satellite: "N".to_string(), frp: 8.5
        };
        FireSummary::new( vec![hotspot], FirmsSource::Area)
    }

    async fn copernicus_scenes (&self, _region: &Region, query: &SceneQuery)->Vec<CopernicusScene> {
        vec![ CopernicusScene {
            id: "abc".to_string(),
            name: format!("{}_scene", query.satellite.collection_name()),
            sensing_date: "2025-08-14T09:20:29.024Z".to_string(),
            cloud_cover: if query.satellite.has_cloud_cover() { Some(5.0) } else { None },
            footprint: None,
            online: true,
        }]
    }
}

/// a connector whose GEE provider blows up
struct PanickingConnector;

#[async_trait]
impl HazardConnector for PanickingConnector {
    async fn gee_analysis (&self, _region: &Region)->Option<GeeAnalysis> { panic!("GEE provider exploded") }
    async fn fire_hotspots (&self, _region: &Region, _n_days: u32)->FireSummary { FireSummary::empty( FirmsSource::Open) }
    async fn copernicus_scenes (&self, _region: &Region, _query: &SceneQuery)->Vec<CopernicusScene> { Vec::new() }
}

fn router_with (connector: impl HazardConnector + 'static)->Router {
    let state = AppState::new( Arc::new(connector), Arc::new( HazardConfig::default()));
    build_router( state, &ServerConfig::default())
}

fn router ()->Router {
    router_with( StubConnector { with_gee: true })
}

async fn send (router: Router, req: Request<Body>)->(StatusCode,Value) {
    let response = router.oneshot( req).await.unwrap();
    let status = response.status();
    let bytes = to_bytes( response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice( &bytes).unwrap_or(Value::Null);
    (status, json)
}

async fn get (router: Router, uri: &str)->(StatusCode,Value) {
    send( router, Request::get(uri).body( Body::empty()).unwrap()).await
}

async fn post (router: Router, uri: &str, body: &str)->(StatusCode,Value) {
    let req = Request::post(uri).header("content-type", "application/json").body( Body::from( body.to_string())).unwrap();
    send( router, req).await
}

#[tokio::test]
async fn test_list_regions() {
    let (status, json) = get( router(), "/satellite-data?action=list-regions").await;
    assert_eq!( status, StatusCode::OK);

    let regions = json["regions"].as_array().unwrap();
    assert_eq!( regions.len(), 8);
    assert_eq!( regions[0]["id"], "bucuresti");
    assert_eq!( regions[1]["bbox"], serde_json::json!([28.5, 44.8, 29.7, 45.5]));
}

#[tokio::test]
async fn test_missing_region_id() {
    for action in ["analyze", "gee", "fires", "copernicus"] {
        let (status, json) = post( router(), "/satellite-data", &format!(r#"{{"action":"{action}"}}"#)).await;
        assert_eq!( status, StatusCode::BAD_REQUEST, "action {action}");
        assert_eq!( json["error"], "regionId is required");

        let (status, json) = get( router(), &format!("/?action={action}&regionId=")).await;
        assert_eq!( status, StatusCode::BAD_REQUEST, "action {action}");
        assert_eq!( json["error"], "regionId is required");
    }
}

#[tokio::test]
async fn test_unknown_region() {
    let (status, json) = post( router(), "/satellite-data", r#"{"action":"fires","regionId":"atlantis"}"#).await;
    assert_eq!( status, StatusCode::BAD_REQUEST);
    assert_eq!( json["error"], "Unknown region: atlantis");
}

#[tokio::test]
async fn test_unknown_action() {
    let (status, json) = get( router(), "/satellite-data?action=launch&regionId=banat").await;
    assert_eq!( status, StatusCode::BAD_REQUEST);
    assert_eq!( json["error"], "Unknown action: launch");

    let (status, json) = post( router(), "/satellite-data", r#"{"regionId":"banat"}"#).await;
    assert_eq!( status, StatusCode::BAD_REQUEST);
    assert_eq!( json["error"], "Unknown action: ");
}

#[tokio::test]
async fn test_malformed_body() {
    let (status, json) = post( router(), "/satellite-data", r#"{"action": "analyze", "#).await;
    assert_eq!( status, StatusCode::BAD_REQUEST);
    assert!( json["error"].as_str().unwrap().starts_with("invalid request body"));

    let (status, _) = post( router(), "/satellite-data", r#"{"action":"fires","regionId":"banat","daysBack":"many"}"#).await;
    assert_eq!( status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_empty_post_with_bad_query() {
    let (status, json) = post( router(), "/satellite-data?action=fires&regionId=banat&daysBack=many", "").await;
    assert_eq!( status, StatusCode::BAD_REQUEST);
    assert!( json["error"].as_str().unwrap().starts_with("invalid query"), "{json}");

    let (status, json) = get( router(), "/satellite-data?action=fires&regionId=banat&daysBack=many").await;
    assert_eq!( status, StatusCode::BAD_REQUEST);
    assert!( json["error"].as_str().unwrap().starts_with("invalid query"), "{json}");

    // a valid query still works for empty bodies
    let (status, json) = post( router(), "/satellite-data?action=fires&regionId=banat&daysBack=2", "").await;
    assert_eq!( status, StatusCode::OK);
    assert_eq!( json["region"]["id"], "banat");
}

#[tokio::test]
async fn test_analyze() {
    let (status, json) = post( router(), "/satellite-data", r#"{"action":"analyze","regionId":"dobrogea","daysBack":3}"#).await;
    println!("{}", serde_json::to_string_pretty(&json).unwrap());
    assert_eq!( status, StatusCode::OK);

    assert_eq!( json["region"]["id"], "dobrogea");
    assert_eq!( json["gee"]["ndviMean"], 0.62);
    assert_eq!( json["gee"]["vegetationStress"], "low");
    assert_eq!( json["fires"]["count"], 1);
    assert_eq!( json["indicators"]["fireRisk"], "medium");
    assert_eq!( json["indicators"]["floodRisk"], "low");
    assert_eq!( json["indicators"]["overallRisk"], "medium");
    assert!( json["timestamp"].is_string());
}

#[tokio::test]
async fn test_analyze_without_gee() {
    let (status, json) = get( router_with( StubConnector { with_gee: false }), "/satellite-data?action=analyze&regionId=banat").await;
    assert_eq!( status, StatusCode::OK);

    assert!( json["gee"].is_null());
    assert_eq!( json["fires"]["count"], 1);
    assert_eq!( json["fires"]["hotspots"][0]["confidence"], "h");
    assert_eq!( json["indicators"]["fireRisk"], "medium");
    assert!( json["indicators"]["floodRisk"].is_null());
    assert!( json["indicators"]["vegetationStress"].is_null());
}

#[tokio::test]
async fn test_gee_and_fires() {
    let (status, json) = get( router(), "/satellite-data?action=gee&regionId=moldova").await;
    assert_eq!( status, StatusCode::OK);
    assert_eq!( json["region"]["name"], "Moldova");
    assert_eq!( json["gee"]["floodPercentage"], 1.5);
    assert_eq!( json["gee"]["dataDate"], "2025-08-15");

    let (status, json) = get( router(), "/satellite-data?action=fires&regionId=oltenia&daysBack=2").await;
    assert_eq!( status, StatusCode::OK);
    assert_eq!( json["fireRisk"], "medium");
    assert_eq!( json["fires"]["source"], "firms-area");
    assert_eq!( json["fires"]["totalFrp"], 8.5);
}

#[tokio::test]
async fn test_copernicus() {
    let (status, json) = post( router(), "/", r#"{"action":"copernicus","regionId":"delta-dunarii","satellite":"sentinel-1"}"#).await;
    assert_eq!( status, StatusCode::OK);
    assert_eq!( json["satellite"], "sentinel-1");
    assert_eq!( json["scenes"][0]["name"], "SENTINEL-1_scene");
    assert!( json["scenes"][0]["cloudCover"].is_null());

    let (status, json) = get( router(), "/satellite-data?action=copernicus&regionId=delta-dunarii").await;
    assert_eq!( status, StatusCode::OK);
    assert_eq!( json["satellite"], "sentinel-2");

    let (status, json) = get( router(), "/satellite-data?action=copernicus&regionId=delta-dunarii&satellite=landsat-9").await;
    assert_eq!( status, StatusCode::BAD_REQUEST);
    assert_eq!( json["error"], "Unknown satellite: landsat-9");
}

#[tokio::test]
async fn test_handler_panic() {
    let (status, json) = get( router_with( PanickingConnector), "/satellite-data?action=gee&regionId=banat").await;
    assert_eq!( status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!( json["error"], "GEE provider exploded");
}

#[tokio::test]
async fn test_health() {
    let (status, json) = get( router(), "/health").await;
    assert_eq!( status, StatusCode::OK);
    assert_eq!( json, serde_json::json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_cors() {
    let req = Request::get("/satellite-data?action=list-regions")
        .header("origin", "https://dashboard.example.org")
        .body( Body::empty()).unwrap();
    let response = router().oneshot( req).await.unwrap();
    assert_eq!( response.headers().get("access-control-allow-origin").unwrap(), "*");
}
