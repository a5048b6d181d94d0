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

//! the action dispatcher. Requests name an `action` and (except for `list-regions`) a `regionId`:
//!
//! | action         | response                                       |
//! |----------------|------------------------------------------------|
//! | list-regions   | `{regions}`                                    |
//! | analyze        | `{region, gee, fires, indicators, timestamp}`  |
//! | gee            | `{region, gee, timestamp}`                     |
//! | fires          | `{region, fires, fireRisk, timestamp}`         |
//! | copernicus     | `{region, satellite, scenes, timestamp}`       |
//!
//! Invalid requests are answered with 400 and an `{"error": <msg>}` body

use std::str::FromStr;
use axum::{extract::{Query, State}, response::{IntoResponse, Response}, Json};
use bytes::Bytes;
use http::{StatusCode, Uri};
use chrono::{DateTime, Utc};
use serde::{Serialize,Deserialize};
use strum::EnumString;
use thiserror::Error;
use tracing::{info,warn};

use safero_common::datetime::{ser_rfc3339_millis, utc_now};
use safero_hazard::{
    analyze_region,
    copernicus::{CopernicusScene, Satellite, SceneQuery},
    firms::{clamp_days, FireSummary},
    gee::GeeAnalysis,
    regions::{all_regions, find_region, Region},
    risk::{fire_risk, RiskLevel},
};

use crate::AppState;

/// the parameters of an action request, either from the query string (GET) or from a JSON body (POST)
#[derive(Debug,Clone,Default,PartialEq,Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionRequest {
    pub action: Option<String>,
    pub region_id: Option<String>,
    pub days_back: Option<u32>,
    pub max_cloud_cover: Option<f64>,
    pub satellite: Option<String>,
}

#[derive(Debug,Clone,Copy,PartialEq,Eq,EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum Action {
    ListRegions,
    Analyze,
    Gee,
    Fires,
    Copernicus,
}

#[derive(Error,Debug)]
pub enum ActionError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Internal(String),
}

impl ActionError {
    pub fn status (&self)->StatusCode {
        match self {
            ActionError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ActionError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ActionError {
    fn into_response (self)->Response {
        let status = self.status();
        (status, Json( serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

type ActionResult = std::result::Result<Response, ActionError>;

/* #region response types ************************************************************************************/

#[derive(Debug,Serialize)]
pub struct RegionList {
    pub regions: &'static [Region],
}

#[derive(Debug,Serialize)]
pub struct GeeResponse {
    pub region: Region,
    pub gee: Option<GeeAnalysis>,
    #[serde(serialize_with = "ser_rfc3339_millis")]
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug,Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FiresResponse {
    pub region: Region,
    pub fires: FireSummary,
    pub fire_risk: RiskLevel,
    #[serde(serialize_with = "ser_rfc3339_millis")]
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug,Serialize)]
pub struct CopernicusResponse {
    pub region: Region,
    pub satellite: String,
    pub scenes: Vec<CopernicusScene>,
    #[serde(serialize_with = "ser_rfc3339_millis")]
    pub timestamp: DateTime<Utc>,
}

/* #endregion response types */

pub async fn get_action_handler (State(state): State<AppState>, uri: Uri)->ActionResult {
    dispatch( &state, query_request( &uri)?).await
}

/// POST requests carry their parameters as JSON. An empty body falls back to the query string
pub async fn post_action_handler (State(state): State<AppState>, uri: Uri, body: Bytes)->ActionResult {
    let req = if body.iter().all( u8::is_ascii_whitespace) {
        query_request( &uri)?
    } else {
        serde_json::from_slice::<ActionRequest>( &body)
            .map_err( |e| ActionError::BadRequest( format!("invalid request body: {e}")))?
    };
    dispatch( &state, req).await
}

fn query_request (uri: &Uri)->Result<ActionRequest, ActionError> {
    Query::<ActionRequest>::try_from_uri( uri)
        .map( |Query(req)| req)
        .map_err( |e| ActionError::BadRequest( format!("invalid query: {}", e.body_text())))
}

pub async fn dispatch (state: &AppState, req: ActionRequest)->ActionResult {
    let action_name = req.action.as_deref().unwrap_or_default();
    let action = Action::from_str( action_name)
        .map_err( |_| ActionError::BadRequest( format!("Unknown action: {action_name}")))?;

    if action == Action::ListRegions {
        return Ok( Json( RegionList { regions: all_regions() }).into_response())
    }

    let region = required_region( &req)?;
    let n_days = clamp_days( req.days_back);
    info!("{action_name} {} ({n_days} days)", region.id);

    let response = match action {
        Action::Analyze => {
            Json( analyze_region( state.connector.as_ref(), region, n_days).await).into_response()
        }
        Action::Gee => {
            let gee = state.connector.gee_analysis( region).await;
            if gee.is_none() { warn!("no GEE analysis for {}", region.id) }
            Json( GeeResponse { region: *region, gee, timestamp: utc_now() }).into_response()
        }
        Action::Fires => {
            let fires = state.connector.fire_hotspots( region, n_days).await;
            let fire_risk = fire_risk( &fires);
            Json( FiresResponse { region: *region, fires, fire_risk, timestamp: utc_now() }).into_response()
        }
        Action::Copernicus => {
            let satellite = parse_satellite( req.satellite.as_deref())?;
            let query = SceneQuery::new( satellite, n_days, req.max_cloud_cover, &state.config.copernicus);
            let scenes = state.connector.copernicus_scenes( region, &query).await;
            Json( CopernicusResponse { region: *region, satellite: query.satellite.to_string(), scenes, timestamp: utc_now() }).into_response()
        }
        Action::ListRegions => Json( RegionList { regions: all_regions() }).into_response()
    };

    Ok(response)
}

fn required_region (req: &ActionRequest)->Result<&'static Region, ActionError> {
    match req.region_id.as_deref().map( str::trim) {
        None | Some("") => Err( ActionError::BadRequest( "regionId is required".to_string())),
        Some(id) => find_region( id).ok_or_else( || ActionError::BadRequest( format!("Unknown region: {id}")))
    }
}

fn parse_satellite (satellite: Option<&str>)->Result<Option<Satellite>, ActionError> {
    satellite
        .map( |s| Satellite::from_str(s).map_err( |_| ActionError::BadRequest( format!("Unknown satellite: {s}"))))
        .transpose()
}
