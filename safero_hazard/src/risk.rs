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

//! categorical risk levels derived from hotspot counts, flood percentages and NDVI.
//! These are fixed threshold tables - there is no calibration involved

use serde::{Serialize,Deserialize};
use strum::{Display, EnumString};

use crate::{firms::FireSummary, gee::GeeAnalysis};

/// ordinal risk level (low < medium < high < critical)
#[derive(Debug,Clone,Copy,PartialEq,Eq,PartialOrd,Ord,Hash,Serialize,Deserialize,Display,EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical
}

//--- fire thresholds
pub const FIRE_CRITICAL_COUNT: usize = 10;
pub const FIRE_CRITICAL_TOTAL_FRP: f64 = 100.0; // MW, exclusive
pub const FIRE_HIGH_COUNT: usize = 5;
pub const FIRE_HIGH_CONFIDENCE_COUNT: usize = 3;

//--- flood thresholds (percent of region area)
pub const FLOOD_CRITICAL_PERCENT: f64 = 10.0;
pub const FLOOD_HIGH_PERCENT: f64 = 5.0;
pub const FLOOD_MEDIUM_PERCENT: f64 = 2.0;

//--- vegetation thresholds (mean NDVI), stress increases as NDVI decreases
pub const NDVI_LOW_STRESS: f64 = 0.5;
pub const NDVI_MEDIUM_STRESS: f64 = 0.35;
pub const NDVI_HIGH_STRESS: f64 = 0.2;

pub fn classify_fire_risk (count: usize, high_confidence_count: usize, total_frp: f64)->RiskLevel {
    if count == 0 {
        RiskLevel::Low
    } else if count >= FIRE_CRITICAL_COUNT || total_frp > FIRE_CRITICAL_TOTAL_FRP {
        RiskLevel::Critical
    } else if count >= FIRE_HIGH_COUNT || high_confidence_count >= FIRE_HIGH_CONFIDENCE_COUNT {
        RiskLevel::High
    } else {
        RiskLevel::Medium
    }
}

pub fn fire_risk (fires: &FireSummary)->RiskLevel {
    classify_fire_risk( fires.count, fires.high_confidence_count, fires.total_frp)
}

pub fn classify_flood_risk (flood_percentage: f64)->RiskLevel {
    if flood_percentage >= FLOOD_CRITICAL_PERCENT { RiskLevel::Critical }
    else if flood_percentage >= FLOOD_HIGH_PERCENT { RiskLevel::High }
    else if flood_percentage >= FLOOD_MEDIUM_PERCENT { RiskLevel::Medium }
    else { RiskLevel::Low }
}

pub fn classify_vegetation_stress (ndvi_mean: f64)->RiskLevel {
    if ndvi_mean >= NDVI_LOW_STRESS { RiskLevel::Low }
    else if ndvi_mean >= NDVI_MEDIUM_STRESS { RiskLevel::Medium }
    else if ndvi_mean >= NDVI_HIGH_STRESS { RiskLevel::High }
    else { RiskLevel::Critical }
}

/// the aggregate we report per region. Flood and vegetation levels are only known if we have a GEE analysis
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HazardIndicators {
    pub fire_risk: RiskLevel,
    pub flood_risk: Option<RiskLevel>,
    pub vegetation_stress: Option<RiskLevel>,
    pub overall_risk: RiskLevel,
}

pub fn classify_hazards (gee: Option<&GeeAnalysis>, fires: &FireSummary)->HazardIndicators {
    let fire_risk = fire_risk(fires);
    let flood_risk = gee.and_then( |g| g.flood_percentage).map( classify_flood_risk);
    let vegetation_stress = gee.and_then( |g| g.ndvi_mean).map( classify_vegetation_stress);

    let overall_risk = [Some(fire_risk), flood_risk, vegetation_stress].into_iter()
        .flatten()
        .max()
        .unwrap_or(RiskLevel::Low);

    HazardIndicators { fire_risk, flood_risk, vegetation_stress, overall_risk }
}
