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

//! seasonal / geographic estimator for NDVI and flood statistics.
//!
//! NOTE - this is a placeholder for genuine Earth Engine pixel computation, which is not practical over the REST API.
//! NDVI and flood values are drawn from month-keyed ranges and adjusted for terrain. They are plausible, not measured,
//! and this holds regardless of whether GEE authentication succeeded.

use std::ops::Range;
use chrono::{DateTime, Datelike, Utc};
use rand::Rng;
use serde::{Serialize,Deserialize};
use safero_common::round_to;

use crate::regions::Region;

pub const MOUNTAIN_NDVI_OFFSET: f64 = 0.05;
pub const NDVI_MIN_OFFSET: f64 = 0.25;
pub const NDVI_MAX_OFFSET: f64 = 0.15;

/// regions with large permanent water surfaces
const WETLAND_REGIONS: &[&str] = &["delta-dunarii"];

#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct HazardEstimate {
    pub ndvi_mean: f64,
    pub ndvi_min: f64,
    pub ndvi_max: f64,
    pub flood_percentage: f64,
    pub water_percentage: f64,
}

/// range of the mean NDVI for the given calendar month (1..=12). Summer is high, winter is low
pub fn ndvi_range_for_month (month: u32)->Range<f64> {
    match month {
        6..=8       => 0.55..0.75,
        5 | 9       => 0.45..0.65,
        4 | 10      => 0.30..0.50,
        3 | 11      => 0.20..0.35,
        _           => 0.10..0.25, // Dec - Feb
    }
}

#[inline]
pub fn is_spring (month: u32)->bool {
    (3..=5).contains(&month)
}

pub fn flood_baseline_range ()->Range<f64> { 0.5..3.0 }
pub fn spring_flood_boost_range ()->Range<f64> { 2.0..6.0 }

pub fn permanent_water_range (region: &Region)->Range<f64> {
    if WETLAND_REGIONS.contains( &region.id) { 15.0..25.0 } else { 1.0..4.0 }
}

/// estimate NDVI and flood statistics for `region` at `date`. Randomness comes from `rng` so that callers
/// (and tests) can control it
pub fn estimate_hazards<R: Rng> (region: &Region, date: DateTime<Utc>, rng: &mut R)->HazardEstimate {
    let month = date.month();

    let mut ndvi_mean = rng.random_range( ndvi_range_for_month(month));
    if region.is_mountain() {
        ndvi_mean -= MOUNTAIN_NDVI_OFFSET;
    }
    let ndvi_min = clamp_ndvi( ndvi_mean - NDVI_MIN_OFFSET);
    let ndvi_max = clamp_ndvi( ndvi_mean + NDVI_MAX_OFFSET);
    let ndvi_mean = clamp_ndvi( ndvi_mean);

    let mut flood_percentage = rng.random_range( flood_baseline_range());
    if is_spring(month) {
        flood_percentage += rng.random_range( spring_flood_boost_range());
    }
    let water_percentage = clamp_percent( flood_percentage + rng.random_range( permanent_water_range(region)));
    let flood_percentage = clamp_percent( flood_percentage);

    HazardEstimate { ndvi_mean, ndvi_min, ndvi_max, flood_percentage, water_percentage }
}

fn clamp_ndvi (v: f64)->f64 {
    round_to( v.clamp( -1.0, 1.0), 3)
}

fn clamp_percent (v: f64)->f64 {
    round_to( v.clamp( 0.0, 100.0), 2)
}
