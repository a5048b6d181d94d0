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

//! the fixed set of Romanian regions the dashboard reports on

use serde::Serialize;
use safero_common::{BoundingBox, ser_wsen};

/// a named region with its geographic extent [min_lon, min_lat, max_lon, max_lat] in degrees
#[derive(Debug,Clone,Copy,Serialize,PartialEq)]
pub struct Region {
    pub id: &'static str,
    pub name: &'static str,
    #[serde(serialize_with = "ser_wsen")]
    pub bbox: BoundingBox<f64>,
}

/// regions with a center latitude at or above this are treated as mountain / plateau terrain with lower vegetation index
pub const MOUNTAIN_LATITUDE: f64 = 46.5;

impl Region {
    const fn new (id: &'static str, name: &'static str, wsen: [f64;4])->Self {
        Region { id, name, bbox: BoundingBox::new( wsen[0], wsen[1], wsen[2], wsen[3]) }
    }

    /// (lon,lat) in degrees
    pub fn center (&self)->(f64,f64) {
        self.bbox.center()
    }

    pub fn is_mountain (&self)->bool {
        self.center().1 >= MOUNTAIN_LATITUDE
    }

    /// closed WKT polygon of the bounding box (counter-clockwise, starting at the south-west corner)
    pub fn polygon_wkt (&self)->String {
        let BoundingBox{west:w, south:s, east:e, north:n} = self.bbox;
        format!("POLYGON(({w} {s},{e} {s},{e} {n},{w} {n},{w} {s}))")
    }
}

pub static REGIONS: [Region;8] = [
    Region::new( "bucuresti",     "București-Ilfov", [25.8, 44.2, 26.5, 44.8]),
    Region::new( "delta-dunarii", "Delta Dunării",   [28.5, 44.8, 29.7, 45.5]),
    Region::new( "banat",         "Banat",           [20.5, 45.2, 22.5, 46.2]),
    Region::new( "moldova",       "Moldova",         [26.5, 46.5, 28.2, 47.7]),
    Region::new( "transilvania",  "Transilvania",    [22.8, 46.2, 24.5, 47.2]),
    Region::new( "oltenia",       "Oltenia",         [22.3, 43.6, 24.5, 45.2]),
    Region::new( "dobrogea",      "Dobrogea",        [27.2, 43.7, 29.0, 44.8]),
    Region::new( "maramures",     "Maramureș",       [22.8, 47.3, 25.0, 48.1]),
];

pub fn all_regions ()->&'static [Region] {
    &REGIONS
}

pub fn find_region (id: &str)->Option<&'static Region> {
    REGIONS.iter().find( |r| r.id == id)
}
