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

//! common utilities shared by the safero crates: error definition macros, geographic bounding boxes,
//! datetime helpers, RON config loading and thin HTTP helpers on top of reqwest

use serde::{Serialize,Deserialize,Serializer};
use num::{Num,ToPrimitive};

pub mod macros;
pub mod datetime;
pub mod config;
pub mod net;

/// install the global fmt subscriber, with the max level taken from RUST_LOG (`default_filter` if not set).
/// Note this only succeeds if there is no global subscriber set yet
pub fn init_tracing (default_filter: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else( |_| tracing_subscriber::EnvFilter::new( default_filter));
    let _ = tracing_subscriber::fmt().with_env_filter( filter).try_init();
}

/// round to given number of decimals. We use this for values that end up in JSON responses
#[inline]
pub fn round_to (x: f64, decimals: i32)->f64 {
    let f = 10f64.powi(decimals);
    (x * f).round() / f
}

/// a generic bounding box without semantics for the coordinate type.
/// For geographic boxes this is [min_lon, min_lat, max_lon, max_lat] in degrees
#[repr(C)]
#[derive(Debug,Copy,Clone,Serialize,Deserialize,PartialEq)]
pub struct BoundingBox <T: Num> {
    pub west: T,
    pub south: T,
    pub east: T,
    pub north: T
}

impl <T: Num + Copy + PartialOrd + ToPrimitive> BoundingBox<T> {
    pub const fn new(west: T, south: T, east: T, north: T)->Self {
        BoundingBox{ west, south, east, north}
    }

    pub fn from_wsen<N> (wsen: &[N;4]) -> BoundingBox<T> where N: Num + Copy + Into<T> {
        BoundingBox::<T>{
            west: wsen[0].into(),
            south: wsen[1].into(),
            east: wsen[2].into(),
            north: wsen[3].into()
        }
    }

    pub fn to_minmax_array (&self) -> [T;4] {
        [self.west,self.south,self.east,self.north]
    }

    pub fn center (&self) -> (f64,f64) {
        let x = self.west.to_f64().unwrap_or(f64::NAN) + self.east.to_f64().unwrap_or(f64::NAN);
        let y = self.south.to_f64().unwrap_or(f64::NAN) + self.north.to_f64().unwrap_or(f64::NAN);
        ( x / 2.0, y / 2.0 )
    }

    /// boundaries are inclusive
    pub fn contains (&self, x: T, y: T) -> bool {
        x >= self.west && x <= self.east && y >= self.south && y <= self.north
    }

    /// a new box that is grown by `margin` on each side
    pub fn expanded (&self, margin: T) -> Self {
        BoundingBox {
            west: self.west - margin,
            south: self.south - margin,
            east: self.east + margin,
            north: self.north + margin
        }
    }
}

/// serde `serialize_with` function to write bounding boxes as `[west,south,east,north]` arrays
pub fn ser_wsen<S,T> (bbox: &BoundingBox<T>, s: S) -> Result<S::Ok, S::Error>
    where S: Serializer, T: Num + Copy + PartialOrd + ToPrimitive + Serialize
{
    bbox.to_minmax_array().serialize(s)
}

/// a simple incremental min/max/avg accumulator
#[derive(Debug)]
pub struct MinMaxAvg {
    pub n: usize,
    pub min: f64,
    pub max: f64,
    pub avg: f64
}

impl MinMaxAvg {
    pub fn new()->Self { MinMaxAvg { n: 0, min: f64::MAX, max: f64::MIN, avg: f64::NAN } }

    /// add a new observation
    pub fn add (&mut self, x: f64) {
        self.n += 1;

        if self.n > 1 {
            self.avg = self.avg + (x - self.avg) / self.n as f64;
            if x < self.min { self.min = x }
            if x > self.max { self.max = x }
        } else {
            self.min = x;
            self.max = x;
            self.avg = x;
        }
    }
}
