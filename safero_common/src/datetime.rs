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

use std::time::Duration;
use chrono::{DateTime, TimeDelta, Utc};
use serde::Serializer;

#[inline] pub fn secs (n: u64)->Duration { Duration::from_secs(n) }

/// this should be used wherever we might have to replace the wall clock (e.g. for replays)
#[inline]
pub fn utc_now()->DateTime<Utc> {
    Utc::now()
}

/// seconds since epoch, as used in JWT claims
#[inline]
pub fn epoch_secs (dt: DateTime<Utc>)->i64 {
    dt.timestamp()
}

/// the start of the day `n_days` before `dt`
pub fn days_before (dt: DateTime<Utc>, n_days: u32)->DateTime<Utc> {
    let d = dt - TimeDelta::days(n_days as i64);
    d.date_naive().and_hms_opt(0, 0, 0).map(|nd| nd.and_utc()).unwrap_or(d)
}

/// yyyy-mm-dd
pub fn ymd (dt: DateTime<Utc>)->String {
    dt.format("%Y-%m-%d").to_string()
}

/// RFC 3339 with millisecond precision and 'Z' suffix, which is what OData and JS clients expect
pub fn rfc3339_millis (dt: DateTime<Utc>)->String {
    dt.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

pub fn ser_rfc3339_millis<S> (dt: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> where S: Serializer {
    s.serialize_str( &rfc3339_millis(*dt))
}
