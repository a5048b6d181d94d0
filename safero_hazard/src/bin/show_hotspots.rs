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

/// command line tool to retrieve and print the current FIRMS hotspots of a region

use std::path::Path;
use anyhow::{anyhow, Result};
use safero_common::{define_cli, init_tracing, datetime::secs, net::http_client};
use safero_hazard::{HazardConfig, firms::{clamp_days, fetch_hotspots}, regions::find_region, risk::fire_risk};

define_cli! { ARGS [about="show FIRMS fire hotspots for a region"] =
    days: Option<u32> [help="number of days to retrieve (1..10)", short, long],
    config: Option<String> [help="path of RON config file", long],
    region: String [help="region id (e.g. delta-dunarii)"]
}

#[tokio::main]
async fn main ()->Result<()> {
    init_tracing("warn");

    let region = find_region( &ARGS.region).ok_or_else( || anyhow!("unknown region: {}", ARGS.region))?;
    let config = HazardConfig::load( ARGS.config.as_deref().map( Path::new))?;
    let client = http_client( secs( config.http_timeout_secs))?;
    let map_key = config.firms.map_key();

    let fires = fetch_hotspots( &client, &config.firms, map_key.as_deref(), region, clamp_days( ARGS.days)).await;

    for (i,h) in fires.hotspots.iter().enumerate() {
        println!("[{:3}]: {} {:>4} {:9.4},{:9.4}  {:6.1} K  {:6.1} MW  conf: {:>3}  sat: {}",
            i, h.acq_date, h.acq_time, h.latitude, h.longitude, h.brightness, h.frp, h.confidence, h.satellite);
    }
    println!("{} ({:?}): {} hotspots, {} high confidence, total FRP {} MW, fire risk: {}",
        region.name, fires.source, fires.count, fires.high_confidence_count, fires.total_frp, fire_risk(&fires));

    Ok(())
}
