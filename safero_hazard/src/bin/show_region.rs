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

/// command line tool to run the full hazard analysis of a region (or list the known regions)

use std::{path::Path, sync::Arc};
use anyhow::{anyhow, Result};
use safero_common::{define_cli, init_tracing};
use safero_hazard::{
    analyze_region, HazardConfig,
    firms::clamp_days, live_connector::LiveHazardConnector, regions::{all_regions, find_region}
};

define_cli! { ARGS [about="show the hazard analysis for a region"] =
    days: Option<u32> [help="number of days of fire hotspots (1..10)", short, long],
    config: Option<String> [help="path of RON config file", long],
    region: Option<String> [help="region id - lists all regions if omitted"]
}

#[tokio::main]
async fn main ()->Result<()> {
    init_tracing("warn");

    let Some(region_id) = &ARGS.region else {
        for r in all_regions() {
            let (lon,lat) = r.center();
            println!("{:14} {:18} center: {:.2},{:.2}  mountain: {}", r.id, r.name, lat, lon, r.is_mountain());
        }
        return Ok(())
    };

    let region = find_region( region_id).ok_or_else( || anyhow!("unknown region: {region_id}"))?;
    let config = Arc::new( HazardConfig::load( ARGS.config.as_deref().map( Path::new))?);
    let connector = LiveHazardConnector::new( config)?;

    let analysis = analyze_region( &connector, region, clamp_days( ARGS.days)).await;
    println!("{}", serde_json::to_string_pretty( &analysis)?);

    Ok(())
}
