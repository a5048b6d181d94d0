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

/// the safero backend server. Non-secret settings come from RON configs (`server.ron` and `hazard.ron` in
/// $SAFERO_LOCAL/config if not explicitly given), provider secrets from the environment:
///
///     GEE_SERVICE_ACCOUNT_KEY   - service account JSON for Google Earth Engine
///     NASA_FIRMS_API_KEY        - FIRMS map key (optional, open feeds are used without it)
///     COPERNICUS_CLIENT_ID      - CDSE client credentials (optional)
///     COPERNICUS_CLIENT_SECRET

use std::{net::SocketAddr, path::Path, sync::Arc};
use anyhow::Result;
use tracing::info;

use safero_common::{define_cli, init_tracing};
use safero_hazard::{HazardConfig, live_connector::LiveHazardConnector};
use safero_server::{build_router, spawn_server_task, AppState, ServerConfig};

define_cli! { ARGS [about="safero hazard data server"] =
    server_config: Option<String> [help="path of server RON config", long],
    hazard_config: Option<String> [help="path of hazard provider RON config", long],
    addr: Option<SocketAddr> [help="socket address to listen on (overrides config)", long]
}

#[tokio::main]
async fn main ()->Result<()> {
    init_tracing("info");

    let mut server_config = ServerConfig::load( ARGS.server_config.as_deref().map( Path::new))?;
    if let Some(addr) = ARGS.addr {
        server_config.sock_addr = addr;
    }

    let hazard_config = Arc::new( HazardConfig::load( ARGS.hazard_config.as_deref().map( Path::new))?);
    let connector = LiveHazardConnector::new( hazard_config.clone())?;
    info!( gee_key = connector.has_gee_key(), firms_key = connector.has_firms_key(),
           copernicus_credentials = connector.has_copernicus_credentials(), "provider credentials");

    let router = build_router( AppState::new( Arc::new(connector), hazard_config), &server_config);
    let server_task = spawn_server_task( &server_config, router).await?;

    Ok( server_task.await?? )
}
