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

//! the HTTP front of safero: a single action endpoint the dashboard posts its requests to.
//!
//!    GET  <host>:<port>/satellite-data?action=<action>&regionId=<id>[&daysBack=<n>][&satellite=<sat>][&maxCloudCover=<pct>]
//!    POST <host>:<port>/satellite-data   {"action": .., "regionId": .., ..}
//!
//! The endpoint is also mounted at '/'. See [action] for the supported actions

use std::{any::Any, net::SocketAddr, path::Path, sync::Arc, time::Duration};
use axum::{response::{IntoResponse, Response}, routing::get, Json, Router};
use serde::{Serialize,Deserialize};
use tokio::{net::TcpListener, task::JoinHandle};
use tower::ServiceBuilder;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{error,info};

use safero_common::{config::load_config_or_default, datetime::secs};
use safero_hazard::{HazardConfig, HazardConnector};

pub mod errors;
pub mod action;

use errors::SaferoServerResult;
use action::{get_action_handler, post_action_handler, ActionError};

pub const CONFIG_ID: &str = "server";

#[derive(Deserialize,Serialize,Debug,Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub sock_addr: SocketAddr,
    pub request_timeout_secs: u64, // upper bound for the whole request, including upstream provider calls
}

impl Default for ServerConfig {
    fn default()->Self {
        ServerConfig {
            sock_addr: SocketAddr::from(([0,0,0,0], 8080)),
            request_timeout_secs: 60,
        }
    }
}

impl ServerConfig {
    pub fn load (path: Option<&Path>)->SaferoServerResult<Self> {
        Ok( load_config_or_default( path, CONFIG_ID)? )
    }

    pub fn url (&self)->String {
        format!("http://{}", self.sock_addr)
    }

    pub fn request_timeout (&self)->Duration {
        secs( self.request_timeout_secs)
    }
}

/// what our handlers share. Both parts are immutable, requests are independent of each other
#[derive(Clone)]
pub struct AppState {
    pub connector: Arc<dyn HazardConnector>,
    pub config: Arc<HazardConfig>,
}

impl AppState {
    pub fn new (connector: Arc<dyn HazardConnector>, config: Arc<HazardConfig>)->Self {
        AppState { connector, config }
    }
}

pub fn build_router (state: AppState, config: &ServerConfig)->Router {
    Router::new()
        .route( "/satellite-data", get( get_action_handler).post( post_action_handler))
        .route( "/", get( get_action_handler).post( post_action_handler))
        .route( "/health", get( health_handler))
        .with_state( state)
        .layer(
            ServiceBuilder::new()
                .layer( TraceLayer::new_for_http())
                .layer( CatchPanicLayer::custom( panic_response))
                .layer( TimeoutLayer::new( config.request_timeout()))
        )
        .layer( CorsLayer::permissive()) // outermost; the dashboard is served from a different origin
}

async fn health_handler ()->Json<serde_json::Value> {
    Json( serde_json::json!({ "status": "ok" }))
}

fn panic_response (err: Box<dyn Any + Send + 'static>)->Response {
    let msg = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown internal error".to_string()
    };
    error!("request handler panicked: {msg}");

    ActionError::Internal(msg).into_response()
}

/// bind to the configured socket address and serve `router` until ctrl-c is received
pub async fn spawn_server_task (config: &ServerConfig, router: Router)->SaferoServerResult<JoinHandle<std::io::Result<()>>> {
    let listener = TcpListener::bind( config.sock_addr).await?;
    info!("serving http://{}", listener.local_addr()?);

    Ok( tokio::spawn( async move {
        axum::serve( listener, router)
            .with_graceful_shutdown( async { let _ = tokio::signal::ctrl_c().await; })
            .await
    }))
}
