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

//! RON config lookup and environment provided secrets.
//!
//! Non-secret settings (endpoints, default sources, timeouts) are kept in RON files. Secrets such as the
//! GEE service account key or the FIRMS map key are only read from environment variables so that they never
//! end up in config files that get checked in or deployed with the binary.

use std::{fs::File, io::Read, path::{Path,PathBuf}};
use serde::de::DeserializeOwned;
use tracing::{debug,warn};

use crate::define_error;

define_error!{ pub SaferoConfigError =
    IOError(#[from] std::io::Error) : "IO error: {0}",
    ConfigFileNotFound(String) : "config file not found: {0}",
    ConfigParseError(String) : "config parse error: {0}"
}

pub type Result<T> = std::result::Result<T, SaferoConfigError>;

/// load a RON config from the given path
pub fn load_config <C: DeserializeOwned> (path: impl AsRef<Path>)->Result<C> {
    let path = path.as_ref();
    if path.is_file() {
        let mut file = File::open(path)?;
        let len = file.metadata()?.len();
        let mut contents = String::with_capacity(len as usize);
        file.read_to_string(&mut contents)?;
        config_from_str( &contents)
    } else {
        Err( SaferoConfigError::ConfigFileNotFound( path.to_string_lossy().to_string()) )
    }
}

pub fn config_from_str <C: DeserializeOwned> (src: &str)->Result<C> {
    ron::from_str::<C>(src).map_err(|e| SaferoConfigError::ConfigParseError(e.to_string()))
}

/// look up «local-root»/config/«id».ron, with local-root taken from the SAFERO_LOCAL env var or ./local as a fallback
pub fn local_config_path (id: &str)->PathBuf {
    let local_root = std::env::var("SAFERO_LOCAL").unwrap_or_else(|_| "./local".to_string());
    Path::new(&local_root).join("config").join( format!("{id}.ron"))
}

/// load config from an explicit path, from the local config dir, or fall back to the config type's default.
/// A config that exists but does not parse is an error - we don't want to silently run with defaults in that case
pub fn load_config_or_default <C: DeserializeOwned + Default> (path: Option<&Path>, id: &str)->Result<C> {
    match path {
        Some(path) => load_config(path),
        None => {
            let path = local_config_path(id);
            if path.is_file() {
                debug!("loading config {:?}", path);
                load_config(&path)
            } else {
                debug!("no config {:?}, using defaults", path);
                Ok(C::default())
            }
        }
    }
}

/// get a non-empty secret from the environment. Missing or blank values are both treated as not configured
pub fn env_secret (var: &str)->Option<String> {
    match std::env::var(var) {
        Ok(s) if !s.trim().is_empty() => Some(s),
        Ok(_) => {
            warn!("environment variable {var} is set but empty");
            None
        }
        Err(_) => None
    }
}
