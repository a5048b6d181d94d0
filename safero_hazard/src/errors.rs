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

use thiserror::Error;
use safero_common::{net::SaferoNetError, config::SaferoConfigError};

pub type Result<T> = std::result::Result<T, SaferoHazardError>;

#[derive(Error,Debug)]
pub enum SaferoHazardError {
    #[error("net error {0}")]
    NetError( #[from] SaferoNetError),

    #[error("config error {0}")]
    ConfigError( #[from] SaferoConfigError),

    #[error("CSV error {0}")]
    CsvError( #[from] csv::Error),

    #[error("JWT error {0}")]
    JwtError( #[from] jsonwebtoken::errors::Error),

    #[error("serde error {0}")]
    SerdeError( #[from] serde_json::Error),

    #[error("URL error {0}")]
    UrlError( #[from] url::ParseError),

    #[error("missing credentials {0}")]
    MissingCredentials(String),

    #[error("operation failed {0}")]
    OpFailedError(String)
}

macro_rules! op_failed {
    ($fmt:literal $(, $arg:expr )* ) => {
        crate::errors::SaferoHazardError::OpFailedError( format!( $fmt $(, $arg)* ))
    };
}
pub (crate) use op_failed;

macro_rules! missing_credentials {
    ($fmt:literal $(, $arg:expr )* ) => {
        crate::errors::SaferoHazardError::MissingCredentials( format!( $fmt $(, $arg)* ))
    };
}
pub (crate) use missing_credentials;
