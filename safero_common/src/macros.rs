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

#[allow(unused_macros)]

/// macro to flatten nested "if let .." trees. Each arm can optionally specify an `else` block or closure
/// that provides the value (and/or side effect) for a failed match.
///
/// Constraints:
///   - if there is an `else` clause both the match expression and the else clause have to be blocks
///   - non-terminal arms are always separated by ','
///   - `else` closures receive the whole failed match value (e.g. the `Result`), not just the error
///
/// ```ignore
/// let token = if_let! {
///     Some(key) = { service_account_key() } else { None },
///     Ok(jwt) = { create_assertion(&key) } else |e| { warn!("no assertion: {e:?}"); None } => {
///         request_token(jwt).await
///     }
/// };
/// ```
/// expands into:
/// ```ignore
/// let token = if let Some(key) = { service_account_key() } {
///     match { create_assertion(&key) } {
///         Ok(jwt) => { request_token(jwt).await }
///         other => { |e| { warn!("no assertion: {e:?}"); None }(other) }
///     }
/// } else { None };
/// ```
#[macro_export]
macro_rules! if_let {
    //--- the leafs
    { $p:pat = $x:block else $e:block => $r:expr } => {
        if let $p = $x { $r } else $e
    };
    { $p:pat = $x:block else $closure:expr => $r:expr } => {
        match $x {
            $p => { $r }
            other => { $closure( other) }
        }
    };
    { $p:pat = $x:expr => $r:expr } => {
        if let $p = $x { $r }
    };

    //--- the recursive tt munchers
    { $p:pat = $x:block else $e:block , $($ts:tt)+ } => {
        if let $p = $x { $crate::if_let! { $($ts)+ } } else $e
    };
    { $p:pat = $x:block else $closure:expr , $($ts:tt)+ } => {
        match $x {
            $p => { $crate::if_let! { $($ts)+ } }
            other => { $closure( other) } // 'other' is the failed match value, not the error
        }
    };
    { $p:pat = $x:expr , $($ts:tt)+ } => {
        if let $p = $x {
            $crate::if_let! { $($ts)+ }
        }
    };
}
pub use if_let;

/// syntactic sugar macro to define thiserror Error enums:
/// ```ignore
/// define_error!{ pub SaferoNetError =
///   HttpError( #[from] reqwest::Error ) : "http error: {0}",
///   OpFailed(String) : "operation failed: {0}"
/// }
/// ```
/// will get expanded into
/// ```ignore
/// #[derive(thiserror::Error,Debug)]
/// pub enum SaferoNetError {
///     #[error("http error: {0}")]
///     HttpError(#[from] reqwest::Error),
///
///     #[error("operation failed: {0}")]
///     OpFailed(String),
/// }
/// ```
#[macro_export]
macro_rules! define_error {
    ($vis:vis $name:ident = $( $err_variant:ident ( $( $( #[$meta:meta] )? $field_type:ty),* ) : $msg_lit:literal ),*) => {
        #[derive(thiserror::Error,Debug)]
        $vis enum $name {
            $(
                #[error($msg_lit)]
                $err_variant ( $( $(#[$meta])? $field_type ),*  )
            ),*
        }
    }
}
pub use define_error;

/// define a lazily parsed, global command line options struct (using clap derive). The fields get clap `arg`
/// attributes, the struct itself the `command` attributes:
/// ```ignore
/// define_cli! { ARGS [about="show fire hotspots for a region"] =
///     days: u32 [help="number of days", short, long, default_value="1"],
///     region: String [help="region id"]
/// }
/// ...
/// let region = find_region( &ARGS.region);
/// ```
/// Using crates need `clap` and `lazy_static` dependencies
#[macro_export]
macro_rules! define_cli {
    ($name:ident [ $( $sopt:ident $(= $sx:expr)? ),* ] = $( $( #[$meta:meta] )? $fname:ident : $ftype:ty [ $( $fopt:ident $(= $fx:expr)?),* ] ),* ) => {
        use clap::Parser;
        use lazy_static::lazy_static;

        #[derive(Parser,Debug)]
        #[command( $( $sopt $(=$sx)? ),* )]
        struct CliOpts {
            $(
                #[arg( $( $fopt $(=$fx)? ),* )]
                $(#[$meta])?
                $fname : $ftype,
            )*
        }
        lazy_static! { static ref $name: CliOpts = CliOpts::parse(); }
    }
}
pub use define_cli;
