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

use safero_common::{BoundingBox, MinMaxAvg, round_to};

// run with "cargo test -p safero_common --test test_bbox -- --nocapture"

#[test]
fn test_contains_inclusive() {
    let bbox = BoundingBox::<f64>::new( 25.8, 44.2, 26.5, 44.8);

    assert!( bbox.contains( 26.1, 44.4));
    assert!( bbox.contains( 25.8, 44.2)); // corners are inside
    assert!( bbox.contains( 26.5, 44.8));
    assert!( !bbox.contains( 26.6, 44.4));
    assert!( !bbox.contains( 26.1, 44.1));
}

#[test]
fn test_expanded() {
    let bbox = BoundingBox::<f64>::from_wsen( &[28.5, 44.8, 29.7, 45.5]);
    let outer = bbox.expanded( 0.5);
    println!("expanded: {:?}", outer);

    assert_eq!( outer.to_minmax_array(), [28.0, 44.3, 30.2, 46.0]);
    assert!( !bbox.contains( 28.2, 44.5));
    assert!( outer.contains( 28.2, 44.5));
}

#[test]
fn test_center() {
    let bbox = BoundingBox::<f64>::new( 22.0, 46.0, 24.0, 47.0);
    assert_eq!( bbox.center(), (23.0, 46.5));
}

#[test]
fn test_min_max_avg() {
    let mut mma = MinMaxAvg::new();
    for x in [4.0, 1.0, 7.0] { mma.add(x) }

    assert_eq!( mma.n, 3);
    assert_eq!( mma.min, 1.0);
    assert_eq!( mma.max, 7.0);
    assert!( (mma.avg - 4.0).abs() < 1e-9);
}

#[test]
fn test_round_to() {
    assert_eq!( round_to( 3.14159, 2), 3.14);
    assert_eq!( round_to( 2.005, 0), 2.0);
}
