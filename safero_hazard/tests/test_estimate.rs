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

use chrono::{DateTime, TimeZone, Utc};
use rand::{rngs::StdRng, SeedableRng};
use safero_hazard::{
    estimate::{estimate_hazards, ndvi_range_for_month},
    gee::{GeeAnalysis, SOURCE_GEE_ESTIMATE, SOURCE_SEASONAL_ESTIMATE},
    regions::{all_regions, find_region},
    risk::RiskLevel,
};

fn date (month: u32)->DateTime<Utc> {
    Utc.with_ymd_and_hms( 2025, month, 15, 12, 0, 0).unwrap()
}

#[test]
fn test_summer_vs_winter_ndvi() {
    let region = find_region("oltenia").unwrap(); // lowland
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..200 {
        let june = estimate_hazards( region, date(6), &mut rng);
        assert!( june.ndvi_mean >= 0.55 && june.ndvi_mean <= 0.75, "june NDVI {}", june.ndvi_mean);

        let january = estimate_hazards( region, date(1), &mut rng);
        assert!( january.ndvi_mean >= 0.10 && january.ndvi_mean <= 0.25, "january NDVI {}", january.ndvi_mean);

        assert!( june.ndvi_mean > january.ndvi_mean);
    }
}

#[test]
fn test_mountain_offset() {
    let region = find_region("maramures").unwrap();
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..200 {
        let est = estimate_hazards( region, date(7), &mut rng);
        assert!( est.ndvi_mean >= 0.50 && est.ndvi_mean <= 0.70, "mountain NDVI {}", est.ndvi_mean);
    }
}

#[test]
fn test_ndvi_bounds() {
    let mut rng = StdRng::seed_from_u64(1);

    for region in all_regions() {
        for month in 1..=12 {
            let est = estimate_hazards( region, date(month), &mut rng);
            for v in [est.ndvi_mean, est.ndvi_min, est.ndvi_max] {
                assert!( (-1.0..=1.0).contains(&v));
            }
            assert!( est.ndvi_min <= est.ndvi_mean && est.ndvi_mean <= est.ndvi_max);
            assert!( (0.0..=100.0).contains(&est.flood_percentage));
            assert!( est.water_percentage >= est.flood_percentage);
        }
    }
}

#[test]
fn test_month_ranges() {
    assert_eq!( ndvi_range_for_month(7), 0.55..0.75);
    assert_eq!( ndvi_range_for_month(9), 0.45..0.65);
    assert_eq!( ndvi_range_for_month(4), 0.30..0.50);
    assert_eq!( ndvi_range_for_month(11), 0.20..0.35);
    assert_eq!( ndvi_range_for_month(12), 0.10..0.25);
}

#[test]
fn test_spring_floods_and_wetlands() {
    let delta = find_region("delta-dunarii").unwrap();
    let banat = find_region("banat").unwrap();
    let mut rng = StdRng::seed_from_u64(2025);

    for _ in 0..200 {
        let april = estimate_hazards( banat, date(4), &mut rng);
        assert!( april.flood_percentage >= 2.5 && april.flood_percentage <= 9.0, "april flood {}", april.flood_percentage);

        let august = estimate_hazards( banat, date(8), &mut rng);
        assert!( august.flood_percentage >= 0.5 && august.flood_percentage <= 3.0, "august flood {}", august.flood_percentage);
        assert!( august.water_percentage <= 7.0);

        let delta_water = estimate_hazards( delta, date(8), &mut rng).water_percentage;
        assert!( delta_water >= 15.5 && delta_water <= 28.0, "delta water {delta_water}");
    }
}

#[test]
fn test_deterministic_with_seed() {
    let region = find_region("bucuresti").unwrap();
    let a = estimate_hazards( region, date(5), &mut StdRng::seed_from_u64(99));
    let b = estimate_hazards( region, date(5), &mut StdRng::seed_from_u64(99));
    assert_eq!( a, b);
}

#[test]
fn test_analysis_from_estimate() {
    let region = find_region("dobrogea").unwrap();
    let est = estimate_hazards( region, date(1), &mut StdRng::seed_from_u64(3));

    let analysis = GeeAnalysis::from_estimate( &est, date(1), false);
    assert_eq!( analysis.source, SOURCE_SEASONAL_ESTIMATE);
    assert_eq!( analysis.data_date, "2025-01-15");
    assert_eq!( analysis.ndvi_mean, Some(est.ndvi_mean));
    assert!( analysis.vegetation_stress >= Some(RiskLevel::High)); // winter NDVI is below 0.35

    let analysis = GeeAnalysis::from_estimate( &est, date(1), true);
    assert_eq!( analysis.source, SOURCE_GEE_ESTIMATE);

    let json = serde_json::to_value( &analysis).unwrap();
    assert!( json.get("ndviMean").is_some());
    assert!( json.get("floodPercentage").is_some());
    assert_eq!( json["connected"], true);
}
