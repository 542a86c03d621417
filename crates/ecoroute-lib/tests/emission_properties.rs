mod common;

use proptest::prelude::*;

use common::diesel_truck;
use ecoroute_lib::emission::weather_multiplier;
use ecoroute_lib::{EmissionCalculator, Observations};

fn weather(precipitation: f64, wind_speed: f64) -> Observations {
    Observations::from([
        ("precipitation".to_string(), precipitation),
        ("wind_speed".to_string(), wind_speed),
    ])
}

proptest! {
    #[test]
    fn emissions_never_decrease_with_distance(
        shorter in 0.0f64..5_000.0,
        extra in 0.0f64..5_000.0,
        load in 0.0f64..1_000.0,
        precipitation in 0.0f64..50.0,
        wind_speed in 0.0f64..60.0,
    ) {
        let calc = EmissionCalculator::default();
        let vehicle = diesel_truck(1_000.0, load);
        let conditions = weather(precipitation, wind_speed);

        let near = calc.calculate_emissions(&vehicle, shorter, &conditions).unwrap();
        let far = calc.calculate_emissions(&vehicle, shorter + extra, &conditions).unwrap();
        prop_assert!(far >= near);
    }

    #[test]
    fn weather_multiplier_stays_in_range(
        precipitation in -10.0f64..100.0,
        wind_speed in -10.0f64..100.0,
    ) {
        let multiplier = weather_multiplier(&weather(precipitation, wind_speed));
        prop_assert!((1.0..=1.265 + 1e-12).contains(&multiplier));
    }

    #[test]
    fn load_scales_between_one_and_one_point_two(load in 0.0f64..=1_000.0) {
        let calc = EmissionCalculator::default();
        let kg = calc
            .calculate_emissions(&diesel_truck(1_000.0, load), 100.0, &Observations::new())
            .unwrap();
        prop_assert!(kg >= 90.0 - 1e-9);
        prop_assert!(kg <= 108.0 + 1e-9);
    }
}
