use approx::assert_abs_diff_eq;
use orbit_light::orbit::EARTH_RADIUS_KM;
use orbit_light::{
    discretize, Attitude, EngineOptions, Evaluation, Light, Occluder, Orbit, OrbitConfig,
    OrbitModel, Polygon, Resolution, Sphere, SurfaceSpec, TimeGrid, Vector3, PI,
};

/// A 1 m x 1 m panel (in km) in the body YZ plane, facing +X
fn panel(facing_planet: bool) -> orbit_light::Patch {
    let h = 0.0005;
    let mut corners = vec![
        Vector3::new(0., -h, -h),
        Vector3::new(0., h, -h),
        Vector3::new(0., h, h),
        Vector3::new(0., -h, h),
    ];
    if facing_planet {
        corners.reverse();
    }
    let polygon = Polygon::new(corners).unwrap();
    discretize(&SurfaceSpec::Polygon(polygon), Resolution::Grid(1)).unwrap()
}

fn earth() -> Occluder {
    Occluder::Sphere(Sphere::new(Vector3::zeros(), EARTH_RADIUS_KM).unwrap())
}

fn leo(attitude: Attitude, facing_planet: bool) -> OrbitModel {
    let orbit = Orbit::new(&OrbitConfig::earth(300.0)).unwrap();
    OrbitModel::new(orbit, panel(facing_planet), attitude, EngineOptions::default()).unwrap()
}

fn sunlight() -> Evaluation {
    Evaluation::Illumination {
        light: Light::Directional(Vector3::new(1., 0., 0.)),
        occluder: Some(earth()),
    }
}

#[test]
fn validate_day_and_night() {
    let model = leo(Attitude::Fixed, false);
    let period = model.orbit().period();
    let grid = TimeGrid::Times(vec![0.0, period / 4., period / 2., 3. * period / 4.]);
    let series = model.run(&grid, &sunlight()).unwrap();
    let expected = [1.0, 1.0, 0.0, 1.0];
    for (found, expected) in series.values().iter().zip(expected.iter()) {
        assert_abs_diff_eq!(*found, *expected, epsilon = 1e-12);
    }
}

#[test]
fn validate_eclipse_fraction() {
    let model = leo(Attitude::Fixed, false);
    let series = model
        .run(&TimeGrid::Step { dt: 10.0 }, &sunlight())
        .unwrap();

    // Cylindrical shadow: in the dark while |theta - PI| < asin(R / r)
    let r = model.orbit().radius();
    let eclipse = (EARTH_RADIUS_KM / r).asin() / PI;
    assert_abs_diff_eq!(eclipse, 0.404, epsilon = 1e-3);

    let mean = series.mean().unwrap();
    assert_abs_diff_eq!(mean, 1. - eclipse, epsilon = 0.01);
    assert!(series.out_of_range(1e-6).is_empty());

    // Running again gives exactly the same thing
    let again = model
        .run(&TimeGrid::Step { dt: 10.0 }, &sunlight())
        .unwrap();
    assert_eq!(series, again);
}

#[test]
fn validate_nadir_panel() {
    // A panel facing the planet does not see the Sun when the Sun is right above
    let model = leo(Attitude::NadirLocked, true);
    let series = model.run(&TimeGrid::Times(vec![0.0]), &sunlight()).unwrap();
    assert_eq!(series.values(), vec![0.0]);

    // ... but it does just past the terminator, before entering the shadow
    let period = model.orbit().period();
    let t = (PI / 2. + 0.15) / (2. * PI) * period;
    let series = model.run(&TimeGrid::Times(vec![t]), &sunlight()).unwrap();
    assert_abs_diff_eq!(series.values()[0], 1.0, epsilon = 1e-12);

    // ... and not once the Earth is in between
    let t = (PI / 2. + 0.5) / (2. * PI) * period;
    let series = model.run(&TimeGrid::Times(vec![t]), &sunlight()).unwrap();
    assert_eq!(series.values(), vec![0.0]);
}

#[test]
fn validate_planet_view_factor() {
    // A small plate facing the centre of a sphere sees (R/r)^2 of its hemisphere
    let model = leo(Attitude::NadirLocked, true);
    let r = model.orbit().radius();
    let expected = (EARTH_RADIUS_KM / r).powi(2);
    let evaluation = Evaluation::PlanetViewFactor {
        planet: earth(),
        rays_per_sample: 4000,
        seed: 1,
    };
    let grid = TimeGrid::Steps { count: 4 };
    let series = model.run(&grid, &evaluation).unwrap();
    for v in series.values() {
        assert_abs_diff_eq!(v, expected, epsilon = 0.02);
    }

    // Facing away from the planet
    let model = leo(Attitude::NadirLocked, false);
    let series = model.run(&grid, &evaluation).unwrap();
    assert!(series.values().iter().all(|v| *v == 0.0));
}
