use approx::{assert_abs_diff_eq, assert_relative_eq};
use orbit_light::{
    discretize, view_factor, EngineOptions, Float, Occluder, Patch, Polygon, Resolution, Sphere,
    SurfaceSpec, Vector3, PI,
};

/// View factor between two coaxial, parallel rectangles of sides `a` and `b`
/// separated by `c`
fn get_expected(a: Float, b: Float, c: Float) -> Float {
    let x = a / c;
    let y = b / c;
    let x1 = (1. + x * x).sqrt();
    let y1 = (1. + y * y).sqrt();
    2. / (PI * x * y)
        * (((1. + x * x) * (1. + y * y) / (1. + x * x + y * y)).sqrt().ln()
            + x * y1 * (x / y1).atan()
            + y * x1 * (y / x1).atan()
            - x * x.atan()
            - y * y.atan())
}

/// A rectangle centred on the Z axis at height `z`, facing up or down
fn rectangle(a: Float, b: Float, z: Float, up: bool, n: usize) -> Patch {
    let (ha, hb) = (a / 2., b / 2.);
    let mut corners = vec![
        Vector3::new(-ha, -hb, z),
        Vector3::new(ha, -hb, z),
        Vector3::new(ha, hb, z),
        Vector3::new(-ha, hb, z),
    ];
    if !up {
        corners.reverse();
    }
    let polygon = Polygon::new(corners).unwrap();
    discretize(&SurfaceSpec::Polygon(polygon), Resolution::Grid(n)).unwrap()
}

fn get_found(a: Float, b: Float, c: Float, n: usize) -> Float {
    let bottom = rectangle(a, b, 0.0, true, n);
    let top = rectangle(a, b, c, false, n);
    view_factor(&bottom, &top, None, &EngineOptions::default()).unwrap()
}

fn validate(a: Float, b: Float, c: Float, n: usize) {
    let expected = get_expected(a, b, c);
    let found = get_found(a, b, c, n);
    assert_relative_eq!(found, expected, max_relative = 0.02);
}

#[test]
fn validate_closed_form() {
    // Sanity check of the closed form itself
    assert_abs_diff_eq!(get_expected(1., 1., 1.), 0.1998, epsilon = 1e-4);
    assert_abs_diff_eq!(get_expected(2., 2., 1.), 0.4152, epsilon = 1e-4);
    assert_abs_diff_eq!(get_expected(2., 2., 2.), 0.1998, epsilon = 1e-4);
}

#[test]
fn validate_parallel_squares() {
    validate(1., 1., 1., 20);
    validate(2., 2., 1., 25);
    validate(2., 2., 2., 20);
    validate(2., 2., 4., 10);
}

#[test]
fn validate_parallel_rectangles() {
    validate(1., 3., 1., 20);
    validate(4., 2., 2., 20);
}

#[test]
fn validate_reciprocity() {
    let small = rectangle(1., 1., 0.0, true, 12);
    let big = rectangle(2., 3., 1.0, false, 12);
    let options = EngineOptions::default();
    let f12 = view_factor(&small, &big, None, &options).unwrap();
    let f21 = view_factor(&big, &small, None, &options).unwrap();
    let a1 = small.total_area();
    let a2 = big.total_area();
    assert_abs_diff_eq!(a1, 1., epsilon = 1e-9);
    assert_abs_diff_eq!(a2, 6., epsilon = 1e-9);
    assert_relative_eq!(a1 * f12, a2 * f21, max_relative = 1e-9);
}

#[test]
fn validate_fully_occluded() {
    let bottom = rectangle(1., 1., 0.0, true, 8);
    let top = rectangle(1., 1., 4.0, false, 8);
    let planet = Occluder::Sphere(Sphere::new(Vector3::new(0., 0., 2.), 1.5).unwrap());
    let f = view_factor(&bottom, &top, Some(&planet), &EngineOptions::default()).unwrap();
    assert_eq!(f, 0.0);
}
