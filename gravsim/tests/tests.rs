use std::cell::RefCell;

use gravsim::{
    apply_gravity, euler_step, step, Body, BodyConfig, NVec3, NewtonianGravity, NullSink,
    PairInteraction, Parameters, PositionSink, Scenario, ScenarioConfig, System,
};

const TOL: f64 = 1e-12;

/// Build a body at rest
fn body_at(x: [f64; 3], m: f64) -> Body {
    Body::new(x.into(), NVec3::zeros(), m).unwrap()
}

/// Build a simple 2-body System separated along x-axis, symmetric about the origin
pub fn two_body_system(dist: f64, m1: f64, m2: f64) -> System {
    System::new(vec![
        body_at([-dist / 2.0, 0.0, 0.0], m1),
        body_at([dist / 2.0, 0.0, 0.0], m2),
    ])
}

/// Scenario from explicit bodies with the given time scale
fn scenario_with(bodies: &[([f64; 3], [f64; 3], f64)], time_scale: f64) -> Scenario {
    let mut cfg = ScenarioConfig::default();
    cfg.parameters.time_scale = time_scale;
    cfg.bodies = Some(
        bodies
            .iter()
            .map(|(x, v, m)| BodyConfig { x: x.to_vec(), v: v.to_vec(), m: *m })
            .collect(),
    );
    Scenario::build_scenario(&cfg).unwrap()
}

/// Default physics parameters for tests: G = 1, min separation 0.4
pub fn test_params() -> Parameters {
    Parameters::new(1.0, 0.2).unwrap()
}

/// Build the gravity law from `p`
pub fn gravity_from(p: &Parameters) -> NewtonianGravity {
    NewtonianGravity::from_params(p)
}

fn gravity() -> NewtonianGravity {
    gravity_from(&test_params())
}

// ==================================================================================
// Force model tests
// ==================================================================================

#[test]
fn gravity_conserves_momentum() {
    let mut a = Body::new(NVec3::new(0.3, -1.0, 2.0), NVec3::new(0.1, 0.2, 0.0), 2.0).unwrap();
    let mut b = Body::new(NVec3::new(-4.0, 2.5, 1.0), NVec3::new(0.0, -0.3, 0.4), 7.0).unwrap();
    let (va0, vb0) = (a.v, b.v);

    apply_gravity(&mut a, &mut b, 1.0, 0.37, 0.4);

    let net = a.mass() * (a.v - va0) + b.mass() * (b.v - vb0);
    assert!(net.norm() < TOL, "Net momentum change not zero: {:?}", net);
}

#[test]
fn gravity_symmetric_under_argument_swap() {
    let (mut a1, mut b1) = (body_at([1.0, 2.0, 3.0], 3.0), body_at([-2.0, 0.5, 4.0], 1.5));
    let (mut a2, mut b2) = (a1.clone(), b1.clone());

    apply_gravity(&mut a1, &mut b1, 1.0, 0.5, 0.4);
    apply_gravity(&mut b2, &mut a2, 1.0, 0.5, 0.4);

    assert!((a1.v - a2.v).norm() < TOL);
    assert!((b1.v - b2.v).norm() < TOL);
    // opposite directions
    assert!(a1.v.dot(&b1.v) < 0.0);
}

#[test]
fn gravity_points_toward_other_body() {
    let mut sys = two_body_system(2.0, 1.0, 1.0);
    let dx = sys.bodies[1].x - sys.bodies[0].x;
    let (left, right) = sys.bodies.split_at_mut(1);
    apply_gravity(&mut left[0], &mut right[0], 1.0, 1.0, 0.4);

    assert!(sys.bodies[0].v.dot(&dx) > 0.0, "Velocity change is not toward second body");
    assert!(sys.bodies[1].v.dot(&dx) < 0.0, "Velocity change is not toward first body");
}

#[test]
fn gravity_clamps_close_range() {
    let grav = gravity();
    let at_floor = grav.force_magnitude(2.0, 5.0, grav.min_separation);
    let inside = grav.force_magnitude(2.0, 5.0, 0.01 * grav.min_separation);
    assert_eq!(at_floor, inside);

    // same plateau seen through velocity updates
    let mut near = two_body_system(0.01 * 0.4, 1.0, 1.0);
    let mut floor = two_body_system(0.4, 1.0, 1.0);
    euler_step(&mut near, &grav, 1e-3, &mut NullSink);
    euler_step(&mut floor, &grav, 1e-3, &mut NullSink);
    assert!((near.bodies[0].v.norm() - floor.bodies[0].v.norm()).abs() < TOL);
}

// ==================================================================================
// Integrator tests
// ==================================================================================

#[test]
fn two_body_reference_values() {
    let mut sc = scenario_with(
        &[
            ([0.0, 0.0, 0.0], [0.0, 0.0, 0.0], 2.0),
            ([10.0, 0.0, 0.0], [0.0, 0.0, 0.0], 5.0),
        ],
        1.0,
    );
    assert!((sc.parameters.min_separation() - 0.4).abs() < TOL);

    step(&mut sc, 1.0, &mut NullSink);

    let (a, b) = (&sc.system.bodies[0], &sc.system.bodies[1]);
    assert!((a.v - NVec3::new(0.05, 0.0, 0.0)).norm() < TOL, "{:?}", a.v);
    assert!((b.v - NVec3::new(-0.02, 0.0, 0.0)).norm() < TOL, "{:?}", b.v);
    assert!((a.x - NVec3::new(0.05, 0.0, 0.0)).norm() < TOL, "{:?}", a.x);
    assert!((b.x - NVec3::new(9.98, 0.0, 0.0)).norm() < TOL, "{:?}", b.x);
}

#[test]
fn symmetric_pair_moves_along_x_only() {
    let mut sc = scenario_with(
        &[
            ([-3.0, 0.0, 0.0], [0.0, 0.0, 0.0], 4.0),
            ([3.0, 0.0, 0.0], [0.0, 0.0, 0.0], 4.0),
        ],
        4.0,
    );
    step(&mut sc, 1.0 / 60.0, &mut NullSink);

    let (a, b) = (&sc.system.bodies[0], &sc.system.bodies[1]);
    assert!(a.v.x > 0.0 && b.v.x < 0.0);
    assert_eq!((a.v.y, a.v.z, b.v.y, b.v.z), (0.0, 0.0, 0.0, 0.0));
    assert!((a.v.x + b.v.x).abs() < TOL);
}

#[test]
fn time_scale_is_linear() {
    let bodies = [
        ([0.0, 0.0, 0.0], [0.1, 0.0, -0.2], 1.0),
        ([4.0, 1.0, -2.0], [0.0, 0.3, 0.0], 3.0),
        ([-1.0, 5.0, 2.0], [-0.2, 0.0, 0.1], 5.0),
    ];
    let (k, t) = (4.0, 0.25);

    let mut scaled = scenario_with(&bodies, k);
    let mut unscaled = scenario_with(&bodies, 1.0);
    for _ in 0..10 {
        step(&mut scaled, t, &mut NullSink);
        step(&mut unscaled, k * t, &mut NullSink);
    }

    for (p, q) in scaled.system.bodies.iter().zip(&unscaled.system.bodies) {
        assert!((p.x - q.x).norm() < 1e-9);
        assert!((p.v - q.v).norm() < 1e-9);
    }
}

#[test]
fn time_scale_change_applies_next_tick() {
    let bodies = [([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], 1.0)];
    let mut sc = scenario_with(&bodies, 1.0);
    let control = sc.time_scale.clone();

    step(&mut sc, 1.0, &mut NullSink);
    control.set(3.0).unwrap();
    step(&mut sc, 1.0, &mut NullSink);

    assert!((sc.system.bodies[0].x.x - 4.0).abs() < TOL);
    assert!((sc.system.t - 4.0).abs() < TOL);
}

#[test]
fn invalid_clock_delta_is_ignored() {
    let bodies = [([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], 1.0)];
    let mut sc = scenario_with(&bodies, 1.0);
    step(&mut sc, -1.0, &mut NullSink);
    step(&mut sc, f64::NAN, &mut NullSink);
    assert_eq!(sc.system.bodies[0].x, NVec3::zeros());
    assert_eq!(sc.system.t, 0.0);
}

#[test]
fn overflowing_scaled_step_is_skipped() {
    let bodies = [
        ([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], 1.0),
        ([5.0, 0.0, 0.0], [0.0, 0.0, 0.0], 2.0),
    ];
    let mut sc = scenario_with(&bodies, 1e10);
    let before = sc.system.bodies.clone();

    // both factors finite, product is not
    step(&mut sc, 1e300, &mut NullSink);

    assert_eq!(sc.system.bodies, before);
    assert_eq!(sc.system.t, 0.0);
}

#[test]
fn default_parameters_match_scenario() {
    let p = test_params();
    let sc = scenario_with(&[([0.0, 0.0, 0.0], [0.0, 0.0, 0.0], 1.0)], 1.0);
    assert_eq!(sc.parameters, p);
    assert_eq!(sc.forces, gravity_from(&p));
}

/// Records the masses of each evaluated pair; masses double as body ids
#[derive(Default)]
struct PairCounter {
    pairs: RefCell<Vec<(u32, u32)>>,
}

impl PairInteraction for PairCounter {
    fn interact(&self, a: &mut Body, b: &mut Body, _dt: f64) {
        self.pairs.borrow_mut().push((a.mass() as u32, b.mass() as u32));
    }
}

#[test]
fn every_pair_evaluated_once_in_order() {
    let n = 7;
    let bodies = (0..n)
        .map(|i| body_at([i as f64, 0.0, 0.0], (i + 1) as f64))
        .collect();
    let mut sys = System::new(bodies);
    let counter = PairCounter::default();

    euler_step(&mut sys, &counter, 0.1, &mut NullSink);

    let pairs = counter.pairs.into_inner();
    assert_eq!(pairs.len(), n * (n - 1) / 2);

    let mut expected = Vec::new();
    for i in 1..=n as u32 {
        for j in (i + 1)..=n as u32 {
            expected.push((i, j));
        }
    }
    assert_eq!(pairs, expected);
}

#[derive(Default)]
struct Collect(Vec<(usize, NVec3)>);

impl PositionSink for Collect {
    fn publish(&mut self, body_id: usize, position: &NVec3) {
        self.0.push((body_id, *position));
    }
}

#[test]
fn sink_receives_post_step_positions() {
    let mut sc = scenario_with(
        &[
            ([0.0, 0.0, 0.0], [0.0, 0.0, 0.0], 2.0),
            ([10.0, 0.0, 0.0], [0.0, 0.0, 0.0], 5.0),
        ],
        1.0,
    );
    let mut sink = Collect::default();
    step(&mut sc, 1.0, &mut sink);

    assert_eq!(sink.0.len(), 2);
    for (id, pos) in &sink.0 {
        assert_eq!(*pos, sc.system.bodies[*id].x);
    }
}

#[test]
fn many_body_run_conserves_momentum() {
    let mut cfg = ScenarioConfig::default();
    cfg.initial.seed = Some(2024);
    cfg.initial.body_count = 40;
    let mut sc = Scenario::build_scenario(&cfg).unwrap();
    let p0 = sc.system.total_momentum();

    for _ in 0..100 {
        step(&mut sc, 1.0 / 60.0, &mut NullSink);
    }

    let drift = (sc.system.total_momentum() - p0).norm();
    assert!(drift < 1e-9, "momentum drift {drift}");
    assert!(sc.system.bodies.iter().all(|b| b.x.iter().all(|c| c.is_finite())));
}

#[test]
fn seeded_scenarios_are_reproducible() {
    let mut cfg = ScenarioConfig::default();
    cfg.initial.seed = Some(99);
    let mut a = Scenario::build_scenario(&cfg).unwrap();
    let mut b = Scenario::build_scenario(&cfg).unwrap();
    for _ in 0..20 {
        step(&mut a, 0.02, &mut NullSink);
        step(&mut b, 0.02, &mut NullSink);
    }
    assert_eq!(a.system.bodies, b.system.bodies);
}

#[test]
fn bundled_scenarios_parse() {
    for name in ["default.yaml", "binary.yaml", "crowd.yaml"] {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(name);
        let text = std::fs::read_to_string(&path).unwrap();
        let cfg = ScenarioConfig::from_yaml_str(&text).unwrap();
        assert!(cfg.validate().is_ok(), "{name}");
    }
}
