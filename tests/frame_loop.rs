use torus_sketch::{PassKind, Sketch, SketchConfig, POST_CHAIN};

#[test]
fn reference_scenario_800x600() {
    let mut sketch = Sketch::new(SketchConfig {
        width: 800,
        height: 600,
    })
    .expect("viewport is non-empty");

    assert_eq!(sketch.aspect(), 800.0 / 600.0);

    let mut last = None;
    for _ in 0..10 {
        last = Some(sketch.tick());
    }
    let state = last.expect("at least one tick ran");

    assert_eq!(state.frame, 10);
    assert!((state.time - 0.5).abs() < 1e-6);
    assert_eq!(state.rotation_x, 0.005);
    assert_eq!(state.rotation_y, 0.01);
}

#[test]
fn clock_is_monotonic_over_a_long_run() {
    let mut sketch = Sketch::new(SketchConfig::default()).unwrap();
    let mut previous = sketch.time();
    for _ in 0..1_000 {
        let state = sketch.tick();
        assert!(state.time > previous);
        previous = state.time;
    }
}

#[test]
fn resize_between_ticks_does_not_disturb_the_animation() {
    let mut sketch = Sketch::new(SketchConfig {
        width: 800,
        height: 600,
    })
    .unwrap();

    for _ in 0..5 {
        sketch.tick();
    }
    sketch.resize(1920, 1080);
    sketch.resize(1920, 1080);
    for _ in 0..5 {
        sketch.tick();
    }

    assert_eq!(sketch.aspect(), 1920.0 / 1080.0);
    assert_eq!(sketch.frame(), 10);
    assert_eq!(sketch.rotation(), (0.005, 0.01));
}

#[test]
fn pass_order_is_fixed_for_every_tick() {
    let mut sketch = Sketch::new(SketchConfig::default()).unwrap();
    for _ in 0..50 {
        let state = sketch.tick();
        assert_eq!(state.passes, POST_CHAIN);
        assert_eq!(state.passes, [PassKind::Render, PassKind::Bloom]);
    }
}

#[test]
fn matrices_are_finite_after_arbitrary_input() {
    let mut sketch = Sketch::new(SketchConfig {
        width: 333,
        height: 777,
    })
    .unwrap();

    sketch.controls_mut().rotate(512.0, -1024.0);
    sketch.controls_mut().zoom(3.0);
    for _ in 0..42 {
        sketch.tick();
    }

    let view_proj = sketch.view_projection();
    assert!(view_proj.to_cols_array().iter().all(|v| v.is_finite()));
    let model = sketch.model_matrix();
    assert!(model.to_cols_array().iter().all(|v| v.is_finite()));
}
