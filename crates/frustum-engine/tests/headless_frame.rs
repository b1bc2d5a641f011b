use approx::assert_abs_diff_eq;
use glam::{Mat4, Vec4};

use frustum_engine::config::PipelineConfig;
use frustum_engine::core::{Driver, ExitStatus, LoopControl, Stage};
use frustum_engine::render::{
    DrawCall, HeadlessBackend, Primitive, RenderLoop, MODEL_UNIFORM, PROJECTION_UNIFORM,
    VIEW_UNIFORM,
};
use frustum_engine::time::{FrameClock, ManualClock};

fn running_driver() -> Driver {
    let mut driver = Driver::new();
    for stage in [
        Stage::WindowReady,
        Stage::ContextReady,
        Stage::ShadersReady,
        Stage::BuffersReady,
        Stage::Running,
    ] {
        driver.advance(stage).unwrap();
    }
    driver
}

fn default_scene() -> (PipelineConfig, RenderLoop, HeadlessBackend) {
    let config = PipelineConfig::default();
    let compiled = config.shader.compile().unwrap();
    let projection = config.projection.matrix().unwrap();

    let render_loop = RenderLoop::new(config.spin, projection);
    let backend = HeadlessBackend::new(compiled.layout().clone());
    (config, render_loop, backend)
}

#[test]
fn default_config_first_frame() {
    let (config, mut render_loop, mut backend) = default_scene();
    let mut model = config.model();
    let time = ManualClock::new();
    let mut clock = FrameClock::with_source(time.clone());

    let elapsed = clock.tick().elapsed;
    assert_eq!(elapsed, 0.0);

    let frame = render_loop.render_frame(&mut model, elapsed, &mut backend);

    let expected_model = Mat4::from_cols(
        Vec4::new(1.0, 0.0, 0.0, 0.0),
        Vec4::new(0.0, 1.0, 0.0, 0.0),
        Vec4::new(0.0, 0.0, 1.0, 0.0),
        Vec4::new(0.0, 0.0, -1.0, 1.0),
    );
    assert_eq!(frame.model, expected_model);
    assert_eq!(backend.uniform(MODEL_UNIFORM), Some(expected_model));
    assert_eq!(backend.uniform(VIEW_UNIFORM), Some(Mat4::IDENTITY));

    let projection = backend.uniform(PROJECTION_UNIFORM).unwrap();
    assert_abs_diff_eq!(projection.col(0)[0], 0.2 / 640.0, epsilon = 1e-9);
    assert_abs_diff_eq!(projection.col(1)[1], 0.2 / 480.0, epsilon = 1e-9);
    assert_abs_diff_eq!(projection.col(2)[2], -10.1 / 9.9, epsilon = 1e-6);
    assert_abs_diff_eq!(projection.col(3)[2], -2.0 / 9.9, epsilon = 1e-6);
    assert_eq!(projection.col(2)[3], -1.0);

    assert_eq!(
        backend.draws(),
        &[DrawCall { primitive: Primitive::Triangles, vertices: 0..3 }]
    );
}

#[test]
fn loop_stops_one_frame_after_close_request() {
    let (config, mut render_loop, mut backend) = default_scene();
    let mut model = config.model();
    let time = ManualClock::new();
    let mut clock = FrameClock::with_source(time.clone());

    let mut driver = running_driver();
    let close = driver.close_flag();

    let mut frames = 0;
    loop {
        let elapsed = clock.tick().elapsed;
        let control = driver.frame(|| {
            render_loop.render_frame(&mut model, elapsed, &mut backend);
            LoopControl::Continue
        });
        if control == LoopControl::Exit {
            break;
        }

        frames += 1;
        time.advance(1.0 / 60.0);
        if frames == 4 {
            close.request();
        }
        assert!(frames < 10, "loop did not stop");
    }

    assert_eq!(driver.frames(), 4);
    assert_eq!(backend.draws().len(), 4);
    assert_eq!(driver.stage(), Stage::ShuttingDown);
    assert_eq!(driver.terminate(), ExitStatus::Success);
    assert_eq!(ExitStatus::Success.code(), 0);

    // Time moved on, so the last frame was rotated.
    let angle = 3.0 / 60.0 * config.spin.angular_rate;
    assert_abs_diff_eq!(model.orientation().z, angle, epsilon = 1e-5);
}

#[test]
fn bad_projection_fails_before_running() {
    use frustum_engine::config::ProjectionConfig;
    use frustum_engine::core::StartupError;
    use frustum_engine::transform::Frustum;

    let near_at_zero = Frustum::new(-1.0, 1.0, 1.0, -1.0, 0.0, 10.0);
    let config =
        PipelineConfig::default().with_projection(ProjectionConfig::Frustum(near_at_zero));

    // Everything up to the vertex buffers succeeded.
    let mut driver = Driver::new();
    for stage in [
        Stage::WindowReady,
        Stage::ContextReady,
        Stage::ShadersReady,
        Stage::BuffersReady,
    ] {
        driver.advance(stage).unwrap();
    }

    assert!(driver.require(RenderLoop::from_config(&config)).is_none());
    assert_eq!(driver.stage(), Stage::ShuttingDown);
    assert!(matches!(driver.failure(), Some(StartupError::Projection(_))));
    assert_eq!(driver.terminate().code(), -1);
}

#[test]
fn default_projection_builds_render_loop() {
    let mut driver = running_driver();
    let render_loop = driver.require(RenderLoop::from_config(&PipelineConfig::default()));
    assert!(render_loop.is_some());
    assert_eq!(driver.stage(), Stage::Running);
    assert!(driver.failure().is_none());
}
