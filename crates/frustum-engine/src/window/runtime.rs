use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::config::{PipelineConfig, WindowConfig};
use crate::core::{CloseFlag, Driver, ExitStatus, LoopControl, Stage, StartupError};
use crate::device::{Gpu, GpuInit};
use crate::input::{Key, KeyEvent, KeyState};
use crate::model::Model;
use crate::render::{MeshBuffer, RenderCtx, RenderLoop, RenderTarget, ShaderProgram};
use crate::time::FrameClock;

/// Entry point for the windowed viewer.
pub struct Runtime;

impl Runtime {
    /// Opens the window, brings the pipeline up and renders until the window
    /// is closed or the quit key is pressed.
    ///
    /// Never panics on startup failures; they are logged and reported as
    /// [`ExitStatus::Failure`].
    pub fn run(config: PipelineConfig, gpu_init: GpuInit) -> ExitStatus {
        let mut state = AppState::new(config, gpu_init);

        let event_loop = match EventLoop::new() {
            Ok(event_loop) => event_loop,
            Err(e) => {
                state.driver.fail(StartupError::EventLoop(e.to_string()));
                return state.driver.terminate();
            }
        };

        if let Err(e) = event_loop.run_app(&mut state) {
            state.driver.fail(StartupError::EventLoop(e.to_string()));
        }

        state.finish()
    }
}

#[self_referencing]
struct WindowEntry {
    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

/// GPU objects that exist only while the pipeline is running.
struct Scene {
    program: ShaderProgram,
    mesh: MeshBuffer,
    render_loop: RenderLoop,
}

// Field order is drop order: scene resources go before the GPU context,
// which goes before the window it borrows.
struct AppState {
    scene: Option<Scene>,
    entry: Option<WindowEntry>,
    driver: Driver,
    close: CloseFlag,
    model: Model,
    clock: FrameClock,
    config: PipelineConfig,
    gpu_init: GpuInit,
}

impl AppState {
    fn new(config: PipelineConfig, gpu_init: GpuInit) -> Self {
        let driver = Driver::new();
        Self {
            scene: None,
            entry: None,
            close: driver.close_flag(),
            driver,
            model: config.model(),
            clock: FrameClock::new(),
            config,
            gpu_init,
        }
    }

    /// Runs every startup stage in order. Stops at the first failure, which
    /// the driver has already recorded.
    fn start(&mut self, event_loop: &ActiveEventLoop) -> Option<()> {
        let window = create_window(event_loop, &self.config.window)
            .map_err(|e| StartupError::Window(format!("{e:#}")));
        let window = self.driver.startup_step(Stage::WindowReady, window)?;

        let gpu_init = self.gpu_init.clone();
        let entry = WindowEntryTryBuilder {
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
        .map_err(|e| StartupError::Context(format!("{e:#}")));
        let entry = self.driver.startup_step(Stage::ContextReady, entry)?;

        let scene = entry.with_gpu(|gpu| build_scene(&mut self.driver, &self.config, gpu))?;

        self.driver.startup_step(Stage::Running, Ok(()))?;
        self.clock = FrameClock::new();

        entry.with_window(|w| w.request_redraw());
        self.scene = Some(scene);
        self.entry = Some(entry);
        Some(())
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(entry), Some(scene)) = (self.entry.as_mut(), self.scene.as_mut()) else {
            return;
        };

        let elapsed = self.clock.tick().elapsed;
        let model = &mut self.model;
        let clear = self.config.clear_color;

        let control = self
            .driver
            .frame(|| entry.with_gpu_mut(|gpu| draw_frame(gpu, scene, model, elapsed, clear)));

        if control == LoopControl::Exit {
            self.stop(event_loop);
        }
    }

    fn on_key(&mut self, event: KeyEvent) {
        if event.is_press_of(self.config.quit_key) {
            log::info!("quit key {:?} pressed", event.key);
            self.close.request();
        }
    }

    /// Releases the scene, then the GPU context and window, and leaves the event loop.
    fn stop(&mut self, event_loop: &ActiveEventLoop) {
        self.driver.shutdown();
        self.scene = None;
        self.entry = None;
        event_loop.exit();
    }

    fn finish(mut self) -> ExitStatus {
        self.scene = None;
        self.entry = None;

        let status = self.driver.terminate();
        match self.driver.failure() {
            Some(err) => log::error!("exiting after {} failure", err.stage()),
            None => log::info!("exiting after {} frames", self.driver.frames()),
        }
        status
    }
}

fn create_window(event_loop: &ActiveEventLoop, config: &WindowConfig) -> Result<Window> {
    let attrs = Window::default_attributes()
        .with_title(config.title.clone())
        .with_inner_size(config.size)
        .with_resizable(false);

    event_loop.create_window(attrs).context("failed to create window")
}

fn build_scene(driver: &mut Driver, config: &PipelineConfig, gpu: &Gpu<'_>) -> Option<Scene> {
    let ctx = RenderCtx::from_gpu(gpu);

    let program = config
        .shader
        .compile()
        .map(|compiled| ShaderProgram::link(&ctx, &compiled));
    let program = driver.startup_step(Stage::ShadersReady, program)?;

    let mesh = MeshBuffer::upload(ctx.device, &config.vertices);
    let mesh = driver.startup_step(Stage::BuffersReady, mesh)?;

    let render_loop = driver.require(RenderLoop::from_config(config))?;

    Some(Scene { program, mesh, render_loop })
}

fn draw_frame(
    gpu: &mut Gpu<'_>,
    scene: &mut Scene,
    model: &mut Model,
    elapsed: f32,
    clear: wgpu::Color,
) -> LoopControl {
    let mut frame = match gpu.begin_frame() {
        Ok(frame) => frame,
        Err(err) => return gpu.handle_surface_error(err).loop_control(),
    };

    {
        let ctx = RenderCtx::from_gpu(gpu);
        let mut target = RenderTarget::from(frame.parts());

        let mut pass = scene.program.begin_pass();
        scene.render_loop.render_frame(model, elapsed, &mut pass);
        pass.encode(&ctx, &mut target, &scene.mesh, clear);
    }

    gpu.submit(frame);
    LoopControl::Continue
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.driver.stage() != Stage::Uninitialized {
            return;
        }

        if self.start(event_loop).is_none() {
            self.stop(event_loop);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.close.is_set() || self.driver.stage() == Stage::ShuttingDown {
            self.stop(event_loop);
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw; presentation is vsync-paced.
        if let Some(entry) = self.entry.as_ref() {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("window close requested");
                self.close.request();
            }

            WindowEvent::KeyboardInput { event, .. } => self.on_key(translate_key(&event)),

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }
}

fn translate_key(event: &winit::event::KeyEvent) -> KeyEvent {
    KeyEvent {
        key: map_key(event.physical_key),
        state: match event.state {
            ElementState::Pressed => KeyState::Pressed,
            ElementState::Released => KeyState::Released,
        },
        repeat: event.repeat,
    }
}

fn map_key(pk: PhysicalKey) -> Key {
    match pk {
        PhysicalKey::Code(code) => match code {
            KeyCode::Escape => Key::Escape,
            KeyCode::KeyQ => Key::Q,
            other => Key::Unknown(other as u32),
        },

        // NativeKeyCode is not a u32 in winit 0.30; preserve "unknown" without a stable numeric.
        PhysicalKey::Unidentified(_) => Key::Unknown(0),
    }
}
