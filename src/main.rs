use std::sync::Arc;

use clap::Parser;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use cube_field::cli::Cli;
use cube_field::config::Settings;
use cube_field::core::{Clock, FrameStats};
use cube_field::frame::FrameLoop;
use cube_field::random::SeededRandom;
use cube_field::renderer::MeshRenderer;
use cube_field::scene::{build_scene, SceneState};
use cube_field::window::{viewport_of, WinitScheduler};

/// Everything that exists once the window is up
struct Running {
    window: Arc<Window>,
    renderer: MeshRenderer,
    scene: SceneState,
    frame_loop: FrameLoop<WinitScheduler>,
}

struct App {
    settings: Settings,
    running: Option<Running>,
    clock: Clock,
    stats: FrameStats,
}

impl App {
    fn new(settings: Settings) -> Self {
        Self {
            settings,
            running: None,
            clock: Clock::new(),
            stats: FrameStats::new(),
        }
    }

    fn launch(&self, event_loop: &ActiveEventLoop) -> anyhow::Result<Running> {
        let window = event_loop.create_window(
            Window::default_attributes()
                .with_title(self.settings.window.title.as_str())
                .with_inner_size(winit::dpi::LogicalSize::new(
                    self.settings.window.width,
                    self.settings.window.height,
                )),
        )?;
        let window = Arc::new(window);

        let mut rng = match self.settings.seed {
            Some(seed) => {
                log::debug!("Using seed {}", seed);
                SeededRandom::seeded(seed)
            }
            None => SeededRandom::from_entropy(),
        };
        let mut scene = build_scene(&self.settings.scene, viewport_of(&window), &mut rng);

        let mut renderer = pollster::block_on(MeshRenderer::new(window.clone(), &scene.target))?;

        let mut frame_loop = FrameLoop::new(WinitScheduler::new(window.clone()), self.settings.animation);
        frame_loop.start(&mut scene, &mut renderer)?;

        Ok(Running {
            window,
            renderer,
            scene,
            frame_loop,
        })
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(running) = self.running.as_mut() else {
            return;
        };

        let delta = self.clock.tick();
        if let Some(fps) = self.stats.record(delta) {
            log::info!("FPS: {:.1}", fps);
        }

        if let Err(e) = running.frame_loop.tick(&mut running.scene, &mut running.renderer) {
            log::error!("Render error: {:#}", e);
            event_loop.exit();
            return;
        }

        if let Some(limit) = self.settings.max_frames {
            if running.frame_loop.frames() >= limit {
                log::info!("Rendered {} frames, exiting", running.frame_loop.frames());
                running.frame_loop.stop();
                event_loop.exit();
            }
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.running.is_some() {
            return;
        }

        match self.launch(event_loop) {
            Ok(running) => {
                self.clock.reset();
                self.running = Some(running);
            }
            Err(e) => {
                log::error!("Failed to start: {:#}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => {
                if let Some(running) = self.running.as_mut() {
                    running.frame_loop.stop();
                }
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Some(running) = self.running.as_mut() {
                    running.renderer.resize(size.width, size.height);
                    running.scene.resize(size.width, size.height);
                    running.window.request_redraw();
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let settings = Settings::from_cli(&cli)?;

    let event_loop = EventLoop::new()?;
    let mut app = App::new(settings);

    log::info!("Cube Field - Escape to quit");
    event_loop.run_app(&mut app)?;

    Ok(())
}
