//! Window creation and event handling via winit.
//!
//! [`AppState`] implements winit's [`ApplicationHandler`]. Pointer, wheel and
//! key events are folded into the interaction model as they arrive; each
//! `RedrawRequested` applies held keys for the elapsed time and draws one
//! frame.

use std::sync::Arc;

use glam::Vec3;
use moonvis_camera::{InteractionModel, InteractionSettings};
use moonvis_config::{CameraConfig, Config, RenderConfig};
use moonvis_input::{KeyboardState, MouseState, RawKeyEvent, scroll_lines};
use moonvis_mesh::{MeshError, generate_sphere};
use moonvis_render::{
    DecodedImage, GraphicsSurface, MeshBuffer, PerspectiveProjection, RenderContextError,
    RenderError, SurfaceOptions, TextureError, ViewportTracker, WgpuSurface,
    init_render_context_blocking,
};
use tracing::{debug, error, info, instrument};
use winit::application::ApplicationHandler;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::KeyCode;
use winit::window::{Window, WindowAttributes, WindowId};

use crate::frame::update_and_present;
use crate::frame_clock::FrameClock;

/// Failures that end the viewer.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("GPU initialization failed: {0}")]
    Context(#[from] RenderContextError),

    #[error("failed to load surface texture: {0}")]
    Texture(#[from] TextureError),

    #[error("invalid sphere settings: {0}")]
    Mesh(#[from] MeshError),

    #[error("rendering failed: {0}")]
    Render(#[from] RenderError),
}

pub fn window_attributes_from_config(config: &Config) -> WindowAttributes {
    WindowAttributes::default()
        .with_title(config.window.title.clone())
        .with_inner_size(winit::dpi::LogicalSize::new(
            config.window.width as f64,
            config.window.height as f64,
        ))
}

pub fn interaction_settings_from_config(camera: &CameraConfig) -> InteractionSettings {
    InteractionSettings {
        drag_sensitivity: camera.drag_sensitivity,
        zoom_speed: camera.zoom_speed,
        zoom_near: camera.zoom_near,
        zoom_far: camera.zoom_far,
        move_speed: camera.move_speed,
        start_position: Vec3::from_array(camera.start_position),
        forward: Vec3::from_array(camera.forward),
        up: Vec3::from_array(camera.up),
    }
}

pub fn clear_color_from_config(render: &RenderConfig) -> wgpu::Color {
    let [r, g, b] = render.clear_color;
    wgpu::Color { r, g, b, a: 1.0 }
}

/// GPU resources that exist once the window does.
struct Renderer {
    surface: WgpuSurface,
    mesh: MeshBuffer,
}

pub struct AppState {
    config: Config,
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    viewport: ViewportTracker,
    projection: PerspectiveProjection,
    interaction: InteractionModel,
    keyboard: KeyboardState,
    mouse: MouseState,
    /// Physical pixels per logical pixel. Drag sensitivity is per logical pixel.
    scale_factor: f64,
    clock: FrameClock,
    fatal_error: Option<AppError>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let (width, height) = (config.window.width, config.window.height);
        let projection = PerspectiveProjection::new(
            config.render.fov_y_degrees,
            width,
            height,
            config.render.near,
            config.render.far,
        );
        Self {
            viewport: ViewportTracker::new(width, height),
            interaction: InteractionModel::new(interaction_settings_from_config(&config.camera)),
            projection,
            config,
            window: None,
            renderer: None,
            keyboard: KeyboardState::new(),
            mouse: MouseState::new(),
            scale_factor: 1.0,
            clock: FrameClock::new(),
            fatal_error: None,
        }
    }

    pub fn interaction(&self) -> &InteractionModel {
        &self.interaction
    }

    pub fn projection(&self) -> &PerspectiveProjection {
        &self.projection
    }

    /// Opens the window and builds everything drawn in it: the GPU context,
    /// the surface texture and the sphere mesh.
    fn initialize(&mut self, event_loop: &ActiveEventLoop) -> Result<(), AppError> {
        let window = Arc::new(event_loop.create_window(window_attributes_from_config(&self.config))?);
        let inner_size = window.inner_size();
        self.scale_factor = window.scale_factor();
        self.viewport = ViewportTracker::new(inner_size.width, inner_size.height);

        let sphere = generate_sphere(
            self.config.sphere.radius,
            self.config.sphere.sectors,
            self.config.sphere.stacks,
        )?;
        let context = init_render_context_blocking(window.clone(), self.config.window.vsync)?;
        let surface_map = DecodedImage::open(&self.config.texture.path)?;

        let mut surface = WgpuSurface::new(
            context,
            surface_map,
            SurfaceOptions {
                clear_color: clear_color_from_config(&self.config.render),
                generate_mipmaps: self.config.texture.generate_mipmaps,
            },
        )?;
        let mesh = surface.upload_mesh("sphere", sphere.vertices(), sphere.indices())?;

        let (width, height) = surface.size();
        self.projection.set_viewport(width, height);
        info!(
            width,
            height,
            triangles = sphere.triangle_count(),
            "Viewer initialized"
        );

        self.renderer = Some(Renderer { surface, mesh });
        self.clock.reset();
        window.request_redraw();
        self.window = Some(window);
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: AppError) {
        error!("{err}");
        self.fatal_error = Some(err);
        event_loop.exit();
    }

    fn handle_resize(&mut self, width: u32, height: u32) {
        let was_minimized = self.viewport.is_minimized();
        if let Some(size) = self.viewport.handle_resize(width, height) {
            if let Some(renderer) = &mut self.renderer {
                renderer.surface.resize(size.width, size.height);
            }
            self.projection.set_viewport(size.width, size.height);
            debug!(width = size.width, height = size.height, "Viewport resized");
        }
        if was_minimized && !self.viewport.is_minimized() {
            self.clock.reset();
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }
    }

    /// `x` and `y` are physical pixels, as winit reports them.
    fn handle_cursor_moved(&mut self, x: f64, y: f64) {
        self.mouse.on_cursor_moved(x, y);
        self.interaction.on_pointer_move(
            x / self.scale_factor,
            y / self.scale_factor,
            self.mouse.is_held(MouseButton::Left),
        );
    }

    fn handle_scale_factor(&mut self, scale_factor: f64) {
        if scale_factor > 0.0 {
            self.scale_factor = scale_factor;
        }
    }

    fn handle_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        self.mouse.on_button(button, state);
        if button == MouseButton::Left && state == ElementState::Released {
            self.interaction.on_drag_released();
        }
    }

    fn handle_wheel(&mut self, delta: MouseScrollDelta) {
        self.interaction.on_scroll(scroll_lines(delta));
    }

    fn handle_cursor_left(&mut self) {
        let dragging = self.mouse.is_held(MouseButton::Left);
        self.mouse.on_cursor_left();
        if dragging {
            self.interaction.on_drag_released();
        }
    }

    /// Returns `true` when the key asks the viewer to quit.
    fn handle_key(&mut self, event: RawKeyEvent) -> bool {
        self.keyboard.process_raw(event);
        self.keyboard.just_pressed(KeyCode::Escape)
    }

    fn handle_focus_lost(&mut self) {
        self.keyboard.release_all();
    }

    /// One frame: held keys for the elapsed time, then the draw.
    fn redraw(&mut self) -> Result<(), AppError> {
        let Some(renderer) = &mut self.renderer else {
            return Ok(());
        };
        if self.viewport.is_minimized() {
            return Ok(());
        }

        let elapsed = self.clock.tick();
        let result = update_and_present(
            &mut self.interaction,
            &self.keyboard,
            elapsed,
            &mut renderer.surface,
            &renderer.mesh,
            self.projection.matrix(),
        );
        self.keyboard.clear_transients();
        self.mouse.clear_transients();
        result?;

        if let Some(window) = &self.window {
            window.request_redraw();
        }
        Ok(())
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.initialize(event_loop) {
            self.fail(event_loop, e);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested, shutting down");
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                self.handle_resize(new_size.width, new_size.height);
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                self.handle_scale_factor(scale_factor);
                if let Some(size) = self.window.as_ref().map(|w| w.inner_size()) {
                    self.handle_resize(size.width, size.height);
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if self.handle_key(RawKeyEvent::from(&event)) {
                    info!("Escape pressed, shutting down");
                    event_loop.exit();
                }
            }
            WindowEvent::Focused(false) => self.handle_focus_lost(),
            WindowEvent::CursorMoved { position, .. } => {
                self.handle_cursor_moved(position.x, position.y);
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.handle_mouse_button(button, state);
            }
            WindowEvent::MouseWheel { delta, .. } => self.handle_wheel(delta),
            WindowEvent::CursorLeft { .. } => self.handle_cursor_left(),
            WindowEvent::RedrawRequested => {
                if let Err(e) = self.redraw() {
                    self.fail(event_loop, e);
                }
            }
            _ => {}
        }
    }
}

/// Runs the viewer until the window closes. Returns the error that stopped
/// it, if any.
#[instrument(skip_all)]
pub fn run(config: Config) -> Result<(), AppError> {
    let event_loop = EventLoop::new()?;
    let mut app = AppState::new(config);
    event_loop.run_app(&mut app)?;
    app.fatal_error.take().map_or(Ok(()), Err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use moonvis_camera::DragState;
    use winit::dpi::PhysicalPosition;

    #[test]
    fn test_settings_follow_config() {
        let camera = CameraConfig {
            zoom_near: 2.0,
            start_position: [0.0, 1.0, 5.0],
            ..CameraConfig::default()
        };
        let settings = interaction_settings_from_config(&camera);
        assert_eq!(settings.zoom_near, 2.0);
        assert_eq!(settings.start_position, Vec3::new(0.0, 1.0, 5.0));
        assert_eq!(settings.forward, Vec3::NEG_Z);
    }

    #[test]
    fn test_default_config_matches_reference_settings() {
        assert_eq!(
            interaction_settings_from_config(&CameraConfig::default()),
            InteractionSettings::default()
        );
    }

    #[test]
    fn test_clear_color_is_opaque() {
        let color = clear_color_from_config(&RenderConfig::default());
        assert_eq!(color, moonvis_render::DARK_GREY);
    }

    #[test]
    fn test_projection_uses_window_aspect() {
        let state = AppState::default();
        assert!((state.projection().aspect - 1280.0 / 720.0).abs() < 1e-6);
    }

    #[test]
    fn test_resize_updates_projection_without_gpu() {
        let mut state = AppState::default();
        state.handle_resize(1000, 500);
        assert!((state.projection().aspect - 2.0).abs() < 1e-6);
        // Minimizing keeps the last aspect.
        state.handle_resize(0, 0);
        assert!((state.projection().aspect - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_left_drag_rotates_body() {
        let mut state = AppState::default();
        state.handle_cursor_moved(100.0, 100.0);
        state.handle_mouse_button(MouseButton::Left, ElementState::Pressed);
        state.handle_cursor_moved(100.0, 100.0);
        state.handle_cursor_moved(140.0, 100.0);
        assert_eq!(state.interaction().drag_state(), DragState::Dragging);
        assert_ne!(state.interaction().build_matrices().model, glam::Mat4::IDENTITY);

        state.handle_mouse_button(MouseButton::Left, ElementState::Released);
        assert_eq!(state.interaction().drag_state(), DragState::Idle);
    }

    #[test]
    fn test_drag_sensitivity_is_per_logical_pixel() {
        let drag = |state: &mut AppState, dx: f64| {
            state.handle_mouse_button(MouseButton::Left, ElementState::Pressed);
            state.handle_cursor_moved(100.0, 100.0);
            state.handle_cursor_moved(100.0 + dx, 100.0);
            state.interaction().build_matrices().model
        };

        let mut standard = AppState::default();
        let expected = drag(&mut standard, 20.0);

        // A 2x display reports twice the physical travel for the same hand motion.
        let mut hidpi = AppState::default();
        hidpi.handle_scale_factor(2.0);
        let model = drag(&mut hidpi, 40.0);

        assert!(model.abs_diff_eq(expected, 1e-6));
        assert_ne!(model, glam::Mat4::IDENTITY);
    }

    #[test]
    fn test_non_positive_scale_factor_is_ignored() {
        let mut state = AppState::default();
        state.handle_scale_factor(0.0);
        assert_eq!(state.scale_factor, 1.0);
    }

    #[test]
    fn test_right_button_does_not_drag() {
        let mut state = AppState::default();
        state.handle_mouse_button(MouseButton::Right, ElementState::Pressed);
        state.handle_cursor_moved(10.0, 10.0);
        state.handle_cursor_moved(50.0, 10.0);
        assert_eq!(state.interaction().drag_state(), DragState::Idle);
        assert_eq!(state.interaction().build_matrices().model, glam::Mat4::IDENTITY);
    }

    #[test]
    fn test_leaving_window_ends_drag() {
        let mut state = AppState::default();
        state.handle_mouse_button(MouseButton::Left, ElementState::Pressed);
        state.handle_cursor_moved(0.0, 0.0);
        state.handle_cursor_moved(5.0, 0.0);
        state.handle_cursor_left();
        assert_eq!(state.interaction().drag_state(), DragState::Idle);
    }

    #[test]
    fn test_wheel_zooms_in_lines() {
        let mut state = AppState::default();
        state.handle_wheel(MouseScrollDelta::LineDelta(0.0, 1.0));
        assert!((state.interaction().rig().distance_from_origin() - 3.4).abs() < 1e-5);

        // 80 px of trackpad travel is two lines.
        state.handle_wheel(MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, 80.0)));
        assert!((state.interaction().rig().distance_from_origin() - 3.2).abs() < 1e-5);
    }

    #[test]
    fn test_escape_requests_exit() {
        let mut state = AppState::default();
        assert!(!state.handle_key(RawKeyEvent::pressed(KeyCode::KeyW)));
        assert!(state.handle_key(RawKeyEvent::pressed(KeyCode::Escape)));
    }

    #[test]
    fn test_focus_loss_releases_keys() {
        let mut state = AppState::default();
        state.handle_key(RawKeyEvent::pressed(KeyCode::KeyW));
        state.handle_focus_lost();
        assert!(!state.keyboard.is_held(KeyCode::KeyW));
    }

    #[test]
    fn test_redraw_without_gpu_is_noop() {
        let mut state = AppState::default();
        assert!(state.redraw().is_ok());
        assert_eq!(state.clock.frame_count(), 0);
    }
}
