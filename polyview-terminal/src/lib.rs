/// Terminal front end: crossterm input dispatch and character-grid drawing
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        MouseButton, MouseEvent, MouseEventKind,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal,
};
use log::{debug, warn};
use polyview_core::{Camera, FrameStats, RenderStyle, Scene};
use std::io::{self, stdout, Write};

pub mod config;
pub mod renderer;

pub use config::{ConfigError, Controls, ViewerConfig};
pub use renderer::AsciiSurface;

/// Pointer position and camera angles captured when a drag begins
#[derive(Debug, Clone, Copy)]
struct DragStart {
    column: u16,
    row: u16,
    angle_h: f64,
    angle_v: f64,
}

/// Interactive viewer session
pub struct TerminalApp {
    scene: Scene,
    camera: Camera,
    surface: AsciiSurface,
    style: RenderStyle,
    controls: Controls,
    drag: Option<DragStart>,
    running: bool,
    dirty: bool,
    last_stats: FrameStats,
}

impl TerminalApp {
    pub fn new(scene: Scene, config: &ViewerConfig) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(Self::with_size(scene, config, width, height))
    }

    pub fn with_size(scene: Scene, config: &ViewerConfig, width: u16, height: u16) -> Self {
        let surface = AsciiSurface::new(width as usize, height as usize, config.render.cell_aspect);
        let camera = Camera::from_pose(&config.camera, surface.viewport());

        Self {
            scene,
            camera,
            surface,
            style: config.render.style(),
            controls: config.controls,
            drag: None,
            running: true,
            dirty: true,
            last_stats: FrameStats::default(),
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide, EnableMouseCapture)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), DisableMouseCapture, terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        while self.running {
            if self.dirty {
                self.render()?;
                self.dirty = false;
            }
            let event = event::read()?;
            self.handle_event(event);
        }
        Ok(())
    }

    /// Apply one input event to the camera; marks the frame dirty when the
    /// view changed
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(width, height) => {
                self.surface.resize(width as usize, height as usize);
                self.camera.resize(self.surface.viewport());
                self.dirty = true;
            }
            _ => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind == KeyEventKind::Release {
            return;
        }
        let step = self.controls.move_step;
        let turn = self.controls.rotate_step;

        match key.code {
            KeyCode::Esc => self.running = false,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => self.running = false,
            KeyCode::Char('w') => self.camera.move_forward(step),
            KeyCode::Char('s') => self.camera.move_forward(-step),
            KeyCode::Char('a') => self.strafe(-step),
            KeyCode::Char('d') => self.strafe(step),
            KeyCode::Char('q') => self.camera.move_vertical(step),
            KeyCode::Char('e') => self.camera.move_vertical(-step),
            KeyCode::Up => self.camera.rotate(0.0, turn),
            KeyCode::Down => self.camera.rotate(0.0, -turn),
            KeyCode::Left => self.camera.rotate(turn, 0.0),
            KeyCode::Right => self.camera.rotate(-turn, 0.0),
            _ => return,
        }
        debug!(
            "camera at {:?}, yaw {:.3}, pitch {:.3}",
            self.camera.position, self.camera.angle_h, self.camera.angle_v
        );
        self.dirty = true;
    }

    fn strafe(&mut self, step: f64) {
        if let Err(err) = self.camera.strafe(step) {
            warn!("cannot strafe: {}", err);
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.drag = Some(DragStart {
                    column: mouse.column,
                    row: mouse.row,
                    angle_h: self.camera.angle_h,
                    angle_v: self.camera.angle_v,
                });
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                let Some(start) = self.drag else {
                    return;
                };
                let delta_x = start.column as f64 - mouse.column as f64;
                // Rows are taller than columns are wide
                let delta_y = (start.row as f64 - mouse.row as f64) * self.surface.cell_aspect();
                let sensitivity = self.controls.drag_sensitivity;
                self.camera
                    .set_orientation(start.angle_h + delta_x * sensitivity, start.angle_v + delta_y * sensitivity);
                self.dirty = true;
            }
            MouseEventKind::Up(MouseButton::Left) => self.drag = None,
            _ => {}
        }
    }

    fn render(&mut self) -> io::Result<()> {
        self.last_stats = self.scene.draw(&self.camera, &mut self.surface, &self.style);

        let mut stdout = stdout();
        self.surface.draw(&mut stdout)?;

        // Draw UI overlay
        let position = self.camera.position;
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "Polyview | pos ({:.2}, {:.2}, {:.2}) yaw {:.2} pitch {:.2} | faces {} | WASD/QE=Move Arrows/Drag=Look Esc=Quit",
                position.x, position.y, position.z, self.camera.angle_h, self.camera.angle_v, self.last_stats.drawn
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polyview_core::{Point3, Viewport};

    fn app() -> TerminalApp {
        TerminalApp::with_size(Scene::cube(1.0).unwrap(), &ViewerConfig::default(), 80, 24)
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_initial_camera_uses_config_pose() {
        let app = app();
        assert_eq!(app.camera().position, Point3::new(-1.0, 1.0, -1.0));
        assert_eq!(app.camera().viewport(), Viewport::new(80.0, 48.0));
    }

    #[test]
    fn test_forward_and_back_cancel() {
        let mut app = app();
        let start = app.camera().position;
        let angle = *app.camera().angle();

        app.handle_event(key(KeyCode::Char('w')));
        let moved = app.camera().position - start;
        assert!((moved - angle * 0.3).norm() < 1e-12);

        app.handle_event(key(KeyCode::Char('s')));
        assert!((app.camera().position - start).norm() < 1e-12);
    }

    #[test]
    fn test_vertical_and_strafe_keys() {
        let mut app = app();
        let start = app.camera().position;

        app.handle_event(key(KeyCode::Char('q')));
        assert!((app.camera().position.y - (start.y + 0.3)).abs() < 1e-12);
        app.handle_event(key(KeyCode::Char('e')));

        app.handle_event(key(KeyCode::Char('d')));
        let right = app.camera().position - start;
        assert!((right.norm() - 0.3).abs() < 1e-12);
        assert!(right.dot(app.camera().angle()).abs() < 1e-12);
        assert!(right.y.abs() < 1e-12);
    }

    #[test]
    fn test_arrow_keys_rotate() {
        let mut app = app();
        let (h, v) = (app.camera().angle_h, app.camera().angle_v);

        app.handle_event(key(KeyCode::Left));
        app.handle_event(key(KeyCode::Up));
        assert!((app.camera().angle_h - (h + 0.05)).abs() < 1e-12);
        assert!((app.camera().angle_v - (v + 0.05)).abs() < 1e-12);

        app.handle_event(key(KeyCode::Right));
        app.handle_event(key(KeyCode::Down));
        assert!((app.camera().angle_h - h).abs() < 1e-12);
        assert!((app.camera().angle_v - v).abs() < 1e-12);
    }

    #[test]
    fn test_drag_rotates_relative_to_start() {
        let mut app = app();
        let (h, v) = (app.camera().angle_h, app.camera().angle_v);

        app.handle_event(mouse(MouseEventKind::Down(MouseButton::Left), 40, 12));
        app.handle_event(mouse(MouseEventKind::Drag(MouseButton::Left), 30, 10));
        app.handle_event(mouse(MouseEventKind::Drag(MouseButton::Left), 35, 11));
        // 5 columns left, 1 row up
        assert!((app.camera().angle_h - (h + 5.0 * 0.02)).abs() < 1e-12);
        assert!((app.camera().angle_v - (v + 2.0 * 0.02)).abs() < 1e-12);

        app.handle_event(mouse(MouseEventKind::Up(MouseButton::Left), 35, 11));
        app.handle_event(mouse(MouseEventKind::Drag(MouseButton::Left), 0, 0));
        assert!((app.camera().angle_h - (h + 5.0 * 0.02)).abs() < 1e-12);
    }

    #[test]
    fn test_resize_rescales_camera() {
        let mut app = app();
        app.handle_event(Event::Resize(120, 40));
        assert_eq!(app.camera().viewport(), Viewport::new(120.0, 80.0));
        assert!((app.camera().basis_y().norm() - 120.0).abs() < 1e-9);
    }

    #[test]
    fn test_escape_and_ctrl_c_quit() {
        let mut app = app();
        app.handle_event(key(KeyCode::Char('x')));
        assert!(app.is_running());
        app.handle_event(key(KeyCode::Esc));
        assert!(!app.is_running());

        let mut app = self::app();
        app.handle_event(Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!app.is_running());
    }
}
