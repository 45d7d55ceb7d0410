/// Polyview Web - canvas 2D front end for browsers
///
/// JavaScript owns the event listeners and forwards them to [`WebViewer`];
/// every camera-affecting call redraws the scene. Log records go to the
/// browser console once the module's start function has run.
use log::warn;
use polyview_core::{Camera, CameraPose, RenderStyle, Rgb, Scene, ScreenPoint, Surface, Viewport};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

const MOVE_STEP: f64 = 0.3;
const ROTATE_STEP: f64 = 0.05;
/// Radians per pixel of pointer drag
const DRAG_SENSITIVITY: f64 = 0.001;
const LINE_WIDTH: f64 = 3.0;

/// Translate a centered, y-up point to canvas pixels
fn to_canvas(width: f64, height: f64, point: ScreenPoint) -> (f64, f64) {
    (width / 2.0 + point.x, height / 2.0 - point.y)
}

/// Drawing surface over a 2D canvas context
pub struct CanvasSurface {
    context: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl CanvasSurface {
    pub fn new(context: CanvasRenderingContext2d, width: f64, height: f64) -> Self {
        Self { context, width, height }
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height)
    }

    fn trace_path(&self, points: &[ScreenPoint]) {
        self.context.begin_path();
        for (i, &point) in points.iter().enumerate() {
            let (x, y) = to_canvas(self.width, self.height, point);
            if i == 0 {
                self.context.move_to(x, y);
            } else {
                self.context.line_to(x, y);
            }
        }
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self) {
        self.context.clear_rect(0.0, 0.0, self.width, self.height);
    }

    #[allow(deprecated)]
    fn fill_polygon(&mut self, points: &[ScreenPoint], color: Rgb) {
        self.trace_path(points);
        self.context.close_path();
        self.context.set_fill_style(&JsValue::from_str(&color.to_hex()));
        self.context.fill();
    }

    #[allow(deprecated)]
    fn draw_line(&mut self, from: ScreenPoint, to: ScreenPoint, color: Rgb) {
        self.trace_path(&[from, to]);
        self.context.set_line_width(LINE_WIDTH);
        self.context.set_stroke_style(&JsValue::from_str(&color.to_hex()));
        self.context.stroke();
    }
}

/// Pointer position and camera angles captured when a drag begins
#[derive(Debug, Clone, Copy)]
struct DragStart {
    x: f64,
    y: f64,
    angle_h: f64,
    angle_v: f64,
}

#[wasm_bindgen]
pub struct WebViewer {
    canvas: HtmlCanvasElement,
    surface: CanvasSurface,
    scene: Scene,
    camera: Camera,
    style: RenderStyle,
    drag: Option<DragStart>,
}

#[wasm_bindgen]
impl WebViewer {
    /// Attach to the canvas with the given element id
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str) -> Result<WebViewer, JsValue> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| JsValue::from_str("no document available"))?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| JsValue::from_str(&format!("no element with id {:?}", canvas_id)))?
            .dyn_into::<HtmlCanvasElement>()?;
        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        let scene = Scene::cube(1.0).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let surface = CanvasSurface::new(context, canvas.width() as f64, canvas.height() as f64);
        let camera = Camera::from_pose(&CameraPose::default(), surface.viewport());

        Ok(WebViewer {
            canvas,
            surface,
            scene,
            camera,
            style: RenderStyle::default(),
            drag: None,
        })
    }

    /// Resize the canvas backing store and rescale the camera
    pub fn resize(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        self.surface.resize(width as f64, height as f64);
        self.camera.resize(self.surface.viewport());
        self.render();
    }

    /// Handle a `KeyboardEvent.key` value; returns whether it was consumed
    pub fn key_down(&mut self, key: &str) -> bool {
        match key {
            "w" => self.camera.move_forward(MOVE_STEP),
            "s" => self.camera.move_forward(-MOVE_STEP),
            "a" | "d" => {
                let step = if key == "d" { MOVE_STEP } else { -MOVE_STEP };
                if let Err(err) = self.camera.strafe(step) {
                    warn!("cannot strafe: {}", err);
                }
            }
            "q" => self.camera.move_vertical(MOVE_STEP),
            "e" => self.camera.move_vertical(-MOVE_STEP),
            "ArrowUp" => self.camera.rotate(0.0, ROTATE_STEP),
            "ArrowDown" => self.camera.rotate(0.0, -ROTATE_STEP),
            "ArrowLeft" => self.camera.rotate(ROTATE_STEP, 0.0),
            "ArrowRight" => self.camera.rotate(-ROTATE_STEP, 0.0),
            _ => return false,
        }
        self.render();
        true
    }

    pub fn drag_start(&mut self, x: f64, y: f64) {
        self.drag = Some(DragStart {
            x,
            y,
            angle_h: self.camera.angle_h,
            angle_v: self.camera.angle_v,
        });
    }

    pub fn drag_move(&mut self, x: f64, y: f64) {
        let Some(start) = self.drag else {
            return;
        };
        self.camera.set_orientation(
            start.angle_h + (start.x - x) * DRAG_SENSITIVITY,
            start.angle_v + (start.y - y) * DRAG_SENSITIVITY,
        );
        self.render();
    }

    pub fn drag_end(&mut self) {
        self.drag = None;
    }

    /// Redraw the whole scene; returns the number of faces drawn
    pub fn render(&mut self) -> usize {
        self.scene.draw(&self.camera, &mut self.surface, &self.style).drawn
    }
}

/// Route `log` output to the browser console and panics to `console.error`
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&JsValue::from_str(&format!("logger already initialized: {}", e)));
    }
}
