use std::env;

use log::{info, warn};
use meshwire::config::colors;
use meshwire::interaction::NUDGE_STEP;
use meshwire::prelude::*;
use meshwire::window::{FrameLimiter, Key, Window, WindowEvent};

/// Distance from the camera to the model origin along +z.
const CAMERA_DISTANCE: f32 = 4.0;
const FOCAL_LENGTH: f32 = 1.5;
const NEAR: f32 = 0.1;
const MARKER_SIZE: i32 = 7;

/// Perspective projection to screen pixels. Points at or behind the near
/// plane come back as NaN so the pipeline skips their edges.
fn project(p: Vec3, state: &InteractionState, width: u32, height: u32) -> Vec2 {
    let z = p.z + CAMERA_DISTANCE;
    if z <= NEAR {
        return Vec2::new(f32::NAN, f32::NAN);
    }
    let scale = state.zoom * FOCAL_LENGTH * 0.5 * width.min(height) as f32 / z;
    Vec2::new(
        width as f32 * 0.5 + (p.x + state.pan.x) * scale,
        height as f32 * 0.5 - (p.y + state.pan.y) * scale,
    )
}

struct Viewer {
    mesh: HalfEdgeMesh,
    edges: Vec<[u32; 2]>,
    state: InteractionState,
    mode: RenderMode,
    pipeline: FramePipeline,
    canvas: Canvas,
    highlight: Option<Highlight>,
    screenshots: u32,
}

impl Viewer {
    fn new(mesh: HalfEdgeMesh, width: u32, height: u32) -> Self {
        let edges = mesh.unique_edges();
        Self {
            mesh,
            edges,
            state: InteractionState::new(),
            mode: RenderMode::default(),
            pipeline: FramePipeline::default(),
            canvas: Canvas::new(width, height),
            highlight: None,
            screenshots: 0,
        }
    }

    /// Current selection of the given kind, derived from the selected vertex.
    fn selection(&self, key: Key) -> Option<Selection> {
        let v = VertexId(self.state.selected_vertex? as u32);
        let witness = self.mesh.vertex(v).ok()?.halfedge;
        match key {
            Key::V => Some(Selection::Vertex(v)),
            Key::E => witness.map(Selection::Edge),
            Key::F => {
                let h = witness?;
                Some(Selection::Face(self.mesh.halfedge(h).ok()?.face))
            }
            _ => None,
        }
    }

    fn run_query(&mut self, key: Key) {
        let Some(selection) = self.selection(key) else {
            warn!("select a vertex with Tab first");
            return;
        };
        match self.mesh.highlight(selection) {
            Ok(highlight) => {
                info!(
                    "{:?}: faces {:?}, edges {:?}, vertices {:?}, bounds {:?}",
                    selection, highlight.faces, highlight.edges, highlight.vertices, highlight.bounds
                );
                self.highlight = Some(highlight);
            }
            Err(e) => warn!("query failed: {e}"),
        }
    }

    fn save_screenshot(&mut self) {
        let path = format!("meshwire_{:03}.png", self.screenshots);
        match self.canvas.save_png(&path) {
            Ok(()) => {
                self.screenshots += 1;
                info!("saved {path}");
            }
            Err(e) => warn!("could not save {path}: {e}"),
        }
    }

    fn nudge(&mut self, dx: f32, dy: f32) {
        if let Err(e) = self.state.nudge_selected(&mut self.mesh, dx, dy) {
            warn!("{e}");
        }
    }

    fn handle_key_down(&mut self, key: Key, window: &mut Window) -> Result<(), String> {
        match key {
            Key::M => {
                self.mode = self.mode.next();
                info!("render mode: {}", self.mode);
                window.set_title(&format!("meshwire - {}", self.mode))?;
            }
            Key::Num1 => {
                self.state.set_axis(Axis::X);
            }
            Key::Num2 => {
                self.state.set_axis(Axis::Y);
            }
            Key::Num3 => {
                self.state.set_axis(Axis::Z);
            }
            Key::Tab => {
                if let Some(v) = self.state.select_next_vertex(self.mesh.vertex_count()) {
                    info!("selected vertex {v}");
                }
            }
            Key::V | Key::E | Key::F => self.run_query(key),
            Key::S => self.save_screenshot(),
            Key::Up => self.nudge(0.0, NUDGE_STEP),
            Key::Down => self.nudge(0.0, -NUDGE_STEP),
            Key::Left => self.nudge(-NUDGE_STEP, 0.0),
            Key::Right => self.nudge(NUDGE_STEP, 0.0),
        }
        Ok(())
    }

    fn handle_key_up(&mut self, key: Key) {
        let axis = match key {
            Key::Num1 => Axis::X,
            Key::Num2 => Axis::Y,
            Key::Num3 => Axis::Z,
            _ => return,
        };
        self.state.clear_axis(axis);
    }

    fn render(&mut self) {
        let (width, height) = (self.canvas.width(), self.canvas.height());
        let positions: Vec<Vec3> = self.mesh.positions().collect();
        let projected: Vec<Vec2> = positions
            .iter()
            .map(|&p| project(p, &self.state, width, height))
            .collect();
        let viewport = Viewport::from_screen(width, height);

        let input = FrameInput::new(&positions, &projected, &self.edges, viewport);
        let output = self.pipeline.run(self.mode, &input);
        let settings = *self.pipeline.settings();

        self.canvas.clear(colors::BACKGROUND);
        self.canvas.draw_output(&output, &settings);
        if self.mode == RenderMode::Points {
            let state = &self.state;
            self.canvas.draw_points(
                output
                    .points
                    .iter()
                    .map(|&p| project(p, state, width, height)),
                settings.line_color,
            );
        }

        if let Some(highlight) = &self.highlight {
            let segments: Vec<[Vec2; 2]> = highlight
                .edges
                .iter()
                .filter_map(|&[a, b]| {
                    let pa = *projected.get(a as usize)?;
                    let pb = *projected.get(b as usize)?;
                    if !pa.is_finite() || !pb.is_finite() {
                        return None;
                    }
                    viewport.clip_segment(pa, pb).clipped.as_segment()
                })
                .collect();
            self.canvas.draw_segments(&segments, settings.highlight_color);
        }

        if let Some(v) = self.state.selected_vertex {
            if let Some(&p) = projected.get(v) {
                self.canvas.draw_marker(p, MARKER_SIZE, colors::SELECTED_VERTEX);
            }
        }
    }
}

fn main() -> Result<(), String> {
    env_logger::init();

    let data = match env::args().nth(1) {
        Some(path) => MeshData::from_obj(&path).map_err(|e| e.to_string())?,
        None => MeshData::cube(),
    };
    let mesh = data.build_topology().map_err(|e| e.to_string())?;
    info!(
        "{}: {} vertices, {} faces, {} boundary edges",
        data.name,
        mesh.vertex_count(),
        mesh.face_count(),
        mesh.boundary_edge_count()
    );

    let config = ViewerConfig::default().with_title(format!("meshwire - {}", data.name));
    let mut window = Window::new(&config)?;
    let mut limiter = FrameLimiter::new(&window, &config);
    let mut viewer = Viewer::new(mesh, window.width(), window.height());

    'running: loop {
        for event in window.poll_events() {
            match event {
                WindowEvent::Quit => break 'running,
                WindowEvent::Resize(w, h) => {
                    window.resize(w, h)?;
                    viewer.canvas.resize(w, h);
                }
                WindowEvent::KeyDown(key) => viewer.handle_key_down(key, &mut window)?,
                WindowEvent::KeyUp(key) => viewer.handle_key_up(key),
                WindowEvent::MouseDown { x, y } => {
                    viewer.state.press(x, y);
                }
                WindowEvent::MouseUp => {
                    viewer.state.release();
                }
                WindowEvent::MouseMove { x, y, ctrl } => {
                    if let DragAction::Rotate { axis, angle } = viewer.state.drag(x, y, ctrl) {
                        rotate_points(viewer.mesh.positions_mut(), axis, angle);
                    }
                }
                WindowEvent::Scroll(delta) => {
                    viewer.state.scroll(delta);
                }
            }
        }

        viewer.render();
        window.present(viewer.canvas.as_bytes())?;
        limiter.wait_and_get_delta(&window);
    }

    Ok(())
}
