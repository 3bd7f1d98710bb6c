//! Selection tool: pick, move, resize, rotate and rubber-band select.

use super::{Tool, ToolKind};
use crate::config::EditorConfig;
use crate::geometry::rotated_extent;
use crate::input::PointerEvent;
use crate::scene::Scene;
use crate::selection::{HandleKind, SelectionFrame};
use crate::shapes::{MoveOffsets, Shape, ShapeId};
use crate::surface::{Surface, with_saved};
use kurbo::{Point, Rect};
use std::collections::HashSet;
use std::f64::consts::TAU;

/// Dash pattern of the multi-selection and rubber-band borders.
const SELECTION_DASH: [f64; 2] = [4.0, 4.0];

/// What the select tool is doing between pointer-down and pointer-up.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SelectState {
    #[default]
    Idle,
    /// Dragging a handle of the single selected shape.
    Resizing {
        shape_id: ShapeId,
        handle: HandleKind,
        /// Pointer position at pointer-down.
        origin: Point,
        /// Shape bounds at pointer-down.
        start_bounds: Rect,
        /// Frame center at pointer-down.
        center: Point,
    },
    /// Dragging the selection. Offsets are captured once at pointer-down.
    Moving { offsets: Vec<(ShapeId, MoveOffsets)> },
    /// Dragging a selection rectangle over empty space.
    RubberBand { anchor: Point, current: Point },
}

/// The default tool.
#[derive(Debug, Clone, Default)]
pub struct SelectTool {
    state: SelectState,
}

impl SelectTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SelectState {
        &self.state
    }

    fn begin_move(&mut self, scene: &Scene, point: Point) {
        let offsets: Vec<_> = scene
            .selected_shapes()
            .into_iter()
            .map(|shape| (shape.id(), shape.move_offsets(point)))
            .collect();
        log::debug!("Moving {} shape(s)", offsets.len());
        self.state = SelectState::Moving { offsets };
    }
}

impl Tool for SelectTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Select
    }

    fn pointer_down(&mut self, scene: &mut Scene, event: &PointerEvent) {
        let point = event.position;
        let metrics = scene.config().handles;
        let frame = SelectionFrame::for_selection(&scene.selected_shapes(), &metrics);

        // Handles are only offered for a single selection, and win over
        // whatever shape lies underneath them.
        if let (Some(frame), [shape_id]) = (&frame, scene.selected_ids().as_slice()) {
            if let Some(handle) = frame.hit_handle(point, &metrics) {
                log::debug!("Grabbed {:?} handle of {shape_id}", handle.kind);
                self.state = SelectState::Resizing {
                    shape_id: *shape_id,
                    handle: handle.kind,
                    origin: point,
                    start_bounds: frame.bounds,
                    center: frame.center(),
                };
                return;
            }
        }

        let in_frame = frame.as_ref().is_some_and(|f| f.contains(point));
        match scene.hit_shape(point) {
            Some(id) if scene.shape(id).is_some_and(Shape::is_selected) => {}
            Some(id) if event.modifiers.extends_selection() => {
                if let Err(err) = scene.update_selected(id) {
                    log::warn!("{err}");
                }
            }
            // Clicking a shape that sits inside the current selection box
            // drags the whole selection.
            Some(_) if in_frame => {}
            Some(id) => {
                scene.clear_selection();
                if let Err(err) = scene.update_selected(id) {
                    log::warn!("{err}");
                }
            }
            None if in_frame => {}
            None => {
                scene.clear_selection();
                self.state = SelectState::RubberBand {
                    anchor: point,
                    current: point,
                };
                return;
            }
        }
        self.begin_move(scene, point);
    }

    fn pointer_move(&mut self, scene: &mut Scene, event: &PointerEvent) {
        let point = event.position;
        match &mut self.state {
            SelectState::Idle => {}
            SelectState::Resizing {
                shape_id,
                handle,
                origin,
                start_bounds,
                center,
            } => {
                let Some(shape) = scene.shape_mut(*shape_id) else {
                    log::warn!("Resized shape {shape_id} is gone");
                    return;
                };
                let result = match *handle {
                    HandleKind::Rotate => {
                        let d = point - *center;
                        shape.set_rotation(d.y.atan2(d.x));
                        Ok(())
                    }
                    HandleKind::Endpoint(endpoint) => shape.set_endpoint(endpoint, point),
                    kind => shape.resize(*start_bounds, kind, point - *origin),
                };
                if let Err(err) = result {
                    log::warn!("{err}");
                }
            }
            SelectState::Moving { offsets } => {
                for (id, offsets) in offsets.iter() {
                    if let Some(shape) = scene.shape_mut(*id) {
                        shape.translate(point, offsets);
                    }
                }
            }
            SelectState::RubberBand { anchor, current } => {
                *current = point;
                let enclosed = enclosed_by(scene, Rect::from_points(*anchor, *current));
                scene.set_selection(&enclosed);
            }
        }
    }

    fn pointer_up(&mut self, scene: &mut Scene, _event: &PointerEvent) {
        match std::mem::take(&mut self.state) {
            SelectState::Resizing { shape_id, .. } => {
                if let Some(shape) = scene.shape_mut(shape_id) {
                    shape.normalize();
                }
            }
            SelectState::RubberBand { .. } => {
                log::debug!("Rubber band selected {} shape(s)", scene.selected_ids().len());
            }
            SelectState::Moving { .. } | SelectState::Idle => {}
        }
    }

    fn draw_overlay(&self, scene: &Scene, surface: &mut dyn Surface) {
        let config = scene.config();
        let selected = scene.selected_shapes();
        for shape in &selected {
            draw_outline(surface, shape, config);
        }
        if let Some(frame) = SelectionFrame::for_selection(&selected, &config.handles) {
            if selected.len() > 1 {
                draw_group_border(surface, frame.bounds, config);
            }
            draw_handles(surface, &frame, config);
        }
        if let SelectState::RubberBand { anchor, current } = self.state {
            draw_marquee(surface, Rect::from_points(anchor, current), config);
        }
    }
}

/// Shapes whose rotated extent lies entirely inside `marquee`.
fn enclosed_by(scene: &Scene, marquee: Rect) -> HashSet<ShapeId> {
    scene
        .shapes()
        .iter()
        .filter(|shape| {
            let extent = rotated_extent(shape.bounds(), shape.rotation());
            extent.x0 >= marquee.x0
                && extent.y0 >= marquee.y0
                && extent.x1 <= marquee.x1
                && extent.y1 <= marquee.y1
        })
        .map(Shape::id)
        .collect()
}

/// Border around one selected shape, rotated with it. A line is traced
/// along its segment instead.
fn draw_outline(surface: &mut dyn Surface, shape: &Shape, config: &EditorConfig) {
    let bounds = shape.bounds();
    let pad = config.handles.size / 2.0;
    let center = bounds.center();
    with_saved(surface, |s| {
        s.translate(center.to_vec2());
        s.rotate(shape.rotation());
        s.begin_path();
        match shape {
            Shape::Line(line) => {
                s.move_to((line.start - center).to_point());
                s.line_to((line.end - center).to_point());
            }
            _ => s.rect(Rect::from_center_size(Point::ZERO, bounds.size()).inflate(pad, pad)),
        }
        s.set_stroke_color(config.selection.border.into());
        s.set_line_width(1.0);
        s.stroke();
    });
}

fn draw_group_border(surface: &mut dyn Surface, bounds: Rect, config: &EditorConfig) {
    let pad = config.handles.size / 2.0;
    with_saved(surface, |s| {
        s.begin_path();
        s.rect(bounds.inflate(pad, pad));
        s.set_stroke_color(config.selection.border.into());
        s.set_line_width(1.0);
        s.set_line_dash(&SELECTION_DASH);
        s.stroke();
    });
}

/// Squares for resize handles, circles for rotation and endpoints, all
/// turned with the frame.
fn draw_handles(surface: &mut dyn Surface, frame: &SelectionFrame, config: &EditorConfig) {
    if frame.handles.is_empty() {
        return;
    }
    let size = config.handles.size;
    let center = frame.center();
    with_saved(surface, |s| {
        s.translate(center.to_vec2());
        s.rotate(frame.angle);
        s.set_stroke_color(config.selection.border.into());
        s.set_fill_color(config.selection.handle_fill.into());
        s.set_line_width(1.0);
        for handle in &frame.handles {
            let local = (handle.position - center).to_point();
            s.begin_path();
            match handle.kind {
                HandleKind::Corner(_) | HandleKind::Edge(_) => {
                    s.rect(Rect::from_center_size(local, (size, size)));
                }
                HandleKind::Rotate | HandleKind::Endpoint(_) => {
                    s.arc(local, size / 2.0, 0.0, TAU);
                }
            }
            s.fill();
            s.stroke();
        }
    });
}

fn draw_marquee(surface: &mut dyn Surface, marquee: Rect, config: &EditorConfig) {
    with_saved(surface, |s| {
        s.begin_path();
        s.rect(marquee);
        s.set_fill_color(config.selection.marquee_fill.into());
        s.fill();
        s.set_stroke_color(config.selection.border.into());
        s.set_line_width(1.0);
        s.set_line_dash(&SELECTION_DASH);
        s.stroke();
    });
}
