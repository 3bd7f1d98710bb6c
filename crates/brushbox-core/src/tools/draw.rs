//! Drag-to-draw tools: rectangle, ellipse and line.

use super::{Tool, ToolKind};
use crate::input::PointerEvent;
use crate::scene::Scene;
use crate::shapes::{Ellipse, Line, Rectangle, Shape, ShapeStyle};
use crate::surface::Surface;
use kurbo::Point;

/// Which shape a [`DragShapeTool`] draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragShape {
    Rectangle,
    Ellipse,
    Line,
}

impl DragShape {
    /// Signed shape spanning `anchor` to `current`.
    fn build(self, anchor: Point, current: Point, style: &ShapeStyle) -> Shape {
        let mut shape = match self {
            DragShape::Rectangle => Shape::Rectangle(Rectangle::spanning(anchor, current)),
            DragShape::Ellipse => Shape::Ellipse(Ellipse::spanning(anchor, current)),
            DragShape::Line => Shape::Line(Line::new(anchor, current)),
        };
        *shape.style_mut() = style.clone();
        shape
    }

    /// A drag that leaves no area (or no length, for a line) is not drawn.
    fn is_degenerate(self, anchor: Point, current: Point) -> bool {
        match self {
            DragShape::Line => anchor == current,
            DragShape::Rectangle | DragShape::Ellipse => {
                anchor.x == current.x || anchor.y == current.y
            }
        }
    }
}

/// Drags out a shape from the pointer-down position to the pointer.
#[derive(Debug, Clone)]
pub struct DragShapeTool {
    shape: DragShape,
    /// Preview of the gesture in progress.
    preview: Option<DragPreview>,
}

#[derive(Debug, Clone)]
struct DragPreview {
    anchor: Point,
    shape: Shape,
}

impl DragShapeTool {
    pub fn new(shape: DragShape) -> Self {
        Self { shape, preview: None }
    }

    /// The transient shape of the gesture in progress, if any.
    pub fn preview(&self) -> Option<&Shape> {
        self.preview.as_ref().map(|p| &p.shape)
    }
}

impl Tool for DragShapeTool {
    fn kind(&self) -> ToolKind {
        match self.shape {
            DragShape::Rectangle => ToolKind::Rectangle,
            DragShape::Ellipse => ToolKind::Ellipse,
            DragShape::Line => ToolKind::Line,
        }
    }

    fn pointer_down(&mut self, scene: &mut Scene, event: &PointerEvent) {
        let anchor = event.position;
        self.preview = Some(DragPreview {
            anchor,
            shape: self.shape.build(anchor, anchor, &scene.config().style),
        });
    }

    fn pointer_move(&mut self, scene: &mut Scene, event: &PointerEvent) {
        if let Some(preview) = &mut self.preview {
            preview.shape = self.shape.build(preview.anchor, event.position, &scene.config().style);
        }
    }

    fn pointer_up(&mut self, scene: &mut Scene, event: &PointerEvent) {
        let Some(DragPreview { anchor, .. }) = self.preview.take() else {
            return;
        };
        if self.shape.is_degenerate(anchor, event.position) {
            log::debug!("Ignoring zero-size {:?} drag at {anchor:?}", self.shape);
            return;
        }
        let mut shape = self.shape.build(anchor, event.position, &scene.config().style);
        shape.normalize();
        scene.add_element(shape);
    }

    fn draw_overlay(&self, _scene: &Scene, surface: &mut dyn Surface) {
        if let Some(shape) = self.preview() {
            shape.draw(surface);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Rect;

    fn drag(scene: &mut Scene, from: Point, via: Point, to: Point) {
        scene.handle_pointer_event(PointerEvent::down(from));
        scene.handle_pointer_event(PointerEvent::moved(via));
        scene.handle_pointer_event(PointerEvent::up(to));
    }

    #[test]
    fn test_rectangle_commits_normalized() {
        let mut scene = Scene::new();
        scene.set_tool(ToolKind::Rectangle);
        drag(&mut scene, Point::new(100.0, 100.0), Point::new(70.0, 90.0), Point::new(40.0, 60.0));

        assert_eq!(scene.len(), 1);
        let Shape::Rectangle(rect) = &scene.shapes()[0] else {
            panic!("expected a rectangle");
        };
        assert_eq!(rect.position, Point::new(40.0, 60.0));
        assert_eq!((rect.width, rect.height), (60.0, 40.0));
        assert_eq!(scene.active_tool_kind(), Some(ToolKind::Rectangle));
    }

    #[test]
    fn test_zero_length_drag_commits_nothing() {
        let mut scene = Scene::new();
        for kind in [ToolKind::Rectangle, ToolKind::Ellipse, ToolKind::Line] {
            scene.set_tool(kind);
            let p = Point::new(10.0, 10.0);
            drag(&mut scene, p, Point::new(30.0, 30.0), p);
        }
        assert!(scene.is_empty());
    }

    #[test]
    fn test_flat_rectangle_commits_nothing() {
        let mut scene = Scene::new();
        scene.set_tool(ToolKind::Ellipse);
        drag(&mut scene, Point::new(0.0, 0.0), Point::new(5.0, 5.0), Point::new(50.0, 0.0));
        assert!(scene.is_empty());

        // A horizontal line still has length.
        scene.set_tool(ToolKind::Line);
        drag(&mut scene, Point::new(0.0, 0.0), Point::new(5.0, 5.0), Point::new(50.0, 0.0));
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn test_line_keeps_direction() {
        let mut scene = Scene::new();
        scene.set_tool(ToolKind::Line);
        drag(&mut scene, Point::new(80.0, 10.0), Point::new(50.0, 50.0), Point::new(20.0, 90.0));
        let Shape::Line(line) = &scene.shapes()[0] else {
            panic!("expected a line");
        };
        assert_eq!(line.start, Point::new(80.0, 10.0));
        assert_eq!(line.end, Point::new(20.0, 90.0));
        assert_eq!(scene.shapes()[0].bounds(), Rect::new(20.0, 10.0, 80.0, 90.0));
    }

    #[test]
    fn test_preview_tracks_pointer() {
        let mut scene = Scene::new();
        let mut tool = DragShapeTool::new(DragShape::Ellipse);
        tool.pointer_down(&mut scene, &PointerEvent::down(Point::new(0.0, 0.0)));
        tool.pointer_move(&mut scene, &PointerEvent::moved(Point::new(-20.0, 10.0)));
        let preview = tool.preview().unwrap();
        assert_eq!(preview.bounds(), Rect::new(-20.0, 0.0, 0.0, 10.0));
        assert!(scene.is_empty());

        tool.pointer_up(&mut scene, &PointerEvent::up(Point::new(-20.0, 10.0)));
        assert!(tool.preview().is_none());
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn test_new_shapes_use_configured_style() {
        let mut config = crate::config::EditorConfig::default();
        config.style.stroke_width = 4.0;
        let mut scene = Scene::with_config(config);
        scene.set_tool(ToolKind::Rectangle);
        drag(&mut scene, Point::new(0.0, 0.0), Point::new(5.0, 5.0), Point::new(10.0, 10.0));
        assert_eq!(scene.shapes()[0].style().stroke_width, 4.0);
    }
}
