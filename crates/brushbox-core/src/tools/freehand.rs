//! Freehand drawing tool.

use super::{Tool, ToolKind};
use crate::input::PointerEvent;
use crate::scene::Scene;
use crate::shapes::{Freehand, Shape, ShapeTrait};
use crate::surface::Surface;

/// Records every pointer-move sample into a stroke. The pointer-down
/// position only starts the gesture.
#[derive(Debug, Clone, Default)]
pub struct FreehandTool {
    stroke: Option<Freehand>,
}

impl FreehandTool {
    pub fn new() -> Self {
        Self::default()
    }

    /// The stroke of the gesture in progress, if any.
    pub fn stroke(&self) -> Option<&Freehand> {
        self.stroke.as_ref()
    }
}

impl Tool for FreehandTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Freehand
    }

    fn pointer_down(&mut self, scene: &mut Scene, event: &PointerEvent) {
        log::debug!("Starting freehand stroke at {:?}", event.position);
        let mut stroke = Freehand::from_points(Vec::new());
        stroke.style = scene.config().style.clone();
        self.stroke = Some(stroke);
    }

    fn pointer_move(&mut self, _scene: &mut Scene, event: &PointerEvent) {
        if let Some(stroke) = &mut self.stroke {
            stroke.add_point(event.position);
        }
    }

    fn pointer_up(&mut self, scene: &mut Scene, _event: &PointerEvent) {
        let Some(stroke) = self.stroke.take() else {
            return;
        };
        if stroke.len() < 2 {
            log::debug!("Ignoring single-point freehand stroke");
            return;
        }
        log::debug!("Committing freehand stroke of {} points", stroke.len());
        scene.add_element(Shape::Freehand(stroke));
    }

    fn draw_overlay(&self, _scene: &Scene, surface: &mut dyn Surface) {
        if let Some(stroke) = &self.stroke {
            stroke.draw(surface);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{Point, Rect};

    #[test]
    fn test_stroke_commits_all_samples() {
        let mut scene = Scene::new();
        scene.set_tool(ToolKind::Freehand);
        scene.handle_pointer_event(PointerEvent::down(Point::new(0.0, 0.0)));
        for p in [Point::new(5.0, 8.0), Point::new(12.0, -3.0), Point::new(20.0, 4.0)] {
            scene.handle_pointer_event(PointerEvent::moved(p));
        }
        scene.handle_pointer_event(PointerEvent::up(Point::new(20.0, 4.0)));

        assert_eq!(scene.len(), 1);
        let Shape::Freehand(stroke) = &scene.shapes()[0] else {
            panic!("expected a freehand stroke");
        };
        assert_eq!(stroke.len(), 3);
        assert_eq!(stroke.points[0], Point::new(5.0, 8.0));
        assert_eq!(stroke.bounds(), Rect::new(5.0, -3.0, 20.0, 8.0));
    }

    #[test]
    fn test_single_point_commits_nothing() {
        let mut scene = Scene::new();
        scene.set_tool(ToolKind::Freehand);
        scene.handle_pointer_event(PointerEvent::down(Point::new(3.0, 3.0)));
        scene.handle_pointer_event(PointerEvent::up(Point::new(3.0, 3.0)));
        assert!(scene.is_empty());

        scene.handle_pointer_event(PointerEvent::down(Point::new(3.0, 3.0)));
        scene.handle_pointer_event(PointerEvent::moved(Point::new(9.0, 9.0)));
        scene.handle_pointer_event(PointerEvent::up(Point::new(9.0, 9.0)));
        assert!(scene.is_empty());
    }

    #[test]
    fn test_stroke_is_dropped_after_up() {
        let mut scene = Scene::new();
        let mut tool = FreehandTool::new();
        tool.pointer_down(&mut scene, &PointerEvent::down(Point::ZERO));
        assert_eq!(tool.stroke().map(Freehand::len), Some(0));
        tool.pointer_up(&mut scene, &PointerEvent::up(Point::ZERO));
        assert!(tool.stroke().is_none());
    }
}
