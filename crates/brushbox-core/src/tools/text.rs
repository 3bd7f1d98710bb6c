//! Text placement tool.

use super::{Tool, ToolKind};
use crate::input::PointerEvent;
use crate::scene::Scene;

/// Places a text anchor where the pointer is released.
///
/// The tool does not drag. On pointer-up it hands the anchor to the scene,
/// which asks the text host for an editor, and switches back to selection.
/// The content arrives later through [`Scene::commit_text`].
#[derive(Debug, Clone, Default)]
pub struct TextTool;

impl TextTool {
    pub fn new() -> Self {
        Self
    }
}

impl Tool for TextTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Text
    }

    fn pointer_down(&mut self, _scene: &mut Scene, _event: &PointerEvent) {}

    fn pointer_up(&mut self, scene: &mut Scene, event: &PointerEvent) {
        log::debug!("Text anchor at {:?}", event.position);
        scene.request_text_entry(event.position);
        scene.set_tool(ToolKind::Select);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::Shape;
    use kurbo::Point;

    #[test]
    fn test_up_records_anchor_and_switches_tool() {
        let mut scene = Scene::new();
        scene.set_tool(ToolKind::Text);
        scene.handle_pointer_event(PointerEvent::down(Point::new(10.0, 10.0)));
        assert!(scene.pending_text().is_none());
        scene.handle_pointer_event(PointerEvent::up(Point::new(12.0, 14.0)));

        assert_eq!(scene.pending_text(), Some(Point::new(12.0, 14.0)));
        assert_eq!(scene.active_tool_kind(), Some(ToolKind::Select));
        assert!(scene.is_empty());
    }

    #[test]
    fn test_commit_after_placement() {
        let mut scene = Scene::new();
        scene.set_tool(ToolKind::Text);
        scene.handle_pointer_event(PointerEvent::down(Point::new(0.0, 0.0)));
        scene.handle_pointer_event(PointerEvent::up(Point::new(0.0, 0.0)));
        let id = scene.commit_text("note").unwrap();
        assert!(matches!(scene.shape(id), Some(Shape::Text(t)) if t.content() == "note"));
    }
}
