//! The scene: shapes, selection, active tool and rendering.

use crate::config::EditorConfig;
use crate::error::{BrushboxError, Result};
use crate::input::{GestureCapture, PointerEvent, PointerPhase};
use crate::shapes::{APPROXIMATE_CHAR_WIDTH, Shape, ShapeId, Text};
use crate::surface::{Surface, TextEditHost, with_saved};
use crate::tools::{Tool, ToolKind};
use kurbo::{Point, Rect};
use std::collections::HashSet;

/// Owns the shapes (in z-order, last is topmost), the active tool and the
/// collaborators it draws through.
///
/// The `selected` flag on each shape is only ever changed here.
pub struct Scene {
    shapes: Vec<Shape>,
    active_tool: Option<Box<dyn Tool>>,
    surface: Option<Box<dyn Surface>>,
    text_host: Option<Box<dyn TextEditHost>>,
    /// Anchor recorded by the text tool, waiting for the host's string.
    pending_text: Option<Point>,
    capture: GestureCapture,
    config: EditorConfig,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("shapes", &self.shapes)
            .field("active_tool", &self.active_tool_kind())
            .field("has_surface", &self.surface.is_some())
            .field("pending_text", &self.pending_text)
            .field("capture", &self.capture)
            .finish_non_exhaustive()
    }
}

impl Scene {
    /// Create an empty scene with the default configuration and the
    /// select tool active.
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    pub fn with_config(config: EditorConfig) -> Self {
        Self {
            shapes: Vec::new(),
            active_tool: Some(ToolKind::Select.create()),
            surface: None,
            text_host: None,
            pending_text: None,
            capture: GestureCapture::new(),
            config,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    // --- Collaborators ---

    /// Attach a drawing surface and redraw onto it.
    pub fn attach_surface(&mut self, surface: Box<dyn Surface>) {
        self.surface = Some(surface);
        self.refresh();
    }

    /// Detach and return the drawing surface. Later renders are skipped.
    pub fn detach_surface(&mut self) -> Option<Box<dyn Surface>> {
        self.surface.take()
    }

    pub fn attach_text_host(&mut self, host: Box<dyn TextEditHost>) {
        self.text_host = Some(host);
    }

    pub fn detach_text_host(&mut self) -> Option<Box<dyn TextEditHost>> {
        self.text_host.take()
    }

    // --- Shapes ---

    /// Append a shape on top of all others.
    pub fn add_element(&mut self, shape: Shape) -> ShapeId {
        let id = shape.id();
        log::debug!("Adding {} {id}", shape.kind_name());
        self.shapes.push(shape);
        id
    }

    /// All shapes, bottom to top.
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id() == id)
    }

    pub fn shape_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.iter_mut().find(|s| s.id() == id)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Remove every shape and redraw.
    pub fn clear_scene(&mut self) {
        self.shapes.clear();
        self.refresh();
    }

    /// Topmost shape containing `point`.
    pub fn hit_shape(&self, point: Point) -> Option<ShapeId> {
        self.shapes.iter().rev().find(|s| s.contains(point)).map(Shape::id)
    }

    // --- Selection ---

    /// Selected shapes, bottom to top.
    pub fn selected_shapes(&self) -> Vec<&Shape> {
        self.shapes.iter().filter(|s| s.is_selected()).collect()
    }

    pub fn selected_ids(&self) -> Vec<ShapeId> {
        self.shapes.iter().filter(|s| s.is_selected()).map(Shape::id).collect()
    }

    pub fn clear_selection(&mut self) {
        for shape in &mut self.shapes {
            shape.set_selected(false);
        }
    }

    /// Mark one shape selected without touching the others.
    pub fn update_selected(&mut self, id: ShapeId) -> Result<()> {
        let shape = self.shape_mut(id).ok_or(BrushboxError::ShapeNotFound(id))?;
        shape.set_selected(true);
        Ok(())
    }

    /// Make `ids` exactly the selected set.
    pub fn set_selection(&mut self, ids: &HashSet<ShapeId>) {
        for shape in &mut self.shapes {
            let selected = ids.contains(&shape.id());
            shape.set_selected(selected);
        }
    }

    // --- Tools ---

    /// Replace the active tool.
    ///
    /// A gesture still in progress is ended first: the outgoing tool gets
    /// its pointer-up at the last tracked position, and the real up that
    /// follows is dropped.
    pub fn set_active_tool(&mut self, tool: Box<dyn Tool>) {
        if let Some(position) = self.capture.last_position() {
            self.capture.end();
            log::debug!("Ending active gesture at {position:?} on tool change");
            let up = PointerEvent::up(position);
            self.dispatch(|outgoing, scene| outgoing.pointer_up(scene, &up));
        }
        log::debug!("Active tool: {}", tool.kind());
        self.active_tool = Some(tool);
    }

    pub fn set_tool(&mut self, kind: ToolKind) {
        self.set_active_tool(kind.create());
    }

    /// Switch tools by name. Unknown names leave the current tool active.
    pub fn select_tool_by_name(&mut self, name: &str) -> Result<ToolKind> {
        match name.parse::<ToolKind>() {
            Ok(kind) => {
                self.set_tool(kind);
                self.refresh();
                Ok(kind)
            }
            Err(err) => {
                log::warn!("{err}");
                Err(err)
            }
        }
    }

    pub fn active_tool_kind(&self) -> Option<ToolKind> {
        self.active_tool.as_ref().map(|tool| tool.kind())
    }

    // --- Pointer input ---

    /// Route a pointer event to the active tool and redraw.
    ///
    /// Move and up events outside a captured gesture are dropped, as is a
    /// second down while a gesture is active.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) {
        let accepted = match event.phase {
            PointerPhase::Down => self.capture.begin(event.position),
            PointerPhase::Move => self.capture.track(event.position),
            PointerPhase::Up => self.capture.end(),
        };
        if !accepted {
            log::debug!("Dropping {:?} outside its gesture", event.phase);
            return;
        }

        self.dispatch(|tool, scene| match event.phase {
            PointerPhase::Down => tool.pointer_down(scene, &event),
            PointerPhase::Move => tool.pointer_move(scene, &event),
            PointerPhase::Up => tool.pointer_up(scene, &event),
        });
        self.refresh();
    }

    pub fn is_gesture_active(&self) -> bool {
        self.capture.is_active()
    }

    /// Lend the active tool mutable access to the scene.
    ///
    /// The tool is taken out of its slot for the call and put back unless
    /// it installed a replacement meanwhile.
    fn dispatch(&mut self, f: impl FnOnce(&mut dyn Tool, &mut Scene)) {
        let Some(mut tool) = self.active_tool.take() else {
            return;
        };
        f(tool.as_mut(), self);
        if self.active_tool.is_none() {
            self.active_tool = Some(tool);
        }
    }

    // --- Text entry ---

    /// Remember where text should go and ask the host for an editor there.
    pub fn request_text_entry(&mut self, anchor: Point) {
        self.pending_text = Some(anchor);
        let text = &self.config.text;
        match self.text_host.as_mut() {
            Some(host) => host.show_editor(anchor, &text.font_family, text.font_size),
            None => log::warn!("No text host attached; text at {anchor:?} can only be committed directly"),
        }
    }

    pub fn pending_text(&self) -> Option<Point> {
        self.pending_text
    }

    /// Turn the host's string into a text shape at the pending anchor.
    ///
    /// Blank content, or no pending anchor, commits nothing. The pending
    /// anchor is consumed either way.
    pub fn commit_text(&mut self, content: &str) -> Option<ShapeId> {
        let anchor = self.pending_text.take()?;
        if content.trim().is_empty() {
            log::debug!("Discarding empty text at {anchor:?}");
            self.refresh();
            return None;
        }

        let defaults = &self.config.text;
        let mut text = Text::new(anchor, content, defaults.font_family.as_str(), defaults.font_size)
            .with_line_height(defaults.line_height);
        text.style = self.config.style.clone();
        let min_width = defaults.min_width;
        match self.surface.as_deref_mut() {
            Some(surface) => with_saved(surface, |s| {
                s.set_font(&text.font_family, text.font_size);
                text.fit(|line| s.measure_text(line), min_width);
            }),
            None => {
                let advance = text.font_size * APPROXIMATE_CHAR_WIDTH;
                text.fit(|line| line.chars().count() as f64 * advance, min_width);
            }
        }

        let id = self.add_element(Shape::Text(text));
        self.refresh();
        Some(id)
    }

    /// Drop the pending text anchor without creating a shape.
    pub fn cancel_text(&mut self) {
        self.pending_text = None;
    }

    // --- Rendering ---

    /// Erase the whole surface.
    pub fn clear_canvas(&mut self) -> Result<()> {
        let surface = self.surface.as_deref_mut().ok_or(BrushboxError::SurfaceUnavailable)?;
        let size = surface.size();
        surface.clear_rect(Rect::from_origin_size(Point::ZERO, size));
        Ok(())
    }

    /// Draw one transient shape, or every shape bottom to top when `shape`
    /// is `None`.
    pub fn render(&mut self, shape: Option<&Shape>) -> Result<()> {
        let surface = self.surface.as_deref_mut().ok_or(BrushboxError::SurfaceUnavailable)?;
        match shape {
            Some(shape) => shape.draw(surface),
            None => {
                for shape in &self.shapes {
                    shape.draw(surface);
                }
            }
        }
        Ok(())
    }

    /// Clear, draw every shape, then the active tool's overlay.
    pub fn refresh(&mut self) {
        let Some(mut surface) = self.surface.take() else {
            log::warn!("Skipping redraw: {}", BrushboxError::SurfaceUnavailable);
            return;
        };
        let size = surface.size();
        surface.clear_rect(Rect::from_origin_size(Point::ZERO, size));
        for shape in &self.shapes {
            shape.draw(surface.as_mut());
        }
        if let Some(tool) = &self.active_tool {
            tool.draw_overlay(self, surface.as_mut());
        }
        self.surface = Some(surface);
    }
}
