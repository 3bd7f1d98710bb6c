//! Drawing surface and text host abstractions.
//!
//! The core never owns pixels. It issues immediate-mode 2D primitives to a
//! [`Surface`], and asks a [`TextEditHost`] to show a text editor when the
//! text tool is used.

use kurbo::{Point, Rect, Size, Vec2};
use peniko::Color;
use std::cell::RefCell;
use std::rc::Rc;

/// Vertical alignment used by [`Surface::fill_text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextBaseline {
    /// The anchor is the top of the em box.
    #[default]
    Top,
    /// The anchor is the middle of the em box.
    Middle,
    /// The anchor is the alphabetic baseline.
    Alphabetic,
}

/// An imperative 2D drawing context.
///
/// Transforms and paint state are part of the saved state, so everything
/// set between [`save`](Surface::save) and [`restore`](Surface::restore) is
/// undone by the restore. Path construction accumulates into a current
/// path that [`stroke`](Surface::stroke) and [`fill`](Surface::fill) paint.
pub trait Surface {
    /// Size of the drawable area.
    fn size(&self) -> Size;

    /// Erase everything inside `rect`.
    fn clear_rect(&mut self, rect: Rect);

    /// Push the current transform and paint state.
    fn save(&mut self);

    /// Pop the state pushed by the matching [`save`](Surface::save).
    fn restore(&mut self);

    /// Append a translation to the current transform.
    fn translate(&mut self, offset: Vec2);

    /// Append a rotation (radians) to the current transform.
    fn rotate(&mut self, angle: f64);

    /// Start a new, empty current path.
    fn begin_path(&mut self);

    fn move_to(&mut self, point: Point);

    fn line_to(&mut self, point: Point);

    fn close_path(&mut self);

    /// Add a closed rectangle sub-path.
    fn rect(&mut self, rect: Rect);

    /// Add a closed ellipse sub-path.
    fn ellipse(&mut self, center: Point, radii: Vec2, rotation: f64);

    /// Add a circular arc sub-path from `start_angle` to `end_angle`.
    fn arc(&mut self, center: Point, radius: f64, start_angle: f64, end_angle: f64);

    fn set_stroke_color(&mut self, color: Color);

    fn set_fill_color(&mut self, color: Color);

    fn set_line_width(&mut self, width: f64);

    /// Dash pattern for strokes; an empty slice means solid.
    fn set_line_dash(&mut self, dashes: &[f64]);

    /// Stroke the current path.
    fn stroke(&mut self);

    /// Fill the current path.
    fn fill(&mut self);

    fn set_font(&mut self, family: &str, size: f64);

    fn set_text_baseline(&mut self, baseline: TextBaseline);

    /// Draw a single line of text anchored at `origin`.
    fn fill_text(&mut self, text: &str, origin: Point);

    /// Advance width of `text` in the current font.
    fn measure_text(&mut self, text: &str) -> f64;
}

/// Run `draw` between a `save` and its matching `restore`.
///
/// Shapes draw through this so a rotation applied for one shape never
/// leaks into the next.
pub fn with_saved<R>(surface: &mut dyn Surface, draw: impl FnOnce(&mut dyn Surface) -> R) -> R {
    surface.save();
    let result = draw(surface);
    surface.restore();
    result
}

/// A shared handle draws into the surface it points at, so a caller can
/// keep inspecting a surface it has handed to a scene.
impl<S: Surface + ?Sized> Surface for Rc<RefCell<S>> {
    fn size(&self) -> Size {
        self.borrow().size()
    }
    fn clear_rect(&mut self, rect: Rect) {
        self.borrow_mut().clear_rect(rect);
    }
    fn save(&mut self) {
        self.borrow_mut().save();
    }
    fn restore(&mut self) {
        self.borrow_mut().restore();
    }
    fn translate(&mut self, offset: Vec2) {
        self.borrow_mut().translate(offset);
    }
    fn rotate(&mut self, angle: f64) {
        self.borrow_mut().rotate(angle);
    }
    fn begin_path(&mut self) {
        self.borrow_mut().begin_path();
    }
    fn move_to(&mut self, point: Point) {
        self.borrow_mut().move_to(point);
    }
    fn line_to(&mut self, point: Point) {
        self.borrow_mut().line_to(point);
    }
    fn close_path(&mut self) {
        self.borrow_mut().close_path();
    }
    fn rect(&mut self, rect: Rect) {
        self.borrow_mut().rect(rect);
    }
    fn ellipse(&mut self, center: Point, radii: Vec2, rotation: f64) {
        self.borrow_mut().ellipse(center, radii, rotation);
    }
    fn arc(&mut self, center: Point, radius: f64, start_angle: f64, end_angle: f64) {
        self.borrow_mut().arc(center, radius, start_angle, end_angle);
    }
    fn set_stroke_color(&mut self, color: Color) {
        self.borrow_mut().set_stroke_color(color);
    }
    fn set_fill_color(&mut self, color: Color) {
        self.borrow_mut().set_fill_color(color);
    }
    fn set_line_width(&mut self, width: f64) {
        self.borrow_mut().set_line_width(width);
    }
    fn set_line_dash(&mut self, dashes: &[f64]) {
        self.borrow_mut().set_line_dash(dashes);
    }
    fn stroke(&mut self) {
        self.borrow_mut().stroke();
    }
    fn fill(&mut self) {
        self.borrow_mut().fill();
    }
    fn set_font(&mut self, family: &str, size: f64) {
        self.borrow_mut().set_font(family, size);
    }
    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.borrow_mut().set_text_baseline(baseline);
    }
    fn fill_text(&mut self, text: &str, origin: Point) {
        self.borrow_mut().fill_text(text, origin);
    }
    fn measure_text(&mut self, text: &str) -> f64 {
        self.borrow_mut().measure_text(text)
    }
}

/// Host for the text editing overlay.
///
/// The host shows an editor at the requested anchor and, once the user is
/// done, hands the string back through
/// [`Scene::commit_text`](crate::scene::Scene::commit_text).
pub trait TextEditHost {
    fn show_editor(&mut self, anchor: Point, font_family: &str, font_size: f64);
}

#[cfg(test)]
pub(crate) mod testing {
    //! A surface that records calls by name, for unit tests.

    use super::*;

    #[derive(Debug, Default)]
    pub struct RecordingSurface {
        pub calls: Vec<String>,
        depth: i32,
        pub max_depth: i32,
    }

    impl RecordingSurface {
        pub fn new() -> Self {
            Self::default()
        }

        /// Current save/restore nesting.
        pub fn depth(&self) -> i32 {
            self.depth
        }

        pub fn count(&self, name: &str) -> usize {
            self.calls.iter().filter(|c| c.starts_with(name)).count()
        }

        fn log(&mut self, call: String) {
            self.calls.push(call);
        }
    }

    impl Surface for RecordingSurface {
        fn size(&self) -> Size {
            Size::new(800.0, 600.0)
        }
        fn clear_rect(&mut self, rect: Rect) {
            self.log(format!("clear_rect {rect:?}"));
        }
        fn save(&mut self) {
            self.depth += 1;
            self.max_depth = self.max_depth.max(self.depth);
            self.log("save".into());
        }
        fn restore(&mut self) {
            self.depth -= 1;
            self.log("restore".into());
        }
        fn translate(&mut self, offset: Vec2) {
            self.log(format!("translate {} {}", offset.x, offset.y));
        }
        fn rotate(&mut self, angle: f64) {
            self.log(format!("rotate {angle}"));
        }
        fn begin_path(&mut self) {
            self.log("begin_path".into());
        }
        fn move_to(&mut self, point: Point) {
            self.log(format!("move_to {} {}", point.x, point.y));
        }
        fn line_to(&mut self, point: Point) {
            self.log(format!("line_to {} {}", point.x, point.y));
        }
        fn close_path(&mut self) {
            self.log("close_path".into());
        }
        fn rect(&mut self, rect: Rect) {
            self.log(format!("rect {} {} {} {}", rect.x0, rect.y0, rect.width(), rect.height()));
        }
        fn ellipse(&mut self, center: Point, radii: Vec2, _rotation: f64) {
            self.log(format!("ellipse {} {} {} {}", center.x, center.y, radii.x, radii.y));
        }
        fn arc(&mut self, center: Point, radius: f64, _start: f64, _end: f64) {
            self.log(format!("arc {} {} {radius}", center.x, center.y));
        }
        fn set_stroke_color(&mut self, _color: Color) {
            self.log("set_stroke_color".into());
        }
        fn set_fill_color(&mut self, _color: Color) {
            self.log("set_fill_color".into());
        }
        fn set_line_width(&mut self, width: f64) {
            self.log(format!("set_line_width {width}"));
        }
        fn set_line_dash(&mut self, dashes: &[f64]) {
            self.log(format!("set_line_dash {dashes:?}"));
        }
        fn stroke(&mut self) {
            self.log("stroke".into());
        }
        fn fill(&mut self) {
            self.log("fill".into());
        }
        fn set_font(&mut self, family: &str, size: f64) {
            self.log(format!("set_font {size}px {family}"));
        }
        fn set_text_baseline(&mut self, baseline: TextBaseline) {
            self.log(format!("set_text_baseline {baseline:?}"));
        }
        fn fill_text(&mut self, text: &str, origin: Point) {
            self.log(format!("fill_text {text} {} {}", origin.x, origin.y));
        }
        fn measure_text(&mut self, text: &str) -> f64 {
            text.chars().count() as f64 * 10.0
        }
    }
}
