// SPDX-License-Identifier: GPL-3.0-or-later
// src/ui/widgets/crop_overlay.rs
//
// Interactive crop overlay: corner handles and pointer input on top of the rendered frame.

use cosmic::{
    Element, Renderer,
    iced::{
        Color, Length, Point, Rectangle, Size,
        advanced::{
            Clipboard, Layout, Shell, Widget,
            layout::{Limits, Node},
            renderer::{Quad, Renderer as QuadRenderer},
            widget::Tree,
        },
        event::{Event, Status},
        mouse::{self, Button, Cursor},
    },
};

use crate::app::AppMessage;
use crate::app::view::canvas::Viewport;
use crate::app::view::crop::{CropSelection, DragHandle, DragState};
use crate::constant::{ACCENT_COLOR, HANDLE_BORDER_COLOR, HANDLE_BORDER_WIDTH};
use crate::domain::document::core::geometry::{Corner, Point as ImagePoint};

fn color([r, g, b, a]: [u8; 4]) -> Color {
    Color::from_rgba8(r, g, b, f32::from(a) / 255.0)
}

/// Canvas-sized layer that draws the corner handles and turns mouse input
/// into pointer messages in canvas display coordinates.
pub struct CropOverlay {
    selection: CropSelection,
    viewport: Viewport,
    handle_size: f32,
    hit_tolerance: f64,
}

impl CropOverlay {
    pub fn new(
        selection: &CropSelection,
        viewport: Viewport,
        handle_size: f64,
        hit_tolerance: f64,
    ) -> Self {
        Self {
            selection: selection.clone(),
            viewport,
            handle_size: handle_size as f32,
            hit_tolerance,
        }
    }

    fn display_size(&self) -> Size {
        let (width, height) = self.viewport.display_size();
        Size::new(width as f32, height as f32)
    }

    fn hit_test(&self, pos: Point) -> DragHandle {
        self.selection.hit_test(
            &self.viewport,
            ImagePoint::new(f64::from(pos.x), f64::from(pos.y)),
            self.hit_tolerance,
        )
    }

    fn cursor_for_handle(&self, handle: DragHandle) -> mouse::Interaction {
        match handle {
            DragHandle::None => mouse::Interaction::default(),
            DragHandle::Corner(Corner::TopLeft | Corner::BottomRight) => {
                mouse::Interaction::ResizingDiagonallyDown
            }
            DragHandle::Corner(Corner::TopRight | Corner::BottomLeft) => {
                mouse::Interaction::ResizingDiagonallyUp
            }
            DragHandle::Move if self.selection.is_dragging() => mouse::Interaction::Grabbing,
            DragHandle::Move => mouse::Interaction::Grab,
        }
    }
}

/// Map a mouse event to a pointer message.
///
/// `position` is the cursor relative to the canvas, `None` when it is outside.
/// Moving out of the canvas mid-drag ends the drag like a release.
pub fn pointer_message(
    event: &mouse::Event,
    position: Option<Point>,
    dragging: bool,
) -> Option<AppMessage> {
    match event {
        mouse::Event::ButtonPressed(Button::Left) => position.map(|p| AppMessage::PointerDown {
            x: f64::from(p.x),
            y: f64::from(p.y),
        }),
        mouse::Event::CursorMoved { .. } if dragging => Some(match position {
            Some(p) => AppMessage::PointerMove {
                x: f64::from(p.x),
                y: f64::from(p.y),
            },
            None => AppMessage::PointerLeave,
        }),
        mouse::Event::ButtonReleased(Button::Left) if dragging => Some(AppMessage::PointerUp),
        mouse::Event::CursorLeft if dragging => Some(AppMessage::PointerLeave),
        _ => None,
    }
}

impl Widget<AppMessage, cosmic::Theme, Renderer> for CropOverlay {
    fn size(&self) -> Size<Length> {
        let size = self.display_size();
        Size::new(Length::Fixed(size.width), Length::Fixed(size.height))
    }

    fn layout(&self, _tree: &mut Tree, _renderer: &Renderer, _limits: &Limits) -> Node {
        Node::new(self.display_size())
    }

    fn draw(
        &self,
        _tree: &Tree,
        renderer: &mut Renderer,
        _theme: &cosmic::Theme,
        _style: &cosmic::iced::advanced::renderer::Style,
        layout: Layout<'_>,
        _cursor: Cursor,
        _viewport: &Rectangle,
    ) {
        let bounds = layout.bounds();
        let half = self.handle_size / 2.0;
        let border = HANDLE_BORDER_WIDTH as f32;

        for corner in self.selection.quad.corners() {
            let centre = self.viewport.image_to_display(corner);
            let origin = Point::new(
                bounds.x + centre.x as f32 - half,
                bounds.y + centre.y as f32 - half,
            );

            renderer.fill_quad(
                Quad {
                    bounds: Rectangle::new(origin, Size::new(self.handle_size, self.handle_size)),
                    ..Quad::default()
                },
                color(HANDLE_BORDER_COLOR),
            );
            let inner = (self.handle_size - 2.0 * border).max(0.0);
            renderer.fill_quad(
                Quad {
                    bounds: Rectangle::new(
                        Point::new(origin.x + border, origin.y + border),
                        Size::new(inner, inner),
                    ),
                    ..Quad::default()
                },
                color(ACCENT_COLOR),
            );
        }
    }

    fn on_event(
        &mut self,
        _tree: &mut Tree,
        event: Event,
        layout: Layout<'_>,
        cursor: Cursor,
        _renderer: &Renderer,
        _clipboard: &mut dyn Clipboard,
        shell: &mut Shell<'_, AppMessage>,
        _viewport: &Rectangle,
    ) -> Status {
        let Event::Mouse(mouse_event) = event else {
            return Status::Ignored;
        };

        let position = cursor.position_in(layout.bounds());
        match pointer_message(&mouse_event, position, self.selection.is_dragging()) {
            Some(message) => {
                shell.publish(message);
                Status::Captured
            }
            None => Status::Ignored,
        }
    }

    fn mouse_interaction(
        &self,
        _tree: &Tree,
        layout: Layout<'_>,
        cursor: Cursor,
        _viewport: &Rectangle,
        _renderer: &Renderer,
    ) -> mouse::Interaction {
        if self.selection.is_dragging() {
            return match self.selection.drag {
                DragState::DraggingCorner { corner, .. } => {
                    self.cursor_for_handle(DragHandle::Corner(corner))
                }
                _ => self.cursor_for_handle(DragHandle::Move),
            };
        }

        match cursor.position_in(layout.bounds()) {
            Some(pos) => self.cursor_for_handle(self.hit_test(pos)),
            None => mouse::Interaction::default(),
        }
    }
}

impl<'a> From<CropOverlay> for Element<'a, AppMessage> {
    fn from(overlay: CropOverlay) -> Self {
        Self::new(overlay)
    }
}

pub fn crop_overlay(
    selection: &CropSelection,
    viewport: Viewport,
    handle_size: f64,
    hit_tolerance: f64,
) -> CropOverlay {
    CropOverlay::new(selection, viewport, handle_size, hit_tolerance)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_inside_canvas_starts_pointer_down() {
        let msg = pointer_message(
            &mouse::Event::ButtonPressed(Button::Left),
            Some(Point::new(12.0, 34.5)),
            false,
        );
        assert_eq!(msg, Some(AppMessage::PointerDown { x: 12.0, y: 34.5 }));
    }

    #[test]
    fn press_outside_canvas_is_ignored() {
        let msg = pointer_message(&mouse::Event::ButtonPressed(Button::Left), None, false);
        assert_eq!(msg, None);
        let msg = pointer_message(&mouse::Event::ButtonPressed(Button::Right), Some(Point::ORIGIN), false);
        assert_eq!(msg, None);
    }

    #[test]
    fn moves_only_matter_while_dragging() {
        let moved = mouse::Event::CursorMoved {
            position: Point::new(50.0, 60.0),
        };
        assert_eq!(pointer_message(&moved, Some(Point::new(5.0, 6.0)), false), None);
        assert_eq!(
            pointer_message(&moved, Some(Point::new(5.0, 6.0)), true),
            Some(AppMessage::PointerMove { x: 5.0, y: 6.0 })
        );
        // Dragged past the canvas edge.
        assert_eq!(pointer_message(&moved, None, true), Some(AppMessage::PointerLeave));
    }

    #[test]
    fn release_and_leave_end_a_drag() {
        let release = mouse::Event::ButtonReleased(Button::Left);
        assert_eq!(pointer_message(&release, None, true), Some(AppMessage::PointerUp));
        assert_eq!(pointer_message(&release, None, false), None);
        assert_eq!(
            pointer_message(&mouse::Event::CursorLeft, None, true),
            Some(AppMessage::PointerLeave)
        );
    }
}
