// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Elements: the participants of draw and pointer dispatch.
//!
//! ## Overview
//!
//! An [`Element`] is anything the [`Manager`](crate::manager::Manager) draws and routes
//! pointer input to. Every callback has a no-op default, so an element implements only
//! the hooks it cares about plus [`Element::contains`] for hit testing.
//!
//! Elements are shared as [`ElementRef`] (`Rc<RefCell<dyn Element>>`). The caller keeps a
//! clone of the `Rc` and uses it to address the element later, for example to toggle
//! activation. Identity is the allocation, captured as an [`ElementId`].
//!
//! The pointer hooks come in phases. Press, drag and release are delivered as `*_pre`
//! calls and release is followed by [`Element::mouse_released_post`] on the same element.
//! This leaves room for an element to observe an event both before and after its own
//! release handling without depending on registration order.

use alloc::rc::Rc;
use core::cell::RefCell;

use kurbo::Point;

/// Shared handle to a registered element.
pub type ElementRef = Rc<RefCell<dyn Element>>;

/// Identity of a shared allocation.
///
/// Two handles have the same `ElementId` exactly when they point to the same `Rc`
/// allocation. The registry holds a strong reference to everything it tracks, so an id
/// cannot be reused by a different allocation while its element is registered.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ElementId(usize);

impl ElementId {
    /// Identity of the allocation behind `rc`.
    ///
    /// Works for sized and unsized handles alike, so the id of an `Rc<RefCell<T>>` equals
    /// the id of the same handle coerced to [`ElementRef`].
    pub fn of<T: ?Sized>(rc: &Rc<T>) -> Self {
        Self(Rc::as_ptr(rc).cast::<()>() as usize)
    }
}

/// A drawable, pointer-aware participant in dispatch.
///
/// The `active` and `hover` flags are not part of this trait. They are owned by the
/// [`Registry`](crate::registry::Registry) entry and only the manager changes them.
pub trait Element {
    /// Hit test in surface coordinates. Elements that never return `true` never hover.
    fn contains(&self, pos: Point) -> bool;

    /// Identity of the wrapped object, for adapters.
    ///
    /// Native elements return `None`. [`ListenerAdapter`](crate::listener::ListenerAdapter)
    /// returns the id of the listener it forwards to, so activation can be toggled with the
    /// listener's own handle.
    fn listener_id(&self) -> Option<ElementId> {
        None
    }

    /// Whether the element cannot take callbacks right now.
    ///
    /// Checked before every callback and hit test. A busy element is skipped for the
    /// whole event and its hover flag is left as it was. Native elements are never busy;
    /// an adapter is busy while its listener is borrowed elsewhere.
    fn is_busy(&self) -> bool {
        false
    }

    /// Draw tick, once per host frame.
    fn draw(&mut self) {}

    /// The pointer started hovering this element.
    fn mouse_entered(&mut self) {}

    /// Same transition as [`Element::mouse_entered`], with the pointer position.
    fn mouse_entered_at(&mut self, _pos: Point) {}

    /// The pointer stopped hovering this element.
    fn mouse_exited(&mut self) {}

    /// Same transition as [`Element::mouse_exited`], with the pointer position.
    fn mouse_exited_at(&mut self, _pos: Point) {}

    /// The pointer moved while already hovering this element.
    fn mouse_moved(&mut self) {}

    /// Same event as [`Element::mouse_moved`], with the pointer position.
    fn mouse_moved_at(&mut self, _pos: Point) {}

    /// A button was pressed while hovering.
    fn mouse_pressed_pre(&mut self, _pos: Point) {}

    /// The pointer was dragged while hovering.
    fn mouse_dragged_pre(&mut self, _pos: Point) {}

    /// First phase of a release while hovering.
    fn mouse_released_pre(&mut self, _pos: Point) {}

    /// Second phase of a release; always directly after [`Element::mouse_released_pre`].
    fn mouse_released_post(&mut self, _pos: Point) {}

    /// Wheel rotation. Delivered to every active element, hovered or not.
    fn mouse_scrolled(&mut self, _step: i32) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Dot;
    impl Element for Dot {
        fn contains(&self, _pos: Point) -> bool {
            false
        }
    }

    #[test]
    fn id_survives_unsizing() {
        let dot = Rc::new(RefCell::new(Dot));
        let erased: ElementRef = dot.clone();
        assert_eq!(ElementId::of(&dot), ElementId::of(&erased));
    }

    #[test]
    fn distinct_allocations_have_distinct_ids() {
        let a = Rc::new(RefCell::new(Dot));
        let b = Rc::new(RefCell::new(Dot));
        assert_ne!(ElementId::of(&a), ElementId::of(&b));
    }

    #[test]
    fn native_elements_have_no_listener() {
        let dot = Dot;
        assert_eq!(dot.listener_id(), None);
    }
}
