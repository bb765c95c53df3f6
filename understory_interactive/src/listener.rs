// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Listeners: arbitrary objects that opt into a subset of pointer callbacks.
//!
//! ## Overview
//!
//! A [`Listener`] is the lightweight way to take part in dispatch. It declares which
//! hooks it implements through [`Listener::capabilities`] and overrides just those.
//! [`ListenerAdapter`] wraps it into an [`Element`] so the manager can treat it like any
//! other participant.
//!
//! ## Capability resolution
//!
//! The declared [`Capabilities`] are read once, when the adapter is built, and cached.
//! From then on the adapter forwards a call only when the matching flag is set. Calls for
//! undeclared hooks are no-ops, even if the listener happens to override the method.
//!
//! ## Phase mapping
//!
//! | Element phase                        | Listener hook                     |
//! |--------------------------------------|-----------------------------------|
//! | [`Element::mouse_pressed_pre`]       | [`Listener::mouse_pressed`]       |
//! | [`Element::mouse_dragged_pre`]       | [`Listener::mouse_dragged`]       |
//! | [`Element::mouse_released_pre`]      | [`Listener::mouse_released`]      |
//! | [`Element::mouse_released_post`]     | none                              |
//!
//! ## Example
//!
//! ```
//! use std::{cell::RefCell, rc::Rc};
//! use kurbo::{Point, Rect};
//! use understory_interactive::geometry::contains_inclusive;
//! use understory_interactive::listener::{Capabilities, Listener, ListenerAdapter};
//! use understory_interactive::element::Element;
//!
//! struct Toggle { bounds: Rect, on: bool }
//!
//! impl Listener for Toggle {
//!     fn capabilities(&self) -> Capabilities {
//!         Capabilities::HIT_TEST | Capabilities::PRESSED
//!     }
//!     fn contains(&self, pos: Point) -> bool {
//!         contains_inclusive(self.bounds, pos)
//!     }
//!     fn mouse_pressed(&mut self, _pos: Point) {
//!         self.on = !self.on;
//!     }
//! }
//!
//! let toggle = Rc::new(RefCell::new(Toggle { bounds: Rect::new(0.0, 0.0, 10.0, 10.0), on: false }));
//! let mut adapter = ListenerAdapter::new(toggle.clone());
//! adapter.mouse_pressed_pre(Point::new(5.0, 5.0));
//! assert!(toggle.borrow().on);
//! ```

use alloc::rc::Rc;
use core::cell::RefCell;

use kurbo::Point;

use crate::element::{Element, ElementId};

bitflags::bitflags! {
    /// Optional hooks a [`Listener`] implements.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Capabilities: u16 {
        /// [`Listener::contains`]; without it the listener never hovers.
        const HIT_TEST    = 1 << 0;
        /// [`Listener::draw`].
        const DRAW        = 1 << 1;
        /// [`Listener::mouse_entered`].
        const ENTERED     = 1 << 2;
        /// [`Listener::mouse_entered_at`].
        const ENTERED_AT  = 1 << 3;
        /// [`Listener::mouse_exited`].
        const EXITED      = 1 << 4;
        /// [`Listener::mouse_exited_at`].
        const EXITED_AT   = 1 << 5;
        /// [`Listener::mouse_moved`].
        const MOVED       = 1 << 6;
        /// [`Listener::mouse_moved_at`].
        const MOVED_AT    = 1 << 7;
        /// [`Listener::mouse_pressed`].
        const PRESSED     = 1 << 8;
        /// [`Listener::mouse_dragged`].
        const DRAGGED     = 1 << 9;
        /// [`Listener::mouse_released`].
        const RELEASED    = 1 << 10;
        /// [`Listener::mouse_scrolled`].
        const SCROLLED    = 1 << 11;
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::empty()
    }
}

/// An object that receives a declared subset of pointer callbacks.
///
/// Only [`Listener::capabilities`] is required. Each hook defaults to a no-op and is
/// invoked only when its flag is declared.
pub trait Listener {
    /// Hooks this listener implements. Read once when it is wrapped.
    fn capabilities(&self) -> Capabilities;

    /// Hit test in surface coordinates ([`Capabilities::HIT_TEST`]).
    fn contains(&self, _pos: Point) -> bool {
        false
    }

    /// Draw tick ([`Capabilities::DRAW`]).
    fn draw(&mut self) {}

    /// Hover started ([`Capabilities::ENTERED`]).
    fn mouse_entered(&mut self) {}

    /// Hover started, with position ([`Capabilities::ENTERED_AT`]).
    fn mouse_entered_at(&mut self, _pos: Point) {}

    /// Hover ended ([`Capabilities::EXITED`]).
    fn mouse_exited(&mut self) {}

    /// Hover ended, with position ([`Capabilities::EXITED_AT`]).
    fn mouse_exited_at(&mut self, _pos: Point) {}

    /// Pointer moved while hovering ([`Capabilities::MOVED`]).
    fn mouse_moved(&mut self) {}

    /// Pointer moved while hovering, with position ([`Capabilities::MOVED_AT`]).
    fn mouse_moved_at(&mut self, _pos: Point) {}

    /// Button pressed while hovering ([`Capabilities::PRESSED`]).
    fn mouse_pressed(&mut self, _pos: Point) {}

    /// Dragged while hovering ([`Capabilities::DRAGGED`]).
    fn mouse_dragged(&mut self, _pos: Point) {}

    /// Button released while hovering ([`Capabilities::RELEASED`]).
    fn mouse_released(&mut self, _pos: Point) {}

    /// Wheel rotation ([`Capabilities::SCROLLED`]).
    fn mouse_scrolled(&mut self, _step: i32) {}
}

/// [`Element`] implementation that forwards to a [`Listener`].
///
/// Holds a strong reference to the listener and the capability set resolved at
/// construction. [`Element::listener_id`] reports the listener's identity so that
/// activation can be addressed through the caller's own handle.
pub struct ListenerAdapter<L> {
    listener: Rc<RefCell<L>>,
    id: ElementId,
    capabilities: Capabilities,
}

impl<L> core::fmt::Debug for ListenerAdapter<L> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ListenerAdapter")
            .field("id", &self.id)
            .field("capabilities", &self.capabilities)
            .finish_non_exhaustive()
    }
}

impl<L: Listener> ListenerAdapter<L> {
    /// Wrap `listener`, resolving its capabilities now.
    ///
    /// If the listener is mutably borrowed at this moment its capabilities cannot be
    /// read; the adapter then resolves to an empty set and every call is a no-op.
    pub fn new(listener: Rc<RefCell<L>>) -> Self {
        let id = ElementId::of(&listener);
        let capabilities = match listener.try_borrow() {
            Ok(l) => l.capabilities(),
            Err(_) => {
                tracing::warn!(?id, "listener is borrowed while being wrapped; no hooks resolved");
                Capabilities::empty()
            }
        };
        Self {
            listener,
            id,
            capabilities,
        }
    }

    /// Capabilities resolved at construction.
    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// The wrapped listener.
    pub fn listener(&self) -> &Rc<RefCell<L>> {
        &self.listener
    }

    fn forward(&self, capability: Capabilities, f: impl FnOnce(&mut L)) {
        if !self.capabilities.contains(capability) {
            return;
        }
        match self.listener.try_borrow_mut() {
            Ok(mut l) => f(&mut *l),
            Err(_) => {
                tracing::warn!(id = ?self.id, ?capability, "listener is busy; callback skipped");
            }
        }
    }
}

impl<L: Listener> Element for ListenerAdapter<L> {
    fn contains(&self, pos: Point) -> bool {
        if !self.capabilities.contains(Capabilities::HIT_TEST) {
            return false;
        }
        self.listener.try_borrow().is_ok_and(|l| l.contains(pos))
    }

    fn listener_id(&self) -> Option<ElementId> {
        Some(self.id)
    }

    fn is_busy(&self) -> bool {
        self.listener.try_borrow_mut().is_err()
    }

    fn draw(&mut self) {
        self.forward(Capabilities::DRAW, |l| l.draw());
    }

    fn mouse_entered(&mut self) {
        self.forward(Capabilities::ENTERED, |l| l.mouse_entered());
    }

    fn mouse_entered_at(&mut self, pos: Point) {
        self.forward(Capabilities::ENTERED_AT, |l| l.mouse_entered_at(pos));
    }

    fn mouse_exited(&mut self) {
        self.forward(Capabilities::EXITED, |l| l.mouse_exited());
    }

    fn mouse_exited_at(&mut self, pos: Point) {
        self.forward(Capabilities::EXITED_AT, |l| l.mouse_exited_at(pos));
    }

    fn mouse_moved(&mut self) {
        self.forward(Capabilities::MOVED, |l| l.mouse_moved());
    }

    fn mouse_moved_at(&mut self, pos: Point) {
        self.forward(Capabilities::MOVED_AT, |l| l.mouse_moved_at(pos));
    }

    fn mouse_pressed_pre(&mut self, pos: Point) {
        self.forward(Capabilities::PRESSED, |l| l.mouse_pressed(pos));
    }

    fn mouse_dragged_pre(&mut self, pos: Point) {
        self.forward(Capabilities::DRAGGED, |l| l.mouse_dragged(pos));
    }

    fn mouse_released_pre(&mut self, pos: Point) {
        self.forward(Capabilities::RELEASED, |l| l.mouse_released(pos));
    }

    fn mouse_scrolled(&mut self, step: i32) {
        self.forward(Capabilities::SCROLLED, |l| l.mouse_scrolled(step));
    }
}
