// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The manager: draw ticks, hover tracking, and pointer routing.
//!
//! ## Overview
//!
//! A [`Manager`] is bound to exactly one host [`Surface`]. The host drives it:
//!
//! - [`Manager::draw`] once per frame,
//! - [`Manager::mouse_event`] for each raw pointer event,
//! - [`Manager::mouse_wheel_moved`] from a window-level wheel hook, when the host has one.
//!
//! Every pass visits active elements in registration order and runs all callbacks for one
//! element before moving on to the next.
//!
//! ## Routing
//!
//! | Event     | Recipients            | Callbacks                                                   |
//! |-----------|-----------------------|-------------------------------------------------------------|
//! | draw tick | active                | `draw`                                                      |
//! | move      | active                | hover transition, see [`HoverTransition`]                   |
//! | press     | active and hovered    | `mouse_pressed_pre`                                         |
//! | drag      | active and hovered    | `mouse_dragged_pre`                                         |
//! | release   | active and hovered    | `mouse_released_pre`, then `mouse_released_post`            |
//! | wheel     | active                | `mouse_scrolled`, then enter/exit at the current pointer    |
//!
//! Only moves (and, optionally, the wheel) re-run hit testing. Press, drag and release use
//! the hover state left by the last move. Clicks are not synthesized; a click is a press
//! followed by a release. Surface enter and exit events are accepted and ignored.
//!
//! ## Example
//!
//! ```
//! use std::{cell::RefCell, rc::Rc};
//! use kurbo::{Point, Rect};
//! use understory_interactive::element::{Element, ElementId};
//! use understory_interactive::geometry::contains_inclusive;
//! use understory_interactive::manager::{Manager, MouseEvent, Surface};
//!
//! struct Canvas;
//! impl Surface for Canvas {
//!     fn pointer(&self) -> Point { Point::ZERO }
//! }
//!
//! #[derive(Default)]
//! struct Button { hovered: bool }
//! impl Element for Button {
//!     fn contains(&self, pos: Point) -> bool {
//!         contains_inclusive(Rect::new(0.0, 0.0, 10.0, 10.0), pos)
//!     }
//!     fn mouse_entered(&mut self) { self.hovered = true; }
//!     fn mouse_exited(&mut self) { self.hovered = false; }
//! }
//!
//! let mut manager = Manager::new(Box::new(Canvas));
//! let button = Rc::new(RefCell::new(Button::default()));
//! manager.add(button.clone());
//!
//! manager.mouse_event(MouseEvent::moved(5, 5));
//! assert!(button.borrow().hovered);
//! assert_eq!(manager.registry().is_hovered(ElementId::of(&button)), Some(true));
//!
//! manager.mouse_event(MouseEvent::moved(20, 20));
//! assert!(!button.borrow().hovered);
//! ```

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::RefCell;

use kurbo::Point;

use crate::element::{Element, ElementId, ElementRef};
use crate::listener::{Listener, ListenerAdapter};
use crate::registry::{Entry, Registry};

/// The host surface a manager is bound to.
///
/// Draw ticks and pointer events are pushed into the manager by the host. The surface
/// only answers the questions the manager cannot derive from the events themselves.
pub trait Surface {
    /// Current pointer position in surface coordinates.
    ///
    /// Used by the wheel path, whose events carry no position.
    fn pointer(&self) -> Point;

    /// Subscribe to wheel events on the underlying native window.
    ///
    /// Return `true` if the host will call [`Manager::mouse_wheel_moved`] from such a hook.
    /// The default reports that no window is available.
    fn listen_window_wheel(&mut self) -> bool {
        false
    }
}

/// Kind of a raw pointer event.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum MouseEventKind {
    /// The pointer entered the surface. Ignored.
    Entered,
    /// The pointer moved with no button held.
    Moved,
    /// A button was pressed.
    Pressed,
    /// The pointer moved with a button held.
    Dragged,
    /// A button was released.
    Released,
    /// The host's own click notification. Ignored.
    Clicked,
    /// The pointer left the surface. Ignored.
    Exited,
    /// Wheel rotation by a signed step, sign per platform convention.
    Wheel(i32),
}

/// A raw pointer event in integer surface coordinates.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct MouseEvent {
    /// What happened.
    pub kind: MouseEventKind,
    /// Pointer x.
    pub x: i32,
    /// Pointer y.
    pub y: i32,
}

impl MouseEvent {
    /// Create an event of `kind` at `(x, y)`.
    pub const fn new(kind: MouseEventKind, x: i32, y: i32) -> Self {
        Self { kind, x, y }
    }

    /// A move to `(x, y)`.
    pub const fn moved(x: i32, y: i32) -> Self {
        Self::new(MouseEventKind::Moved, x, y)
    }

    /// A press at `(x, y)`.
    pub const fn pressed(x: i32, y: i32) -> Self {
        Self::new(MouseEventKind::Pressed, x, y)
    }

    /// A drag to `(x, y)`.
    pub const fn dragged(x: i32, y: i32) -> Self {
        Self::new(MouseEventKind::Dragged, x, y)
    }

    /// A release at `(x, y)`.
    pub const fn released(x: i32, y: i32) -> Self {
        Self::new(MouseEventKind::Released, x, y)
    }

    /// A wheel rotation by `step`. Position is taken from the surface when dispatched.
    pub const fn wheel(step: i32) -> Self {
        Self::new(MouseEventKind::Wheel(step), 0, 0)
    }

    /// Event position as a point.
    pub fn pos(&self) -> Point {
        Point::new(f64::from(self.x), f64::from(self.y))
    }
}

/// Manager configuration.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Options {
    /// Subscribe to the surface's window-level wheel hook when it offers one.
    ///
    /// While that subscription is live, [`MouseEventKind::Wheel`] events arriving
    /// through [`Manager::mouse_event`] are dropped so a step is not delivered twice.
    pub window_wheel: bool,
    /// After a wheel step, re-run the enter/exit check at the current pointer.
    pub wheel_reconciles_hover: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            window_wheel: true,
            wheel_reconciles_hover: true,
        }
    }
}

impl Options {
    /// Set [`Options::window_wheel`].
    #[must_use]
    pub fn with_window_wheel(mut self, on: bool) -> Self {
        self.window_wheel = on;
        self
    }

    /// Set [`Options::wheel_reconciles_hover`].
    #[must_use]
    pub fn with_wheel_reconciles_hover(mut self, on: bool) -> Self {
        self.wheel_reconciles_hover = on;
        self
    }
}

/// Outcome of comparing an element's previous hover flag with a fresh hit test.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum HoverTransition {
    /// Not hovered before, hit now: `mouse_entered`, `mouse_entered_at`.
    Entered,
    /// Hovered before, missed now: `mouse_exited`, `mouse_exited_at`.
    Exited,
    /// Hovered before and hit now: `mouse_moved`, `mouse_moved_at` (move path only).
    Stayed,
    /// Neither: no callbacks.
    Outside,
}

impl HoverTransition {
    /// Classify a hover update.
    pub const fn between(was_hover: bool, hit: bool) -> Self {
        match (was_hover, hit) {
            (false, true) => Self::Entered,
            (true, false) => Self::Exited,
            (true, true) => Self::Stayed,
            (false, false) => Self::Outside,
        }
    }

    /// Hover flag after this transition.
    pub const fn hover(self) -> bool {
        matches!(self, Self::Entered | Self::Stayed)
    }
}

/// Dispatcher bound to one surface.
pub struct Manager {
    surface: Box<dyn Surface>,
    registry: Registry,
    options: Options,
    window_wheel: bool,
}

impl core::fmt::Debug for Manager {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Manager")
            .field("registry", &self.registry)
            .field("options", &self.options)
            .field("window_wheel", &self.window_wheel)
            .finish_non_exhaustive()
    }
}

impl Manager {
    /// Bind a manager to `surface` with default [`Options`].
    pub fn new(surface: Box<dyn Surface>) -> Self {
        Self::with_options(surface, Options::default())
    }

    /// Bind a manager to `surface`.
    pub fn with_options(mut surface: Box<dyn Surface>, options: Options) -> Self {
        let window_wheel = options.window_wheel && surface.listen_window_wheel();
        tracing::debug!(window_wheel, "manager bound to surface");
        Self {
            surface,
            registry: Registry::new(),
            options,
            window_wheel,
        }
    }

    /// The configuration this manager was bound with.
    pub fn options(&self) -> Options {
        self.options
    }

    /// Whether wheel events are expected through [`Manager::mouse_wheel_moved`] from a
    /// window-level hook rather than through [`Manager::mouse_event`].
    pub fn listens_window_wheel(&self) -> bool {
        self.window_wheel
    }

    /// Registered elements and their dispatch state.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Register a native element. Returns `false` if it was already registered.
    pub fn add(&mut self, element: ElementRef) -> bool {
        self.registry.add(element)
    }

    /// Wrap `listener` in a [`ListenerAdapter`] and register it.
    ///
    /// Returns `false` if the listener was already registered; no second adapter is built.
    /// A listener that is borrowed at this moment is refused with a warning and can be
    /// registered again once the borrow ends.
    pub fn register<L: Listener + 'static>(&mut self, listener: &Rc<RefCell<L>>) -> bool {
        let id = ElementId::of(listener);
        if self.registry.contains(id) {
            tracing::debug!(?id, "listener already registered");
            return false;
        }
        if listener.try_borrow_mut().is_err() {
            tracing::warn!(?id, "listener is borrowed while being registered; not registered");
            return false;
        }
        let adapter: ElementRef = Rc::new(RefCell::new(ListenerAdapter::new(listener.clone())));
        self.registry.add(adapter)
    }

    /// Activate or deactivate whatever answers to `id`: a native element, or the adapter
    /// wrapping a listener. Returns the number of entries updated.
    pub fn set_active(&mut self, id: ElementId, state: bool) -> usize {
        let n = self.registry.set_active(id, state);
        if n == 0 {
            tracing::debug!(?id, state, "set_active matched no element");
        }
        n
    }

    /// Draw tick: `draw` on every active element.
    pub fn draw(&mut self) {
        self.registry.for_each_active_mut(|entry| {
            with_element(entry, |e, _| e.draw());
        });
    }

    /// Route one raw pointer event.
    pub fn mouse_event(&mut self, event: MouseEvent) {
        if self.registry.is_empty() {
            return;
        }
        tracing::trace!(?event, "mouse event");
        let pos = event.pos();
        match event.kind {
            MouseEventKind::Moved => self.mouse_moved(pos),
            MouseEventKind::Pressed => self.for_each_hovered(|e| e.mouse_pressed_pre(pos)),
            MouseEventKind::Dragged => self.for_each_hovered(|e| e.mouse_dragged_pre(pos)),
            MouseEventKind::Released => self.for_each_hovered(|e| {
                e.mouse_released_pre(pos);
                e.mouse_released_post(pos);
            }),
            MouseEventKind::Wheel(step) => {
                if self.window_wheel {
                    tracing::trace!(step, "wheel arrives through the window hook; dropped");
                } else {
                    self.mouse_wheel_moved(step);
                }
            }
            MouseEventKind::Entered | MouseEventKind::Clicked | MouseEventKind::Exited => {}
        }
    }

    /// Wheel rotation by `step`.
    ///
    /// Every active element gets `mouse_scrolled(step)`. The element's hover state is then
    /// reconciled at the surface's current pointer, firing entered or exited if a scroll
    /// handler changed what lies under it. A steady hover fires nothing here.
    pub fn mouse_wheel_moved(&mut self, step: i32) {
        let pos = self.surface.pointer();
        let reconcile = self.options.wheel_reconciles_hover;
        self.registry.for_each_active_mut(|entry| {
            with_element(entry, |e, hover| {
                e.mouse_scrolled(step);
                if reconcile {
                    update_hover(e, hover, pos, false);
                }
            });
        });
    }

    fn mouse_moved(&mut self, pos: Point) {
        self.registry.for_each_active_mut(|entry| {
            with_element(entry, |e, hover| update_hover(e, hover, pos, true));
        });
    }

    fn for_each_hovered(&mut self, mut f: impl FnMut(&mut dyn Element)) {
        self.registry.for_each_active_mut(|entry| {
            if entry.hover {
                with_element(entry, |e, _| f(e));
            }
        });
    }
}

/// Run `f` on the entry's element together with its hover flag.
///
/// An element that is already borrowed (for instance by a handler that is still running
/// further up the stack), or that reports itself busy, is skipped with its hover flag
/// untouched.
fn with_element(entry: &mut Entry, f: impl FnOnce(&mut dyn Element, &mut bool)) {
    match entry.element.try_borrow_mut() {
        Ok(mut e) if !e.is_busy() => f(&mut *e, &mut entry.hover),
        _ => tracing::warn!(id = ?entry.id, "element is busy; skipped"),
    }
}

fn update_hover(e: &mut dyn Element, hover: &mut bool, pos: Point, fire_moved: bool) {
    let transition = HoverTransition::between(*hover, e.contains(pos));
    *hover = transition.hover();
    match transition {
        HoverTransition::Entered => {
            e.mouse_entered();
            e.mouse_entered_at(pos);
        }
        HoverTransition::Exited => {
            e.mouse_exited();
            e.mouse_exited_at(pos);
        }
        HoverTransition::Stayed if fire_moved => {
            e.mouse_moved();
            e.mouse_moved_at(pos);
        }
        HoverTransition::Stayed | HoverTransition::Outside => {}
    }
}
