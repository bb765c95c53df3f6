// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Thread-bound manager with free-function entry points.
//!
//! ## Overview
//!
//! Hosts that cannot thread a [`Manager`] through to every element can bind one here
//! instead. [`make`] binds the manager for the current thread (the host's input thread)
//! and later calls are idempotent: the first surface wins. Elements then enroll
//! themselves with [`register`] or [`add`], typically from their constructors, and the
//! host forwards frames and pointer input through [`draw`], [`mouse_event`] and
//! [`mouse_wheel_moved`].
//!
//! Using any entry point before [`make`] logs a warning and does nothing. So does calling
//! back into this module from inside a handler while a dispatch pass is running.
//!
//! ```
//! use std::{cell::RefCell, rc::Rc};
//! use kurbo::Point;
//! use understory_interactive::global;
//! use understory_interactive::listener::{Capabilities, Listener};
//! use understory_interactive::manager::{MouseEvent, Surface};
//!
//! struct Canvas;
//! impl Surface for Canvas {
//!     fn pointer(&self) -> Point { Point::ZERO }
//! }
//!
//! struct Counter { draws: u32 }
//! impl Listener for Counter {
//!     fn capabilities(&self) -> Capabilities { Capabilities::DRAW }
//!     fn draw(&mut self) { self.draws += 1; }
//! }
//!
//! assert!(global::make(Box::new(Canvas)));
//! let counter = Rc::new(RefCell::new(Counter { draws: 0 }));
//! global::register(&counter);
//! global::draw();
//! global::set_active(&counter, false);
//! global::draw();
//! assert_eq!(counter.borrow().draws, 1);
//! ```

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::RefCell;

use crate::element::{ElementId, ElementRef};
use crate::error::Error;
use crate::listener::Listener;
use crate::manager::{Manager, MouseEvent, Options, Surface};

std::thread_local! {
    static MANAGER: RefCell<Option<Manager>> = const { RefCell::new(None) };
}

/// Bind the manager for this thread to `surface` with default [`Options`].
///
/// Returns `true` if this call bound it. If a manager is already bound, `surface` is
/// dropped, the existing binding is kept, and `false` is returned.
pub fn make(surface: Box<dyn Surface>) -> bool {
    make_with_options(surface, Options::default())
}

/// Like [`make`], with explicit [`Options`].
pub fn make_with_options(surface: Box<dyn Surface>, options: Options) -> bool {
    MANAGER.with(|slot| {
        let Ok(mut slot) = slot.try_borrow_mut() else {
            tracing::warn!("{}", Error::Busy);
            return false;
        };
        if slot.is_some() {
            tracing::debug!("manager already bound; keeping the existing surface");
            return false;
        }
        *slot = Some(Manager::with_options(surface, options));
        true
    })
}

/// Whether a manager is bound on this thread. Never logs.
pub fn is_bound() -> bool {
    MANAGER.with(|slot| slot.try_borrow().map(|m| m.is_some()).unwrap_or(true))
}

/// Run `f` against the bound manager.
pub fn with<R>(f: impl FnOnce(&mut Manager) -> R) -> Result<R, Error> {
    MANAGER.with(|slot| {
        let mut slot = slot.try_borrow_mut().map_err(|_| Error::Busy)?;
        let manager = slot.as_mut().ok_or(Error::Uninitialized)?;
        Ok(f(manager))
    })
}

fn run(op: &'static str, f: impl FnOnce(&mut Manager)) {
    if let Err(err) = with(f) {
        tracing::warn!(op, "{err}");
    }
}

/// Enroll `listener` through a [`ListenerAdapter`](crate::listener::ListenerAdapter).
///
/// Registering the same listener again is a no-op. A listener that is borrowed at the
/// time of the call is not registered; call again once the borrow ends.
pub fn register<L: Listener + 'static>(listener: &Rc<RefCell<L>>) {
    run("register", |m| {
        m.register(listener);
    });
}

/// Enroll a native element. Adding the same element again is a no-op.
pub fn add(element: ElementRef) {
    run("add", |m| {
        m.add(element);
    });
}

/// Activate or deactivate the element, or the listener's adapter, behind `handle`.
pub fn set_active<T: ?Sized>(handle: &Rc<T>, state: bool) {
    let id = ElementId::of(handle);
    run("set_active", |m| {
        m.set_active(id, state);
    });
}

/// Forward a draw tick. See [`Manager::draw`].
pub fn draw() {
    run("draw", Manager::draw);
}

/// Forward a raw pointer event. See [`Manager::mouse_event`].
pub fn mouse_event(event: MouseEvent) {
    run("mouse_event", |m| m.mouse_event(event));
}

/// Forward a window-level wheel step. See [`Manager::mouse_wheel_moved`].
pub fn mouse_wheel_moved(step: i32) {
    run("mouse_wheel_moved", |m| m.mouse_wheel_moved(step));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Element;
    use crate::listener::Capabilities;
    use kurbo::Point;

    struct Canvas(Point);
    impl Surface for Canvas {
        fn pointer(&self) -> Point {
            self.0
        }
    }

    /// The binding is per thread; give every test a thread of its own.
    fn on_fresh_thread(f: impl FnOnce() + Send + 'static) {
        std::thread::spawn(f).join().unwrap();
    }

    #[derive(Default)]
    struct Pressable {
        presses: u32,
    }
    impl Listener for Pressable {
        fn capabilities(&self) -> Capabilities {
            Capabilities::HIT_TEST | Capabilities::PRESSED
        }
        fn contains(&self, pos: Point) -> bool {
            crate::geometry::inside_rect(0.0, 0.0, 10.0, 10.0, pos.x, pos.y)
        }
        fn mouse_pressed(&mut self, _pos: Point) {
            self.presses += 1;
        }
    }

    #[test]
    fn use_before_make_is_skipped() {
        on_fresh_thread(|| {
            assert!(!is_bound());
            assert_eq!(with(|_| ()), Err(Error::Uninitialized));
            let p = Rc::new(RefCell::new(Pressable::default()));
            // None of these panic; they are logged and skipped.
            register(&p);
            set_active(&p, false);
            draw();
            mouse_event(MouseEvent::moved(1, 1));

            assert!(make(Box::new(Canvas(Point::ZERO))));
            assert_eq!(with(|m| m.registry().len()), Ok(0));
        });
    }

    #[test]
    fn make_is_idempotent() {
        on_fresh_thread(|| {
            assert!(make(Box::new(Canvas(Point::new(1.0, 1.0)))));
            assert!(!make(Box::new(Canvas(Point::new(9.0, 9.0)))));
            assert!(is_bound());
            // The first surface is still the bound one.
            let pointer = with(|m| {
                struct Spot;
                impl Element for Spot {
                    fn contains(&self, pos: Point) -> bool {
                        pos == Point::new(1.0, 1.0)
                    }
                }
                let spot = Rc::new(RefCell::new(Spot));
                m.add(spot.clone());
                m.mouse_wheel_moved(0);
                m.registry().is_hovered(ElementId::of(&spot))
            });
            assert_eq!(pointer, Ok(Some(true)));
        });
    }

    #[test]
    fn register_route_and_toggle() {
        on_fresh_thread(|| {
            make(Box::new(Canvas(Point::ZERO)));
            let p = Rc::new(RefCell::new(Pressable::default()));
            register(&p);
            register(&p);
            assert_eq!(with(|m| m.registry().len()), Ok(1));

            mouse_event(MouseEvent::moved(5, 5));
            mouse_event(MouseEvent::pressed(5, 5));
            assert_eq!(p.borrow().presses, 1);

            set_active(&p, false);
            mouse_event(MouseEvent::pressed(5, 5));
            assert_eq!(p.borrow().presses, 1);

            set_active(&p, true);
            mouse_event(MouseEvent::pressed(5, 5));
            assert_eq!(p.borrow().presses, 2);
        });
    }

    #[test]
    fn borrowed_listener_registers_after_release() {
        on_fresh_thread(|| {
            make(Box::new(Canvas(Point::ZERO)));
            let p = Rc::new(RefCell::new(Pressable::default()));
            {
                let _held = p.borrow_mut();
                register(&p);
            }
            assert_eq!(with(|m| m.registry().len()), Ok(0));

            register(&p);
            mouse_event(MouseEvent::moved(5, 5));
            mouse_event(MouseEvent::pressed(5, 5));
            assert_eq!(p.borrow().presses, 1);
        });
    }

    #[test]
    fn reentrant_calls_from_handlers_are_refused() {
        struct Dot;
        impl Element for Dot {
            fn contains(&self, _pos: Point) -> bool {
                false
            }
        }

        /// Tries to enroll another element whenever it is drawn.
        struct Spawner {
            attempts: u32,
        }
        impl Listener for Spawner {
            fn capabilities(&self) -> Capabilities {
                Capabilities::DRAW
            }
            fn draw(&mut self) {
                self.attempts += 1;
                add(Rc::new(RefCell::new(Dot)));
                assert_eq!(with(|_| ()), Err(Error::Busy));
            }
        }

        on_fresh_thread(|| {
            make(Box::new(Canvas(Point::ZERO)));
            let s = Rc::new(RefCell::new(Spawner { attempts: 0 }));
            register(&s);
            draw();
            draw();
            assert_eq!(s.borrow().attempts, 2);
            assert_eq!(with(|m| m.registry().len()), Ok(1));
        });
    }
}
