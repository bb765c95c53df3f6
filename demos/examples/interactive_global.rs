// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Thread-bound manager.
//!
//! Elements enroll themselves from their constructors through the global entry points,
//! and the host loop forwards frames and wheel steps without holding a manager.
//!
//! Run:
//! - `RUST_LOG=warn cargo run -p understory_demos --example interactive_global`

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::{Point, Rect};
use tracing_subscriber::EnvFilter;
use understory_interactive::geometry::contains_inclusive;
use understory_interactive::global;
use understory_interactive::listener::{Capabilities, Listener};
use understory_interactive::manager::{MouseEvent, Surface};

struct Window;

impl Surface for Window {
    fn pointer(&self) -> Point {
        Point::new(30.0, 30.0)
    }
    fn listen_window_wheel(&mut self) -> bool {
        true
    }
}

/// A scrollable list whose rows move under a still pointer.
struct List {
    bounds: Rect,
    offset: i32,
}

impl List {
    fn new(bounds: Rect) -> Rc<RefCell<Self>> {
        let list = Rc::new(RefCell::new(Self { bounds, offset: 0 }));
        global::register(&list);
        list
    }
}

impl Listener for List {
    fn capabilities(&self) -> Capabilities {
        Capabilities::HIT_TEST
            | Capabilities::SCROLLED
            | Capabilities::ENTERED_AT
            | Capabilities::EXITED_AT
    }
    fn contains(&self, pos: Point) -> bool {
        contains_inclusive(self.bounds, pos)
    }
    fn mouse_scrolled(&mut self, step: i32) {
        self.offset += step;
        println!("  [list] scrolled by {step}, offset {}", self.offset);
    }
    fn mouse_entered_at(&mut self, pos: Point) {
        println!("  [list] pointer over at {pos:?}");
    }
    fn mouse_exited_at(&mut self, pos: Point) {
        println!("  [list] pointer left at {pos:?}");
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Enrolling before binding is reported and skipped.
    let early = List::new(Rect::new(0.0, 0.0, 10.0, 10.0));

    global::make(Box::new(Window));
    global::make(Box::new(Window));

    let list = List::new(Rect::new(0.0, 0.0, 100.0, 100.0));

    println!("== Frames ==");
    global::mouse_event(MouseEvent::moved(30, 30));
    for step in [1, 1, -1] {
        global::draw();
        // The window hook is live, so the generic channel copy is dropped.
        global::mouse_event(MouseEvent::wheel(step));
        global::mouse_wheel_moved(step);
    }

    assert_eq!(list.borrow().offset, 1);
    assert_eq!(early.borrow().offset, 0);
    assert_eq!(global::with(|m| m.registry().len()), Ok(1));
}
