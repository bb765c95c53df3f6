// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interactive basics.
//!
//! Drives an owned manager with a scripted pointer path over a native slider and a
//! listener-based button, printing the callbacks as they happen.
//!
//! Run:
//! - `cargo run -p understory_demos --example interactive_basics`
//! - `RUST_LOG=understory_interactive=trace cargo run -p understory_demos --example interactive_basics`

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use kurbo::{Point, Rect};
use tracing_subscriber::EnvFilter;
use understory_interactive::element::{Element, ElementId};
use understory_interactive::geometry::{contains_inclusive, inside_rect};
use understory_interactive::listener::{Capabilities, Listener};
use understory_interactive::manager::{Manager, MouseEvent, Surface};

/// Stand-in for the host sketch: just remembers where the pointer is.
struct Sketch {
    pointer: Rc<Cell<Point>>,
}

impl Surface for Sketch {
    fn pointer(&self) -> Point {
        self.pointer.get()
    }
}

/// A button that only cares about hover and presses.
struct Button {
    label: &'static str,
    x: f64,
    y: f64,
    w: f64,
    h: f64,
    clicks: u32,
}

impl Listener for Button {
    fn capabilities(&self) -> Capabilities {
        Capabilities::HIT_TEST
            | Capabilities::ENTERED
            | Capabilities::EXITED
            | Capabilities::PRESSED
    }
    fn contains(&self, pos: Point) -> bool {
        inside_rect(self.x, self.y, self.w, self.h, pos.x, pos.y)
    }
    fn mouse_entered(&mut self) {
        println!("  [{}] hover on", self.label);
    }
    fn mouse_exited(&mut self) {
        println!("  [{}] hover off", self.label);
    }
    fn mouse_pressed(&mut self, _pos: Point) {
        self.clicks += 1;
        println!("  [{}] pressed ({} total)", self.label, self.clicks);
    }
}

/// A native horizontal slider that follows drags.
struct Slider {
    track: Rect,
    value: f64,
}

impl Element for Slider {
    fn contains(&self, pos: Point) -> bool {
        contains_inclusive(self.track, pos)
    }
    fn draw(&mut self) {
        println!("  [slider] draw value={:.2}", self.value);
    }
    fn mouse_dragged_pre(&mut self, pos: Point) {
        let t = (pos.x - self.track.x0) / self.track.width();
        self.value = t.clamp(0.0, 1.0);
        println!("  [slider] dragged to {:.2}", self.value);
    }
    fn mouse_released_post(&mut self, _pos: Point) {
        println!("  [slider] settled at {:.2}", self.value);
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let pointer = Rc::new(Cell::new(Point::ZERO));
    let mut manager = Manager::new(Box::new(Sketch {
        pointer: pointer.clone(),
    }));

    let ok = Rc::new(RefCell::new(Button {
        label: "ok",
        x: 10.0,
        y: 10.0,
        w: 60.0,
        h: 20.0,
        clicks: 0,
    }));
    let slider = Rc::new(RefCell::new(Slider {
        track: Rect::new(10.0, 50.0, 110.0, 60.0),
        value: 0.0,
    }));
    manager.register(&ok);
    manager.add(slider.clone());

    let move_to = |m: &mut Manager, x: i32, y: i32| {
        pointer.set(Point::new(f64::from(x), f64::from(y)));
        m.mouse_event(MouseEvent::moved(x, y));
    };

    println!("== Hover and press the button ==");
    move_to(&mut manager, 20, 15);
    move_to(&mut manager, 25, 15);
    manager.mouse_event(MouseEvent::pressed(25, 15));
    manager.mouse_event(MouseEvent::released(25, 15));

    println!("== Drag the slider ==");
    move_to(&mut manager, 12, 55);
    manager.mouse_event(MouseEvent::pressed(12, 55));
    for x in [40, 80, 140] {
        manager.mouse_event(MouseEvent::dragged(x, 55));
    }
    manager.mouse_event(MouseEvent::released(140, 55));
    manager.draw();

    println!("== Disable the button ==");
    manager.set_active(ElementId::of(&ok), false);
    move_to(&mut manager, 20, 15);
    manager.mouse_event(MouseEvent::pressed(20, 15));

    assert_eq!(ok.borrow().clicks, 1);
    assert!((slider.borrow().value - 1.0).abs() < f64::EPSILON);
}
