// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::cell::RefCell;
use std::rc::Rc;

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect};
use understory_interactive::element::Element;
use understory_interactive::geometry::contains_inclusive;
use understory_interactive::listener::{Capabilities, Listener};
use understory_interactive::manager::{Manager, MouseEvent, Surface};

struct Still;
impl Surface for Still {
    fn pointer(&self) -> Point {
        Point::new(5.0, 5.0)
    }
}

struct Cell {
    bounds: Rect,
    moves: u64,
}

impl Element for Cell {
    fn contains(&self, pos: Point) -> bool {
        contains_inclusive(self.bounds, pos)
    }
    fn mouse_moved_at(&mut self, _pos: Point) {
        self.moves += 1;
    }
}

impl Listener for Cell {
    fn capabilities(&self) -> Capabilities {
        Capabilities::HIT_TEST | Capabilities::MOVED_AT
    }
    fn contains(&self, pos: Point) -> bool {
        contains_inclusive(self.bounds, pos)
    }
    fn mouse_moved_at(&mut self, _pos: Point) {
        self.moves += 1;
    }
}

fn grid_cells(n: usize, cell: f64) -> impl Iterator<Item = Cell> {
    (0..n * n).map(move |i| {
        let x0 = (i % n) as f64 * cell;
        let y0 = (i / n) as f64 * cell;
        Cell {
            bounds: Rect::new(x0, y0, x0 + cell, y0 + cell),
            moves: 0,
        }
    })
}

fn native_manager(n: usize) -> Manager {
    let mut m = Manager::new(Box::new(Still));
    for c in grid_cells(n, 10.0) {
        m.add(Rc::new(RefCell::new(c)));
    }
    m
}

fn listener_manager(n: usize) -> Manager {
    let mut m = Manager::new(Box::new(Still));
    for c in grid_cells(n, 10.0) {
        m.register(&Rc::new(RefCell::new(c)));
    }
    m
}

/// Pointer path sweeping diagonally across the grid.
fn sweep(n: usize) -> Vec<MouseEvent> {
    let extent = (n * 10) as i32;
    (0..extent).step_by(3).map(|v| MouseEvent::moved(v, v)).collect()
}

fn bench_moves(c: &mut Criterion) {
    let mut group = c.benchmark_group("move_dispatch");
    for &n in &[4_usize, 8, 16] {
        let events = sweep(n);
        group.throughput(Throughput::Elements((events.len() * n * n) as u64));
        group.bench_function(format!("native/{}", n * n), |b| {
            b.iter_batched(
                || native_manager(n),
                |mut m| {
                    for &e in &events {
                        m.mouse_event(black_box(e));
                    }
                    m
                },
                BatchSize::SmallInput,
            );
        });
        group.bench_function(format!("listener/{}", n * n), |b| {
            b.iter_batched(
                || listener_manager(n),
                |mut m| {
                    for &e in &events {
                        m.mouse_event(black_box(e));
                    }
                    m
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_wheel(c: &mut Criterion) {
    let mut group = c.benchmark_group("wheel_dispatch");
    for &n in &[4_usize, 16] {
        let mut m = listener_manager(n);
        group.bench_function(format!("listener/{}", n * n), |b| {
            b.iter(|| m.mouse_wheel_moved(black_box(1)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_moves, bench_wheel);
criterion_main!(benches);
