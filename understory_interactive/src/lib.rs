// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_interactive --heading-base-level=0

//! Understory Interactive: hover tracking and pointer dispatch for canvas elements.
//!
//! ## Overview
//!
//! This crate sits between an immediate-mode graphics host and the interactive things it
//! draws. The host pushes draw ticks and raw pointer events into a
//! [`Manager`](crate::manager::Manager). The manager keeps per-element hover and
//! activation state and calls the matching hooks on each registered element, in
//! registration order.
//!
//! It does not lay anything out and does not render. Each element answers its own hit
//! test, usually with [`geometry::inside_rect`](crate::geometry::inside_rect).
//!
//! ## Participants
//!
//! - Native elements implement [`Element`](crate::element::Element) and are enrolled with
//!   [`Manager::add`](crate::manager::Manager::add).
//! - Any other object can implement [`Listener`](crate::listener::Listener), declare the
//!   hooks it supports as [`Capabilities`](crate::listener::Capabilities), and be enrolled
//!   with [`Manager::register`](crate::manager::Manager::register). A
//!   [`ListenerAdapter`](crate::listener::ListenerAdapter) bridges the two; undeclared
//!   hooks are never called.
//!
//! Both are shared as `Rc<RefCell<_>>`. The caller's own `Rc` is the handle for
//! [`Manager::set_active`](crate::manager::Manager::set_active) (via
//! [`ElementId::of`](crate::element::ElementId::of)), even when the registry actually holds
//! an adapter around it.
//!
//! ## Hover state machine
//!
//! On every pointer move, each active element is hit-tested and compared with its previous
//! hover flag:
//!
//! | was hovered | hit now | callbacks                                  |
//! |-------------|---------|--------------------------------------------|
//! | no          | yes     | `mouse_entered`, `mouse_entered_at`        |
//! | yes         | no      | `mouse_exited`, `mouse_exited_at`          |
//! | yes         | yes     | `mouse_moved`, `mouse_moved_at`            |
//! | no          | no      | none                                       |
//!
//! Press, drag and release go only to elements that are hovered at that moment and do not
//! re-run hit testing. Release is two-phase (`mouse_released_pre`, then
//! `mouse_released_post`, on the same element). Wheel steps go to every active element and
//! are followed by an enter/exit check at the current pointer. Clicks are not synthesized.
//!
//! Inactive elements receive nothing and keep the hover flag they had when deactivated.
//!
//! ## Binding
//!
//! A [`Manager`](crate::manager::Manager) is a plain value bound to one
//! [`Surface`](crate::manager::Surface), so tests and embedders can own as many as they
//! like. With the `std` feature, the [`global`] module additionally offers a thread-bound
//! manager and free functions for hosts where elements enroll themselves.
//!
//! ## Features
//!
//! - `std` (default): std support in dependencies and the [`global`] module.
//! - `libm`: no_std float support for Kurbo.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod element;
pub mod error;
pub mod geometry;
#[cfg(feature = "std")]
pub mod global;
pub mod listener;
pub mod manager;
pub mod registry;
