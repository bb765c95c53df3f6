// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordered, add-only collection of elements with per-element dispatch state.
//!
//! ## Overview
//!
//! The [`Registry`] keeps elements in registration order, which is also the order every
//! draw tick and pointer event visits them. Each entry carries the dispatch state the
//! manager tracks for it:
//!
//! - `active`: whether the element takes part in dispatch at all.
//! - `hover`: whether the pointer was inside the element at the last hover update.
//!
//! There is no removal. Elements that should stop receiving events are deactivated with
//! [`Registry::set_active`]; their hover flag stays frozen until they are reactivated.
//!
//! ## Identity
//!
//! Entries are matched by [`ElementId`]. An entry answers to its own id and, for
//! adapters, to the id of the wrapped listener reported by
//! [`Element::listener_id`](crate::element::Element::listener_id). Adding anything that
//! matches an existing entry is a no-op.

use alloc::vec::Vec;

use crate::element::{ElementId, ElementRef};

pub(crate) struct Entry {
    pub(crate) element: ElementRef,
    pub(crate) id: ElementId,
    pub(crate) listener: Option<ElementId>,
    pub(crate) active: bool,
    pub(crate) hover: bool,
}

impl Entry {
    fn matches(&self, id: ElementId) -> bool {
        self.id == id || self.listener == Some(id)
    }
}

/// Registered elements in registration order.
#[derive(Default)]
pub struct Registry {
    pub(crate) entries: Vec<Entry>,
}

impl core::fmt::Debug for Registry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Registry")
            .field("len", &self.entries.len())
            .finish_non_exhaustive()
    }
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Number of registered elements, active or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been registered yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether any entry answers to `id`, either directly or through its listener.
    pub fn contains(&self, id: ElementId) -> bool {
        self.entries.iter().any(|e| e.matches(id))
    }

    /// Append `element` as active and not hovered.
    ///
    /// Returns `false` and leaves the registry untouched if an entry already answers to
    /// the element's id or to its wrapped listener's id.
    pub fn add(&mut self, element: ElementRef) -> bool {
        let id = ElementId::of(&element);
        let listener = match element.try_borrow() {
            Ok(e) => e.listener_id(),
            Err(_) => {
                tracing::warn!(?id, "element is borrowed while being added; not registered");
                return false;
            }
        };
        if self.contains(id) || listener.is_some_and(|l| self.contains(l)) {
            tracing::debug!(?id, "element already registered");
            return false;
        }
        self.entries.push(Entry {
            element,
            id,
            listener,
            active: true,
            hover: false,
        });
        true
    }

    /// Set the active flag on every entry that answers to `id`.
    ///
    /// Hover flags are left as they are. Returns the number of entries updated.
    pub fn set_active(&mut self, id: ElementId, state: bool) -> usize {
        let mut n = 0;
        for entry in self.entries.iter_mut().filter(|e| e.matches(id)) {
            entry.active = state;
            n += 1;
        }
        n
    }

    /// Active flag of the entry answering to `id`, if registered.
    pub fn is_active(&self, id: ElementId) -> Option<bool> {
        self.find(id).map(|e| e.active)
    }

    /// Hover flag of the entry answering to `id`, if registered.
    pub fn is_hovered(&self, id: ElementId) -> Option<bool> {
        self.find(id).map(|e| e.hover)
    }

    /// Ids of all entries in registration order.
    pub fn ids(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.entries.iter().map(|e| e.id)
    }

    /// Visit active entries in registration order with their id and hover flag.
    pub fn for_each_active(&self, mut f: impl FnMut(ElementId, bool)) {
        for entry in self.entries.iter().filter(|e| e.active) {
            f(entry.id, entry.hover);
        }
    }

    pub(crate) fn for_each_active_mut(&mut self, mut f: impl FnMut(&mut Entry)) {
        for entry in self.entries.iter_mut().filter(|e| e.active) {
            f(entry);
        }
    }

    fn find(&self, id: ElementId) -> Option<&Entry> {
        self.entries.iter().find(|e| e.matches(id))
    }
}
