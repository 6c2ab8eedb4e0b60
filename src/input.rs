//! Abstract input state
//!
//! The host translates hardware events into [`InputState::key_down`] /
//! [`InputState::key_up`] calls; the simulation reads the held and edge
//! sets each fixed tick. Edge sets are cleared exactly once per tick by
//! the session loop, after gameplay has consumed them, so edge-triggered
//! logic (jump buffering) stays consistent when several ticks run inside
//! one render frame.

use serde::{Deserialize, Serialize};

/// Logical game keys; the host owns the physical binding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
    Jump,
    Reset,
}

impl Key {
    #[inline]
    fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// A small set of logical keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeySet {
    bits: u8,
}

impl KeySet {
    #[inline]
    pub fn contains(&self, key: Key) -> bool {
        self.bits & key.bit() != 0
    }

    #[inline]
    fn insert(&mut self, key: Key) {
        self.bits |= key.bit();
    }

    #[inline]
    fn remove(&mut self, key: Key) {
        self.bits &= !key.bit();
    }

    #[inline]
    fn clear(&mut self) {
        self.bits = 0;
    }
}

/// Held keys plus the per-tick edge sets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    held: KeySet,
    just_pressed: KeySet,
    just_released: KeySet,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Host: a key went down. OS key repeat should be filtered out by
    /// the host; repeats of an already-held key do not re-arm the edge.
    pub fn key_down(&mut self, key: Key) {
        if !self.held.contains(key) {
            self.just_pressed.insert(key);
        }
        self.held.insert(key);
    }

    /// Host: a key came up
    pub fn key_up(&mut self, key: Key) {
        self.held.remove(key);
        self.just_released.insert(key);
    }

    #[inline]
    pub fn held(&self, key: Key) -> bool {
        self.held.contains(key)
    }

    #[inline]
    pub fn just_pressed(&self, key: Key) -> bool {
        self.just_pressed.contains(key)
    }

    #[inline]
    pub fn just_released(&self, key: Key) -> bool {
        self.just_released.contains(key)
    }

    /// Drop the edge sets; held keys persist. Called once per fixed
    /// tick, after gameplay has consumed the edges.
    pub fn clear_edges(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
    }
}
