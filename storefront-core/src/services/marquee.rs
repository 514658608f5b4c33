//! Marquee - a horizontally scrolling strip of short slogans
//!
//! Pure: the visible frame is a function of elapsed time only.

use std::time::Duration;

use serde::Serialize;

use crate::config::DEFAULT_MARQUEE_SPEED;

pub const DEFAULT_ITEMS: [&str; 4] = [
    "★ do-good",
    "taste-good★",
    "feel-good★",
    "ice-cream★",
];

/// Blank columns on each side of an item
pub const ITEM_PADDING: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marquee {
    items: Vec<String>,
    /// Columns per second
    speed: f64,
    gradient: bool,
}

impl Default for Marquee {
    fn default() -> Self {
        Self::new(
            DEFAULT_ITEMS.iter().map(|s| s.to_string()).collect(),
            DEFAULT_MARQUEE_SPEED,
        )
    }
}

impl Marquee {
    /// Non-finite or non-positive speeds fall back to the default
    pub fn new(items: Vec<String>, speed: f64) -> Self {
        let speed = if speed.is_finite() && speed > 0.0 {
            speed
        } else {
            DEFAULT_MARQUEE_SPEED
        };

        Self {
            items,
            speed,
            gradient: false,
        }
    }

    pub fn with_speed(self, speed: f64) -> Self {
        Self::new(self.items, speed)
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn gradient(&self) -> bool {
        self.gradient
    }

    /// One traversal of the strip: every item once, in order, padded
    pub fn strip(&self) -> String {
        let pad = " ".repeat(ITEM_PADDING);
        self.items
            .iter()
            .map(|item| format!("{pad}{item}{pad}"))
            .collect()
    }

    /// Strip length in characters
    pub fn strip_width(&self) -> usize {
        self.items
            .iter()
            .map(|item| item.chars().count() + 2 * ITEM_PADDING)
            .sum()
    }

    /// Scroll position after `elapsed`
    pub fn offset_at(&self, elapsed: Duration) -> usize {
        let width = self.strip_width();
        if width == 0 {
            return 0;
        }
        let travelled = (elapsed.as_secs_f64() * self.speed).floor() as u128;
        (travelled % width as u128) as usize
    }

    /// `width` characters of the endlessly repeated strip, starting at `offset`
    pub fn frame(&self, offset: usize, width: usize) -> String {
        let strip: Vec<char> = self.strip().chars().collect();
        if strip.is_empty() {
            return " ".repeat(width);
        }

        strip
            .iter()
            .cycle()
            .skip(offset % strip.len())
            .take(width)
            .collect()
    }

    pub fn frame_at(&self, elapsed: Duration, width: usize) -> String {
        self.frame(self.offset_at(elapsed), width)
    }
}
