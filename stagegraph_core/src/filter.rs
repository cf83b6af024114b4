// Copyright 2026 the Stagegraph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Filter descriptors attached to nodes.
//!
//! The core treats filters as opaque payloads that are concatenated down the
//! tree, with one exception: a [`Filter::Shadow`] is applied by
//! [`NodeStore::render`](crate::node::NodeStore::render) through the
//! renderer's [`DrawContext`](crate::render::DrawContext).

/// Drop-shadow parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShadowFilter {
    /// Blur radius in pixels.
    pub blur: f64,
    /// Shadow color as packed `0xRRGGBBAA`.
    pub color: u32,
    /// Horizontal offset in pixels.
    pub offset_x: f64,
    /// Vertical offset in pixels.
    pub offset_y: f64,
}

/// A filter applied to a node and, through composition, to its subtree.
#[derive(Clone, Debug, PartialEq)]
pub enum Filter {
    /// Drop shadow, applied through the draw context.
    Shadow(ShadowFilter),
    /// Gaussian-style blur, applied by the backend.
    Blur {
        /// Horizontal blur radius.
        blur_x: f64,
        /// Vertical blur radius.
        blur_y: f64,
        /// Number of passes.
        quality: u32,
    },
    /// Outer or inner glow, applied by the backend.
    Glow {
        /// Glow color as packed `0xRRGGBBAA`.
        color: u32,
        /// Blur radius.
        blur: f64,
        /// Strength multiplier.
        strength: f64,
        /// Glow inside the shape's edge instead of outside.
        inner: bool,
    },
    /// 4×5 row-major color matrix, applied by the backend.
    ColorMatrix([f64; 20]),
    /// Backend-defined filter identified by an opaque key.
    Custom(u32),
}

impl Filter {
    /// Returns the shadow parameters if this is a shadow filter.
    #[inline]
    #[must_use]
    pub fn as_shadow(&self) -> Option<&ShadowFilter> {
        match self {
            Self::Shadow(shadow) => Some(shadow),
            _ => None,
        }
    }
}

/// Returns the first shadow in `filters`, if any.
#[must_use]
pub fn first_shadow(filters: &[Filter]) -> Option<&ShadowFilter> {
    filters.iter().find_map(Filter::as_shadow)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHADOW: ShadowFilter = ShadowFilter {
        blur: 4.0,
        color: 0x0000_00ff,
        offset_x: 2.0,
        offset_y: 3.0,
    };

    #[test]
    fn first_shadow_skips_other_kinds() {
        let filters = [
            Filter::Blur {
                blur_x: 1.0,
                blur_y: 1.0,
                quality: 1,
            },
            Filter::Shadow(SHADOW),
            Filter::Shadow(ShadowFilter { blur: 9.0, ..SHADOW }),
        ];
        assert_eq!(first_shadow(&filters), Some(&SHADOW));
    }

    #[test]
    fn no_shadow_in_opaque_filters() {
        let filters = [Filter::Custom(7), Filter::ColorMatrix([0.0; 20])];
        assert!(first_shadow(&filters).is_none());
    }
}
