//! Layout module - authored level data and its structural validation
//!
//! Layouts arrive as raw data (usually JSON, see [`crate::config`]). Raw
//! element types are integers: `-1` is Empty and `0..kinds` are tiles. A
//! layout is only turned into a grid after [`AuthoredLayout::validate`] has
//! checked every override against the grid bounds and the palette.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Coord, ElementKind, Vec2};

/// One authored override: the element at `(x, y)` starts as `kind`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartElement {
    pub x: i32,
    pub y: i32,
    #[serde(rename = "type")]
    pub kind: i32,
}

impl StartElement {
    pub fn new(x: i32, y: i32, kind: i32) -> Self {
        Self { x, y, kind }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthoredLayout {
    #[serde(default)]
    pub name: String,
    pub width: u16,
    pub height: u16,
    /// Number of distinct tile kinds (visual prefabs) this level uses
    pub kinds: u8,
    #[serde(default)]
    pub origin: Vec2,
    #[serde(default)]
    pub elements: Vec<StartElement>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("layout {name:?} has zero-sized grid {width}x{height}")]
    EmptyGrid { name: String, width: u16, height: u16 },
    #[error("layout {name:?}: element #{index} at ({x}, {y}) lies outside the {width}x{height} grid")]
    OutOfBounds {
        name: String,
        index: usize,
        x: i32,
        y: i32,
        width: u16,
        height: u16,
    },
    #[error("layout {name:?}: element #{index} has type {raw}, expected -1 or 0..{kinds}")]
    UnknownKind {
        name: String,
        index: usize,
        raw: i32,
        kinds: u8,
    },
}

impl AuthoredLayout {
    pub fn new(width: u16, height: u16, kinds: u8) -> Self {
        Self {
            name: String::new(),
            width,
            height,
            kinds,
            origin: Vec2::ZERO,
            elements: Vec::new(),
        }
    }

    /// Builder-style override, mostly for tests and demos
    pub fn with(mut self, x: i32, y: i32, kind: i32) -> Self {
        self.elements.push(StartElement::new(x, y, kind));
        self
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn contains(&self, coord: Coord) -> bool {
        coord.x >= 0
            && coord.y >= 0
            && coord.x < self.width as i32
            && coord.y < self.height as i32
    }

    /// Check bounds and element kinds of every override
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.width == 0 || self.height == 0 {
            return Err(LayoutError::EmptyGrid {
                name: self.name.clone(),
                width: self.width,
                height: self.height,
            });
        }

        for (index, start) in self.elements.iter().enumerate() {
            if !self.contains(Coord::new(start.x, start.y)) {
                return Err(LayoutError::OutOfBounds {
                    name: self.name.clone(),
                    index,
                    x: start.x,
                    y: start.y,
                    width: self.width,
                    height: self.height,
                });
            }
            if ElementKind::from_raw(start.kind, self.kinds).is_none() {
                return Err(LayoutError::UnknownKind {
                    name: self.name.clone(),
                    index,
                    raw: start.kind,
                    kinds: self.kinds,
                });
            }
        }

        Ok(())
    }

    /// Authored kind at `coord`: first matching override wins, Empty otherwise.
    ///
    /// Assumes the layout has been validated.
    pub fn kind_at(&self, coord: Coord) -> ElementKind {
        self.elements
            .iter()
            .find(|s| s.x == coord.x && s.y == coord.y)
            .and_then(|s| ElementKind::from_raw(s.kind, self.kinds))
            .unwrap_or(ElementKind::Empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_override_wins() {
        let layout = AuthoredLayout::new(2, 1, 2).with(0, 0, 1).with(0, 0, 0);
        assert_eq!(layout.kind_at(Coord::new(0, 0)), ElementKind::Tile(1));
        assert_eq!(layout.kind_at(Coord::new(1, 0)), ElementKind::Empty);
    }

    #[test]
    fn rejects_out_of_bounds() {
        let layout = AuthoredLayout::new(3, 3, 1).with(0, 0, 0).with(3, 1, 0);
        let err = layout.validate().unwrap_err();
        assert!(matches!(err, LayoutError::OutOfBounds { index: 1, x: 3, y: 1, .. }));

        let negative = AuthoredLayout::new(3, 3, 1).with(0, -1, 0);
        assert!(negative.validate().is_err());
    }

    #[test]
    fn rejects_type_outside_palette() {
        let layout = AuthoredLayout::new(3, 3, 2).with(1, 1, 2);
        let err = layout.validate().unwrap_err();
        assert_eq!(
            err,
            LayoutError::UnknownKind {
                name: String::new(),
                index: 0,
                raw: 2,
                kinds: 2,
            }
        );
    }

    #[test]
    fn rejects_zero_sized_grid() {
        let layout = AuthoredLayout::new(0, 4, 1).named("flat");
        let err = layout.validate().unwrap_err();
        assert!(err.to_string().contains("flat"));
    }

    #[test]
    fn explicit_empty_is_valid() {
        let layout = AuthoredLayout::new(1, 1, 0).with(0, 0, -1);
        assert!(layout.validate().is_ok());
        assert_eq!(layout.kind_at(Coord::new(0, 0)), ElementKind::Empty);
    }

    #[test]
    fn deserializes_type_field() {
        let json = r#"{"width": 2, "height": 1, "kinds": 1, "elements": [{"x": 1, "y": 0, "type": 0}]}"#;
        let layout: AuthoredLayout = serde_json::from_str(json).unwrap();
        assert_eq!(layout.elements, vec![StartElement::new(1, 0, 0)]);
        assert_eq!(layout.origin, Vec2::ZERO);
    }
}
