//! Cell module - a fixed grid slot owning exactly one element

use std::mem;

use crate::element::Element;
use crate::types::Coord;

#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    coord: Coord,
    pub(crate) element: Element,
}

impl Cell {
    pub(crate) fn new(coord: Coord, element: Element) -> Self {
        Self { coord, element }
    }

    pub fn coord(&self) -> Coord {
        self.coord
    }

    pub fn element(&self) -> &Element {
        &self.element
    }

    /// Exchange elements with `other`; coordinates stay put
    pub(crate) fn swap_content(&mut self, other: &mut Cell) {
        mem::swap(&mut self.element, &mut other.element);
    }
}
