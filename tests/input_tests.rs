//! Swipe input driving swaps on a live cycle

use tile_match::core::{AuthoredLayout, Grid, LevelCycle};
use tile_match::input::{direction_from_angle, swipe_angle, SwipeQuantizer};
use tile_match::types::{Coord, Direction, ElementKind, SwapRequest, Vec2, TICK_MS};

#[test]
fn test_quantized_swipe_swaps_on_offset_grid() {
    let mut layout = AuthoredLayout::new(2, 1, 2).with(0, 0, 0).with(1, 0, 1);
    layout.origin = Vec2::new(10.0, -4.0);
    let grid = Grid::from_layout(&layout, 0).unwrap();
    let mut cycle = LevelCycle::new(vec![grid], 0).unwrap();
    cycle.tick(TICK_MS);

    let mut quantizer = SwipeQuantizer::new(cycle.grid().origin());
    quantizer.press(Vec2::new(10.4, -3.6));
    let request = quantizer.release(Vec2::new(11.3, -3.5)).unwrap();
    assert_eq!(request, SwapRequest::new(Coord::new(0, 0), Coord::new(1, 0)));

    assert!(cycle.apply(request));
    assert_eq!(cycle.grid().kind(Coord::new(0, 0)), Some(ElementKind::Tile(1)));
}

#[test]
fn test_swipe_off_the_grid_is_rejected_by_the_engine() {
    let layout = AuthoredLayout::new(2, 1, 2).with(0, 0, 0).with(1, 0, 1);
    let grid = Grid::from_layout(&layout, 0).unwrap();
    let mut cycle = LevelCycle::new(vec![grid], 0).unwrap();
    cycle.tick(TICK_MS);
    let before = cycle.grid().clone();

    let quantizer = SwipeQuantizer::default();
    let request = quantizer
        .quantize(Vec2::new(0.5, 0.5), Vec2::new(0.5, -0.5))
        .unwrap();
    assert_eq!(request.to, Coord::new(0, -1));
    assert!(!cycle.apply(request));
    assert_eq!(cycle.grid(), &before);
}

#[test]
fn test_every_direction_is_reachable() {
    let start = Vec2::new(0.0, 0.0);
    let cases = [
        (Vec2::new(1.0, 0.0), Direction::Right),
        (Vec2::new(0.0, 1.0), Direction::Up),
        (Vec2::new(-1.0, 0.0), Direction::Left),
        (Vec2::new(0.0, -1.0), Direction::Down),
        (Vec2::new(1.0, 0.9), Direction::Right),
        (Vec2::new(-1.0, -0.9), Direction::Left),
    ];
    for (end, dir) in cases {
        assert_eq!(direction_from_angle(swipe_angle(start, end)), dir, "{:?}", end);
    }
}

#[test]
fn test_short_swipe_is_a_tap() {
    let mut quantizer = SwipeQuantizer::default();
    quantizer.press(Vec2::new(1.5, 1.5));
    assert_eq!(quantizer.release(Vec2::new(1.6, 1.6)), None);
}
