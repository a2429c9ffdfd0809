//! Dial ring and clock hands.

use std::f64::consts::TAU;

use mechwatch_core::{Point, Transform};

use crate::surface::{Primitive, RenderSurface};

pub const DIAL_ID: &str = "dial";
pub const HOUR_HAND_ID: &str = "hand-hour";
pub const MINUTE_HAND_ID: &str = "hand-minute";
pub const SECOND_HAND_ID: &str = "hand-second";

/// Radius of the dial ring; everything in the train fits inside it.
pub const DIAL_RADIUS: f64 = 124.0;

/// Needle pointing at twelve o'clock (negative y) from the local origin.
fn needle(length: f64, half_width: f64, tail: f64) -> Primitive {
    Primitive::Polygon(vec![
        Point::new(-half_width, tail),
        Point::new(0.0, -length),
        Point::new(half_width, tail),
    ])
}

fn dial_primitives() -> Vec<Primitive> {
    let mut primitives = vec![Primitive::Disk {
        center: Point::ORIGIN,
        radius: DIAL_RADIUS,
    }];
    // Hour ticks, twelve o'clock first.
    primitives.extend((0..12).map(|i| {
        let theta = f64::from(i) * TAU / 12.0 - TAU / 4.0;
        let inner = if i % 3 == 0 { 108.0 } else { 114.0 };
        Primitive::Polygon(vec![
            Point::polar(inner, theta),
            Point::polar(DIAL_RADIUS - 2.0, theta),
        ])
    }));
    primitives
}

/// Register the dial and the hour, minute and second hands on `surface`.
pub fn register_dial<S: RenderSurface + ?Sized>(surface: &mut S) {
    surface.register(DIAL_ID, dial_primitives());
    surface.set_transform(DIAL_ID, Transform::IDENTITY);

    surface.register(HOUR_HAND_ID, vec![needle(56.0, 3.0, 8.0)]);
    surface.register(MINUTE_HAND_ID, vec![needle(88.0, 2.0, 10.0)]);
    surface.register(SECOND_HAND_ID, vec![needle(104.0, 0.5, 16.0)]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::CanvasSurface;

    #[test]
    fn test_registers_all_hands() {
        let mut surface = CanvasSurface::new();
        register_dial(&mut surface);
        for id in [DIAL_ID, HOUR_HAND_ID, MINUTE_HAND_ID, SECOND_HAND_ID] {
            assert!(surface.contains(id), "missing {id}");
        }
    }

    #[test]
    fn test_first_tick_is_at_twelve() {
        let primitives = dial_primitives();
        assert_eq!(primitives.len(), 13);
        let Primitive::Polygon(tick) = &primitives[1] else {
            panic!("tick should be a polygon");
        };
        assert!(tick[0].x.abs() < 1e-9);
        assert!(tick[0].y < 0.0);
    }
}
