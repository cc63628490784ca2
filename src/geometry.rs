// src/geometry.rs - Distance and joint angle helpers over normalized landmarks
use nalgebra::{Vector2, Vector3};

/// A landmark position in normalized image space. `z` is depth relative to the wrist.
pub type Point3 = Vector3<f64>;

pub fn distance_2d(a: &Point3, b: &Point3) -> f64 {
    (a.xy() - b.xy()).norm()
}

pub fn distance_3d(a: &Point3, b: &Point3) -> f64 {
    (a - b).norm()
}

/// Interior angle at `b` formed by `b->a` and `b->c`, in degrees, using x/y only.
///
/// Returns 0 when either ray has zero length.
pub fn joint_angle_degrees(a: &Point3, b: &Point3, c: &Point3) -> f64 {
    let ba: Vector2<f64> = a.xy() - b.xy();
    let bc: Vector2<f64> = c.xy() - b.xy();

    let mag1 = ba.norm();
    let mag2 = bc.norm();
    if mag1 == 0.0 || mag2 == 0.0 {
        return 0.0;
    }

    let cos_angle = (ba.dot(&bc) / (mag1 * mag2)).clamp(-1.0, 1.0);
    cos_angle.acos().to_degrees()
}

/// Population standard deviation. Empty input has no spread.
pub fn spread(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    variance.sqrt()
}
