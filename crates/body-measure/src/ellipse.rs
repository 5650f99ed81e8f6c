//! Elliptical cross-section perimeters.
//!
//! A torso slice is modeled as an ellipse whose major axis is the width seen
//! in the photo and whose minor axis is that width scaled by a depth factor.
//! The perimeter uses Ramanujan's second approximation, which is exact for a
//! circle and within 0.1% for realistic torso aspect ratios. Results feed
//! numerical-compatibility tests, so the operation order below is fixed.

use std::f64::consts::PI;

/// Perimeter of an ellipse with semi-axes `a` and `b` (Ramanujan II).
///
/// ```text
/// h = (a - b)² / (a + b)²
/// P ≈ π (a + b) (1 + 3h / (10 + √(4 - 3h)))
/// ```
///
/// Returns 0 for a degenerate ellipse (`a + b == 0`).
pub fn ramanujan_perimeter(a: f64, b: f64) -> f64 {
    let sum = a + b;
    if sum == 0.0 {
        return 0.0;
    }
    let h = (a - b).powi(2) / sum.powi(2);
    PI * sum * (1.0 + (3.0 * h) / (10.0 + (4.0 - 3.0 * h).sqrt()))
}

/// Circumference in whole centimeters of a cross-section `width_cm` wide.
///
/// `a = width / 2`, `b = width · depth_factor / 2`, rounded to the nearest
/// centimeter.
pub fn ellipse_circumference_cm(width_cm: f64, depth_factor: f64) -> u32 {
    let a = width_cm / 2.0;
    let b = (width_cm * depth_factor) / 2.0;
    ramanujan_perimeter(a, b).round() as u32
}

/// [`ellipse_circumference_cm`] that refuses to saturate.
///
/// Returns `None` when the rounded perimeter is not finite or does not fit
/// in a `u32`.
pub fn checked_circumference_cm(width_cm: f64, depth_factor: f64) -> Option<u32> {
    let a = width_cm / 2.0;
    let b = (width_cm * depth_factor) / 2.0;
    let perimeter = ramanujan_perimeter(a, b).round();
    if perimeter.is_finite() && (0.0..=u32::MAX as f64).contains(&perimeter) {
        Some(perimeter as u32)
    } else {
        None
    }
}
