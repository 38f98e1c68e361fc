//! 2D vector helpers on top of nalgebra
//!
//! Addition, subtraction and scaling are the nalgebra operators on [`NVec2`];
//! this module only adds the distance terms the force engine needs

use nalgebra::Vector2;

pub type NVec2 = Vector2<f64>;

/// Euclidean length |a|
#[inline]
pub fn magnitude(a: &NVec2) -> f64 {
    a.norm()
}

/// |b - a|^3, the denominator of the inverse-square law written in vector form
///
/// Symmetric in its arguments: `cubed_distance(a, b) == cubed_distance(b, a)` bit for bit
#[inline]
pub fn cubed_distance(a: &NVec2, b: &NVec2) -> f64 {
    magnitude(&(b - a)).powi(3)
}

/// Clamp a cubed distance to the `eps` floor so near-coincident bodies stay finite
#[inline]
pub fn floored(d3: f64, eps: f64) -> f64 {
    if d3 < eps { eps } else { d3 }
}
