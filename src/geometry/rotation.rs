use nalgebra::{UnitQuaternion, Vector3};

/// Shortest-arc rotation taking direction `from` onto direction `to`.
///
/// Opposite directions rotate half a turn about an axis perpendicular to
/// `from`. A zero-length input yields the identity.
pub fn rotation_between(from: &Vector3<f64>, to: &Vector3<f64>) -> UnitQuaternion<f64> {
    if from.norm_squared() == 0.0 || to.norm_squared() == 0.0 {
        return UnitQuaternion::identity();
    }

    if let Some(q) = UnitQuaternion::rotation_between(from, to) {
        return q;
    }

    let mut axis = Vector3::z().cross(from);
    if axis.norm_squared() < 1e-12 {
        axis = Vector3::x().cross(from);
    }
    UnitQuaternion::from_scaled_axis(axis.normalize() * std::f64::consts::PI)
}
