//! 几何辅助函数
//!
//! 提供 DirectXMath 中 `XMVector3TransformCoord`、`XMVector3TransformNormal`、
//! `XMVector3AngleBetweenNormals` 的等价实现，以及用于阴影拟合的包围球。

use super::{Matrix4, Vector3, Vector4};

/// 场景包围球
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    pub center: Vector3,
    pub radius: f32,
}

impl BoundingSphere {
    pub fn new(center: Vector3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// 点是否在球内（含边界）
    pub fn contains(&self, point: &Vector3) -> bool {
        (point - self.center).norm_squared() <= self.radius * self.radius
    }
}

/// 变换一个点并做齐次除法
pub fn transform_coord(point: &Vector3, m: &Matrix4) -> Vector3 {
    let p = m * Vector4::new(point.x, point.y, point.z, 1.0);
    if p.w.abs() > f32::EPSILON {
        Vector3::new(p.x / p.w, p.y / p.w, p.z / p.w)
    } else {
        Vector3::new(p.x, p.y, p.z)
    }
}

/// 变换一个方向，忽略平移
pub fn transform_normal(direction: &Vector3, m: &Matrix4) -> Vector3 {
    m.transform_vector(direction)
}

/// 两个单位向量之间的夹角（弧度）
///
/// 点积先限制在 [-1, 1]，避免浮点误差让 `acos` 返回 NaN。
pub fn angle_between_normals(a: &Vector3, b: &Vector3) -> f32 {
    a.dot(b).clamp(-1.0, 1.0).acos()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::matrix;

    #[test]
    fn test_transform_coord_applies_translation() {
        let m = matrix::translation(1.0, 2.0, 3.0);
        let p = transform_coord(&Vector3::new(1.0, 1.0, 1.0), &m);
        assert_eq!(p, Vector3::new(2.0, 3.0, 4.0));
    }

    #[test]
    fn test_transform_normal_ignores_translation() {
        let m = matrix::translation(1.0, 2.0, 3.0);
        let d = transform_normal(&Vector3::new(0.0, 0.0, 1.0), &m);
        assert_eq!(d, Vector3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_angle_between_normals() {
        let right_angle = angle_between_normals(&Vector3::x(), &Vector3::z());
        assert!((right_angle - std::f32::consts::FRAC_PI_2).abs() < 1e-6);

        let same = angle_between_normals(&Vector3::x(), &Vector3::x());
        assert!(same.abs() < 1e-3);
        assert!(!same.is_nan());
    }

    #[test]
    fn test_sphere_contains() {
        let sphere = BoundingSphere::new(Vector3::zeros(), 2.0);
        assert!(sphere.contains(&Vector3::new(0.0, 2.0, 0.0)));
        assert!(!sphere.contains(&Vector3::new(2.0, 2.0, 0.0)));
    }
}
