//! 统一的数学库模块
//!
//! 基于 `nalgebra` 提供场景逻辑需要的数学类型和函数。
//!
//! # 约定
//!
//! 内部统一使用列向量（`M * v`），与 nalgebra 一致。
//! `matrix` 子模块中的左手系函数在数值上等价于 DirectXMath 对应函数的转置，
//! 因此 `gpu_matrix()` 得到的字节与 DirectXMath 的 "先转置再上传" 完全相同，
//! 着色器里的 `mul(v, M)` 无需修改。
//!
//! # 模块组织
//!
//! - **基础类型**：Vector2/3/4, Matrix4
//! - **常量**：PI, DEG_TO_RAD 等
//! - **工具函数**：clamp, lerp 等
//! - **矩阵辅助函数**：look_at_lh, perspective_fov_lh, orthographic_off_center_lh 等
//! - **几何辅助**：包围球、点/方向变换（见 geometry 子模块）

pub use nalgebra::{Matrix4 as Mat4, Point3, Vector2 as Vec2, Vector3 as Vec3, Vector4 as Vec4};

// 类型别名，使用更简洁的名称
pub type Vector2 = Vec2<f32>;
pub type Vector3 = Vec3<f32>;
pub type Vector4 = Vec4<f32>;
pub type Matrix4 = Mat4<f32>;

/// 数学常量
pub mod constants {
    /// π
    pub const PI: f32 = std::f32::consts::PI;

    /// π/2
    pub const HALF_PI: f32 = std::f32::consts::FRAC_PI_2;

    /// π/4
    pub const QUARTER_PI: f32 = std::f32::consts::FRAC_PI_4;

    /// 1/(2π)
    pub const ONE_DIV_TWO_PI: f32 = 1.0 / std::f32::consts::TAU;

    /// 角度转弧度的系数
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// 弧度转角度的系数
    pub const RAD_TO_DEG: f32 = 180.0 / PI;

    /// 浮点数比较的 epsilon
    pub const EPSILON: f32 = 1e-6;
}

/// 数学工具函数
pub mod utils {
    use super::*;

    /// 限制值在范围内
    pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
        if value < min {
            min
        } else if value > max {
            max
        } else {
            value
        }
    }

    /// 线性插值
    pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
        a + (b - a) * t
    }

    /// 角度转弧度
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// 弧度转角度
    pub fn rad_to_deg(radians: f32) -> f32 {
        radians * constants::RAD_TO_DEG
    }

    /// 检查两个浮点数是否近似相等
    pub fn approx_eq(a: f32, b: f32, epsilon: f32) -> bool {
        (a - b).abs() < epsilon
    }

    /// 归一化；零向量保持为零，而不是产生 NaN
    pub fn normalize_or_zero(v: &Vector3) -> Vector3 {
        v.try_normalize(constants::EPSILON).unwrap_or_else(Vector3::zeros)
    }

    /// 球坐标 (radius, phi, theta) 转笛卡尔偏移，phi 从 +Y 轴量起
    pub fn spherical_offset(radius: f32, phi: f32, theta: f32) -> Vector3 {
        Vector3::new(
            radius * phi.sin() * theta.cos(),
            radius * phi.cos(),
            radius * phi.sin() * theta.sin(),
        )
    }
}

/// 矩阵辅助函数（左手系，DirectXMath 语义）
pub mod matrix {
    use super::*;

    /// 创建平移矩阵
    pub fn translation(x: f32, y: f32, z: f32) -> Matrix4 {
        Matrix4::new_translation(&Vector3::new(x, y, z))
    }

    /// 先 roll（Z）再 pitch（X）最后 yaw（Y）的旋转，参数为弧度
    pub fn rotation_roll_pitch_yaw(pitch: f32, yaw: f32, roll: f32) -> Matrix4 {
        let rx = Matrix4::from_axis_angle(&Vector3::x_axis(), pitch);
        let ry = Matrix4::from_axis_angle(&Vector3::y_axis(), yaw);
        let rz = Matrix4::from_axis_angle(&Vector3::z_axis(), roll);
        ry * rx * rz
    }

    /// 左手系观察矩阵
    pub fn look_at_lh(eye: &Vector3, at: &Vector3, up: &Vector3) -> Matrix4 {
        look_to_lh(eye, &(at - eye), up)
    }

    /// 左手系观察矩阵（给定观察方向）
    pub fn look_to_lh(eye: &Vector3, direction: &Vector3, up: &Vector3) -> Matrix4 {
        let n = utils::normalize_or_zero(direction);
        let u = utils::normalize_or_zero(&up.cross(&n));
        let v = n.cross(&u);

        Matrix4::new(
            u.x, u.y, u.z, -u.dot(eye),
            v.x, v.y, v.z, -v.dot(eye),
            n.x, n.y, n.z, -n.dot(eye),
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// 左手系透视投影，深度映射到 [0, 1]
    pub fn perspective_fov_lh(fov_y: f32, aspect: f32, near: f32, far: f32) -> Matrix4 {
        let h = 1.0 / (0.5 * fov_y).tan();
        let w = h / aspect;
        let range = far / (far - near);

        Matrix4::new(
            w, 0.0, 0.0, 0.0,
            0.0, h, 0.0, 0.0,
            0.0, 0.0, range, -range * near,
            0.0, 0.0, 1.0, 0.0,
        )
    }

    /// 左手系正交投影，深度映射到 [0, 1]
    pub fn orthographic_off_center_lh(
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    ) -> Matrix4 {
        let rw = 1.0 / (right - left);
        let rh = 1.0 / (top - bottom);
        let rd = 1.0 / (far - near);

        Matrix4::new(
            2.0 * rw, 0.0, 0.0, -(left + right) * rw,
            0.0, 2.0 * rh, 0.0, -(top + bottom) * rh,
            0.0, 0.0, rd, -near * rd,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// 转换为上传给着色器的 4x4 数组
    ///
    /// 逐行写出矩阵，与 DirectXMath 中 `XMMatrixTranspose` 后存储的字节一致。
    pub fn gpu_matrix(m: &Matrix4) -> [[f32; 4]; 4] {
        m.transpose().into()
    }
}

// 几何辅助模块（包围球、坐标变换）
pub mod geometry;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrix_translation() {
        let mat = matrix::translation(1.0, 2.0, 3.0);
        let point = Vector4::new(0.0, 0.0, 0.0, 1.0);
        let result = mat * point;

        assert!((result.x - 1.0).abs() < 1e-6);
        assert!((result.y - 2.0).abs() < 1e-6);
        assert!((result.z - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_look_at_lh_moves_target_onto_positive_z() {
        let eye = Vector3::new(0.0, 0.0, -5.0);
        let view = matrix::look_at_lh(&eye, &Vector3::zeros(), &Vector3::y());
        let p = view * Vector4::new(0.0, 0.0, 0.0, 1.0);
        assert!(p.x.abs() < 1e-6);
        assert!(p.y.abs() < 1e-6);
        assert!((p.z - 5.0).abs() < 1e-6);

        // 左手系：+X 仍在右侧
        let r = view * Vector4::new(1.0, 0.0, 0.0, 1.0);
        assert!((r.x - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_perspective_depth_range() {
        let proj = matrix::perspective_fov_lh(constants::QUARTER_PI, 1.0, 0.1, 1000.0);
        let near = proj * Vector4::new(0.0, 0.0, 0.1, 1.0);
        let far = proj * Vector4::new(0.0, 0.0, 1000.0, 1.0);
        assert!((near.z / near.w).abs() < 1e-5);
        assert!((far.z / far.w - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_orthographic_maps_box_to_clip() {
        let proj = matrix::orthographic_off_center_lh(-2.0, 2.0, -1.0, 3.0, 1.0, 5.0);
        let lo = proj * Vector4::new(-2.0, -1.0, 1.0, 1.0);
        let hi = proj * Vector4::new(2.0, 3.0, 5.0, 1.0);
        assert!((lo.x + 1.0).abs() < 1e-6 && (lo.y + 1.0).abs() < 1e-6 && lo.z.abs() < 1e-6);
        assert!((hi.x - 1.0).abs() < 1e-6 && (hi.y - 1.0).abs() < 1e-6 && (hi.z - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_yaw_turns_front_towards_right() {
        // 左手系下正的 yaw 把 +Z 转向 +X
        let rotate = matrix::rotation_roll_pitch_yaw(0.0, utils::deg_to_rad(90.0), 0.0);
        let front = rotate.transform_vector(&Vector3::z());
        assert!((front.x - 1.0).abs() < 1e-6);
        assert!(front.z.abs() < 1e-6);
    }

    #[test]
    fn test_gpu_matrix_is_row_major() {
        let mat = matrix::translation(1.0, 2.0, 3.0);
        let gpu = matrix::gpu_matrix(&mat);
        // DirectXMath 的平移在第 4 行，转置后位于每行的最后一列
        assert_eq!(gpu[0][3], 1.0);
        assert_eq!(gpu[1][3], 2.0);
        assert_eq!(gpu[2][3], 3.0);
    }
}
