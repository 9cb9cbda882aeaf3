//! 第三人称相机
//!
//! 相机绕目标点做球面运动：`phi` 是与 +Y 轴的夹角（俯仰），`theta` 是绕 Y 轴的
//! 方位角（偏航）。每次目标移动后调用 `update_eye` 重新计算观察点和基向量。

use bytemuck::{Pod, Zeroable};

use crate::core::config::CameraConfig;
use crate::math::constants::{HALF_PI, QUARTER_PI};
use crate::math::matrix::{gpu_matrix, look_at_lh, perspective_fov_lh};
use crate::math::utils::{clamp, normalize_or_zero, spherical_offset};
use crate::math::{Matrix4, Vector3};

/// 默认俯仰角
pub const DEFAULT_PITCH: f32 = HALF_PI - 0.3;

/// 默认偏航角
pub const DEFAULT_YAW: f32 = 0.0;

/// 俯仰角下限（最高视角）
pub const MIN_PITCH: f32 = HALF_PI - 0.6;

/// 俯仰角上限（略低于水平）
pub const MAX_PITCH: f32 = HALF_PI + 0.2;

/// 相机常量缓冲区数据
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct CameraData {
    /// 转置后的观察矩阵
    pub view: [[f32; 4]; 4],
    /// 转置后的投影矩阵
    pub projection: [[f32; 4]; 4],
    pub eye: [f32; 3],
    pub padding: f32,
}

/// 第三人称相机
#[derive(Debug, Clone)]
pub struct ThirdPersonCamera {
    eye: Vector3,
    at: Vector3,
    up: Vector3,

    // 相机坐标系
    u: Vector3,
    v: Vector3,
    n: Vector3,

    radius: f32,
    phi: f32,
    theta: f32,

    view_matrix: Matrix4,
    proj_matrix: Matrix4,
}

impl ThirdPersonCamera {
    /// 创建相机
    ///
    /// 默认透视投影：FOV = 45 度，aspect = 1.0，near = 0.1，far = 1000.0
    pub fn new(radius: f32) -> Self {
        let mut camera = Self {
            eye: Vector3::zeros(),
            at: Vector3::new(0.0, 0.0, 1.0),
            up: Vector3::new(0.0, 1.0, 0.0),
            u: Vector3::new(1.0, 0.0, 0.0),
            v: Vector3::new(0.0, 1.0, 0.0),
            n: Vector3::new(0.0, 0.0, 1.0),
            radius,
            phi: DEFAULT_PITCH,
            theta: DEFAULT_YAW,
            view_matrix: Matrix4::identity(),
            proj_matrix: Matrix4::identity(),
        };
        camera.set_lens(QUARTER_PI, 1.0, 0.1, 1000.0);
        camera.update_view_matrix();
        camera
    }

    /// 按 `[camera]` 配置创建
    pub fn from_config(config: &CameraConfig, aspect: f32) -> Self {
        let mut camera = Self::new(config.radius);
        camera.set_lens(config.fov_y, aspect, config.near, config.far);
        camera
    }

    // ========== 投影 ==========

    /// 设置左手系透视投影
    ///
    /// # 参数
    /// - `fov_y`: 垂直视场角（弧度）
    /// - `aspect`: 宽高比
    /// - `near_z`: 近裁剪面距离
    /// - `far_z`: 远裁剪面距离
    pub fn set_lens(&mut self, fov_y: f32, aspect: f32, near_z: f32, far_z: f32) {
        self.proj_matrix = perspective_fov_lh(fov_y, aspect, near_z, far_z);
    }

    // ========== 旋转 ==========

    /// 俯仰旋转（弧度），结果限制在 [MIN_PITCH, MAX_PITCH]
    pub fn rotate_pitch(&mut self, radian: f32) {
        self.phi = clamp(self.phi + radian, MIN_PITCH, MAX_PITCH);
    }

    /// 偏航旋转（弧度）
    pub fn rotate_yaw(&mut self, radian: f32) {
        self.theta += radian;
    }

    // ========== 跟随 ==========

    /// 把观察点放到目标周围半径为 `radius` 的球面上，并看向目标
    pub fn update_eye(&mut self, target: Vector3) {
        self.eye = target + spherical_offset(self.radius, self.phi, self.theta);
        self.at = target;
        self.update_basis();
        self.update_view_matrix();
    }

    fn update_basis(&mut self) {
        self.n = normalize_or_zero(&(self.at - self.eye));
        self.u = normalize_or_zero(&self.up.cross(&self.n));
        self.v = normalize_or_zero(&self.n.cross(&self.u));
    }

    fn update_view_matrix(&mut self) {
        self.view_matrix = look_at_lh(&self.eye, &self.at, &self.up);
    }

    // ========== 访问器 ==========

    pub fn eye(&self) -> Vector3 {
        self.eye
    }

    pub fn at(&self) -> Vector3 {
        self.at
    }

    /// 右向量
    pub fn u(&self) -> Vector3 {
        self.u
    }

    /// 上向量
    pub fn v(&self) -> Vector3 {
        self.v
    }

    /// 观察方向
    pub fn n(&self) -> Vector3 {
        self.n
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn phi(&self) -> f32 {
        self.phi
    }

    pub fn theta(&self) -> f32 {
        self.theta
    }

    pub fn view_matrix(&self) -> &Matrix4 {
        &self.view_matrix
    }

    pub fn proj_matrix(&self) -> &Matrix4 {
        &self.proj_matrix
    }

    /// 打包为上传给着色器的数据
    pub fn camera_data(&self) -> CameraData {
        CameraData {
            view: gpu_matrix(&self.view_matrix),
            projection: gpu_matrix(&self.proj_matrix),
            eye: self.eye.into(),
            padding: 0.0,
        }
    }
}

impl Default for ThirdPersonCamera {
    fn default() -> Self {
        Self::new(CameraConfig::default().radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vector4;

    #[test]
    fn test_camera_data_layout() {
        assert_eq!(std::mem::size_of::<CameraData>(), 144);
    }

    #[test]
    fn test_pitch_is_clamped() {
        let mut camera = ThirdPersonCamera::new(10.0);
        camera.rotate_pitch(5.0);
        assert_eq!(camera.phi(), MAX_PITCH);
        camera.rotate_pitch(-5.0);
        assert_eq!(camera.phi(), MIN_PITCH);
        camera.rotate_pitch(0.1);
        assert!(camera.phi() > MIN_PITCH && camera.phi() < MAX_PITCH);
    }

    #[test]
    fn test_eye_on_sphere_around_target() {
        let mut camera = ThirdPersonCamera::new(10.0);
        camera.rotate_yaw(0.7);
        let target = Vector3::new(3.0, -2.0, 5.0);
        camera.update_eye(target);

        assert!(((camera.eye() - target).norm() - 10.0).abs() < 1e-4);
        assert_eq!(camera.at(), target);

        // 基向量正交归一
        assert!((camera.n().norm() - 1.0).abs() < 1e-5);
        assert!(camera.u().dot(&camera.n()).abs() < 1e-5);
        assert!(camera.v().dot(&camera.n()).abs() < 1e-5);
        // 右向量保持水平
        assert!(camera.u().y.abs() < 1e-5);
    }

    #[test]
    fn test_view_puts_target_in_front() {
        let mut camera = ThirdPersonCamera::new(10.0);
        camera.update_eye(Vector3::zeros());
        let p = camera.view_matrix() * Vector4::new(0.0, 0.0, 0.0, 1.0);
        assert!(p.x.abs() < 1e-4);
        assert!(p.y.abs() < 1e-4);
        assert!((p.z - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_camera_data_carries_eye() {
        let mut camera = ThirdPersonCamera::new(4.0);
        camera.update_eye(Vector3::new(1.0, 0.0, 0.0));
        let data = camera.camera_data();
        let eye: [f32; 3] = camera.eye().into();
        assert_eq!(data.eye, eye);
        assert_eq!(data.view, gpu_matrix(camera.view_matrix()));
    }
}
