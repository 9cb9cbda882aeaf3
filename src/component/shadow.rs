//! 方向光阴影
//!
//! 光源相机放在场景包围球外 2r 处，沿光照方向看向球心；
//! 正交投影在光源空间中恰好框住整个包围球。

use bytemuck::{Pod, Zeroable};

use crate::core::config::ShadowConfig;
use crate::math::geometry::{transform_coord, BoundingSphere};
use crate::math::matrix::{gpu_matrix, look_at_lh, orthographic_off_center_lh};
use crate::math::{Matrix4, Vector3};

/// 阴影常量缓冲区数据
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ShadowData {
    pub light_view: [[f32; 4]; 4],
    pub light_projection: [[f32; 4]; 4],
}

/// 光源空间的观察与投影矩阵
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowTransform {
    pub view: Matrix4,
    pub projection: Matrix4,
}

impl ShadowTransform {
    /// 世界空间到阴影贴图裁剪空间
    pub fn view_projection(&self) -> Matrix4 {
        self.projection * self.view
    }

    pub fn shadow_data(&self) -> ShadowData {
        ShadowData {
            light_view: gpu_matrix(&self.view),
            light_projection: gpu_matrix(&self.projection),
        }
    }
}

/// 按方向光和场景包围球拟合阴影视锥
pub fn fit_shadow(direction: &Vector3, sphere: &BoundingSphere) -> ShadowTransform {
    let radius = sphere.radius;
    let light_position = direction * (-2.0 * radius);

    // 光线竖直时 +Y 与观察方向平行，改用 +Z 作为上方向
    let up = if direction.cross(&Vector3::y()).norm_squared() < 1e-8 {
        Vector3::z()
    } else {
        Vector3::y()
    };
    let view = look_at_lh(&light_position, &sphere.center, &up);

    let center = transform_coord(&sphere.center, &view);
    let projection = orthographic_off_center_lh(
        center.x - radius,
        center.x + radius,
        center.y - radius,
        center.y + radius,
        center.z - radius,
        center.z + radius,
    );

    ShadowTransform { view, projection }
}

/// 视口
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub top_left_x: f32,
    pub top_left_y: f32,
    pub width: f32,
    pub height: f32,
    pub min_depth: f32,
    pub max_depth: f32,
}

/// 裁剪矩形
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScissorRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

/// 阴影贴图描述
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowMap {
    width: u32,
    height: u32,
    viewport: Viewport,
    scissor_rect: ScissorRect,
}

impl ShadowMap {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            viewport: Viewport {
                top_left_x: 0.0,
                top_left_y: 0.0,
                width: width as f32,
                height: height as f32,
                min_depth: 0.0,
                max_depth: 1.0,
            },
            scissor_rect: ScissorRect {
                left: 0,
                top: 0,
                right: width as i32,
                bottom: height as i32,
            },
        }
    }

    pub fn from_config(config: &ShadowConfig) -> Self {
        Self::new(config.width, config.height)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn scissor_rect(&self) -> &ScissorRect {
        &self.scissor_rect
    }
}

impl Default for ShadowMap {
    fn default() -> Self {
        Self::new(1024, 1024)
    }
}
