/// 顶点布局定义模块
///
/// 每种顶点结构都与对应着色器的输入布局逐字节一致，
/// 使用 `#[repr(C)]` 保证字段顺序，派生 `Pod` 以便直接写入二进制网格文件和上传缓冲区。
///
/// | 结构 | 用途 | 大小 |
/// |------|------|------|
/// | `Vertex` | 天空盒 | 12 |
/// | `TextureVertex` | 立方体、草地公告板 | 20 |
/// | `ColorVertex` | 带索引的彩色立方体 | 28 |
/// | `DetailVertex` | 三角形地形（细节纹理） | 28 |
/// | `TerrainVertex` | 曲面细分地形控制点 | 32 |

use bytemuck::{Pod, Zeroable};

/// 仅包含位置的顶点
#[repr(C)]
#[derive(Default, Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
}

/// 位置 + 纹理坐标
#[repr(C)]
#[derive(Default, Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct TextureVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

/// 位置 + RGBA 颜色
#[repr(C)]
#[derive(Default, Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct ColorVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

/// 三角形地形顶点
///
/// - `uv0`: 整张地形的纹理坐标
/// - `uv1`: 单个网格单元内的细节纹理坐标
#[repr(C)]
#[derive(Default, Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct DetailVertex {
    pub position: [f32; 3],
    pub uv0: [f32; 2],
    pub uv1: [f32; 2],
}

/// 曲面细分地形的控制点
///
/// `density` 是控制点与周围 8 个采样点的最大高度差，
/// 外壳着色器据此选择细分因子。
#[repr(C)]
#[derive(Default, Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct TerrainVertex {
    pub position: [f32; 3],
    pub uv0: [f32; 2],
    pub uv1: [f32; 2],
    pub density: u32,
}

impl Vertex {
    #[inline]
    pub fn new(position: [f32; 3]) -> Self {
        Self { position }
    }
}

impl TextureVertex {
    #[inline]
    pub fn new(position: [f32; 3], uv: [f32; 2]) -> Self {
        Self { position, uv }
    }
}

impl ColorVertex {
    #[inline]
    pub fn new(position: [f32; 3], color: [f32; 4]) -> Self {
        Self { position, color }
    }
}

impl DetailVertex {
    #[inline]
    pub fn new(position: [f32; 3], uv0: [f32; 2], uv1: [f32; 2]) -> Self {
        Self { position, uv0, uv1 }
    }
}

impl TerrainVertex {
    #[inline]
    pub fn new(position: [f32; 3], uv0: [f32; 2], uv1: [f32; 2], density: u32) -> Self {
        Self {
            position,
            uv0,
            uv1,
            density,
        }
    }
}
