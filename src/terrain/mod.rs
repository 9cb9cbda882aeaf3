//! 地形模块
//!
//! 高度图加载、四次 Bezier 面片求值、三角形插值查询以及地形网格生成。
//! 这部分是纯数值代码，不依赖任何图形 API。
//!
//! # 模块结构
//!
//! - `height_grid`: 方形高度网格及其加载
//! - `bezier`: Bernstein 基函数和面片求值
//! - `sampler`: 按配置选择查询方式
//! - `mesh`: 面片控制点和细节三角形的生成

pub mod height_grid;
pub mod bezier;
pub mod sampler;
pub mod mesh;

use std::sync::Arc;

use crate::core::config::TerrainConfig;
use crate::core::error::Result;

pub use bezier::{bernstein_basis, bezier_height};
pub use height_grid::{HeightGrid, PATCH_SIZE, PATCH_STRIDE};
pub use sampler::{linear_height, HeightSampler};

/// 按 `[terrain]` 配置加载高度图并构建查询器
pub fn load_sampler(config: &TerrainConfig) -> Result<HeightSampler> {
    let grid = HeightGrid::load(&config.heightmap, config.height_divisor)?;
    Ok(HeightSampler::new(Arc::new(grid), config.sampler))
}
