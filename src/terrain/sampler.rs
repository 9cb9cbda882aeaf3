//! 地形高度查询
//!
//! 两种查询方式共享同一个高度网格：
//! - `Bezier`：与曲面细分地形一致
//! - `Linear`：与逐格三角形地形一致，每个网格单元沿对角线切成两个三角形

use std::sync::Arc;

use super::bezier::bezier_height;
use super::height_grid::HeightGrid;
use crate::core::config::SamplerKind;
use crate::math::utils::lerp;

/// 在所在三角形内线性插值的高度
///
/// 超出 [-N/2, N/2)、不是有限数，或右/下邻居越界时返回 0。
pub fn linear_height(grid: &HeightGrid, x: f32, z: f32) -> f32 {
    let Some((fx, fz)) = grid.to_grid(x, z) else {
        return 0.0;
    };

    let nx = fx as usize;
    let nz = fz as usize;
    if nx + 1 >= grid.length() || nz + 1 >= grid.length() {
        return 0.0;
    }

    let px = fx - fx.floor();
    let pz = fz - fz.floor();

    if px >= pz {
        lerp(
            lerp(grid.at(nx, nz), grid.at(nx + 1, nz), px),
            grid.at(nx + 1, nz + 1),
            pz,
        )
    } else {
        lerp(
            lerp(grid.at(nx, nz), grid.at(nx, nz + 1), pz),
            grid.at(nx + 1, nz + 1),
            px,
        )
    }
}

/// 绑定了查询方式的高度网格
#[derive(Debug, Clone)]
pub struct HeightSampler {
    grid: Arc<HeightGrid>,
    kind: SamplerKind,
}

impl HeightSampler {
    pub fn new(grid: Arc<HeightGrid>, kind: SamplerKind) -> Self {
        Self { grid, kind }
    }

    /// 以地形原点为中心的局部坐标 (x, z) 处的高度
    pub fn height(&self, x: f32, z: f32) -> f32 {
        match self.kind {
            SamplerKind::Bezier => bezier_height(&self.grid, x, z),
            SamplerKind::Linear => linear_height(&self.grid, x, z),
        }
    }

    pub fn kind(&self) -> SamplerKind {
        self.kind
    }

    pub fn grid(&self) -> &Arc<HeightGrid> {
        &self.grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> HeightGrid {
        // h[z][x] = x + 10z
        let heights = (0..81).map(|i| (i % 9) as f32 + 10.0 * (i / 9) as f32).collect();
        HeightGrid::from_heights(9, heights).unwrap()
    }

    #[test]
    fn test_linear_at_sample_points() {
        let grid = grid();
        assert_eq!(linear_height(&grid, -4.0, -4.0), 0.0);
        assert_eq!(linear_height(&grid, 0.0, 0.0), 44.0);
    }

    #[test]
    fn test_linear_triangles() {
        let grid = HeightGrid::from_heights(
            5,
            vec![
                0.0, 4.0, 0.0, 0.0, 0.0, //
                8.0, 12.0, 0.0, 0.0, 0.0, //
                0.0, 0.0, 0.0, 0.0, 0.0, //
                0.0, 0.0, 0.0, 0.0, 0.0, //
                0.0, 0.0, 0.0, 0.0, 0.0,
            ],
        )
        .unwrap();
        // 网格坐标 (0.75, 0.25)：px >= pz，lerp(lerp(0, 4, .75), 12, .25) = 5.25
        assert!((linear_height(&grid, -1.25, -1.75) - 5.25).abs() < 1e-5);
        // 网格坐标 (0.25, 0.75)：px < pz，lerp(lerp(0, 8, .75), 12, .25) = 7.5
        assert!((linear_height(&grid, -1.75, -1.25) - 7.5).abs() < 1e-5);
    }

    #[test]
    fn test_linear_out_of_range_is_zero() {
        let grid = grid();
        assert_eq!(linear_height(&grid, 4.0, 0.0), 0.0);
        assert_eq!(linear_height(&grid, 0.0, f32::NEG_INFINITY), 0.0);
    }

    #[test]
    fn test_sampler_dispatch() {
        let grid = Arc::new(grid());
        let bezier = HeightSampler::new(grid.clone(), SamplerKind::Bezier);
        let linear = HeightSampler::new(grid, SamplerKind::Linear);
        // 线性斜坡上两种方式结果相同
        assert!((bezier.height(-2.0, 1.0) - linear.height(-2.0, 1.0)).abs() < 1e-4);
        assert_eq!(linear.kind(), SamplerKind::Linear);
    }
}
