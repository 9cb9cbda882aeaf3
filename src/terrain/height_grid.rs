//! 高度图
//!
//! 高度图文件每个字节是一个采样，按行存储，文件大小必须是完全平方数。
//! 加载后网格不再改变，可以通过 `Arc` 在多个线程间共享只读查询。

use std::path::Path;

use crate::core::error::{Result, TerrainError};

/// 一个 Bezier 面片跨越的采样间隔
pub const PATCH_STRIDE: usize = 4;

/// 一个面片每条边的控制点数
pub const PATCH_SIZE: usize = PATCH_STRIDE + 1;

/// 方形高度网格
#[derive(Debug, Clone, PartialEq)]
pub struct HeightGrid {
    length: usize,
    heights: Vec<f32>,
}

impl HeightGrid {
    /// 从高度图文件加载
    ///
    /// 每个字节除以 `divisor`；`divisor = 1.0` 得到原始字节高度。
    pub fn load<P: AsRef<Path>>(path: P, divisor: f32) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(TerrainError::FileNotFound(path.to_path_buf()).into());
        }

        let bytes = std::fs::read(path).map_err(|source| TerrainError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let grid = Self::from_bytes(&bytes, divisor)?;
        crate::engine_info!(
            path = %path.display(),
            length = grid.length(),
            "Height map loaded"
        );
        Ok(grid)
    }

    /// 从原始字节构建
    pub fn from_bytes(bytes: &[u8], divisor: f32) -> Result<Self> {
        if !divisor.is_finite() || divisor <= 0.0 {
            return Err(TerrainError::InvalidDivisor(divisor).into());
        }

        let length = exact_sqrt(bytes.len()).ok_or(TerrainError::NotSquare { len: bytes.len() })?;
        let heights = bytes.iter().map(|&b| f32::from(b) / divisor).collect();
        Self::from_heights(length, heights)
    }

    /// 从已经缩放好的高度构建，`heights` 按行存储
    pub fn from_heights(length: usize, heights: Vec<f32>) -> Result<Self> {
        if length.checked_mul(length) != Some(heights.len()) {
            return Err(TerrainError::NotSquare { len: heights.len() }.into());
        }
        if length == 0 {
            return Err(TerrainError::Empty.into());
        }
        Ok(Self { length, heights })
    }

    /// 网格边长 N
    #[inline]
    pub fn length(&self) -> usize {
        self.length
    }

    /// 世界坐标到网格坐标的偏移量（整数 N/2）
    #[inline]
    pub fn half(&self) -> usize {
        self.length / 2
    }

    /// 第 `z` 行第 `x` 列的采样，越界时返回 `None`
    #[inline]
    pub fn get(&self, x: usize, z: usize) -> Option<f32> {
        if x < self.length && z < self.length {
            Some(self.heights[z * self.length + x])
        } else {
            None
        }
    }

    /// 不检查边界的采样；调用方保证坐标有效
    #[inline]
    pub(crate) fn at(&self, x: usize, z: usize) -> f32 {
        self.heights[z * self.length + x]
    }

    /// 所有采样，按行存储
    pub fn heights(&self) -> &[f32] {
        &self.heights
    }

    /// 把世界坐标 (x, z) 转成网格坐标
    ///
    /// 超出 [-N/2, N/2) 或不是有限数时返回 `None`。
    pub(crate) fn to_grid(&self, x: f32, z: f32) -> Option<(f32, f32)> {
        if !x.is_finite() || !z.is_finite() {
            return None;
        }
        let half = self.half() as f32;
        if x < -half || x >= half || z < -half || z >= half {
            return None;
        }
        Some((x + half, z + half))
    }
}

fn exact_sqrt(n: usize) -> Option<usize> {
    let root = (n as f64).sqrt().round() as usize;
    // 浮点开方可能偏差 1，在附近找整数根
    (root.saturating_sub(1)..=root + 1).find(|r| r.checked_mul(*r) == Some(n))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::TerrainSceneError;

    #[test]
    fn test_dimension_from_file_size() {
        let grid = HeightGrid::from_bytes(&[0u8; 9 * 9], 1.0).unwrap();
        assert_eq!(grid.length(), 9);
        assert_eq!(grid.half(), 4);
    }

    #[test]
    fn test_samples_are_scaled() {
        let mut bytes = vec![0u8; 25];
        bytes[5 + 2] = 30;
        let grid = HeightGrid::from_bytes(&bytes, 3.0).unwrap();
        assert_eq!(grid.get(2, 1), Some(10.0));
        assert_eq!(grid.get(5, 0), None);
    }

    #[test]
    fn test_non_square_is_rejected() {
        let err = HeightGrid::from_bytes(&[0u8; 26], 1.0).unwrap_err();
        assert!(matches!(
            err,
            TerrainSceneError::Terrain(TerrainError::NotSquare { len: 26 })
        ));
    }

    #[test]
    fn test_grids_smaller_than_a_patch_load() {
        for l in 1..=4 {
            let grid = HeightGrid::from_bytes(&vec![9u8; l * l], 1.0).unwrap();
            assert_eq!(grid.length(), l);
            assert_eq!(grid.heights().len(), l * l);
        }
    }

    #[test]
    fn test_empty_file_is_rejected() {
        assert!(matches!(
            HeightGrid::from_bytes(&[], 1.0).unwrap_err(),
            TerrainSceneError::Terrain(TerrainError::Empty)
        ));
        assert!(matches!(
            HeightGrid::from_heights(0, Vec::new()).unwrap_err(),
            TerrainSceneError::Terrain(TerrainError::Empty)
        ));
    }

    #[test]
    fn test_small_grid_queries_return_zero() {
        use crate::terrain::bezier::bezier_height;
        use crate::terrain::mesh::{detail_mesh, patch_mesh};

        let grid = HeightGrid::from_bytes(&[9u8; 16], 1.0).unwrap();
        for &(x, z) in &[(0.0, 0.0), (-2.0, -2.0), (1.5, -1.0), (-0.5, 1.9)] {
            assert_eq!(bezier_height(&grid, x, z), 0.0);
        }
        assert!(patch_mesh(&grid).vertices.is_empty());
        assert_eq!(detail_mesh(&grid).vertices.len(), 3 * 3 * 6);

        let single = HeightGrid::from_bytes(&[9u8], 1.0).unwrap();
        assert_eq!(bezier_height(&single, 0.0, 0.0), 0.0);
        assert!(patch_mesh(&single).vertices.is_empty());
        assert!(detail_mesh(&single).vertices.is_empty());
    }

    #[test]
    fn test_invalid_divisor() {
        assert!(HeightGrid::from_bytes(&[0u8; 25], 0.0).is_err());
        assert!(HeightGrid::from_bytes(&[0u8; 25], f32::NAN).is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = HeightGrid::load("definitely/not/here.raw", 3.0).unwrap_err();
        assert!(matches!(err, TerrainSceneError::Terrain(TerrainError::FileNotFound(_))));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join("terrain_scene_height_grid_test.raw");
        std::fs::write(&path, vec![3u8; 17 * 17]).unwrap();
        let grid = HeightGrid::load(&path, 3.0).unwrap();
        assert_eq!(grid.length(), 17);
        assert!(grid.heights().iter().all(|&h| h == 1.0));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_grid_range_is_half_open() {
        let grid = HeightGrid::from_bytes(&[0u8; 9 * 9], 1.0).unwrap();
        assert_eq!(grid.to_grid(-4.0, 0.0), Some((0.0, 4.0)));
        assert_eq!(grid.to_grid(4.0, 0.0), None);
        assert_eq!(grid.to_grid(0.0, -4.5), None);
        assert_eq!(grid.to_grid(f32::INFINITY, 0.0), None);
    }

    #[test]
    fn test_grid_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HeightGrid>();
    }
}
