//! 四次 Bezier 面片求值
//!
//! 与域着色器使用同一组公式，CPU 上的高度查询（草地摆放、玩家贴地）
//! 因此和屏幕上细分后的地表一致。

use super::height_grid::{HeightGrid, PATCH_SIZE, PATCH_STRIDE};

/// 四次 Bernstein 基函数 B_k(t) = C(4,k) t^k (1-t)^(4-k)
#[inline]
pub fn bernstein_basis(t: f32) -> [f32; PATCH_SIZE] {
    let inv = 1.0 - t;
    [
        inv * inv * inv * inv,
        4.0 * t * inv * inv * inv,
        6.0 * t * t * inv * inv,
        4.0 * t * t * t * inv,
        t * t * t * t,
    ]
}

/// 以 (sx, sz) 为原点的 5x5 控制点按基函数加权求和
///
/// 调用方保证 `sx + 4` 和 `sz + 4` 都在网格内。
pub fn patch_sum(
    grid: &HeightGrid,
    sx: usize,
    sz: usize,
    basis_u: &[f32; PATCH_SIZE],
    basis_v: &[f32; PATCH_SIZE],
) -> f32 {
    basis_v
        .iter()
        .enumerate()
        .map(|(row, bv)| {
            let row_sum: f32 = basis_u
                .iter()
                .enumerate()
                .map(|(col, bu)| bu * grid.at(sx + col, sz + row))
                .sum();
            bv * row_sum
        })
        .sum()
}

/// 世界坐标 (x, z) 处的 Bezier 曲面高度
///
/// 超出 [-N/2, N/2)、不是有限数，或所在面片会越过最后一行/列时返回 0。
pub fn bezier_height(grid: &HeightGrid, x: f32, z: f32) -> f32 {
    let Some((fx, fz)) = grid.to_grid(x, z) else {
        return 0.0;
    };

    let nx = fx as usize;
    let nz = fz as usize;
    let sx = nx - nx % PATCH_STRIDE;
    let sz = nz - nz % PATCH_STRIDE;

    if sx + PATCH_STRIDE >= grid.length() || sz + PATCH_STRIDE >= grid.length() {
        return 0.0;
    }

    let u = (fx - sx as f32) / PATCH_STRIDE as f32;
    let v = (fz - sz as f32) / PATCH_STRIDE as f32;

    patch_sum(grid, sx, sz, &bernstein_basis(u), &bernstein_basis(v))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 9x9 网格，h[z][x] = x + 10z
    fn ramp() -> HeightGrid {
        let heights = (0..81).map(|i| (i % 9) as f32 + 10.0 * (i / 9) as f32).collect();
        HeightGrid::from_heights(9, heights).unwrap()
    }

    #[test]
    fn test_basis_partition_of_unity() {
        for i in 0..=20 {
            let t = i as f32 / 20.0;
            let sum: f32 = bernstein_basis(t).iter().sum();
            assert!((sum - 1.0).abs() < 1e-6, "t = {}", t);
        }
    }

    #[test]
    fn test_basis_endpoints() {
        assert_eq!(bernstein_basis(0.0), [1.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(bernstein_basis(1.0), [0.0, 0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_patch_origin_returns_sample() {
        let grid = ramp();
        // 网格坐标 (4, 4) 是第二个面片的原点
        assert_eq!(bezier_height(&grid, 0.0, 0.0), grid.get(4, 4).unwrap());
        assert_eq!(bezier_height(&grid, -4.0, -4.0), grid.get(0, 0).unwrap());
    }

    #[test]
    fn test_flat_patch_is_constant() {
        let grid = HeightGrid::from_heights(9, vec![7.5; 81]).unwrap();
        // 面片中心 u = v = 0.5
        assert!((bezier_height(&grid, -2.0, -2.0) - 7.5).abs() < 1e-5);
        assert!((bezier_height(&grid, 1.3, 2.9) - 7.5).abs() < 1e-5);
    }

    #[test]
    fn test_linear_ramp_is_reproduced() {
        // 线性控制点的 Bezier 曲面仍是同一个线性函数
        let grid = ramp();
        let h = bezier_height(&grid, -2.0, 1.0);
        let (gx, gz) = (2.0, 5.0);
        assert!((h - (gx + 10.0 * gz)).abs() < 1e-4);
    }

    #[test]
    fn test_out_of_range_is_zero() {
        let grid = ramp();
        assert_eq!(bezier_height(&grid, 4.0, 0.0), 0.0);
        assert_eq!(bezier_height(&grid, 0.0, -4.01), 0.0);
        assert_eq!(bezier_height(&grid, f32::NAN, 0.0), 0.0);
        assert_eq!(bezier_height(&grid, 100.0, 100.0), 0.0);
    }

    #[test]
    fn test_patch_past_last_row_is_zero() {
        // N = 8：网格坐标 [4, 8) 的面片需要第 8 列，已经越界
        let grid = HeightGrid::from_heights(8, vec![1.0; 64]).unwrap();
        assert_eq!(bezier_height(&grid, 1.0, -3.0), 0.0);
        assert!((bezier_height(&grid, -3.0, -3.0) - 1.0).abs() < 1e-5);
    }
}
