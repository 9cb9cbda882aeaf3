//! 地形网格生成
//!
//! - `patch_mesh`：25 控制点面片列表，供外壳/域着色器细分
//! - `detail_mesh`：每个网格单元两个三角形，带整图和细节两套纹理坐标

use super::height_grid::{HeightGrid, PATCH_STRIDE};
use crate::geometry::mesh::{MeshData, Topology};
use crate::geometry::vertex::{DetailVertex, TerrainVertex};

/// 8 个相邻采样的偏移 (dx, dz)
const NEIGHBOURS: [(isize, isize); 8] = [
    (-1, 1),
    (0, 1),
    (1, 1),
    (-1, 0),
    (1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

/// 采样与其网格内邻居的最大高度差，截断为整数
pub fn density(grid: &HeightGrid, x: usize, z: usize) -> u32 {
    let center = grid.at(x, z);
    NEIGHBOURS
        .iter()
        .filter_map(|&(dx, dz)| {
            let tx = x.checked_add_signed(dx)?;
            let tz = z.checked_add_signed(dz)?;
            grid.get(tx, tz)
        })
        .map(|h| (center - h).abs() as u32)
        .max()
        .unwrap_or(0)
}

/// 生成曲面细分地形的控制点
///
/// 面片按行从远到近（z 递减）、按列从左到右排列；
/// 每个面片内部的 25 个控制点从第 pz 行向下到第 pz-4 行，每行 x 递增。
pub fn patch_mesh(grid: &HeightGrid) -> MeshData<TerrainVertex> {
    let length = grid.length();
    let half = grid.half() as f32;
    let patches = (length - 1) / PATCH_STRIDE;
    let uv_scale = (length - 1) as f32;
    let stride = PATCH_STRIDE as f32;

    let mut vertices = Vec::with_capacity(patches * patches * 25);
    for gz in (1..=patches).rev() {
        for gx in 0..patches {
            let pz = gz * PATCH_STRIDE;
            let px = gx * PATCH_STRIDE;
            for z in (pz - PATCH_STRIDE..=pz).rev() {
                for x in px..=px + PATCH_STRIDE {
                    let position = [x as f32 - half, grid.at(x, z), z as f32 - half];
                    let uv0 = [x as f32 / uv_scale, 1.0 - z as f32 / uv_scale];
                    let uv1 = [(x - px) as f32 / stride, (pz - z) as f32 / stride];
                    vertices.push(TerrainVertex::new(position, uv0, uv1, density(grid, x, z)));
                }
            }
        }
    }

    MeshData::new(vertices, Topology::PatchList25).with_name("TerrainPatches")
}

/// 生成每个网格单元两个三角形的地形
pub fn detail_mesh(grid: &HeightGrid) -> MeshData<DetailVertex> {
    let length = grid.length();
    let half = grid.half() as f32;
    let cell = 1.0 / length as f32;

    let mut vertices = Vec::with_capacity((length - 1) * (length - 1) * 6);
    for z in 0..length - 1 {
        for x in 0..length - 1 {
            let nx = x as f32 - half;
            let nz = z as f32 - half;
            let u = x as f32 * cell;
            let v = 1.0 - z as f32 * cell;

            let near_left = DetailVertex::new([nx, grid.at(x, z), nz], [u, v], [0.0, 1.0]);
            let far_left =
                DetailVertex::new([nx, grid.at(x, z + 1), nz + 1.0], [u, v - cell], [0.0, 0.0]);
            let far_right = DetailVertex::new(
                [nx + 1.0, grid.at(x + 1, z + 1), nz + 1.0],
                [u + cell, v - cell],
                [1.0, 0.0],
            );
            let near_right =
                DetailVertex::new([nx + 1.0, grid.at(x + 1, z), nz], [u + cell, v], [1.0, 1.0]);

            vertices.extend_from_slice(&[
                near_left, far_left, far_right, //
                near_left, far_right, near_right,
            ]);
        }
    }

    MeshData::new(vertices, Topology::TriangleList).with_name("TerrainDetail")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(length: usize) -> HeightGrid {
        let heights = (0..length * length)
            .map(|i| (i % length) as f32 + 10.0 * (i / length) as f32)
            .collect();
        HeightGrid::from_heights(length, heights).unwrap()
    }

    #[test]
    fn test_patch_mesh_layout() {
        let grid = ramp(9);
        let mesh = patch_mesh(&grid);
        assert_eq!(mesh.vertex_count(), 4 * 25);
        assert_eq!(mesh.primitive_count(), 4);
        assert!(mesh.validate().is_ok());

        // 第一个面片：pz = 8，px = 0，从第 8 行开始
        let first = mesh.vertices[0];
        assert_eq!(first.position, [-4.0, 80.0, 4.0]);
        assert_eq!(first.uv0, [0.0, 0.0]);
        assert_eq!(first.uv1, [0.0, 0.0]);

        // 第一个面片的最后一个控制点：x = 4，z = 4
        let last = mesh.vertices[24];
        assert_eq!(last.position, [0.0, 44.0, 0.0]);
        assert_eq!(last.uv0, [0.5, 0.5]);
        assert_eq!(last.uv1, [1.0, 1.0]);

        // 第二个面片从 px = 4 开始
        assert_eq!(mesh.vertices[25].position[0], 0.0);
    }

    #[test]
    fn test_density() {
        let grid = ramp(9);
        // 内部点的最大差值来自对角邻居：1 + 10
        assert_eq!(density(&grid, 4, 4), 11);
        // 角点只有 3 个邻居
        assert_eq!(density(&grid, 0, 0), 11);

        let flat = HeightGrid::from_heights(5, vec![2.0; 25]).unwrap();
        assert_eq!(density(&flat, 2, 2), 0);
    }

    #[test]
    fn test_detail_mesh_layout() {
        let grid = ramp(5);
        let mesh = detail_mesh(&grid);
        assert_eq!(mesh.vertex_count(), 4 * 4 * 6);
        assert_eq!(mesh.primitive_count(), 32);

        let cell = 1.0 / 5.0;
        let v = &mesh.vertices[..6];
        assert_eq!(v[0].position, [-2.0, 0.0, -2.0]);
        assert_eq!(v[1].position, [-2.0, 10.0, -1.0]);
        assert_eq!(v[2].position, [-1.0, 11.0, -1.0]);
        assert_eq!(v[5].position, [-1.0, 1.0, -2.0]);
        assert_eq!(v[0].uv0, [0.0, 1.0]);
        assert_eq!(v[2].uv0, [cell, 1.0 - cell]);
        assert_eq!(v[0].uv1, [0.0, 1.0]);
        assert_eq!(v[4].uv1, [1.0, 0.0]);
        assert_eq!(v[5].uv1, [1.0, 1.0]);
        assert_eq!(v[3], v[0]);
        assert_eq!(v[4], v[2]);
    }
}
