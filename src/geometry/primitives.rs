//! 内置网格
//!
//! 与资源导出工具生成的二进制网格内容相同：纹理立方体、带索引的彩色立方体、天空盒，
//! 以及草地使用的单点公告板。场景在网格文件缺失时使用这些网格。

use super::mesh::{MeshData, Topology};
use super::vertex::{ColorVertex, TextureVertex, Vertex};

const LEFT_DOWN_FRONT: [f32; 3] = [-1.0, -1.0, -1.0];
const LEFT_DOWN_BACK: [f32; 3] = [-1.0, -1.0, 1.0];
const LEFT_UP_FRONT: [f32; 3] = [-1.0, 1.0, -1.0];
const LEFT_UP_BACK: [f32; 3] = [-1.0, 1.0, 1.0];
const RIGHT_DOWN_FRONT: [f32; 3] = [1.0, -1.0, -1.0];
const RIGHT_DOWN_BACK: [f32; 3] = [1.0, -1.0, 1.0];
const RIGHT_UP_FRONT: [f32; 3] = [1.0, 1.0, -1.0];
const RIGHT_UP_BACK: [f32; 3] = [1.0, 1.0, 1.0];

/// 立方体的 36 个顶点位置与纹理坐标，按 前、上、后、下、左、右 排列
const CUBE_FACES: [([f32; 3], [f32; 2]); 36] = [
    // Front
    (LEFT_UP_FRONT, [0.0, 0.0]),
    (RIGHT_UP_FRONT, [1.0, 0.0]),
    (RIGHT_DOWN_FRONT, [1.0, 1.0]),
    (LEFT_UP_FRONT, [0.0, 0.0]),
    (RIGHT_DOWN_FRONT, [1.0, 1.0]),
    (LEFT_DOWN_FRONT, [0.0, 1.0]),
    // Up
    (LEFT_UP_BACK, [0.0, 0.0]),
    (RIGHT_UP_BACK, [1.0, 0.0]),
    (RIGHT_UP_FRONT, [1.0, 1.0]),
    (LEFT_UP_BACK, [0.0, 0.0]),
    (RIGHT_UP_FRONT, [1.0, 1.0]),
    (LEFT_UP_FRONT, [0.0, 1.0]),
    // Back
    (LEFT_DOWN_BACK, [1.0, 1.0]),
    (RIGHT_DOWN_BACK, [0.0, 1.0]),
    (RIGHT_UP_BACK, [0.0, 0.0]),
    (LEFT_DOWN_BACK, [1.0, 1.0]),
    (RIGHT_UP_BACK, [0.0, 0.0]),
    (LEFT_UP_BACK, [1.0, 0.0]),
    // Down
    (LEFT_DOWN_FRONT, [1.0, 1.0]),
    (RIGHT_DOWN_FRONT, [0.0, 1.0]),
    (RIGHT_DOWN_BACK, [0.0, 0.0]),
    (LEFT_DOWN_FRONT, [1.0, 1.0]),
    (RIGHT_DOWN_BACK, [0.0, 0.0]),
    (LEFT_DOWN_BACK, [1.0, 0.0]),
    // Left
    (LEFT_UP_BACK, [0.0, 0.0]),
    (LEFT_UP_FRONT, [1.0, 0.0]),
    (LEFT_DOWN_FRONT, [1.0, 1.0]),
    (LEFT_UP_BACK, [0.0, 0.0]),
    (LEFT_DOWN_FRONT, [1.0, 1.0]),
    (LEFT_DOWN_BACK, [0.0, 1.0]),
    // Right
    (RIGHT_UP_FRONT, [0.0, 0.0]),
    (RIGHT_UP_BACK, [1.0, 0.0]),
    (RIGHT_DOWN_BACK, [1.0, 1.0]),
    (RIGHT_UP_FRONT, [0.0, 0.0]),
    (RIGHT_DOWN_BACK, [1.0, 1.0]),
    (RIGHT_DOWN_FRONT, [0.0, 1.0]),
];

const CUBE_INDICES: [u32; 36] = [
    0, 1, 2, 0, 2, 3, // up
    3, 2, 6, 3, 6, 7, // front
    7, 6, 5, 7, 5, 4, // down
    1, 0, 4, 1, 4, 5, // back
    0, 3, 7, 0, 7, 4, // left
    2, 1, 5, 2, 5, 6, // right
];

/// 边长为 2 的纹理立方体，三角形列表
pub fn cube() -> MeshData<TextureVertex> {
    let vertices = CUBE_FACES
        .iter()
        .map(|&(position, uv)| TextureVertex::new(position, uv))
        .collect();
    MeshData::new(vertices, Topology::TriangleList).with_name("Cube")
}

/// 天空盒：与立方体相同的三角形，只保留位置
pub fn skybox() -> MeshData<Vertex> {
    let vertices = CUBE_FACES
        .iter()
        .map(|&(position, _)| Vertex::new(position))
        .collect();
    MeshData::new(vertices, Topology::TriangleList).with_name("Skybox")
}

/// 8 个彩色角点加 36 个索引的立方体
pub fn cube_indexed() -> MeshData<ColorVertex> {
    let vertices = vec![
        ColorVertex::new(LEFT_UP_BACK, [1.0, 1.0, 0.0, 1.0]),
        ColorVertex::new(RIGHT_UP_BACK, [0.0, 0.5, 0.5, 1.0]),
        ColorVertex::new(RIGHT_UP_FRONT, [0.5, 0.5, 0.0, 1.0]),
        ColorVertex::new(LEFT_UP_FRONT, [0.0, 0.0, 1.0, 1.0]),
        ColorVertex::new(LEFT_DOWN_BACK, [0.0, 1.0, 0.0, 1.0]),
        ColorVertex::new(RIGHT_DOWN_BACK, [0.0, 1.0, 1.0, 1.0]),
        ColorVertex::new(RIGHT_DOWN_FRONT, [1.0, 0.0, 1.0, 1.0]),
        ColorVertex::new(LEFT_DOWN_FRONT, [1.0, 0.0, 0.0, 1.0]),
    ];
    MeshData::indexed(vertices, CUBE_INDICES.to_vec(), Topology::TriangleList)
        .with_name("CubeIndexed")
}

/// 草地公告板：单个点，uv 为几何着色器展开的四边形宽高
pub fn billboard() -> MeshData<TextureVertex> {
    MeshData::new(
        vec![TextureVertex::new([0.0, 0.0, 0.0], [1.0, 1.0])],
        Topology::PointList,
    )
    .with_name("Billboard")
}
