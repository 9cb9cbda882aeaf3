/// 几何体模块
///
/// 顶点布局、CPU 侧网格容器、内置网格以及二进制网格文件的读写。
///
/// # 模块结构
///
/// - `vertex`: 与着色器输入布局一致的顶点结构
/// - `mesh`: 网格数据和图元拓扑
/// - `primitives`: 立方体、天空盒、公告板等内置网格
/// - `loaders`: 网格文件加载器
///
/// # 数据流
///
/// ```text
/// 文件 (.binary) / 内置网格 / 地形生成
///     ↓
/// MeshData<V> (CPU侧数据)
///     ↓
/// FramePacket / 上传缓冲区
/// ```

pub mod vertex;
pub mod mesh;
pub mod primitives;
pub mod loaders;

// 重新导出常用类型
pub use vertex::{ColorVertex, DetailVertex, TerrainVertex, TextureVertex, Vertex};
pub use mesh::{MeshData, Topology};
