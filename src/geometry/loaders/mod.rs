/// 模型加载器模块
///
/// 提供统一的网格加载接口和具体格式的实现。
///
/// # 支持的格式
///
/// - **binary**: 资源导出工具生成的二进制网格（文本数量 + 原始顶点/索引字节）
///
/// # 使用示例
///
/// ```rust,no_run
/// use terrain_scene::geometry::loaders::{load_mesh, MeshLayout};
/// use terrain_scene::geometry::vertex::Vertex;
/// use std::path::Path;
///
/// let mesh = load_mesh::<Vertex>(Path::new("SkyboxMesh.binary"), MeshLayout::default())?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
use crate::core::error::{MeshLoadError, Result};
use crate::geometry::mesh::{MeshData, Topology};
use bytemuck::Pod;
use std::path::Path;

pub mod binary_loader;

// 重新导出加载器
pub use binary_loader::BinaryMeshLoader;

/// 文件本身不记录的布局信息，由调用方给出
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MeshLayout {
    /// 图元拓扑
    pub topology: Topology,
    /// 顶点数据之后是否跟随索引段
    pub indexed: bool,
}

/// 网格加载器 trait
///
/// 定义统一的加载接口，所有格式的加载器都实现此 trait。
///
/// # 实现要求
///
/// - 加载器应该是无状态的（使用关联函数）
/// - 返回 CPU 侧的 `MeshData`，不涉及 GPU 资源
/// - 格式错误时返回 `MeshLoadError`，不允许 panic
pub trait MeshLoader {
    /// 从文件路径加载网格
    ///
    /// # 错误
    ///
    /// - 文件不存在或无法读取
    /// - 数量与数据长度不匹配
    /// - 索引越界
    fn load_from_file<V: Pod>(path: &Path, layout: MeshLayout) -> Result<MeshData<V>>;

    /// 从内存数据加载网格
    fn load_from_memory<V: Pod>(data: &[u8], layout: MeshLayout) -> Result<MeshData<V>>;

    /// 获取支持的文件扩展名列表（小写，不含点号）
    fn supported_extensions() -> &'static [&'static str];
}

/// 根据文件扩展名选择合适的加载器
pub fn load_mesh<V: Pod>(path: &Path, layout: MeshLayout) -> Result<MeshData<V>> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .ok_or_else(|| MeshLoadError::UnsupportedFormat("missing file extension".to_string()))?;

    if BinaryMeshLoader::supported_extensions().contains(&extension.as_str()) {
        BinaryMeshLoader::load_from_file(path, layout)
    } else {
        Err(MeshLoadError::UnsupportedFormat(format!("unsupported mesh format: .{}", extension)).into())
    }
}
