/// 网格数据结构模块
///
/// 定义CPU侧的网格数据容器，用于存储从文件加载或程序生成的几何数据。
/// 顶点类型是泛型参数，同一个容器可以装天空盒、立方体或地形控制点。

use crate::core::error::{MeshLoadError, Result};

/// 图元拓扑
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Topology {
    /// 三角形列表
    #[default]
    TriangleList,
    /// 点列表（公告板由几何着色器展开）
    PointList,
    /// 25 个控制点的面片列表（曲面细分地形）
    PatchList25,
}

impl Topology {
    /// 每个图元的顶点数
    pub fn vertices_per_primitive(self) -> usize {
        match self {
            Topology::TriangleList => 3,
            Topology::PointList => 1,
            Topology::PatchList25 => 25,
        }
    }
}

/// CPU侧网格数据
///
/// # 示例
///
/// ```rust
/// use terrain_scene::geometry::mesh::{MeshData, Topology};
/// use terrain_scene::geometry::vertex::Vertex;
///
/// let mesh = MeshData::new(
///     vec![
///         Vertex::new([0.0, 0.0, 0.0]),
///         Vertex::new([1.0, 0.0, 0.0]),
///         Vertex::new([0.0, 0.0, 1.0]),
///     ],
///     Topology::TriangleList,
/// );
/// assert_eq!(mesh.primitive_count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData<V> {
    /// 顶点数组
    pub vertices: Vec<V>,

    /// 索引数组；为空表示非索引绘制
    pub indices: Vec<u32>,

    /// 图元拓扑
    pub topology: Topology,

    /// 网格名称（可选），用于调试和日志
    pub name: Option<String>,
}

impl<V> MeshData<V> {
    /// 创建非索引网格
    pub fn new(vertices: Vec<V>, topology: Topology) -> Self {
        Self {
            vertices,
            indices: Vec::new(),
            topology,
            name: None,
        }
    }

    /// 创建索引网格
    pub fn indexed(vertices: Vec<V>, indices: Vec<u32>, topology: Topology) -> Self {
        Self {
            vertices,
            indices,
            topology,
            name: None,
        }
    }

    /// 设置网格名称
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// 获取顶点数量
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// 获取索引数量
    #[inline]
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    #[inline]
    pub fn is_indexed(&self) -> bool {
        !self.indices.is_empty()
    }

    /// 绘制的图元数量
    pub fn primitive_count(&self) -> usize {
        let count = if self.is_indexed() {
            self.index_count()
        } else {
            self.vertex_count()
        };
        count / self.topology.vertices_per_primitive()
    }

    /// 验证网格数据的有效性
    ///
    /// 检查：
    /// - 绘制用的元素数量是拓扑图元大小的整数倍
    /// - 所有索引都在有效范围内
    pub fn validate(&self) -> Result<()> {
        let per_primitive = self.topology.vertices_per_primitive();
        let count = if self.is_indexed() {
            self.index_count()
        } else {
            self.vertex_count()
        };

        if count % per_primitive != 0 {
            return Err(MeshLoadError::ValidationError(format!(
                "{} elements do not form whole {:?} primitives",
                count, self.topology
            ))
            .into());
        }

        let vertex_count = self.vertices.len() as u64;
        if let Some((i, &index)) = self
            .indices
            .iter()
            .enumerate()
            .find(|(_, index)| u64::from(**index) >= vertex_count)
        {
            return Err(MeshLoadError::ValidationError(format!(
                "index {} at position {} is out of range (vertex count {})",
                index, i, vertex_count
            ))
            .into());
        }

        Ok(())
    }
}
