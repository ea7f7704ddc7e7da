//! 角色层级与 blend shape 数据
//!
//! 网格只保存形状名称，权重保存在渲染器上，多个渲染器可以共享同一网格。

mod applier;

pub use applier::{
    get_character_blend_shape_weight, reset_character_blend_shapes, set_character_blend_shape,
    BlendShapeWeight,
};

use std::collections::HashMap;
use std::sync::Arc;

/// 带 blend shape 的网格
#[derive(Clone, Debug, Default)]
pub struct BlendShapeMesh {
    pub name: String,
    shape_names: Vec<String>,
    name_to_index: HashMap<String, usize>,
}

impl BlendShapeMesh {
    pub fn new<I, S>(name: impl Into<String>, shape_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut mesh = Self {
            name: name.into(),
            shape_names: Vec::new(),
            name_to_index: HashMap::new(),
        };
        for shape in shape_names {
            mesh.add_blend_shape(shape);
        }
        mesh
    }

    /// 添加形状，重名时查找总是返回第一个
    pub fn add_blend_shape(&mut self, name: impl Into<String>) -> usize {
        let name = name.into();
        let index = self.shape_names.len();
        self.name_to_index.entry(name.clone()).or_insert(index);
        self.shape_names.push(name);
        index
    }

    /// 通过名称查找形状
    pub fn find_blend_shape_by_name(&self, name: &str) -> Option<usize> {
        self.name_to_index.get(name).copied()
    }

    /// 获取形状数量
    pub fn blend_shape_count(&self) -> usize {
        self.shape_names.len()
    }

    pub fn shape_names(&self) -> impl Iterator<Item = &str> {
        self.shape_names.iter().map(String::as_str)
    }
}

/// 蒙皮网格渲染器，持有每个形状的当前权重
#[derive(Clone, Debug, Default)]
pub struct SkinnedMeshRenderer {
    mesh: Option<Arc<BlendShapeMesh>>,
    weights: Vec<f32>,
}

impl SkinnedMeshRenderer {
    pub fn new(mesh: BlendShapeMesh) -> Self {
        Self::with_shared_mesh(Arc::new(mesh))
    }

    /// 共享网格
    pub fn with_shared_mesh(mesh: Arc<BlendShapeMesh>) -> Self {
        let weights = vec![0.0; mesh.blend_shape_count()];
        Self {
            mesh: Some(mesh),
            weights,
        }
    }

    pub fn mesh(&self) -> Option<&BlendShapeMesh> {
        self.mesh.as_deref()
    }

    /// 网格存在且至少有一个形状
    pub fn has_blend_shapes(&self) -> bool {
        self.mesh().map_or(false, |m| m.blend_shape_count() > 0)
    }

    pub fn blend_shape_index(&self, name: &str) -> Option<usize> {
        self.mesh()?.find_blend_shape_by_name(name)
    }

    /// 获取权重
    pub fn get_blend_shape_weight(&self, index: usize) -> Option<f32> {
        self.weights.get(index).copied()
    }

    /// 设置权重
    pub fn set_blend_shape_weight(&mut self, index: usize, weight: f32) {
        if let Some(w) = self.weights.get_mut(index) {
            *w = weight;
        }
    }

    /// 重置所有权重
    pub fn reset_weights(&mut self) {
        self.weights.iter_mut().for_each(|w| *w = 0.0);
    }
}

/// 角色层级节点
#[derive(Clone, Debug, Default)]
pub struct CharacterNode {
    pub name: String,
    pub renderer: Option<SkinnedMeshRenderer>,
    pub children: Vec<CharacterNode>,
}

impl CharacterNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            renderer: None,
            children: Vec::new(),
        }
    }

    pub fn with_renderer(mut self, renderer: SkinnedMeshRenderer) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// 添加子节点，返回其索引
    pub fn add_child(&mut self, child: CharacterNode) -> usize {
        self.children.push(child);
        self.children.len() - 1
    }

    /// 深度优先收集自身及所有后代的渲染器
    pub fn renderers(&self) -> Vec<&SkinnedMeshRenderer> {
        let mut result = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if let Some(renderer) = &node.renderer {
                result.push(renderer);
            }
            stack.extend(node.children.iter().rev());
        }
        result
    }
}
