//! Facial Profile Engine - 面部 blend shape 命名方言转换引擎
//!
//! 提供以下功能：
//! - 表情/口型方言对照表与命名缺陷修正表
//! - 动画剪辑、角色网格的 Profile 检测
//! - 带缓存的跨 Profile 名称转换与合并形状展开
//! - 角色运行时 blend shape 权重读写
//! - JNI 接口

pub mod config;
pub mod detect;
pub mod jni_bridge;
pub mod mapping;
pub mod profile;
pub mod rig;

pub use detect::{character_has_facial_blend_shapes, detect_character_profile, detect_clip_profile, detect_profile};
pub use mapping::{multi_shape_names, translate, FacialProfileMapper};
pub use profile::{ExpressionProfile, FacialProfile, VisemeProfile};
pub use rig::{
    get_character_blend_shape_weight, reset_character_blend_shapes, set_character_blend_shape,
    BlendShapeMesh, BlendShapeWeight, CharacterNode, SkinnedMeshRenderer,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FacialError {
    #[error("duplicate expression name {name:?} in {dialect:?} column")]
    DuplicateExpressionName {
        dialect: ExpressionProfile,
        name: String,
    },

    #[error("duplicate viseme name {name:?} in {dialect:?} column")]
    DuplicateVisemeName {
        dialect: VisemeProfile,
        name: String,
    },

    #[error("duplicate correction name {0:?}")]
    DuplicateCorrection(String),

    #[error("unknown character handle: {0}")]
    UnknownHandle(i64),

    #[error("JNI error: {0}")]
    Jni(#[from] jni::errors::Error),
}

pub type Result<T> = std::result::Result<T, FacialError>;
