//! 面部 blend shape 名称映射
//!
//! 对照表的每一行记录同一个表情/口型在三种方言下的名称，
//! 空字符串表示该方言没有对应形状。

mod cache;
mod expand;
mod mapper;
mod tables;

pub use cache::MappingCache;
pub use expand::multi_shape_names;
pub use mapper::{translate, FacialProfileMapper};
pub use tables::{
    find_correction, find_incorrection, integrity_issues, table_integrity_issues, validate_tables,
    EXPRESSION_MAPPINGS, MAPPING_CORRECTIONS, VISEME_MAPPINGS,
};

use crate::profile::{ExpressionProfile, VisemeProfile};

/// 表情对照行
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExpressionMapping {
    pub standard: &'static str,
    pub extended_plus: &'static str,
    pub extended: &'static str,
}

impl ExpressionMapping {
    pub const fn new(standard: &'static str, extended_plus: &'static str, extended: &'static str) -> Self {
        Self {
            standard,
            extended_plus,
            extended,
        }
    }

    /// 指定方言列是否为该名称
    pub fn has_mapping(&self, name: &str, from: ExpressionProfile) -> bool {
        if name.is_empty() {
            return false;
        }
        self.column(from) == Some(name)
    }

    /// 取目标方言下的名称，无对应形状时返回 None
    pub fn get_mapping(&self, to: ExpressionProfile) -> Option<&'static str> {
        self.column(to).filter(|s| !s.is_empty())
    }

    fn column(&self, profile: ExpressionProfile) -> Option<&'static str> {
        match profile {
            ExpressionProfile::None => None,
            ExpressionProfile::Standard => Some(self.standard),
            ExpressionProfile::ExtendedPlus => Some(self.extended_plus),
            ExpressionProfile::Extended => Some(self.extended),
        }
    }
}

/// 口型对照行
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VisemeMapping {
    pub pairs_v1: &'static str,
    pub pairs_v2: &'static str,
    pub direct: &'static str,
}

impl VisemeMapping {
    pub const fn new(pairs_v1: &'static str, pairs_v2: &'static str, direct: &'static str) -> Self {
        Self {
            pairs_v1,
            pairs_v2,
            direct,
        }
    }

    /// 指定方言列是否为该名称
    pub fn has_mapping(&self, name: &str, from: VisemeProfile) -> bool {
        if name.is_empty() {
            return false;
        }
        self.column(from) == Some(name)
    }

    /// 取目标方言下的名称，无对应形状时返回 None
    pub fn get_mapping(&self, to: VisemeProfile) -> Option<&'static str> {
        self.column(to).filter(|s| !s.is_empty())
    }

    fn column(&self, profile: VisemeProfile) -> Option<&'static str> {
        match profile {
            VisemeProfile::None => None,
            VisemeProfile::PairsV1 => Some(self.pairs_v1),
            VisemeProfile::PairsV2 => Some(self.pairs_v2),
            VisemeProfile::Direct => Some(self.direct),
        }
    }
}

/// 命名缺陷修正：某导出管线把 `correct` 错误地输出为 `incorrect`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MappingCorrection {
    pub correct: &'static str,
    pub incorrect: &'static str,
}

impl MappingCorrection {
    pub const fn new(correct: &'static str, incorrect: &'static str) -> Self {
        Self { correct, incorrect }
    }
}
