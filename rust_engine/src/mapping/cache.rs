//! 映射缓存
//!
//! 每种源方言一张表：名称 -> 命中的对照行。只增不删，
//! 对照表在进程内不变，所以缓存永远不会失效。

use std::collections::HashMap;

use crate::profile::{ExpressionProfile, VisemeProfile};

use super::{ExpressionMapping, VisemeMapping};

type ExpressionCache = HashMap<String, &'static ExpressionMapping>;
type VisemeCache = HashMap<String, &'static VisemeMapping>;

/// 按源方言分桶的映射缓存
#[derive(Debug, Default)]
pub struct MappingCache {
    standard: ExpressionCache,
    extended_plus: ExpressionCache,
    extended: ExpressionCache,
    pairs_v1: VisemeCache,
    pairs_v2: VisemeCache,
    direct: VisemeCache,
}

impl MappingCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn expression_cache(&self, profile: ExpressionProfile) -> Option<&ExpressionCache> {
        match profile {
            ExpressionProfile::None => None,
            ExpressionProfile::Standard => Some(&self.standard),
            ExpressionProfile::ExtendedPlus => Some(&self.extended_plus),
            ExpressionProfile::Extended => Some(&self.extended),
        }
    }

    fn expression_cache_mut(&mut self, profile: ExpressionProfile) -> Option<&mut ExpressionCache> {
        match profile {
            ExpressionProfile::None => None,
            ExpressionProfile::Standard => Some(&mut self.standard),
            ExpressionProfile::ExtendedPlus => Some(&mut self.extended_plus),
            ExpressionProfile::Extended => Some(&mut self.extended),
        }
    }

    fn viseme_cache(&self, profile: VisemeProfile) -> Option<&VisemeCache> {
        match profile {
            VisemeProfile::None => None,
            VisemeProfile::PairsV1 => Some(&self.pairs_v1),
            VisemeProfile::PairsV2 => Some(&self.pairs_v2),
            VisemeProfile::Direct => Some(&self.direct),
        }
    }

    fn viseme_cache_mut(&mut self, profile: VisemeProfile) -> Option<&mut VisemeCache> {
        match profile {
            VisemeProfile::None => None,
            VisemeProfile::PairsV1 => Some(&mut self.pairs_v1),
            VisemeProfile::PairsV2 => Some(&mut self.pairs_v2),
            VisemeProfile::Direct => Some(&mut self.direct),
        }
    }

    /// 查找表情缓存
    pub fn get_expression(&self, from: ExpressionProfile, name: &str) -> Option<&'static ExpressionMapping> {
        self.expression_cache(from)?.get(name).copied()
    }

    /// 查找口型缓存
    pub fn get_viseme(&self, from: VisemeProfile, name: &str) -> Option<&'static VisemeMapping> {
        self.viseme_cache(from)?.get(name).copied()
    }

    /// 记录表情映射（None 方言不缓存）
    pub fn insert_expression(&mut self, from: ExpressionProfile, name: &str, row: &'static ExpressionMapping) {
        if let Some(cache) = self.expression_cache_mut(from) {
            cache.entry(name.to_string()).or_insert(row);
        }
    }

    /// 记录口型映射（None 方言不缓存）
    pub fn insert_viseme(&mut self, from: VisemeProfile, name: &str, row: &'static VisemeMapping) {
        if let Some(cache) = self.viseme_cache_mut(from) {
            cache.entry(name.to_string()).or_insert(row);
        }
    }

    /// 缓存条目总数
    pub fn len(&self) -> usize {
        self.standard.len()
            + self.extended_plus.len()
            + self.extended.len()
            + self.pairs_v1.len()
            + self.pairs_v2.len()
            + self.direct.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 清空全部缓存
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
