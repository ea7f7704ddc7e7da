//! 映射引擎配置
//!
//! 所有参数扁平化，直接在代码中修改默认值即可。

use once_cell::sync::Lazy;
use std::sync::{PoisonError, RwLock};

/// 映射配置（扁平化，不嵌套）
#[derive(Debug, Clone)]
pub struct MapperConfig {
    // ========== 动画剪辑 ==========
    /// 动画曲线属性名前缀，默认 "blendShape."
    /// 只有带此前缀的属性才参与剪辑 Profile 检测
    pub clip_property_prefix: String,

    // ========== 数据校验 ==========
    /// 创建映射器时是否校验对照表，默认 true
    pub validate_tables: bool,

    // ========== 调试 ==========
    /// 是否逐条输出名称转换日志，默认 false
    pub debug_log: bool,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            // ====== 动画剪辑 ======
            // 剪辑里表情曲线的属性名形如 "blendShape.Eye_Blink_L"
            // 去掉前缀后才是网格上的 blend shape 名称
            clip_property_prefix: "blendShape.".to_string(),

            // ====== 数据校验 ======
            // 同一方言列中出现重复名称说明静态数据损坏，
            // 开启后会在日志里逐条告警
            validate_tables: true,

            // ====== 调试 ======
            // 打开后每次名称转换都会输出 debug 日志，数量很大
            debug_log: false,
        }
    }
}

/// 全局配置实例
static MAPPER_CONFIG: Lazy<RwLock<MapperConfig>> = Lazy::new(|| {
    RwLock::new(MapperConfig::default())
});

/// 获取当前配置（只读）
pub fn get_config() -> MapperConfig {
    MAPPER_CONFIG
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// 手动设置配置（用于运行时调试）
pub fn set_config(config: MapperConfig) {
    *MAPPER_CONFIG.write().unwrap_or_else(PoisonError::into_inner) = config;
}

/// 重置为默认配置
pub fn reset_config() {
    *MAPPER_CONFIG.write().unwrap_or_else(PoisonError::into_inner) = MapperConfig::default();
}
