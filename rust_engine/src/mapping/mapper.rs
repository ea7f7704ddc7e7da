//! 名称转换器
//!
//! 查找顺序：表情缓存 -> 口型缓存 -> 表情对照表 -> 口型对照表。
//! 对照表命中后写入缓存，同一 (方言, 名称) 之后不再扫描。

use once_cell::sync::Lazy;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::config::get_config;
use crate::profile::{ExpressionProfile, FacialProfile, VisemeProfile};

use super::tables::{find_correction, find_incorrection, table_integrity_issues};
use super::{ExpressionMapping, MappingCache, VisemeMapping, EXPRESSION_MAPPINGS, MAPPING_CORRECTIONS, VISEME_MAPPINGS};

/// 全局映射器
static GLOBAL_MAPPER: Lazy<FacialProfileMapper> = Lazy::new(FacialProfileMapper::new);

/// 面部 Profile 映射器
///
/// 缓存读多写少，命中走读锁，插入走写锁。
pub struct FacialProfileMapper {
    cache: RwLock<MappingCache>,
    /// 对照表线性扫描次数（用于确认缓存生效）
    table_scans: AtomicUsize,
}

impl FacialProfileMapper {
    pub fn new() -> Self {
        if get_config().validate_tables {
            for issue in table_integrity_issues() {
                log::warn!("面部对照表数据冲突: {}", issue);
            }
        }

        log::info!(
            "面部映射器初始化: {} 条表情, {} 条口型, {} 条命名修正",
            EXPRESSION_MAPPINGS.len(),
            VISEME_MAPPINGS.len(),
            MAPPING_CORRECTIONS.len()
        );

        Self {
            cache: RwLock::new(MappingCache::new()),
            table_scans: AtomicUsize::new(0),
        }
    }

    /// 进程级共享实例
    pub fn global() -> &'static FacialProfileMapper {
        &GLOBAL_MAPPER
    }

    fn read_cache(&self) -> RwLockReadGuard<'_, MappingCache> {
        self.cache.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_cache(&self) -> RwLockWriteGuard<'_, MappingCache> {
        self.cache.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// 查找 `name` 从 `from` 到 `to` 的映射
    ///
    /// 返回 None 表示两张对照表都没有这个名称（自定义形状等），不是错误。
    /// 命中但目标方言没有对应形状时返回原名称。
    pub fn get_mapping(&self, name: &str, from: &FacialProfile, to: &FacialProfile) -> Option<String> {
        {
            let cache = self.read_cache();
            if let Some(row) = cache.get_expression(from.expression, name) {
                return Some(project_expression(row, name, to.expression));
            }
            if let Some(row) = cache.get_viseme(from.viseme, name) {
                return Some(project_viseme(row, name, to.viseme));
            }
        }

        if from.expression != ExpressionProfile::None {
            self.table_scans.fetch_add(1, Ordering::Relaxed);
            if let Some(row) = EXPRESSION_MAPPINGS
                .iter()
                .find(|row| row.has_mapping(name, from.expression))
            {
                self.write_cache().insert_expression(from.expression, name, row);
                return Some(project_expression(row, name, to.expression));
            }
        }

        if from.viseme != VisemeProfile::None {
            self.table_scans.fetch_add(1, Ordering::Relaxed);
            if let Some(row) = VISEME_MAPPINGS
                .iter()
                .find(|row| row.has_mapping(name, from.viseme))
            {
                self.write_cache().insert_viseme(from.viseme, name, row);
                return Some(project_viseme(row, name, to.viseme));
            }
        }

        None
    }

    /// 把 `from` Profile 下的形状名称转换为 `to` Profile 下的名称
    ///
    /// 总是返回一个名称，找不到映射时原样返回。
    /// 源角色带命名缺陷时先修正名称再查找；否则按原名查找，目标角色带命名缺陷时
    /// 把结果换回它实际拥有的错误名称。
    pub fn translate(&self, name: &str, from: FacialProfile, to: FacialProfile) -> String {
        // 修正后的名称查到映射时直接返回，不再换回目标的错误名称
        if from.corrections {
            if let Some(mapping) = find_correction(name).and_then(|correct| self.get_mapping(correct, &from, &to)) {
                self.log_translation(name, from, to, &mapping);
                return mapping;
            }
        }

        let result = match self.get_mapping(name, &from, &to) {
            Some(mapping) if to.corrections => match find_incorrection(&mapping) {
                Some(incorrect) => incorrect.to_string(),
                None => mapping,
            },
            Some(mapping) => mapping,
            None => name.to_string(),
        };
        self.log_translation(name, from, to, &result);
        result
    }

    fn log_translation(&self, name: &str, from: FacialProfile, to: FacialProfile, result: &str) {
        if log::log_enabled!(log::Level::Debug) && get_config().debug_log {
            log::debug!("{} {} -> {} {}", from, name, to, result);
        }
    }

    /// 对照表扫描次数
    pub fn table_scan_count(&self) -> usize {
        self.table_scans.load(Ordering::Relaxed)
    }

    /// 缓存条目数
    pub fn cached_entry_count(&self) -> usize {
        self.read_cache().len()
    }

    /// 清空缓存
    pub fn clear_cache(&self) {
        self.write_cache().clear();
    }
}

impl Default for FacialProfileMapper {
    fn default() -> Self {
        Self::new()
    }
}

fn project_expression(row: &ExpressionMapping, name: &str, to: ExpressionProfile) -> String {
    row.get_mapping(to).unwrap_or(name).to_string()
}

fn project_viseme(row: &VisemeMapping, name: &str, to: VisemeProfile) -> String {
    row.get_mapping(to).unwrap_or(name).to_string()
}

/// 使用全局映射器转换名称
pub fn translate(name: &str, from: FacialProfile, to: FacialProfile) -> String {
    FacialProfileMapper::global().translate(name, from, to)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expression(profile: ExpressionProfile) -> FacialProfile {
        FacialProfile::new(profile, VisemeProfile::None)
    }

    fn viseme(profile: VisemeProfile) -> FacialProfile {
        FacialProfile::new(ExpressionProfile::None, profile)
    }

    const EXPRESSION_DIALECTS: [ExpressionProfile; 3] = [
        ExpressionProfile::Standard,
        ExpressionProfile::ExtendedPlus,
        ExpressionProfile::Extended,
    ];

    const VISEME_DIALECTS: [VisemeProfile; 3] =
        [VisemeProfile::PairsV1, VisemeProfile::PairsV2, VisemeProfile::Direct];

    #[test]
    fn test_basic_translation() {
        let mapper = FacialProfileMapper::new();
        let ext_plus = FacialProfile::new(ExpressionProfile::ExtendedPlus, VisemeProfile::PairsV2);
        let ext = FacialProfile::new(ExpressionProfile::Extended, VisemeProfile::PairsV1);

        assert_eq!(mapper.translate("A25_Jaw_Open", ext_plus, ext), "Jaw_Open");
        assert_eq!(mapper.translate("Jaw_Open", ext, ext_plus), "A25_Jaw_Open");
        assert_eq!(mapper.translate("V_Tight_O", ext_plus, ext), "Tight-O");
        assert_eq!(mapper.translate("Tight-O", ext, ext_plus), "V_Tight_O");
    }

    #[test]
    fn test_unknown_names_pass_through() {
        let mapper = FacialProfileMapper::new();
        let a = FacialProfile::new(ExpressionProfile::Standard, VisemeProfile::PairsV1);
        let b = FacialProfile::new(ExpressionProfile::ExtendedPlus, VisemeProfile::PairsV2)
            .with_corrections(true);

        for name in ["Custom_Sculpt", "", "Jaw_Open_Extra", "AE"] {
            assert_eq!(mapper.translate(name, a, b), name);
            assert_eq!(mapper.translate(name, b, a), name);
            assert_eq!(mapper.get_mapping(name, &a, &b), None);
        }
    }

    #[test]
    fn test_every_expression_row() {
        let mapper = FacialProfileMapper::new();
        for row in EXPRESSION_MAPPINGS {
            for from in EXPRESSION_DIALECTS {
                let Some(source) = row.get_mapping(from) else {
                    continue;
                };
                for to in EXPRESSION_DIALECTS {
                    let expected = row.get_mapping(to).unwrap_or(source);
                    assert_eq!(
                        mapper.translate(source, expression(from), expression(to)),
                        expected,
                        "{:?} -> {:?}: {}",
                        from,
                        to,
                        source
                    );
                }
            }
        }
    }

    #[test]
    fn test_every_viseme_row() {
        let mapper = FacialProfileMapper::new();
        for row in VISEME_MAPPINGS {
            for from in VISEME_DIALECTS {
                let Some(source) = row.get_mapping(from) else {
                    continue;
                };
                for to in VISEME_DIALECTS {
                    let expected = row.get_mapping(to).unwrap_or(source);
                    assert_eq!(mapper.translate(source, viseme(from), viseme(to)), expected);
                }
            }
        }
    }

    #[test]
    fn test_round_trip() {
        let mapper = FacialProfileMapper::new();
        let a = expression(ExpressionProfile::ExtendedPlus);
        let b = expression(ExpressionProfile::Extended);
        for row in EXPRESSION_MAPPINGS {
            if row.extended_plus.is_empty() || row.extended.is_empty() {
                continue;
            }
            let there = mapper.translate(row.extended_plus, a, b);
            assert_eq!(mapper.translate(&there, b, a), row.extended_plus);
        }
    }

    #[test]
    fn test_expression_preferred_over_viseme() {
        // "Tongue_Out" 同时是 Extended 表情和 PairsV1 口型
        let mapper = FacialProfileMapper::new();
        let from = FacialProfile::new(ExpressionProfile::Extended, VisemeProfile::PairsV1);
        let to = FacialProfile::new(ExpressionProfile::ExtendedPlus, VisemeProfile::PairsV2);
        assert_eq!(mapper.translate("Tongue_Out", from, to), "A52_Tongue_Out");

        let from = viseme(VisemeProfile::PairsV1);
        assert_eq!(mapper.translate("Tongue_Out", from, to), "V_Tongue_Out");
    }

    #[test]
    fn test_correction_from_defective_rig() {
        let mapper = FacialProfileMapper::new();
        let from = expression(ExpressionProfile::Extended).with_corrections(true);
        let to = expression(ExpressionProfile::ExtendedPlus);

        assert_eq!(mapper.translate("Brow_Drop_Left", from, to), "A02_Brow_Down_Left");
        assert_eq!(mapper.translate("Brow_Raise_Outer_Right", from, to), "A05_Brow_Outer_Up_Right");
        // 修正名称在对照表中不存在时原样返回
        assert_eq!(mapper.translate("Brow_Raise_Inner_Left", from, to), "Brow_Raise_Inner_Left");
        // 没有缺陷标记时不修正
        let plain = expression(ExpressionProfile::Extended);
        assert_eq!(mapper.translate("Brow_Drop_Left", plain, to), "Brow_Drop_Left");
    }

    #[test]
    fn test_incorrection_to_defective_rig() {
        let mapper = FacialProfileMapper::new();
        let from = expression(ExpressionProfile::ExtendedPlus);
        let to = expression(ExpressionProfile::Extended).with_corrections(true);

        assert_eq!(mapper.translate("A02_Brow_Down_Left", from, to), "Brow_Drop_Left");
        assert_eq!(mapper.translate("A25_Jaw_Open", from, to), "Jaw_Open");
    }

    #[test]
    fn test_corrected_lookup_is_returned_as_is() {
        let mapper = FacialProfileMapper::new();
        // 两端都有缺陷：修正后的查找结果直接返回
        let from = expression(ExpressionProfile::Standard).with_corrections(true);
        let to = expression(ExpressionProfile::Extended).with_corrections(true);
        assert_eq!(mapper.translate("Brow_Drop_Left", from, to), "Brow_Drop_L");
        assert_eq!(mapper.translate("Brow_Raise_Outer_Right", from, to), "Brow_Raise_Outer_R");

        // 源名称本身无需修正时仍走普通查找并换回错误名称
        let from = expression(ExpressionProfile::ExtendedPlus).with_corrections(true);
        assert_eq!(mapper.translate("A02_Brow_Down_Left", from, to), "Brow_Drop_Left");
    }

    #[test]
    fn test_cache_avoids_rescan() {
        let mapper = FacialProfileMapper::new();
        let from = FacialProfile::new(ExpressionProfile::ExtendedPlus, VisemeProfile::PairsV2);
        let to = FacialProfile::new(ExpressionProfile::Extended, VisemeProfile::PairsV1);

        assert_eq!(mapper.translate("A29_Mouth_Funnel", from, to), "Mouth_Funnel_Up/Down_L/R");
        let scans = mapper.table_scan_count();
        assert_eq!(scans, 1);
        assert_eq!(mapper.cached_entry_count(), 1);

        assert_eq!(mapper.translate("A29_Mouth_Funnel", from, to), "Mouth_Funnel_Up/Down_L/R");
        assert_eq!(mapper.table_scan_count(), scans);

        // 口型需要先扫表情表
        assert_eq!(mapper.translate("V_Wide", from, to), "Wide");
        assert_eq!(mapper.table_scan_count(), scans + 2);
        assert_eq!(mapper.translate("V_Wide", from, to), "Wide");
        assert_eq!(mapper.table_scan_count(), scans + 2);
        assert_eq!(mapper.cached_entry_count(), 2);

        mapper.clear_cache();
        assert_eq!(mapper.cached_entry_count(), 0);
        assert_eq!(mapper.translate("A29_Mouth_Funnel", from, to), "Mouth_Funnel_Up/Down_L/R");
        assert_eq!(mapper.table_scan_count(), scans + 3);
    }

    #[test]
    fn test_cache_is_keyed_by_source_dialect() {
        let mapper = FacialProfileMapper::new();
        let std = expression(ExpressionProfile::Standard);
        let ext = expression(ExpressionProfile::Extended);
        let ext_plus = expression(ExpressionProfile::ExtendedPlus);

        // "Eye_Blink" 在 Standard 和 ExtendedPlus 列都存在
        assert_eq!(mapper.translate("Eye_Blink", std, ext), "Eyes_Blink");
        assert_eq!(mapper.translate("Eye_Blink", ext_plus, ext), "Eyes_Blink");
        assert_eq!(mapper.translate("Eye_Blink", ext, std), "Eye_Blink");
        assert_eq!(mapper.cached_entry_count(), 2);
    }

    #[test]
    fn test_global_translate() {
        let from = expression(ExpressionProfile::Standard);
        let to = expression(ExpressionProfile::ExtendedPlus);
        assert_eq!(translate("Mouth_Pucker", from, to), "A30_Mouth_Pucker");
        assert_eq!(translate("Mouth_Pucker", from, to), "A30_Mouth_Pucker");
    }

    #[test]
    fn test_concurrent_translate() {
        let mapper = FacialProfileMapper::new();
        let from = expression(ExpressionProfile::ExtendedPlus);
        let to = expression(ExpressionProfile::Extended);
        let names = ["A25_Jaw_Open", "A02_Brow_Down_Left", "A29_Mouth_Funnel", "Custom_Sculpt"];

        let results: Vec<Vec<String>> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    s.spawn(|| {
                        names
                            .iter()
                            .map(|name| mapper.translate(name, from, to))
                            .collect::<Vec<_>>()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        for result in &results {
            assert_eq!(result, &results[0]);
        }
        assert_eq!(results[0], vec!["Jaw_Open", "Brow_Drop_L", "Mouth_Funnel_Up/Down_L/R", "Custom_Sculpt"]);
        // 每个表内名称只缓存一次，未知名称不进缓存
        assert_eq!(mapper.cached_entry_count(), 3);
    }
}
