//! 合并形状展开
//!
//! 低精度方言用 `_L/R`、`_Up/Down` 表示左右或上下合并的形状，
//! 高精度方言里只有拆开后的单独形状。

const SIDE_MARKER: &str = "_L/R";
const DIRECTION_MARKER: &str = "_Up/Down";

/// 展开合并形状名称
///
/// 先拆左右，再拆上下，最多得到四个名称；不含标记时原样返回。
pub fn multi_shape_names(profile_shape_name: &str) -> Vec<String> {
    if profile_shape_name.contains(SIDE_MARKER) {
        let sides = [
            profile_shape_name.replace(SIDE_MARKER, "_L"),
            profile_shape_name.replace(SIDE_MARKER, "_R"),
        ];
        if sides.iter().any(|s| s.contains(DIRECTION_MARKER)) {
            let mut names = Vec::with_capacity(4);
            for side in &sides {
                if side.contains(DIRECTION_MARKER) {
                    names.push(side.replace(DIRECTION_MARKER, "_Up"));
                    names.push(side.replace(DIRECTION_MARKER, "_Down"));
                }
            }
            return names;
        }
        return Vec::from(sides);
    }

    if profile_shape_name.contains(DIRECTION_MARKER) {
        return vec![
            profile_shape_name.replace(DIRECTION_MARKER, "_Up"),
            profile_shape_name.replace(DIRECTION_MARKER, "_Down"),
        ];
    }

    vec![profile_shape_name.to_string()]
}
