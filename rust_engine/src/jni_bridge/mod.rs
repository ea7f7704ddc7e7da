//! JNI 绑定层 - 与 Java 代码交互

mod native_func;

pub use native_func::*;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use once_cell::sync::Lazy;

use crate::rig::CharacterNode;
use crate::{FacialError, Result};

/// 全局角色存储
pub static CHARACTERS: Lazy<RwLock<HashMap<i64, Arc<Mutex<CharacterNode>>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// 生成唯一句柄 ID
fn next_handle_id() -> i64 {
    use std::sync::atomic::{AtomicI64, Ordering};
    static COUNTER: AtomicI64 = AtomicI64::new(1);
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// 注册角色并返回句柄
pub fn register_character(character: CharacterNode) -> i64 {
    let id = next_handle_id();
    let mut characters = CHARACTERS.write().unwrap_or_else(PoisonError::into_inner);
    characters.insert(id, Arc::new(Mutex::new(character)));
    id
}

/// 删除角色，返回句柄是否存在
pub fn unregister_character(handle: i64) -> bool {
    let mut characters = CHARACTERS.write().unwrap_or_else(PoisonError::into_inner);
    characters.remove(&handle).is_some()
}

/// 通过句柄获取角色
pub fn get_character(handle: i64) -> Result<Arc<Mutex<CharacterNode>>> {
    let characters = CHARACTERS.read().unwrap_or_else(PoisonError::into_inner);
    characters
        .get(&handle)
        .cloned()
        .ok_or(FacialError::UnknownHandle(handle))
}

/// 按换行拆分 Java 端传入的名称列表
pub(crate) fn split_names(names: &str) -> impl Iterator<Item = &str> {
    names.lines().map(str::trim_end).filter(|name| !name.is_empty())
}
