//! LocalStorage 封装模块
//!
//! 使用 `web_sys::Storage` 实现核心库的 `KeyValueStore`。

use pureadmin::{AdminError, AdminResult, KeyValueStore};

/// 浏览器 LocalStorage
#[derive(Clone, Copy, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }

    fn require() -> AdminResult<web_sys::Storage> {
        Self::storage().ok_or_else(|| AdminError::storage("LocalStorage 不可用"))
    }
}

impl KeyValueStore for BrowserStorage {
    /// 键不存在或发生错误时返回 `None`
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) -> AdminResult<()> {
        Self::require()?
            .set_item(key, value)
            .map_err(|e| AdminError::storage(format!("写入失败: {:?}", e)).in_op_with("storage.set", key))
    }

    fn remove(&self, key: &str) -> AdminResult<()> {
        Self::require()?
            .remove_item(key)
            .map_err(|e| AdminError::storage(format!("删除失败: {:?}", e)).in_op_with("storage.remove", key))
    }
}
