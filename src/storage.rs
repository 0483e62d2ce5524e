//! token 持久化
//!
//! `KeyValueStore` 抽象浏览器 LocalStorage 一类的同步键值存储，
//! `TokenStorage` 是 token 记录唯一的读写入口：初始化时读取、登录与更新资料时写入、注销时删除。

use crate::error::{AdminError, AdminResult};
use log::warn;
use pureadmin_shared::{ProfileResult, Timestamp, TokenRecord};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// 同步键值存储
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> AdminResult<()>;
    fn remove(&self, key: &str) -> AdminResult<()>;
}

/// 内存实现，用于原生环境与测试
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> AdminResult<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> AdminResult<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// token 记录的类型化访问器
///
/// 克隆开销很小，克隆体共享同一个底层存储。
#[derive(Clone)]
pub struct TokenStorage {
    backend: Rc<dyn KeyValueStore>,
    key: String,
}

impl TokenStorage {
    pub fn new(backend: Rc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    /// 读取记录；不存在或内容损坏时返回 `None`
    pub fn load(&self) -> Option<TokenRecord> {
        let raw = self.backend.get(&self.key)?;
        match serde_json::from_str(&raw) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("[TokenStorage] discarding unreadable record under {}: {}", self.key, e);
                None
            }
        }
    }

    pub fn save(&self, record: &TokenRecord) -> AdminResult<()> {
        let raw = serde_json::to_string(record)
            .map_err(|e| AdminError::from(e).in_op_with("token.save", &self.key))?;
        self.backend
            .set(&self.key, &raw)
            .map_err(|e| e.in_op_with("token.save", &self.key))
    }

    /// 保留现有的 accessToken / expires，写入新的用户资料
    pub fn merge_profile(&self, profile: &ProfileResult) -> AdminResult<TokenRecord> {
        let merged = self.load().unwrap_or_default().with_profile(profile);
        self.save(&merged)?;
        Ok(merged)
    }

    pub fn clear(&self) -> AdminResult<()> {
        self.backend
            .remove(&self.key)
            .map_err(|e| e.in_op_with("token.clear", &self.key))
    }

    /// 当前可用的 accessToken（已过期的不返回）
    pub fn access_token(&self, now: Timestamp) -> Option<String> {
        self.load()
            .filter(|record| !record.access_token.is_empty() && !record.is_expired(now))
            .map(|record| record.access_token)
    }
}
