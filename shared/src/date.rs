//! 时间类型模块
//!
//! `Timestamp`: 可序列化的毫秒时间戳，用于传输和持久化。
//! 展示用的格式化基于 chrono，浏览器环境下由 `wasmbind` 特性提供当前时间。

use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};
use std::time::Duration;

/// 表格中统一使用的日期时间格式 (YYYY-MM-DD HH:mm:ss)
pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// =========================================================
// Timestamp - 可传输的时间戳类型
// =========================================================

/// 毫秒时间戳
///
/// 内部存储为 `i64`，表示自 Unix 纪元以来的毫秒数
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    #[inline]
    pub const fn new(ms: i64) -> Self {
        Self(ms)
    }

    /// 当前时间
    pub fn now() -> Self {
        Self(Utc::now().timestamp_millis())
    }

    #[inline]
    pub const fn as_millis(&self) -> i64 {
        self.0
    }

    /// 在指定时区下格式化为 `YYYY-MM-DD HH:mm:ss`
    pub fn format_in<Tz: TimeZone>(&self, tz: &Tz) -> Option<String>
    where
        Tz::Offset: std::fmt::Display,
    {
        let utc = DateTime::<Utc>::from_timestamp_millis(self.0)?;
        Some(utc.with_timezone(tz).format(DISPLAY_FORMAT).to_string())
    }

    /// 以本地时区格式化
    pub fn format_local(&self) -> Option<String> {
        self.format_in(&Local)
    }
}

impl From<i64> for Timestamp {
    fn from(ms: i64) -> Self {
        Self(ms)
    }
}

impl From<Timestamp> for i64 {
    fn from(ts: Timestamp) -> Self {
        ts.0
    }
}

impl Add<Duration> for Timestamp {
    type Output = Self;

    fn add(self, rhs: Duration) -> Self::Output {
        Self(self.0 + rhs.as_millis() as i64)
    }
}

impl Sub<Timestamp> for Timestamp {
    type Output = Duration;

    /// 两个时间戳的差值，负值截断为 0
    fn sub(self, rhs: Timestamp) -> Self::Output {
        let diff_ms = (self.0 - rhs.0).max(0);
        Duration::from_millis(diff_ms as u64)
    }
}

// =========================================================
// 展示格式化
// =========================================================

/// 将后端返回的时间字符串规范化为 `YYYY-MM-DD HH:mm:ss`
///
/// 支持 RFC 3339、`YYYY-MM-DD HH:mm:ss` 与 `YYYY-MM-DDTHH:mm:ss`，
/// 以及纯数字的毫秒时间戳。无法识别的输入原样返回。
pub fn format_datetime(raw: &str) -> String {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::<FixedOffset>::parse_from_rfc3339(raw) {
        return dt.format(DISPLAY_FORMAT).to_string();
    }
    for pattern in [DISPLAY_FORMAT, "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, pattern) {
            return dt.format(DISPLAY_FORMAT).to_string();
        }
    }
    if let Ok(ms) = raw.parse::<i64>() {
        if let Some(text) = Timestamp::new(ms).format_local() {
            return text;
        }
    }
    raw.to_string()
}
