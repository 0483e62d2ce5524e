use serde::{Deserialize, Deserializer};

/// 将 JSON `null` 反序列化为类型默认值
///
/// 后端偶尔对空集合返回 `null`，会话中的角色与权限必须始终是数组。
/// 与 `#[serde(default)]` 搭配使用，可同时覆盖字段缺失与显式 `null` 两种情况。
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
