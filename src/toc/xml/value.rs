//! 通用标签树数据结构
//!
//! XML转换后的结果是一棵由字符串、嵌套对象和对象序列组成的树，
//! 这里用带标签的枚举表示，调用方通过模式匹配访问，而不是运行时类型检查。

use serde::Serialize;
use std::collections::BTreeMap;

/// 树中的一个值
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum XmlValue {
    /// 属性值、`text` 文本或 `desc` 文本
    Text(String),
    /// 只出现一次的子元素
    Node(XmlObject),
    /// 同名子元素出现两次及以上时的有序序列
    List(Vec<XmlValue>),
}

impl XmlValue {
    /// 字符串值
    pub fn as_str(&self) -> Option<&str> {
        match self {
            XmlValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// 嵌套对象
    pub fn as_object(&self) -> Option<&XmlObject> {
        match self {
            XmlValue::Node(object) => Some(object),
            _ => None,
        }
    }

    /// 序列
    pub fn as_list(&self) -> Option<&[XmlValue]> {
        match self {
            XmlValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// 是否为序列
    pub fn is_list(&self) -> bool {
        matches!(self, XmlValue::List(_))
    }

    /// 按键路径安全查找
    ///
    /// 只穿过 `Node` 值；路径上任何一环缺失，或落在字符串/序列上，都返回 `None`。
    pub fn lookup(&self, path: &[&str]) -> Option<&XmlValue> {
        let mut current = self;
        for key in path {
            current = current.as_object()?.get(key)?;
        }
        Some(current)
    }
}

impl From<XmlObject> for XmlValue {
    fn from(object: XmlObject) -> Self {
        XmlValue::Node(object)
    }
}

impl From<&str> for XmlValue {
    fn from(text: &str) -> Self {
        XmlValue::Text(text.to_string())
    }
}

impl From<String> for XmlValue {
    fn from(text: String) -> Self {
        XmlValue::Text(text)
    }
}

/// 键到值的映射（一个元素转换后的结果）
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct XmlObject {
    entries: BTreeMap<String, XmlValue>,
}

impl XmlObject {
    /// 创建空对象
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&XmlValue> {
        self.entries.get(key)
    }

    /// 获取字符串字段
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(XmlValue::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// 插入或覆盖一个字段
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<XmlValue>) {
        self.entries.insert(key.into(), value.into());
    }

    /// 按同名合并规则追加一个字段
    ///
    /// 第一次出现直接存放；第二次出现时把已有值提升为单元素序列再追加；
    /// 已是序列则直接追加。
    pub fn push(&mut self, key: &str, value: XmlValue) {
        match self.entries.get_mut(key) {
            None => {
                self.entries.insert(key.to_string(), value);
            }
            Some(XmlValue::List(items)) => items.push(value),
            Some(existing) => {
                let first = std::mem::replace(existing, XmlValue::List(Vec::with_capacity(2)));
                if let XmlValue::List(items) = existing {
                    items.push(first);
                    items.push(value);
                }
            }
        }
    }

    /// 按键路径安全查找，见 [`XmlValue::lookup`]
    pub fn lookup(&self, path: &[&str]) -> Option<&XmlValue> {
        let (first, rest) = path.split_first()?;
        self.get(first)?.lookup(rest)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &XmlValue)> {
        self.entries.iter()
    }
}

impl<K: Into<String>, V: Into<XmlValue>> FromIterator<(K, V)> for XmlObject {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut object = XmlObject::new();
        for (key, value) in iter {
            object.insert(key, value);
        }
        object
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn media_point(kind: &str) -> XmlObject {
        [("type", kind)].into_iter().collect()
    }

    #[test]
    fn test_push_promotes_to_list() {
        let mut object = XmlObject::new();
        object.push("mediaPoint", media_point("IMG").into());
        assert!(object.get("mediaPoint").unwrap().as_object().is_some());

        object.push("mediaPoint", media_point("VID").into());
        object.push("mediaPoint", media_point("GIF").into());

        let items = object.get("mediaPoint").unwrap().as_list().unwrap();
        let types: Vec<_> = items
            .iter()
            .map(|item| item.as_object().unwrap().get_str("type").unwrap())
            .collect();
        assert_eq!(types, vec!["IMG", "VID", "GIF"]);
    }

    #[test]
    fn test_lookup_walks_objects_only() {
        let mut media_map = XmlObject::new();
        media_map.insert("mediaPoint", media_point("GEN"));
        let mut nav_point = XmlObject::new();
        nav_point.insert("mediaMap", media_map);

        assert_eq!(
            nav_point.lookup(&["mediaMap", "mediaPoint", "type"]).and_then(XmlValue::as_str),
            Some("GEN")
        );
        assert!(nav_point.lookup(&["mediaMap", "missing", "type"]).is_none());
        assert!(nav_point.lookup(&["mediaMap", "mediaPoint", "type", "deeper"]).is_none());
        assert!(nav_point.lookup(&[]).is_none());
    }

    #[test]
    fn test_lookup_does_not_index_into_lists() {
        let mut media_map = XmlObject::new();
        media_map.push("mediaPoint", media_point("GEN").into());
        media_map.push("mediaPoint", media_point("IMG").into());

        let value = XmlValue::Node(media_map);
        assert!(value.lookup(&["mediaPoint"]).unwrap().is_list());
        assert!(value.lookup(&["mediaPoint", "type"]).is_none());
    }

    #[test]
    fn test_serialize_untagged() {
        let mut object = XmlObject::new();
        object.insert("id", "np1");
        object.push("navPoint", XmlObject::new().into());
        object.push("navPoint", media_point("IMG").into());

        let json = serde_json::to_string(&object).unwrap();
        assert_eq!(json, r#"{"id":"np1","navPoint":[{},{"type":"IMG"}]}"#);
    }
}
