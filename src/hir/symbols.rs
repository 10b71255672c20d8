//! Resolved enum metadata.
//!
//! These are the records the whole pipeline produces: one [`EnumDescriptor`] per
//! enum, with members in declaration order and every value final.

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

use super::annotate::CommentAnnotations;

/// One enum member with its final value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumMember {
    /// Displayed name: the documentation title when it replaced the identifier.
    pub name: String,
    /// Identifier as declared in the source; symbolic references use this.
    pub identifier: String,
    pub value: i64,
    pub title: Option<String>,
    pub annotations: IndexMap<String, String>,
    pub data_enums: Vec<String>,
}

impl EnumMember {
    pub fn new(identifier: impl Into<String>, value: i64) -> Self {
        let identifier = identifier.into();
        Self {
            name: identifier.clone(),
            identifier,
            value,
            title: None,
            annotations: IndexMap::new(),
            data_enums: Vec::new(),
        }
    }

    /// Merge parsed documentation into this member.
    ///
    /// The title replaces the displayed name unless it is longer than
    /// `max_title_len` characters.
    pub fn apply_annotations(&mut self, doc: CommentAnnotations, max_title_len: Option<usize>) {
        if let Some(title) = &doc.title {
            let fits = max_title_len.is_none_or(|max| title.chars().count() <= max);
            if fits {
                self.name = title.clone();
            }
        }
        self.title = doc.title;
        self.annotations = doc.annotations;
        self.data_enums = doc.data_enums;
    }
}

impl Serialize for EnumMember {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("name", &self.name)?;
        map.serialize_entry("value", &self.value)?;
        if let Some(title) = &self.title {
            map.serialize_entry("title", title)?;
        }
        if !self.annotations.is_empty() {
            map.serialize_entry("annotations", &self.annotations)?;
        }
        if let Some(first) = self.data_enums.first() {
            map.serialize_entry("data_enums", &self.data_enums)?;
            // Older consumers read a single data enum.
            map.serialize_entry("data_enum", first)?;
        }
        map.end()
    }
}

/// A fully resolved enum.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct EnumDescriptor {
    pub name: String,
    pub package: String,
    #[serde(rename = "values")]
    pub members: Vec<EnumMember>,
}

impl EnumDescriptor {
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            package: package.into(),
            members: Vec::new(),
        }
    }

    /// `package.Name`
    pub fn key(&self) -> String {
        format!("{}.{}", self.package, self.name)
    }

    /// Member by declared identifier.
    pub fn member(&self, identifier: &str) -> Option<&EnumMember> {
        self.members.iter().find(|m| m.identifier == identifier)
    }

    /// `(identifier, value)` pairs in declaration order.
    pub fn values(&self) -> Vec<(&str, i64)> {
        self.members
            .iter()
            .map(|m| (m.identifier.as_str(), m.value))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::hir::annotate::annotate;

    #[test]
    fn test_title_replaces_name() {
        let mut member = EnumMember::new("ENGINE_RPM", 0x0305);
        member.apply_annotations(annotate("Engine RPM\n@unit VehicleUnit.RPM"), None);

        assert_eq!(member.name, "Engine RPM");
        assert_eq!(member.identifier, "ENGINE_RPM");
        assert_eq!(member.title.as_deref(), Some("Engine RPM"));
    }

    #[test]
    fn test_long_title_keeps_identifier() {
        let mut member = EnumMember::new("INFO_VIN", 0x0100);
        member.apply_annotations(
            annotate("A title that is far too long for the emulator"),
            Some(30),
        );

        assert_eq!(member.name, "INFO_VIN");
        assert!(member.title.is_some());
    }

    #[test]
    fn test_member_without_comment_keeps_name() {
        let mut member = EnumMember::new("INVALID", 0);
        member.apply_annotations(CommentAnnotations::default(), None);
        assert_eq!(member.name, "INVALID");
        assert!(member.annotations.is_empty());
    }

    #[test]
    fn test_member_json_shape() {
        let mut member = EnumMember::new("GEAR_SELECTION", 0x0400);
        member.apply_annotations(
            annotate("Gear selection\n@access VehiclePropertyAccess.READ\n@data_enum VehicleGear"),
            None,
        );

        let json = serde_json::to_value(&member).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "Gear selection",
                "value": 1024,
                "title": "Gear selection",
                "annotations": {
                    "access": "VehiclePropertyAccess:READ",
                    "data_enum": "VehicleGear"
                },
                "data_enums": ["VehicleGear"],
                "data_enum": "VehicleGear"
            })
        );
    }

    #[test]
    fn test_descriptor_json_shape() {
        let mut descriptor = EnumDescriptor::new("p", "Color");
        descriptor.members.push(EnumMember::new("RED", 1));

        let json = serde_json::to_string(&descriptor).unwrap();
        assert_eq!(
            json,
            r#"{"name":"Color","package":"p","values":[{"name":"RED","value":1}]}"#
        );
        assert_eq!(descriptor.key(), "p.Color");
        assert_eq!(descriptor.member("RED").map(|m| m.value), Some(1));
    }
}
