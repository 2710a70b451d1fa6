use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{Name, TypeRef};

/// A relation from one entity to another.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Relation {
    pub to: Name,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal: Option<Name>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external: Option<Name>,
    /// Fetch every row of the target; no join key.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub all: bool,
    /// Hand-written accessor; only the signature is generated.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub custom: bool,
}

impl Relation {
    /// Both join members of a pairing relation.
    pub fn join(&self) -> Option<(&Name, &Name)> {
        if self.all || self.custom {
            return None;
        }
        Some((self.internal.as_ref()?, self.external.as_ref()?))
    }

    /// Validation message for a malformed relation, if any.
    pub fn problem(&self) -> Option<&'static str> {
        if self.to.is_empty() {
            return Some("'to' parameter is required");
        }
        if self.custom || self.all {
            if self.internal.is_some() || self.external.is_some() {
                return Some("'internal' and 'external' cannot be combined with 'custom' or 'all'");
            }
            return None;
        }
        if self.internal.is_none() || self.external.is_none() {
            return Some("both 'internal' and 'external' parameters are required");
        }
        None
    }
}

/// Output metadata of a member for the renderers.
///
/// In a definition this is `render = false` (hidden), `render = "key"` (default key),
/// or a table of protocol to key with an optional `inline = true`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RenderMeta {
    pub hidden: bool,
    pub inline: bool,
    pub default_name: Option<String>,
    pub names: BTreeMap<String, String>,
}

impl RenderMeta {
    /// The key used for `protocol`, or `None` when the member is hidden.
    pub fn key_for(&self, protocol: &str, member: &Name) -> Option<String> {
        if self.hidden {
            return None;
        }
        if let Some(name) = self.names.get(protocol) {
            return Some(name.clone());
        }
        Some(self.default_name.clone().unwrap_or_else(|| member.lower_camel()))
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RenderRepr {
    Flag(bool),
    Name(String),
    Table(BTreeMap<String, RenderValue>),
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RenderValue {
    Flag(bool),
    Name(String),
}

impl Serialize for RenderMeta {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.hidden {
            return RenderRepr::Flag(false).serialize(serializer);
        }
        if self.names.is_empty()
            && !self.inline
            && let Some(name) = &self.default_name
        {
            return RenderRepr::Name(name.clone()).serialize(serializer);
        }
        let mut table: BTreeMap<String, RenderValue> =
            self.names.iter().map(|(k, v)| (k.clone(), RenderValue::Name(v.clone()))).collect();
        if self.inline {
            table.insert("inline".into(), RenderValue::Flag(true));
        }
        if let Some(name) = &self.default_name {
            table.insert("default".into(), RenderValue::Name(name.clone()));
        }
        RenderRepr::Table(table).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for RenderMeta {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut meta = RenderMeta::default();
        match RenderRepr::deserialize(deserializer)? {
            RenderRepr::Flag(visible) => meta.hidden = !visible,
            RenderRepr::Name(name) => meta.default_name = Some(name),
            RenderRepr::Table(table) => {
                for (key, value) in table {
                    match (key.as_str(), value) {
                        ("inline", RenderValue::Flag(flag)) => meta.inline = flag,
                        ("default", RenderValue::Name(name)) => meta.default_name = Some(name),
                        (_, RenderValue::Name(name)) => {
                            meta.names.insert(key, name);
                        }
                        (_, RenderValue::Flag(_)) => {
                            return Err(serde::de::Error::custom(format!("render key '{key}' must be a string")));
                        }
                    }
                }
            }
        }
        Ok(meta)
    }
}

/// A field of an entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub name: Name,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub ty: Option<TypeRef>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub nullable: bool,
    /// Not database backed; survives regeneration from a table description.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub extend: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub has_many: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relation: Option<Relation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub render: Option<RenderMeta>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
}

impl Member {
    pub fn new(name: impl Into<Name>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty: Some(ty),
            nullable: false,
            extend: false,
            has_many: false,
            relation: None,
            render: None,
            desc: None,
        }
    }

    pub fn relation(name: impl Into<Name>, relation: Relation) -> Self {
        Self {
            name: name.into(),
            ty: None,
            nullable: false,
            extend: false,
            has_many: false,
            relation: Some(relation),
            render: None,
            desc: None,
        }
    }

    /// True for members stored in a table column.
    pub fn is_column(&self) -> bool {
        !self.extend && self.relation.is_none() && self.ty.as_ref().is_some_and(|t| t.storage_kind().is_some())
    }

    /// Relation or entity-typed member that loads a collection of the target.
    pub fn is_collection(&self) -> bool {
        self.has_many || self.relation.as_ref().is_some_and(|r| r.all)
    }

    pub fn is_hidden(&self) -> bool {
        self.render.as_ref().is_some_and(|r| r.hidden)
    }

    pub fn is_inline(&self) -> bool {
        self.render.as_ref().is_some_and(|r| r.inline)
    }

    /// Render key for `protocol`; `None` means the member is not rendered.
    pub fn render_key(&self, protocol: &str) -> Option<String> {
        match &self.render {
            Some(meta) => meta.key_for(protocol, &self.name),
            None => Some(self.name.lower_camel()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Holder {
        render: RenderMeta,
    }

    fn meta(text: &str) -> RenderMeta {
        toml::from_str::<Holder>(text).unwrap().render
    }

    #[test]
    fn test_render_meta_forms() {
        assert!(meta("render = false").hidden);
        assert_eq!(meta("render = \"nick\"").default_name.as_deref(), Some("nick"));
        let table = meta("render = { json = \"nickName\", inline = true }");
        assert!(table.inline);
        assert_eq!(table.names.get("json").map(String::as_str), Some("nickName"));
    }

    #[test]
    fn test_render_key_fallbacks() {
        let mut member = Member::new("user_id", TypeRef::parse("u64"));
        assert_eq!(member.render_key("json").as_deref(), Some("userID"));
        member.render = Some(meta("render = { json = \"uid\", default = \"owner\" }"));
        assert_eq!(member.render_key("json").as_deref(), Some("uid"));
        assert_eq!(member.render_key("map").as_deref(), Some("owner"));
        member.render = Some(meta("render = false"));
        assert_eq!(member.render_key("json"), None);
    }

    #[test]
    fn test_relation_problems() {
        let mut relation = Relation {
            to: Name::new("skill"),
            internal: Some(Name::new("skill_id")),
            ..Relation::default()
        };
        assert!(relation.problem().is_some());
        relation.external = Some(Name::new("id"));
        assert!(relation.problem().is_none());
        relation.all = true;
        assert!(relation.problem().is_some());
        assert!(Relation::default().problem().is_some());
    }
}
