//! Member type descriptors.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::Name;

/// Built-in scalar kinds a member can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    Bool,
    String,
    Bytes,
    Time,
}

/// How a value is encoded by the renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderKind {
    Int,
    Uint,
    Float,
    String,
    Bytes,
    Bool,
    Time,
}

impl PrimitiveKind {
    pub fn parse(name: &str) -> Option<Self> {
        let kind = match name {
            "i8" | "int8" => Self::I8,
            "i16" | "int16" => Self::I16,
            "i32" | "int32" => Self::I32,
            "i64" | "int64" | "int" => Self::I64,
            "u8" | "uint8" => Self::U8,
            "u16" | "uint16" => Self::U16,
            "u32" | "uint32" => Self::U32,
            "u64" | "uint64" | "uint" => Self::U64,
            "f32" | "float32" => Self::F32,
            "f64" | "float64" => Self::F64,
            "bool" => Self::Bool,
            "string" | "String" => Self::String,
            "bytes" | "[]byte" => Self::Bytes,
            "time" | "time.Time" => Self::Time,
            _ => return None,
        };
        Some(kind)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::Bool => "bool",
            Self::String => "string",
            Self::Bytes => "bytes",
            Self::Time => "time",
        }
    }

    pub fn render_kind(self) -> RenderKind {
        match self {
            Self::I8 | Self::I16 | Self::I32 | Self::I64 => RenderKind::Int,
            Self::U8 | Self::U16 | Self::U32 | Self::U64 => RenderKind::Uint,
            Self::F32 | Self::F64 => RenderKind::Float,
            Self::Bool => RenderKind::Bool,
            Self::String => RenderKind::String,
            Self::Bytes => RenderKind::Bytes,
            Self::Time => RenderKind::Time,
        }
    }

    pub fn is_integer(self) -> bool {
        matches!(self.render_kind(), RenderKind::Int | RenderKind::Uint)
    }

    /// Passed by value in generated signatures; strings and bytes are borrowed instead.
    pub fn is_copy(self) -> bool {
        !matches!(self, Self::String | Self::Bytes)
    }
}

impl Serialize for PrimitiveKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PrimitiveKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        PrimitiveKind::parse(&text).ok_or_else(|| serde::de::Error::custom(format!("unknown column type '{text}'")))
    }
}

/// The declared type of a member.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeRef {
    Primitive(PrimitiveKind),
    /// A hand-written type with a primitive underlying storage representation.
    Custom {
        name: String,
        path: Option<String>,
        underlying: PrimitiveKind,
    },
    /// Another entity of the definition set.
    Class(Name),
}

impl TypeRef {
    pub fn parse(text: &str) -> Self {
        match PrimitiveKind::parse(text) {
            Some(kind) => Self::Primitive(kind),
            None => Self::Class(Name::new(text)),
        }
    }

    pub fn class_name(&self) -> Option<&Name> {
        match self {
            Self::Class(name) => Some(name),
            _ => None,
        }
    }

    /// The primitive storage kind, if the type is stored in a column.
    pub fn storage_kind(&self) -> Option<PrimitiveKind> {
        match self {
            Self::Primitive(kind) => Some(*kind),
            Self::Custom { underlying, .. } => Some(*underlying),
            Self::Class(_) => None,
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum TypeRefRepr {
    Name(String),
    Custom {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        path: Option<String>,
        underlying: String,
    },
}

impl Serialize for TypeRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let repr = match self {
            Self::Primitive(kind) => TypeRefRepr::Name(kind.as_str().to_string()),
            Self::Class(name) => TypeRefRepr::Name(name.to_string()),
            Self::Custom { name, path, underlying } => TypeRefRepr::Custom {
                name: name.clone(),
                path: path.clone(),
                underlying: underlying.as_str().to_string(),
            },
        };
        repr.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TypeRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match TypeRefRepr::deserialize(deserializer)? {
            TypeRefRepr::Name(text) => Ok(Self::parse(&text)),
            TypeRefRepr::Custom { name, path, underlying } => {
                let underlying = PrimitiveKind::parse(&underlying).ok_or_else(|| {
                    serde::de::Error::custom(format!("unknown underlying type '{underlying}' for '{name}'"))
                })?;
                Ok(Self::Custom { name, path, underlying })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Holder {
        ty: TypeRef,
    }

    #[test]
    fn test_parse_primitive_aliases() {
        assert_eq!(TypeRef::parse("uint64"), TypeRef::Primitive(PrimitiveKind::U64));
        assert_eq!(TypeRef::parse("string"), TypeRef::Primitive(PrimitiveKind::String));
        assert_eq!(TypeRef::parse("skill"), TypeRef::Class(Name::new("skill")));
    }

    #[test]
    fn test_deserialize_custom() {
        let holder: Holder =
            toml::from_str("ty = { name = \"Level\", path = \"crate::level::Level\", underlying = \"u8\" }").unwrap();
        assert_eq!(
            holder.ty,
            TypeRef::Custom {
                name: "Level".into(),
                path: Some("crate::level::Level".into()),
                underlying: PrimitiveKind::U8,
            }
        );
    }

    #[test]
    fn test_deserialize_rejects_unknown_underlying() {
        let result: Result<Holder, _> = toml::from_str("ty = { name = \"Level\", underlying = \"u128\" }");
        assert!(result.is_err());
    }
}
