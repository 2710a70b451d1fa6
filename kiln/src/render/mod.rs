//! Rendering contracts implemented by generated models and collections.

pub mod json;
pub mod map;

use std::collections::{BTreeMap, BTreeSet};

use crate::context::Context;
use crate::errors::{Error, Result};

pub use json::ObjectWriter;
pub use map::MapWriter;

/// Hook run before a value is rendered. Generated models get an empty impl unless the definition
/// declares a hand-written one.
pub trait BeforeRender {
    fn before_render(&self, _ctx: &Context) -> Result<()> {
        Ok(())
    }
}

/// Run the pre-render hook of `value`, wrapping its failure.
pub fn before_render<T: BeforeRender + ?Sized>(value: &T, ctx: &Context) -> Result<()> {
    value.before_render(ctx).map_err(|e| e.wrap("failed to BeforeRender"))
}

/// Selection of fields and relations for option-driven rendering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderOption {
    only: BTreeSet<String>,
    except: BTreeSet<String>,
    includes: BTreeMap<String, RenderOption>,
    include_all: bool,
}

impl RenderOption {
    pub fn builder() -> RenderOptionBuilder {
        RenderOptionBuilder::default()
    }

    /// Whether the plain field `name` is rendered. `only` takes precedence over `except`.
    pub fn exists(&self, name: &str) -> bool {
        if !self.only.is_empty() {
            return self.only.contains(name);
        }
        !self.except.contains(name)
    }

    /// Option for the relation `name`, if it was included.
    pub fn include_option(&self, name: &str) -> Option<&RenderOption> {
        self.includes.get(name)
    }

    pub fn is_include_all(&self) -> bool {
        self.include_all
    }
}

#[derive(Debug, Clone, Default)]
pub struct RenderOptionBuilder {
    option: RenderOption,
}

impl RenderOptionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn only<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.option.only.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn except<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.option.except.extend(names.into_iter().map(Into::into));
        self
    }

    /// Render the relation `name` with its plain fields.
    pub fn include(mut self, name: impl Into<String>) -> Self {
        self.option.includes.insert(name.into(), RenderOption::default());
        self
    }

    /// Render the relation `name` with its own nested selection.
    pub fn include_with(mut self, name: impl Into<String>, build: impl FnOnce(RenderOptionBuilder) -> RenderOptionBuilder) -> Self {
        self.option.includes.insert(name.into(), build(RenderOptionBuilder::new()).build());
        self
    }

    pub fn include_all(mut self) -> Self {
        self.option.include_all = true;
        self
    }

    pub fn build(self) -> RenderOption {
        self.option
    }
}

pub trait ToJson {
    fn to_json(&self, ctx: &Context) -> Result<Vec<u8>>;
}

pub trait ToJsonWithOption {
    fn to_json_with_option(&self, ctx: &Context, option: &RenderOption) -> Result<Vec<u8>>;
}

pub trait ToMap {
    fn to_map(&self, ctx: &Context) -> Result<serde_json::Value>;
}

pub trait ToMapWithOption {
    fn to_map_with_option(&self, ctx: &Context, option: &RenderOption) -> Result<serde_json::Value>;
}

const NULL: &[u8] = b"null";

impl<T: ToJson> ToJson for Option<T> {
    fn to_json(&self, ctx: &Context) -> Result<Vec<u8>> {
        match self {
            Some(value) => value.to_json(ctx),
            None => Ok(NULL.to_vec()),
        }
    }
}

impl<T: ToJsonWithOption> ToJsonWithOption for Option<T> {
    fn to_json_with_option(&self, ctx: &Context, option: &RenderOption) -> Result<Vec<u8>> {
        match self {
            Some(value) => value.to_json_with_option(ctx, option),
            None => Ok(NULL.to_vec()),
        }
    }
}

impl<T: ToMap> ToMap for Option<T> {
    fn to_map(&self, ctx: &Context) -> Result<serde_json::Value> {
        match self {
            Some(value) => value.to_map(ctx),
            None => Ok(serde_json::Value::Null),
        }
    }
}

impl<T: ToMapWithOption> ToMapWithOption for Option<T> {
    fn to_map_with_option(&self, ctx: &Context, option: &RenderOption) -> Result<serde_json::Value> {
        match self {
            Some(value) => value.to_map_with_option(ctx, option),
            None => Ok(serde_json::Value::Null),
        }
    }
}

impl<T: ToJson + ?Sized> ToJson for Box<T> {
    fn to_json(&self, ctx: &Context) -> Result<Vec<u8>> {
        (**self).to_json(ctx)
    }
}

impl<T: ToJsonWithOption + ?Sized> ToJsonWithOption for Box<T> {
    fn to_json_with_option(&self, ctx: &Context, option: &RenderOption) -> Result<Vec<u8>> {
        (**self).to_json_with_option(ctx, option)
    }
}

impl<T: ToMap + ?Sized> ToMap for Box<T> {
    fn to_map(&self, ctx: &Context) -> Result<serde_json::Value> {
        (**self).to_map(ctx)
    }
}

impl<T: ToMapWithOption + ?Sized> ToMapWithOption for Box<T> {
    fn to_map_with_option(&self, ctx: &Context, option: &RenderOption) -> Result<serde_json::Value> {
        (**self).to_map_with_option(ctx, option)
    }
}

fn json_array(items: impl Iterator<Item = Result<Vec<u8>>>) -> Result<Vec<u8>> {
    let mut buf = vec![b'['];
    for (idx, item) in items.enumerate() {
        if idx > 0 {
            buf.push(b',');
        }
        buf.extend(item?);
    }
    buf.push(b']');
    Ok(buf)
}

impl<T: ToJson> ToJson for [T] {
    fn to_json(&self, ctx: &Context) -> Result<Vec<u8>> {
        json_array(self.iter().map(|v| v.to_json(ctx)))
    }
}

impl<T: ToJsonWithOption> ToJsonWithOption for [T] {
    fn to_json_with_option(&self, ctx: &Context, option: &RenderOption) -> Result<Vec<u8>> {
        json_array(self.iter().map(|v| v.to_json_with_option(ctx, option)))
    }
}

impl<T: ToMap> ToMap for [T] {
    fn to_map(&self, ctx: &Context) -> Result<serde_json::Value> {
        self.iter().map(|v| v.to_map(ctx)).collect::<Result<Vec<_>>>().map(serde_json::Value::Array)
    }
}

impl<T: ToMapWithOption> ToMapWithOption for [T] {
    fn to_map_with_option(&self, ctx: &Context, option: &RenderOption) -> Result<serde_json::Value> {
        self.iter()
            .map(|v| v.to_map_with_option(ctx, option))
            .collect::<Result<Vec<_>>>()
            .map(serde_json::Value::Array)
    }
}

impl<T: ToJson> ToJson for Vec<T> {
    fn to_json(&self, ctx: &Context) -> Result<Vec<u8>> {
        self.as_slice().to_json(ctx)
    }
}

impl<T: ToJsonWithOption> ToJsonWithOption for Vec<T> {
    fn to_json_with_option(&self, ctx: &Context, option: &RenderOption) -> Result<Vec<u8>> {
        self.as_slice().to_json_with_option(ctx, option)
    }
}

impl<T: ToMap> ToMap for Vec<T> {
    fn to_map(&self, ctx: &Context) -> Result<serde_json::Value> {
        self.as_slice().to_map(ctx)
    }
}

impl<T: ToMapWithOption> ToMapWithOption for Vec<T> {
    fn to_map_with_option(&self, ctx: &Context, option: &RenderOption) -> Result<serde_json::Value> {
        self.as_slice().to_map_with_option(ctx, option)
    }
}

/// Failure while rendering a named part of a value.
pub fn render_error(what: &str, err: Error) -> Error {
    err.wrap(format!("cannot render {what}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Hooked(bool);

    impl BeforeRender for Hooked {
        fn before_render(&self, _ctx: &Context) -> Result<()> {
            if self.0 { Ok(()) } else { Err(Error::render("not ready")) }
        }
    }

    #[test]
    fn test_exists_only_wins_over_except() {
        let option = RenderOption::builder().only(["id", "name"]).except(["name"]).build();
        assert!(option.exists("name"));
        assert!(!option.exists("age"));
        let option = RenderOption::builder().except(["name"]).build();
        assert!(!option.exists("name"));
        assert!(option.exists("age"));
    }

    #[test]
    fn test_nested_includes() {
        let option = RenderOption::builder()
            .include("skill")
            .include_with("group", |b| b.only(["id"]).include("owner"))
            .build();
        assert!(option.include_option("skill").is_some());
        let group = option.include_option("group").unwrap();
        assert!(!group.exists("name"));
        assert!(group.include_option("owner").is_some());
        assert!(option.include_option("missing").is_none());
        assert!(!option.is_include_all());
    }

    #[test]
    fn test_before_render_wraps() {
        let ctx = Context::new();
        assert!(before_render(&Hooked(true), &ctx).is_ok());
        let err = before_render(&Hooked(false), &ctx).unwrap_err();
        assert!(err.to_string().starts_with("failed to BeforeRender"));
    }
}
