//! Code generated by kiln. DO NOT EDIT.
//!
//! Domain model of `skill`.
#![allow(dead_code, unused_imports, unused_variables)]
use crate::generated::{dao, entity, model};
/// A `skill` with its relations and save state.
#[derive(Clone, Default)]
pub struct Skill {
    pub value: entity::Skill,
    /// Handle used by the lifecycle methods; models built by hand start detached.
    pub dao: Option<::std::sync::Arc<dyn dao::SkillDao>>,
    pub state: ::kiln::SaveState<entity::Skill>,
}
impl ::std::fmt::Debug for Skill {
    fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
        f.debug_struct("Skill").field("value", &self.value).finish_non_exhaustive()
    }
}
impl ::std::ops::Deref for Skill {
    type Target = entity::Skill;
    fn deref(&self) -> &Self::Target {
        &self.value
    }
}
impl ::std::ops::DerefMut for Skill {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.value
    }
}
impl Skill {
    pub fn new(value: entity::Skill) -> Self {
        Self {
            value,
            ..Default::default()
        }
    }
    fn dao_handle(&self) -> ::kiln::Result<::std::sync::Arc<dyn dao::SkillDao>> {
        self.dao.clone().ok_or_else(|| ::kiln::Error::detached("skill"))
    }
    /// Insert the model. A model is created at most once.
    pub fn create(&mut self, ctx: &::kiln::Context) -> ::kiln::Result<()> {
        if self.state.is_already_created() {
            return Err(::kiln::Error::already_created("skill"));
        }
        let dao = self.dao_handle()?;
        dao.create(ctx, &mut self.value).map_err(|e| e.wrap("failed to Create"))?;
        self.state.mark_created();
        self.state.set_saved(&self.value);
        Ok(())
    }
    /// Store the model; nothing is written when it equals the last saved snapshot.
    pub fn update(&mut self, ctx: &::kiln::Context) -> ::kiln::Result<()> {
        if !self.state.needs_update(&self.value) {
            return Ok(());
        }
        let dao = self.dao_handle()?;
        dao.update(ctx, &mut self.value).map_err(|e| e.wrap("failed to Update"))?;
        self.state.set_saved(&self.value);
        Ok(())
    }
    pub fn delete(&self, ctx: &::kiln::Context) -> ::kiln::Result<()> {
        let dao = self.dao_handle()?;
        dao.delete(ctx, &self.value).map_err(|e| e.wrap("failed to Delete"))
    }
    /// Update when the model was created already, create it otherwise.
    pub fn save(&mut self, ctx: &::kiln::Context) -> ::kiln::Result<()> {
        if self.state.is_already_created() { self.update(ctx) } else { self.create(ctx) }
    }
}
/// Lookups relations of other entities load `skill` through.
pub trait SkillFinder: Send + Sync {
    fn find_all(&self, ctx: &::kiln::Context) -> ::kiln::Result<Skills>;
    /// Rows whose `id` is any of the given values.
    fn find_by_ids(&self, ctx: &::kiln::Context, ids: &[u64]) -> ::kiln::Result<Skills>;
}
/// An ordered collection of `skill` models.
#[derive(Debug, Clone, Default)]
pub struct Skills {
    pub values: Vec<Skill>,
}
impl Skills {
    pub fn new(values: Vec<Skill>) -> Self {
        Self { values }
    }
    /// Collect the present values, dropping `None`s.
    pub fn compact(values: Vec<Option<Skill>>) -> Self {
        Self {
            values: values.into_iter().flatten().collect(),
        }
    }
    pub fn len(&self) -> usize {
        self.values.len()
    }
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
    pub fn iter(&self) -> ::std::slice::Iter<'_, Skill> {
        self.values.iter()
    }
    pub fn at(&self, idx: usize) -> Option<&Skill> {
        self.values.get(idx)
    }
    pub fn first(&self) -> Option<&Skill> {
        self.values.first()
    }
    pub fn last(&self) -> Option<&Skill> {
        self.values.last()
    }
    pub fn each<F: FnMut(&Skill)>(&self, f: F) {
        self.values.iter().for_each(f);
    }
    pub fn map<T, F: FnMut(&Skill) -> T>(&self, f: F) -> Vec<T> {
        self.values.iter().map(f).collect()
    }
    pub fn any<F: FnMut(&Skill) -> bool>(&self, f: F) -> bool {
        self.values.iter().any(f)
    }
    pub fn all<F: FnMut(&Skill) -> bool>(&self, f: F) -> bool {
        self.values.iter().all(f)
    }
    /// Models for which `f` holds, in order.
    pub fn filter<F: FnMut(&Skill) -> bool>(&self, f: F) -> Self {
        let mut values = self.values.clone();
        values.retain(f);
        Self { values }
    }
    /// The first model for which `f` holds.
    pub fn find<F: FnMut(&Skill) -> bool>(&self, f: F) -> Option<&Skill> {
        self.values.iter().position(f).map(|idx| &self.values[idx])
    }
    pub fn sort<F: FnMut(&Skill, &Skill) -> ::std::cmp::Ordering>(&mut self, f: F) {
        self.values.sort_unstable_by(f);
    }
    pub fn sort_stable<F: FnMut(&Skill, &Skill) -> ::std::cmp::Ordering>(
        &mut self,
        f: F,
    ) {
        self.values.sort_by(f);
    }
    pub fn add(&mut self, value: Skill) {
        self.values.push(value);
    }
    pub fn merge(&mut self, other: Self) {
        self.values.extend(other.values);
    }
    /// Every `id`, in order.
    pub fn ids(&self) -> Vec<u64> {
        self.values.iter().map(|v| v.value.id.clone()).collect()
    }
    /// The first model of every distinct `id`.
    pub fn unique_by_id(&self) -> Self {
        let mut seen = ::std::collections::BTreeSet::new();
        Self {
            values: self
                .values
                .iter()
                .filter(|v| seen.insert(v.value.id.clone()))
                .cloned()
                .collect(),
        }
    }
    pub fn group_by_id(&self) -> ::std::collections::BTreeMap<u64, Self> {
        let mut groups: ::std::collections::BTreeMap<u64, Self> = ::std::collections::BTreeMap::new();
        for v in &self.values {
            groups.entry(v.value.id.clone()).or_default().add(v.clone());
        }
        groups
    }
    /// Every `name`, in order.
    pub fn names(&self) -> Vec<String> {
        self.values.iter().map(|v| v.value.name.clone()).collect()
    }
    /// The first model of every distinct `name`.
    pub fn unique_by_name(&self) -> Self {
        let mut seen = ::std::collections::BTreeSet::new();
        Self {
            values: self
                .values
                .iter()
                .filter(|v| seen.insert(v.value.name.clone()))
                .cloned()
                .collect(),
        }
    }
    pub fn group_by_name(&self) -> ::std::collections::BTreeMap<String, Self> {
        let mut groups: ::std::collections::BTreeMap<String, Self> = ::std::collections::BTreeMap::new();
        for v in &self.values {
            groups.entry(v.value.name.clone()).or_default().add(v.clone());
        }
        groups
    }
    pub fn first_by_id(&self, id: u64) -> Option<&Skill> {
        self.find(|v| v.value.id == id)
    }
    pub fn filter_by_id(&self, id: u64) -> Self {
        self.filter(|v| v.value.id == id)
    }
    pub fn filter_by_ids(&self, ids: &[u64]) -> Self {
        self.filter(|v| ids.contains(&v.value.id))
    }
    /// Run `create` on every model, stopping at the first failure.
    pub fn create_all(&mut self, ctx: &::kiln::Context) -> ::kiln::Result<()> {
        for v in &mut self.values {
            v.create(ctx)?;
        }
        Ok(())
    }
    /// Run `update` on every model, stopping at the first failure.
    pub fn update_all(&mut self, ctx: &::kiln::Context) -> ::kiln::Result<()> {
        for v in &mut self.values {
            v.update(ctx)?;
        }
        Ok(())
    }
    /// Run `save` on every model, stopping at the first failure.
    pub fn save_all(&mut self, ctx: &::kiln::Context) -> ::kiln::Result<()> {
        for v in &mut self.values {
            v.save(ctx)?;
        }
        Ok(())
    }
}
impl IntoIterator for Skills {
    type Item = Skill;
    type IntoIter = ::std::vec::IntoIter<Skill>;
    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}
impl FromIterator<Skill> for Skills {
    fn from_iter<I: IntoIterator<Item = Skill>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
/// Relations of a loaded `skill` collection, fetched once for all of it.
#[derive(Default)]
pub struct SkillsRelations {}
impl SkillsRelations {
    pub fn new(values: &[entity::Skill]) -> Self {
        Self::default()
    }
}
impl ::kiln::BeforeRender for Skill {}
impl ::kiln::ToJson for Skill {
    fn to_json(&self, ctx: &::kiln::Context) -> ::kiln::Result<Vec<u8>> {
        ::kiln::render::before_render(self, ctx)?;
        let mut w = ::kiln::render::ObjectWriter::new();
        w.uint("id", u64::from(self.value.id));
        w.string("name", &self.value.name);
        Ok(w.finish())
    }
}
impl ::kiln::ToJsonWithOption for Skill {
    fn to_json_with_option(
        &self,
        ctx: &::kiln::Context,
        option: &::kiln::RenderOption,
    ) -> ::kiln::Result<Vec<u8>> {
        ::kiln::render::before_render(self, ctx)?;
        let mut w = ::kiln::render::ObjectWriter::new();
        if option.exists("id") {
            w.uint("id", u64::from(self.value.id));
        }
        if option.exists("name") {
            w.string("name", &self.value.name);
        }
        Ok(w.finish())
    }
}
impl ::kiln::ToJson for Skills {
    fn to_json(&self, ctx: &::kiln::Context) -> ::kiln::Result<Vec<u8>> {
        ::kiln::ToJson::to_json(self.values.as_slice(), ctx)
    }
}
impl ::kiln::ToJsonWithOption for Skills {
    fn to_json_with_option(
        &self,
        ctx: &::kiln::Context,
        option: &::kiln::RenderOption,
    ) -> ::kiln::Result<Vec<u8>> {
        ::kiln::ToJsonWithOption::to_json_with_option(
            self.values.as_slice(),
            ctx,
            option,
        )
    }
}
impl ::kiln::ToMap for Skill {
    fn to_map(
        &self,
        ctx: &::kiln::Context,
    ) -> ::kiln::Result<::kiln::serde_json::Value> {
        ::kiln::render::before_render(self, ctx)?;
        let mut w = ::kiln::render::MapWriter::new();
        w.value("id", &self.value.id)?;
        w.value("name", &self.value.name)?;
        Ok(w.finish())
    }
}
impl ::kiln::ToMapWithOption for Skill {
    fn to_map_with_option(
        &self,
        ctx: &::kiln::Context,
        option: &::kiln::RenderOption,
    ) -> ::kiln::Result<::kiln::serde_json::Value> {
        ::kiln::render::before_render(self, ctx)?;
        let mut w = ::kiln::render::MapWriter::new();
        if option.exists("id") {
            w.value("id", &self.value.id)?;
        }
        if option.exists("name") {
            w.value("name", &self.value.name)?;
        }
        Ok(w.finish())
    }
}
impl ::kiln::ToMap for Skills {
    fn to_map(
        &self,
        ctx: &::kiln::Context,
    ) -> ::kiln::Result<::kiln::serde_json::Value> {
        ::kiln::ToMap::to_map(self.values.as_slice(), ctx)
    }
}
impl ::kiln::ToMapWithOption for Skills {
    fn to_map_with_option(
        &self,
        ctx: &::kiln::Context,
        option: &::kiln::RenderOption,
    ) -> ::kiln::Result<::kiln::serde_json::Value> {
        ::kiln::ToMapWithOption::to_map_with_option(self.values.as_slice(), ctx, option)
    }
}
