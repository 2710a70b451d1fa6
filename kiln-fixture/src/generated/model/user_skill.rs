//! Code generated by kiln. DO NOT EDIT.
//!
//! Domain model of `user_skill`.
#![allow(dead_code, unused_imports, unused_variables)]
use crate::generated::{dao, entity, model};
/// A `user_skill` with its relations and save state.
#[derive(Clone, Default)]
pub struct UserSkill {
    pub value: entity::UserSkill,
    /// Handle used by the lifecycle methods; models built by hand start detached.
    pub dao: Option<::std::sync::Arc<dyn dao::UserSkillDao>>,
    pub skill_loader: Option<::kiln::Loader<Option<model::Skill>>>,
    pub state: ::kiln::SaveState<entity::UserSkill>,
}
impl ::std::fmt::Debug for UserSkill {
    fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
        f.debug_struct("UserSkill").field("value", &self.value).finish_non_exhaustive()
    }
}
impl ::std::ops::Deref for UserSkill {
    type Target = entity::UserSkill;
    fn deref(&self) -> &Self::Target {
        &self.value
    }
}
impl ::std::ops::DerefMut for UserSkill {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.value
    }
}
impl UserSkill {
    pub fn new(value: entity::UserSkill) -> Self {
        Self {
            value,
            ..Default::default()
        }
    }
    fn dao_handle(&self) -> ::kiln::Result<::std::sync::Arc<dyn dao::UserSkillDao>> {
        self.dao.clone().ok_or_else(|| ::kiln::Error::detached("user_skill"))
    }
    /// Insert the model. A model is created at most once.
    pub fn create(&mut self, ctx: &::kiln::Context) -> ::kiln::Result<()> {
        if self.state.is_already_created() {
            return Err(::kiln::Error::already_created("user_skill"));
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
    /// The `skill` related through `skill`, loaded on first use.
    pub fn skill(&self, ctx: &::kiln::Context) -> ::kiln::Result<Option<model::Skill>> {
        match &self.skill_loader {
            Some(load) => load(ctx),
            None => Err(::kiln::Error::unresolved("user_skill", "skill")),
        }
    }
}
/// Lookups relations of other entities load `user_skill` through.
pub trait UserSkillFinder: Send + Sync {
    fn find_all(&self, ctx: &::kiln::Context) -> ::kiln::Result<UserSkills>;
    /// Rows whose `user_id` is any of the given values.
    fn find_by_user_ids(
        &self,
        ctx: &::kiln::Context,
        user_ids: &[u64],
    ) -> ::kiln::Result<UserSkills>;
}
/// An ordered collection of `user_skill` models.
#[derive(Debug, Clone, Default)]
pub struct UserSkills {
    pub values: Vec<UserSkill>,
}
impl UserSkills {
    pub fn new(values: Vec<UserSkill>) -> Self {
        Self { values }
    }
    /// Collect the present values, dropping `None`s.
    pub fn compact(values: Vec<Option<UserSkill>>) -> Self {
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
    pub fn iter(&self) -> ::std::slice::Iter<'_, UserSkill> {
        self.values.iter()
    }
    pub fn at(&self, idx: usize) -> Option<&UserSkill> {
        self.values.get(idx)
    }
    pub fn first(&self) -> Option<&UserSkill> {
        self.values.first()
    }
    pub fn last(&self) -> Option<&UserSkill> {
        self.values.last()
    }
    pub fn each<F: FnMut(&UserSkill)>(&self, f: F) {
        self.values.iter().for_each(f);
    }
    pub fn map<T, F: FnMut(&UserSkill) -> T>(&self, f: F) -> Vec<T> {
        self.values.iter().map(f).collect()
    }
    pub fn any<F: FnMut(&UserSkill) -> bool>(&self, f: F) -> bool {
        self.values.iter().any(f)
    }
    pub fn all<F: FnMut(&UserSkill) -> bool>(&self, f: F) -> bool {
        self.values.iter().all(f)
    }
    /// Models for which `f` holds, in order.
    pub fn filter<F: FnMut(&UserSkill) -> bool>(&self, f: F) -> Self {
        let mut values = self.values.clone();
        values.retain(f);
        Self { values }
    }
    /// The first model for which `f` holds.
    pub fn find<F: FnMut(&UserSkill) -> bool>(&self, f: F) -> Option<&UserSkill> {
        self.values.iter().position(f).map(|idx| &self.values[idx])
    }
    pub fn sort<F: FnMut(&UserSkill, &UserSkill) -> ::std::cmp::Ordering>(
        &mut self,
        f: F,
    ) {
        self.values.sort_unstable_by(f);
    }
    pub fn sort_stable<F: FnMut(&UserSkill, &UserSkill) -> ::std::cmp::Ordering>(
        &mut self,
        f: F,
    ) {
        self.values.sort_by(f);
    }
    pub fn add(&mut self, value: UserSkill) {
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
    /// Every `user_id`, in order.
    pub fn user_ids(&self) -> Vec<u64> {
        self.values.iter().map(|v| v.value.user_id.clone()).collect()
    }
    /// The first model of every distinct `user_id`.
    pub fn unique_by_user_id(&self) -> Self {
        let mut seen = ::std::collections::BTreeSet::new();
        Self {
            values: self
                .values
                .iter()
                .filter(|v| seen.insert(v.value.user_id.clone()))
                .cloned()
                .collect(),
        }
    }
    pub fn group_by_user_id(&self) -> ::std::collections::BTreeMap<u64, Self> {
        let mut groups: ::std::collections::BTreeMap<u64, Self> = ::std::collections::BTreeMap::new();
        for v in &self.values {
            groups.entry(v.value.user_id.clone()).or_default().add(v.clone());
        }
        groups
    }
    /// Every `skill_id`, in order.
    pub fn skill_ids(&self) -> Vec<u64> {
        self.values.iter().map(|v| v.value.skill_id.clone()).collect()
    }
    /// The first model of every distinct `skill_id`.
    pub fn unique_by_skill_id(&self) -> Self {
        let mut seen = ::std::collections::BTreeSet::new();
        Self {
            values: self
                .values
                .iter()
                .filter(|v| seen.insert(v.value.skill_id.clone()))
                .cloned()
                .collect(),
        }
    }
    pub fn group_by_skill_id(&self) -> ::std::collections::BTreeMap<u64, Self> {
        let mut groups: ::std::collections::BTreeMap<u64, Self> = ::std::collections::BTreeMap::new();
        for v in &self.values {
            groups.entry(v.value.skill_id.clone()).or_default().add(v.clone());
        }
        groups
    }
    pub fn first_by_id(&self, id: u64) -> Option<&UserSkill> {
        self.find(|v| v.value.id == id)
    }
    pub fn filter_by_id(&self, id: u64) -> Self {
        self.filter(|v| v.value.id == id)
    }
    pub fn filter_by_ids(&self, ids: &[u64]) -> Self {
        self.filter(|v| ids.contains(&v.value.id))
    }
    pub fn first_by_user_id_and_skill_id(
        &self,
        user_id: u64,
        skill_id: u64,
    ) -> Option<&UserSkill> {
        self.find(|v| v.value.user_id == user_id && v.value.skill_id == skill_id)
    }
    pub fn filter_by_user_id_and_skill_id(&self, user_id: u64, skill_id: u64) -> Self {
        self.filter(|v| v.value.user_id == user_id && v.value.skill_id == skill_id)
    }
    pub fn first_by_user_id(&self, user_id: u64) -> Option<&UserSkill> {
        self.find(|v| v.value.user_id == user_id)
    }
    pub fn filter_by_user_id(&self, user_id: u64) -> Self {
        self.filter(|v| v.value.user_id == user_id)
    }
    pub fn filter_by_user_ids(&self, user_ids: &[u64]) -> Self {
        self.filter(|v| user_ids.contains(&v.value.user_id))
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
impl IntoIterator for UserSkills {
    type Item = UserSkill;
    type IntoIter = ::std::vec::IntoIter<UserSkill>;
    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}
impl FromIterator<UserSkill> for UserSkills {
    fn from_iter<I: IntoIterator<Item = UserSkill>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
/// Relations of a loaded `user_skill` collection, fetched once for all of it.
#[derive(Default)]
pub struct UserSkillsRelations {
    skill: ::kiln::RelationCell<model::Skills>,
    skill_keys: Vec<u64>,
}
impl UserSkillsRelations {
    pub fn new(values: &[entity::UserSkill]) -> Self {
        Self {
            skill_keys: ::kiln::relation::unique_keys(
                values.iter().map(|v| v.skill_id.clone()),
            ),
            ..Default::default()
        }
    }
    pub fn find_skill(
        &self,
        ctx: &::kiln::Context,
        key: u64,
        finder: &dyn model::SkillFinder,
    ) -> ::kiln::Result<Option<model::Skill>> {
        let loaded = self
            .skill
            .get_or_load(|| finder.find_by_ids(ctx, &self.skill_keys))?;
        Ok(loaded.iter().find(|v| v.value.id == key).cloned())
    }
}
impl ::kiln::BeforeRender for UserSkill {}
impl ::kiln::ToJson for UserSkill {
    fn to_json(&self, ctx: &::kiln::Context) -> ::kiln::Result<Vec<u8>> {
        ::kiln::render::before_render(self, ctx)?;
        let mut w = ::kiln::render::ObjectWriter::new();
        w.uint("id", u64::from(self.value.id));
        w.uint("userID", u64::from(self.value.user_id));
        w.uint("skillID", u64::from(self.value.skill_id));
        let skill = self
            .skill(ctx)
            .map_err(|e| ::kiln::render::render_error("skill", e))?;
        w.nested("skill", &::kiln::ToJson::to_json(&skill, ctx)?);
        Ok(w.finish())
    }
}
impl ::kiln::ToJsonWithOption for UserSkill {
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
        if option.exists("user_id") {
            w.uint("userID", u64::from(self.value.user_id));
        }
        if option.exists("skill_id") {
            w.uint("skillID", u64::from(self.value.skill_id));
        }
        if option.is_include_all() {
            let skill = self
                .skill(ctx)
                .map_err(|e| ::kiln::render::render_error("skill", e))?;
            w.nested("skill", &::kiln::ToJson::to_json(&skill, ctx)?);
        } else if let Some(opt) = option.include_option("skill") {
            let skill = self
                .skill(ctx)
                .map_err(|e| ::kiln::render::render_error("skill", e))?;
            w.nested(
                "skill",
                &::kiln::ToJsonWithOption::to_json_with_option(&skill, ctx, opt)?,
            );
        }
        Ok(w.finish())
    }
}
impl ::kiln::ToJson for UserSkills {
    fn to_json(&self, ctx: &::kiln::Context) -> ::kiln::Result<Vec<u8>> {
        ::kiln::ToJson::to_json(self.values.as_slice(), ctx)
    }
}
impl ::kiln::ToJsonWithOption for UserSkills {
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
impl ::kiln::ToMap for UserSkill {
    fn to_map(
        &self,
        ctx: &::kiln::Context,
    ) -> ::kiln::Result<::kiln::serde_json::Value> {
        ::kiln::render::before_render(self, ctx)?;
        let mut w = ::kiln::render::MapWriter::new();
        w.value("id", &self.value.id)?;
        w.value("userID", &self.value.user_id)?;
        w.value("skillID", &self.value.skill_id)?;
        let skill = self
            .skill(ctx)
            .map_err(|e| ::kiln::render::render_error("skill", e))?;
        w.nested("skill", ::kiln::ToMap::to_map(&skill, ctx)?);
        Ok(w.finish())
    }
}
impl ::kiln::ToMapWithOption for UserSkill {
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
        if option.exists("user_id") {
            w.value("userID", &self.value.user_id)?;
        }
        if option.exists("skill_id") {
            w.value("skillID", &self.value.skill_id)?;
        }
        if option.is_include_all() {
            let skill = self
                .skill(ctx)
                .map_err(|e| ::kiln::render::render_error("skill", e))?;
            w.nested("skill", ::kiln::ToMap::to_map(&skill, ctx)?);
        } else if let Some(opt) = option.include_option("skill") {
            let skill = self
                .skill(ctx)
                .map_err(|e| ::kiln::render::render_error("skill", e))?;
            w.nested(
                "skill",
                ::kiln::ToMapWithOption::to_map_with_option(&skill, ctx, opt)?,
            );
        }
        Ok(w.finish())
    }
}
impl ::kiln::ToMap for UserSkills {
    fn to_map(
        &self,
        ctx: &::kiln::Context,
    ) -> ::kiln::Result<::kiln::serde_json::Value> {
        ::kiln::ToMap::to_map(self.values.as_slice(), ctx)
    }
}
impl ::kiln::ToMapWithOption for UserSkills {
    fn to_map_with_option(
        &self,
        ctx: &::kiln::Context,
        option: &::kiln::RenderOption,
    ) -> ::kiln::Result<::kiln::serde_json::Value> {
        ::kiln::ToMapWithOption::to_map_with_option(self.values.as_slice(), ctx, option)
    }
}
