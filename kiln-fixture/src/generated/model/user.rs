//! Code generated by kiln. DO NOT EDIT.
//!
//! Domain model of `user`.
#![allow(dead_code, unused_imports, unused_variables)]
use crate::generated::{dao, entity, model};
/// A `user` with its relations and save state.
#[derive(Clone, Default)]
pub struct User {
    pub value: entity::User,
    /// Handle used by the lifecycle methods; models built by hand start detached.
    pub dao: Option<::std::sync::Arc<dyn dao::UserDao>>,
    pub user_skills_loader: Option<::kiln::Loader<model::UserSkills>>,
    pub state: ::kiln::SaveState<entity::User>,
}
impl ::std::fmt::Debug for User {
    fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
        f.debug_struct("User").field("value", &self.value).finish_non_exhaustive()
    }
}
impl ::std::ops::Deref for User {
    type Target = entity::User;
    fn deref(&self) -> &Self::Target {
        &self.value
    }
}
impl ::std::ops::DerefMut for User {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.value
    }
}
impl User {
    pub fn new(value: entity::User) -> Self {
        Self {
            value,
            ..Default::default()
        }
    }
    fn dao_handle(&self) -> ::kiln::Result<::std::sync::Arc<dyn dao::UserDao>> {
        self.dao.clone().ok_or_else(|| ::kiln::Error::detached("user"))
    }
    /// Insert the model. A model is created at most once.
    pub fn create(&mut self, ctx: &::kiln::Context) -> ::kiln::Result<()> {
        if self.state.is_already_created() {
            return Err(::kiln::Error::already_created("user"));
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
    /// The `user_skill` related through `user_skills`, loaded on first use.
    pub fn user_skills(
        &self,
        ctx: &::kiln::Context,
    ) -> ::kiln::Result<model::UserSkills> {
        match &self.user_skills_loader {
            Some(load) => load(ctx),
            None => Err(::kiln::Error::unresolved("user", "user_skills")),
        }
    }
}
/// Lookups relations of other entities load `user` through.
pub trait UserFinder: Send + Sync {
    fn find_all(&self, ctx: &::kiln::Context) -> ::kiln::Result<Users>;
}
/// An ordered collection of `user` models.
#[derive(Debug, Clone, Default)]
pub struct Users {
    pub values: Vec<User>,
}
impl Users {
    pub fn new(values: Vec<User>) -> Self {
        Self { values }
    }
    /// Collect the present values, dropping `None`s.
    pub fn compact(values: Vec<Option<User>>) -> Self {
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
    pub fn iter(&self) -> ::std::slice::Iter<'_, User> {
        self.values.iter()
    }
    pub fn at(&self, idx: usize) -> Option<&User> {
        self.values.get(idx)
    }
    pub fn first(&self) -> Option<&User> {
        self.values.first()
    }
    pub fn last(&self) -> Option<&User> {
        self.values.last()
    }
    pub fn each<F: FnMut(&User)>(&self, f: F) {
        self.values.iter().for_each(f);
    }
    pub fn map<T, F: FnMut(&User) -> T>(&self, f: F) -> Vec<T> {
        self.values.iter().map(f).collect()
    }
    pub fn any<F: FnMut(&User) -> bool>(&self, f: F) -> bool {
        self.values.iter().any(f)
    }
    pub fn all<F: FnMut(&User) -> bool>(&self, f: F) -> bool {
        self.values.iter().all(f)
    }
    /// Models for which `f` holds, in order.
    pub fn filter<F: FnMut(&User) -> bool>(&self, f: F) -> Self {
        let mut values = self.values.clone();
        values.retain(f);
        Self { values }
    }
    /// The first model for which `f` holds.
    pub fn find<F: FnMut(&User) -> bool>(&self, f: F) -> Option<&User> {
        self.values.iter().position(f).map(|idx| &self.values[idx])
    }
    pub fn sort<F: FnMut(&User, &User) -> ::std::cmp::Ordering>(&mut self, f: F) {
        self.values.sort_unstable_by(f);
    }
    pub fn sort_stable<F: FnMut(&User, &User) -> ::std::cmp::Ordering>(&mut self, f: F) {
        self.values.sort_by(f);
    }
    pub fn add(&mut self, value: User) {
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
    /// Every `nick`, in order.
    pub fn nicks(&self) -> Vec<Option<String>> {
        self.values.iter().map(|v| v.value.nick.clone()).collect()
    }
    /// The first model of every distinct `nick`.
    pub fn unique_by_nick(&self) -> Self {
        let mut seen = ::std::collections::BTreeSet::new();
        Self {
            values: self
                .values
                .iter()
                .filter(|v| seen.insert(v.value.nick.clone()))
                .cloned()
                .collect(),
        }
    }
    pub fn group_by_nick(&self) -> ::std::collections::BTreeMap<Option<String>, Self> {
        let mut groups: ::std::collections::BTreeMap<Option<String>, Self> = ::std::collections::BTreeMap::new();
        for v in &self.values {
            groups.entry(v.value.nick.clone()).or_default().add(v.clone());
        }
        groups
    }
    /// Every `avatar`, in order.
    pub fn avatars(&self) -> Vec<Vec<u8>> {
        self.values.iter().map(|v| v.value.avatar.clone()).collect()
    }
    /// The first model of every distinct `avatar`.
    pub fn unique_by_avatar(&self) -> Self {
        let mut seen = ::std::collections::BTreeSet::new();
        Self {
            values: self
                .values
                .iter()
                .filter(|v| seen.insert(v.value.avatar.clone()))
                .cloned()
                .collect(),
        }
    }
    pub fn group_by_avatar(&self) -> ::std::collections::BTreeMap<Vec<u8>, Self> {
        let mut groups: ::std::collections::BTreeMap<Vec<u8>, Self> = ::std::collections::BTreeMap::new();
        for v in &self.values {
            groups.entry(v.value.avatar.clone()).or_default().add(v.clone());
        }
        groups
    }
    /// Every `score`, in order.
    pub fn scores(&self) -> Vec<f64> {
        self.values.iter().map(|v| v.value.score.clone()).collect()
    }
    /// Every `created_at`, in order.
    pub fn created_ats(&self) -> Vec<::kiln::chrono::DateTime<::kiln::chrono::Utc>> {
        self.values.iter().map(|v| v.value.created_at.clone()).collect()
    }
    /// The first model of every distinct `created_at`.
    pub fn unique_by_created_at(&self) -> Self {
        let mut seen = ::std::collections::BTreeSet::new();
        Self {
            values: self
                .values
                .iter()
                .filter(|v| seen.insert(v.value.created_at.clone()))
                .cloned()
                .collect(),
        }
    }
    pub fn group_by_created_at(
        &self,
    ) -> ::std::collections::BTreeMap<
        ::kiln::chrono::DateTime<::kiln::chrono::Utc>,
        Self,
    > {
        let mut groups: ::std::collections::BTreeMap<
            ::kiln::chrono::DateTime<::kiln::chrono::Utc>,
            Self,
        > = ::std::collections::BTreeMap::new();
        for v in &self.values {
            groups.entry(v.value.created_at.clone()).or_default().add(v.clone());
        }
        groups
    }
    /// Every `updated_at`, in order.
    pub fn updated_ats(&self) -> Vec<::kiln::chrono::DateTime<::kiln::chrono::Utc>> {
        self.values.iter().map(|v| v.value.updated_at.clone()).collect()
    }
    /// The first model of every distinct `updated_at`.
    pub fn unique_by_updated_at(&self) -> Self {
        let mut seen = ::std::collections::BTreeSet::new();
        Self {
            values: self
                .values
                .iter()
                .filter(|v| seen.insert(v.value.updated_at.clone()))
                .cloned()
                .collect(),
        }
    }
    pub fn group_by_updated_at(
        &self,
    ) -> ::std::collections::BTreeMap<
        ::kiln::chrono::DateTime<::kiln::chrono::Utc>,
        Self,
    > {
        let mut groups: ::std::collections::BTreeMap<
            ::kiln::chrono::DateTime<::kiln::chrono::Utc>,
            Self,
        > = ::std::collections::BTreeMap::new();
        for v in &self.values {
            groups.entry(v.value.updated_at.clone()).or_default().add(v.clone());
        }
        groups
    }
    pub fn first_by_id(&self, id: u64) -> Option<&User> {
        self.find(|v| v.value.id == id)
    }
    pub fn filter_by_id(&self, id: u64) -> Self {
        self.filter(|v| v.value.id == id)
    }
    pub fn filter_by_ids(&self, ids: &[u64]) -> Self {
        self.filter(|v| ids.contains(&v.value.id))
    }
    pub fn first_by_name(&self, name: &str) -> Option<&User> {
        self.find(|v| v.value.name == name)
    }
    pub fn filter_by_name(&self, name: &str) -> Self {
        self.filter(|v| v.value.name == name)
    }
    pub fn filter_by_names(&self, names: &[String]) -> Self {
        self.filter(|v| names.contains(&v.value.name))
    }
    pub fn first_by_nick(&self, nick: &Option<String>) -> Option<&User> {
        self.find(|v| v.value.nick == *nick)
    }
    pub fn filter_by_nick(&self, nick: &Option<String>) -> Self {
        self.filter(|v| v.value.nick == *nick)
    }
    pub fn filter_by_nicks(&self, nicks: &[String]) -> Self {
        self.filter(|v| v.value.nick.as_ref().is_some_and(|k| nicks.contains(k)))
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
impl IntoIterator for Users {
    type Item = User;
    type IntoIter = ::std::vec::IntoIter<User>;
    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}
impl FromIterator<User> for Users {
    fn from_iter<I: IntoIterator<Item = User>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
/// Relations of a loaded `user` collection, fetched once for all of it.
#[derive(Default)]
pub struct UsersRelations {
    user_skills: ::kiln::RelationCell<model::UserSkills>,
    user_skills_keys: Vec<u64>,
}
impl UsersRelations {
    pub fn new(values: &[entity::User]) -> Self {
        Self {
            user_skills_keys: ::kiln::relation::unique_keys(
                values.iter().map(|v| v.id.clone()),
            ),
            ..Default::default()
        }
    }
    pub fn find_user_skills(
        &self,
        ctx: &::kiln::Context,
        key: u64,
        finder: &dyn model::UserSkillFinder,
    ) -> ::kiln::Result<model::UserSkills> {
        let loaded = self
            .user_skills
            .get_or_load(|| finder.find_by_user_ids(ctx, &self.user_skills_keys))?;
        Ok(loaded.iter().filter(|v| v.value.user_id == key).cloned().collect())
    }
}
impl ::kiln::BeforeRender for User {}
impl ::kiln::ToJson for User {
    fn to_json(&self, ctx: &::kiln::Context) -> ::kiln::Result<Vec<u8>> {
        ::kiln::render::before_render(self, ctx)?;
        let mut w = ::kiln::render::ObjectWriter::new();
        w.uint("id", u64::from(self.value.id));
        w.string("name", &self.value.name);
        if let Some(v) = &self.value.nick {
            w.string("nick", v);
        } else {
            w.null("nick");
        }
        w.bytes("avatar", &self.value.avatar);
        w.float("score", f64::from(self.value.score));
        w.time("createdAt", &self.value.created_at);
        w.time("updatedAt", &self.value.updated_at);
        let user_skills = self
            .user_skills(ctx)
            .map_err(|e| ::kiln::render::render_error("user_skills", e))?;
        w.nested("userSkills", &::kiln::ToJson::to_json(&user_skills, ctx)?);
        Ok(w.finish())
    }
}
impl ::kiln::ToJsonWithOption for User {
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
        if option.exists("nick") {
            if let Some(v) = &self.value.nick {
                w.string("nick", v);
            } else {
                w.null("nick");
            }
        }
        if option.exists("avatar") {
            w.bytes("avatar", &self.value.avatar);
        }
        if option.exists("score") {
            w.float("score", f64::from(self.value.score));
        }
        if option.exists("created_at") {
            w.time("createdAt", &self.value.created_at);
        }
        if option.exists("updated_at") {
            w.time("updatedAt", &self.value.updated_at);
        }
        if option.is_include_all() {
            let user_skills = self
                .user_skills(ctx)
                .map_err(|e| ::kiln::render::render_error("user_skills", e))?;
            w.nested("userSkills", &::kiln::ToJson::to_json(&user_skills, ctx)?);
        } else if let Some(opt) = option.include_option("user_skills") {
            let user_skills = self
                .user_skills(ctx)
                .map_err(|e| ::kiln::render::render_error("user_skills", e))?;
            w.nested(
                "userSkills",
                &::kiln::ToJsonWithOption::to_json_with_option(&user_skills, ctx, opt)?,
            );
        }
        Ok(w.finish())
    }
}
impl ::kiln::ToJson for Users {
    fn to_json(&self, ctx: &::kiln::Context) -> ::kiln::Result<Vec<u8>> {
        ::kiln::ToJson::to_json(self.values.as_slice(), ctx)
    }
}
impl ::kiln::ToJsonWithOption for Users {
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
impl ::kiln::ToMap for User {
    fn to_map(
        &self,
        ctx: &::kiln::Context,
    ) -> ::kiln::Result<::kiln::serde_json::Value> {
        ::kiln::render::before_render(self, ctx)?;
        let mut w = ::kiln::render::MapWriter::new();
        w.value("id", &self.value.id)?;
        w.value("name", &self.value.name)?;
        w.value("nick", &self.value.nick)?;
        w.value("avatar", &self.value.avatar)?;
        w.value("score", &self.value.score)?;
        w.value("createdAt", &self.value.created_at.timestamp())?;
        w.value("updatedAt", &self.value.updated_at.timestamp())?;
        let user_skills = self
            .user_skills(ctx)
            .map_err(|e| ::kiln::render::render_error("user_skills", e))?;
        w.nested("userSkills", ::kiln::ToMap::to_map(&user_skills, ctx)?);
        Ok(w.finish())
    }
}
impl ::kiln::ToMapWithOption for User {
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
        if option.exists("nick") {
            w.value("nick", &self.value.nick)?;
        }
        if option.exists("avatar") {
            w.value("avatar", &self.value.avatar)?;
        }
        if option.exists("score") {
            w.value("score", &self.value.score)?;
        }
        if option.exists("created_at") {
            w.value("createdAt", &self.value.created_at.timestamp())?;
        }
        if option.exists("updated_at") {
            w.value("updatedAt", &self.value.updated_at.timestamp())?;
        }
        if option.is_include_all() {
            let user_skills = self
                .user_skills(ctx)
                .map_err(|e| ::kiln::render::render_error("user_skills", e))?;
            w.nested("userSkills", ::kiln::ToMap::to_map(&user_skills, ctx)?);
        } else if let Some(opt) = option.include_option("user_skills") {
            let user_skills = self
                .user_skills(ctx)
                .map_err(|e| ::kiln::render::render_error("user_skills", e))?;
            w.nested(
                "userSkills",
                ::kiln::ToMapWithOption::to_map_with_option(&user_skills, ctx, opt)?,
            );
        }
        Ok(w.finish())
    }
}
impl ::kiln::ToMap for Users {
    fn to_map(
        &self,
        ctx: &::kiln::Context,
    ) -> ::kiln::Result<::kiln::serde_json::Value> {
        ::kiln::ToMap::to_map(self.values.as_slice(), ctx)
    }
}
impl ::kiln::ToMapWithOption for Users {
    fn to_map_with_option(
        &self,
        ctx: &::kiln::Context,
        option: &::kiln::RenderOption,
    ) -> ::kiln::Result<::kiln::serde_json::Value> {
        ::kiln::ToMapWithOption::to_map_with_option(self.values.as_slice(), ctx, option)
    }
}
