use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use kiln::cache::MemoryCache;
use kiln::chrono::{DateTime, TimeZone, Utc};
use kiln::sql::{ExecResult, Executor, Row};
use kiln::{AuditSink, Context, Order, RenderOption, ToJson, ToJsonWithOption, ToValue, Value};
use kiln_fixture::generated::mock::{UserRepositoryMock, factory};
use kiln_fixture::generated::entity;
use kiln_fixture::generated::model::{self, UserFinder, UserSkillFinder};
use kiln_fixture::generated::repository::{Repository, SkillRepository, UserRepository, UserSkillRepository};

const OWNER: u64 = 1;

type Log = Mutex<Vec<(String, Vec<Value>)>>;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Tables held in memory. Reads honour `=`, `IN` and `IS NULL` conditions joined by `AND`; every
/// statement is logged.
#[derive(Default)]
struct Database {
    tables: Vec<(&'static str, Vec<Row>)>,
    queries: Log,
    execs: Log,
}

fn row(columns: Vec<(&str, Value)>) -> Row {
    Row::new(columns.into_iter().map(|(name, value)| (name.to_string(), value)).collect())
}

fn time(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).unwrap()
}

fn user(id: u64, name: &str, nick: Option<&str>, avatar: &[u8]) -> Row {
    row(vec![
        ("id", Value::Uint(id)),
        ("name", name.to_value()),
        ("nick", nick.map_or(Value::Null, |n| n.to_value())),
        ("avatar", Value::from_bytes(avatar)),
        ("score", Value::Float(id as f64 * 1.5)),
        ("created_at", Value::Time(time(1_700_000_000))),
        ("updated_at", Value::Time(time(1_700_000_000))),
    ])
}

fn user_skill(id: u64, user_id: u64, skill_id: u64) -> Row {
    row(vec![
        ("id", Value::Uint(id)),
        ("user_id", Value::Uint(user_id)),
        ("skill_id", Value::Uint(skill_id)),
    ])
}

fn skill(id: u64, name: &str) -> Row {
    row(vec![("id", Value::Uint(id)), ("name", name.to_value())])
}

impl Database {
    fn seeded() -> Self {
        Self {
            tables: vec![
                (
                    "users",
                    vec![
                        user(1, "alice", Some("al"), br#"{"hue":"teal"}"#),
                        user(2, "bob", None, b"png"),
                        user(3, "carol", None, b""),
                        user(4, "dave", Some("d"), b"gif"),
                    ],
                ),
                (
                    "user_skills",
                    vec![user_skill(10, 1, 100), user_skill(11, 1, 101), user_skill(12, 2, 100), user_skill(13, 3, 102)],
                ),
                ("skills", vec![skill(100, "rust"), skill(101, "sql"), skill(102, "toml")]),
            ],
            ..Self::default()
        }
    }

    fn queries_of(&self, table: &str) -> usize {
        let from = format!("FROM `{table}`");
        lock(&self.queries).iter().filter(|(sql, _)| sql.contains(&from)).count()
    }

    fn execs(&self) -> Vec<(String, Vec<Value>)> {
        lock(&self.execs).clone()
    }

    fn last_query(&self) -> (String, Vec<Value>) {
        lock(&self.queries).last().cloned().unwrap_or_default()
    }

    fn matching(rows: &[Row], sql: &str, args: &[Value]) -> Vec<Row> {
        let Some((_, clause)) = sql.split_once(" WHERE ") else {
            return rows.to_vec();
        };
        let mut args = args.iter();
        let conditions: Vec<(&str, Vec<Value>)> = clause
            .split(" AND ")
            .map(|condition| {
                let column = condition.split('`').nth(1).unwrap_or_default();
                let wanted = if condition.ends_with("IS NULL") {
                    vec![Value::Null]
                } else {
                    args.by_ref().take(condition.matches('?').count()).cloned().collect()
                };
                (column, wanted)
            })
            .collect();
        rows.iter()
            .filter(|row| {
                conditions.iter().all(|(column, wanted)| {
                    row.get::<Value>(column)
                        .is_ok_and(|actual| wanted.iter().any(|w| w.matches(&actual, Order::Unordered)))
                })
            })
            .cloned()
            .collect()
    }
}

impl Executor for Database {
    fn query(&self, _ctx: &Context, sql: &str, args: &[Value]) -> kiln::Result<Vec<Row>> {
        lock(&self.queries).push((sql.to_string(), args.to_vec()));
        let rows = self
            .tables
            .iter()
            .find(|(table, _)| sql.contains(&format!("FROM `{table}`")))
            .map(|(_, rows)| Self::matching(rows, sql, args))
            .unwrap_or_default();
        if sql.starts_with("SELECT COUNT(*)") {
            return Ok(vec![row(vec![("count", Value::Int(rows.len() as i64))])]);
        }
        Ok(rows)
    }

    fn exec(&self, _ctx: &Context, sql: &str, args: &[Value]) -> kiln::Result<ExecResult> {
        lock(&self.execs).push((sql.to_string(), args.to_vec()));
        Ok(ExecResult {
            last_insert_id: 99,
            rows_affected: 1,
        })
    }
}

#[derive(Default)]
struct Audit(Mutex<Vec<String>>);

impl AuditSink for Audit {
    fn record(&self, entity: &str, action: &str, _value: &Value) -> kiln::Result<()> {
        lock(&self.0).push(format!("{entity}:{action}"));
        Ok(())
    }
}

fn now() -> DateTime<Utc> {
    time(1_800_000_000)
}

fn context() -> Context {
    Context::new().with_request_time(now())
}

fn repository(db: &Arc<Database>) -> Arc<Repository> {
    Repository::new(db.clone(), Arc::new(MemoryCache::new()), OWNER)
}

#[test]
fn test_save_writes_only_changed_models() {
    let db = Arc::new(Database::seeded());
    let repo = repository(&db);
    let ctx = context();

    let mut alice = repo.user().find_by_id(&ctx, 1).unwrap().unwrap();
    alice.save(&ctx).unwrap();
    assert!(db.execs().is_empty());

    alice.name = "alicia".into();
    alice.save(&ctx).unwrap();
    let execs = db.execs();
    assert_eq!(execs.len(), 1);
    assert!(execs[0].0.starts_with("UPDATE `users` SET"), "{}", execs[0].0);
    assert_eq!(alice.updated_at, now());

    alice.save(&ctx).unwrap();
    assert_eq!(db.execs().len(), 1);
}

#[test]
fn test_create_stamps_and_audits() {
    let db = Arc::new(Database::seeded());
    let repo = repository(&db);
    let audit = Arc::new(Audit::default());
    let ctx = context().with_audit_sink(audit.clone());

    let mut user = factory::default_user();
    user.name = "erin".into();
    repo.user().create(&ctx, &mut user).unwrap();
    assert_eq!(user.id, 99);
    assert_eq!(user.created_at, now());
    assert_eq!(db.execs().len(), 1);
    assert!(db.execs()[0].0.starts_with("INSERT INTO `users`"));
    assert_eq!(*lock(&audit.0), vec!["user:create".to_string()]);

    user.save(&ctx).unwrap();
    assert_eq!(db.execs().len(), 1);
    assert!(user.create(&ctx).is_err());
}

#[test]
fn test_request_time_is_required_to_write() {
    let db = Arc::new(Database::seeded());
    let repo = repository(&db);
    let mut user = factory::default_user();
    assert!(repo.user().create(&Context::new(), &mut user).is_err());
    assert!(db.execs().is_empty());
}

#[test]
fn test_collection_loads_each_relation_once() {
    let db = Arc::new(Database::seeded());
    let repo = repository(&db);
    let ctx = context();

    let users = repo.user().find_all(&ctx).unwrap();
    assert_eq!(users.len(), 4);
    let counts: Vec<usize> = users.iter().map(|u| u.user_skills(&ctx).unwrap().len()).collect();
    assert_eq!(counts, vec![2, 1, 1, 0]);
    assert_eq!(db.queries_of("users"), 1);
    assert_eq!(db.queries_of("user_skills"), 1);

    let mut names = Vec::new();
    for user in users.iter() {
        for owned in user.user_skills(&ctx).unwrap().iter() {
            let skill = owned.skill(&ctx).unwrap().unwrap();
            names.push(skill.name.clone());
        }
    }
    assert_eq!(names, vec!["rust", "sql", "rust", "toml"]);
    assert_eq!(db.queries_of("user_skills"), 1);
    assert_eq!(db.queries_of("skills"), 1);
}

#[test]
fn test_include_all_matches_explicit_tree() {
    let db = Arc::new(Database::seeded());
    let repo = repository(&db);
    let ctx = context();

    let alice = repo.user().find_by_id(&ctx, 1).unwrap().unwrap();
    let all = alice
        .to_json_with_option(&ctx, &RenderOption::builder().include_all().build())
        .unwrap();
    let tree = alice
        .to_json_with_option(
            &ctx,
            &RenderOption::builder().include_with("user_skills", |b| b.include("skill")).build(),
        )
        .unwrap();
    assert_eq!(String::from_utf8_lossy(&all), String::from_utf8_lossy(&tree));
    assert_eq!(alice.to_json(&ctx).unwrap(), all);

    let json: kiln::serde_json::Value = kiln::serde_json::from_slice(&all).unwrap();
    assert_eq!(json["name"], "alice");
    assert_eq!(json["avatar"]["hue"], "teal");
    assert_eq!(json["userSkills"][1]["skill"]["name"], "sql");

    let without = alice
        .to_json_with_option(&ctx, &RenderOption::builder().except(["avatar"]).build())
        .unwrap();
    let json: kiln::serde_json::Value = kiln::serde_json::from_slice(&without).unwrap();
    assert!(json.get("avatar").is_none());
    assert!(json.get("userSkills").is_none());
}

#[test]
fn test_byte_columns_render_as_json() {
    let db = Arc::new(Database::seeded());
    let repo = repository(&db);
    let ctx = context();

    let users = repo.user().find_all(&ctx).unwrap();
    let json: kiln::serde_json::Value = kiln::serde_json::from_slice(&users.to_json(&ctx).unwrap()).unwrap();
    assert_eq!(json[1]["avatar"], "png");
    assert!(json[2]["avatar"].is_null());
}

#[test]
fn test_nullable_key_finds_null_rows() {
    let db = Arc::new(Database::seeded());
    let repo = repository(&db);
    let ctx = context();

    let anonymous = repo.user().find_by_nick(&ctx, &None).unwrap();
    assert_eq!(anonymous.ids(), vec![2, 3]);
    let (sql, args) = db.last_query();
    assert!(sql.ends_with("WHERE `nick` IS NULL"), "{sql}");
    assert!(args.is_empty());

    let nicked = repo.user().find_by_nick(&ctx, &Some("d".to_string())).unwrap();
    assert_eq!(nicked.ids(), vec![4]);
    assert_eq!(db.last_query().1, vec![Value::String("d".into())]);
}

#[test]
fn test_composite_key_lookup() {
    let db = Arc::new(Database::seeded());
    let repo = repository(&db);
    let ctx = context();

    let owned = repo.user_skill().find_by_user_id_and_skill_id(&ctx, 1, 101).unwrap().unwrap();
    assert_eq!(owned.id, 11);
    assert!(owned.is_owned_by(1));
    assert!(repo.user_skill().find_by_user_id_and_skill_id(&ctx, 2, 101).unwrap().is_none());
    let (sql, _) = db.last_query();
    assert!(sql.ends_with("WHERE `user_id` = ? AND `skill_id` = ?"), "{sql}");
}

#[test]
fn test_user_scoped_entity_reads_only_its_owner() {
    let db = Arc::new(Database::seeded());
    let repo = repository(&db);
    let ctx = context();

    let owned = repo.user_skill().find_all(&ctx).unwrap();
    assert_eq!(owned.ids(), vec![10, 11]);
    assert_eq!(db.last_query().1, vec![Value::Uint(OWNER)]);
    assert_eq!(repo.user_skill().count(&ctx).unwrap(), 2);
    assert_eq!(repo.user().count(&ctx).unwrap(), 4);
}

#[test]
fn test_cached_entity_reads_once_until_written() {
    let db = Arc::new(Database::seeded());
    let repo = repository(&db);
    let ctx = context();

    let rust = repo.skill().find_by_id(&ctx, 100).unwrap().unwrap();
    let again = repo.skill().find_by_id(&ctx, 100).unwrap().unwrap();
    assert_eq!(rust.name, again.name);
    assert_eq!(db.queries_of("skills"), 1);

    rust.delete(&ctx).unwrap();
    assert!(db.execs()[0].0.starts_with("DELETE FROM `skills`"));
    repo.skill().find_by_id(&ctx, 100).unwrap();
    assert_eq!(db.queries_of("skills"), 2);
    assert_eq!(entity::Skill::cache_table(), "skills");
}

#[test]
fn test_factories_build_related_models() {
    let ctx = Context::new();
    let alice = factory::alice();
    assert_eq!(alice.name, "alice");
    assert_eq!(alice.nick.as_deref(), Some("al"));
    assert_eq!(alice.created_at, time(1_767_323_045));
    assert_eq!(alice.updated_at, time(1_767_323_045));

    let owned = alice.user_skills(&ctx).unwrap();
    assert_eq!(owned.skill_ids(), vec![100, 101]);
    assert_eq!(owned.at(1).unwrap().skill(&ctx).unwrap().unwrap().name, "sql");

    assert_eq!(factory::default_user().id, 0);
    assert_eq!(factory::default_users().len(), 1);
    assert!(factory::default_user().user_skills(&ctx).is_err());
}

#[test]
fn test_mock_matches_expectations_out_of_order() {
    let ctx = Context::new();
    let mock = UserRepositoryMock::new();
    let alice = factory::alice();
    let mut bob = factory::default_user();
    bob.id = 2;
    bob.name = "bob".into();

    mock.expect().find_by_id(1).returns(Some(alice.clone()));
    mock.expect().find_by_id(2).returns(Some(bob.clone()));
    mock.expect()
        .find_by_ids(&[1, 2])
        .returns(model::Users::new(vec![alice.clone(), bob.clone()]));

    let repo: &dyn UserRepository = &mock;
    assert_eq!(repo.find_by_id(&ctx, 2).unwrap().unwrap().name, "bob");
    assert_eq!(repo.find_by_id(&ctx, 1).unwrap().unwrap().name, "alice");
    assert_eq!(repo.find_by_ids(&ctx, &[2, 1]).unwrap().len(), 2);
    mock.verify().unwrap();

    assert!(repo.find_by_id(&ctx, 1).is_err());
}

#[test]
fn test_mock_reports_missing_calls() {
    let mock = UserRepositoryMock::new();
    mock.expect().find_by_id(1).returns(None);
    mock.expect().find_by_ids(&[1, 2]).ordered().returns(model::Users::new(Vec::new()));

    let repo: &dyn UserRepository = &mock;
    assert!(repo.find_by_ids(&Context::new(), &[2, 1]).is_err());
    assert!(mock.verify().is_err());
}
