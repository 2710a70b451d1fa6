use kiln::render::ObjectWriter;
use kiln::{BeforeRender, Context, RenderOption, RenderOptionBuilder, Result, ToJson, ToJsonWithOption};

#[derive(Debug, Clone)]
struct Skill {
    id: u64,
    name: String,
}

impl BeforeRender for Skill {}

impl ToJson for Skill {
    fn to_json(&self, ctx: &Context) -> Result<Vec<u8>> {
        self.to_json_with_option(ctx, &RenderOption::default())
    }
}

impl ToJsonWithOption for Skill {
    fn to_json_with_option(&self, ctx: &Context, option: &RenderOption) -> Result<Vec<u8>> {
        kiln::render::before_render(self, ctx)?;
        let mut w = ObjectWriter::new();
        if option.exists("id") {
            w.uint("id", self.id);
        }
        if option.exists("name") {
            w.string("name", &self.name);
        }
        Ok(w.finish())
    }
}

#[derive(Debug, Clone)]
struct User {
    id: u64,
    skills: Vec<Skill>,
    main: Option<Skill>,
}

impl ToJsonWithOption for User {
    fn to_json_with_option(&self, ctx: &Context, option: &RenderOption) -> Result<Vec<u8>> {
        let mut w = ObjectWriter::new();
        if option.exists("id") {
            w.uint("id", self.id);
        }
        if let Some(nested) = option.include_option("skills") {
            w.nested("skills", &self.skills.to_json_with_option(ctx, nested)?);
        }
        if let Some(nested) = option.include_option("main") {
            w.nested("main", &self.main.to_json_with_option(ctx, nested)?);
        }
        Ok(w.finish())
    }
}

fn text(bytes: Vec<u8>) -> String {
    String::from_utf8(bytes).unwrap()
}

fn user() -> User {
    User {
        id: 1,
        skills: vec![
            Skill { id: 10, name: "rust".into() },
            Skill { id: 11, name: "sql".into() },
        ],
        main: None,
    }
}

#[test]
fn test_plain_fields_only_without_includes() {
    let ctx = Context::new();
    let out = user().to_json_with_option(&ctx, &RenderOption::default()).unwrap();
    assert_eq!(text(out), r#"{"id":1}"#);
}

#[test]
fn test_nested_selection() {
    let ctx = Context::new();
    let option = RenderOptionBuilder::new()
        .include_with("skills", |b| b.only(["name"]))
        .include("main")
        .build();
    let out = user().to_json_with_option(&ctx, &option).unwrap();
    assert_eq!(text(out), r#"{"id":1,"skills":[{"name":"rust"},{"name":"sql"}],"main":null}"#);
}

#[test]
fn test_everything_excluded_is_empty_object() {
    let ctx = Context::new();
    let option = RenderOptionBuilder::new().except(["id"]).build();
    assert_eq!(text(user().to_json_with_option(&ctx, &option).unwrap()), "{}");
}

#[test]
fn test_plain_render_of_collections() {
    let ctx = Context::new();
    assert_eq!(
        text(user().skills.to_json(&ctx).unwrap()),
        r#"[{"id":10,"name":"rust"},{"id":11,"name":"sql"}]"#
    );
    let none: Option<Skill> = None;
    assert_eq!(text(none.to_json(&ctx).unwrap()), "null");
}
