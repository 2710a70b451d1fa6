//! API adapters generated from endpoint definitions.
//!
//! Each endpoint yields a request struct with a builder that reads its parameters from a
//! `::kiln::api::RawRequest`, and a response struct with a builder that renders it once through the
//! option-driven JSON renderer. The render option is derived from the endpoint's include tree.

use std::collections::HashSet;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::render::{self, JsonRenderer};
use super::{GENERATED_HEADER, Layout, Plans, types};
use crate::entity::{Member, Name, PrimitiveKind, RenderMeta, TypeRef};
use crate::error::{Error, Result};
use crate::ir::{
    Attribute, Expr, Field, FnDecl, ImplDef, Item, Module, Pat, Receiver, Stmt, StructDef, Type, Visibility,
};

/// One HTTP endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Endpoint {
    pub name: Name,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    pub method: String,
    pub uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request: Option<Request>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<Response>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Request {
    #[serde(default)]
    pub params: Vec<RequestParam>,
}

/// Where a request parameter is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamIn {
    /// The `X-<CamelName>` header.
    Header,
    /// Set on the builder by the router.
    Path,
    Query,
    /// A field of a JSON object body.
    Body,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestParam {
    pub name: Name,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    #[serde(rename = "in")]
    pub location: ParamIn,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub render: Option<RenderMeta>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
}

impl RequestParam {
    /// Query and body key of the parameter.
    pub fn render_name(&self) -> String {
        self.render
            .as_ref()
            .and_then(|r| r.default_name.clone())
            .unwrap_or_else(|| self.name.lower_camel())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    #[serde(rename = "type")]
    pub ty: ResponseClass,
    /// Helper types local to this response.
    #[serde(default)]
    pub subtypes: Vec<ResponseClass>,
}

/// A response struct: its members plus the relations it includes when rendered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseClass {
    #[serde(default)]
    pub name: Name,
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(default)]
    pub include: Vec<Include>,
    #[serde(default)]
    pub include_all: bool,
}

/// Selection applied to one included member, recursively.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Include {
    pub name: Name,
    #[serde(default)]
    pub only: Vec<Name>,
    #[serde(default)]
    pub except: Vec<Name>,
    #[serde(default)]
    pub include: Vec<Include>,
}

#[derive(Deserialize)]
struct EndpointFile {
    #[serde(default)]
    endpoint: Vec<Endpoint>,
}

/// Parse an endpoint file: a list of `[[endpoint]]` tables.
pub fn parse(text: &str) -> Result<Vec<Endpoint>> {
    let file: EndpointFile =
        toml::from_str(text).map_err(|e| Error::config(format!("cannot read endpoints: {e}")))?;
    Ok(file.endpoint)
}

fn param_type(endpoint: &str, param: &RequestParam) -> Result<Type> {
    match &param.ty {
        TypeRef::Primitive(kind) if *kind != PrimitiveKind::Time => Ok(types::kind_type(*kind)),
        _ => Err(Error::definition(
            endpoint,
            format!("parameter '{}' must have a scalar type other than time", param.name),
        )),
    }
}

/// Field type of a response member: a scalar, a local subtype or a model.
fn member_type(endpoint: &str, response: &Response, plans: &Plans, member: &Member) -> Result<Type> {
    if member.relation.is_some() {
        return Err(Error::definition(
            endpoint,
            format!("response member '{}' cannot be a relation", member.name),
        ));
    }
    let Some(TypeRef::Class(target)) = &member.ty else {
        if member.ty.is_none() {
            return Err(Error::definition(endpoint, format!("response member '{}' has no type", member.name)));
        }
        return types::member_type(endpoint, member);
    };
    if response.subtypes.iter().any(|s| s.name.snake() == target.snake()) {
        let sub = Type::path(&target.camel());
        return Ok(if member.has_many { sub.vec() } else { sub.option() });
    }
    let plan = plans.get(target).map_err(|_| Error::Reference {
        entity: endpoint.to_string(),
        member: member.name.snake(),
        target: target.snake(),
    })?;
    Ok(if member.has_many {
        plan.layer_collection("model")
    } else {
        plan.layer_type("model").option()
    })
}

fn check_includes(endpoint: &str, class: &ResponseClass) -> Result<()> {
    for include in &class.include {
        if !class.members.iter().any(|m| m.name.snake() == include.name.snake()) {
            return Err(Error::definition(
                endpoint,
                format!("include '{}' names no member of the response", include.name),
            ));
        }
    }
    Ok(())
}

/// Validate every endpoint against the planned entities.
pub fn check(endpoints: &[Endpoint], plans: &Plans) -> Result<()> {
    let mut names = HashSet::new();
    let mut subtypes = HashSet::new();
    for endpoint in endpoints {
        let name = endpoint.name.snake();
        if endpoint.name.is_empty() {
            return Err(Error::definition(&endpoint.uri, "endpoint name is required"));
        }
        if !names.insert(name.clone()) {
            return Err(Error::definition(&name, "endpoint is declared twice"));
        }
        if let Some(request) = &endpoint.request {
            for param in &request.params {
                param_type(&name, param)?;
            }
        }
        let Some(response) = &endpoint.response else {
            continue;
        };
        if response.ty.members.is_empty() {
            return Err(Error::definition(&name, "response type declares no members"));
        }
        for sub in &response.subtypes {
            let sub_name = sub.name.snake();
            if sub.name.is_empty() || sub_name == name {
                return Err(Error::definition(&name, format!("subtype '{sub_name}' needs its own name")));
            }
            if !subtypes.insert(sub_name.clone()) {
                return Err(Error::definition(&name, format!("subtype '{sub_name}' is declared twice")));
            }
        }
        for class in std::iter::once(&response.ty).chain(&response.subtypes) {
            for member in &class.members {
                member_type(&name, response, plans, member)?;
            }
            check_includes(&name, class)?;
        }
    }
    Ok(())
}

fn derives(names: &[&str]) -> Vec<Attribute> {
    vec![Attribute::derive(names)]
}

fn setter(field: &str, param: Type, value: Expr) -> FnDecl {
    FnDecl::new(&format!("set_{field}"))
        .public()
        .receiver(Receiver::RefMut)
        .param("value", param)
        .returns(Type::SelfType.reference_mut())
        .body(vec![Expr::self_().field(field).assign(value).stmt(), Expr::self_().tail()])
}

fn request_module(endpoint: &Endpoint, request: &Request) -> Result<Module> {
    let entity = endpoint.name.snake();
    let camel = endpoint.name.camel();
    let builder = format!("{camel}Builder");
    let mut module = Module::new(format!(
        "{GENERATED_HEADER}\n\nRequest of `{} {}`.",
        endpoint.method.to_uppercase(),
        endpoint.uri
    ));

    let mut fields = Vec::new();
    let mut builder_fields = Vec::new();
    let mut setters = Vec::new();
    let mut build = vec![Stmt::let_mut("out", Expr::call(&format!("{camel}::default"), vec![]))];
    let assign = |field: &str| vec![Expr::ident("out").field(field).assign(Expr::ident("v")).stmt()];
    let read = |method: &str, key: String, field: &str| {
        Expr::if_let(
            Pat::some(Pat::ident("v")),
            Expr::ident("req").method(method, vec![Expr::str(key)]).try_(),
            assign(field),
        )
        .stmt()
    };
    for param in &request.params {
        let field = param.name.snake();
        let ty = param_type(&entity, param)?;
        let mut declared = Field::new(&field, ty.clone()).public();
        if let Some(desc) = &param.desc {
            declared = declared.doc(desc.clone());
        }
        fields.push(declared);
        match param.location {
            ParamIn::Header => build.push(read("header_param", format!("X-{}", param.name.camel()), &field)),
            ParamIn::Query => build.push(read("query_param", param.render_name(), &field)),
            ParamIn::Body => build.push(read("body_param", param.render_name(), &field)),
            ParamIn::Path => {
                builder_fields.push(Field::new(&field, ty.clone().option()));
                setters.push(setter(&field, ty, Expr::some(Expr::ident("value"))));
                let copy = matches!(param.ty, TypeRef::Primitive(kind) if kind.is_copy());
                let held = if copy {
                    Expr::self_().field(&field)
                } else {
                    Expr::self_().field(&field).method("clone", vec![])
                };
                if param.required {
                    let missing = Expr::call(
                        "::kiln::Error::invalid_request",
                        vec![Expr::str(format!("{field} is required but was not set on the builder"))],
                    );
                    build.push(
                        Expr::ident("out")
                            .field(&field)
                            .assign(held.method("ok_or_else", vec![Expr::closure(vec![], missing)]).try_())
                            .stmt(),
                    );
                } else {
                    build.push(Expr::if_let(Pat::some(Pat::ident("v")), held, assign(&field)).stmt());
                }
            }
        }
    }
    build.push(Expr::ok(Expr::ident("out")).tail());
    if request.params.is_empty() {
        build[0] = Stmt::let_("out", Expr::call(&format!("{camel}::default"), vec![]));
    }
    let reads_request = request.params.iter().any(|p| p.location != ParamIn::Path);

    module.push(Item::Struct(StructDef {
        name: camel.clone(),
        vis: Visibility::Public,
        doc: endpoint.desc.clone(),
        attrs: derives(&["Debug", "Clone", "Default", "PartialEq"]),
        fields,
    }));
    module.push(Item::Struct(StructDef {
        name: builder.clone(),
        vis: Visibility::Public,
        doc: Some(format!("Builds [`{camel}`]; path parameters are set by the caller.")),
        attrs: derives(&["Debug", "Clone", "Default"]),
        fields: builder_fields,
    }));
    let build = FnDecl::new("build")
        .public()
        .receiver(Receiver::Ref)
        .param(
            if reads_request { "req" } else { "_req" },
            Type::path("::kiln::api::RawRequest").reference(),
        )
        .returns(Type::path(&camel).kiln_result())
        .body(build);
    module.push(Item::Impl(
        ImplDef::inherent(Type::path(&builder))
            .func(
                FnDecl::new("new")
                    .public()
                    .returns(Type::SelfType)
                    .body(vec![Expr::call("Self::default", vec![]).tail()]),
            )
            .funcs(setters)
            .func(build),
    ));
    Ok(module)
}

/// `b.only([..]).except([..])` plus nested includes, applied to the builder expression `base`.
fn selection(base: Expr, include: &Include) -> Expr {
    let names = |names: &[Name]| Expr::Array(names.iter().map(|n| Expr::str(n.snake())).collect());
    let mut chain = base;
    if !include.only.is_empty() {
        chain = chain.method("only", vec![names(&include.only)]);
    }
    if !include.except.is_empty() {
        chain = chain.method("except", vec![names(&include.except)]);
    }
    for nested in &include.include {
        chain = include_call(chain, nested);
    }
    chain
}

fn include_call(base: Expr, include: &Include) -> Expr {
    let name = Expr::str(include.name.snake());
    if include.only.is_empty() && include.except.is_empty() && include.include.is_empty() {
        return base.method("include", vec![name]);
    }
    base.method(
        "include_with",
        vec![name, Expr::closure(vec!["b"], selection(Expr::ident("b"), include))],
    )
}

/// Render option of a response: `include_all`, or the include tree with subtypes' own includes.
fn render_option(response: &Response) -> Expr {
    let mut chain = Expr::call("::kiln::RenderOptionBuilder::new", vec![]);
    if response.ty.include_all {
        return chain.method("include_all", vec![]).method("build", vec![]);
    }
    for include in &response.ty.include {
        let sub = response.ty.members.iter().find(|m| m.name.snake() == include.name.snake()).and_then(|member| {
            let target = member.ty.as_ref()?.class_name()?;
            response.subtypes.iter().find(|s| s.name.snake() == target.snake())
        });
        chain = match sub {
            Some(sub) if !sub.include.is_empty() => {
                let inner = sub.include.iter().fold(Expr::ident("b"), include_call);
                chain.method(
                    "include_with",
                    vec![Expr::str(include.name.snake()), Expr::closure(vec!["b"], inner)],
                )
            }
            Some(_) => chain.method("include", vec![Expr::str(include.name.snake())]),
            None => include_call(chain, include),
        };
    }
    chain.method("build", vec![])
}

fn class_fields(endpoint: &str, response: &Response, plans: &Plans, class: &ResponseClass) -> Result<Vec<Field>> {
    class
        .members
        .iter()
        .map(|member| {
            let mut field = Field::new(&member.name.snake(), member_type(endpoint, response, plans, member)?).public();
            if let Some(desc) = &member.desc {
                field = field.doc(desc.clone());
            }
            Ok(field)
        })
        .collect()
}

fn rendered_items(name: &str, members: &[Member]) -> Result<Vec<Item>> {
    let mut items = vec![Item::Impl(ImplDef::of_trait(Type::path("::kiln::BeforeRender"), Type::path(name)))];
    items.extend(render::object_impls(&JsonRenderer, name, members)?);
    Ok(items)
}

fn response_module(endpoint: &Endpoint, response: &Response, plans: &Plans, layout: &Layout) -> Result<Module> {
    let entity = endpoint.name.snake();
    let camel = endpoint.name.camel();
    let builder = format!("{camel}Builder");
    let mut module = Module::new(format!(
        "{GENERATED_HEADER}\n\nResponse of `{} {}`.",
        endpoint.method.to_uppercase(),
        endpoint.uri
    ));
    module.allow = vec!["unused_imports".into()];
    module.uses(&layout.uses(&["model"]));

    for sub in &response.subtypes {
        let sub_name = sub.name.camel();
        module.push(Item::Struct(StructDef {
            name: sub_name.clone(),
            vis: Visibility::Public,
            doc: None,
            attrs: derives(&["Debug", "Clone", "Default"]),
            fields: class_fields(&entity, response, plans, sub)?,
        }));
        for item in rendered_items(&sub_name, &sub.members)? {
            module.push(item);
        }
    }

    let fields = class_fields(&entity, response, plans, &response.ty)?;
    let mut response_fields = fields.clone();
    response_fields.push(Field::new("rendered", Type::path("u8").vec().option()));
    module.push(Item::Struct(StructDef {
        name: camel.clone(),
        vis: Visibility::Public,
        doc: endpoint.desc.clone(),
        attrs: derives(&["Debug", "Clone", "Default"]),
        fields: response_fields,
    }));
    for item in rendered_items(&camel, &response.ty.members)? {
        module.push(item);
    }
    let not_built = Expr::call(
        "::kiln::Error::render",
        vec![Expr::str("response object must be created by its builder")],
    );
    module.push(Item::Impl(
        ImplDef::inherent(Type::path(&camel)).func(
            FnDecl::new("rendered")
                .public()
                .doc("JSON rendered by the builder.")
                .receiver(Receiver::Ref)
                .returns(Type::path("u8").slice().reference().kiln_result())
                .body(vec![
                    Expr::self_()
                        .field("rendered")
                        .method("as_deref", vec![])
                        .method("ok_or_else", vec![Expr::closure(vec![], not_built)])
                        .tail(),
                ]),
        ),
    ));

    let mut builder_fields = Vec::new();
    let mut setters = Vec::new();
    let mut copied = Vec::new();
    for (field, member) in fields.iter().zip(&response.ty.members) {
        builder_fields.push(Field::new(&field.name, field.ty.clone()));
        let single_class = matches!(member.ty, Some(TypeRef::Class(_))) && !member.has_many;
        setters.push(match (&field.ty, single_class) {
            (Type::Path(path), true) => {
                let inner = path.generics.first().cloned().unwrap_or_else(|| field.ty.clone());
                setter(&field.name, inner, Expr::some(Expr::ident("value")))
            }
            _ => setter(&field.name, field.ty.clone(), Expr::ident("value")),
        });
        copied.push((field.name.clone(), Expr::self_().field(&field.name).method("clone", vec![])));
    }
    copied.push(("rendered".to_string(), Expr::none()));

    let build = FnDecl::new("build")
        .public()
        .doc("Render the response once; the bytes are kept on it.")
        .receiver(Receiver::Ref)
        .param("ctx", Type::path("::kiln::Context").reference())
        .returns(Type::path(&camel).kiln_result())
        .body(vec![
            Stmt::let_mut(
                "res",
                Expr::Struct {
                    path: crate::ir::Path::parse(&camel),
                    fields: copied,
                    rest: None,
                },
            ),
            Stmt::let_("option", render_option(response)),
            Stmt::let_(
                "bytes",
                Expr::call(
                    "::kiln::ToJsonWithOption::to_json_with_option",
                    vec![
                        Expr::ident("res").reference(),
                        Expr::ident("ctx"),
                        Expr::ident("option").reference(),
                    ],
                )
                .method(
                    "map_err",
                    vec![Expr::closure(
                        vec!["e"],
                        Expr::ident("e").method("wrap", vec![Expr::str("failed to render json")]),
                    )],
                )
                .try_(),
            ),
            Expr::ident("res")
                .field("rendered")
                .assign(Expr::some(Expr::ident("bytes")))
                .stmt(),
            Expr::ok(Expr::ident("res")).tail(),
        ]);
    module.push(Item::Struct(StructDef {
        name: builder.clone(),
        vis: Visibility::Public,
        doc: None,
        attrs: derives(&["Default"]),
        fields: builder_fields,
    }));
    module.push(Item::Impl(
        ImplDef::inherent(Type::path(&builder))
            .func(
                FnDecl::new("new")
                    .public()
                    .returns(Type::SelfType)
                    .body(vec![Expr::call("Self::default", vec![]).tail()]),
            )
            .funcs(setters)
            .func(build),
    ));
    Ok(module)
}

fn index_module(entries: &[(String, Vec<String>)]) -> Module {
    let mut module = Module::new(GENERATED_HEADER);
    for (snake, _) in entries {
        module.push(Item::Mod {
            vis: Visibility::Private,
            name: snake.clone(),
        });
    }
    for (snake, names) in entries {
        module.push(Item::Use {
            vis: Visibility::Public,
            tree: format!("{snake}::{{{}}}", names.join(", ")),
        });
    }
    module
}

/// Request and response modules of every endpoint, with their `mod.rs` files.
pub fn generate(endpoints: &[Endpoint], plans: &Plans, layout: &Layout) -> Result<Vec<(PathBuf, Module)>> {
    check(endpoints, plans)?;
    let mut files = Vec::new();
    let mut requests = Vec::new();
    let mut responses = Vec::new();
    for endpoint in endpoints {
        let snake = endpoint.name.snake();
        let camel = endpoint.name.camel();
        let file = format!("{snake}.rs");
        if let Some(request) = &endpoint.request {
            let module = request_module(endpoint, request).map_err(|e| e.during("request"))?;
            files.push((PathBuf::from("api").join("request").join(&file), module));
            requests.push((snake.clone(), vec![camel.clone(), format!("{camel}Builder")]));
        }
        if let Some(response) = &endpoint.response {
            let module = response_module(endpoint, response, plans, layout).map_err(|e| e.during("response"))?;
            files.push((PathBuf::from("api").join("response").join(&file), module));
            let mut names = vec![camel.clone(), format!("{camel}Builder")];
            names.extend(response.subtypes.iter().map(|s| s.name.camel()));
            responses.push((snake, names));
        }
    }
    files.push((PathBuf::from("api").join("request").join("mod.rs"), index_module(&requests)));
    files.push((PathBuf::from("api").join("response").join("mod.rs"), index_module(&responses)));
    let mut root = Module::new(GENERATED_HEADER);
    for name in ["request", "response"] {
        root.push(Item::Mod {
            vis: Visibility::Public,
            name: name.into(),
        });
    }
    files.push((PathBuf::from("api").join("mod.rs"), root));
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Class;
    use crate::generate::Generator;
    use crate::ir::RustPrinter;
    use crate::plugin::PluginRegistry;

    const ENDPOINTS: &str = r#"
[[endpoint]]
name = "get_user"
desc = "A user with their skills."
method = "get"
uri = "/users/{user_id}"

[[endpoint.request.params]]
name = "user_id"
type = "u64"
in = "path"
required = true

[[endpoint.request.params]]
name = "session"
type = "string"
in = "header"

[[endpoint.request.params]]
name = "verbose"
type = "bool"
in = "query"

[endpoint.response.type]
members = [
    { name = "user", type = "user" },
    { name = "profile", type = "profile" },
    { name = "count", type = "i64" },
]
include = [{ name = "user", only = ["id", "name"] }, { name = "profile" }]

[[endpoint.response.subtypes]]
name = "profile"
members = [{ name = "bio", type = "string" }, { name = "owner", type = "user" }]
include = [{ name = "owner", except = ["name"] }]
"#;

    fn user() -> Class {
        let mut class = Class::new("user");
        class.members = vec![
            Member::new("id", TypeRef::parse("u64")),
            Member::new("name", TypeRef::parse("string")),
        ];
        class.index.primary_key = Some(Name::new("id"));
        class
    }

    fn plans(registry: &PluginRegistry) -> Plans {
        Generator::new(registry).plan(vec![user()]).unwrap()
    }

    fn generated(endpoints: &[Endpoint]) -> Vec<(String, String)> {
        let registry = PluginRegistry::with_defaults();
        generate(endpoints, &plans(&registry), &Layout::default())
            .unwrap()
            .into_iter()
            .map(|(path, module)| {
                let path = path.display().to_string();
                let out = RustPrinter::new(path.clone()).print(&module).unwrap();
                (path, out)
            })
            .collect()
    }

    fn file<'a>(files: &'a [(String, String)], path: &str) -> &'a str {
        &files.iter().find(|(p, _)| p == path).unwrap().1
    }

    #[test]
    fn test_parse_endpoint_file() {
        let endpoints = parse(ENDPOINTS).unwrap();
        assert_eq!(endpoints.len(), 1);
        let request = endpoints[0].request.as_ref().unwrap();
        assert_eq!(request.params[0].location, ParamIn::Path);
        assert!(request.params[0].required);
        assert_eq!(request.params[2].render_name(), "verbose");
        let response = endpoints[0].response.as_ref().unwrap();
        assert_eq!(response.ty.include[0].only, vec![Name::new("id"), Name::new("name")]);
        assert_eq!(response.subtypes[0].name, Name::new("profile"));
    }

    #[test]
    fn test_request_reads_each_location() {
        let files = generated(&parse(ENDPOINTS).unwrap());
        let out = file(&files, "api/request/get_user.rs");
        assert!(out.contains("pub struct GetUserBuilder {"), "{out}");
        assert!(out.contains("pub fn set_user_id(&mut self, value: u64) -> &mut Self {"), "{out}");
        assert!(out.contains("user_id is required but was not set on the builder"), "{out}");
        assert!(out.contains(r#"if let Some(v) = req.header_param("X-Session")? {"#), "{out}");
        assert!(out.contains(r#"if let Some(v) = req.query_param("verbose")? {"#), "{out}");
        assert!(out.contains("pub session: String,"), "{out}");
    }

    #[test]
    fn test_request_without_request_reads_binds_nothing_unused() {
        let mut endpoints = parse(ENDPOINTS).unwrap();
        let request = endpoints[0].request.as_mut().unwrap();
        request.params.retain(|p| p.location == ParamIn::Path);
        let files = generated(&endpoints);
        let out = file(&files, "api/request/get_user.rs");
        assert!(out.contains("_req: &::kiln::api::RawRequest"), "{out}");
        assert!(out.contains("let mut out = GetUser::default();"), "{out}");

        endpoints[0].request.as_mut().unwrap().params.clear();
        let files = generated(&endpoints);
        let out = file(&files, "api/request/get_user.rs");
        assert!(out.contains("let out = GetUser::default();"), "{out}");

        let files = generated(&parse(ENDPOINTS).unwrap());
        let out = file(&files, "api/request/get_user.rs");
        assert!(out.contains("req: &::kiln::api::RawRequest") && !out.contains("_req"), "{out}");
    }

    #[test]
    fn test_response_renders_through_include_tree() {
        let files = generated(&parse(ENDPOINTS).unwrap());
        let out = file(&files, "api/response/get_user.rs");
        assert!(out.contains("pub user: Option<model::User>,"), "{out}");
        assert!(out.contains("pub profile: Option<Profile>,"), "{out}");
        assert!(out.contains("rendered: Option<Vec<u8>>,"), "{out}");
        assert!(out.contains("impl ::kiln::ToJsonWithOption for Profile {"), "{out}");
        assert!(out.contains(r#"b.only(["id", "name"])"#), "{out}");
        assert!(out.contains(r#""owner""#), "{out}");
        assert!(out.contains(r#"b.except(["name"])"#), "{out}");
        assert!(out.contains("pub fn set_user(&mut self, value: model::User) -> &mut Self {"), "{out}");
        assert!(out.contains("response object must be created by its builder"), "{out}");
    }

    #[test]
    fn test_include_all_short_circuits() {
        let mut endpoints = parse(ENDPOINTS).unwrap();
        endpoints[0].response.as_mut().unwrap().ty.include_all = true;
        let files = generated(&endpoints);
        let out = file(&files, "api/response/get_user.rs");
        assert!(out.contains("::kiln::RenderOptionBuilder::new().include_all().build()"), "{out}");
        assert!(!out.contains("include_with"), "{out}");
    }

    #[test]
    fn test_index_modules() {
        let files = generated(&parse(ENDPOINTS).unwrap());
        assert!(file(&files, "api/response/mod.rs").contains("pub use get_user::{GetUser, GetUserBuilder, Profile};"));
        assert!(file(&files, "api/mod.rs").contains("pub mod request;"));
    }

    #[test]
    fn test_check_rejects_bad_endpoints() {
        let registry = PluginRegistry::with_defaults();
        let plans = plans(&registry);

        let mut endpoints = parse(ENDPOINTS).unwrap();
        endpoints.push(endpoints[0].clone());
        assert!(matches!(check(&endpoints, &plans), Err(Error::Definition { .. })));

        let mut endpoints = parse(ENDPOINTS).unwrap();
        endpoints[0].response.as_mut().unwrap().ty.members[0].ty = Some(TypeRef::parse("account"));
        assert!(matches!(check(&endpoints, &plans), Err(Error::Reference { .. })));

        let mut endpoints = parse(ENDPOINTS).unwrap();
        endpoints[0].request.as_mut().unwrap().params[1].ty = TypeRef::parse("time");
        assert!(check(&endpoints, &plans).is_err());

        let mut endpoints = parse(ENDPOINTS).unwrap();
        endpoints[0].response.as_mut().unwrap().ty.include[0].name = Name::new("missing");
        assert!(check(&endpoints, &plans).is_err());
    }
}
