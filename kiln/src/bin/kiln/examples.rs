use crate::commands::{check, generate, plugins};

#[derive(Clone, Copy)]
pub struct ExampleGroup {
    pub title: &'static str,
    pub commands: &'static [&'static str],
}

#[derive(Clone, Copy)]
pub struct CommandExample {
    pub name: &'static str,
    pub groups: &'static [ExampleGroup],
}

pub fn command_examples() -> &'static [CommandExample] {
    &[
        CommandExample {
            name: "generate",
            groups: generate::EXAMPLES,
        },
        CommandExample {
            name: "check",
            groups: check::EXAMPLES,
        },
        CommandExample {
            name: "plugins",
            groups: plugins::EXAMPLES,
        },
    ]
}
