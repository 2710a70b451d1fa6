use kiln::MockValue;

#[derive(MockValue)]
enum Shape {
    Circle,
    Square,
}

fn main() {}
