use kiln::MockValue;

#[derive(MockValue)]
struct Point {
    #[mock_value(ignore)]
    x: i64,
}

fn main() {}
