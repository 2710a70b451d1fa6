use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod mock_value;

/// Implement `kiln::ToValue` for a struct so its values take part in mock argument matching.
///
/// The struct becomes `Value::Struct` named after the type, with one field per struct field in
/// declaration order. Tuple fields are named by position.
///
/// Field attributes:
/// - `#[mock_value(skip)]` leaves the field out of matching.
/// - `#[mock_value(rename = "other")]` reports the field under another name.
///
/// ```ignore
/// #[derive(kiln::MockValue)]
/// struct User {
///     id: u64,
///     #[mock_value(skip)]
///     loaded_at: Option<chrono::DateTime<chrono::Utc>>,
/// }
/// ```
#[proc_macro_derive(MockValue, attributes(mock_value))]
pub fn derive_mock_value(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match mock_value::expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}
