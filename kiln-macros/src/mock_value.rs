use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Error, Fields, GenericParam, Index, LitStr, Result, parse_quote};

struct FieldAttrs {
    skip: bool,
    rename: Option<String>,
}

fn field_attrs(field: &syn::Field) -> Result<FieldAttrs> {
    let mut attrs = FieldAttrs { skip: false, rename: None };
    for attr in &field.attrs {
        if !attr.path().is_ident("mock_value") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                attrs.skip = true;
                Ok(())
            } else if meta.path.is_ident("rename") {
                let value: LitStr = meta.value()?.parse()?;
                attrs.rename = Some(value.value());
                Ok(())
            } else {
                Err(meta.error("unsupported mock_value attribute, expected `skip` or `rename`"))
            }
        })?;
    }
    if attrs.skip && attrs.rename.is_some() {
        return Err(Error::new_spanned(
            field.ident.as_ref().map_or_else(|| quote!(#field), |ident| quote!(#ident)),
            "a skipped field cannot be renamed",
        ));
    }
    Ok(attrs)
}

pub fn expand(input: &DeriveInput) -> Result<TokenStream> {
    let fields = match &input.data {
        Data::Struct(data) => &data.fields,
        Data::Enum(data) => {
            return Err(Error::new(data.enum_token.span, "MockValue can only be derived for structs"));
        }
        Data::Union(data) => {
            return Err(Error::new(data.union_token.span, "MockValue can only be derived for structs"));
        }
    };

    let mut entries = Vec::new();
    for (position, field) in fields.iter().enumerate() {
        let attrs = field_attrs(field)?;
        if attrs.skip {
            continue;
        }
        let (name, access) = match (&field.ident, &fields) {
            (Some(ident), Fields::Named(_)) => (ident.to_string(), quote!(#ident)),
            _ => {
                let index = Index::from(position);
                (position.to_string(), quote!(#index))
            }
        };
        let name = attrs.rename.unwrap_or(name);
        entries.push(quote! {
            (::std::string::String::from(#name), ::kiln::ToValue::to_value(&self.#access))
        });
    }

    let mut generics = input.generics.clone();
    for param in &mut generics.params {
        if let GenericParam::Type(ty) = param {
            ty.bounds.push(parse_quote!(::kiln::ToValue));
        }
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
    let ident = &input.ident;
    let type_name = ident.to_string();

    Ok(quote! {
        impl #impl_generics ::kiln::ToValue for #ident #ty_generics #where_clause {
            fn to_value(&self) -> ::kiln::Value {
                ::kiln::Value::Struct {
                    name: ::std::string::String::from(#type_name),
                    fields: ::std::vec![#(#entries),*],
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expand_str(code: &str) -> Result<String> {
        let input: DeriveInput = syn::parse_str(code)?;
        expand(&input).map(|tokens| tokens.to_string())
    }

    #[test]
    fn test_named_fields_in_order() {
        let out = expand_str("struct User { id: u64, #[mock_value(rename = \"mail\")] email: String }").unwrap();
        assert!(out.contains("impl :: kiln :: ToValue for User"), "{out}");
        let id = out.find("\"id\"").unwrap();
        let mail = out.find("\"mail\"").unwrap();
        assert!(id < mail, "{out}");
        assert!(!out.contains("\"email\""), "{out}");
    }

    #[test]
    fn test_skip_and_tuple_fields() {
        let out = expand_str("struct Pair(u64, #[mock_value(skip)] String, bool);").unwrap();
        assert!(out.contains("\"0\""), "{out}");
        assert!(!out.contains("\"1\""), "{out}");
        assert!(out.contains("\"2\""), "{out}");
        assert!(out.contains("self . 2"), "{out}");
    }

    #[test]
    fn test_type_params_get_bound() {
        let out = expand_str("struct Wrapper<T> { inner: T }").unwrap();
        assert!(out.contains("impl < T : :: kiln :: ToValue >"), "{out}");
    }

    #[test]
    fn test_rejects_enums_and_conflicting_attrs() {
        let err = expand_str("enum Shape { Circle }").unwrap_err();
        assert_eq!(err.to_string(), "MockValue can only be derived for structs");
        let err = expand_str("struct A { #[mock_value(skip, rename = \"b\")] a: u8 }").unwrap_err();
        assert_eq!(err.to_string(), "a skipped field cannot be renamed");
    }
}
