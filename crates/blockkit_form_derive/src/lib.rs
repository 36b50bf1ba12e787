use proc_macro::TokenStream;
use proc_macro2::{Ident, Span, TokenStream as TokenStream2};
use proc_macro_crate::{FoundCrate, crate_name};
use quote::{format_ident, quote};
use syn::{Data, DeriveInput, Fields, LitBool, LitStr, Token, parse_macro_input};

#[proc_macro_derive(FormSchema, attributes(field))]
pub fn derive_form_schema(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(input) {
        Ok(tokens) => tokens.into(),
        Err(error) => error.to_compile_error().into(),
    }
}

fn expand(input: DeriveInput) -> syn::Result<TokenStream2> {
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            input.ident,
            "FormSchema derive currently supports only non-generic structs",
        ));
    }

    let model_ident = input.ident;
    let named_fields = match input.data {
        Data::Struct(data) => match data.fields {
            Fields::Named(fields) => fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    model_ident,
                    "FormSchema derive requires a struct with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                model_ident,
                "FormSchema derive is only supported on structs",
            ));
        }
    };

    let blockkit = blockkit_path();
    let mut specs = Vec::new();
    for field in named_fields {
        let Some(field_ident) = field.ident else {
            continue;
        };
        let attrs = FieldAttrs::parse(&field_ident, &field.attrs)?;
        specs.push(attrs.to_spec(&blockkit));
    }

    Ok(quote! {
        impl #blockkit::form::FormSchema for #model_ident {
            fn schema() -> ::std::vec::Vec<#blockkit::form::FieldSpec> {
                ::std::vec![#(#specs),*]
            }
        }
    })
}

struct FieldAttrs {
    id: String,
    kind: Ident,
    label: String,
    required: bool,
    options: Vec<(String, String)>,
    pattern: Option<String>,
    message: Option<String>,
}

impl FieldAttrs {
    fn parse(field_ident: &Ident, attrs: &[syn::Attribute]) -> syn::Result<Self> {
        let field_name = field_ident.to_string();
        let mut parsed = Self {
            label: humanize(&field_name),
            id: field_name,
            kind: format_ident!("Text"),
            required: false,
            options: Vec::new(),
            pattern: None,
            message: None,
        };

        for attr in attrs.iter().filter(|attr| attr.path().is_ident("field")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("id") {
                    parsed.id = meta.value()?.parse::<LitStr>()?.value();
                } else if meta.path.is_ident("kind") {
                    let lit = meta.value()?.parse::<LitStr>()?;
                    parsed.kind = kind_variant(&lit)?;
                } else if meta.path.is_ident("label") {
                    parsed.label = meta.value()?.parse::<LitStr>()?.value();
                } else if meta.path.is_ident("required") {
                    parsed.required = if meta.input.peek(Token![=]) {
                        meta.value()?.parse::<LitBool>()?.value
                    } else {
                        true
                    };
                } else if meta.path.is_ident("pattern") {
                    parsed.pattern = Some(meta.value()?.parse::<LitStr>()?.value());
                } else if meta.path.is_ident("message") {
                    parsed.message = Some(meta.value()?.parse::<LitStr>()?.value());
                } else if meta.path.is_ident("option") {
                    let mut label = None;
                    let mut value = None;
                    meta.parse_nested_meta(|inner| {
                        if inner.path.is_ident("label") {
                            label = Some(inner.value()?.parse::<LitStr>()?.value());
                        } else if inner.path.is_ident("value") {
                            value = Some(inner.value()?.parse::<LitStr>()?.value());
                        } else {
                            return Err(inner.error("expected `label` or `value`"));
                        }
                        Ok(())
                    })?;
                    let Some(value) = value else {
                        return Err(meta.error("option requires a `value`"));
                    };
                    let label = label.unwrap_or_else(|| value.clone());
                    parsed.options.push((label, value));
                } else {
                    return Err(meta.error("unsupported field attribute"));
                }
                Ok(())
            })?;
        }

        if parsed.message.is_some() && parsed.pattern.is_none() {
            return Err(syn::Error::new_spanned(
                field_ident,
                "`message` requires a `pattern`",
            ));
        }
        Ok(parsed)
    }

    fn to_spec(&self, blockkit: &TokenStream2) -> TokenStream2 {
        let Self {
            id,
            kind,
            label,
            required,
            options,
            pattern,
            message,
        } = self;
        let option_calls = options
            .iter()
            .map(|(label, value)| quote!(.option(#label, #value)));
        let validation = pattern.as_ref().map(|pattern| {
            let message = message
                .as_ref()
                .map(|message| quote!(.message(#message)));
            quote! {
                .validation(#blockkit::form::ValidationRule::new(#pattern) #message)
            }
        });

        quote! {
            #blockkit::form::FieldSpec::new(#id, #blockkit::form::FieldKind::#kind, #label)
                .required(#required)
                #(#option_calls)*
                #validation
        }
    }
}

fn kind_variant(lit: &LitStr) -> syn::Result<Ident> {
    let variant = match lit.value().as_str() {
        "text" => "Text",
        "email" => "Email",
        "textarea" => "Textarea",
        "select" => "Select",
        "checkbox" => "Checkbox",
        "radio" => "Radio",
        "date" => "Date",
        _ => {
            return Err(syn::Error::new(
                lit.span(),
                "expected one of: text, email, textarea, select, checkbox, radio, date",
            ));
        }
    };
    Ok(Ident::new(variant, lit.span()))
}

fn blockkit_path() -> TokenStream2 {
    match crate_name("blockkit") {
        Ok(FoundCrate::Name(name)) => {
            let ident = Ident::new(&name, Span::call_site());
            quote!(::#ident)
        }
        Ok(FoundCrate::Itself) => quote!(crate),
        Err(_) => quote!(::blockkit),
    }
}

fn humanize(input: &str) -> String {
    let words = input
        .split('_')
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    let mut chars = words.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
