//! Procedural macros for tui-store

use darling::{FromDeriveInput, FromVariant};
use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, DeriveInput};

/// Container-level attributes for #[derive(Action)]
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(action), supports(enum_any))]
struct ActionOpts {
    ident: syn::Ident,
    data: darling::ast::Data<ActionVariant, ()>,

    /// Naming convention applied to every variant without an explicit name
    #[darling(default)]
    rename_all: Option<String>,
}

/// Variant-level attributes
#[derive(Debug, FromVariant)]
#[darling(attributes(action))]
struct ActionVariant {
    ident: syn::Ident,
    fields: darling::ast::Fields<()>,

    /// Explicit action kind
    #[darling(default)]
    name: Option<String>,
}

/// Supported `rename_all` conventions
#[derive(Debug, Clone, Copy)]
enum RenameRule {
    Snake,
    ScreamingSnake,
    Kebab,
}

impl RenameRule {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "snake_case" => Some(Self::Snake),
            "SCREAMING_SNAKE_CASE" => Some(Self::ScreamingSnake),
            "kebab-case" => Some(Self::Kebab),
            _ => None,
        }
    }

    fn apply(self, variant: &str) -> String {
        let snake = to_snake_case(variant);
        match self {
            Self::Snake => snake,
            Self::ScreamingSnake => snake.to_uppercase(),
            Self::Kebab => snake.replace('_', "-"),
        }
    }
}

/// Convert PascalCase to snake_case
fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    for (i, ch) in s.chars().enumerate() {
        if ch.is_uppercase() {
            if i > 0 {
                result.push('_');
            }
            result.extend(ch.to_lowercase());
        } else {
            result.push(ch);
        }
    }
    result
}

/// Derive macro for the Action trait
///
/// Generates a `name()` method returning the action kind. The kind defaults
/// to the variant name and can be changed for the whole enum with
/// `#[action(rename_all = "...")]` (`snake_case`, `SCREAMING_SNAKE_CASE`,
/// `kebab-case`) or per variant with `#[action(name = "...")]`.
///
/// # Example
/// ```ignore
/// #[derive(Action, Clone, Debug)]
/// #[action(rename_all = "SCREAMING_SNAKE_CASE")]
/// enum TodoAction {
///     AddItem(String),
///     #[action(name = "@@UNKNOWN")]
///     Unrecognized,
/// }
///
/// assert_eq!(TodoAction::AddItem("x".into()).name(), "ADD_ITEM");
/// assert_eq!(TodoAction::Unrecognized.name(), "@@UNKNOWN");
/// ```
#[proc_macro_derive(Action, attributes(action))]
pub fn derive_action(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let opts = match ActionOpts::from_derive_input(&input) {
        Ok(opts) => opts,
        Err(e) => return e.write_errors().into(),
    };

    let rule = match opts.rename_all.as_deref() {
        None => None,
        Some(s) => match RenameRule::parse(s) {
            Some(rule) => Some(rule),
            None => {
                let msg = format!(
                    "unknown rename_all rule `{s}`, expected snake_case, SCREAMING_SNAKE_CASE or kebab-case"
                );
                return syn::Error::new_spanned(&input.ident, msg)
                    .to_compile_error()
                    .into();
            }
        },
    };

    let name = &opts.ident;

    let variants = match &opts.data {
        darling::ast::Data::Enum(variants) => variants,
        _ => {
            return syn::Error::new_spanned(&input, "Action can only be derived for enums")
                .to_compile_error()
                .into();
        }
    };

    let name_arms = variants.iter().map(|v| {
        let variant_name = &v.ident;
        let kind = match (&v.name, rule) {
            (Some(explicit), _) => explicit.clone(),
            (None, Some(rule)) => rule.apply(&variant_name.to_string()),
            (None, None) => variant_name.to_string(),
        };

        match &v.fields.style {
            darling::ast::Style::Unit => quote! {
                #name::#variant_name => #kind
            },
            darling::ast::Style::Tuple => quote! {
                #name::#variant_name(..) => #kind
            },
            darling::ast::Style::Struct => quote! {
                #name::#variant_name { .. } => #kind
            },
        }
    });

    let expanded = quote! {
        impl tui_store::Action for #name {
            fn name(&self) -> &'static str {
                match self {
                    #(#name_arms),*
                }
            }
        }
    };

    TokenStream::from(expanded)
}
