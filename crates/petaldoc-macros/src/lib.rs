//! `#[derive(Configurable)]` for petaldoc configuration structs.
//!
//! Every named field becomes an override key equal to its name. The derive
//! generates:
//!
//! - `OVERRIDE_KEYS`, the keys accepted by `apply_override`;
//! - `apply_override(key, value)` for `--config KEY=VALUE` flags, with
//!   dotted keys (`limits.max_description_length`) descending into
//!   `#[config(nested)]` fields.
//!
//! Field options:
//!
//! - `nested`: the field is an `Option` of another `Configurable` struct;
//! - `allow_empty`: an empty value resets an `Option` field to `None`;
//! - `renamed = "new_key"`: the key still works but logs a warning;
//! - `skip`: the field can only be set from a file.
//!
//! Map fields (`IndexMap`, `BTreeMap`, `HashMap`) are always file-only.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as Tokens;
use quote::{ToTokens, quote};
use syn::{Data, DeriveInput, Field, Fields, Ident, Type, parse_macro_input};

#[derive(Default)]
struct Options {
  nested:      bool,
  allow_empty: bool,
  skip:        bool,
  renamed:     Option<String>,
}

impl Options {
  fn of(field: &Field) -> syn::Result<Self> {
    let mut options = Self::default();
    for attr in field.attrs.iter().filter(|a| a.path().is_ident("config")) {
      attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("nested") {
          options.nested = true;
        } else if meta.path.is_ident("allow_empty") {
          options.allow_empty = true;
        } else if meta.path.is_ident("skip") {
          options.skip = true;
        } else if meta.path.is_ident("renamed") {
          let lit: syn::LitStr = meta.value()?.parse()?;
          options.renamed = Some(lit.value());
        } else {
          return Err(meta.error("unknown config option"));
        }
        Ok(())
      })?;
    }
    Ok(options)
  }
}

/// How a field type is parsed from an override.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Kind {
  Map,
  OptionalMap,
  Optional,
  List,
  Flag,
  Text,
  Parsed,
}

impl Kind {
  fn of(ty: &Type) -> Self {
    // `Vec < String >` as tokens; compare without spaces.
    let ty = ty.to_token_stream().to_string().replace(' ', "");
    let is_map = |s: &str| {
      ["IndexMap<", "BTreeMap<", "HashMap<"]
        .iter()
        .any(|map| s.starts_with(map) || s.contains(&format!("::{map}")))
    };

    match ty.strip_prefix("Option<") {
      Some(inner) if is_map(inner) => Self::OptionalMap,
      Some(_) => Self::Optional,
      None if is_map(&ty) => Self::Map,
      None if ty.starts_with("Vec<") => Self::List,
      None if ty == "bool" => Self::Flag,
      None if ty == "String" => Self::Text,
      None => Self::Parsed,
    }
  }

  const fn is_map(self) -> bool {
    matches!(self, Self::Map | Self::OptionalMap)
  }
}

struct ConfigField<'a> {
  ident:   &'a Ident,
  key:     String,
  kind:    Kind,
  options: Options,
}

#[proc_macro_derive(Configurable, attributes(config))]
pub fn derive_configurable(input: TokenStream) -> TokenStream {
  let input = parse_macro_input!(input as DeriveInput);
  expand(&input)
    .unwrap_or_else(syn::Error::into_compile_error)
    .into()
}

fn expand(input: &DeriveInput) -> syn::Result<Tokens> {
  let Data::Struct(data) = &input.data else {
    return Err(syn::Error::new_spanned(
      input,
      "Configurable needs a struct with named fields",
    ));
  };
  let Fields::Named(named) = &data.fields else {
    return Err(syn::Error::new_spanned(
      input,
      "Configurable needs a struct with named fields",
    ));
  };

  let mut fields = Vec::new();
  for field in &named.named {
    let Some(ident) = field.ident.as_ref() else {
      continue;
    };
    fields.push(ConfigField {
      ident,
      key: ident.to_string(),
      kind: Kind::of(&field.ty),
      options: Options::of(field)?,
    });
  }

  let name = &input.ident;
  let (impl_generics, ty_generics, where_clause) =
    input.generics.split_for_impl();

  let overridable: Vec<&ConfigField> = fields
    .iter()
    .filter(|f| !f.options.skip && !f.kind.is_map())
    .collect();
  let keys = overridable.iter().map(|f| {
    if f.options.nested {
      format!("{}.*", f.key)
    } else {
      f.key.clone()
    }
  });
  let nested_arms = overridable
    .iter()
    .filter(|f| f.options.nested)
    .map(|f| nested_override(f));
  let arms = overridable
    .iter()
    .filter(|f| !f.options.nested)
    .map(|f| override_arm(f));

  Ok(quote! {
    impl #impl_generics #name #ty_generics #where_clause {
      /// Keys accepted by `apply_override`.
      pub const OVERRIDE_KEYS: &'static [&'static str] = &[#(#keys),*];

      /// Set one field from a `KEY=VALUE` override.
      ///
      /// # Errors
      ///
      /// Returns an error for an unknown key or a value that does not parse
      /// as the field's type.
      pub fn apply_override(
        &mut self,
        key: &str,
        value: &str,
      ) -> ::std::result::Result<(), crate::error::ConfigError> {
        use crate::error::ConfigError;

        #(#nested_arms)*

        match key {
          #(#arms)*
          _ => Err(ConfigError::UnknownKey {
            key:   key.to_string(),
            known: Self::OVERRIDE_KEYS.join(", "),
          }),
        }
      }
    }
  })
}

fn nested_override(field: &ConfigField<'_>) -> Tokens {
  let ident = field.ident;
  let prefix = format!("{}.", field.key);
  quote! {
    if let Some(subkey) = key.strip_prefix(#prefix) {
      return self
        .#ident
        .get_or_insert_with(Default::default)
        .apply_override(subkey, value)
        .map_err(|err| err.within(#prefix));
    }
  }
}

fn override_arm(field: &ConfigField<'_>) -> Tokens {
  let ident = field.ident;
  let key = &field.key;
  let invalid = |expected: &str| {
    quote! {
      ConfigError::InvalidValue {
        key:      key.to_string(),
        value:    value.to_string(),
        expected: #expected,
      }
    }
  };

  let assign = match field.kind {
    Kind::Optional => {
      let err = invalid("a value of the field's type");
      let parsed = quote! {
        Some(value.parse().map_err(|_| #err)?)
      };
      if field.options.allow_empty {
        quote! {
          self.#ident = if value.is_empty() { None } else { #parsed };
        }
      } else {
        quote! { self.#ident = #parsed; }
      }
    },
    Kind::List => {
      quote! {
        self.#ident = value
          .split(',')
          .map(str::trim)
          .filter(|item| !item.is_empty())
          .map(Into::into)
          .collect();
      }
    },
    Kind::Flag => {
      let err = invalid("true/false, yes/no or 1/0");
      quote! {
        self.#ident = match value.to_ascii_lowercase().as_str() {
          "true" | "yes" | "1" => true,
          "false" | "no" | "0" => false,
          _ => return Err(#err),
        };
      }
    },
    Kind::Text => quote! { self.#ident = value.to_string(); },
    Kind::Parsed => {
      let err = invalid("a value of the field's type");
      quote! { self.#ident = value.parse().map_err(|_| #err)?; }
    },
    Kind::Map | Kind::OptionalMap => return quote! {},
  };

  let warn = field.options.renamed.as_ref().map(|new_key| {
    quote! {
      log::warn!("Config key '{}' is renamed to '{}'", #key, #new_key);
    }
  });

  quote! {
    #key => {
      #warn
      #assign
      Ok(())
    },
  }
}
