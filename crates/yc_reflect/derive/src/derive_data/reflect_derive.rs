use syn::spanned::Spanned;
use syn::{Data, DeriveInput, Fields};

use super::{
    EnumVariant, FieldAttributes, ReflectEnum, ReflectMeta, ReflectStruct, RenameRule,
    StructField, TypeAttributes,
};

/// The kind of implementation to generate.
pub(crate) enum ReflectDerive<'a> {
    Struct(ReflectStruct<'a>),
    Enum(ReflectEnum<'a>),
    Opaque(ReflectMeta<'a>),
    Scalar(ReflectMeta<'a>),
}

impl<'a> ReflectDerive<'a> {
    pub fn from_input(input: &'a DeriveInput) -> syn::Result<Self> {
        if let Some(lifetime) = input.generics.lifetimes().next() {
            return Err(syn::Error::new(
                lifetime.span(),
                "`Reflect` cannot be derived for types with lifetime parameters",
            ));
        }

        let attrs = TypeAttributes::parse_attrs(&input.attrs)?;
        let is_opaque = attrs.opaque.is_some();
        let is_scalar = attrs.scalar.is_some();
        let rename_all = attrs.rename_all;
        let meta = ReflectMeta::new(attrs, &input.ident, &input.generics);

        if is_opaque {
            return Ok(Self::Opaque(meta));
        }
        if is_scalar {
            return Ok(Self::Scalar(meta));
        }

        match &input.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(named) => {
                    let rule = rename_all.unwrap_or(RenameRule::KebabCase);
                    Self::from_struct(meta, named.named.iter(), rule)
                }
                fields => Err(syn::Error::new(
                    fields.span(),
                    "tuple and unit structs need `#[reflect(opaque)]` or `#[reflect(scalar)]`",
                )),
            },
            Data::Enum(data) => {
                if data.variants.is_empty() {
                    return Err(syn::Error::new(
                        input.ident.span(),
                        "`Reflect` cannot be derived for enums without variants",
                    ));
                }
                let mut variants = Vec::with_capacity(data.variants.len());
                for variant in &data.variants {
                    if !matches!(variant.fields, Fields::Unit) {
                        return Err(syn::Error::new(
                            variant.fields.span(),
                            "enum variants with fields need `#[reflect(opaque)]` on the enum",
                        ));
                    }
                    let attrs = FieldAttributes::parse_attrs(&variant.attrs)?;
                    attrs.check_variant()?;
                    let ident_name = variant.ident.to_string();
                    let name = match (&attrs.rename, rename_all) {
                        (Some(lit), _) => lit.value(),
                        (None, Some(rule)) => rule.apply(&ident_name),
                        (None, None) => ident_name,
                    };
                    variants.push(EnumVariant {
                        ident: &variant.ident,
                        name,
                    });
                }
                Ok(Self::Enum(ReflectEnum { meta, variants }))
            }
            Data::Union(data) => Err(syn::Error::new(
                data.union_token.span(),
                "`Reflect` cannot be derived for unions",
            )),
        }
    }

    fn from_struct(
        mut meta: ReflectMeta<'a>,
        fields: impl Iterator<Item = &'a syn::Field>,
        rule: RenameRule,
    ) -> syn::Result<Self> {
        let mut parsed = Vec::new();
        let mut errors: Option<syn::Error> = None;
        let mut index = 0;

        for field in fields {
            match StructField::new(field, rule) {
                Ok(mut field) => {
                    if field.attrs.ignore.is_none() {
                        field.reflect_index = Some(index);
                        index += 1;
                    }
                    parsed.push(field);
                }
                Err(err) => match &mut errors {
                    Some(errors) => errors.combine(err),
                    None => errors = Some(err),
                },
            }
        }
        if let Some(errors) = errors {
            return Err(errors);
        }

        let mut keys: Vec<&str> = Vec::new();
        for field in parsed.iter().filter(|f| f.reflect_index.is_some()) {
            if keys.contains(&field.key.as_str()) {
                return Err(syn::Error::new(
                    field.data.span(),
                    format!("duplicate document key `{}`", field.key),
                ));
            }
            keys.push(&field.key);
        }

        meta.set_field_types(
            parsed
                .iter()
                .filter(|f| f.reflect_index.is_some())
                .map(|f| {
                    let data: &'a syn::Field = f.data;
                    (&data.ty, !f.is_skipped())
                })
                .collect(),
        );

        Ok(Self::Struct(ReflectStruct {
            meta,
            fields: parsed,
        }))
    }
}
