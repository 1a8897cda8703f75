//! New-format (0.30+) to legacy (pre-0.29) IDL conversion
//!
//! The legacy format requires account type definitions inlined per-account,
//! camelCase identifiers, and `publicKey` instead of `pubkey`. Conversion is
//! total on well-formed documents: unresolved account types degrade to an
//! empty struct rather than failing the whole document.

use std::collections::HashMap;
use std::path::Path;

use super::legacy::{
    LegacyEnumFields, LegacyEnumVariant, LegacyError, LegacyField, LegacyIdl, LegacyInstruction,
    LegacyInstructionAccount, LegacyMetadata, LegacyType, LegacyTypeComplex, LegacyTypeDef,
    LegacyTypeDefTy,
};
use super::types::{
    Idl, IdlEnumFields, IdlEnumVariant, IdlError, IdlField, IdlInstruction, IdlInstructionAccount,
    IdlType, IdlTypeComplex, IdlTypeDef, IdlTypeDefTy,
};
use crate::error::DefikitResult;

/// Default version when the new document's metadata omits one
const DEFAULT_VERSION: &str = "0.1.0";

/// Default program name when the new document's metadata omits one
const DEFAULT_NAME: &str = "unknown";

/// Convert a snake_case identifier to camelCase.
///
/// Splits on underscores and title-cases every segment after the first.
pub fn to_camel_case(name: &str) -> String {
    let mut segments = name.split('_');
    let mut out = String::with_capacity(name.len());

    if let Some(first) = segments.next() {
        out.push_str(first);
    }

    for segment in segments {
        let mut chars = segment.chars();
        if let Some(head) = chars.next() {
            out.extend(head.to_uppercase());
            out.push_str(&chars.as_str().to_lowercase());
        }
    }

    out
}

/// Convert an entire new-format IDL into the legacy format.
pub fn convert_idl(idl: Idl) -> LegacyIdl {
    // Accounts reference types by name only, so the lookup must exist before
    // account conversion.
    let types_lookup: HashMap<String, IdlTypeDefTy> = idl
        .types
        .iter()
        .map(|def| (def.name.clone(), def.ty.clone()))
        .collect();

    LegacyIdl {
        version: idl
            .metadata
            .version
            .unwrap_or_else(|| DEFAULT_VERSION.to_string()),
        name: idl.metadata.name.unwrap_or_else(|| DEFAULT_NAME.to_string()),
        instructions: idl.instructions.into_iter().map(Into::into).collect(),
        accounts: idl
            .accounts
            .into_iter()
            .map(|account| convert_account(account.name, account.ty, &types_lookup))
            .collect(),
        types: idl.types.into_iter().map(Into::into).collect(),
        errors: idl.errors.into_iter().map(Into::into).collect(),
        metadata: LegacyMetadata { address: idl.address },
    }
}

/// Inline an account's struct definition into a legacy account entry.
///
/// Prefers an inline definition on the account itself, then an exact name
/// match in the types table. Non-struct and missing definitions both fall
/// back to an empty struct so one unresolved account never fails conversion.
fn convert_account(
    name: String,
    inline: Option<IdlTypeDefTy>,
    types_lookup: &HashMap<String, IdlTypeDefTy>,
) -> LegacyTypeDef {
    let resolved = inline
        .filter(|def| matches!(def, IdlTypeDefTy::Struct { .. }))
        .or_else(|| {
            types_lookup
                .get(&name)
                .filter(|def| matches!(def, IdlTypeDefTy::Struct { .. }))
                .cloned()
        });

    let ty = match resolved {
        Some(def) => def.into(),
        None => LegacyTypeDefTy::Struct { fields: vec![] },
    };

    LegacyTypeDef { name, ty }
}

/// Load a new-format IDL from a JSON file.
pub fn load_idl_from_file(path: &Path) -> DefikitResult<Idl> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

/// Write a legacy IDL as pretty-printed JSON.
pub fn write_legacy_idl(path: &Path, idl: &LegacyIdl) -> DefikitResult<()> {
    let contents = serde_json::to_string_pretty(idl)?;
    std::fs::write(path, contents)?;
    Ok(())
}

impl From<IdlType> for LegacyType {
    fn from(ty: IdlType) -> Self {
        match ty {
            IdlType::Primitive(name) => {
                if name == "pubkey" {
                    LegacyType::Primitive("publicKey".to_string())
                } else {
                    LegacyType::Primitive(name)
                }
            }
            IdlType::Complex(complex) => LegacyType::Complex(complex.into()),
        }
    }
}

impl From<IdlTypeComplex> for LegacyTypeComplex {
    fn from(complex: IdlTypeComplex) -> Self {
        match complex {
            IdlTypeComplex::Vec(inner) => LegacyTypeComplex::Vec(Box::new((*inner).into())),
            IdlTypeComplex::Option(inner) => LegacyTypeComplex::Option(Box::new((*inner).into())),
            IdlTypeComplex::Array(inner, size) => {
                LegacyTypeComplex::Array(Box::new((*inner).into()), size)
            }
            IdlTypeComplex::Defined { name } => LegacyTypeComplex::Defined(name),
        }
    }
}

impl From<IdlField> for LegacyField {
    fn from(field: IdlField) -> Self {
        LegacyField {
            name: to_camel_case(&field.name),
            ty: field.ty.into(),
        }
    }
}

impl From<IdlInstructionAccount> for LegacyInstructionAccount {
    fn from(account: IdlInstructionAccount) -> Self {
        LegacyInstructionAccount {
            name: to_camel_case(&account.name),
            is_mut: account.writable,
            is_signer: account.signer,
            is_optional: account.optional,
        }
    }
}

impl From<IdlInstruction> for LegacyInstruction {
    fn from(instruction: IdlInstruction) -> Self {
        LegacyInstruction {
            name: to_camel_case(&instruction.name),
            accounts: instruction.accounts.into_iter().map(Into::into).collect(),
            args: instruction.args.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<IdlTypeDef> for LegacyTypeDef {
    fn from(def: IdlTypeDef) -> Self {
        LegacyTypeDef {
            name: def.name,
            ty: def.ty.into(),
        }
    }
}

impl From<IdlTypeDefTy> for LegacyTypeDefTy {
    fn from(ty: IdlTypeDefTy) -> Self {
        match ty {
            IdlTypeDefTy::Struct { fields } => LegacyTypeDefTy::Struct {
                fields: fields.into_iter().map(Into::into).collect(),
            },
            IdlTypeDefTy::Enum { variants } => LegacyTypeDefTy::Enum {
                variants: variants.into_iter().map(Into::into).collect(),
            },
        }
    }
}

impl From<IdlEnumVariant> for LegacyEnumVariant {
    fn from(variant: IdlEnumVariant) -> Self {
        LegacyEnumVariant {
            name: variant.name,
            fields: variant.fields.map(Into::into),
        }
    }
}

impl From<IdlEnumFields> for LegacyEnumFields {
    fn from(fields: IdlEnumFields) -> Self {
        match fields {
            IdlEnumFields::Tuple(types) => {
                LegacyEnumFields::Tuple(types.into_iter().map(Into::into).collect())
            }
            IdlEnumFields::Named(fields) => {
                LegacyEnumFields::Named(fields.into_iter().map(Into::into).collect())
            }
        }
    }
}

impl From<IdlError> for LegacyError {
    fn from(error: IdlError) -> Self {
        LegacyError {
            code: error.code,
            name: error.name,
            msg: error.msg,
        }
    }
}
