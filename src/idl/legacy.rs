//! Legacy Anchor IDL format (pre-0.29)
//!
//! Output side of the conversion. The legacy schema predates the separate
//! type table, so accounts carry their full inlined struct definition, and
//! field names are camelCase.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegacyIdl {
    /// Program version (at root level in legacy)
    pub version: String,

    /// Program name (at root level in legacy)
    pub name: String,

    /// Instructions
    pub instructions: Vec<LegacyInstruction>,

    /// Account type definitions (full inlined structs, not refs)
    pub accounts: Vec<LegacyTypeDef>,

    /// Custom types
    pub types: Vec<LegacyTypeDef>,

    /// Errors
    pub errors: Vec<LegacyError>,

    /// Legacy metadata (holds the program address)
    pub metadata: LegacyMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegacyMetadata {
    /// Program address (in legacy metadata)
    #[serde(default)]
    pub address: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegacyInstruction {
    pub name: String,

    #[serde(default)]
    pub accounts: Vec<LegacyInstructionAccount>,

    #[serde(default)]
    pub args: Vec<LegacyField>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegacyInstructionAccount {
    pub name: String,

    #[serde(default, rename = "isMut")]
    pub is_mut: bool,

    #[serde(default, rename = "isSigner")]
    pub is_signer: bool,

    /// Emitted only when true; absent means not optional
    #[serde(
        default,
        rename = "isOptional",
        skip_serializing_if = "std::ops::Not::not"
    )]
    pub is_optional: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegacyTypeDef {
    pub name: String,

    #[serde(rename = "type")]
    pub ty: LegacyTypeDefTy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum LegacyTypeDefTy {
    Struct {
        #[serde(default)]
        fields: Vec<LegacyField>,
    },
    Enum {
        #[serde(default)]
        variants: Vec<LegacyEnumVariant>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegacyEnumVariant {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<LegacyEnumFields>,
}

/// Enum variant fields - named (struct-style) or positional (tuple-style)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LegacyEnumFields {
    Tuple(Vec<LegacyType>),
    Named(Vec<LegacyField>),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegacyField {
    pub name: String,

    #[serde(rename = "type")]
    pub ty: LegacyType,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LegacyType {
    /// Primitive type as string (u8, u64, bool, publicKey, etc.)
    Primitive(String),

    /// Complex type as object
    Complex(LegacyTypeComplex),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LegacyTypeComplex {
    /// Vec<T>
    Vec(Box<LegacyType>),

    /// Option<T>
    Option(Box<LegacyType>),

    /// [T; N] - array with size
    Array(Box<LegacyType>, usize),

    /// Reference to a defined type - legacy uses the name directly
    Defined(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegacyError {
    pub code: u32,

    pub name: String,

    #[serde(default)]
    pub msg: String,
}
