//! Anchor IDL type definitions (0.30+ format)
//!
//! These types represent the structure of a new-format Anchor IDL JSON file.
//! Every section defaults to empty so that partial documents still convert.

use serde::{Deserialize, Serialize};

/// Root IDL structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Idl {
    /// Program address (base58)
    #[serde(default)]
    pub address: String,

    /// IDL metadata
    #[serde(default)]
    pub metadata: IdlMetadata,

    /// Program instructions
    #[serde(default)]
    pub instructions: Vec<IdlInstruction>,

    /// Account discriminators (references to types)
    #[serde(default)]
    pub accounts: Vec<IdlAccountRef>,

    /// Custom types defined by the program
    #[serde(default)]
    pub types: Vec<IdlTypeDef>,

    /// Error codes defined by the program
    #[serde(default)]
    pub errors: Vec<IdlError>,
}

/// IDL metadata
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdlMetadata {
    /// Program name
    #[serde(default)]
    pub name: Option<String>,

    /// Program version
    #[serde(default)]
    pub version: Option<String>,
}

/// Instruction definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdlInstruction {
    /// Instruction name (snake_case)
    pub name: String,

    /// Discriminator bytes (opaque to conversion)
    #[serde(default)]
    pub discriminator: Vec<u8>,

    /// Accounts required by this instruction
    #[serde(default)]
    pub accounts: Vec<IdlInstructionAccount>,

    /// Arguments to this instruction
    #[serde(default)]
    pub args: Vec<IdlField>,
}

/// Single account in an instruction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdlInstructionAccount {
    /// Account name
    pub name: String,

    /// Whether this account is writable
    #[serde(default)]
    pub writable: bool,

    /// Whether this account must sign
    #[serde(default)]
    pub signer: bool,

    /// Whether this account is optional
    #[serde(default)]
    pub optional: bool,
}

/// Field definition (for args and struct fields)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdlField {
    /// Field name (snake_case)
    pub name: String,

    /// Field type
    #[serde(rename = "type")]
    pub ty: IdlType,
}

/// Type definition (struct or enum)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdlTypeDef {
    /// Type name
    pub name: String,

    /// Type definition
    #[serde(rename = "type")]
    pub ty: IdlTypeDefTy,
}

/// Type definition body
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum IdlTypeDefTy {
    /// Struct type
    Struct {
        #[serde(default)]
        fields: Vec<IdlField>,
    },
    /// Enum type
    Enum {
        #[serde(default)]
        variants: Vec<IdlEnumVariant>,
    },
}

/// Enum variant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdlEnumVariant {
    /// Variant name
    pub name: String,

    /// Variant fields (if tuple or struct variant)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<IdlEnumFields>,
}

/// Enum variant fields - can be tuple-style (unnamed) or struct-style (named)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IdlEnumFields {
    /// Tuple variant: fields are just types (e.g., ["u64", "pubkey"])
    Tuple(Vec<IdlType>),
    /// Struct variant: fields have names and types (e.g., [{"name": "x", "type": "u64"}])
    Named(Vec<IdlField>),
}

/// IDL type (primitives and composites)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IdlType {
    /// Primitive type as string (u8, u64, bool, pubkey, etc.)
    Primitive(String),

    /// Complex type
    Complex(IdlTypeComplex),
}

/// Complex IDL types
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IdlTypeComplex {
    /// Vec<T>
    Vec(Box<IdlType>),
    /// Option<T>
    Option(Box<IdlType>),
    /// [T; N]
    Array(Box<IdlType>, usize),
    /// Reference to a defined type - the new format nests the name
    Defined { name: String },
}

/// Account reference (root-level accounts array)
///
/// In the new format this is normally just a discriminator reference with the
/// actual type in `types`, but some IDLs still inline the type here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdlAccountRef {
    /// Account type name
    pub name: String,

    /// Account discriminator bytes
    #[serde(default)]
    pub discriminator: Vec<u8>,

    /// Inline type definition, if present
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub ty: Option<IdlTypeDefTy>,
}

/// Error definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdlError {
    /// Error code
    #[serde(default)]
    pub code: u32,

    /// Error name
    #[serde(default)]
    pub name: String,

    /// Error message
    #[serde(default)]
    pub msg: String,
}
