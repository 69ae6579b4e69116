//! # EIP-712 Typed Data
//!
//! Domain separator, struct hashing and signing digest for the lazy-mint
//! voucher schema.
//!
//! ```text
//! digest = keccak256(0x19 || 0x01 || domainSeparator || hashStruct(value))
//! ```
//!
//! The voucher schema's field order and types are part of the signed
//! contract. Changing either requires bumping the domain version.

use super::ecdsa::keccak256;
use super::entities::{Address, Hash, LocationMetadata};
use super::errors::SignatureError;
use primitive_types::U256;
use serde::{Deserialize, Serialize};

/// Canonical encoding of the EIP-712 domain type.
pub const DOMAIN_TYPE: &str =
    "EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)";

/// Protocol identifier used as the domain name.
pub const DOMAIN_NAME: &str = "DeliveryAddressSBT";

/// Current domain version.
pub const DOMAIN_VERSION: &str = "1";

/// The voucher's signed fields, in signing order.
pub const LAZY_MINT_VOUCHER: TypeSchema = TypeSchema {
    primary_type: "LazyMintVoucher",
    fields: &[
        TypedField::new("tokenId", FieldKind::Uint256),
        TypedField::new("minter", FieldKind::Address),
        TypedField::new("street", FieldKind::String),
        TypedField::new("city", FieldKind::String),
        TypedField::new("postalCode", FieldKind::String),
    ],
};

// =============================================================================
// Domain
// =============================================================================

/// EIP-712 domain record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Eip712Domain {
    pub name: String,
    pub version: String,
    pub chain_id: u64,
    pub verifying_contract: Address,
}

impl Eip712Domain {
    /// `hashStruct(domain)`.
    pub fn separator(&self) -> Hash {
        let mut encoded = Vec::with_capacity(32 * 5);
        encoded.extend_from_slice(&keccak256(DOMAIN_TYPE.as_bytes()));
        encoded.extend_from_slice(&keccak256(self.name.as_bytes()));
        encoded.extend_from_slice(&keccak256(self.version.as_bytes()));
        encoded.extend_from_slice(&encode_uint(U256::from(self.chain_id)));
        encoded.extend_from_slice(&encode_address(&self.verifying_contract));
        keccak256(&encoded)
    }
}

// =============================================================================
// Schema
// =============================================================================

/// Solidity type of a typed-data field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Uint256,
    Address,
    String,
}

impl FieldKind {
    /// Solidity type name as it appears in `encodeType`.
    pub fn solidity_name(&self) -> &'static str {
        match self {
            FieldKind::Uint256 => "uint256",
            FieldKind::Address => "address",
            FieldKind::String => "string",
        }
    }
}

/// A named, typed member of a struct schema.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TypedField {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl TypedField {
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind }
    }
}

/// An EIP-712 struct type with no nested struct members.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TypeSchema {
    pub primary_type: &'static str,
    pub fields: &'static [TypedField],
}

impl TypeSchema {
    /// `encodeType`, e.g. `LazyMintVoucher(uint256 tokenId,address minter,...)`.
    pub fn encode_type(&self) -> String {
        let members: Vec<String> = self
            .fields
            .iter()
            .map(|f| format!("{} {}", f.kind.solidity_name(), f.name))
            .collect();
        format!("{}({})", self.primary_type, members.join(","))
    }

    /// `keccak256(encodeType)`.
    pub fn type_hash(&self) -> Hash {
        keccak256(self.encode_type().as_bytes())
    }

    /// `hashStruct(value)`. The value must list exactly the schema's fields,
    /// in order, with matching kinds.
    pub fn hash_struct(&self, value: &TypedValue) -> Result<Hash, SignatureError> {
        if value.fields.len() != self.fields.len() {
            return Err(SignatureError::SchemaMismatch(format!(
                "{} expects {} fields, got {}",
                self.primary_type,
                self.fields.len(),
                value.fields.len()
            )));
        }

        let mut encoded = Vec::with_capacity(32 * (self.fields.len() + 1));
        encoded.extend_from_slice(&self.type_hash());

        for (field, (name, data)) in self.fields.iter().zip(&value.fields) {
            if field.name != name.as_str() || field.kind != data.kind() {
                return Err(SignatureError::SchemaMismatch(format!(
                    "expected {} {}, got {} {}",
                    field.kind.solidity_name(),
                    field.name,
                    data.kind().solidity_name(),
                    name
                )));
            }
            encoded.extend_from_slice(&data.encode());
        }

        Ok(keccak256(&encoded))
    }
}

// =============================================================================
// Values
// =============================================================================

/// A single typed-data field value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldValue {
    Uint256(U256),
    Address(Address),
    String(String),
}

impl FieldValue {
    /// Kind of this value.
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Uint256(_) => FieldKind::Uint256,
            FieldValue::Address(_) => FieldKind::Address,
            FieldValue::String(_) => FieldKind::String,
        }
    }

    /// `encodeData` for an atomic or dynamic member.
    fn encode(&self) -> Hash {
        match self {
            FieldValue::Uint256(v) => encode_uint(*v),
            FieldValue::Address(a) => encode_address(a),
            FieldValue::String(s) => keccak256(s.as_bytes()),
        }
    }
}

/// Ordered field values for a struct.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct TypedValue {
    pub fields: Vec<(String, FieldValue)>,
}

impl TypedValue {
    /// Append a field.
    pub fn with(mut self, name: &str, value: FieldValue) -> Self {
        self.fields.push((name.to_string(), value));
        self
    }

    /// Look up a field by name.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }
}

/// Everything a Signer capability needs: domain, schema and value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypedData {
    pub domain: Eip712Domain,
    pub schema: TypeSchema,
    pub value: TypedValue,
}

impl TypedData {
    /// The 32-byte digest that is signed and recovered against.
    pub fn signing_hash(&self) -> Result<Hash, SignatureError> {
        let struct_hash = self.schema.hash_struct(&self.value)?;

        let mut preimage = [0u8; 66];
        preimage[0] = 0x19;
        preimage[1] = 0x01;
        preimage[2..34].copy_from_slice(&self.domain.separator());
        preimage[34..].copy_from_slice(&struct_hash);
        Ok(keccak256(&preimage))
    }
}

/// Build the voucher value record in schema order from its inputs.
pub fn voucher_value(token_id: U256, minter: Address, metadata: &LocationMetadata) -> TypedValue {
    let signed = metadata.signed_fields();
    TypedValue::default()
        .with("tokenId", FieldValue::Uint256(token_id))
        .with("minter", FieldValue::Address(minter))
        .with("street", FieldValue::String(signed.street.to_string()))
        .with("city", FieldValue::String(signed.city.to_string()))
        .with("postalCode", FieldValue::String(signed.postal_code.to_string()))
}

/// Build the complete typed data for a voucher.
pub fn voucher_typed_data(
    domain: Eip712Domain,
    token_id: U256,
    minter: Address,
    metadata: &LocationMetadata,
) -> TypedData {
    TypedData {
        domain,
        schema: LAZY_MINT_VOUCHER,
        value: voucher_value(token_id, minter, metadata),
    }
}

fn encode_uint(value: U256) -> Hash {
    let mut out = [0u8; 32];
    value.to_big_endian(&mut out);
    out
}

fn encode_address(address: &Address) -> Hash {
    let mut out = [0u8; 32];
    out[12..].copy_from_slice(address.as_bytes());
    out
}
