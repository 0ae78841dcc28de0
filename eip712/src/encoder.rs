//! `encodeType`, `typeHash`, `encodeData` and `hashStruct` over a type
//! mapping.

use std::{
    borrow::Cow,
    collections::{BTreeSet, HashSet},
};

use ethcodec_abi::{encode, util::hash_word, ParamType, Reader, Token, Word};
use ethcodec_primitives::{keccak256, B256};
use ethcodec_pub_use::{serde_json::Value, tracing};

use crate::{
    value::{atomic_token, dynamic_bytes, string},
    Eip712Error, Eip712Field, Result, Types,
};

/// Layout of dynamic array members in [`Encoder::encode_data`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ArrayEncoding {
    /// Every member is one word; arrays become the keccak of their
    /// concatenated element encodings. This is the layout EIP-712 signers
    /// agree on, and the one [`Encoder::hash_struct`] uses.
    #[default]
    Hashed,
    /// Dynamic arrays of atomic elements are written ABI style: an offset
    /// word of `32` in the head, the length and elements appended after the
    /// head. Other members are as in [`ArrayEncoding::Hashed`].
    Inline,
}

/// A resolved member type.
#[derive(Debug, Clone, PartialEq, Eq)]
enum FieldType<'a> {
    Atomic(ParamType),
    Bytes,
    String,
    Struct(&'a str),
    Array(Box<FieldType<'a>>, Option<usize>),
}

impl FieldType<'_> {
    /// The struct type this member refers to, through any array suffixes.
    fn struct_name(&self) -> Option<&str> {
        match self {
            FieldType::Struct(name) => Some(name),
            FieldType::Array(inner, _) => inner.struct_name(),
            _ => None,
        }
    }
}

/// Encodes struct values against a validated, read-only type mapping.
#[derive(Debug, Clone)]
pub struct Encoder<'a> {
    types: Cow<'a, Types>,
}

impl<'a> Encoder<'a> {
    /// Validates `types` and wraps it.
    ///
    /// Struct names must be identifiers, a struct may not repeat a member
    /// name, and every member type must resolve.
    pub fn new(types: impl Into<Cow<'a, Types>>) -> Result<Self> {
        let encoder = Self { types: types.into() };
        encoder.validate()?;
        Ok(encoder)
    }

    /// The type mapping.
    pub fn types(&self) -> &Types {
        &self.types
    }

    fn validate(&self) -> Result<()> {
        for (name, fields) in self.types.iter() {
            if !is_identifier(name) {
                return Err(Eip712Error::InvalidDefinition(format!("bad struct name {name:?}")))
            }
            let mut seen = HashSet::new();
            for field in fields {
                if !seen.insert(field.name.as_str()) {
                    return Err(Eip712Error::InvalidDefinition(format!(
                        "{name} declares {} twice",
                        field.name
                    )))
                }
                self.field_type(&field.r#type)?;
            }
        }
        Ok(())
    }

    fn fields(&self, name: &str) -> Result<&[Eip712Field]> {
        self.types
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| Eip712Error::UnknownType(name.to_owned()))
    }

    /// Resolves a member type: atomic types first, then declared structs,
    /// with `[]`/`[k]` suffixes read outermost first.
    fn field_type<'t>(&self, ty: &'t str) -> Result<FieldType<'t>> {
        if let Some(stripped) = ty.strip_suffix(']') {
            let open = stripped.rfind('[').ok_or_else(|| Eip712Error::UnknownType(ty.to_owned()))?;
            let inner = Box::new(self.field_type(&stripped[..open])?);
            let size = &stripped[open + 1..];
            if size.is_empty() {
                return Ok(FieldType::Array(inner, None))
            }
            return match size.parse::<usize>() {
                Ok(len) if len > 0 => Ok(FieldType::Array(inner, Some(len))),
                _ => Err(Eip712Error::UnknownType(ty.to_owned())),
            }
        }

        if !is_identifier(ty) {
            return Err(Eip712Error::UnknownType(ty.to_owned()))
        }
        match Reader::read(ty) {
            Ok(ParamType::Bytes) => Ok(FieldType::Bytes),
            Ok(ParamType::String) => Ok(FieldType::String),
            Ok(param) if param.is_atomic() => Ok(FieldType::Atomic(param)),
            _ if self.types.contains_key(ty) => Ok(FieldType::Struct(ty)),
            _ => Err(Eip712Error::UnknownType(ty.to_owned())),
        }
    }

    /// Struct types `name` references directly or transitively, excluding
    /// `name` itself, sorted by name.
    fn dependencies<'t>(&'t self, name: &'t str) -> Result<BTreeSet<&'t str>> {
        let mut found = BTreeSet::new();
        let mut stack = vec![name];
        while let Some(current) = stack.pop() {
            for field in self.fields(current)? {
                let dep = match self.field_type(&field.r#type)?.struct_name() {
                    Some(dep) => dep.to_owned(),
                    None => continue,
                };
                let (dep, _) = self
                    .types
                    .get_key_value(dep.as_str())
                    .ok_or_else(|| Eip712Error::UnknownType(dep.clone()))?;
                if dep != name && found.insert(dep.as_str()) {
                    stack.push(dep.as_str());
                }
            }
        }
        tracing::trace!(name, deps = ?found, "resolved struct dependencies");
        Ok(found)
    }

    /// `encodeType`: `Name(type member,...)` for `name`, followed by the same
    /// for each struct it references, in ascending name order.
    pub fn encode_type(&self, name: &str) -> Result<String> {
        let mut out = String::new();
        let deps = self.dependencies(name)?;
        for ty in std::iter::once(name).chain(deps) {
            out.push_str(ty);
            out.push('(');
            for (i, field) in self.fields(ty)?.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&field.r#type);
                out.push(' ');
                out.push_str(&field.name);
            }
            out.push(')');
        }
        Ok(out)
    }

    /// `typeHash`: keccak-256 of [`Encoder::encode_type`].
    pub fn type_hash(&self, name: &str) -> Result<B256> {
        Ok(keccak256(self.encode_type(name)?))
    }

    /// `encodeData`: the type hash followed by one word per member, in
    /// declaration order. See [`ArrayEncoding`] for how arrays are laid out.
    pub fn encode_data(&self, name: &str, value: &Value, arrays: ArrayEncoding) -> Result<Vec<u8>> {
        let fields = self.fields(name)?;
        let object = value.as_object().ok_or_else(|| Eip712Error::mismatch(name, value))?;

        let mut head = Vec::with_capacity(32 * (fields.len() + 1));
        let mut tail = vec![];
        head.extend_from_slice(self.type_hash(name)?.as_bytes());

        for field in fields {
            let member = object.get(&field.name).ok_or_else(|| {
                Eip712Error::TypeMismatch(format!("{name} is missing {}", field.name))
            })?;
            let ty = self.field_type(&field.r#type)?;
            tracing::trace!(name, field = %field.name, ty = %field.r#type, "encoding member");

            match (&ty, arrays) {
                (FieldType::Array(inner, None), ArrayEncoding::Inline) => {
                    if let FieldType::Atomic(param) = &**inner {
                        let tokens = elements(member, &field.r#type, None)?
                            .iter()
                            .map(|element| atomic_token(param, element))
                            .collect::<Result<Vec<_>>>()?;
                        // the standalone encoding is [offset, length, elements..]
                        let encoded = encode(&[Token::DynSeq(tokens)]);
                        let (offset, body) = encoded.split_at(32);
                        head.extend_from_slice(offset);
                        tail.extend_from_slice(body);
                        continue
                    }
                    head.extend_from_slice(self.encode_member(&ty, member)?.as_bytes());
                }
                _ => head.extend_from_slice(self.encode_member(&ty, member)?.as_bytes()),
            }
        }

        head.extend(tail);
        Ok(head)
    }

    /// `hashStruct`: keccak-256 of the canonical [`Encoder::encode_data`].
    pub fn hash_struct(&self, name: &str, value: &Value) -> Result<B256> {
        Ok(keccak256(self.encode_data(name, value, ArrayEncoding::Hashed)?))
    }

    /// The one word a member contributes to the canonical encoding.
    fn encode_member(&self, ty: &FieldType<'_>, value: &Value) -> Result<Word> {
        match ty {
            FieldType::Atomic(param) => match atomic_token(param, value)? {
                Token::Word(word) => Ok(word),
                _ => Err(Eip712Error::mismatch(&param.to_string(), value)),
            },
            FieldType::Bytes => Ok(hash_word(&dynamic_bytes(value)?)),
            FieldType::String => Ok(hash_word(string(value)?.as_bytes())),
            FieldType::Struct(name) => self.hash_struct(name, value),
            FieldType::Array(inner, len) => {
                let elements = elements(value, "array", *len)?;
                let mut encoded = Vec::with_capacity(32 * elements.len());
                for element in elements {
                    encoded.extend_from_slice(self.encode_member(inner, element)?.as_bytes());
                }
                Ok(keccak256(encoded))
            }
        }
    }
}

/// Elements of an array value, checked against a fixed length if any.
fn elements<'v>(value: &'v Value, ty: &str, len: Option<usize>) -> Result<&'v [Value]> {
    let elements = value.as_array().ok_or_else(|| Eip712Error::mismatch(ty, value))?;
    match len {
        Some(len) if elements.len() != len => Err(Eip712Error::TypeMismatch(format!(
            "expected {len} elements, found {}",
            elements.len()
        ))),
        _ => Ok(elements),
    }
}

/// `[A-Za-z_$][A-Za-z0-9_$]*`
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}
