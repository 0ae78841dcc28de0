use crate::{
    decode, encode_params,
    signature::{build_signature, parse_signature, selector, strip_selector},
    Bytes, ParamType, Result, Selector, Token,
};

/// A contract function: its name, input types and output types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    /// Function name.
    pub name: String,
    /// Input parameter types.
    pub inputs: Vec<ParamType>,
    /// Output parameter types.
    pub outputs: Vec<ParamType>,
}

impl Function {
    /// Creates a function description.
    pub fn new(name: impl Into<String>, inputs: Vec<ParamType>, outputs: Vec<ParamType>) -> Self {
        Self { name: name.into(), inputs, outputs }
    }

    /// Parses `name(t1,t2)`. Outputs are left empty.
    pub fn parse(signature: &str) -> Result<Self> {
        let (name, inputs) = parse_signature(signature)?;
        Ok(Self { name, inputs, outputs: vec![] })
    }

    /// Canonical signature, `name(t1,t2)`.
    pub fn signature(&self) -> String {
        build_signature(&self.name, &self.inputs)
    }

    /// Four byte selector of the signature.
    pub fn selector(&self) -> Selector {
        selector(&self.signature())
    }

    /// Call data: the selector followed by the encoded inputs.
    pub fn encode_input(&self, tokens: &[Token]) -> Result<Bytes> {
        let params = encode_params(&self.inputs, tokens)?;
        let mut data = Vec::with_capacity(4 + params.len());
        data.extend_from_slice(&self.selector());
        data.extend(params);
        Ok(data)
    }

    /// Decodes call data, checking its selector.
    pub fn decode_input(&self, data: &[u8]) -> Result<Vec<Token>> {
        decode(&self.inputs, strip_selector(self.selector(), data)?)
    }

    /// Decodes return data.
    pub fn decode_output(&self, data: &[u8]) -> Result<Vec<Token>> {
        decode(&self.outputs, data)
    }
}
