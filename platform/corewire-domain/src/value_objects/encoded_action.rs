use serde::{Serialize, Serializer};

/// Encoding version carried in the first header byte.
pub const ACTION_VERSION: u8 = 0x01;

pub const HEADER_LEN: usize = 4;

/// `version ++ 3-byte big-endian action id ++ encoded parameter tuple`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EncodedAction(Vec<u8>);

impl EncodedAction {
    pub(crate) fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(&self.0))
    }
}

impl AsRef<[u8]> for EncodedAction {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Header fields of an encoded action; `params` stays opaque.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionHeader {
    pub version: u8,
    pub action_id: u32,
    #[serde(serialize_with = "serialize_hex")]
    pub params: Vec<u8>,
}

/// Identifier returned by the submission collaborator, passed back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TransactionHandle(pub String);

impl std::fmt::Display for TransactionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

fn serialize_hex<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format!("0x{}", hex::encode(bytes)))
}
