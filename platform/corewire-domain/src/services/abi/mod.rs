//! Head/tail tuple encoding used by both action parameters and precompile
//! responses.
//!
//! Every value occupies one or more 32-byte words. Static values are
//! right-aligned in a single word and laid out inline; dynamic values
//! (`string`, `bytes`, arrays and tuples containing them) leave an offset word
//! in the head, relative to the start of the enclosing tuple, and append their
//! length-prefixed, zero-padded data to the tail.

mod reader;

pub use reader::AbiReader;

use alloy_primitives::{keccak256, Address};

pub const WORD: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Uint(u128),
    Int(i128),
    Bool(bool),
    Address(Address),
    String(String),
    Bytes(Vec<u8>),
    Tuple(Vec<Token>),
    Array(Vec<Token>),
}

impl Token {
    pub fn is_dynamic(&self) -> bool {
        match self {
            Token::String(_) | Token::Bytes(_) | Token::Array(_) => true,
            Token::Tuple(items) => items.iter().any(Token::is_dynamic),
            Token::Uint(_) | Token::Int(_) | Token::Bool(_) | Token::Address(_) => false,
        }
    }

    /// Bytes this token occupies in the head of its enclosing tuple.
    fn head_len(&self) -> usize {
        match self {
            Token::Tuple(items) if !self.is_dynamic() => items.iter().map(Token::head_len).sum(),
            _ => WORD,
        }
    }
}

/// Encodes `tokens` as a single tuple.
pub fn encode(tokens: &[Token]) -> Vec<u8> {
    encode_tuple(tokens)
}

/// Encodes a contract call: 4-byte selector followed by the argument tuple.
pub fn encode_call(selector: [u8; 4], tokens: &[Token]) -> Vec<u8> {
    let body = encode_tuple(tokens);
    let mut out = Vec::with_capacity(4 + body.len());
    out.extend_from_slice(&selector);
    out.extend_from_slice(&body);
    out
}

/// First four bytes of the keccak hash of a canonical function signature.
pub fn selector(signature: &str) -> [u8; 4] {
    let hash = keccak256(signature.as_bytes());
    let mut out = [0u8; 4];
    out.copy_from_slice(&hash[..4]);
    out
}

pub fn uint_word(value: u128) -> [u8; WORD] {
    let mut word = [0u8; WORD];
    word[16..].copy_from_slice(&value.to_be_bytes());
    word
}

pub fn int_word(value: i128) -> [u8; WORD] {
    let fill = if value < 0 { 0xff } else { 0x00 };
    let mut word = [fill; WORD];
    word[16..].copy_from_slice(&value.to_be_bytes());
    word
}

pub fn address_word(address: &Address) -> [u8; WORD] {
    let mut word = [0u8; WORD];
    word[12..].copy_from_slice(address.as_slice());
    word
}

fn encode_tuple(tokens: &[Token]) -> Vec<u8> {
    let head_len: usize = tokens.iter().map(Token::head_len).sum();
    let mut head = Vec::with_capacity(head_len);
    let mut tail = Vec::new();

    for token in tokens {
        if token.is_dynamic() {
            head.extend_from_slice(&uint_word((head_len + tail.len()) as u128));
            encode_into(token, &mut tail);
        } else {
            encode_into(token, &mut head);
        }
    }

    head.extend_from_slice(&tail);
    head
}

fn encode_into(token: &Token, out: &mut Vec<u8>) {
    match token {
        Token::Uint(value) => out.extend_from_slice(&uint_word(*value)),
        Token::Int(value) => out.extend_from_slice(&int_word(*value)),
        Token::Bool(value) => out.extend_from_slice(&uint_word(u128::from(*value))),
        Token::Address(address) => out.extend_from_slice(&address_word(address)),
        Token::String(value) => encode_length_prefixed(value.as_bytes(), out),
        Token::Bytes(value) => encode_length_prefixed(value, out),
        Token::Tuple(items) => out.extend_from_slice(&encode_tuple(items)),
        Token::Array(items) => {
            out.extend_from_slice(&uint_word(items.len() as u128));
            out.extend_from_slice(&encode_tuple(items));
        }
    }
}

fn encode_length_prefixed(data: &[u8], out: &mut Vec<u8>) {
    out.extend_from_slice(&uint_word(data.len() as u128));
    out.extend_from_slice(data);
    let rem = data.len() % WORD;
    if rem != 0 {
        out.resize(out.len() + WORD - rem, 0);
    }
}
