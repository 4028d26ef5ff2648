pub mod abi;
pub mod action_codec;
pub mod precompile;
