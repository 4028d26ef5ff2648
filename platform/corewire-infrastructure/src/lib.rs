pub mod core_writer;
pub mod multicall;
