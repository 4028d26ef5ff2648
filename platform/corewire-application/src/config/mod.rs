use crate::aggregation::{AggregationOptions, ChunkDispatch, DecodeFailurePolicy};
use alloy_primitives::{address, Address};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_PERP_COUNT: u64 = 225;
pub const DEFAULT_SPOT_TOKEN_COUNT: u64 = 425;
pub const DEFAULT_PERP_CHUNK_SIZE: usize = 200;
pub const DEFAULT_SPOT_CHUNK_SIZE: usize = 300;
pub const DEFAULT_PARALLELISM: usize = 4;

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub contracts: ContractsConfig,
    #[serde(default)]
    pub precompiles: PrecompilesConfig,
    #[serde(default)]
    pub universe: UniverseConfig,
    #[serde(default)]
    pub batch: BatchConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct ContractsConfig {
    pub multicall: Address,
    pub core_writer: Address,
}

impl Default for ContractsConfig {
    fn default() -> Self {
        Self {
            multicall: address!("ca11bde05977b3631167028862be2a173976ca11"),
            core_writer: address!("3333333333333333333333333333333333333333"),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct PrecompilesConfig {
    pub position: Address,
    pub spot_balance: Address,
    pub mark_px: Address,
    pub oracle_px: Address,
    pub spot_px: Address,
    pub perp_asset_info: Address,
}

impl Default for PrecompilesConfig {
    fn default() -> Self {
        Self {
            position: address!("0000000000000000000000000000000000000800"),
            spot_balance: address!("0000000000000000000000000000000000000801"),
            mark_px: address!("0000000000000000000000000000000000000806"),
            oracle_px: address!("0000000000000000000000000000000000000807"),
            spot_px: address!("0000000000000000000000000000000000000808"),
            perp_asset_info: address!("000000000000000000000000000000000000080a"),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct UniverseConfig {
    pub perp_count: u64,
    pub spot_token_count: u64,
}

impl Default for UniverseConfig {
    fn default() -> Self {
        Self {
            perp_count: DEFAULT_PERP_COUNT,
            spot_token_count: DEFAULT_SPOT_TOKEN_COUNT,
        }
    }
}

impl UniverseConfig {
    pub fn perp_indices(&self) -> Vec<u64> {
        (0..self.perp_count).collect()
    }

    pub fn spot_token_indices(&self) -> Vec<u64> {
        (0..self.spot_token_count).collect()
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct BatchConfig {
    pub perp_chunk_size: usize,
    pub spot_chunk_size: usize,
    pub dispatch: ChunkDispatch,
    pub parallelism: usize,
    pub on_decode_failure: DecodeFailurePolicy,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            perp_chunk_size: DEFAULT_PERP_CHUNK_SIZE,
            spot_chunk_size: DEFAULT_SPOT_CHUNK_SIZE,
            dispatch: ChunkDispatch::default(),
            parallelism: DEFAULT_PARALLELISM,
            on_decode_failure: DecodeFailurePolicy::default(),
        }
    }
}

impl BatchConfig {
    pub fn perp_options(&self) -> AggregationOptions {
        AggregationOptions {
            chunk_size: self.perp_chunk_size,
            dispatch: self.dispatch,
            parallelism: self.parallelism,
            on_decode_failure: self.on_decode_failure,
        }
    }

    pub fn spot_options(&self) -> AggregationOptions {
        AggregationOptions {
            chunk_size: self.spot_chunk_size,
            dispatch: self.dispatch,
            parallelism: self.parallelism,
            on_decode_failure: self.on_decode_failure,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), String> {
        if self.batch.perp_chunk_size == 0 {
            return Err("batch.perp_chunk_size must be > 0".to_string());
        }
        if self.batch.spot_chunk_size == 0 {
            return Err("batch.spot_chunk_size must be > 0".to_string());
        }
        if self.batch.parallelism == 0 {
            return Err("batch.parallelism must be > 0".to_string());
        }
        // Position calldata carries the perp index as uint16.
        if self.universe.perp_count > u64::from(u16::MAX) + 1 {
            return Err(format!(
                "universe.perp_count must be <= {}, got {}",
                u64::from(u16::MAX) + 1,
                self.universe.perp_count
            ));
        }
        // Spot indices travel as uint32.
        if self.universe.spot_token_count > u64::from(u32::MAX) + 1 {
            return Err(format!(
                "universe.spot_token_count must be <= {}, got {}",
                u64::from(u32::MAX) + 1,
                self.universe.spot_token_count
            ));
        }
        Ok(())
    }
}

pub fn parse_config(contents: &str) -> Result<Config, String> {
    let config: Config =
        toml::from_str(contents).map_err(|err| format!("failed to parse TOML config: {err}"))?;
    config.validate()?;
    Ok(config)
}

pub fn load_config(path: &Path) -> Result<Config, String> {
    let (config, _source) = load_config_with_source(path)?;
    Ok(config)
}

pub fn load_config_with_source(path: &Path) -> Result<(Config, String), String> {
    let contents = fs::read_to_string(path)
        .map_err(|err| format!("failed to read config {}: {}", path.display(), err))?;
    let config: Config = toml::from_str(&contents)
        .map_err(|err| format!("failed to parse TOML {}: {}", path.display(), err))?;
    config
        .validate()
        .map_err(|err| format!("invalid config {}: {err}", path.display()))?;
    Ok((config, contents))
}

pub fn to_toml_pretty(config: &Config) -> Result<String, String> {
    toml::to_string_pretty(config)
        .map_err(|err| format!("failed to serialize config as TOML: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_production_defaults() {
        let config = parse_config("").expect("empty config should parse");
        assert_eq!(config, Config::default());
        assert_eq!(config.universe.perp_count, 225);
        assert_eq!(config.universe.spot_token_count, 425);
        assert_eq!(config.batch.perp_chunk_size, 200);
        assert_eq!(config.batch.spot_chunk_size, 300);
        assert_eq!(config.batch.dispatch, ChunkDispatch::Sequential);
        assert_eq!(config.batch.on_decode_failure, DecodeFailurePolicy::Skip);
        assert_eq!(
            config.precompiles.perp_asset_info,
            address!("000000000000000000000000000000000000080a")
        );
    }

    #[test]
    fn partial_sections_override_only_named_fields() {
        let toml_str = r#"
[universe]
perp_count = 10

[batch]
perp_chunk_size = 4
dispatch = "parallel"
on_decode_failure = "fail"

[contracts]
multicall = "0x1111111111111111111111111111111111111111"
"#;
        let config = parse_config(toml_str).expect("config should parse");
        assert_eq!(config.universe.perp_count, 10);
        assert_eq!(config.universe.spot_token_count, 425);
        assert_eq!(config.batch.perp_chunk_size, 4);
        assert_eq!(config.batch.spot_chunk_size, 300);
        assert_eq!(config.batch.dispatch, ChunkDispatch::Parallel);
        assert_eq!(config.batch.on_decode_failure, DecodeFailurePolicy::Fail);
        assert_eq!(config.contracts.multicall, Address::repeat_byte(0x11));
        assert_eq!(
            config.contracts.core_writer,
            ContractsConfig::default().core_writer
        );
    }

    #[test]
    fn parse_config_rejects_unknown_fields() {
        let err = parse_config("[batch]\nchunk = 5\n").expect_err("unknown field should fail");
        assert!(err.to_lowercase().contains("unknown field"));
    }

    #[test]
    fn parse_config_rejects_zero_chunk_size() {
        let err = parse_config("[batch]\nspot_chunk_size = 0\n").expect_err("zero chunk");
        assert!(err.contains("spot_chunk_size"));
    }

    #[test]
    fn parse_config_rejects_perp_universe_beyond_uint16() {
        let err = parse_config("[universe]\nperp_count = 70000\n").expect_err("too many perps");
        assert!(err.contains("perp_count"));
    }

    #[test]
    fn parse_config_rejects_spot_universe_beyond_uint32() {
        let err = parse_config("[universe]\nspot_token_count = 9223372036854775807\n")
            .expect_err("too many spot tokens");
        assert!(err.contains("spot_token_count"));
        let err = parse_config("[universe]\nspot_token_count = 4294967297\n")
            .expect_err("one past uint32");
        assert!(err.contains("spot_token_count"));
    }

    #[test]
    fn parse_config_rejects_zero_parallelism() {
        let err = parse_config("[batch]\nparallelism = 0\n").expect_err("zero parallelism");
        assert!(err.contains("parallelism"));
    }

    #[test]
    fn parallelism_reaches_aggregation_options() {
        let config = parse_config("[batch]\ndispatch = \"parallel\"\nparallelism = 2\n")
            .expect("config should parse");
        let options = config.batch.spot_options();
        assert_eq!(options.parallelism, 2);
        assert_eq!(options.dispatch, ChunkDispatch::Parallel);
        assert_eq!(options.chunk_size, 300);
    }

    #[test]
    fn serialized_config_parses_back() {
        let config = Config::default();
        let rendered = to_toml_pretty(&config).expect("serialize");
        assert_eq!(parse_config(&rendered).expect("reparse"), config);
    }

    #[test]
    fn universe_enumerates_every_index() {
        let universe = UniverseConfig {
            perp_count: 3,
            spot_token_count: 0,
        };
        assert_eq!(universe.perp_indices(), vec![0, 1, 2]);
        assert!(universe.spot_token_indices().is_empty());
    }
}
