//! Universe-wide reads composed from the batch aggregator and the precompile
//! decoders.

use crate::aggregation::{AggregationError, AggregationOptions, BatchAggregator};
use crate::config::Config;
use alloy_primitives::Address;
use corewire_domain::repositories::batch_caller::BatchCaller;
use corewire_domain::services::precompile;
use corewire_domain::value_objects::records::{PerpAssetInfo, Position, PriceQuote, SpotBalance};
use std::collections::BTreeMap;
use tracing::info_span;

pub struct PrecompileQueries<'a, B: BatchCaller + Sync + ?Sized> {
    caller: &'a B,
    config: &'a Config,
}

impl<'a, B: BatchCaller + Sync + ?Sized> PrecompileQueries<'a, B> {
    pub fn new(caller: &'a B, config: &'a Config) -> Self {
        Self { caller, config }
    }

    fn perp_options(&self) -> AggregationOptions {
        self.config.batch.perp_options()
    }

    fn spot_options(&self) -> AggregationOptions {
        self.config.batch.spot_options()
    }

    pub fn get_positions(
        &self,
        user: Address,
        perps: &[u64],
    ) -> Result<BTreeMap<u64, Position>, AggregationError> {
        let _span = info_span!("get_positions", user = %user, count = perps.len()).entered();
        BatchAggregator::new(self.caller).run(
            perps,
            self.config.precompiles.position,
            &self.perp_options(),
            |perp| precompile::position_call_data(user, perp),
            precompile::try_decode_position,
        )
    }

    pub fn get_all_positions(
        &self,
        user: Address,
    ) -> Result<BTreeMap<u64, Position>, AggregationError> {
        self.get_positions(user, &self.config.universe.perp_indices())
    }

    pub fn get_non_zero_positions(
        &self,
        user: Address,
    ) -> Result<BTreeMap<u64, Position>, AggregationError> {
        let mut positions = self.get_all_positions(user)?;
        positions.retain(|_, position| position.szi != 0);
        Ok(positions)
    }

    pub fn get_spot_balances(
        &self,
        user: Address,
        tokens: &[u64],
    ) -> Result<BTreeMap<u64, SpotBalance>, AggregationError> {
        let _span = info_span!("get_spot_balances", user = %user, count = tokens.len()).entered();
        BatchAggregator::new(self.caller).run(
            tokens,
            self.config.precompiles.spot_balance,
            &self.spot_options(),
            |token| Ok(precompile::spot_balance_call_data(user, token)),
            precompile::try_decode_spot_balance,
        )
    }

    pub fn get_all_spot_balances(
        &self,
        user: Address,
    ) -> Result<BTreeMap<u64, SpotBalance>, AggregationError> {
        self.get_spot_balances(user, &self.config.universe.spot_token_indices())
    }

    pub fn get_non_zero_spot_balances(
        &self,
        user: Address,
    ) -> Result<BTreeMap<u64, SpotBalance>, AggregationError> {
        let mut balances = self.get_all_spot_balances(user)?;
        balances.retain(|_, balance| balance.total != 0);
        Ok(balances)
    }

    pub fn get_perp_asset_infos(
        &self,
        perps: &[u64],
    ) -> Result<BTreeMap<u64, PerpAssetInfo>, AggregationError> {
        let _span = info_span!("get_perp_asset_infos", count = perps.len()).entered();
        BatchAggregator::new(self.caller).run(
            perps,
            self.config.precompiles.perp_asset_info,
            &self.perp_options(),
            precompile::index_call_data,
            precompile::try_decode_perp_asset_info,
        )
    }

    pub fn get_all_perp_asset_infos(&self) -> Result<BTreeMap<u64, PerpAssetInfo>, AggregationError> {
        self.get_perp_asset_infos(&self.config.universe.perp_indices())
    }

    pub fn get_mark_prices(
        &self,
        perps: &[u64],
    ) -> Result<BTreeMap<u64, PriceQuote>, AggregationError> {
        let _span = info_span!("get_mark_prices", count = perps.len()).entered();
        self.prices(perps, self.config.precompiles.mark_px, &self.perp_options())
    }

    pub fn get_all_mark_prices(&self) -> Result<BTreeMap<u64, PriceQuote>, AggregationError> {
        self.get_mark_prices(&self.config.universe.perp_indices())
    }

    pub fn get_oracle_prices(
        &self,
        perps: &[u64],
    ) -> Result<BTreeMap<u64, PriceQuote>, AggregationError> {
        let _span = info_span!("get_oracle_prices", count = perps.len()).entered();
        self.prices(perps, self.config.precompiles.oracle_px, &self.perp_options())
    }

    /// Indices are spot pair indices, chunked like spot balances.
    pub fn get_spot_prices(
        &self,
        spots: &[u64],
    ) -> Result<BTreeMap<u64, PriceQuote>, AggregationError> {
        let _span = info_span!("get_spot_prices", count = spots.len()).entered();
        self.prices(spots, self.config.precompiles.spot_px, &self.spot_options())
    }

    fn prices(
        &self,
        indices: &[u64],
        target: Address,
        options: &AggregationOptions,
    ) -> Result<BTreeMap<u64, PriceQuote>, AggregationError> {
        BatchAggregator::new(self.caller).run(
            indices,
            target,
            options,
            precompile::index_call_data,
            precompile::try_decode_price,
        )
    }
}
