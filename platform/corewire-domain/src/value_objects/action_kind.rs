use crate::errors::CodecError;
use serde::{Deserialize, Serialize};

/// Discriminant of an action; the numeric id travels as a 3-byte big-endian
/// field in the action header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    LimitOrder,
    VaultTransfer,
    TokenDelegate,
    StakingDeposit,
    StakingWithdraw,
    SpotSend,
    UsdClassTransfer,
    FinalizeEvmContract,
    AddApiWallet,
    CancelOrderByOid,
    CancelOrderByCloid,
    ApproveBuilderFee,
    SendAsset,
    ReflectEvmSupply,
    BorrowLendOp,
}

impl ActionKind {
    pub const ALL: [ActionKind; 15] = [
        ActionKind::LimitOrder,
        ActionKind::VaultTransfer,
        ActionKind::TokenDelegate,
        ActionKind::StakingDeposit,
        ActionKind::StakingWithdraw,
        ActionKind::SpotSend,
        ActionKind::UsdClassTransfer,
        ActionKind::FinalizeEvmContract,
        ActionKind::AddApiWallet,
        ActionKind::CancelOrderByOid,
        ActionKind::CancelOrderByCloid,
        ActionKind::ApproveBuilderFee,
        ActionKind::SendAsset,
        ActionKind::ReflectEvmSupply,
        ActionKind::BorrowLendOp,
    ];

    pub fn id(self) -> u32 {
        match self {
            ActionKind::LimitOrder => 1,
            ActionKind::VaultTransfer => 2,
            ActionKind::TokenDelegate => 3,
            ActionKind::StakingDeposit => 4,
            ActionKind::StakingWithdraw => 5,
            ActionKind::SpotSend => 6,
            ActionKind::UsdClassTransfer => 7,
            ActionKind::FinalizeEvmContract => 8,
            ActionKind::AddApiWallet => 9,
            ActionKind::CancelOrderByOid => 10,
            ActionKind::CancelOrderByCloid => 11,
            ActionKind::ApproveBuilderFee => 12,
            ActionKind::SendAsset => 13,
            ActionKind::ReflectEvmSupply => 14,
            ActionKind::BorrowLendOp => 15,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::LimitOrder => "limit_order",
            ActionKind::VaultTransfer => "vault_transfer",
            ActionKind::TokenDelegate => "token_delegate",
            ActionKind::StakingDeposit => "staking_deposit",
            ActionKind::StakingWithdraw => "staking_withdraw",
            ActionKind::SpotSend => "spot_send",
            ActionKind::UsdClassTransfer => "usd_class_transfer",
            ActionKind::FinalizeEvmContract => "finalize_evm_contract",
            ActionKind::AddApiWallet => "add_api_wallet",
            ActionKind::CancelOrderByOid => "cancel_order_by_oid",
            ActionKind::CancelOrderByCloid => "cancel_order_by_cloid",
            ActionKind::ApproveBuilderFee => "approve_builder_fee",
            ActionKind::SendAsset => "send_asset",
            ActionKind::ReflectEvmSupply => "reflect_evm_supply",
            ActionKind::BorrowLendOp => "borrow_lend_op",
        }
    }
}

impl TryFrom<u32> for ActionKind {
    type Error = CodecError;

    fn try_from(id: u32) -> Result<Self, Self::Error> {
        ActionKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.id() == id)
            .ok_or(CodecError::UnknownActionId(id))
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_dense_from_one_to_fifteen() {
        let ids: Vec<u32> = ActionKind::ALL.iter().map(|kind| kind.id()).collect();
        assert_eq!(ids, (1..=15).collect::<Vec<_>>());
    }

    #[test]
    fn unknown_ids_are_rejected() {
        assert_eq!(ActionKind::try_from(0), Err(CodecError::UnknownActionId(0)));
        assert_eq!(
            ActionKind::try_from(16),
            Err(CodecError::UnknownActionId(16))
        );
        assert_eq!(ActionKind::try_from(9), Ok(ActionKind::AddApiWallet));
    }
}
