use crate::errors::CodecError;
use crate::value_objects::action_kind::ActionKind;
use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitOrder {
    pub asset: u32,
    pub is_buy: bool,
    /// Raw price, 8 decimals.
    pub limit_px: u64,
    /// Raw size, `sz_decimals` of the asset.
    pub sz: u64,
    pub reduce_only: bool,
    pub tif: u8,
    /// Client order id, 0 when unset.
    pub cloid: u128,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultTransfer {
    pub vault: Address,
    pub is_deposit: bool,
    /// Raw USD, 6 decimals.
    pub usd: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenDelegate {
    pub validator: Address,
    pub wei: u64,
    pub is_undelegate: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Staking {
    pub wei: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpotSend {
    pub destination: Address,
    pub token: u64,
    pub wei: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsdClassTransfer {
    pub ntl: u64,
    /// true moves spot to perp, false perp to spot.
    pub to_perp: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinalizeVariant {
    Create,
    FirstStorageSlot,
    CustomStorageSlot,
}

impl FinalizeVariant {
    pub fn as_u8(self) -> u8 {
        match self {
            FinalizeVariant::Create => 1,
            FinalizeVariant::FirstStorageSlot => 2,
            FinalizeVariant::CustomStorageSlot => 3,
        }
    }
}

impl TryFrom<u8> for FinalizeVariant {
    type Error = CodecError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(FinalizeVariant::Create),
            2 => Ok(FinalizeVariant::FirstStorageSlot),
            3 => Ok(FinalizeVariant::CustomStorageSlot),
            other => Err(CodecError::OutOfRange {
                field: "finalize_evm_contract.variant",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalizeEvmContract {
    pub token: u64,
    pub variant: FinalizeVariant,
    pub create_nonce: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddApiWallet {
    pub wallet: Address,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelOrderByOid {
    pub asset: u32,
    pub oid: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelOrderByCloid {
    pub asset: u32,
    pub cloid: u128,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApproveBuilderFee {
    pub max_fee_rate: u64,
    pub builder: Address,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendAsset {
    pub dest: Address,
    pub sub_account: Address,
    pub src_dex: u32,
    pub dest_dex: u32,
    pub token: u64,
    pub wei: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReflectEvmSupply {
    pub token: u64,
    pub wei: u64,
    pub is_mint: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BorrowLendOperation {
    Deposit,
    Withdraw,
    Borrow,
    Repay,
}

impl BorrowLendOperation {
    pub fn as_u8(self) -> u8 {
        match self {
            BorrowLendOperation::Deposit => 0,
            BorrowLendOperation::Withdraw => 1,
            BorrowLendOperation::Borrow => 2,
            BorrowLendOperation::Repay => 3,
        }
    }
}

impl TryFrom<u8> for BorrowLendOperation {
    type Error = CodecError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(BorrowLendOperation::Deposit),
            1 => Ok(BorrowLendOperation::Withdraw),
            2 => Ok(BorrowLendOperation::Borrow),
            3 => Ok(BorrowLendOperation::Repay),
            other => Err(CodecError::OutOfRange {
                field: "borrow_lend_op.operation",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorrowLendOp {
    pub operation: BorrowLendOperation,
    pub token: u64,
    pub wei: u64,
}

/// A state-changing instruction for the execution engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    LimitOrder(LimitOrder),
    VaultTransfer(VaultTransfer),
    TokenDelegate(TokenDelegate),
    StakingDeposit(Staking),
    StakingWithdraw(Staking),
    SpotSend(SpotSend),
    UsdClassTransfer(UsdClassTransfer),
    FinalizeEvmContract(FinalizeEvmContract),
    AddApiWallet(AddApiWallet),
    CancelOrderByOid(CancelOrderByOid),
    CancelOrderByCloid(CancelOrderByCloid),
    ApproveBuilderFee(ApproveBuilderFee),
    SendAsset(SendAsset),
    ReflectEvmSupply(ReflectEvmSupply),
    BorrowLendOp(BorrowLendOp),
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::LimitOrder(_) => ActionKind::LimitOrder,
            Action::VaultTransfer(_) => ActionKind::VaultTransfer,
            Action::TokenDelegate(_) => ActionKind::TokenDelegate,
            Action::StakingDeposit(_) => ActionKind::StakingDeposit,
            Action::StakingWithdraw(_) => ActionKind::StakingWithdraw,
            Action::SpotSend(_) => ActionKind::SpotSend,
            Action::UsdClassTransfer(_) => ActionKind::UsdClassTransfer,
            Action::FinalizeEvmContract(_) => ActionKind::FinalizeEvmContract,
            Action::AddApiWallet(_) => ActionKind::AddApiWallet,
            Action::CancelOrderByOid(_) => ActionKind::CancelOrderByOid,
            Action::CancelOrderByCloid(_) => ActionKind::CancelOrderByCloid,
            Action::ApproveBuilderFee(_) => ActionKind::ApproveBuilderFee,
            Action::SendAsset(_) => ActionKind::SendAsset,
            Action::ReflectEvmSupply(_) => ActionKind::ReflectEvmSupply,
            Action::BorrowLendOp(_) => ActionKind::BorrowLendOp,
        }
    }
}
