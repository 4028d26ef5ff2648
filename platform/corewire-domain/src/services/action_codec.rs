use crate::errors::{CodecError, DecodeError};
use crate::services::abi::{self, AbiReader, Token, WORD};
use crate::value_objects::action::{
    AddApiWallet, ApproveBuilderFee, BorrowLendOp, BorrowLendOperation, CancelOrderByCloid,
    CancelOrderByOid, FinalizeEvmContract, FinalizeVariant, LimitOrder, ReflectEvmSupply,
    SendAsset, SpotSend, Staking, TokenDelegate, UsdClassTransfer, VaultTransfer,
};
use crate::value_objects::action::Action;
use crate::value_objects::action_kind::ActionKind;
use crate::value_objects::encoded_action::{ActionHeader, EncodedAction, ACTION_VERSION, HEADER_LEN};

pub fn encode_header(kind: ActionKind) -> [u8; HEADER_LEN] {
    let id = kind.id();
    [
        ACTION_VERSION,
        ((id >> 16) & 0xff) as u8,
        ((id >> 8) & 0xff) as u8,
        (id & 0xff) as u8,
    ]
}

/// Header followed by the parameter tuple. Stateless: equal actions encode to
/// equal bytes.
pub fn encode_action(action: &Action) -> EncodedAction {
    let params = abi::encode(&param_tokens(action));
    let mut bytes = Vec::with_capacity(HEADER_LEN + params.len());
    bytes.extend_from_slice(&encode_header(action.kind()));
    bytes.extend_from_slice(&params);
    EncodedAction::new(bytes)
}

pub fn decode_header(bytes: &[u8]) -> Result<ActionHeader, CodecError> {
    if bytes.len() < HEADER_LEN {
        return Err(CodecError::MalformedAction { len: bytes.len() });
    }
    let action_id =
        (u32::from(bytes[1]) << 16) | (u32::from(bytes[2]) << 8) | u32::from(bytes[3]);
    Ok(ActionHeader {
        version: bytes[0],
        action_id,
        params: bytes[HEADER_LEN..].to_vec(),
    })
}

pub fn decode_header_hex(raw: &str) -> Result<ActionHeader, CodecError> {
    decode_header(&parse_hex(raw)?)
}

/// Full decode back into a typed action. Only version `0x01` is understood.
pub fn decode_action(bytes: &[u8]) -> Result<Action, CodecError> {
    let header = decode_header(bytes)?;
    if header.version != ACTION_VERSION {
        return Err(CodecError::UnsupportedVersion(header.version));
    }
    let kind = ActionKind::try_from(header.action_id)?;
    decode_params(kind, &header.params)
}

/// Accepts hex with or without a `0x`/`0X` prefix.
pub fn parse_hex(raw: &str) -> Result<Vec<u8>, CodecError> {
    let trimmed = raw.trim();
    let without_prefix = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    hex::decode(without_prefix).map_err(|err| CodecError::InvalidHex(err.to_string()))
}

fn param_tokens(action: &Action) -> Vec<Token> {
    match action {
        Action::LimitOrder(p) => vec![
            Token::Uint(p.asset.into()),
            Token::Bool(p.is_buy),
            Token::Uint(p.limit_px.into()),
            Token::Uint(p.sz.into()),
            Token::Bool(p.reduce_only),
            Token::Uint(p.tif.into()),
            Token::Uint(p.cloid),
        ],
        Action::VaultTransfer(p) => vec![
            Token::Address(p.vault),
            Token::Bool(p.is_deposit),
            Token::Uint(p.usd.into()),
        ],
        Action::TokenDelegate(p) => vec![
            Token::Address(p.validator),
            Token::Uint(p.wei.into()),
            Token::Bool(p.is_undelegate),
        ],
        Action::StakingDeposit(p) | Action::StakingWithdraw(p) => vec![Token::Uint(p.wei.into())],
        Action::SpotSend(p) => vec![
            Token::Address(p.destination),
            Token::Uint(p.token.into()),
            Token::Uint(p.wei.into()),
        ],
        Action::UsdClassTransfer(p) => vec![Token::Uint(p.ntl.into()), Token::Bool(p.to_perp)],
        Action::FinalizeEvmContract(p) => vec![
            Token::Uint(p.token.into()),
            Token::Uint(p.variant.as_u8().into()),
            Token::Uint(p.create_nonce.into()),
        ],
        Action::AddApiWallet(p) => vec![Token::Address(p.wallet), Token::String(p.name.clone())],
        Action::CancelOrderByOid(p) => {
            vec![Token::Uint(p.asset.into()), Token::Uint(p.oid.into())]
        }
        Action::CancelOrderByCloid(p) => vec![Token::Uint(p.asset.into()), Token::Uint(p.cloid)],
        Action::ApproveBuilderFee(p) => {
            vec![Token::Uint(p.max_fee_rate.into()), Token::Address(p.builder)]
        }
        Action::SendAsset(p) => vec![
            Token::Address(p.dest),
            Token::Address(p.sub_account),
            Token::Uint(p.src_dex.into()),
            Token::Uint(p.dest_dex.into()),
            Token::Uint(p.token.into()),
            Token::Uint(p.wei.into()),
        ],
        Action::ReflectEvmSupply(p) => vec![
            Token::Uint(p.token.into()),
            Token::Uint(p.wei.into()),
            Token::Bool(p.is_mint),
        ],
        Action::BorrowLendOp(p) => vec![
            Token::Uint(p.operation.as_u8().into()),
            Token::Uint(p.token.into()),
            Token::Uint(p.wei.into()),
        ],
    }
}

fn decode_params(kind: ActionKind, params: &[u8]) -> Result<Action, CodecError> {
    let r = AbiReader::new(params);
    let w = |index: usize| index * WORD;

    let action = match kind {
        ActionKind::LimitOrder => Action::LimitOrder(LimitOrder {
            asset: r.u32_at(w(0), "asset")?,
            is_buy: r.bool_at(w(1), "is_buy")?,
            limit_px: r.u64_at(w(2), "limit_px")?,
            sz: r.u64_at(w(3), "sz")?,
            reduce_only: r.bool_at(w(4), "reduce_only")?,
            tif: r.u8_at(w(5), "tif")?,
            cloid: r.u128_at(w(6), "cloid")?,
        }),
        ActionKind::VaultTransfer => Action::VaultTransfer(VaultTransfer {
            vault: r.address_at(w(0), "vault")?,
            is_deposit: r.bool_at(w(1), "is_deposit")?,
            usd: r.u64_at(w(2), "usd")?,
        }),
        ActionKind::TokenDelegate => Action::TokenDelegate(TokenDelegate {
            validator: r.address_at(w(0), "validator")?,
            wei: r.u64_at(w(1), "wei")?,
            is_undelegate: r.bool_at(w(2), "is_undelegate")?,
        }),
        ActionKind::StakingDeposit => Action::StakingDeposit(Staking {
            wei: r.u64_at(w(0), "wei")?,
        }),
        ActionKind::StakingWithdraw => Action::StakingWithdraw(Staking {
            wei: r.u64_at(w(0), "wei")?,
        }),
        ActionKind::SpotSend => Action::SpotSend(SpotSend {
            destination: r.address_at(w(0), "destination")?,
            token: r.u64_at(w(1), "token")?,
            wei: r.u64_at(w(2), "wei")?,
        }),
        ActionKind::UsdClassTransfer => Action::UsdClassTransfer(UsdClassTransfer {
            ntl: r.u64_at(w(0), "ntl")?,
            to_perp: r.bool_at(w(1), "to_perp")?,
        }),
        ActionKind::FinalizeEvmContract => Action::FinalizeEvmContract(FinalizeEvmContract {
            token: r.u64_at(w(0), "token")?,
            variant: FinalizeVariant::try_from(r.u8_at(w(1), "variant")?)?,
            create_nonce: r.u64_at(w(2), "create_nonce")?,
        }),
        ActionKind::AddApiWallet => {
            let name = r.dynamic_bytes(w(1), "name")?;
            Action::AddApiWallet(AddApiWallet {
                wallet: r.address_at(w(0), "wallet")?,
                name: String::from_utf8(name.to_vec())
                    .map_err(|_| DecodeError::InvalidValue { field: "name" })?,
            })
        }
        ActionKind::CancelOrderByOid => Action::CancelOrderByOid(CancelOrderByOid {
            asset: r.u32_at(w(0), "asset")?,
            oid: r.u64_at(w(1), "oid")?,
        }),
        ActionKind::CancelOrderByCloid => Action::CancelOrderByCloid(CancelOrderByCloid {
            asset: r.u32_at(w(0), "asset")?,
            cloid: r.u128_at(w(1), "cloid")?,
        }),
        ActionKind::ApproveBuilderFee => Action::ApproveBuilderFee(ApproveBuilderFee {
            max_fee_rate: r.u64_at(w(0), "max_fee_rate")?,
            builder: r.address_at(w(1), "builder")?,
        }),
        ActionKind::SendAsset => Action::SendAsset(SendAsset {
            dest: r.address_at(w(0), "dest")?,
            sub_account: r.address_at(w(1), "sub_account")?,
            src_dex: r.u32_at(w(2), "src_dex")?,
            dest_dex: r.u32_at(w(3), "dest_dex")?,
            token: r.u64_at(w(4), "token")?,
            wei: r.u64_at(w(5), "wei")?,
        }),
        ActionKind::ReflectEvmSupply => Action::ReflectEvmSupply(ReflectEvmSupply {
            token: r.u64_at(w(0), "token")?,
            wei: r.u64_at(w(1), "wei")?,
            is_mint: r.bool_at(w(2), "is_mint")?,
        }),
        ActionKind::BorrowLendOp => Action::BorrowLendOp(BorrowLendOp {
            operation: BorrowLendOperation::try_from(r.u8_at(w(0), "operation")?)?,
            token: r.u64_at(w(1), "token")?,
            wei: r.u64_at(w(2), "wei")?,
        }),
    };
    Ok(action)
}
