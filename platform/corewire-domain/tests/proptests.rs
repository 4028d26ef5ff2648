use alloy_primitives::Address;
use corewire_domain::services::action_codec::{decode_action, decode_header, encode_action};
use corewire_domain::services::precompile::{
    decode_perp_asset_info, decode_position, decode_price, decode_spot_balance,
};
use corewire_domain::value_objects::action::{
    Action, AddApiWallet, ApproveBuilderFee, BorrowLendOp, BorrowLendOperation,
    CancelOrderByCloid, CancelOrderByOid, FinalizeEvmContract, FinalizeVariant, LimitOrder,
    ReflectEvmSupply, SendAsset, SpotSend, Staking, TokenDelegate, UsdClassTransfer,
    VaultTransfer,
};
use corewire_domain::value_objects::encoded_action::ACTION_VERSION;
use proptest::prelude::*;

fn address() -> impl Strategy<Value = Address> {
    any::<[u8; 20]>().prop_map(Address::from)
}

fn finalize_variant() -> impl Strategy<Value = FinalizeVariant> {
    prop_oneof![
        Just(FinalizeVariant::Create),
        Just(FinalizeVariant::FirstStorageSlot),
        Just(FinalizeVariant::CustomStorageSlot),
    ]
}

fn borrow_lend_operation() -> impl Strategy<Value = BorrowLendOperation> {
    prop_oneof![
        Just(BorrowLendOperation::Deposit),
        Just(BorrowLendOperation::Withdraw),
        Just(BorrowLendOperation::Borrow),
        Just(BorrowLendOperation::Repay),
    ]
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        (
            any::<u32>(),
            any::<bool>(),
            any::<u64>(),
            any::<u64>(),
            any::<bool>(),
            any::<u8>(),
            any::<u128>()
        )
            .prop_map(|(asset, is_buy, limit_px, sz, reduce_only, tif, cloid)| {
                Action::LimitOrder(LimitOrder {
                    asset,
                    is_buy,
                    limit_px,
                    sz,
                    reduce_only,
                    tif,
                    cloid,
                })
            }),
        (address(), any::<bool>(), any::<u64>()).prop_map(|(vault, is_deposit, usd)| {
            Action::VaultTransfer(VaultTransfer {
                vault,
                is_deposit,
                usd,
            })
        }),
        (address(), any::<u64>(), any::<bool>()).prop_map(|(validator, wei, is_undelegate)| {
            Action::TokenDelegate(TokenDelegate {
                validator,
                wei,
                is_undelegate,
            })
        }),
        any::<u64>().prop_map(|wei| Action::StakingDeposit(Staking { wei })),
        any::<u64>().prop_map(|wei| Action::StakingWithdraw(Staking { wei })),
        (address(), any::<u64>(), any::<u64>()).prop_map(|(destination, token, wei)| {
            Action::SpotSend(SpotSend {
                destination,
                token,
                wei,
            })
        }),
        (any::<u64>(), any::<bool>())
            .prop_map(|(ntl, to_perp)| Action::UsdClassTransfer(UsdClassTransfer { ntl, to_perp })),
        (any::<u64>(), finalize_variant(), any::<u64>()).prop_map(
            |(token, variant, create_nonce)| {
                Action::FinalizeEvmContract(FinalizeEvmContract {
                    token,
                    variant,
                    create_nonce,
                })
            }
        ),
        (address(), "\\PC{0,80}")
            .prop_map(|(wallet, name)| Action::AddApiWallet(AddApiWallet { wallet, name })),
        (any::<u32>(), any::<u64>())
            .prop_map(|(asset, oid)| Action::CancelOrderByOid(CancelOrderByOid { asset, oid })),
        (any::<u32>(), any::<u128>()).prop_map(|(asset, cloid)| {
            Action::CancelOrderByCloid(CancelOrderByCloid { asset, cloid })
        }),
        (any::<u64>(), address()).prop_map(|(max_fee_rate, builder)| {
            Action::ApproveBuilderFee(ApproveBuilderFee {
                max_fee_rate,
                builder,
            })
        }),
        (
            address(),
            address(),
            any::<u32>(),
            any::<u32>(),
            any::<u64>(),
            any::<u64>()
        )
            .prop_map(|(dest, sub_account, src_dex, dest_dex, token, wei)| {
                Action::SendAsset(SendAsset {
                    dest,
                    sub_account,
                    src_dex,
                    dest_dex,
                    token,
                    wei,
                })
            }),
        (any::<u64>(), any::<u64>(), any::<bool>()).prop_map(|(token, wei, is_mint)| {
            Action::ReflectEvmSupply(ReflectEvmSupply {
                token,
                wei,
                is_mint,
            })
        }),
        (borrow_lend_operation(), any::<u64>(), any::<u64>()).prop_map(
            |(operation, token, wei)| Action::BorrowLendOp(BorrowLendOp {
                operation,
                token,
                wei,
            })
        ),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    #[test]
    fn header_identifies_every_action(action in action()) {
        let encoded = encode_action(&action);
        let header = decode_header(encoded.as_bytes()).expect("header");
        prop_assert_eq!(header.version, ACTION_VERSION);
        prop_assert_eq!(header.action_id, action.kind().id());
    }

    #[test]
    fn encoding_is_deterministic(action in action()) {
        prop_assert_eq!(encode_action(&action), encode_action(&action.clone()));
    }

    #[test]
    fn params_are_word_aligned(action in action()) {
        let encoded = encode_action(&action);
        prop_assert_eq!((encoded.as_bytes().len() - 4) % 32, 0);
    }

    #[test]
    fn decoded_action_re_encodes_identically(action in action()) {
        let encoded = encode_action(&action);
        let decoded = decode_action(encoded.as_bytes()).expect("decode");
        prop_assert_eq!(&decoded, &action);
        prop_assert_eq!(encode_action(&decoded), encoded);
    }

    #[test]
    fn decoders_absorb_arbitrary_bytes(bytes in prop::collection::vec(any::<u8>(), 0..400)) {
        let _ = decode_position(0, &bytes);
        let _ = decode_spot_balance(0, &bytes);
        let _ = decode_perp_asset_info(0, &bytes);
        let _ = decode_price(0, &bytes);
        let _ = decode_action(&bytes);
    }

    #[test]
    fn truncated_actions_never_decode_to_a_different_action(action in action(), cut in 0usize..64) {
        let encoded = encode_action(&action);
        let len = encoded.as_bytes().len().saturating_sub(cut + 1);
        if let Ok(decoded) = decode_action(&encoded.as_bytes()[..len]) {
            // Only possible when the cut removed padding of the trailing string.
            prop_assert_eq!(decoded, action);
        }
    }
}
