use alloy_primitives::Address;
use corewire_domain::services::action_codec::{decode_header_hex, encode_action};
use corewire_domain::value_objects::action::{
    Action, ApproveBuilderFee, BorrowLendOp, BorrowLendOperation, CancelOrderByCloid,
    FinalizeEvmContract, FinalizeVariant, LimitOrder, SendAsset, TokenDelegate, VaultTransfer,
};
use corewire_domain::value_objects::scale::{price_to_raw, usd_to_raw};

const SAMPLE: &str = "0x1234567890123456789012345678901234567890";

fn sample_address() -> Address {
    SAMPLE.parse().expect("sample address should parse")
}

fn words(action: &Action) -> Vec<String> {
    let encoded = encode_action(action);
    encoded.as_bytes()[4..]
        .chunks(32)
        .map(hex::encode)
        .collect()
}

fn uint(value: u128) -> String {
    format!("{value:064x}")
}

fn addr() -> String {
    format!("{:0>64}", SAMPLE.trim_start_matches("0x"))
}

#[test]
fn limit_order_layout() {
    let action = Action::LimitOrder(LimitOrder {
        asset: 0,
        is_buy: true,
        limit_px: price_to_raw(105_000.0).expect("price"),
        sz: 100,
        reduce_only: false,
        tif: 2,
        cloid: u128::MAX,
    });
    assert_eq!(
        words(&action),
        vec![
            uint(0),
            uint(1),
            "0000000000000000000000000000000000000000000000000000098cb8c52800".to_string(),
            uint(100),
            uint(0),
            uint(2),
            "00000000000000000000000000000000ffffffffffffffffffffffffffffffff".to_string(),
        ]
    );
}

#[test]
fn vault_transfer_layout() {
    let action = Action::VaultTransfer(VaultTransfer {
        vault: sample_address(),
        is_deposit: true,
        usd: usd_to_raw(100.0).expect("usd"),
    });
    assert_eq!(
        words(&action),
        vec![
            addr(),
            uint(1),
            "0000000000000000000000000000000000000000000000000000000005f5e100".to_string(),
        ]
    );
}

#[test]
fn token_delegate_layout() {
    let action = Action::TokenDelegate(TokenDelegate {
        validator: sample_address(),
        wei: 1_000_000_000_000_000_000,
        is_undelegate: false,
    });
    assert_eq!(
        words(&action),
        vec![
            addr(),
            "0000000000000000000000000000000000000000000000000de0b6b3a7640000".to_string(),
            uint(0),
        ]
    );
}

#[test]
fn finalize_and_borrow_lend_encode_sub_enums_as_uint8() {
    let finalize = Action::FinalizeEvmContract(FinalizeEvmContract {
        token: 5,
        variant: FinalizeVariant::CustomStorageSlot,
        create_nonce: 9,
    });
    assert_eq!(words(&finalize), vec![uint(5), uint(3), uint(9)]);

    let borrow = Action::BorrowLendOp(BorrowLendOp {
        operation: BorrowLendOperation::Repay,
        token: 0,
        wei: 42,
    });
    assert_eq!(words(&borrow), vec![uint(3), uint(0), uint(42)]);
}

#[test]
fn approve_builder_fee_puts_rate_before_address() {
    let action = Action::ApproveBuilderFee(ApproveBuilderFee {
        max_fee_rate: 10,
        builder: sample_address(),
    });
    assert_eq!(words(&action), vec![uint(10), addr()]);
}

#[test]
fn send_asset_layout() {
    let action = Action::SendAsset(SendAsset {
        dest: sample_address(),
        sub_account: Address::ZERO,
        src_dex: 0,
        dest_dex: u32::MAX,
        token: 150,
        wei: 1,
    });
    assert_eq!(
        words(&action),
        vec![
            addr(),
            uint(0),
            uint(0),
            uint(u32::MAX.into()),
            uint(150),
            uint(1)
        ]
    );
}

#[test]
fn cancel_by_cloid_uses_full_128_bits() {
    let cloid = 0x0123_4567_89ab_cdef_0123_4567_89ab_cdef_u128;
    let action = Action::CancelOrderByCloid(CancelOrderByCloid { asset: 7, cloid });
    assert_eq!(words(&action), vec![uint(7), uint(cloid)]);
}

#[test]
fn header_diagnostics_serialize_params_as_hex() {
    let encoded = encode_action(&Action::VaultTransfer(VaultTransfer {
        vault: sample_address(),
        is_deposit: false,
        usd: 1,
    }));
    let header = decode_header_hex(&encoded.to_hex()).expect("header");
    let json = serde_json::to_value(&header).expect("serialize");
    assert_eq!(json["version"], 1);
    assert_eq!(json["action_id"], 2);
    let params = json["params"].as_str().expect("params string");
    assert!(params.starts_with("0x"));
    assert_eq!(params.len(), 2 + 3 * 64);
}
