#![expect(
    clippy::unwrap_used,
    clippy::panic,
    reason = "test code uses unwrap/panic for concise assertions"
)]

use defi_tracker_decoder::tokens::{NATIVE_MINT, USDC_MINT};
use defi_tracker_decoder::{
    Confidence, DecodeError, Direction, InstructionIndex, InstructionKind, ProgramFamily, TradeKind,
    TransactionDecoder, TransactionInput, TransactionResult,
};

fn load_transaction(filename: &str) -> TransactionInput {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let path = format!("{manifest_dir}/tests/fixtures/{filename}");
    let data =
        std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("failed to read {path}: {e}"));
    serde_json::from_str(&data).unwrap_or_else(|e| panic!("failed to parse {path}: {e}"))
}

fn decode_fixture(filename: &str) -> (TransactionInput, TransactionResult) {
    let tx = load_transaction(filename);
    let result = TransactionDecoder::new().decode(&tx);
    (tx, result)
}

fn top(i: u32) -> InstructionIndex {
    InstructionIndex::top_level(i)
}

// ──────────────────── Raydium AMM ────────────────────

#[test]
fn raydium_amm_fixture_splits_buys_and_sells() {
    let (tx, result) = decode_fixture("raydium_amm_transaction.json");
    let keys = &tx.account_keys;

    assert_eq!(result.slot, 287_654_321);
    assert_eq!(result.trades.len(), 4);
    assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);

    let order: Vec<InstructionIndex> = result
        .trades
        .iter()
        .map(|t| t.instruction_index)
        .collect();
    assert_eq!(order, [top(0), top(1), top(3), InstructionIndex::inner(0, 0)]);

    assert_eq!(
        result.trade_buy_indices,
        [top(0), top(3), InstructionIndex::inner(0, 0)]
    );
    assert_eq!(result.trade_sell_indices, [top(1)]);
    assert_eq!(result.swap_buys.len(), result.trade_buy_indices.len());
    assert_eq!(result.swap_sells.len(), result.trade_sell_indices.len());

    let first = &result.trades[0];
    assert_eq!(first.token_in, NATIVE_MINT);
    assert_eq!(first.token_out, keys[4]);
    assert_eq!(first.pool, keys[5]);
    assert_eq!(first.trader, keys[0]);
    assert_eq!(first.amount_in, 1_000_000_000);
    assert_eq!(result.swap_buys[0].min_amount_out, 950_000_000);

    let sell = &result.swap_sells[0];
    assert_eq!(sell.direction, Direction::Sell);
    assert_eq!(sell.amount_in, 250_000_000);
    assert_eq!(sell.min_amount_out, 1_200_000_000);

    let base_out = &result.trades[2];
    assert_eq!(base_out.instruction_kind, InstructionKind::SwapBaseOut);
    assert_eq!(base_out.token_in, USDC_MINT);
    assert_eq!(base_out.amount_out, 5_000_000);
    assert_eq!(result.swap_buys[1].max_amount_in, 3_000_000_000);
    assert_eq!(result.swap_buys[1].slippage, 0.0);

    assert!(result.validate().is_empty());
}

#[test]
fn raydium_amm_deposit_is_silent() {
    let (_, result) = decode_fixture("raydium_amm_transaction.json");
    assert!(result.trades.iter().all(|t| t.instruction_index != top(2)));
    assert!(result.creates.is_empty());
    assert!(result.migrations.is_empty());
}

// ──────────────────── Launchpad ────────────────────

#[test]
fn launchpad_fixture_covers_create_trade_and_migration() {
    let (tx, result) = decode_fixture("launchpad_transaction.json");
    let keys = &tx.account_keys;
    assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);

    assert_eq!(result.creates.len(), 1);
    let create = &result.creates[0];
    assert_eq!(create.token_mint, keys[2]);
    assert_eq!(create.pool, keys[4]);
    assert_eq!(create.creator, keys[0]);
    assert_eq!(create.symbol.as_deref(), Some("DMOON"));
    assert_eq!(create.name.as_deref(), Some("Doge Moon"));
    assert_eq!(create.decimals, 6);
    assert_eq!(create.timestamp, Some(1_730_000_000));

    assert_eq!(result.trades.len(), 3);
    let buy = &result.trades[0];
    assert_eq!(buy.kind, TradeKind::Buy);
    assert_eq!(buy.token_in, NATIVE_MINT);
    assert_eq!(buy.token_out, keys[2]);
    assert_eq!(buy.pool, keys[4]);
    assert_eq!(buy.trader, keys[0]);
    assert_eq!(buy.amount_out, 3_500_000_000_000);
    assert_eq!(result.swap_buys[0].max_amount_in, 105_000_000);

    let sell = &result.trades[1];
    assert_eq!(sell.kind, TradeKind::Sell);
    assert_eq!(sell.token_in, keys[2]);
    assert_eq!(sell.token_out, NATIVE_MINT);
    assert_eq!(result.swap_sells[0].min_amount_out, 28_000_000);

    assert_eq!(result.migrations.len(), 1);
    let migration = &result.migrations[0];
    assert_eq!(migration.source_pool, keys[4]);
    assert_eq!(migration.destination_pool, keys[20]);
    assert_eq!(migration.token, keys[2]);
    assert_eq!(migration.owner, keys[0]);
    assert_eq!(migration.confidence, Confidence::Exact);
}

#[test]
fn launchpad_unknown_discriminator_is_heuristic() {
    let (tx, result) = decode_fixture("launchpad_transaction.json");
    let guessed = &result.trades[2];
    assert_eq!(guessed.instruction_index, top(4));
    assert_eq!(guessed.confidence, Confidence::Heuristic);
    assert_eq!(guessed.amount_in, 777);
    assert_eq!(guessed.trader, tx.account_keys[0]);
    assert_eq!(guessed.kind, TradeKind::Buy);

    let exact: Vec<_> = result
        .trades
        .iter()
        .filter(|t| t.instruction_index != top(4))
        .collect();
    assert!(exact.iter().all(|t| t.confidence == Confidence::Exact));
    assert_eq!(result.summary().heuristic_events, 1);
}

// ──────────────────── CP Swap ────────────────────

#[test]
fn cp_swap_fixture_decodes_initialize_and_both_swaps() {
    let (tx, result) = decode_fixture("cp_swap_transaction.json");
    let keys = &tx.account_keys;
    assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
    assert_eq!(result.block_time, None);

    let create = &result.creates[0];
    assert_eq!(create.instruction_kind, InstructionKind::InitializePool);
    assert_eq!(create.creator, keys[0]);
    assert_eq!(create.pool, keys[4]);
    assert_eq!(create.token_mint, USDC_MINT);
    assert_eq!(create.amount, 1_000_000_000);
    assert_eq!(create.symbol.as_deref(), Some("USDC"));
    assert_eq!(create.decimals, 6);

    assert_eq!(result.trade_buy_indices, [top(1)]);
    assert_eq!(result.trade_sell_indices, [top(2)]);

    let buy = &result.swap_buys[0];
    assert_eq!(buy.token_in, USDC_MINT);
    assert_eq!(buy.token_out, keys[12]);
    assert_eq!(buy.trader, keys[0]);
    assert_eq!(buy.amount_in, 10_000_000);
    assert_eq!(buy.min_amount_out, 9_000_000);

    let sell = &result.swap_sells[0];
    assert_eq!(sell.token_in, keys[12]);
    assert_eq!(sell.max_amount_in, 2_000_000_000);
    assert_eq!(sell.amount_out, 5_000_000);
    assert_eq!(sell.slippage, 0.0);
}

// ──────────────────── Failures ────────────────────

#[test]
fn malformed_fixture_reports_each_failure_once() {
    let (tx, result) = decode_fixture("malformed_transaction.json");
    assert!(result.is_empty());

    let failures: Vec<(InstructionIndex, &DecodeError)> = result
        .diagnostics
        .iter()
        .map(|d| (d.instruction_index, &d.error))
        .collect();
    assert_eq!(failures.len(), 4, "{failures:?}");

    assert_eq!(failures[0].0, top(0));
    assert_eq!(
        failures[0].1,
        &DecodeError::InsufficientAccounts {
            required: 8,
            got: 3
        }
    );
    assert_eq!(failures[1].0, top(1));
    assert!(matches!(failures[1].1, DecodeError::MalformedPayload { .. }));
    assert_eq!(failures[2].0, top(3));
    assert!(matches!(failures[2].1, DecodeError::MalformedPayload { .. }));
    assert_eq!(failures[3].0, top(4));
    assert_eq!(failures[3].1, &DecodeError::Unclassified);

    assert!(
        result
            .diagnostics
            .iter()
            .all(|d| d.family == ProgramFamily::RaydiumAmm && d.program_id == tx.account_keys[1])
    );
}

#[test]
fn results_serialize_to_stable_json() {
    let (_, result) = decode_fixture("launchpad_transaction.json");
    let value = serde_json::to_value(&result).unwrap();

    assert_eq!(value["creates"][0]["symbol"], "DMOON");
    assert_eq!(value["trades"][0]["kind"], "buy");
    assert_eq!(value["trades"][2]["confidence"], "heuristic");
    assert_eq!(value["trade_buy_indices"][0], "1");
    assert_eq!(
        value["trades"][0]["token_in"],
        "So11111111111111111111111111111111111111112"
    );
}

#[test]
fn decoding_twice_is_deterministic() {
    for name in [
        "raydium_amm_transaction.json",
        "launchpad_transaction.json",
        "cp_swap_transaction.json",
        "malformed_transaction.json",
    ] {
        let tx = load_transaction(name);
        let decoder = TransactionDecoder::new();
        assert_eq!(decoder.decode(&tx), decoder.decode(&tx), "{name}");
    }
}

#[test]
fn decode_json_matches_decode() {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let json =
        std::fs::read_to_string(format!("{manifest_dir}/tests/fixtures/cp_swap_transaction.json"))
            .unwrap();
    let decoder = TransactionDecoder::new();
    let from_json = decoder.decode_json(&json).unwrap();
    let (_, direct) = decode_fixture("cp_swap_transaction.json");
    assert_eq!(from_json, direct);
}

#[test]
fn parallel_decoding_shares_one_decoder() {
    let decoder = TransactionDecoder::new();
    let txs: Vec<TransactionInput> = [
        "raydium_amm_transaction.json",
        "launchpad_transaction.json",
        "cp_swap_transaction.json",
    ]
    .iter()
    .map(|name| load_transaction(name))
    .collect();
    let sequential: Vec<TransactionResult> = txs.iter().map(|tx| decoder.decode(tx)).collect();

    let parallel: Vec<TransactionResult> = std::thread::scope(|scope| {
        let handles: Vec<_> = txs
            .iter()
            .map(|tx| {
                let decoder = &decoder;
                scope.spawn(move || decoder.decode(tx))
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(parallel, sequential);
}
