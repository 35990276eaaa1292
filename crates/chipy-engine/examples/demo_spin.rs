//! Offline Spin Demo
//!
//! Plays a few scripted rounds through the full machine without a backend,
//! printing the events and the final grid after each round.
//!
//! Run with: cargo run --example demo_spin
//! Set RUST_LOG=debug for engine internals.

use chipy_engine::{Bootstrap, GameEvent, ReelGeometry, SlotMachine, SpinTick, SpinTuning};
use chipy_remote::{RemoteClient, ScriptedTransport};
use serde_json::json;

const FRAME_MS: f64 = 16.0;

fn main() {
    env_logger::init();
    println!("=== Scripted Spin Demo ===\n");

    let transport = ScriptedTransport::new()
        .with_init(json!({
            "balance": {"game": 0.0, "wallet": 100000.0},
            "options": {
                "available_bets": [1, 5, 10, 20],
                "currency": {"code": "FUN", "exponent": 2, "subunits": 100, "symbol": "FUN"},
                "default_bet": 10,
                "layout": {"reels": 3, "rows": 3},
                "lines": [[1, 1, 1], [0, 0, 0], [2, 2, 2]],
                "paytable": {"7": [0, 0, 5]},
                "reels": {"main": [
                    ["1", "7", "3", "4", "5", "0"],
                    ["1", "3", "5", "2", "6", "7"],
                    ["1", "7", "0", "6", "2", "4"]
                ]},
                "screen": [["1", "7", "7"], ["1", "3", "8"], ["1", "7", "7"]],
                "special_symbols": [{"kind": "scatter", "symbol": "8"}]
            }
        }))
        .with_spins([
            json!({
                "balance": {"game": 0.0, "wallet": 99990.0},
                "outcome": {
                    "screen": [["3", "4", "2"], ["0", "2", "2"], ["1", "6", "0"]],
                    "bet": 10.0, "win": 0.0, "wins": [], "special_symbols": {}
                }
            }),
            json!({
                "balance": {"game": 0.0, "wallet": 100030.0},
                "outcome": {
                    "screen": [["3", "7", "2"], ["0", "7", "2"], ["1", "7", "0"]],
                    "bet": 10.0, "win": 50.0,
                    "wins": [["line", 50.0, [1, 1, 1], 0]],
                    "special_symbols": {}
                }
            }),
        ]);

    let mut bootstrap = Bootstrap::new(
        RemoteClient::direct(transport),
        SpinTuning::normal(),
        ReelGeometry::standard(),
    );
    bootstrap.begin().expect("init request");
    let mut machine = bootstrap
        .poll()
        .expect("scripted init is immediate")
        .expect("init decodes");

    let currency = machine.config().currency.clone();
    println!(
        "session open, balance {}\n",
        currency.format_balance(machine.session().balance)
    );

    let mut now = 0.0;
    for round in 1..=2 {
        println!("--- round {round} ---");
        machine.press_spin(now).expect("machine is idle");
        now = run_round(&mut machine, now);

        for stamped in machine.drain_events() {
            match stamped.event {
                GameEvent::ReelStopped { reel } => {
                    println!("  reel {reel} stopped at {:.0} ms", stamped.at_ms)
                }
                GameEvent::SpinSettled { win } => println!("  settled, win {win}"),
                other => println!("  {other:?}"),
            }
        }
        for row in machine.session().current_grid.as_rows() {
            println!("  {row:?}");
        }
        if let Some(label) = machine.presenter().win_label() {
            println!("  {label}");
        }
        println!(
            "  balance {}\n",
            currency.format_balance(machine.session().balance)
        );
    }
}

fn run_round(machine: &mut SlotMachine, start_ms: f64) -> f64 {
    let mut now = start_ms;
    loop {
        now += FRAME_MS;
        match machine.tick(now, FRAME_MS) {
            SpinTick::Settled(_) => return now,
            SpinTick::Failed(message) => {
                println!("  round failed: {message}");
                return now;
            }
            _ => {}
        }
    }
}
