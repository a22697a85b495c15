use proptest::prelude::*;

use tokenpad_ledger::{TokenConfig, TokenLedger};
use tokenpad_types::{Address, Amount};

/// Index 0 maps to the null address so sequences exercise the rejection
/// paths as well as the happy paths.
fn addr(n: u8) -> Address {
    if n == 0 {
        Address::NULL
    } else {
        Address::new([n; 20])
    }
}

const POOL: u8 = 5;

#[derive(Clone, Debug)]
enum Op {
    Transfer { caller: u8, to: u8, amount: u128 },
    Approve { caller: u8, spender: u8, amount: u128 },
    TransferFrom { caller: u8, from: u8, to: u8, amount: u128 },
    Mint { caller: u8, to: u8, amount: u128 },
    Burn { caller: u8, amount: u128 },
    TransferOwnership { caller: u8, new_owner: u8 },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    let party = 0..=POOL;
    let amount = 0u128..2_000;
    prop_oneof![
        (party.clone(), party.clone(), amount.clone())
            .prop_map(|(caller, to, amount)| Op::Transfer { caller, to, amount }),
        (party.clone(), party.clone(), amount.clone())
            .prop_map(|(caller, spender, amount)| Op::Approve { caller, spender, amount }),
        (party.clone(), party.clone(), party.clone(), amount.clone()).prop_map(
            |(caller, from, to, amount)| Op::TransferFrom { caller, from, to, amount }
        ),
        (party.clone(), party.clone(), amount.clone())
            .prop_map(|(caller, to, amount)| Op::Mint { caller, to, amount }),
        (party.clone(), amount).prop_map(|(caller, amount)| Op::Burn { caller, amount }),
        (party.clone(), party)
            .prop_map(|(caller, new_owner)| Op::TransferOwnership { caller, new_owner }),
    ]
}

fn apply(ledger: &mut TokenLedger, op: &Op) -> bool {
    let result = match *op {
        Op::Transfer { caller, to, amount } => {
            ledger.transfer(&addr(caller), &addr(to), Amount::new(amount))
        }
        Op::Approve {
            caller,
            spender,
            amount,
        } => ledger.approve(&addr(caller), &addr(spender), Amount::new(amount)),
        Op::TransferFrom {
            caller,
            from,
            to,
            amount,
        } => ledger.transfer_from(&addr(caller), &addr(from), &addr(to), Amount::new(amount)),
        Op::Mint { caller, to, amount } => {
            ledger.mint(&addr(caller), &addr(to), Amount::new(amount))
        }
        Op::Burn { caller, amount } => ledger.burn(&addr(caller), Amount::new(amount)),
        Op::TransferOwnership { caller, new_owner } => {
            ledger.transfer_ownership(&addr(caller), addr(new_owner))
        }
    };
    result.is_ok()
}

fn sum_of_balances(ledger: &TokenLedger) -> u128 {
    (0..=POOL).map(|n| ledger.balance_of(&addr(n)).raw()).sum()
}

/// Full observable state over the test address pool, for
/// before/after comparison of failed calls.
fn observable_state(ledger: &TokenLedger) -> (Vec<u128>, Vec<u128>, Address, u128, usize) {
    let balances = (0..=POOL).map(|n| ledger.balance_of(&addr(n)).raw()).collect();
    let allowances = (0..=POOL)
        .flat_map(|o| (0..=POOL).map(move |s| (o, s)))
        .map(|(o, s)| ledger.allowance(&addr(o), &addr(s)).raw())
        .collect();
    (
        balances,
        allowances,
        *ledger.owner(),
        ledger.total_supply().raw(),
        ledger.notifications().len(),
    )
}

fn fresh_ledger(initial: u128) -> TokenLedger {
    TokenLedger::deploy(TokenConfig {
        name: "Demo Token".into(),
        symbol: "DEMO".into(),
        initial_supply: Amount::new(initial),
        deployer: addr(1),
    })
    .unwrap()
}

proptest! {
    /// Conservation: after every step of any operation sequence, the
    /// total supply equals the sum of all balances.
    #[test]
    fn supply_always_equals_sum_of_balances(
        initial in 0u128..10_000,
        ops in prop::collection::vec(op_strategy(), 1..40),
    ) {
        let mut ledger = fresh_ledger(initial);
        prop_assert_eq!(ledger.total_supply().raw(), sum_of_balances(&ledger));
        for op in &ops {
            apply(&mut ledger, op);
            prop_assert_eq!(ledger.total_supply().raw(), sum_of_balances(&ledger));
        }
    }

    /// The owner is never the null address, whatever sequence runs.
    #[test]
    fn owner_is_never_null(
        initial in 0u128..10_000,
        ops in prop::collection::vec(op_strategy(), 1..40),
    ) {
        let mut ledger = fresh_ledger(initial);
        for op in &ops {
            apply(&mut ledger, op);
            prop_assert!(!ledger.owner().is_null());
        }
    }

    /// A failed call leaves every observable piece of state — balances,
    /// allowances, owner, supply, and the notification log — untouched.
    #[test]
    fn failed_calls_leave_state_unchanged(
        initial in 0u128..10_000,
        ops in prop::collection::vec(op_strategy(), 1..40),
    ) {
        let mut ledger = fresh_ledger(initial);
        for op in &ops {
            let before = observable_state(&ledger);
            let succeeded = apply(&mut ledger, op);
            if !succeeded {
                prop_assert_eq!(observable_state(&ledger), before);
            }
        }
    }

    /// A successful call appends exactly one notification; a failed call
    /// appends none.
    #[test]
    fn notification_count_tracks_successes(
        initial in 0u128..10_000,
        ops in prop::collection::vec(op_strategy(), 1..40),
    ) {
        let mut ledger = fresh_ledger(initial);
        let mut expected = ledger.notifications().len();
        for op in &ops {
            if apply(&mut ledger, op) {
                expected += 1;
            }
            prop_assert_eq!(ledger.notifications().len(), expected);
        }
    }
}
