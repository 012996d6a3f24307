use crate::error::ErrorCode;
use crate::registry::Registry;
use crate::rewards;
use crate::states::StakeholderAccount;
use anchor_lang::prelude::*;

//
// ──────────────────────────────────────────────────────────────────────────────
// Pool Account
// ──────────────────────────────────────────────────────────────────────────────
//

/// PDA seed string used to derive the singleton pool account.
pub const POOL_SEED: &str = "pool";

/// Singleton pool state: configuration, aggregate stake accounting and the
/// embedded stakeholder registry.
///
/// Every mutation goes through the controller methods below; they realize
/// pending reward before touching principal and keep `total_clear_stake`
/// equal to the sum of all active clear stakes. The handlers move the
/// matching lamports, so after every successful instruction the stake vault
/// holds exactly `total_clear_stake` above its rent floor.
#[account]
#[derive(Default, Debug, PartialEq)]
pub struct Pool {
    /// PDA bump for this account.
    pub bump: u8,

    /// PDA bump of the stake vault (holds staked principal).
    pub stake_vault_bump: u8,

    /// PDA bump of the reserve vault (finances rewards).
    pub reserve_vault_bump: u8,

    /// Pool admin; gates emergency closes, the capacity raise and
    /// ownership transfer.
    pub admin: Pubkey,

    /// Minimum deposit to open a position, in lamports.
    pub minimal_stake: u64,

    /// Current stakeholder capacity.
    pub stakeholders_limit: u64,

    /// Capacity after the one-shot raise.
    pub next_stakeholders_limit: u64,

    /// Whether the one-shot raise has been consumed.
    pub limit_updated: bool,

    /// Sum of `clear_stake` over all active stakeholders.
    pub total_clear_stake: u64,

    /// Sorted registry of active stakeholders.
    pub registry: Registry,
}

/// Result of evicting the worst stakeholder on a full pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EvictionOutcome {
    /// Evicted wallet.
    pub target: Pubkey,
    /// Full live balance paid to the evicted wallet.
    pub payout: u64,
    /// Reward pulled from the reserve while closing the evicted position.
    pub reward: u64,
}

/// Result of a successful deposit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DepositOutcome {
    /// Whether the deposit opened a new position.
    pub joined: bool,
    /// Reward realized for the depositor (zero for a fresh join).
    pub reward: u64,
    /// Depositor's clear stake after the operation.
    pub result_clear_stake: u64,
    /// Present when the deposit displaced the worst stakeholder.
    pub eviction: Option<EvictionOutcome>,
}

/// Result of a successful withdrawal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WithdrawOutcome {
    /// Lamports paid out to the withdrawing wallet.
    pub paid: u64,
    /// Reward realized before paying out.
    pub reward: u64,
    /// Whether the position was closed.
    pub closed: bool,
    /// Depositor's clear stake after the operation (zero when closed).
    pub result_clear_stake: u64,
}

/// Result of a full position close.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CloseOutcome {
    /// Full live balance paid to the wallet.
    pub payout: u64,
    /// Reward realized while closing.
    pub reward: u64,
}

impl Pool {
    /// Serialized size for a given registry node capacity.
    ///
    /// Breakdown:
    /// - 8: account discriminator
    /// - 3: three bump bytes
    /// - 32: admin
    /// - 8 * 4: four `u64` fields
    /// - 1: limit_updated flag
    /// - registry for `capacity` nodes
    pub const fn space(capacity: usize) -> usize {
        8 + 3 + 32 + 8 * 4 + 1 + Registry::space(capacity)
    }

    pub fn is_stakeholder(&self, wallet: &Pubkey) -> bool {
        self.registry.contains(wallet)
    }

    pub fn total_stakeholders(&self) -> u64 {
        self.registry.count()
    }

    /// Unrealized reward accrued since the last checkpoint. Zero for a
    /// wallet with no active position.
    pub fn pending_reward(&self, acct: &StakeholderAccount, now: u64) -> Result<u64> {
        if !self.registry.contains(&acct.owner) {
            return Ok(0);
        }
        rewards::pending(acct.last_update_at, now)
    }

    /// Clear stake plus pending reward; the externally observable balance.
    pub fn live_stake(&self, acct: &StakeholderAccount, now: u64) -> Result<u64> {
        let pending = self.pending_reward(acct, now)?;
        acct.clear_stake
            .checked_add(pending)
            .ok_or(error!(ErrorCode::Overflow))
    }

    /// Lifecycle reward total: the realized counter plus the unrealized
    /// tail for an active position, the persisted counter otherwise.
    pub fn rewards_of(&self, acct: &StakeholderAccount, now: u64) -> Result<u64> {
        let pending = self.pending_reward(acct, now)?;
        acct.cumulative_reward
            .checked_add(pending)
            .ok_or(error!(ErrorCode::Overflow))
    }

    /// Folds pending reward into the account and the aggregate total. The
    /// handler pulls the returned amount from the reserve into the stake
    /// vault, so the balance invariant moves in lockstep.
    fn realize(&mut self, acct: &mut StakeholderAccount, now: u64) -> Result<u64> {
        let reward = rewards::pending(acct.last_update_at, now)?;
        acct.clear_stake = acct
            .clear_stake
            .checked_add(reward)
            .ok_or(error!(ErrorCode::Overflow))?;
        acct.cumulative_reward = acct
            .cumulative_reward
            .checked_add(reward)
            .ok_or(error!(ErrorCode::Overflow))?;
        acct.last_update_at = now;
        self.total_clear_stake = self
            .total_clear_stake
            .checked_add(reward)
            .ok_or(error!(ErrorCode::Overflow))?;
        Ok(reward)
    }

    /// Applies a deposit of `amount` lamports from `staker`.
    ///
    /// A top-up realizes first, adds the new funds on top and re-ranks once
    /// with the combined value. A fresh join requires `amount` to reach
    /// `minimal_stake` and, on a full pool, to strictly exceed the worst
    /// stakeholder's live balance; admission then closes the worst position
    /// through the provided `evicted` pair.
    pub fn deposit_stake(
        &mut self,
        staker: Pubkey,
        acct: &mut StakeholderAccount,
        evicted: Option<(Pubkey, &mut StakeholderAccount)>,
        amount: u64,
        now: u64,
    ) -> Result<DepositOutcome> {
        require!(amount > 0, ErrorCode::ZeroAmount);

        if self.registry.contains(&staker) {
            let reward = self.realize(acct, now)?;
            acct.clear_stake = acct
                .clear_stake
                .checked_add(amount)
                .ok_or(error!(ErrorCode::Overflow))?;
            self.total_clear_stake = self
                .total_clear_stake
                .checked_add(amount)
                .ok_or(error!(ErrorCode::Overflow))?;
            self.registry.reposition(&staker, acct.clear_stake)?;
            return Ok(DepositOutcome {
                joined: false,
                reward,
                result_clear_stake: acct.clear_stake,
                eviction: None,
            });
        }

        require!(amount >= self.minimal_stake, ErrorCode::BelowMinimalStake);

        let eviction = if self.registry.count() >= self.stakeholders_limit {
            let (worst, _) = self.registry.worst();
            let (evicted_key, evicted_acct) =
                evicted.ok_or(error!(ErrorCode::MissingWorstStakeholder))?;
            require_keys_eq!(evicted_key, worst, ErrorCode::WorstStakeholderMismatch);
            let worst_live = self.live_stake(evicted_acct, now)?;
            require!(amount > worst_live, ErrorCode::PoolFull);

            let reward = self.realize(evicted_acct, now)?;
            let payout = evicted_acct.clear_stake;
            self.registry.remove(&evicted_key)?;
            self.total_clear_stake = self
                .total_clear_stake
                .checked_sub(payout)
                .ok_or(error!(ErrorCode::Underflow))?;
            evicted_acct.clear_stake = 0;
            Some(EvictionOutcome {
                target: evicted_key,
                payout,
                reward,
            })
        } else {
            None
        };

        // Each lifecycle starts with a clean reward counter.
        acct.owner = staker;
        acct.clear_stake = amount;
        acct.last_update_at = now;
        acct.cumulative_reward = 0;
        self.registry.insert(staker, amount)?;
        self.total_clear_stake = self
            .total_clear_stake
            .checked_add(amount)
            .ok_or(error!(ErrorCode::Overflow))?;

        Ok(DepositOutcome {
            joined: true,
            reward: 0,
            result_clear_stake: amount,
            eviction,
        })
    }

    /// Applies a withdrawal of `amount` lamports.
    ///
    /// Realizes first. When the remaining clear stake would drop below
    /// `minimal_stake` the whole position closes and the entire live
    /// balance is paid out; otherwise exactly `amount` is paid and the
    /// position re-ranks with the reduced value.
    pub fn withdraw_stake(
        &mut self,
        staker: &Pubkey,
        acct: &mut StakeholderAccount,
        amount: u64,
        now: u64,
    ) -> Result<WithdrawOutcome> {
        require!(amount > 0, ErrorCode::ZeroAmount);
        require!(self.registry.contains(staker), ErrorCode::NotStakeholder);
        let live = self.live_stake(acct, now)?;
        require!(amount <= live, ErrorCode::AmountExceedsStake);

        let reward = self.realize(acct, now)?;
        // realize folded everything in, so clear_stake == live here
        let remainder = acct
            .clear_stake
            .checked_sub(amount)
            .ok_or(error!(ErrorCode::Underflow))?;

        if remainder < self.minimal_stake {
            let paid = acct.clear_stake;
            self.registry.remove(staker)?;
            self.total_clear_stake = self
                .total_clear_stake
                .checked_sub(paid)
                .ok_or(error!(ErrorCode::Underflow))?;
            acct.clear_stake = 0;
            return Ok(WithdrawOutcome {
                paid,
                reward,
                closed: true,
                result_clear_stake: 0,
            });
        }

        acct.clear_stake = remainder;
        self.total_clear_stake = self
            .total_clear_stake
            .checked_sub(amount)
            .ok_or(error!(ErrorCode::Underflow))?;
        self.registry.reposition(staker, remainder)?;
        Ok(WithdrawOutcome {
            paid: amount,
            reward,
            closed: false,
            result_clear_stake: remainder,
        })
    }

    /// Closes a position in full, paying out the entire live balance.
    pub fn close_position(
        &mut self,
        staker: &Pubkey,
        acct: &mut StakeholderAccount,
        now: u64,
    ) -> Result<CloseOutcome> {
        require!(self.registry.contains(staker), ErrorCode::NotStakeholder);
        let reward = self.realize(acct, now)?;
        let payout = acct.clear_stake;
        self.registry.remove(staker)?;
        self.total_clear_stake = self
            .total_clear_stake
            .checked_sub(payout)
            .ok_or(error!(ErrorCode::Underflow))?;
        acct.clear_stake = 0;
        Ok(CloseOutcome { payout, reward })
    }

    /// One-shot capacity raise. Returns `(previous, new)` limits.
    pub fn update_stakeholders_limit(&mut self) -> Result<(u64, u64)> {
        require!(!self.limit_updated, ErrorCode::LimitAlreadyUpdated);
        let previous = self.stakeholders_limit;
        self.stakeholders_limit = self.next_stakeholders_limit;
        self.limit_updated = true;
        Ok((previous, self.stakeholders_limit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rewards::REWARD_PER_SECOND;
    use rand::{rngs::StdRng, Rng, SeedableRng};
    use std::collections::BTreeMap;

    const ONE: u64 = 1_000_000_000_000_000_000;
    const START_BALANCE: u64 = 10 * ONE;
    const T0: u64 = 1_700_000_000;

    fn wallet(byte: u8) -> Pubkey {
        let mut raw = [0u8; 32];
        raw[0] = byte;
        Pubkey::new_from_array(raw)
    }

    /// Simulates the instruction layer around the controller: per-wallet
    /// lamport balances, the stake vault and the reserve. Each operation
    /// runs against clones and only commits on success, mirroring
    /// transaction atomicity, then asserts the balance invariant.
    struct Bench {
        pool: Pool,
        ledgers: BTreeMap<Pubkey, StakeholderAccount>,
        wallets: BTreeMap<Pubkey, u64>,
        stake_vault: u64,
        reserve: u64,
    }

    impl Bench {
        fn new(minimal_stake: u64, limit: u64, next_limit: u64, reserve: u64) -> Self {
            let pool = Pool {
                admin: wallet(255),
                minimal_stake,
                stakeholders_limit: limit,
                next_stakeholders_limit: next_limit,
                registry: Registry::new(),
                ..Default::default()
            };
            Self {
                pool,
                ledgers: BTreeMap::new(),
                wallets: BTreeMap::new(),
                stake_vault: 0,
                reserve,
            }
        }

        fn balance(&self, who: &Pubkey) -> u64 {
            *self.wallets.get(who).unwrap_or(&START_BALANCE)
        }

        fn ledger(&self, who: &Pubkey) -> StakeholderAccount {
            self.ledgers.get(who).cloned().unwrap_or_default()
        }

        fn pull_reserve(&mut self, amount: u64) -> Result<()> {
            require!(amount <= self.reserve, ErrorCode::InsufficientReserve);
            self.reserve -= amount;
            self.stake_vault += amount;
            Ok(())
        }

        fn deposit(&mut self, who: Pubkey, amount: u64, now: u64) -> Result<DepositOutcome> {
            let mut pool = self.pool.clone();
            let mut acct = self.ledger(&who);
            let evict_key = if !pool.registry.contains(&who)
                && pool.registry.count() >= pool.stakeholders_limit
            {
                Some(pool.registry.worst().0)
            } else {
                None
            };
            let mut evicted_acct = evict_key.map(|k| self.ledger(&k));
            let evicted = match (evict_key, evicted_acct.as_mut()) {
                (Some(k), Some(a)) => Some((k, a)),
                _ => None,
            };

            let outcome = pool.deposit_stake(who, &mut acct, evicted, amount, now)?;

            let rewards =
                outcome.reward + outcome.eviction.map(|e| e.reward).unwrap_or(0);
            self.pull_reserve(rewards)?;
            *self.wallets.entry(who).or_insert(START_BALANCE) -= amount;
            self.stake_vault += amount;
            if let Some(e) = outcome.eviction {
                self.stake_vault -= e.payout;
                *self.wallets.entry(e.target).or_insert(START_BALANCE) += e.payout;
                self.ledgers
                    .insert(e.target, evicted_acct.take().unwrap_or_default());
            }
            self.pool = pool;
            self.ledgers.insert(who, acct);
            self.assert_invariants();
            Ok(outcome)
        }

        fn withdraw(&mut self, who: Pubkey, amount: u64, now: u64) -> Result<WithdrawOutcome> {
            let mut pool = self.pool.clone();
            let mut acct = self.ledger(&who);
            let outcome = pool.withdraw_stake(&who, &mut acct, amount, now)?;

            self.pull_reserve(outcome.reward)?;
            self.stake_vault -= outcome.paid;
            *self.wallets.entry(who).or_insert(START_BALANCE) += outcome.paid;
            self.pool = pool;
            self.ledgers.insert(who, acct);
            self.assert_invariants();
            Ok(outcome)
        }

        fn close(&mut self, who: Pubkey, now: u64) -> Result<CloseOutcome> {
            let mut pool = self.pool.clone();
            let mut acct = self.ledger(&who);
            let outcome = pool.close_position(&who, &mut acct, now)?;

            self.pull_reserve(outcome.reward)?;
            self.stake_vault -= outcome.payout;
            *self.wallets.entry(who).or_insert(START_BALANCE) += outcome.payout;
            self.pool = pool;
            self.ledgers.insert(who, acct);
            self.assert_invariants();
            Ok(outcome)
        }

        fn assert_invariants(&self) {
            assert_eq!(self.stake_vault, self.pool.total_clear_stake);
            let snap = self.pool.registry.snapshot().unwrap();
            let sum: u64 = snap.iter().map(|(_, v)| v).sum();
            assert_eq!(sum, self.pool.total_clear_stake);
            for (addr, value) in &snap {
                assert_eq!(self.ledger(addr).clear_stake, *value);
            }
            for w in snap.windows(2) {
                assert!(w[0].1 >= w[1].1);
            }
        }
    }

    #[test]
    fn full_pool_rejects_equal_and_evicts_on_better() {
        let mut bench = Bench::new(ONE, 4, 5, ONE);
        for i in 1..=4 {
            bench.deposit(wallet(i), ONE, T0).unwrap();
        }
        assert_eq!(bench.pool.total_stakeholders(), 4);

        // equal values rank the latest insert worst
        assert_eq!(bench.pool.registry.worst().0, wallet(4));

        let err = bench.deposit(wallet(5), ONE, T0).unwrap_err();
        assert_eq!(err, error!(ErrorCode::PoolFull));
        assert_eq!(bench.pool.total_stakeholders(), 4);

        let outcome = bench.deposit(wallet(5), 2 * ONE, T0).unwrap();
        let eviction = outcome.eviction.unwrap();
        assert_eq!(eviction.target, wallet(4));
        assert_eq!(eviction.payout, ONE);
        assert_eq!(bench.pool.total_stakeholders(), 4);
        assert!(!bench.pool.is_stakeholder(&wallet(4)));
        assert!(bench.pool.is_stakeholder(&wallet(5)));
        assert_eq!(bench.balance(&wallet(4)), START_BALANCE);
    }

    #[test]
    fn eviction_threshold_includes_pending_reward() {
        let mut bench = Bench::new(ONE, 1, 2, ONE);
        bench.deposit(wallet(1), ONE, T0).unwrap();

        // at T0 + 3 the worst's live balance is ONE + 3R
        let live = ONE + 3 * REWARD_PER_SECOND;
        let err = bench.deposit(wallet(2), live, T0 + 3).unwrap_err();
        assert_eq!(err, error!(ErrorCode::PoolFull));

        let outcome = bench.deposit(wallet(2), live + 1, T0 + 3).unwrap();
        let eviction = outcome.eviction.unwrap();
        assert_eq!(eviction.target, wallet(1));
        assert_eq!(eviction.payout, live);
        assert_eq!(eviction.reward, 3 * REWARD_PER_SECOND);
        assert_eq!(bench.balance(&wallet(1)), START_BALANCE + 3 * REWARD_PER_SECOND);
    }

    #[test]
    fn eviction_accounts_must_name_the_worst() {
        let mut bench = Bench::new(ONE, 2, 3, ONE);
        bench.deposit(wallet(1), 2 * ONE, T0).unwrap();
        bench.deposit(wallet(2), ONE, T0).unwrap();
        let pool_before = bench.pool.clone();

        // naming a member that is not the worst
        let mut pool = bench.pool.clone();
        let mut acct = StakeholderAccount::default();
        let mut wrong_ledger = bench.ledger(&wallet(1));
        let err = pool
            .deposit_stake(
                wallet(3),
                &mut acct,
                Some((wallet(1), &mut wrong_ledger)),
                3 * ONE,
                T0,
            )
            .unwrap_err();
        assert_eq!(err, error!(ErrorCode::WorstStakeholderMismatch));

        // omitting the eviction accounts entirely
        let mut pool = bench.pool.clone();
        let mut acct = StakeholderAccount::default();
        let err = pool
            .deposit_stake(wallet(3), &mut acct, None, 3 * ONE, T0)
            .unwrap_err();
        assert_eq!(err, error!(ErrorCode::MissingWorstStakeholder));

        assert_eq!(bench.pool, pool_before);
        bench.assert_invariants();
    }

    #[test]
    fn single_staker_accrues_and_exits_clean() {
        let mut bench = Bench::new(ONE, 4, 5, ONE);
        bench.deposit(wallet(1), ONE, T0).unwrap();

        let acct = bench.ledger(&wallet(1));
        let now = T0 + 5;
        let expected = 5 * REWARD_PER_SECOND;
        assert_eq!(bench.pool.pending_reward(&acct, now).unwrap(), expected);
        assert_eq!(bench.pool.live_stake(&acct, now).unwrap(), ONE + expected);
        assert_eq!(bench.pool.rewards_of(&acct, now).unwrap(), expected);

        let outcome = bench.withdraw(wallet(1), ONE + expected, now).unwrap();
        assert!(outcome.closed);
        assert_eq!(outcome.paid, ONE + expected);
        assert_eq!(outcome.reward, expected);

        let acct = bench.ledger(&wallet(1));
        assert_eq!(bench.pool.live_stake(&acct, now).unwrap(), 0);
        assert!(!bench.pool.is_stakeholder(&wallet(1)));
        assert_eq!(bench.pool.registry.worst(), (Pubkey::default(), 0));
        assert_eq!(bench.pool.total_clear_stake, 0);
        // the lifecycle total stays readable after the close
        assert_eq!(bench.pool.rewards_of(&acct, now + 100).unwrap(), expected);
        assert_eq!(bench.balance(&wallet(1)), START_BALANCE + expected);
    }

    #[test]
    fn limit_raise_is_one_shot() {
        let mut bench = Bench::new(ONE, 4, 5, 0);
        let (previous, new) = bench.pool.update_stakeholders_limit().unwrap();
        assert_eq!((previous, new), (4, 5));
        assert_eq!(bench.pool.stakeholders_limit, 5);

        let err = bench.pool.update_stakeholders_limit().unwrap_err();
        assert_eq!(err, error!(ErrorCode::LimitAlreadyUpdated));
    }

    #[test]
    fn raised_limit_admits_a_fifth_staker() {
        let mut bench = Bench::new(ONE, 4, 5, ONE);
        for i in 1..=4 {
            bench.deposit(wallet(i), ONE, T0).unwrap();
        }
        assert!(bench.deposit(wallet(5), ONE, T0).is_err());

        bench.pool.update_stakeholders_limit().unwrap();
        bench.deposit(wallet(5), ONE, T0).unwrap();
        assert_eq!(bench.pool.total_stakeholders(), 5);
    }

    #[test]
    fn registry_orders_by_value_descending() {
        let mut bench = Bench::new(ONE, 4, 5, ONE);
        bench.deposit(wallet(1), 2 * ONE, T0).unwrap();
        bench.deposit(wallet(2), 3 * ONE, T0).unwrap();
        bench.deposit(wallet(3), ONE, T0).unwrap();

        let snap = bench.pool.registry.snapshot().unwrap();
        assert_eq!(
            snap,
            vec![
                (wallet(2), 3 * ONE),
                (wallet(1), 2 * ONE),
                (wallet(3), ONE)
            ]
        );
        assert_eq!(bench.pool.registry.worst(), (wallet(3), ONE));
    }

    #[test]
    fn top_up_realizes_then_reranks_once() {
        let mut bench = Bench::new(ONE, 4, 5, ONE);
        bench.deposit(wallet(1), ONE, T0).unwrap();
        bench.deposit(wallet(2), 2 * ONE, T0).unwrap();

        let outcome = bench.deposit(wallet(1), 2 * ONE, T0 + 4).unwrap();
        assert!(!outcome.joined);
        assert_eq!(outcome.reward, 4 * REWARD_PER_SECOND);
        assert_eq!(
            outcome.result_clear_stake,
            3 * ONE + 4 * REWARD_PER_SECOND
        );

        // combined value outranks the untouched staker
        let snap = bench.pool.registry.snapshot().unwrap();
        assert_eq!(snap[0].0, wallet(1));
        assert_eq!(snap[1].0, wallet(2));
    }

    #[test]
    fn partial_withdraw_keeps_membership() {
        let mut bench = Bench::new(ONE, 4, 5, ONE);
        bench.deposit(wallet(1), 3 * ONE, T0).unwrap();

        let outcome = bench.withdraw(wallet(1), ONE, T0).unwrap();
        assert!(!outcome.closed);
        assert_eq!(outcome.paid, ONE);
        assert_eq!(outcome.result_clear_stake, 2 * ONE);
        assert!(bench.pool.is_stakeholder(&wallet(1)));
    }

    #[test]
    fn withdraw_closing_when_remainder_below_minimal() {
        let mut bench = Bench::new(ONE, 4, 5, ONE);
        bench.deposit(wallet(1), 2 * ONE, T0).unwrap();

        // remainder would be ONE - 1, below the floor, so the position
        // closes and the whole live balance is paid
        let outcome = bench.withdraw(wallet(1), ONE + 1, T0).unwrap();
        assert!(outcome.closed);
        assert_eq!(outcome.paid, 2 * ONE);
        assert!(!bench.pool.is_stakeholder(&wallet(1)));
    }

    #[test]
    fn small_withdraw_after_accrual_still_closes() {
        let mut bench = Bench::new(ONE, 4, 5, ONE);
        bench.deposit(wallet(1), ONE, T0).unwrap();

        // live is ONE + 10R; removing half the principal would leave the
        // clear stake below the minimal floor
        let outcome = bench.withdraw(wallet(1), ONE / 2, T0 + 10).unwrap();
        assert!(outcome.closed);
        assert_eq!(outcome.paid, ONE + 10 * REWARD_PER_SECOND);
    }

    #[test]
    fn withdraw_remainder_exactly_minimal_stays_open() {
        let mut bench = Bench::new(ONE, 4, 5, ONE);
        bench.deposit(wallet(1), 2 * ONE, T0).unwrap();

        let outcome = bench.withdraw(wallet(1), ONE, T0).unwrap();
        assert!(!outcome.closed);
        assert_eq!(outcome.result_clear_stake, ONE);
    }

    #[test]
    fn rejected_operations_leave_state_untouched() {
        let mut bench = Bench::new(ONE, 4, 5, ONE);
        bench.deposit(wallet(1), ONE, T0).unwrap();
        let pool_before = bench.pool.clone();
        let vault_before = bench.stake_vault;

        assert!(bench.deposit(wallet(2), 0, T0).is_err());
        assert!(bench.deposit(wallet(2), ONE - 1, T0).is_err());
        assert!(bench.withdraw(wallet(2), ONE, T0).is_err());
        assert!(bench
            .withdraw(wallet(1), 2 * ONE + REWARD_PER_SECOND, T0 + 1)
            .is_err());
        assert!(bench.withdraw(wallet(1), 0, T0).is_err());
        assert!(bench.close(wallet(2), T0).is_err());

        assert_eq!(bench.pool, pool_before);
        assert_eq!(bench.stake_vault, vault_before);
    }

    #[test]
    fn empty_reserve_fails_realization() {
        let mut bench = Bench::new(ONE, 4, 5, 0);
        bench.deposit(wallet(1), ONE, T0).unwrap();
        let pool_before = bench.pool.clone();

        let err = bench.deposit(wallet(1), ONE, T0 + 5).unwrap_err();
        assert_eq!(err, error!(ErrorCode::InsufficientReserve));
        assert_eq!(bench.pool, pool_before);
    }

    #[test]
    fn rejoin_starts_a_fresh_reward_counter() {
        let mut bench = Bench::new(ONE, 4, 5, ONE);
        bench.deposit(wallet(1), ONE, T0).unwrap();
        bench.close(wallet(1), T0 + 7).unwrap();

        let acct = bench.ledger(&wallet(1));
        assert_eq!(acct.cumulative_reward, 7 * REWARD_PER_SECOND);

        bench.deposit(wallet(1), ONE, T0 + 20).unwrap();
        let acct = bench.ledger(&wallet(1));
        assert_eq!(acct.cumulative_reward, 0);
        assert_eq!(
            bench.pool.rewards_of(&acct, T0 + 25).unwrap(),
            5 * REWARD_PER_SECOND
        );
    }

    #[test]
    fn rewards_never_decrease_within_a_lifecycle() {
        let mut bench = Bench::new(ONE, 4, 5, ONE);
        bench.deposit(wallet(1), ONE, T0).unwrap();

        let mut last = 0u64;
        for step in 1..20u64 {
            let now = T0 + step * 3;
            if step % 4 == 0 {
                bench.deposit(wallet(1), ONE / 10, now).unwrap();
            } else if step % 7 == 0 {
                bench.withdraw(wallet(1), ONE / 10, now).unwrap();
            }
            let acct = bench.ledger(&wallet(1));
            let rewards = bench.pool.rewards_of(&acct, now).unwrap();
            assert!(rewards >= last);
            last = rewards;
        }
    }

    #[test]
    fn forced_close_pays_full_live_balance() {
        let mut bench = Bench::new(ONE, 4, 5, ONE);
        bench.deposit(wallet(1), ONE, T0).unwrap();
        bench.deposit(wallet(2), 2 * ONE, T0).unwrap();

        let outcome = bench.close(wallet(1), T0 + 6).unwrap();
        assert_eq!(outcome.payout, ONE + 6 * REWARD_PER_SECOND);
        assert_eq!(outcome.reward, 6 * REWARD_PER_SECOND);
        assert!(!bench.pool.is_stakeholder(&wallet(1)));
        assert_eq!(bench.pool.total_stakeholders(), 1);
    }

    #[test]
    fn invariants_hold_across_random_operation_mix() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut bench = Bench::new(ONE, 4, 5, 10 * ONE);
        let mut now = T0;

        // the bench asserts the balance invariant after every committed
        // operation; rejected ones must leave it intact
        for _ in 0..300 {
            now += rng.random_range(0..3);
            let who = wallet(rng.random_range(1..8));
            match rng.random_range(0..3) {
                0 => {
                    let amount = ONE * rng.random_range(1..4);
                    if bench.balance(&who) >= amount {
                        let _ = bench.deposit(who, amount, now);
                    }
                }
                1 => {
                    let _ = bench.withdraw(who, rng.random_range(1..2 * ONE), now);
                }
                _ => {
                    let _ = bench.close(who, now);
                }
            }
        }
        bench.assert_invariants();
    }

    #[test]
    fn deposit_then_full_withdraw_round_trip() {
        let mut bench = Bench::new(ONE, 4, 5, ONE);
        bench.deposit(wallet(1), ONE, T0).unwrap();
        let outcome = bench.withdraw(wallet(1), ONE, T0).unwrap();
        assert!(outcome.closed);
        assert_eq!(outcome.paid, ONE);
        assert!(!bench.pool.is_stakeholder(&wallet(1)));
        assert_eq!(bench.balance(&wallet(1)), START_BALANCE);
        assert_eq!(bench.pool.total_clear_stake, 0);
    }
}
