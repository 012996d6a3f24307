use anchor_lang::prelude::*;

//
// ──────────────────────────────────────────────────────────────────────────────
// StakeholderAccount
// ──────────────────────────────────────────────────────────────────────────────
//

/// PDA seed string used to derive a wallet's stakeholder ledger account.
pub const STAKEHOLDER_SEED: &str = "stakeholder";

/// Per-wallet staking ledger. Created on the first deposit and kept for the
/// lifetime of the wallet's relationship with the pool, so reward history
/// stays readable after the position closes.
///
/// While the wallet is an active stakeholder its live stake is
/// `clear_stake + pending reward since last_update_at`; once the position
/// closes, `clear_stake` drops to zero and `cumulative_reward` keeps the
/// total earned over the finished lifecycle. A fresh join starts the
/// counter from zero again.
#[account]
#[derive(Default, Debug)]
pub struct StakeholderAccount {
    /// PDA bump for this account.
    pub bump: u8,

    /// Wallet this ledger belongs to.
    pub owner: Pubkey,

    /// Realized stake in lamports. Zero when the wallet is not an active
    /// stakeholder.
    pub clear_stake: u64,

    /// Last UNIX timestamp (seconds) at which rewards were realized into
    /// `clear_stake`.
    pub last_update_at: u64,

    /// Total reward realized over the current lifecycle (or the last
    /// finished one, once the position is closed).
    pub cumulative_reward: u64,
}

impl StakeholderAccount {
    /// Fixed serialized size of the account.
    ///
    /// Breakdown:
    /// - 8: account discriminator
    /// - 1: bump
    /// - 32: owner
    /// - 8 * 3: three `u64` fields
    pub const LEN: usize = 8 + 1 + 32 + 8 * 3;
}
