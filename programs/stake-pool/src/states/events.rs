use anchor_lang::prelude::*;

//
// ──────────────────────────────────────────────────────────────────────────────
// Events: Emitted for off-chain indexers/clients to track pool state changes
// ──────────────────────────────────────────────────────────────────────────────
//

/// Emitted once when the pool is initialized.
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct PoolInitialized {
    /// Pool admin pubkey.
    pub admin: Pubkey,
    /// Minimum deposit to join, in lamports.
    pub minimal_stake: u64,
    /// Initial stakeholder capacity.
    pub stakeholders_limit: u64,
    /// Capacity the one-shot raise will move to.
    pub next_stakeholders_limit: u64,
    /// Block timestamp (UNIX seconds).
    pub timestamp: u64,
}

/// Emitted for every successful deposit, after the stake has been applied.
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct Deposited {
    /// Depositing wallet.
    pub staker: Pubkey,
    /// Lamports carried by the call.
    pub amount: u64,
    /// Clear stake after the deposit (reward realized, amount added).
    pub clear_stake: u64,
    /// Whether this deposit opened a new position.
    pub joined: bool,
    /// Block timestamp (UNIX seconds).
    pub timestamp: u64,
}

/// Emitted for every successful withdrawal.
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct Withdrawn {
    /// Withdrawing wallet.
    pub staker: Pubkey,
    /// Lamports paid out. On a closing withdrawal this is the whole live
    /// balance, which may exceed the requested amount.
    pub paid: u64,
    /// Whether the position was closed by this withdrawal.
    pub closed: bool,
    /// Block timestamp (UNIX seconds).
    pub timestamp: u64,
}

/// Emitted when a wallet enters the registry.
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct StakeholderAdded {
    pub staker: Pubkey,
    /// Ranked value at entry.
    pub value: u64,
    pub timestamp: u64,
}

/// Emitted when a wallet leaves the registry.
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct StakeholderRemoved {
    pub staker: Pubkey,
    pub timestamp: u64,
}

/// Emitted when a member's ranked value grows (top-up deposit).
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct StakeholderIncreased {
    pub staker: Pubkey,
    /// Ranked value after the increase.
    pub value: u64,
    pub timestamp: u64,
}

/// Emitted when a member's ranked value shrinks (partial withdrawal).
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct StakeholderDecreased {
    pub staker: Pubkey,
    /// Ranked value after the decrease.
    pub value: u64,
    pub timestamp: u64,
}

/// Emitted when a full pool drops its worst stakeholder to admit a better
/// newcomer.
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct WorstDropped {
    /// Evicted wallet.
    pub dropped: Pubkey,
    /// Full live balance paid to the evicted wallet.
    pub payout: u64,
    /// Newcomer that displaced it.
    pub replaced_by: Pubkey,
    pub timestamp: u64,
}

/// Emitted whenever pending reward is pulled from the reserve and folded
/// into a stakeholder's clear stake.
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct RewardRealized {
    pub staker: Pubkey,
    /// Reward pulled from the reserve, in lamports.
    pub reward: u64,
    /// Lifecycle total after this realization.
    pub cumulative_reward: u64,
    pub timestamp: u64,
}

/// Emitted for every lamport payout leaving the stake vault.
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct PaidOut {
    pub recipient: Pubkey,
    pub amount: u64,
    pub timestamp: u64,
}

/// Emitted when a position is closed by the admin's emergency path.
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct PositionClosed {
    pub staker: Pubkey,
    /// Full live balance returned to the wallet.
    pub payout: u64,
    pub timestamp: u64,
}

/// Emitted by the one-shot capacity raise.
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct StakeholdersLimitUpdated {
    pub previous_limit: u64,
    pub new_limit: u64,
    pub timestamp: u64,
}

/// Emitted when pool administration moves to a new wallet.
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct OwnershipTransferred {
    pub previous_admin: Pubkey,
    pub new_admin: Pubkey,
    pub timestamp: u64,
}

/// Emitted when lamports are added to the reward reserve.
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct ReserveFunded {
    pub funder: Pubkey,
    pub amount: u64,
    pub timestamp: u64,
}
