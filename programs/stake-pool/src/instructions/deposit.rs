use crate::error::ErrorCode;
use crate::states::*;
use crate::utils;
use crate::{RESERVE_VAULT_SEED, STAKE_VAULT_SEED};
use anchor_lang::prelude::*;

/// Accounts context for `deposit`.
///
/// The stakeholder ledger is created on first contact and reused for the
/// wallet's whole history. When the pool is full and the caller is not yet
/// a member, the two optional eviction accounts must name the current
/// worst stakeholder so its position can be closed and paid out in the
/// same transaction.
#[derive(Accounts)]
pub struct Deposit<'info> {
    /// Depositing wallet; funds the stake and, on first contact, the
    /// ledger account rent.
    #[account(mut)]
    pub staker: Signer<'info>,

    #[account(
        mut,
        seeds = [POOL_SEED.as_bytes()],
        bump = pool.bump,
    )]
    pub pool: Box<Account<'info, Pool>>,

    /// Per-wallet staking ledger.
    #[account(
        init_if_needed,
        seeds = [STAKEHOLDER_SEED.as_bytes(), staker.key().as_ref()],
        bump,
        payer = staker,
        space = StakeholderAccount::LEN
    )]
    pub stakeholder: Box<Account<'info, StakeholderAccount>>,

    #[account(
        mut,
        seeds = [STAKE_VAULT_SEED.as_bytes()],
        bump = pool.stake_vault_bump,
    )]
    pub stake_vault: SystemAccount<'info>,

    #[account(
        mut,
        seeds = [RESERVE_VAULT_SEED.as_bytes()],
        bump = pool.reserve_vault_bump,
    )]
    pub reserve_vault: SystemAccount<'info>,

    /// Ledger of the stakeholder to evict; required only when the pool is
    /// full and the caller is joining.
    #[account(mut)]
    pub evicted_stakeholder: Option<Box<Account<'info, StakeholderAccount>>>,

    /// Wallet of the stakeholder to evict, paid its full live balance.
    ///
    /// CHECK: must match the evicted ledger's recorded owner; the handler
    /// verifies it against the registry's worst entry.
    #[account(mut)]
    pub evicted_wallet: Option<UncheckedAccount<'info>>,

    pub system_program: Program<'info, System>,
}

pub fn deposit(ctx: Context<Deposit>, amount: u64) -> Result<()> {
    let now = utils::unix_now()?;
    let staker = ctx.accounts.staker.key();

    let stakeholder: &mut StakeholderAccount = &mut ctx.accounts.stakeholder;
    stakeholder.bump = ctx.bumps.stakeholder;

    let evicted_wallet_key = ctx.accounts.evicted_wallet.as_ref().map(|w| w.key());
    let evicted = match (evicted_wallet_key, ctx.accounts.evicted_stakeholder.as_mut()) {
        (Some(wallet), Some(ledger)) => {
            require_keys_eq!(ledger.owner, wallet, ErrorCode::WorstStakeholderMismatch);
            let ledger: &mut StakeholderAccount = ledger;
            Some((wallet, ledger))
        }
        _ => None,
    };

    let outcome = ctx
        .accounts
        .pool
        .deposit_stake(staker, stakeholder, evicted, amount, now)?;

    let rewards = outcome
        .reward
        .checked_add(outcome.eviction.map(|e| e.reward).unwrap_or(0))
        .ok_or(error!(ErrorCode::Overflow))?;

    // Lamport flows: stake in, realized rewards from the reserve, then
    // the eviction payout out of the stake vault.
    let system_program = ctx.accounts.system_program.to_account_info();
    let stake_vault = ctx.accounts.stake_vault.to_account_info();
    utils::transfer_to_vault(
        &ctx.accounts.staker.to_account_info(),
        &stake_vault,
        &system_program,
        amount,
    )?;
    utils::pull_from_reserve(
        &ctx.accounts.reserve_vault.to_account_info(),
        &stake_vault,
        &system_program,
        rewards,
        ctx.accounts.pool.reserve_vault_bump,
    )?;

    if let Some(eviction) = outcome.eviction {
        let evicted_wallet = ctx
            .accounts
            .evicted_wallet
            .as_ref()
            .ok_or(error!(ErrorCode::MissingWorstStakeholder))?;
        utils::pay_from_stake_vault(
            &stake_vault,
            &evicted_wallet.to_account_info(),
            &system_program,
            eviction.payout,
            ctx.accounts.pool.stake_vault_bump,
        )?;
        msg!(
            "Dropped worst stakeholder {} with payout {}",
            eviction.target,
            eviction.payout
        );
        if eviction.reward > 0 {
            emit!(RewardRealized {
                staker: eviction.target,
                reward: eviction.reward,
                cumulative_reward: ctx
                    .accounts
                    .evicted_stakeholder
                    .as_ref()
                    .map(|a| a.cumulative_reward)
                    .unwrap_or(0),
                timestamp: now,
            });
        }
        emit!(WorstDropped {
            dropped: eviction.target,
            payout: eviction.payout,
            replaced_by: staker,
            timestamp: now,
        });
        emit!(StakeholderRemoved {
            staker: eviction.target,
            timestamp: now,
        });
        emit!(PaidOut {
            recipient: eviction.target,
            amount: eviction.payout,
            timestamp: now,
        });
    }

    if outcome.reward > 0 {
        emit!(RewardRealized {
            staker,
            reward: outcome.reward,
            cumulative_reward: ctx.accounts.stakeholder.cumulative_reward,
            timestamp: now,
        });
    }
    if outcome.joined {
        emit!(StakeholderAdded {
            staker,
            value: outcome.result_clear_stake,
            timestamp: now,
        });
    } else {
        emit!(StakeholderIncreased {
            staker,
            value: outcome.result_clear_stake,
            timestamp: now,
        });
    }
    emit!(Deposited {
        staker,
        amount,
        clear_stake: outcome.result_clear_stake,
        joined: outcome.joined,
        timestamp: now,
    });
    Ok(())
}
