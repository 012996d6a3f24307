use crate::error::ErrorCode;
use crate::registry::Registry;
use crate::states::*;
use crate::utils;
use crate::{RESERVE_VAULT_SEED, STAKE_VAULT_SEED};
use anchor_lang::prelude::*;
use std::ops::DerefMut;

/// Accounts context for `initialize`.
///
/// Creates the singleton pool account and the two lamport vaults. The
/// vaults are dataless system-owned PDAs so the system program can debit
/// them under this program's signature; each gets funded to its rent
/// floor here so later transfers never have to account for rent.
#[derive(Accounts)]
#[instruction(admin: Pubkey, minimal_stake: u64, stakeholders_limit: u64, next_stakeholders_limit: u64)]
pub struct Initialize<'info> {
    /// Pays for account creation and the vault rent floors.
    #[account(mut)]
    pub payer: Signer<'info>,

    /// Singleton pool state, sized for the larger of the two capacity
    /// settings so the one-shot raise never needs a realloc.
    #[account(
        init,
        seeds = [POOL_SEED.as_bytes()],
        bump,
        payer = payer,
        space = Pool::space(stakeholders_limit.max(next_stakeholders_limit) as usize)
    )]
    pub pool: Box<Account<'info, Pool>>,

    /// Vault holding the staked principal.
    #[account(
        mut,
        seeds = [STAKE_VAULT_SEED.as_bytes()],
        bump,
    )]
    pub stake_vault: SystemAccount<'info>,

    /// Vault financing reward payouts.
    #[account(
        mut,
        seeds = [RESERVE_VAULT_SEED.as_bytes()],
        bump,
    )]
    pub reserve_vault: SystemAccount<'info>,

    pub system_program: Program<'info, System>,
}

/// Construction-time validation: the admin and every numeric setting must
/// be nonzero. The next limit may be lower than the initial one; the
/// one-shot raise simply adopts it as-is.
fn validate_pool_config(
    admin: &Pubkey,
    minimal_stake: u64,
    stakeholders_limit: u64,
    next_stakeholders_limit: u64,
) -> Result<()> {
    require_keys_neq!(*admin, Pubkey::default(), ErrorCode::ZeroAddress);
    require!(minimal_stake > 0, ErrorCode::InvalidMinimalStake);
    require!(stakeholders_limit > 0, ErrorCode::InvalidStakeholdersLimit);
    require!(
        next_stakeholders_limit > 0,
        ErrorCode::InvalidNextStakeholdersLimit
    );
    Ok(())
}

pub fn initialize(
    ctx: Context<Initialize>,
    admin: Pubkey,
    minimal_stake: u64,
    stakeholders_limit: u64,
    next_stakeholders_limit: u64,
) -> Result<()> {
    validate_pool_config(
        &admin,
        minimal_stake,
        stakeholders_limit,
        next_stakeholders_limit,
    )?;

    let pool = ctx.accounts.pool.deref_mut();
    pool.bump = ctx.bumps.pool;
    pool.stake_vault_bump = ctx.bumps.stake_vault;
    pool.reserve_vault_bump = ctx.bumps.reserve_vault;
    pool.admin = admin;
    pool.minimal_stake = minimal_stake;
    pool.stakeholders_limit = stakeholders_limit;
    pool.next_stakeholders_limit = next_stakeholders_limit;
    pool.limit_updated = false;
    pool.total_clear_stake = 0;
    pool.registry = Registry::new();

    // Bring both vaults to their rent floor so the invariant
    // `stake_vault - rent floor == total_clear_stake` starts at zero.
    let rent_floor = Rent::get()?.minimum_balance(0);
    let payer = ctx.accounts.payer.to_account_info();
    let system_program = ctx.accounts.system_program.to_account_info();
    utils::transfer_to_vault(
        &payer,
        &ctx.accounts.stake_vault.to_account_info(),
        &system_program,
        rent_floor.saturating_sub(ctx.accounts.stake_vault.lamports()),
    )?;
    utils::transfer_to_vault(
        &payer,
        &ctx.accounts.reserve_vault.to_account_info(),
        &system_program,
        rent_floor.saturating_sub(ctx.accounts.reserve_vault.lamports()),
    )?;
    msg!("Pool initialized");

    emit!(PoolInitialized {
        admin,
        minimal_stake,
        stakeholders_limit,
        next_stakeholders_limit,
        timestamp: utils::unix_now()?,
    });
    Ok(())
}
