use crate::error::ErrorCode;
use anchor_lang::prelude::*;
use anchor_lang::solana_program::{
    program::{invoke, invoke_signed},
    system_instruction,
};

/// Current block timestamp as unsigned seconds.
pub fn unix_now() -> Result<u64> {
    let clock = Clock::get()?;
    u64::try_from(clock.unix_timestamp).map_err(|_| error!(ErrorCode::InvalidTimestamp))
}

/// Lamports a vault can pay out without dropping below its rent floor.
pub fn vault_available(vault: &AccountInfo) -> Result<u64> {
    let rent_floor = Rent::get()?.minimum_balance(0);
    Ok(vault.lamports().saturating_sub(rent_floor))
}

/// Moves lamports from a signing wallet into a vault.
pub fn transfer_to_vault<'info>(
    from: &AccountInfo<'info>,
    vault: &AccountInfo<'info>,
    system_program: &AccountInfo<'info>,
    amount: u64,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }
    invoke(
        &system_instruction::transfer(from.key, vault.key, amount),
        &[from.clone(), vault.clone(), system_program.clone()],
    )?;
    Ok(())
}

/// Moves lamports out of a program vault, signing with the vault's own
/// PDA seeds. Refuses to dip into the rent floor.
pub fn transfer_from_vault<'info>(
    vault: &AccountInfo<'info>,
    to: &AccountInfo<'info>,
    system_program: &AccountInfo<'info>,
    amount: u64,
    seeds: &[&[u8]],
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }
    require!(
        amount <= vault_available(vault)?,
        ErrorCode::InsufficientVault
    );
    invoke_signed(
        &system_instruction::transfer(vault.key, to.key, amount),
        &[vault.clone(), to.clone(), system_program.clone()],
        &[seeds],
    )?;
    Ok(())
}

/// Pulls a realized reward from the reserve vault into the stake vault so
/// the principal invariant keeps matching the vault balance.
pub fn pull_from_reserve<'info>(
    reserve_vault: &AccountInfo<'info>,
    stake_vault: &AccountInfo<'info>,
    system_program: &AccountInfo<'info>,
    amount: u64,
    reserve_vault_bump: u8,
) -> Result<()> {
    require!(
        amount <= vault_available(reserve_vault)?,
        ErrorCode::InsufficientReserve
    );
    transfer_from_vault(
        reserve_vault,
        stake_vault,
        system_program,
        amount,
        &[
            crate::RESERVE_VAULT_SEED.as_bytes(),
            &[reserve_vault_bump],
        ],
    )
}

/// Pays lamports out of the stake vault to a recipient wallet.
pub fn pay_from_stake_vault<'info>(
    stake_vault: &AccountInfo<'info>,
    to: &AccountInfo<'info>,
    system_program: &AccountInfo<'info>,
    amount: u64,
    stake_vault_bump: u8,
) -> Result<()> {
    transfer_from_vault(
        stake_vault,
        to,
        system_program,
        amount,
        &[crate::STAKE_VAULT_SEED.as_bytes(), &[stake_vault_bump]],
    )
}
