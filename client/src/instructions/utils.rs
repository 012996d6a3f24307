use anchor_lang::AccountDeserialize;
use anyhow::Result;
use solana_sdk::{account::Account, pubkey::Pubkey};
use stake_pool::states::{POOL_SEED, STAKEHOLDER_SEED};

pub fn deserialize_anchor_account<T: AccountDeserialize>(account: &Account) -> Result<T> {
    let mut data: &[u8] = &account.data;
    T::try_deserialize(&mut data).map_err(Into::into)
}

pub fn get_pool_address(program_id: &Pubkey) -> Pubkey {
    let (pool, _bump) = Pubkey::find_program_address(&[POOL_SEED.as_bytes()], program_id);
    pool
}

pub fn get_stake_vault_address(program_id: &Pubkey) -> Pubkey {
    let (stake_vault, _bump) =
        Pubkey::find_program_address(&[stake_pool::STAKE_VAULT_SEED.as_bytes()], program_id);
    stake_vault
}

pub fn get_reserve_vault_address(program_id: &Pubkey) -> Pubkey {
    let (reserve_vault, _bump) =
        Pubkey::find_program_address(&[stake_pool::RESERVE_VAULT_SEED.as_bytes()], program_id);
    reserve_vault
}

pub fn get_stakeholder_address(wallet: &Pubkey, program_id: &Pubkey) -> Pubkey {
    let (stakeholder, _bump) = Pubkey::find_program_address(
        &[STAKEHOLDER_SEED.as_bytes(), wallet.as_ref()],
        program_id,
    );
    stakeholder
}
