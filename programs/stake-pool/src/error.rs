use anchor_lang::prelude::*;

#[error_code]
pub enum ErrorCode {
    #[msg("Caller is not the owner")]
    NotOwner,

    #[msg("Zero address is not allowed")]
    ZeroAddress,

    #[msg("Guard address is reserved")]
    GuardAddress,

    #[msg("Account is already a stakeholder")]
    AlreadyStakeholder,

    #[msg("Account is not a stakeholder")]
    NotStakeholder,

    #[msg("Stake value must be greater than zero")]
    ZeroValue,

    #[msg("Amount must be greater than zero")]
    ZeroAmount,

    #[msg("Deposit is below the minimal stake")]
    BelowMinimalStake,

    #[msg("Stake must be higher than that of the worst stakeholder")]
    PoolFull,

    #[msg("Amount is greater than the real stake")]
    AmountExceedsStake,

    #[msg("Stakeholders limit has already been updated")]
    LimitAlreadyUpdated,

    #[msg("Insufficient funds in the reserve")]
    InsufficientReserve,

    #[msg("Insufficient funds in the vault")]
    InsufficientVault,

    #[msg("Worst stakeholder accounts are required when the pool is full")]
    MissingWorstStakeholder,

    #[msg("Provided accounts do not match the worst stakeholder")]
    WorstStakeholderMismatch,

    #[msg("Registry chain is broken")]
    BrokenRegistryLink,

    #[msg("Minimal stake must be greater than zero")]
    InvalidMinimalStake,

    #[msg("Stakeholders limit must be greater than zero")]
    InvalidStakeholdersLimit,

    #[msg("Next stakeholders limit must be greater than zero")]
    InvalidNextStakeholdersLimit,

    #[msg("Invalid timestamp conversion")]
    InvalidTimestamp,

    #[msg("Arithmetic overflow occurred")]
    Overflow,

    #[msg("Underflow occurred")]
    Underflow,
}
