pub mod deposit;
pub mod emergency_close_position;
pub mod fund_reserve;
pub mod initialize;
pub mod transfer_ownership;
pub mod update_stakeholders_limit;
pub mod withdraw;

pub use deposit::*;
pub use emergency_close_position::*;
pub use fund_reserve::*;
pub use initialize::*;
pub use transfer_ownership::*;
pub use update_stakeholders_limit::*;
pub use withdraw::*;
