pub mod balance;
pub mod cycle;
pub mod partition;

pub use balance::BalancePass;
pub use cycle::{CyclePosition, cycle_bounds, cycle_position, position_of};
pub use partition::{MonthBucket, partition_by_month};
