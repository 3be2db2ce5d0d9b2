// Orchestration: runs the statistics engine over a whole document set.

pub mod analysis;
