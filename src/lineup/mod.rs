// Lineup construction: positions, slots, and the greedy allocator.

pub mod allocator;
pub mod slot;
