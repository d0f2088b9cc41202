pub mod block_state;
pub mod block_sync;
pub mod replicated_block;
