pub mod block_rpc;
pub mod inbound;
