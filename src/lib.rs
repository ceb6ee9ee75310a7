pub mod os;
pub mod proc;
pub mod record;
pub mod server;
pub mod signals;
pub mod ticks;
pub mod writer;
