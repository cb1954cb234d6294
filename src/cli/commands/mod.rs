mod init;
mod seed;
mod serve;

pub use init::cmd_init;
pub use seed::cmd_seed;
pub use serve::cmd_serve;
