mod commands;
mod handlers;

pub use commands::{Cli, Commands};
pub use handlers::{
    handle_delete, handle_hash_password, handle_init, handle_list, handle_serve, load_config,
};
