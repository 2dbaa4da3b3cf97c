pub mod bot_command_handlers;
pub mod bot_command_helpers;
pub mod constants;
pub mod data_backend;
pub mod data_types;
pub mod db_operations;
pub mod shared_main;
