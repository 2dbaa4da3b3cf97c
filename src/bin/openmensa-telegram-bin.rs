use openmensa_telegram_rs::bot_command_handlers::{
    cancel, change_canteen, days_cmd, fetch_cmd, help, invalid_cmd, menu_cmd,
    reply_canteen_search, reply_fetch_canteen_id, start,
};
use openmensa_telegram_rs::constants::{DB_FILENAME, DEFAULT_API_URL, DEFAULT_DB};
use openmensa_telegram_rs::data_backend::openmensa_parser::OpenMensaClient;
use openmensa_telegram_rs::data_types::{Command, DialogueState};
use openmensa_telegram_rs::db_operations::{check_or_create_db_tables, db_connect};
use openmensa_telegram_rs::shared_main::{callback_handler, logger_init};

use clap::Parser;
use log::log_enabled;
use teloxide::{
    dispatching::{
        dialogue::{self, InMemStorage},
        UpdateHandler,
    },
    prelude::*,
};

/// Telegram bot to browse canteen menus of any OpenMensa canteen.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// The telegram bot token to be used
    #[arg(short, long, env)]
    token: String,
    /// OpenMensa API base URL
    #[arg(long, env = "OPENMENSA_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,
    /// SQLite file storing the selected canteen per chat
    #[arg(long, env = "OPENMENSA_DB", default_value = DEFAULT_DB)]
    db: String,
    /// Enable verbose logging (request urls, timings){n}[SETS env: RUST_LOG=debug]
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    //// Args setup
    let args = Args::parse();

    if args.verbose {
        std::env::set_var("RUST_LOG", "debug");
    }

    logger_init(module_path!());
    log::info!("Starting bot...");

    if !(log_enabled!(log::Level::Debug) || log_enabled!(log::Level::Trace)) {
        log::info!("Enable verbose logging for request details");
    }

    //// DB setup
    DB_FILENAME.get_or_init(|| args.db.clone());
    if let Err(e) = db_connect().and_then(|conn| check_or_create_db_tables(&conn)) {
        log::error!("Could not open database '{}': {}", args.db, e);
        std::process::exit(1);
    }

    let client = OpenMensaClient::new(&args.api_url);
    log::info!("Using OpenMensa API at {}", client.base_url());

    let bot = Bot::new(args.token);

    let command_handler_deps = dptree::deps![InMemStorage::<DialogueState>::new(), client];
    Dispatcher::builder(bot, schema())
        .dependencies(command_handler_deps)
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}

fn schema() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
    use dptree::case;

    let command_handler = teloxide::filter_command::<Command, _>()
        .branch(case![Command::Start].endpoint(start))
        .branch(case![Command::Help].endpoint(help))
        .branch(case![Command::Canteen(query)].endpoint(change_canteen))
        .branch(case![Command::Days].endpoint(days_cmd))
        .branch(case![Command::Menu(date)].endpoint(menu_cmd))
        .branch(case![Command::Fetch(args)].endpoint(fetch_cmd))
        .branch(case![Command::Cancel].endpoint(cancel));

    let message_handler = Update::filter_message()
        .branch(command_handler)
        .branch(case![DialogueState::AwaitCanteenSearch].endpoint(reply_canteen_search))
        .branch(case![DialogueState::AwaitFetchCanteenId].endpoint(reply_fetch_canteen_id))
        .branch(dptree::endpoint(invalid_cmd));

    let callback_query_handler = Update::filter_callback_query().endpoint(callback_handler);

    dialogue::enter::<Update, InMemStorage<DialogueState>, DialogueState, _>()
        .branch(message_handler)
        .branch(callback_query_handler)
}
