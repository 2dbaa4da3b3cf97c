use rusqlite::{params, Connection, OptionalExtension};

use crate::constants::{DB_FILENAME, DEFAULT_DB};

pub fn db_connect() -> rusqlite::Result<Connection> {
    Connection::open(DB_FILENAME.get().map(String::as_str).unwrap_or(DEFAULT_DB))
}

pub fn check_or_create_db_tables(conn: &Connection) -> rusqlite::Result<()> {
    // one selected canteen per chat, nothing else is stored
    conn.prepare(
        "create table if not exists selections (
        chat_id integer not null unique primary key,
        canteen_id integer not null
        )",
    )?
    .execute([])?;

    Ok(())
}

pub fn get_selected_canteen(conn: &Connection, chat_id: i64) -> rusqlite::Result<Option<u32>> {
    let mut stmt = conn.prepare_cached("SELECT canteen_id FROM selections WHERE chat_id = ?1")?;
    let canteen_id = stmt
        .query_row(params![chat_id], |row| row.get::<_, u32>(0))
        .optional()?;

    Ok(canteen_id)
}

pub fn set_selected_canteen(
    conn: &Connection,
    chat_id: i64,
    canteen_id: u32,
) -> rusqlite::Result<()> {
    let mut stmt = conn.prepare_cached(
        "replace into selections (chat_id, canteen_id)
            values (?1, ?2)",
    )?;
    stmt.execute(params![chat_id, canteen_id])?;

    Ok(())
}
