//! Database creation and removal, branching on the configured engine

use crate::application::session::Session;
use crate::domain::ports::ShellCommand;
use crate::domain::value_objects::{Database, OptionSet};
use crate::error::{WiseError, WiseResult};
use crate::infrastructure::shell_quote;

const POSTGRES_ADMIN: &str = "postgres";

pub fn create_db(session: &Session) -> WiseResult<()> {
    session.reporter().section("Creating database");
    match session.config().db_engine() {
        Database::Postgres => postgres_create(session),
        Database::Mysql => Err(mysql_gap()),
        other => Err(unsupported(other)),
    }
}

pub fn drop_db(session: &Session) -> WiseResult<()> {
    session.reporter().section("Dropping database");
    match session.config().db_engine() {
        Database::Postgres => postgres_drop(session),
        Database::Mysql => Err(mysql_gap()),
        other => Err(unsupported(other)),
    }
}

pub fn reset_db(session: &Session) -> WiseResult<()> {
    drop_db(session)?;
    create_db(session)
}

/// Database and role are created separately so an existing one does not
/// block the other.
fn postgres_create(session: &Session) -> WiseResult<()> {
    let config = session.config();

    let db = session.exec(psql(format!(
        "CREATE DATABASE {};",
        config.project_name()
    )))?;
    if db.failed() {
        session.reporter().detail("DB already exists");
    }

    let role = session.exec(
        psql(format!(
            "CREATE USER {} WITH ENCRYPTED PASSWORD {};",
            config.project_user(),
            sql_literal(config.password())
        ))
        .sensitive(),
    )?;
    if role.failed() {
        session.reporter().detail("DB User already exists");
    }
    Ok(())
}

fn postgres_drop(session: &Session) -> WiseResult<()> {
    let config = session.config();
    session.exec(psql(format!("DROP DATABASE {};", config.project_name())))?;
    session.exec(psql(format!("DROP ROLE IF EXISTS {};", config.project_user())))?;
    Ok(())
}

fn psql(sql: String) -> ShellCommand {
    ShellCommand::sudo(format!("psql -c {}", shell_quote(&sql)))
        .as_user(POSTGRES_ADMIN)
        .warn()
}

/// SQL string literal
fn sql_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

fn mysql_gap() -> WiseError {
    WiseError::NotImplemented {
        feature: "mysql support".to_string(),
    }
}

fn unsupported(engine: Database) -> WiseError {
    WiseError::UnsupportedOption {
        kind: Database::KIND,
        value: engine.as_str().to_string(),
    }
}
