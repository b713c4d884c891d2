//! Interactive chat loop.
//!
//! SYSTEM CONTEXT
//! ==============
//! Runs inside a `LocalSet`: the status poll is a sibling local task, so a
//! status check can land while a reply is still pending. Lines starting with
//! `/` are commands; anything else is sent as a chat message.

#[cfg(test)]
#[path = "repl_test.rs"]
mod repl_test;

use std::path::PathBuf;
use std::rc::Rc;

use chatbot::{ChatApp, HttpBackend, Intent, Presenter};
use chatbot::store::KvStore;
use chatbot::upload::Document;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::CliError;

pub const HELP: &str = "\
commands:
  /clear          start a new conversation
  /status         check the server now
  /stats          refresh knowledge-base statistics
  /upload <path>  add a document to the knowledge base
  /session        show the session id
  /help           show this help
  /quit           leave";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReplCommand {
    Send(String),
    Clear,
    Status,
    Stats,
    Upload(PathBuf),
    Session,
    Help,
    Quit,
    Nothing,
    Unknown(String),
}

pub fn parse_line(line: &str) -> ReplCommand {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return ReplCommand::Nothing;
    }
    let Some(command) = trimmed.strip_prefix('/') else {
        return ReplCommand::Send(trimmed.to_owned());
    };
    let (name, arg) = command.split_once(char::is_whitespace).map_or((command, ""), |(n, a)| (n, a.trim()));
    match name {
        "clear" => ReplCommand::Clear,
        "status" => ReplCommand::Status,
        "stats" => ReplCommand::Stats,
        "upload" if !arg.is_empty() => ReplCommand::Upload(PathBuf::from(arg)),
        "session" => ReplCommand::Session,
        "help" | "?" => ReplCommand::Help,
        "quit" | "exit" | "q" => ReplCommand::Quit,
        _ => ReplCommand::Unknown(trimmed.to_owned()),
    }
}

/// Read a file from disk as an upload candidate. Size and type are checked
/// before reading.
///
/// # Errors
///
/// Validation failure or an unreadable file.
pub async fn read_document(path: &std::path::Path) -> Result<Document, CliError> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| CliError::InvalidPath(path.display().to_string()))?
        .to_owned();
    let metadata = tokio::fs::metadata(path).await.map_err(|e| CliError::Io(path.display().to_string(), e))?;
    chatbot::upload::validate_upload(&file_name, metadata.len()).map_err(chatbot::ClientError::from)?;
    let bytes = tokio::fs::read(path).await.map_err(|e| CliError::Io(path.display().to_string(), e))?;
    Ok(Document::new(file_name, bytes))
}

/// Run until `/quit` or end of input.
///
/// # Errors
///
/// Only a failure to read standard input ends the loop with an error.
pub async fn run<B, S, P>(app: Rc<ChatApp<B, S, P>>) -> Result<(), CliError>
where
    B: HttpBackend + 'static,
    S: KvStore + 'static,
    P: Presenter + 'static,
{
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    println!("type /help for commands");
    while let Some(line) = lines.next_line().await.map_err(|e| CliError::Io("stdin".to_owned(), e))? {
        match parse_line(&line) {
            ReplCommand::Send(text) => app.dispatch(Intent::SendMessage(text)).await,
            ReplCommand::Clear => app.dispatch(Intent::ClearHistory).await,
            ReplCommand::Status => {
                let state = app.check_status().await;
                println!("-- {}", state.as_str());
            }
            ReplCommand::Stats => app.dispatch(Intent::RefreshKnowledgeBase).await,
            ReplCommand::Upload(path) => match read_document(&path).await {
                Ok(document) => app.dispatch(Intent::UploadDocument(document)).await,
                Err(e) => eprintln!("[error] {e}"),
            },
            ReplCommand::Session => println!("-- session {}", app.session_id()),
            ReplCommand::Help => println!("{HELP}"),
            ReplCommand::Quit => break,
            ReplCommand::Nothing => {}
            ReplCommand::Unknown(input) => eprintln!("unknown command `{input}`; type /help"),
        }
    }
    Ok(())
}
