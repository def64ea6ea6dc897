use std::{io::Write, sync::Arc};

use shape_redemption_utils::{InputState, LookupMode};
use shape_resolver_client_utils::RedemptionResolver;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use crate::{
    cli::OutputFormat,
    controller::{RedemptionChecker, ResultState},
};

const HELP: &str = "\
commands:
  component <address>   set the pool component address
  version <number>      set the ledger state version
  lower [price]         set the lower price bound, blank clears it
  upper [price]         set the upper price bound, blank clears it
  nft <id>              set the NFT id for a single check
  add <id>              append an NFT id to the batch list
  remove <index>        remove a batch entry
  edit <index> <id>     overwrite a batch entry
  stage <id>            type into the add-id field
  commit                append the staged id to the batch list
  single                check the single NFT id
  batch                 check every batch entry
  show                  print the current inputs and results
  help                  print this text
  quit                  leave the session";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SessionError {
    #[error("unknown command: {0} (try `help`)")]
    UnknownCommand(String),

    #[error("{0} needs an argument")]
    MissingArgument(&'static str),

    #[error("not a list index: {0}")]
    InvalidIndex(String),
}

/// One line typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Component(String),
    Version(String),
    Lower(String),
    Upper(String),
    Nft(String),
    Add(String),
    Remove(usize),
    Edit(usize, String),
    Stage(String),
    Commit,
    Check(LookupMode),
    Show,
    Help,
    Quit,
}

impl SessionCommand {
    /// Parses a prompt line. Blank lines yield `None`.
    ///
    /// Values are kept as typed after the command word; only the separating
    /// whitespace is dropped.
    pub fn parse(line: &str) -> Result<Option<Self>, SessionError> {
        let line = line.trim_start();
        if line.trim().is_empty() {
            return Ok(None);
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim_start().trim_end_matches(['\r', '\n'])),
            None => (line.trim_end(), ""),
        };

        let command = match word {
            "component" => SessionCommand::Component(rest.to_string()),
            "version" => SessionCommand::Version(rest.to_string()),
            "lower" => SessionCommand::Lower(rest.to_string()),
            "upper" => SessionCommand::Upper(rest.to_string()),
            "nft" => SessionCommand::Nft(rest.to_string()),
            "add" => SessionCommand::Add(rest.to_string()),
            "stage" => SessionCommand::Stage(rest.to_string()),
            "remove" => SessionCommand::Remove(parse_index(rest, "remove")?),
            "edit" => {
                let (index, id) = rest
                    .split_once(char::is_whitespace)
                    .ok_or(SessionError::MissingArgument("edit"))?;
                SessionCommand::Edit(parse_index(index, "edit")?, id.trim_start().to_string())
            }
            "commit" => SessionCommand::Commit,
            "single" => SessionCommand::Check(LookupMode::Single),
            "batch" => SessionCommand::Check(LookupMode::Batch),
            "show" => SessionCommand::Show,
            "help" => SessionCommand::Help,
            "quit" | "exit" => SessionCommand::Quit,
            other => return Err(SessionError::UnknownCommand(other.to_string())),
        };

        Ok(Some(command))
    }
}

fn parse_index(text: &str, command: &'static str) -> Result<usize, SessionError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(SessionError::MissingArgument(command));
    }
    text.parse()
        .map_err(|_| SessionError::InvalidIndex(text.to_string()))
}

/// Status line when a lookup was sent between two observed states.
///
/// Keyed on the dispatch count, so a lookup that started and finished
/// between two reads is still reported.
pub fn lookup_started(prev: &ResultState, next: &ResultState) -> Option<&'static str> {
    (next.dispatches != prev.dispatches).then_some("checking...")
}

fn describe_input(input: &InputState) -> String {
    let mut text = format!(
        "component address: {}\nstate version: {}\nprice bounds: [{}, {}]\nsingle nft id: {}\n",
        input.component_address(),
        input.state_version(),
        input.lower_price_bound(),
        input.upper_price_bound(),
        input.single_nft_id(),
    );
    text.push_str("batch nft ids:\n");
    for (i, id) in input.batch_nft_ids().iter().enumerate() {
        text.push_str(&format!("  {i}: {id}\n"));
    }
    if !input.staged_nft_id().is_empty() {
        text.push_str(&format!("staged: {}\n", input.staged_nft_id()));
    }
    text
}

/// Runs prompt commands from `lines` against `checker` until `quit` or end of
/// input, writing everything the operator should see to `out`.
pub async fn run_session<R, I, W>(
    checker: &RedemptionChecker<R>,
    lines: I,
    out: &mut W,
    format: OutputFormat,
) -> std::io::Result<()>
where
    R: RedemptionResolver,
    I: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = lines.lines();

    while let Some(line) = lines.next_line().await? {
        let command = match SessionCommand::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                writeln!(out, "{e}")?;
                continue;
            }
        };

        match command {
            SessionCommand::Component(address) => {
                checker.update_input(|input| {
                    input.set_component_address(address);
                });
            }
            SessionCommand::Version(version) => {
                checker.update_input(|input| {
                    input.set_state_version(version);
                });
            }
            SessionCommand::Lower(bound) => {
                checker.update_input(|input| {
                    input.set_lower_price_bound(bound);
                });
            }
            SessionCommand::Upper(bound) => {
                checker.update_input(|input| {
                    input.set_upper_price_bound(bound);
                });
            }
            SessionCommand::Nft(nft_id) => {
                checker.update_input(|input| {
                    input.set_single_nft_id(nft_id);
                });
            }
            SessionCommand::Add(nft_id) => {
                if !checker.update_input(|input| input.push_batch_nft_id(&nft_id)) {
                    writeln!(out, "nothing to add")?;
                }
            }
            SessionCommand::Remove(index) => {
                if checker
                    .update_input(|input| input.remove_batch_nft_id(index))
                    .is_none()
                {
                    writeln!(out, "no batch entry at {index}")?;
                }
            }
            SessionCommand::Edit(index, nft_id) => {
                if !checker.update_input(|input| input.edit_batch_nft_id(index, nft_id)) {
                    writeln!(out, "no batch entry at {index}")?;
                }
            }
            SessionCommand::Stage(nft_id) => {
                checker.update_input(|input| {
                    input.set_staged_nft_id(nft_id);
                });
            }
            SessionCommand::Commit => {
                if !checker.update_input(InputState::commit_staged_nft_id) {
                    writeln!(out, "nothing to add")?;
                }
            }
            SessionCommand::Check(mode) => match checker.check(mode).await {
                Ok(view) => {
                    let rendered = format.render(&view).map_err(std::io::Error::other)?;
                    writeln!(out, "{rendered}")?;
                }
                Err(e) => writeln!(out, "Error: {e}")?,
            },
            SessionCommand::Show => {
                write!(out, "{}", describe_input(&checker.input()))?;
                let state = checker.state();
                if let Some(error) = &state.error {
                    writeln!(out, "last error: {error}")?;
                }
            }
            SessionCommand::Help => writeln!(out, "{HELP}")?,
            SessionCommand::Quit => break,
        }
        out.flush()?;
    }

    Ok(())
}

/// Interactive prompt on stdin/stdout. A background task reports when a
/// lookup starts.
pub async fn run_interactive<R>(
    checker: Arc<RedemptionChecker<R>>,
    format: OutputFormat,
) -> std::io::Result<()>
where
    R: RedemptionResolver + 'static,
{
    let mut updates = checker.subscribe();
    let observer = tokio::spawn(async move {
        let mut prev = updates.borrow_and_update().clone();
        while updates.changed().await.is_ok() {
            let next = updates.borrow_and_update().clone();
            if let Some(status) = lookup_started(&prev, &next) {
                eprintln!("{status}");
            }
            prev = next;
        }
    });

    println!("{HELP}");
    let result = run_session(
        &*checker,
        BufReader::new(tokio::io::stdin()),
        &mut std::io::stdout(),
        format,
    )
    .await;

    observer.abort();
    result
}
