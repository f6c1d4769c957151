//! Interactive list session.
//!
//! Reads one command per line and applies it to the list controller, printing
//! the page after every change of the visible set.

use crate::{
    controllers::metadata_list::MetadataListController,
    errors::AppError,
    handlers::{
        render::{render_edit_form, render_page},
        terminal::{Terminal, settle},
    },
    models::edit::EditField,
    services::metadata_gateway::MetadataApi,
};
use tokio::io::AsyncBufRead;

const PROMPT: &str = "metadata> ";

const HELP: &str = "\
Commands:
  next | prev | page N      move through pages
  toggle                    switch between active and inactive metadata
  show                      print the current page or the edit form
  create URL                submit a URL for analysis
  activate ID               activate a record
  deactivate ID             deactivate a record
  edit ID                   open the edit form for a record on the list
  set FIELD VALUE           change title, date, time, image-url, feeds or authors
  save                      submit the edit form
  cancel                    close the edit form
  help                      show this text
  quit                      leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    Next,
    Prev,
    Page(usize),
    Toggle,
    Show,
    Create(String),
    Activate(i64),
    Deactivate(i64),
    Edit(i64),
    Set(EditField, String),
    Save,
    Cancel,
    Help,
    Quit,
}

impl BrowseCommand {
    /// Parse one input line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "next" | "n" => Self::Next,
            "prev" | "p" => Self::Prev,
            "page" => Self::Page(parse_number(rest, "page")?),
            "toggle" | "t" => Self::Toggle,
            "show" | "ls" => Self::Show,
            "create" | "add" => Self::Create(rest.to_string()),
            "activate" => Self::Activate(parse_number(rest, "id")?),
            "deactivate" => Self::Deactivate(parse_number(rest, "id")?),
            "edit" => Self::Edit(parse_number(rest, "id")?),
            "set" => {
                let (name, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                let field = EditField::parse(name)
                    .ok_or_else(|| format!("unknown field `{}`", name))?;
                Self::Set(field, value.trim().to_string())
            }
            "save" => Self::Save,
            "cancel" => Self::Cancel,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            other => return Err(format!("unknown command `{}`, try `help`", other)),
        };
        Ok(Some(command))
    }
}

fn parse_number<T: std::str::FromStr>(text: &str, what: &str) -> Result<T, String> {
    text.parse()
        .map_err(|_| format!("expected a {} number, got `{}`", what, text))
}

/// `browse`: run the session until `quit` or end of input.
pub async fn browse<G, R>(
    controller: &mut MetadataListController<G>,
    terminal: &mut Terminal<R>,
) -> Result<(), AppError>
where
    G: MetadataApi,
    R: AsyncBufRead + Unpin,
{
    let _ = controller.load().await;
    print!("{}", render_page(controller.state()));

    while let Some(line) = terminal.read_line(PROMPT).await? {
        let command = match BrowseCommand::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                println!("{}", message);
                continue;
            }
        };

        let outcome = match command {
            BrowseCommand::Quit => break,
            BrowseCommand::Help => {
                println!("{}", HELP);
                continue;
            }
            BrowseCommand::Next => {
                controller.next_page();
                None
            }
            BrowseCommand::Prev => {
                controller.previous_page();
                None
            }
            BrowseCommand::Page(page) => {
                controller.change_page(page);
                None
            }
            BrowseCommand::Toggle => {
                let _ = controller.toggle_active_inactive().await;
                None
            }
            BrowseCommand::Show => {
                match controller.edit_buffer() {
                    Some(buffer) => print!("{}", render_edit_form(&buffer.form)),
                    None => print!("{}", render_page(controller.state())),
                }
                continue;
            }
            BrowseCommand::Create(url) => {
                controller.open_create_form();
                controller.set_create_url(url);
                Some(controller.submit_create().await)
            }
            BrowseCommand::Activate(id) => Some(controller.request_activate(id)),
            BrowseCommand::Deactivate(id) => Some(controller.request_deactivate(id)),
            BrowseCommand::Edit(id) => {
                if !controller.begin_edit(id) {
                    println!("Metadata {} is not in the current list.", id);
                    continue;
                }
                None
            }
            BrowseCommand::Set(field, value) => {
                match controller.edit_buffer_mut() {
                    Some(buffer) => buffer.set(field, value),
                    None => println!("Open a record with `edit ID` first."),
                }
                continue;
            }
            BrowseCommand::Save => Some(controller.submit_edit()),
            BrowseCommand::Cancel => {
                controller.cancel_edit();
                None
            }
        };

        if let Some(outcome) = outcome {
            let (_, notice) = settle(controller, terminal, outcome).await?;
            if let Some(notice) = notice {
                println!("{}", notice);
            }
        }
        match controller.edit_buffer() {
            Some(buffer) if controller.state().edit_form_open => {
                print!("{}", render_edit_form(&buffer.form))
            }
            _ => print!("{}", render_page(controller.state())),
        }
    }

    Ok(())
}
