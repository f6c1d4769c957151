//! Handlers for the one-shot commands.
//! Each handler drives the list controller the way the list view would and
//! prints the resulting page or notice.

use crate::{
    controllers::metadata_list::MetadataListController,
    errors::AppError,
    handlers::{
        render::{render_edit_form, render_page},
        terminal::{Terminal, settle},
    },
    models::{
        edit::EditField,
        notice::{Notice, NoticeLevel},
    },
    services::metadata_gateway::{GENERIC_FAILURE_MESSAGE, MetadataApi},
};
use clap::Args;
use tokio::io::AsyncBufRead;
use tracing::info;

/// Field overrides for `edit`.
#[derive(Args, Debug, Default)]
pub struct EditArgs {
    pub id: i64,

    #[arg(long)]
    pub title: Option<String>,

    /// Publication date, `YYYY-MM-DD`
    #[arg(long)]
    pub date: Option<String>,

    /// Publication time, `HH:MM`
    #[arg(long)]
    pub time: Option<String>,

    #[arg(long)]
    pub image_url: Option<String>,

    /// Feeds as a JSON list of `{"link": ...}` objects
    #[arg(long)]
    pub feeds: Option<String>,

    /// Authors as a JSON list of `{"name": ...}` objects
    #[arg(long)]
    pub authors: Option<String>,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

impl EditArgs {
    fn overrides(self) -> Vec<(EditField, String)> {
        [
            (EditField::Title, self.title),
            (EditField::Date, self.date),
            (EditField::Time, self.time),
            (EditField::ImageUrl, self.image_url),
            (EditField::Feeds, self.feeds),
            (EditField::Authors, self.authors),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.map(|value| (field, value)))
        .collect()
    }
}

/// `list`: load one set and print the requested page.
pub async fn list<G: MetadataApi>(
    controller: &mut MetadataListController<G>,
    inactive: bool,
    page: Option<usize>,
) -> Result<(), AppError> {
    if inactive {
        controller.toggle_active_inactive().await?;
    } else {
        controller.load().await?;
    }
    if let Some(page) = page {
        controller.change_page(page);
    }
    print!("{}", render_page(controller.state()));
    Ok(())
}

/// `create <URL>`
pub async fn create<G: MetadataApi>(
    controller: &mut MetadataListController<G>,
    url: &str,
) -> Result<(), AppError> {
    controller.open_create_form();
    controller.set_create_url(url);
    let outcome = controller.submit_create().await;
    match outcome.as_notice() {
        Some(notice) if notice.level == NoticeLevel::Success => {
            println!("{}", notice);
            print!("{}", render_page(controller.state()));
            Ok(())
        }
        Some(notice) => Err(notice_error(notice.clone())),
        None => Ok(()),
    }
}

/// `activate <ID>`
pub async fn activate<G, R>(
    controller: &mut MetadataListController<G>,
    terminal: &mut Terminal<R>,
    id: i64,
) -> Result<(), AppError>
where
    G: MetadataApi,
    R: AsyncBufRead + Unpin,
{
    let outcome = controller.request_activate(id);
    let (accepted, notice) = settle(controller, terminal, outcome).await?;
    finish_status_change(accepted, notice)
}

/// `deactivate <ID>`
pub async fn deactivate<G, R>(
    controller: &mut MetadataListController<G>,
    terminal: &mut Terminal<R>,
    id: i64,
) -> Result<(), AppError>
where
    G: MetadataApi,
    R: AsyncBufRead + Unpin,
{
    let outcome = controller.request_deactivate(id);
    let (accepted, notice) = settle(controller, terminal, outcome).await?;
    finish_status_change(accepted, notice)
}

/// Status changes report failures only through the log; an accepted change
/// without a notice still ends the process unsuccessfully.
fn finish_status_change(accepted: bool, notice: Option<Notice>) -> Result<(), AppError> {
    match (accepted, notice) {
        (_, Some(notice)) => {
            println!("{}", notice);
            Ok(())
        }
        (false, None) => {
            println!("Cancelled.");
            Ok(())
        }
        (true, None) => Err(AppError::failure(GENERIC_FAILURE_MESSAGE)),
    }
}

/// `edit <ID> [--field value ...]`
///
/// Looks the record up in the active set first, then in the inactive set.
pub async fn edit<G, R>(
    controller: &mut MetadataListController<G>,
    terminal: &mut Terminal<R>,
    args: EditArgs,
) -> Result<(), AppError>
where
    G: MetadataApi,
    R: AsyncBufRead + Unpin,
{
    let id = args.id;
    controller.load().await?;
    if controller.state().find(id).is_none() {
        controller.toggle_active_inactive().await?;
    }
    if !controller.begin_edit(id) {
        return Err(AppError::not_found(format!("metadata {} not found", id)));
    }

    if let Some(buffer) = controller.edit_buffer_mut() {
        for (field, value) in args.overrides() {
            buffer.set(field, value);
        }
        print!("{}", render_edit_form(&buffer.form));
    }

    let outcome = controller.submit_edit();
    let (accepted, notice) = settle(controller, terminal, outcome).await?;
    match notice {
        Some(notice) if matches!(notice.level, NoticeLevel::Success | NoticeLevel::Info) => {
            println!("{}", notice);
            Ok(())
        }
        Some(notice) => Err(notice_error(notice)),
        None => {
            info!("update of metadata {} declined", id);
            if !accepted {
                println!("Cancelled.");
            }
            Ok(())
        }
    }
}

fn notice_error(notice: Notice) -> AppError {
    match notice.level {
        NoticeLevel::Warning => AppError::usage(notice.text),
        _ => AppError::from(notice),
    }
}
