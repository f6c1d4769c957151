//! Line-oriented terminal: reads commands and answers confirmation prompts.

use crate::{
    controllers::metadata_list::MetadataListController,
    models::notice::{ConfirmationRequest, Notice, Outcome},
    services::metadata_gateway::MetadataApi,
};
use std::io::{self, Write};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin};

pub struct Terminal<R> {
    lines: Lines<R>,
    assume_yes: bool,
}

impl Terminal<BufReader<Stdin>> {
    pub fn stdin() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()))
    }
}

impl<R: AsyncBufRead + Unpin> Terminal<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            assume_yes: false,
        }
    }

    /// Accept every confirmation without reading input.
    pub fn set_assume_yes(&mut self, assume_yes: bool) {
        self.assume_yes = assume_yes;
    }

    /// Print `prompt` and read one line. `None` at end of input.
    pub async fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        print!("{}", prompt);
        io::stdout().flush()?;
        self.lines.next_line().await
    }

    /// Ask the user to accept `request`. End of input counts as declining.
    pub async fn confirm(&mut self, request: &ConfirmationRequest) -> io::Result<bool> {
        println!("{} {}", request.title, request.text);
        if self.assume_yes {
            println!("{} (--yes)", request.confirm_label);
            return Ok(true);
        }

        let prompt = format!(
            "[y] {} / [n] {}: ",
            request.confirm_label, request.cancel_label
        );
        let answer = self.read_line(&prompt).await?.unwrap_or_default();
        Ok(is_yes(&answer))
    }
}

/// Drive `outcome` to completion, prompting for any confirmation it asks for.
///
/// Returns whether every confirmation was accepted and the final notice.
pub async fn settle<G, R>(
    controller: &mut MetadataListController<G>,
    terminal: &mut Terminal<R>,
    mut outcome: Outcome,
) -> io::Result<(bool, Option<Notice>)>
where
    G: MetadataApi,
    R: AsyncBufRead + Unpin,
{
    let mut accepted = true;
    loop {
        match outcome {
            Outcome::Done(notice) => return Ok((accepted, notice)),
            Outcome::NeedsConfirmation(request) => {
                let answer = terminal.confirm(&request).await?;
                accepted &= answer;
                outcome = controller.resolve_confirmation(request.token, answer).await;
            }
        }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
