use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Lines};
use tracing::debug;

use crate::core::config::parse_name_list;
use crate::features::log_entry::services::LogEntrySession;
use crate::modules::photo_library::LibraryPhotoPicker;
use crate::shared::validation::mask_date;

const MENU: &str = "\nForeman Log Entry
1. Set foreman
2. Set date
3. Add employee
4. Remove employee
5. Set hours
6. Set task description
7. Add photos
8. Review log
9. Submit log
0. Exit
";

struct Console<R, W> {
    lines: Lines<R>,
    out: W,
}

impl<R, W> Console<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    async fn say(&mut self, text: &str) -> std::io::Result<()> {
        self.out.write_all(text.as_bytes()).await?;
        self.out.write_all(b"\n").await?;
        self.out.flush().await
    }

    /// Print a prompt and read one trimmed line; `None` on end of input
    async fn ask(&mut self, prompt: &str) -> std::io::Result<Option<String>> {
        self.out.write_all(prompt.as_bytes()).await?;
        self.out.flush().await?;
        Ok(self
            .lines
            .next_line()
            .await?
            .map(|line| line.trim().to_string()))
    }
}

/// Resolve a 1-based number or a literal name against a list of names
fn pick_name<'a>(choice: &str, names: impl Iterator<Item = &'a str>) -> Option<String> {
    let names: Vec<&str> = names.collect();
    if let Ok(n) = choice.parse::<usize>() {
        return n
            .checked_sub(1)
            .and_then(|i| names.get(i))
            .map(|s| s.to_string());
    }
    names
        .into_iter()
        .find(|name| *name == choice)
        .map(str::to_string)
}

/// Numbered-menu loop driving one log entry session until exit or end of input
pub async fn run_console<R, W>(
    session: &mut LogEntrySession<LibraryPhotoPicker>,
    input: R,
    output: W,
) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut console = Console {
        lines: input.lines(),
        out: output,
    };

    loop {
        console.say(MENU).await?;
        let Some(choice) = console.ask("Select an option: ").await? else {
            break;
        };
        debug!("Console option selected: {}", choice);

        match choice.as_str() {
            "1" => {
                if let Some(name) = console.ask("Foreman name: ").await? {
                    session.model_mut().set_foreman(name);
                }
            }
            "2" => {
                if let Some(raw) = console.ask("Date (MM/DD/YYYY): ").await? {
                    let date = mask_date(&raw);
                    console.say(&format!("Date set to {}", date)).await?;
                    session.model_mut().set_date(date);
                }
            }
            "3" => add_employee(&mut console, session).await?,
            "4" => {
                let crew = crew_names(session);
                let Some(choice) = console.ask("Remove employee (number or name): ").await?
                else {
                    break;
                };
                match pick_name(&choice, crew.iter().map(String::as_str)) {
                    Some(name) => {
                        session.model_mut().remove_crew_entry(&name);
                        console.say(&format!("Removed {}.", name)).await?;
                    }
                    None => console.say("Not on the crew.").await?,
                }
            }
            "5" => {
                let crew = crew_names(session);
                let Some(choice) = console.ask("Employee (number or name): ").await? else {
                    break;
                };
                let Some(name) = pick_name(&choice, crew.iter().map(String::as_str)) else {
                    console.say("Not on the crew.").await?;
                    continue;
                };
                if let Some(hours) = console.ask("Hours: ").await? {
                    session.model_mut().set_hours(&name, hours);
                }
            }
            "6" => {
                if let Some(text) = console.ask("Brief description of daily task: ").await? {
                    session.model_mut().set_task_description(text);
                }
            }
            "7" => {
                let Some(raw) = console.ask("Photo file names (comma separated): ").await? else {
                    break;
                };
                session.picker_mut().stage(parse_name_list(&raw));
                match session.select_photos().await {
                    Ok(0) => console.say("No photos selected.").await?,
                    Ok(n) => console.say(&format!("Attached {} photos.", n)).await?,
                    Err(e) => console.say(&e.user_message()).await?,
                }
            }
            "8" => review(&mut console, session).await?,
            "9" => {
                console.say("Submitting log...").await?;
                match session.submit().await {
                    Ok(_) => console.say("Log submitted successfully!").await?,
                    Err(e) => console.say(&e.user_message()).await?,
                }
            }
            "0" => {
                console.say("Exiting...").await?;
                break;
            }
            _ => console.say("Invalid option.").await?,
        }
    }

    Ok(())
}

fn crew_names(session: &LogEntrySession<LibraryPhotoPicker>) -> Vec<String> {
    session
        .model()
        .crew()
        .iter()
        .map(|entry| entry.employee_name.clone())
        .collect()
}

async fn add_employee<R, W>(
    console: &mut Console<R, W>,
    session: &mut LogEntrySession<LibraryPhotoPicker>,
) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let listing = session
        .model()
        .directory()
        .names()
        .iter()
        .enumerate()
        .map(|(i, name)| format!("  {}) {}", i + 1, name))
        .collect::<Vec<_>>()
        .join("\n");
    console.say(&listing).await?;

    let Some(choice) = console
        .ask("Add employee (number or name, blank to cancel): ")
        .await?
    else {
        return Ok(());
    };

    if choice.is_empty() {
        return Ok(());
    }

    let directory = session.model().directory().clone();
    let name = pick_name(&choice, directory.names().iter().map(String::as_str)).unwrap_or(choice);

    let model = session.model_mut();
    let outcome = match model.select_candidate(&name) {
        Ok(()) => model.add_pending_as_crew_entry(),
        Err(e) => Err(e),
    };
    match outcome {
        Ok(()) => console.say(&format!("Added {}.", name)).await,
        Err(e) => console.say(&e.user_message()).await,
    }
}

async fn review<R, W>(
    console: &mut Console<R, W>,
    session: &LogEntrySession<LibraryPhotoPicker>,
) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let model = session.model();
    let mut summary = format!(
        "Foreman: {}\nDate: {}\nTask: {}\nCrew ({}):",
        model.foreman(),
        model.date(),
        model.task_description(),
        model.crew().len()
    );
    for entry in model.crew() {
        summary.push_str(&format!("\n  {} - {} h", entry.employee_name, entry.hours));
    }
    summary.push_str(&format!("\nPhotos: {}", model.photos().len()));
    console.say(&summary).await?;

    if let Err(errors) = session.review() {
        for (field, field_errors) in errors.field_errors() {
            for error in field_errors {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| error.code.to_string());
                console.say(&format!("Warning ({}): {}", field, message)).await?;
            }
        }
    }

    Ok(())
}
