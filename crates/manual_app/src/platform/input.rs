use std::io::BufRead;
use std::sync::mpsc;
use std::thread;

use manual_core::Msg;

use super::app::AppEvent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Submit(String),
    Download,
    Quit,
}

pub fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let command = match line.to_lowercase().as_str() {
        "descargar" | "download" | ":d" => Command::Download,
        "salir" | "quit" | "exit" | ":q" => Command::Quit,
        _ => Command::Submit(line.to_string()),
    };
    Some(command)
}

/// Reads commands from stdin until EOF or `salir`.
pub fn spawn_reader(tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            let events = match parse_command(&line) {
                Some(Command::Submit(url)) => {
                    vec![
                        AppEvent::Ui(Msg::InputChanged(url)),
                        AppEvent::Ui(Msg::SubmitClicked),
                    ]
                }
                Some(Command::Download) => vec![AppEvent::Ui(Msg::DownloadClicked)],
                Some(Command::Quit) => vec![AppEvent::Quit],
                None => continue,
            };
            for event in events {
                if tx.send(event).is_err() {
                    return;
                }
            }
        }
        let _ = tx.send(AppEvent::Quit);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_map_to_commands() {
        assert_eq!(parse_command(" Descargar "), Some(Command::Download));
        assert_eq!(parse_command("quit"), Some(Command::Quit));
        assert_eq!(parse_command("   "), None);
    }

    #[test]
    fn anything_else_is_submitted_verbatim() {
        assert_eq!(
            parse_command("  docs.example.com/Intro "),
            Some(Command::Submit("docs.example.com/Intro".to_string()))
        );
    }
}
