// Terminal frontend - text-mode rendering, speech and input
//
// Cards are printed to the wrapped writer (stdout in the binary). There is no audio
// backend in a terminal, so TerminalSpeech prints what would be spoken.

use crate::models::{CardView, Mode, Screen, Theme};
use crate::services::{AnswerResult, ALL_CATEGORIES, QuizError, QuizQuestion, SpeechRequest, VoiceInfo};
use crate::ui::{Command, Frontend, SpeechSink};
use std::fmt::Write as _;
use std::io::{self, Write};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Command reference printed on `help` or unknown input
pub const HELP: &str = "\
Commands:
  n, next          next card
  p, prev          previous card
  r, random        random card
  q, quiz          toggle quiz mode
  /TEXT            search (\"/\" alone clears)
  search TEXT      search
  cat NAME|all     filter by category
  1..4             answer the quiz
  s                speak the term
  e N              speak example N
  voices           list voices
  voice NAME       select a voice
  t, theme         toggle theme
  x, exit          quit";

const SEPARATOR: &str = "────────────────────────────────────────";

// ANSI styling used by the dark theme
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Renders screens as text.
pub struct TerminalFrontend<W: Write + Send> {
    out: W,
    theme: Theme,
}

impl TerminalFrontend<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> TerminalFrontend<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            theme: Theme::Light,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{}", text).and_then(|_| self.out.flush()) {
            tracing::warn!("Failed to write to terminal: {}", e);
        }
    }

    fn emphasis(&self, text: &str) -> String {
        match self.theme {
            Theme::Dark => format!("{BOLD}{text}{RESET}"),
            Theme::Light => text.to_string(),
        }
    }

    fn format_card(&self, card: &CardView) -> String {
        let entry = &card.entry;
        let mut text = String::new();

        let _ = writeln!(text, "{}", SEPARATOR);
        match &entry.category {
            Some(category) => {
                let _ = writeln!(text, "{}  [{}]", self.emphasis(&entry.term), category.to_uppercase());
            }
            None => {
                let _ = writeln!(text, "{}", self.emphasis(&entry.term));
            }
        }

        match (&card.mode, &card.quiz) {
            (Mode::Quiz, Some(question)) => format_question(&mut text, question),
            _ => {
                for (i, definition) in entry.definitions.iter().enumerate() {
                    let _ = writeln!(text, "  {}. {}", i + 1, definition.translation);
                    if !definition.example_source.is_empty() {
                        let _ = writeln!(text, "     e{}: {}", i + 1, definition.example_source);
                    }
                    if !definition.example_target.is_empty() {
                        let _ = writeln!(text, "         {}", definition.example_target);
                    }
                }
            }
        }

        let _ = write!(text, "{}\n{}", SEPARATOR, card.counter());
        text
    }
}

fn format_question(text: &mut String, question: &QuizQuestion) {
    for (i, option) in question.options.iter().enumerate() {
        let mark = if !question.answered {
            " "
        } else if *option == question.correct_option {
            "✓"
        } else if question.selected.as_deref() == Some(option.as_str()) {
            "✗"
        } else {
            " "
        };
        let _ = writeln!(text, "  {} {}) {}", mark, i + 1, option);
    }
}

impl<W: Write + Send> Frontend for TerminalFrontend<W> {
    fn begin_transition(&mut self) {}

    fn render(&mut self, screen: &Screen) {
        let text = match screen {
            Screen::Card(card) => self.format_card(card),
            Screen::NoMatches => "No matching words. Try another search or category.".to_string(),
            Screen::LoadError { message } => format!("Could not load the vocabulary: {}", message),
        };
        self.emit(&text);
    }

    fn show_answer(&mut self, result: &AnswerResult) {
        let text = if result.is_correct {
            "Correct!".to_string()
        } else {
            format!("Incorrect. The answer was: {}", result.correct_option)
        };
        self.emit(&text);
    }

    fn quiz_unavailable(&mut self, reason: &QuizError) {
        self.emit(&format!("Quiz unavailable: {}", reason));
    }

    fn apply_theme(&mut self, theme: Theme) {
        self.theme = theme;
        tracing::debug!("Theme applied: {:?}", theme);
    }

    fn show_categories(&mut self, categories: &[String]) {
        let mut names = vec![ALL_CATEGORIES.to_string()];
        names.extend(categories.iter().cloned());
        self.emit(&format!("Categories: {}", names.join(", ")));
    }

    fn show_voices(&mut self, voices: &[VoiceInfo], selected: Option<&str>) {
        if voices.is_empty() {
            self.emit("No voices for this language; the system default will be used.");
            return;
        }

        let mut text = String::from("Voices:");
        for voice in voices {
            let marker = if selected == Some(voice.name.as_str()) { "*" } else { " " };
            let _ = write!(text, "\n {} {} ({})", marker, voice.name, voice.language_tag);
        }
        self.emit(&text);
    }
}

/// Prints speech requests instead of playing them.
pub struct TerminalSpeech<W: Write + Send> {
    out: W,
}

impl TerminalSpeech<io::Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write + Send> TerminalSpeech<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write + Send> SpeechSink for TerminalSpeech<W> {
    fn cancel(&mut self) {}

    fn speak(&mut self, request: &SpeechRequest) {
        let voice = request
            .voice
            .as_ref()
            .map(|v| v.name.as_str())
            .unwrap_or("default voice");

        tracing::info!(
            "Speaking '{}' with {} ({}, rate {})",
            request.text,
            voice,
            request.language_tag,
            request.rate
        );

        if let Err(e) = writeln!(self.out, "🔊 {} [{}, {}]", request.text, voice, request.language_tag) {
            tracing::warn!("Failed to write to terminal: {}", e);
        }
    }
}

/// Parse one line of learner input.
///
/// Returns `None` for blank or unrecognized input.
pub fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim();

    if let Some(search) = line.strip_prefix('/') {
        return Some(Command::Search(search.trim().to_string()));
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match (word, rest) {
        ("n" | "next", "") => Command::Next,
        ("p" | "prev", "") => Command::Prev,
        ("r" | "random", "") => Command::Random,
        ("q" | "quiz", "") => Command::ToggleMode,
        ("s", "") => Command::SpeakTerm,
        ("voices", "") => Command::ListVoices,
        ("t" | "theme", "") => Command::ToggleTheme,
        ("x" | "exit", "") => Command::Quit,
        ("search", text) => Command::Search(text.to_string()),
        ("cat", name) if !name.is_empty() => Command::Category(name.to_string()),
        ("voice", name) if !name.is_empty() => Command::SelectVoice(name.to_string()),
        ("e", n) => match n.parse::<usize>() {
            Ok(n) if n >= 1 => Command::SpeakExample(n - 1),
            _ => return None,
        },
        (answer, "") => match answer.parse::<usize>() {
            Ok(n) if (1..=4).contains(&n) => Command::Answer(n - 1),
            _ => return None,
        },
        _ => return None,
    };

    Some(command)
}

/// Read learner commands from stdin until `exit` or end of input.
pub fn spawn_input_reader(command_tx: mpsc::Sender<Command>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            let line = match lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => {
                    tracing::info!("End of input");
                    break;
                }
                Err(e) => {
                    tracing::error!("Failed to read input: {}", e);
                    break;
                }
            };

            if line.trim().is_empty() {
                continue;
            }

            match parse_command(&line) {
                Some(Command::Quit) => break,
                Some(command) => {
                    if command_tx.send(command).await.is_err() {
                        return;
                    }
                }
                None => println!("{}", HELP),
            }
        }

        let _ = command_tx.send(Command::Quit).await;
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Definition, Entry};

    fn card(mode: Mode, quiz: Option<QuizQuestion>) -> CardView {
        CardView {
            entry: Entry {
                term: "chat".to_string(),
                category: Some("animaux".to_string()),
                definitions: vec![Definition {
                    translation: "gato".to_string(),
                    example_source: "Le chat dort.".to_string(),
                    example_target: "El gato duerme.".to_string(),
                }],
            },
            position: 1,
            total: 3,
            mode,
            quiz,
        }
    }

    fn rendered(screen: &Screen) -> String {
        let mut frontend = TerminalFrontend::new(Vec::new());
        frontend.render(screen);
        String::from_utf8(frontend.into_inner()).unwrap()
    }

    #[test]
    fn test_parse_navigation_commands() {
        assert_eq!(parse_command("n"), Some(Command::Next));
        assert_eq!(parse_command(" next "), Some(Command::Next));
        assert_eq!(parse_command("prev"), Some(Command::Prev));
        assert_eq!(parse_command("r"), Some(Command::Random));
        assert_eq!(parse_command("q"), Some(Command::ToggleMode));
        assert_eq!(parse_command("exit"), Some(Command::Quit));
    }

    #[test]
    fn test_parse_commands_with_arguments() {
        assert_eq!(parse_command("/ch"), Some(Command::Search("ch".to_string())));
        assert_eq!(parse_command("/"), Some(Command::Search(String::new())));
        assert_eq!(
            parse_command("search la maison"),
            Some(Command::Search("la maison".to_string()))
        );
        assert_eq!(parse_command("cat objets"), Some(Command::Category("objets".to_string())));
        assert_eq!(
            parse_command("voice Google français"),
            Some(Command::SelectVoice("Google français".to_string()))
        );
        assert_eq!(parse_command("e 2"), Some(Command::SpeakExample(1)));
        assert_eq!(parse_command("3"), Some(Command::Answer(2)));
    }

    #[test]
    fn test_parse_rejects_invalid_input() {
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("5"), None);
        assert_eq!(parse_command("0"), None);
        assert_eq!(parse_command("e 0"), None);
        assert_eq!(parse_command("cat"), None);
        assert_eq!(parse_command("next please"), None);
        assert_eq!(parse_command("bonjour"), None);
    }

    #[test]
    fn test_render_study_card() {
        let text = rendered(&Screen::Card(card(Mode::Study, None)));

        assert!(text.contains("chat  [ANIMAUX]"));
        assert!(text.contains("1. gato"));
        assert!(text.contains("e1: Le chat dort."));
        assert!(text.contains("El gato duerme."));
        assert!(text.contains("1 / 3"));
    }

    #[test]
    fn test_render_answered_question() {
        let question = QuizQuestion {
            prompt: card(Mode::Quiz, None).entry,
            options: vec![
                "perro".to_string(),
                "gato".to_string(),
                "mesa".to_string(),
                "casa".to_string(),
            ],
            correct_option: "gato".to_string(),
            answered: true,
            selected: Some("mesa".to_string()),
        };
        let text = rendered(&Screen::Card(card(Mode::Quiz, Some(question))));

        assert!(text.contains("✓ 2) gato"));
        assert!(text.contains("✗ 3) mesa"));
        assert!(text.contains("  1) perro"));
        // Study content is hidden while quizzing
        assert!(!text.contains("Le chat dort."));
    }

    #[test]
    fn test_render_empty_screens() {
        assert!(rendered(&Screen::NoMatches).contains("No matching words"));
        assert!(rendered(&Screen::LoadError {
            message: "file not found".to_string()
        })
        .contains("file not found"));
    }

    #[test]
    fn test_dark_theme_emphasizes_term() {
        let mut frontend = TerminalFrontend::new(Vec::new());
        frontend.apply_theme(Theme::Dark);
        frontend.render(&Screen::Card(card(Mode::Study, None)));

        let text = String::from_utf8(frontend.into_inner()).unwrap();
        assert!(text.contains("\x1b[1mchat\x1b[0m"));
    }

    #[test]
    fn test_speech_prints_request() {
        let mut speech = TerminalSpeech::new(Vec::new());
        speech.speak(&SpeechRequest::resolve("Bonjour", None, &[], "fr", "fr-FR", 0.9));

        let text = String::from_utf8(speech.out).unwrap();
        assert!(text.contains("Bonjour [default voice, fr-FR]"));
    }
}
