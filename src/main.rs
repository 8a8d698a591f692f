use std::error::Error;
use std::io::Write;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use word_impostor::config::AppConfig;
use word_impostor::state::{CardFace, RoundSummary, SeatReveal};
use word_impostor::timer::{format_tenths, RevealState};
use word_impostor::types::{Language, RoundPhase, Seat};
use word_impostor::{catalog, settings, RoundError, RoundSession};

type Input = Lines<BufReader<Stdin>>;

fn tr(language: Language, en: &'static str, fi: &'static str) -> &'static str {
    match language {
        Language::Primary => en,
        Language::Secondary => fi,
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Load .env file if present (before any env var reads)
    if let Err(e) = dotenvy::dotenv() {
        if !matches!(e, dotenvy::Error::Io(_)) {
            eprintln!("Warning: Failed to load .env file: {}", e);
        }
    }

    // Logs go to stderr so they don't interleave with the cards
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "word_impostor=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = AppConfig::from_env();
    let mut game_settings = settings::load_or_default(&config.settings_path).await;
    if let Some(language) = config.language {
        game_settings.language = language;
    }
    if let Some(chance) = config.multiple_chance {
        game_settings.options.multiple_chance = chance;
    }
    let lang = game_settings.language;

    let catalog = catalog::load_from_path(&config.words_path).await;
    let mut session = RoundSession::new(catalog);
    if let Some(last) = game_settings.last_secret.clone() {
        session = session.with_last_secret(last);
    }

    let mut input = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let filter = game_settings.filter_spec(session.catalog());
        match session.start(
            game_settings.player_count(),
            &filter,
            game_settings.options.clone(),
        ) {
            Ok(setup) => println!(
                "\n{} {} ({} {})",
                tr(lang, "Round", "Kierros"),
                setup.number,
                setup.total_players,
                tr(lang, "players", "pelaajaa")
            ),
            Err(RoundError::EmptyPool) => {
                println!(
                    "{}",
                    tr(
                        lang,
                        "No words match the selected difficulty and categories.",
                        "Valituilla vaikeustasoilla ja kategorioilla ei löydy sanoja."
                    )
                );
                break;
            }
            Err(e) => return Err(e.into()),
        }

        if !deal(&mut session, &config, lang, &mut input).await? {
            break;
        }

        if session.phase() == RoundPhase::Done {
            println!(
                "{}",
                tr(
                    lang,
                    "Everyone has seen their card. Press Enter to show the results.",
                    "Kaikki ovat nähneet korttinsa. Paina Enter nähdäksesi tulokset."
                )
            );
            if input.next_line().await?.is_none() {
                break;
            }
            if let Some(summary) = session.summary() {
                print_summary(&summary, lang);
            }
        }

        game_settings.last_secret = session.last_secret().map(str::to_string);
        if let Err(e) = settings::save(&config.settings_path, &game_settings).await {
            tracing::warn!("Failed to save settings: {}", e);
        }
        session.reset();

        println!(
            "{}",
            tr(
                lang,
                "Press Enter for a new round, or q + Enter to quit.",
                "Paina Enter uutta kierrosta varten, tai q + Enter lopettaaksesi."
            )
        );
        match input.next_line().await? {
            Some(line) if line.trim() != "q" => {}
            _ => break,
        }
    }

    Ok(())
}

/// Pass the device around the table. Returns false when stdin closes.
async fn deal(
    session: &mut RoundSession,
    config: &AppConfig,
    lang: Language,
    input: &mut Input,
) -> Result<bool, Box<dyn Error>> {
    while let Some(seat) = session.current_seat() {
        println!(
            "{} {}: {}",
            tr(lang, "Player", "Pelaaja"),
            seat,
            tr(
                lang,
                "press Enter to reveal your card (x + Enter ends the round)",
                "paina Enter paljastaaksesi korttisi (x + Enter lopettaa kierroksen)"
            )
        );
        let Some(line) = input.next_line().await? else {
            return Ok(false);
        };

        if line.trim() == "x" {
            session.begin_exit_hold(config.exit_hold_ms);
            run_holds(session, config.hold_step_ms, lang).await;
            return Ok(true);
        }

        session.begin_reveal_hold(config.hold_reveal_ms)?;
        run_holds(session, config.hold_step_ms, lang).await;

        if let Some(reveal) = session.current_reveal() {
            print_card(&reveal, lang);
        }

        println!(
            "{}",
            tr(
                lang,
                "Press Enter to hide the card and pass the device on.",
                "Paina Enter piilottaaksesi kortin ja anna laite seuraavalle."
            )
        );
        if input.next_line().await?.is_none() {
            return Ok(false);
        }
        print!("\x1B[2J\x1B[H");
        session.close_card()?;
    }
    Ok(true)
}

fn pending_hold(session: &RoundSession) -> Option<u64> {
    session.exit_hold_remaining().or(match session.card_state() {
        RevealState::Revealing { remaining_ms } => Some(remaining_ms),
        _ => None,
    })
}

/// Tick whichever hold is running until it completes.
async fn run_holds(session: &mut RoundSession, step_ms: u64, lang: Language) {
    let mut ticker = tokio::time::interval(Duration::from_millis(step_ms));
    ticker.tick().await;

    while let Some(remaining) = pending_hold(session) {
        print!("\r  {} s ", format_tenths(remaining, lang));
        let _ = std::io::stdout().flush();
        ticker.tick().await;
        session.tick(step_ms);
    }
    println!();
}

fn print_card(reveal: &SeatReveal, lang: Language) {
    match &reveal.face {
        CardFace::Word(word) => println!("  {}: {}", tr(lang, "Your word", "Sanasi"), word.text(lang)),
        CardFace::ImpostorSignal => {
            println!("  {}", tr(lang, "You are the impostor!", "Olet huijari!"))
        }
        CardFace::StealthSignal => println!(
            "  {}",
            tr(
                lang,
                "No word for you this round. Play along!",
                "Ei sanaa sinulle tällä kierroksella. Pelaa mukana!"
            )
        ),
    }

    if let Some(hint) = &reveal.hint {
        let heading = if hint.is_plural() {
            tr(lang, "Categories", "Kategoriat")
        } else {
            tr(lang, "Category", "Kategoria")
        };
        println!("  {}: {}", heading, hint.label(lang));
    }

    if let Some(count) = reveal.impostor_count {
        println!(
            "  {}: {}",
            tr(lang, "Impostors this round", "Huijareita tällä kierroksella"),
            count
        );
    }
}

fn seat_list(seats: &[Seat]) -> String {
    seats
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn print_summary(summary: &RoundSummary, lang: Language) {
    println!(
        "{}: {}",
        tr(lang, "Secret word", "Salainen sana"),
        summary.secret.text(lang)
    );
    if let Some(decoy) = &summary.decoy {
        println!(
            "{}: {}",
            tr(lang, "Decoy word", "Harhautussana"),
            decoy.text(lang)
        );
    }
    println!(
        "{}: {}",
        tr(lang, "Impostors", "Huijarit"),
        seat_list(&summary.impostor_seats)
    );
    println!(
        "{}: {}",
        tr(lang, "Detectives", "Etsivät"),
        seat_list(&summary.detective_seats)
    );
}
