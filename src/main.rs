use clap::Parser;
use rand::Rng;
use std::error::Error;
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;
use typefall::runtime::{ChannelEventSource, FixedTicker, FrameEvent, Runner};
use typefall::{GameConfig, GameEvent, GameState, Session, WordBank};

/// headless autoplay driver for the typefall session engine
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Runs a full typing-match session against a bot typist and prints the final stats. Useful for exercising configs and word lists without a front end."
)]
struct Cli {
    /// path to a game config json (defaults to the embedded config)
    #[clap(short = 'c', long)]
    config: Option<PathBuf>,

    /// real milliseconds per frame; 0 runs flat out
    #[clap(long, default_value_t = 0)]
    tick_ms: u64,

    /// simulated milliseconds per frame
    #[clap(long, default_value_t = 50)]
    dt_ms: u64,

    /// probability the bot types the expected character
    #[clap(long, default_value_t = 0.92)]
    bot_accuracy: f64,

    /// append the final stats to the results log
    #[clap(long)]
    log: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => GameConfig::from_file(path)?,
        None => GameConfig::load_default(),
    };
    // Custom configs still draw from the embedded word lists.
    let bank = WordBank::for_config(&config)?;

    let mut session = Session::new();
    session.start_game(config.clone(), bank)?;

    // No scripted input; the bot reacts to session state between ticks.
    let (_tx, rx) = mpsc::channel::<FrameEvent>();
    let runner = Runner::new(
        ChannelEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(cli.tick_ms)),
    );

    let dt = cli.dt_ms as f64 / 1000.0;
    let max_frames = (config.total_game_time / dt).ceil() as u64 + 100;
    let mut rng = rand::thread_rng();

    for _ in 0..max_frames {
        match runner.step() {
            FrameEvent::Key(c) => session.key_char(c),
            FrameEvent::Delete => session.delete_char(),
            FrameEvent::Tick => {
                if let Some(expected) = session.matcher().expected_char() {
                    if rng.gen_bool(cli.bot_accuracy.clamp(0.0, 1.0)) {
                        session.key_char(expected);
                    } else {
                        let wrong = (b'a' + rng.gen_range(0..26)) as char;
                        if wrong != expected {
                            session.key_char(wrong);
                        }
                    }
                }
                session.update(dt);
            }
        }

        for event in session.drain_events() {
            match event {
                GameEvent::PhaseChanged(index) => {
                    println!("phase -> {} ({})", index, config.phases[index].name);
                }
                GameEvent::Warning(message) => eprintln!("warning: {message}"),
                GameEvent::GameOver(summary) => {
                    println!();
                    println!("score          {}", summary.score);
                    println!("rank           {}", summary.rank);
                    println!("max combo      {}", summary.max_combo);
                    println!("cleared words  {}", summary.cleared_words);
                    println!("typed chars    {}", summary.typed_chars);
                    println!("miss types     {}", summary.miss_types);
                    println!("accuracy       {:.1}%", summary.accuracy);
                    println!("chars/sec      {:.2}", summary.typing_speed);
                    if cli.log {
                        summary.append_to_log()?;
                    }
                }
                _ => {}
            }
        }

        if session.state() == GameState::Result {
            break;
        }
    }

    Ok(())
}
