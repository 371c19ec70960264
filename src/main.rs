use std::{
    io::{self, BufRead, Write},
    str::FromStr,
};

use clap::Parser;
use rand::Rng;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use piecequeue::{
    piece::{Piece, PieceGenerator},
    queue::{DEFAULT_CAPACITY, Queue},
};

const MAX_CAPACITY: usize = 4096;
const SEPARATOR: &str = "-----------------------------------------";
const MENU: &str = "1. Play piece (dequeue)\n2. Insert new piece (enqueue)\n0. Exit\nChoose an option: ";

/// Simulates the queue of upcoming pieces in a falling-block game.
#[derive(Parser, Clone, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Opt {
    /// Number of upcoming pieces the queue holds.
    #[clap(long, default_value_t = DEFAULT_CAPACITY, value_parser = parse_capacity)]
    pub capacity: usize,

    /// Seed for piece kinds, taken from the OS when omitted.
    #[clap(long)]
    pub seed: Option<u64>,

    /// Print the queue as JSON instead of text.
    #[clap(long)]
    pub json: bool,
}

fn parse_capacity(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(capacity) if (1..=MAX_CAPACITY).contains(&capacity) => Ok(capacity),
        Ok(_) => Err(format!("capacity must be between 1 and {MAX_CAPACITY}")),
        Err(err) => Err(err.to_string()),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Play,
    Insert,
    Exit,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid option")]
struct ParseCommandError;

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s {
            "play" => return Ok(Command::Play),
            "insert" => return Ok(Command::Insert),
            "exit" => return Ok(Command::Exit),
            _ => (),
        }

        match s.parse::<i64>().map_err(|_| ParseCommandError)? {
            1 => Ok(Command::Play),
            2 => Ok(Command::Insert),
            0 => Ok(Command::Exit),
            _ => Err(ParseCommandError),
        }
    }
}

#[derive(Debug, Serialize)]
struct QueueState {
    count: usize,
    capacity: usize,
    pieces: Vec<Piece>,
}

impl From<&Queue<Piece>> for QueueState {
    fn from(queue: &Queue<Piece>) -> Self {
        Self {
            count: queue.len(),
            capacity: queue.capacity(),
            pieces: queue.snapshot(),
        }
    }
}

/// Interactive session over a queue of upcoming pieces.
struct Simulator<R> {
    queue: Queue<Piece>,
    generator: PieceGenerator<R>,
    json: bool,
}

impl<R: Rng> Simulator<R> {
    fn new(capacity: usize, generator: PieceGenerator<R>, json: bool) -> Self {
        Self {
            queue: Queue::new(capacity),
            generator,
            json,
        }
    }

    /// Generates pieces until the queue is full.
    fn prefill(&mut self) {
        while !self.queue.is_full() {
            let piece = self.generator.generate();
            if let Err(err) = self.queue.enqueue(piece) {
                tracing::warn!("prefill stopped early: {err}");
                break;
            }
        }
        tracing::info!(
            pieces = self.queue.len(),
            capacity = self.queue.capacity(),
            "queue prefilled"
        );
    }

    fn run(&mut self, mut input: impl BufRead, mut out: impl Write) -> io::Result<()> {
        writeln!(out, "--- Upcoming piece queue simulator ---")?;
        writeln!(out, "Queue initialized with {} pieces.", self.queue.len())?;

        let mut line = String::new();
        loop {
            writeln!(out)?;
            writeln!(out, "{SEPARATOR}")?;
            self.render(&mut out)?;
            writeln!(out, "{SEPARATOR}")?;
            write!(out, "{MENU}")?;
            out.flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                tracing::debug!("end of input");
                writeln!(out)?;
                break;
            }

            match line.parse::<Command>() {
                Ok(Command::Play) => self.play(&mut out)?,
                Ok(Command::Insert) => self.insert(&mut out)?,
                Ok(Command::Exit) => break,
                Err(err) => {
                    tracing::debug!(input = line.trim(), "{err}");
                    writeln!(out, "Invalid option.")?;
                }
            }
        }

        writeln!(
            out,
            "Exiting. Pieces remaining in queue: {}",
            self.queue.len()
        )?;
        tracing::info!(remaining = self.queue.len(), "session finished");
        Ok(())
    }

    /// Plays the front piece and tops the queue back up with one new piece.
    fn play(&mut self, out: &mut impl Write) -> io::Result<()> {
        let played = match self.queue.dequeue() {
            Ok(piece) => piece,
            Err(err) => {
                tracing::warn!("play failed: {err}");
                return writeln!(out, "Error: {err}");
            }
        };
        tracing::debug!(piece = %played, "dequeued");
        writeln!(out, "-> Played piece: [{played}]")?;

        if !self.queue.is_full() {
            let piece = self.generator.generate();
            match self.queue.enqueue(piece) {
                Ok(()) => {
                    tracing::debug!(%piece, "enqueued replacement");
                    writeln!(out, "-> New piece [{piece}] added to the back to keep the flow.")?;
                }
                Err(err) => writeln!(out, "Error: {err}")?,
            }
        }
        Ok(())
    }

    /// Generates one piece and tries to enqueue it, the piece is lost if
    /// the queue is full.
    fn insert(&mut self, out: &mut impl Write) -> io::Result<()> {
        let piece = self.generator.generate();
        match self.queue.enqueue(piece) {
            Ok(()) => {
                tracing::debug!(%piece, "enqueued");
                writeln!(out, "-> Inserted piece: [{piece}]")
            }
            Err(err) => {
                tracing::warn!(%piece, "insert failed: {err}");
                writeln!(out, "Error: {err}")
            }
        }
    }

    fn render(&self, out: &mut impl Write) -> io::Result<()> {
        if self.json {
            let state = QueueState::from(&self.queue);
            let json = serde_json::to_string(&state).map_err(io::Error::other)?;
            return writeln!(out, "{json}");
        }

        write!(
            out,
            "Upcoming pieces ({}/{}): ",
            self.queue.len(),
            self.queue.capacity()
        )?;
        if self.queue.is_empty() {
            return writeln!(out, "[EMPTY]");
        }

        let tokens: Vec<String> = self.queue.iter().map(|piece| format!("[{piece}]")).collect();
        writeln!(out, "{}", tokens.join(" "))
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let options = Opt::parse();

    tracing_subscriber::fmt()
        .with_target(true)
        .with_thread_ids(false)
        .with_level(true)
        .with_ansi(false)
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let generator = match options.seed {
        Some(seed) => PieceGenerator::seeded(seed),
        None => PieceGenerator::from_entropy(),
    };
    tracing::info!(
        capacity = options.capacity,
        seed = ?options.seed,
        "starting simulator"
    );

    let mut simulator = Simulator::new(options.capacity, generator, options.json);
    simulator.prefill();
    simulator.run(io::stdin().lock(), io::stdout().lock())?;

    Ok(())
}
